//! Profile updates for the signed-in account.
//!
//! An update is resolved in two steps: [`ProfileUpdate::plan`] validates the
//! request against the account it targets and yields a [`ProfileChange`], and
//! [`Account::apply_profile`] writes that change. The owning service runs its
//! cross-account collision checks between the two, so nothing is written until
//! every check has passed.

use stockroom_core::text::is_blank;
use stockroom_core::{ServiceError, ServiceResult};

use crate::account::{check_password, is_valid_email, Account};

/// Requested profile edits. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

impl ProfileUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn change_password(
        mut self,
        old_password: impl Into<String>,
        new_password: impl Into<String>,
    ) -> Self {
        self.old_password = Some(old_password.into());
        self.new_password = Some(new_password.into());
        self
    }

    /// Validate the request against `account` and resolve which fields change.
    ///
    /// - A blank username is treated as "unchanged".
    /// - A phone value is always applied when present (an empty string clears it).
    /// - An email that fails the pattern check is ignored rather than rejected.
    /// - A non-empty new password requires the current password and must meet
    ///   the minimum length.
    pub fn plan(&self, account: &Account) -> ServiceResult<ProfileChange> {
        let password = match self.new_password.as_deref() {
            Some(new_password) if !new_password.is_empty() => {
                let old_ok = self
                    .old_password
                    .as_deref()
                    .is_some_and(|old| account.password_matches(old));
                if !old_ok {
                    return Err(ServiceError::PasswordMismatch);
                }
                check_password(new_password)?;
                Some(new_password.to_string())
            }
            _ => None,
        };

        let username = self
            .username
            .as_deref()
            .filter(|u| !is_blank(u))
            .map(str::to_string);

        let email = self
            .email
            .as_deref()
            .filter(|e| is_valid_email(e))
            .map(str::to_string);

        Ok(ProfileChange {
            username,
            phone: self.phone.clone(),
            email,
            password,
        })
    }
}

/// A validated set of field changes, ready to apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChange {
    username: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

impl ProfileChange {
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn changes_password(&self) -> bool {
        self.password.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.password.is_none()
    }
}

impl Account {
    /// Write a validated change. Collision checks must already have passed.
    pub fn apply_profile(&mut self, change: ProfileChange) {
        let ProfileChange {
            username,
            phone,
            email,
            password,
        } = change;

        if let Some(username) = username {
            self.set_username(username);
        }
        if let Some(phone) = phone {
            self.set_phone(phone);
        }
        if let Some(email) = email {
            self.set_email(email);
        }
        if let Some(password) = password {
            self.set_password(password);
        }
    }
}
