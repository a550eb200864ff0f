//! Account record and registration rules.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use stockroom_core::text::{eq_ignore_case, is_blank};
use stockroom_core::{AccountId, Entity, ServiceError, ServiceResult};

/// Shortest password accepted at registration and on password change.
pub const MIN_PASSWORD_LEN: usize = 3;

/// `local@domain`, where the local part is restricted to `[A-Za-z0-9+_.-]`.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+_.-]+@(.+)$").expect("Invalid regex"));

/// Check an email address against the accepted pattern.
pub fn is_valid_email(email: &str) -> bool {
    !is_blank(email) && EMAIL_RE.is_match(email)
}

pub(crate) fn check_password(password: &str) -> ServiceResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ServiceError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// A registered user.
///
/// # Invariants
/// - `username` is never blank.
/// - `password` is at least [`MIN_PASSWORD_LEN`] characters.
/// - `email` matches the accepted pattern.
///
/// Uniqueness of username and email is a collection-level rule enforced by the
/// service that owns every account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    id: AccountId,
    username: String,
    #[serde(skip_serializing)]
    password: String,
    email: String,
    phone: String,
}

impl Account {
    /// Validate field-level registration rules and build a new account with an
    /// empty phone number.
    pub fn register(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> ServiceResult<Self> {
        let username = username.into();
        let password = password.into();
        let email = email.into();

        if is_blank(&username) {
            return Err(ServiceError::BlankUsername);
        }
        check_password(&password)?;
        if !is_valid_email(&email) {
            return Err(ServiceError::InvalidEmail);
        }

        Ok(Self {
            id: AccountId::new(),
            username,
            password,
            email,
            phone: String::new(),
        })
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Case-insensitive username comparison.
    pub fn has_username(&self, username: &str) -> bool {
        eq_ignore_case(&self.username, username)
    }

    /// Case-insensitive email comparison.
    pub fn has_email(&self, email: &str) -> bool {
        eq_ignore_case(&self.email, email)
    }

    /// Exact (case-sensitive) password comparison.
    pub fn password_matches(&self, password: &str) -> bool {
        self.password == password
    }

    pub(crate) fn set_username(&mut self, username: String) {
        self.username = username;
    }

    pub(crate) fn set_email(&mut self, email: String) {
        self.email = email;
    }

    pub(crate) fn set_phone(&mut self, phone: String) {
        self.phone = phone;
    }

    pub(crate) fn set_password(&mut self, password: String) {
        self.password = password;
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> AccountId {
        self.id
    }
}
