//! Registration, sessions and profile edits.

use stockroom_auth::{is_valid_email, Account, ProfileUpdate};
use stockroom_core::{find_by_id, position_by_id, AccountId, Entity, ServiceError, ServiceResult};

use crate::events::InventoryEvent;
use crate::service::InventoryService;

impl InventoryService {
    /// Register a new account with an empty phone number.
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        email: &str,
    ) -> ServiceResult<AccountId> {
        let account = Account::register(username, password, email).inspect_err(|err| {
            tracing::debug!(%err, "registration rejected");
        })?;
        self.insert_account(account)
    }

    /// Insert a field-validated account after the uniqueness checks.
    pub(crate) fn insert_account(&mut self, account: Account) -> ServiceResult<AccountId> {
        self.ensure_account_unique(Some(account.username()), Some(account.email()), None)
            .inspect_err(|err| tracing::debug!(%err, "registration rejected"))?;

        let account_id = account.id();
        self.accounts.push(account);

        tracing::info!(%account_id, "account registered");
        self.publish(InventoryEvent::AccountRegistered {
            account_id,
            occurred_at: self.now(),
        });
        Ok(account_id)
    }

    /// Start a session. The username match ignores case; the password match is exact.
    ///
    /// A failed attempt leaves any existing session untouched and does not say
    /// which of the two fields was wrong.
    pub fn authenticate(&mut self, username: &str, password: &str) -> ServiceResult<AccountId> {
        let Some(account_id) = self
            .accounts
            .iter()
            .find(|a| a.has_username(username) && a.password_matches(password))
            .map(Entity::id)
        else {
            tracing::warn!("authentication failed");
            return Err(ServiceError::InvalidCredentials);
        };

        self.session = Some(account_id);
        tracing::info!(%account_id, "session started");
        self.publish(InventoryEvent::SessionStarted {
            account_id,
            occurred_at: self.now(),
        });
        Ok(account_id)
    }

    /// Clear the session unconditionally, returning who was signed in.
    pub fn end_session(&mut self) -> Option<AccountId> {
        let previous = self.session.take();
        tracing::info!(account_id = ?previous, "session ended");
        self.publish(InventoryEvent::SessionEnded {
            account_id: previous,
            occurred_at: self.now(),
        });
        previous
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_account().is_some()
    }

    /// The signed-in account, if any.
    pub fn current_account(&self) -> Option<&Account> {
        let id = self.session?;
        find_by_id(&self.accounts, id)
    }

    /// Case-insensitive lookup by username.
    pub fn find_account(&self, username: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.has_username(username))
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Whether an account with this email exists. Changes nothing and sends nothing.
    ///
    /// Callers should show the same confirmation whatever this returns, so the
    /// UI does not reveal which addresses are registered.
    pub fn request_password_reset(&self, email: &str) -> bool {
        if !is_valid_email(email) {
            return false;
        }
        let known = self.accounts.iter().any(|a| a.has_email(email));
        tracing::debug!(known, "password reset requested");
        known
    }

    /// Edit the signed-in account.
    ///
    /// Every check (session, old password, new password length, username and
    /// email collisions) runs before any field is written, so a rejected update
    /// leaves the account exactly as it was.
    pub fn update_profile(&mut self, update: &ProfileUpdate) -> ServiceResult<()> {
        let account_id = self.session.ok_or(ServiceError::NotAuthenticated)?;
        let index =
            position_by_id(&self.accounts, account_id).ok_or(ServiceError::NotAuthenticated)?;

        let change = update.plan(&self.accounts[index]).inspect_err(|err| {
            tracing::debug!(%account_id, %err, "profile update rejected");
        })?;
        self.ensure_account_unique(change.username(), change.email(), Some(account_id))
            .inspect_err(|err| tracing::debug!(%account_id, %err, "profile update rejected"))?;

        self.accounts[index].apply_profile(change);

        tracing::info!(%account_id, "profile updated");
        self.publish(InventoryEvent::ProfileUpdated {
            account_id,
            occurred_at: self.now(),
        });
        Ok(())
    }

    fn ensure_account_unique(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        except: Option<AccountId>,
    ) -> ServiceResult<()> {
        let others = || self.accounts.iter().filter(|a| Some(a.id()) != except);

        if let Some(username) = username {
            if others().any(|a| a.has_username(username)) {
                return Err(ServiceError::UsernameTaken);
            }
        }
        if let Some(email) = email {
            if others().any(|a| a.has_email(email)) {
                return Err(ServiceError::EmailTaken);
            }
        }
        Ok(())
    }
}
