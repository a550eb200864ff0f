//! Thread-safe handle around a single [`InventoryService`].
//!
//! Each `read`/`write` call holds the lock for the whole closure, so an
//! operation such as order creation checks and mutates stock without another
//! thread interleaving.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use stockroom_core::{AccountId, ServiceError};

use crate::service::InventoryService;

#[derive(Debug, Error)]
pub enum AuthenticateError {
    #[error(transparent)]
    Rejected(#[from] ServiceError),

    #[error("authentication worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone)]
pub struct SharedInventory {
    inner: Arc<Mutex<InventoryService>>,
}

impl SharedInventory {
    pub fn new(service: InventoryService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&InventoryService) -> R) -> R {
        f(&self.lock())
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut InventoryService) -> R) -> R {
        f(&mut self.lock())
    }

    /// Run an authentication attempt off the caller's task so an interactive
    /// front end stays responsive while it waits.
    pub async fn authenticate_in_background(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<AccountId, AuthenticateError> {
        let inventory = self.clone();
        let username = username.into();
        let password = password.into();

        let outcome = tokio::task::spawn_blocking(move || {
            inventory.write(|svc| svc.authenticate(&username, &password))
        })
        .await?;
        Ok(outcome?)
    }

    // Poisoning is ignored: operations validate before they mutate.
    fn lock(&self) -> MutexGuard<'_, InventoryService> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
