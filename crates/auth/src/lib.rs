//! `stockroom-auth` — accounts and credential rules.
//!
//! Credentials are plain text: this crate validates shape and uniqueness
//! inputs, it does not hash or protect secrets.

pub mod account;
pub mod profile;

pub use account::{is_valid_email, Account, MIN_PASSWORD_LEN};
pub use profile::{ProfileChange, ProfileUpdate};
