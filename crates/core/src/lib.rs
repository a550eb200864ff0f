//! `stockroom-core` — shared building blocks for the inventory backend.
//!
//! This crate contains **pure domain** primitives (no IO, no storage): the error
//! model, strongly-typed identifiers, the entity trait and the clock seam.

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;
pub mod text;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entity::{find_by_id, position_by_id, Entity};
pub use error::{ServiceError, ServiceResult};
pub use id::{AccountId, IdSequence, OrderId, ProductId};
