//! Service error model.

use thiserror::Error;

use crate::id::{OrderId, ProductId};

/// Result type used across the service layer.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Business-rule failure.
///
/// This is a closed set: every expected rejection (invalid input, collision,
/// insufficient stock, unknown id) maps to exactly one variant. Callers that only
/// care about success can use `Result::is_ok`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("name cannot be blank")]
    BlankName,

    #[error("username cannot be blank")]
    BlankUsername,

    #[error("customer name cannot be blank")]
    BlankCustomerName,

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("invalid email address")]
    InvalidEmail,

    #[error("username is already taken")]
    UsernameTaken,

    #[error("email is already registered")]
    EmailTaken,

    #[error("a product with this name already exists")]
    NameTaken,

    #[error("price cannot be negative")]
    NegativePrice,

    #[error("quantity cannot be negative")]
    NegativeQuantity,

    #[error("order must contain at least one item")]
    EmptyOrder,

    /// A line item asked for zero or fewer units.
    #[error("line item for product {product_id} must have a positive quantity")]
    InvalidLineQuantity { product_id: ProductId },

    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    #[error("order {0} not found")]
    OrderNotFound(OrderId),

    #[error("insufficient stock for product {product_id} (requested {requested}, available {available})")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Summing quantities for one product left the supported range.
    #[error("quantity for product {product_id} is out of range")]
    QuantityOverflow { product_id: ProductId },

    /// A derived total (units, item count or amount) left the supported range.
    #[error("total is out of range")]
    TotalOverflow,

    #[error("no active session")]
    NotAuthenticated,

    /// Username or password did not match. Deliberately does not say which.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("current password does not match")]
    PasswordMismatch,

    #[error("product {0} is referenced by an existing order")]
    ReferencedByOrder(ProductId),

    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl ServiceError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// True for the "unknown id" family of failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ProductNotFound(_) | Self::OrderNotFound(_))
    }

    /// True when the input collided with an existing record.
    pub fn is_collision(&self) -> bool {
        matches!(self, Self::UsernameTaken | Self::EmailTaken | Self::NameTaken)
    }
}
