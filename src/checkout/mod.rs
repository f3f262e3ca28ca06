//! Checkout: turning a draft into an order submission and sending it.

pub mod error;
pub mod gateway;
mod submitter;

pub use error::*;
pub use gateway::{CatalogSource, HttpGateway, OrderGateway};
pub use submitter::{build_submission, CheckoutState, CheckoutSubmitter, Notification};
