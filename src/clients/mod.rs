//! Typed handles over the resource actors.

#[macro_use]
mod macros;

mod branch_client;
mod category_client;
mod order_client;
mod product_client;

pub use branch_client::BranchClient;
pub use category_client::CategoryClient;
pub use order_client::OrderClient;
pub use product_client::ProductClient;
