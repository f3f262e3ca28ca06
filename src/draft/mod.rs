//! The operator's order draft (cart): lines, branch choice, stock-order
//! scheduling, and the explicit store it is persisted through.

mod cart;
pub mod error;
mod manager;
pub mod store;

pub use cart::{CartLine, OrderDraft};
pub use error::*;
pub use manager::DraftManager;
pub use store::{DraftStore, JsonFileStore, MemoryStore, OrderDraftStore, StorageKey};
