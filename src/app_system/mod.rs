//! System orchestration, startup, and shutdown logic.

mod bakery_system;
pub mod seed;
mod tracing;

pub use bakery_system::*;
pub use seed::*;
pub use self::tracing::*;
