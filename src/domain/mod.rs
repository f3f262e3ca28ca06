pub mod catalog;
pub mod order;
pub mod product;

pub use catalog::*;
pub use order::*;
pub use product::*;
