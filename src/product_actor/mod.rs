//! Catalog products ("pastries") managed by a resource actor.

pub mod entity;
pub mod error;

pub use error::*;

use crate::actor_framework::{sequential_ids, ResourceActor};
use crate::clients::ProductClient;
use crate::domain::Product;

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size, sequential_ids("product"));
    (actor, ProductClient::new(generic_client))
}
