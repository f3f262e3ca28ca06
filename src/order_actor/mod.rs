//! Placed orders: the persistence side of checkout plus history responses.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::actor_framework::{sequential_ids, ResourceActor};
use crate::domain::PlacedOrder;

/// Creates a new Order actor. The caller wraps the generic client in an
/// [`OrderClient`](crate::clients::OrderClient) together with the branch client.
pub fn new(
    buffer_size: usize,
) -> (ResourceActor<PlacedOrder>, crate::actor_framework::ResourceClient<PlacedOrder>) {
    ResourceActor::new(buffer_size, sequential_ids("order"))
}
