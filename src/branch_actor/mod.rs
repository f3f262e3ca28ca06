//! Branches ("stores") managed by a resource actor.

pub mod entity;
pub mod error;

pub use error::*;

use crate::actor_framework::{sequential_ids, ResourceActor};
use crate::clients::BranchClient;
use crate::domain::Branch;

/// Creates a new Branch actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Branch>, BranchClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size, sequential_ids("branch"));
    (actor, BranchClient::new(generic_client))
}
