//! Product categories managed by a resource actor.

pub mod error;

pub use error::*;

use crate::actor_framework::{sequential_ids, Entity, ResourceActor};
use crate::clients::CategoryClient;
use crate::domain::{Category, CategoryCreate};

/// Creates a new Category actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Category>, CategoryClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size, sequential_ids("category"));
    (actor, CategoryClient::new(generic_client))
}

impl Entity for Category {
    type Id = String;
    type CreateParams = CategoryCreate;
    type UpdateParams = ();
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: CategoryCreate) -> Result<Self, String> {
        if params.name.trim().is_empty() {
            return Err("Category name required".to_string());
        }
        Ok(Self {
            id,
            name: params.name,
        })
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
