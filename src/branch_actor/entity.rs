use crate::actor_framework::Entity;
use crate::domain::{Branch, BranchCreate};

impl Entity for Branch {
    type Id = String;
    type CreateParams = BranchCreate;
    type UpdateParams = ();
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Branch from creation parameters.
    ///
    /// # Arguments
    /// * `id` - Unique identifier for the branch
    /// * `params` - Branch name and street address
    fn from_create_params(id: String, params: BranchCreate) -> Result<Self, String> {
        if params.name.trim().is_empty() {
            return Err("Branch name required".to_string());
        }
        Ok(Self {
            id,
            name: params.name,
            address: params.address,
        })
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
