use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::branch_actor::BranchError;
use crate::domain::Branch;

/// Client for interacting with the Branch actor.
#[derive(Clone)]
pub struct BranchClient {
    inner: ResourceClient<Branch>,
}

impl_basic_client!(BranchClient, Branch, BranchError, branch, branches);
impl_client_methods!(BranchClient, Branch, BranchError, branch);

impl BranchClient {
    /// Looks a branch up by id first, then by name.
    #[instrument(skip(self))]
    pub async fn find_branch(&self, key: String) -> Result<Option<Branch>, BranchError> {
        debug!("Sending request");
        if let Some(branch) = self.get_branch(key.clone()).await? {
            return Ok(Some(branch));
        }
        let branches = self.list_branches().await?;
        Ok(branches.into_iter().find(|b| b.matches(&key)))
    }
}
