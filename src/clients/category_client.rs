use crate::actor_framework::ResourceClient;
use crate::category_actor::CategoryError;
use crate::domain::Category;

/// Client for interacting with the Category actor.
#[derive(Clone)]
pub struct CategoryClient {
    inner: ResourceClient<Category>,
}

impl_basic_client!(CategoryClient, Category, CategoryError, category, categories);
