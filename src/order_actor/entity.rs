use chrono::Utc;

use super::actions::OrderAction;
use crate::actor_framework::Entity;
use crate::domain::{OrderSubmission, PlacedOrder};

impl Entity for PlacedOrder {
    type Id = String;
    type CreateParams = OrderSubmission;
    type UpdateParams = ();
    type Action = OrderAction;
    type ActionResult = PlacedOrder;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new PlacedOrder from a submission.
    ///
    /// # Notes
    /// The creation timestamp is assigned here and the response starts as pending.
    fn from_create_params(id: String, params: OrderSubmission) -> Result<Self, String> {
        Ok(PlacedOrder::new(id, params, Utc::now()))
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<PlacedOrder, String> {
        match action {
            OrderAction::SetResponse(response) => {
                self.response = response;
                Ok(self.clone())
            }
        }
    }
}
