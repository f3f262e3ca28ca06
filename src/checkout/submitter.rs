use chrono::{NaiveTime, TimeZone, Utc};
use tracing::{debug, error, info, instrument, warn};

use super::error::CheckoutError;
use super::gateway::OrderGateway;
use crate::domain::{DeliveryTime, OrderKind, OrderLine, OrderPayload, OrderSubmission, PlacedOrder};
use crate::draft::{DraftManager, OrderDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    Editing,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// What the operator is shown after a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Confirmed { order_id: String, total: f64 },
    Error(String),
}

/// Builds the submission for a draft. Fails only when no branch is selected.
///
/// Delivery date and time are carried only for stock orders: the date as
/// midnight UTC, the time as `HH:mm`. Either may still be unset.
pub fn build_submission(draft: &OrderDraft) -> Result<OrderSubmission, CheckoutError> {
    let branch = match draft.branch.as_deref().map(str::trim) {
        Some(branch) if !branch.is_empty() => branch.to_string(),
        _ => return Err(CheckoutError::NoBranchSelected),
    };

    let lines = draft
        .lines()
        .map(|line| OrderLine {
            name: line.name.clone(),
            quantity: line.quantity,
            price: line.price,
            in_stock_quantity: line.observed_stock.unwrap_or(0),
        })
        .collect();

    let kind = if draft.is_stock_order {
        OrderKind::Stock {
            delivery_date: draft
                .delivery_date
                .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))),
            delivery_time: draft.delivery_time.map(DeliveryTime),
        }
    } else {
        OrderKind::Regular
    };

    Ok(OrderSubmission {
        lines,
        total: draft.total(),
        branch,
        kind,
    })
}

/// Validates and transmits the finalized order.
///
/// `Editing → Validating → Submitting → Succeeded | Failed`; a failed attempt
/// lands back in `Editing` with the draft untouched.
pub struct CheckoutSubmitter<G> {
    gateway: G,
    state: CheckoutState,
    notification: Option<Notification>,
}

impl<G: OrderGateway> CheckoutSubmitter<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: CheckoutState::Editing,
            notification: None,
        }
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.notification = None;
    }

    /// Returns to product selection after a confirmed order.
    pub fn reset(&mut self) {
        self.notification = None;
        self.transition(CheckoutState::Editing);
    }

    #[instrument(skip(self, drafts), fields(lines = drafts.draft().len()))]
    pub async fn submit(&mut self, drafts: &mut DraftManager) -> Result<PlacedOrder, CheckoutError> {
        self.notification = None;
        self.transition(CheckoutState::Validating);

        let submission = match build_submission(drafts.draft()) {
            Ok(submission) => submission,
            Err(e) => {
                warn!(error = %e, "Checkout validation failed");
                self.notification = Some(Notification::Error(e.to_string()));
                self.transition(CheckoutState::Editing);
                return Err(e);
            }
        };

        self.transition(CheckoutState::Submitting);
        let payload = OrderPayload::from(submission);
        info!(branch = %payload.branch, total = payload.total_amount, "Submitting order");

        match self.gateway.submit(&payload).await {
            Ok(order) => {
                if let Err(e) = drafts.clear() {
                    error!(order_id = %order.id, error = %e, "Order placed but draft could not be cleared");
                }
                info!(order_id = %order.id, "Order confirmed");
                self.notification = Some(Notification::Confirmed {
                    order_id: order.id.clone(),
                    total: order.total_amount,
                });
                self.transition(CheckoutState::Succeeded);
                Ok(order)
            }
            Err(e) => {
                error!(error = %e, "Order submission failed");
                self.notification = Some(Notification::Error(e.to_string()));
                self.transition(CheckoutState::Failed);
                self.transition(CheckoutState::Editing);
                Err(e.into())
            }
        }
    }

    fn transition(&mut self, next: CheckoutState) {
        debug!(from = ?self.state, to = ?next, "Checkout state change");
        self.state = next;
    }
}
