use crate::domain::OrderResponse;

/// Custom actions for placed orders.
///
/// A placed order's lines, totals and scheduling never change; only the
/// head-office response may be recorded afterwards.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Records the response and returns the updated order.
    SetResponse(OrderResponse),
}
