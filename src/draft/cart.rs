use chrono::{NaiveDate, NaiveTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::error::DraftError;

/// One product in the draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    /// Physical count the operator recorded; `None` until entered.
    #[serde(default)]
    pub observed_stock: Option<u32>,
}

impl CartLine {
    pub fn amount(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// The order under construction.
///
/// Lines are keyed by product id, so a draft never holds two lines for the
/// same product. Insertion order is kept for display and submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderDraft {
    lines: IndexMap<String, CartLine>,
    pub branch: Option<String>,
    pub is_stock_order: bool,
    pub delivery_date: Option<NaiveDate>,
    pub delivery_time: Option<NaiveTime>,
}

impl OrderDraft {
    pub(crate) fn from_parts(lines: Vec<CartLine>, branch: Option<String>) -> Self {
        let mut draft = Self {
            branch,
            ..Self::default()
        };
        draft.merge(lines);
        draft
    }

    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.get(product_id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `quantity × price` over all lines. Always computed from the
    /// current lines.
    pub fn total(&self) -> f64 {
        self.lines.values().map(CartLine::amount).sum()
    }

    /// Set-union keyed by product id. Existing lines win on conflict; new ids
    /// are appended in the order given. A line enters with at least one unit.
    ///
    /// Returns how many lines were appended.
    pub fn merge(&mut self, new_items: impl IntoIterator<Item = CartLine>) -> usize {
        let before = self.lines.len();
        for mut line in new_items {
            if self.lines.contains_key(&line.product_id) {
                continue;
            }
            line.quantity = line.quantity.max(1);
            self.lines.insert(line.product_id.clone(), line);
        }
        self.lines.len() - before
    }

    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> Result<(), DraftError> {
        if quantity < 1 {
            return Err(DraftError::InvalidQuantity(quantity));
        }
        let quantity = u32::try_from(quantity).map_err(|_| DraftError::InvalidQuantity(quantity))?;
        self.line_mut(product_id)?.quantity = quantity;
        Ok(())
    }

    pub fn set_observed_stock(&mut self, product_id: &str, value: u32) -> Result<(), DraftError> {
        self.line_mut(product_id)?.observed_stock = Some(value);
        Ok(())
    }

    pub fn remove(&mut self, product_id: &str) -> Result<CartLine, DraftError> {
        self.lines
            .shift_remove(product_id)
            .ok_or_else(|| DraftError::LineNotFound(product_id.to_string()))
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn line_mut(&mut self, product_id: &str) -> Result<&mut CartLine, DraftError> {
        self.lines
            .get_mut(product_id)
            .ok_or_else(|| DraftError::LineNotFound(product_id.to_string()))
    }
}
