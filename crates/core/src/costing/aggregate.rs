//! Rolls purchase records up into one average unit cost per ingredient name.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{IngredientId, PurchaseId, Unit};

/// One purchase or inventory-entry record for an inventory period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PurchaseId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient_id: Option<IngredientId>,
    pub name: String,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
    /// No default; every purchase names its unit.
    pub unit: Unit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchased_on: Option<NaiveDate>,
}

impl PurchasedItem {
    /// Create a purchase record with no backend identifiers.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: Decimal, unit_cost: Decimal, unit: Unit) -> Self {
        Self {
            id: None,
            ingredient_id: None,
            name: name.into(),
            quantity,
            unit_cost,
            unit,
            purchased_on: None,
        }
    }

    /// Amount spent on this purchase.
    #[must_use]
    pub fn total_cost(&self) -> Decimal {
        self.quantity * self.unit_cost
    }
}

/// Average cost of one ingredient across all of its purchases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedIngredient {
    /// Grouping key.
    pub name: String,
    /// Quantity-weighted mean unit cost.
    pub average_unit_price: Decimal,
    /// Unit of the first purchase seen for this name.
    pub unit: Unit,
    pub total_quantity_purchased: Decimal,
    /// Backend ingredient reference from the first purchase that carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient_id: Option<IngredientId>,
}

impl AggregatedIngredient {
    /// Fold one more purchase into this aggregate.
    ///
    /// The new average is `(P×Q + c×q) / (Q+q)`. If the combined quantity is
    /// zero the average is defined as zero.
    pub fn merge(&mut self, quantity: Decimal, unit_cost: Decimal) {
        let combined = self.total_quantity_purchased + quantity;
        let spend = self.average_unit_price * self.total_quantity_purchased + unit_cost * quantity;
        self.average_unit_price = spend.checked_div(combined).unwrap_or(Decimal::ZERO);
        self.total_quantity_purchased = combined;
    }

    /// Amount spent across all purchases of this ingredient.
    #[must_use]
    pub fn total_spend(&self) -> Decimal {
        self.average_unit_price * self.total_quantity_purchased
    }
}

/// How purchase names are matched when grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AggregateOptions {
    /// Trim whitespace and ignore ASCII case when comparing names. Off by
    /// default: `"Rice"` and `"rice "` are separate ingredients.
    pub normalize_names: bool,
}

impl AggregateOptions {
    fn key(self, name: &str) -> String {
        if self.normalize_names {
            name.trim().to_ascii_lowercase()
        } else {
            name.to_owned()
        }
    }
}

/// Running totals for one group. Keeping spend and quantity as sums makes
/// the result independent of purchase order.
struct Accumulator {
    name: String,
    unit: Unit,
    ingredient_id: Option<IngredientId>,
    quantity: Decimal,
    spend: Decimal,
}

impl Accumulator {
    fn start(item: &PurchasedItem, normalize: bool) -> Self {
        let name = if normalize {
            item.name.trim().to_owned()
        } else {
            item.name.clone()
        };
        Self {
            name,
            unit: item.unit,
            ingredient_id: None,
            quantity: Decimal::ZERO,
            spend: Decimal::ZERO,
        }
    }

    fn add(&mut self, item: &PurchasedItem) {
        self.quantity += item.quantity;
        self.spend += item.total_cost();
        if self.ingredient_id.is_none() {
            self.ingredient_id = item.ingredient_id;
        }
    }

    fn finish(self) -> AggregatedIngredient {
        AggregatedIngredient {
            name: self.name,
            average_unit_price: self.spend.checked_div(self.quantity).unwrap_or(Decimal::ZERO),
            unit: self.unit,
            total_quantity_purchased: self.quantity,
            ingredient_id: self.ingredient_id,
        }
    }
}

/// Group purchases by exact name and compute each group's weighted average
/// unit cost.
///
/// Groups are returned in the order their name first appears.
///
/// ```
/// use plate_cost_core::Unit;
/// use plate_cost_core::costing::{PurchasedItem, aggregate};
/// use rust_decimal_macros::dec;
///
/// let purchases = [
///     PurchasedItem::new("Rice", dec!(5), dec!(50), Unit::Kilogram),
///     PurchasedItem::new("Rice", dec!(5), dec!(60), Unit::Kilogram),
/// ];
/// let rolled_up = aggregate(&purchases);
/// assert_eq!(rolled_up[0].average_unit_price, dec!(55));
/// ```
#[must_use]
pub fn aggregate(purchases: &[PurchasedItem]) -> Vec<AggregatedIngredient> {
    aggregate_with(purchases, AggregateOptions::default())
}

/// [`aggregate`] with explicit name-matching options.
#[must_use]
pub fn aggregate_with(
    purchases: &[PurchasedItem],
    options: AggregateOptions,
) -> Vec<AggregatedIngredient> {
    let mut groups: Vec<Accumulator> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in purchases {
        let slot = *index.entry(options.key(&item.name)).or_insert_with(|| {
            groups.push(Accumulator::start(item, options.normalize_names));
            groups.len() - 1
        });
        if let Some(group) = groups.get_mut(slot) {
            group.add(item);
        }
    }

    groups.into_iter().map(Accumulator::finish).collect()
}
