//! Period financial report: revenue, cost of goods sold, expenses, profit.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::costing::PurchasedItem;
use crate::{ExpenseCategory, ExpenseId, InventoryPeriodId, RecipeId, SaleId};

/// A recorded sale of one menu item.
///
/// `unit_cost` is the recipe's cost per serving at the time of sale, so later
/// price changes do not rewrite past COGS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SaleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<RecipeId>,
    pub item_name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    #[serde(default)]
    pub unit_cost: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_on: Option<NaiveDate>,
}

impl Sale {
    #[must_use]
    pub fn revenue(&self) -> Decimal {
        self.quantity * self.unit_price
    }

    #[must_use]
    pub fn cost_of_goods(&self) -> Decimal {
        self.quantity * self.unit_cost
    }
}

/// An operating expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ExpenseId>,
    pub category: ExpenseCategory,
    #[serde(default)]
    pub description: String,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incurred_on: Option<NaiveDate>,
}

/// Total spent in one expense category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub amount: Decimal,
}

/// Profit and loss summary for one inventory period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<InventoryPeriodId>,
    pub units_sold: Decimal,
    pub revenue: Decimal,
    pub cost_of_goods_sold: Decimal,
    pub gross_profit: Decimal,
    pub gross_margin_percent: Decimal,
    /// Sorted by category.
    pub expenses_by_category: Vec<CategoryTotal>,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
    pub net_margin_percent: Decimal,
    /// Money spent restocking during the period. Informational: COGS comes
    /// from sales, not purchases.
    pub purchases_total: Decimal,
}

impl FinancialReport {
    /// Build the report from a period's records.
    #[must_use]
    pub fn build(
        period: Option<InventoryPeriodId>,
        sales: &[Sale],
        expenses: &[Expense],
        purchases: &[PurchasedItem],
    ) -> Self {
        let units_sold: Decimal = sales.iter().map(|s| s.quantity).sum();
        let revenue: Decimal = sales.iter().map(Sale::revenue).sum();
        let cost_of_goods_sold: Decimal = sales.iter().map(Sale::cost_of_goods).sum();
        let gross_profit = revenue - cost_of_goods_sold;

        let mut by_category: BTreeMap<ExpenseCategory, Decimal> = BTreeMap::new();
        for expense in expenses {
            *by_category.entry(expense.category).or_default() += expense.amount;
        }
        let total_expenses: Decimal = by_category.values().copied().sum();
        let net_profit = gross_profit - total_expenses;

        Self {
            period,
            units_sold,
            revenue,
            cost_of_goods_sold,
            gross_profit,
            gross_margin_percent: percent_of(gross_profit, revenue),
            expenses_by_category: by_category
                .into_iter()
                .map(|(category, amount)| CategoryTotal { category, amount })
                .collect(),
            total_expenses,
            net_profit,
            net_margin_percent: percent_of(net_profit, revenue),
            purchases_total: purchases.iter().map(PurchasedItem::total_cost).sum(),
        }
    }
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        (part * Decimal::ONE_HUNDRED)
            .checked_div(whole)
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
}
