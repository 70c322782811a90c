//! Plain-text summaries of costing results.
//!
//! Each function returns lines; `main` decides where they go.

use plate_cost_core::costing::{AggregatedIngredient, RecipeCostResult};
use plate_cost_core::health::MarginHealth;
use plate_cost_core::report::FinancialReport;
use plate_cost_core::{CurrencyCode, format_money};
use rust_decimal::Decimal;

use crate::commands::price::PriceQuote;

fn percent(value: Decimal) -> String {
    format!("{:.1}%", value.round_dp(1))
}

/// One line per ingredient: name, average price per unit, quantity bought.
#[must_use]
pub fn aggregated(items: &[AggregatedIngredient], currency: CurrencyCode) -> Vec<String> {
    if items.is_empty() {
        return vec!["No purchases.".to_string()];
    }

    let width = items.iter().map(|i| i.name.chars().count()).max().unwrap_or(0);
    items
        .iter()
        .map(|item| {
            format!(
                "{:<width$}  {}/{}  ({} {} purchased)",
                item.name,
                format_money(item.average_unit_price, currency),
                item.unit,
                item.total_quantity_purchased.normalize(),
                item.unit,
            )
        })
        .collect()
}

/// The recipe economics panel.
#[must_use]
pub fn economics(
    name: &str,
    result: &RecipeCostResult,
    yield_count: u32,
    health: MarginHealth,
    currency: CurrencyCode,
) -> Vec<String> {
    let money = |amount| format_money(amount, currency);
    let title = if name.is_empty() { "Recipe" } else { name };

    vec![
        format!("{title} ({yield_count} servings)"),
        format!("  Material cost:      {}", money(result.material_cost)),
        format!("  Labor cost:         {}", money(result.labor_cost)),
        format!("  Overhead:           {}", money(result.overhead_allocation)),
        format!("  Total batch cost:   {}", money(result.total_cost)),
        format!("  Cost per serving:   {}", money(result.cost_per_unit)),
        format!("  Price per serving:  {}", money(result.selling_price_per_unit)),
        format!("  Gross profit:       {}", money(result.gross_profit)),
        format!(
            "  Profit margin:      {} [{health}]",
            percent(result.profit_margin_percent)
        ),
    ]
}

/// Output of the price/margin solver.
#[must_use]
pub fn price_quote(quote: &PriceQuote, currency: CurrencyCode) -> Vec<String> {
    let money = |amount| format_money(amount, currency);
    vec![
        format!("Price per serving:  {}", money(quote.unit_price)),
        format!("Batch price:        {}", money(quote.batch_price)),
        format!("Gross profit:       {}", money(quote.profitability.gross_profit)),
        format!(
            "Profit margin:      {}",
            percent(quote.profitability.profit_margin_percent)
        ),
    ]
}

/// Profit and loss statement.
#[must_use]
pub fn report(report: &FinancialReport, currency: CurrencyCode) -> Vec<String> {
    let money = |amount| format_money(amount, currency);
    let heading = report
        .period
        .map_or_else(|| "Financial report".to_string(), |p| format!("Financial report (period {p})"));

    let mut lines = vec![
        heading,
        format!("  Units sold:         {}", report.units_sold.normalize()),
        format!("  Revenue:            {}", money(report.revenue)),
        format!("  Cost of goods sold: {}", money(report.cost_of_goods_sold)),
        format!(
            "  Gross profit:       {} ({})",
            money(report.gross_profit),
            percent(report.gross_margin_percent)
        ),
    ];
    for total in &report.expenses_by_category {
        lines.push(format!("    {:<18}{}", total.category.to_string(), money(total.amount)));
    }
    lines.push(format!("  Total expenses:     {}", money(report.total_expenses)));
    lines.push(format!(
        "  Net profit:         {} ({})",
        money(report.net_profit),
        percent(report.net_margin_percent)
    ));
    lines.push(format!("  Purchases:          {}", money(report.purchases_total)));
    lines
}
