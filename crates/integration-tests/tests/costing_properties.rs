//! Laws the costing engine holds for any input, checked over sample tables.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use plate_cost_core::costing::{
    AggregatedIngredient, PurchasedItem, RecipeIngredientLine, aggregate, compute_batch_cost,
    margin_from_price, per_unit, price_from_margin,
};
use plate_cost_core::draft::{DraftEdit, EditOutcome, RecipeDraft};
use plate_cost_core::{IngredientId, Unit};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const TOLERANCE: Decimal = dec!(0.0000000001);

fn assert_close(left: Decimal, right: Decimal) {
    assert!(
        (left - right).abs() < TOLERANCE,
        "{left} is not within tolerance of {right}"
    );
}

fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head.clone());
            out.push(tail);
        }
    }
    out
}

fn line(id: i64, quantity: Decimal, unit_cost: Decimal) -> RecipeIngredientLine {
    RecipeIngredientLine::new(
        IngredientId::new(id),
        format!("ingredient {id}"),
        quantity,
        Unit::Kilogram,
        unit_cost,
    )
}

// =============================================================================
// Aggregation
// =============================================================================

#[test]
fn test_average_ignores_purchase_order() {
    let purchases = vec![
        PurchasedItem::new("Flour", dec!(25), dec!(42.40), Unit::Kilogram),
        PurchasedItem::new("Flour", dec!(3), dec!(51), Unit::Kilogram),
        PurchasedItem::new("Flour", dec!(0.75), dec!(60.10), Unit::Kilogram),
        PurchasedItem::new("Flour", dec!(12.5), dec!(39.99), Unit::Kilogram),
        PurchasedItem::new("Flour", dec!(0), dec!(999), Unit::Kilogram),
    ];
    let expected = aggregate(&purchases)[0].average_unit_price;

    for order in permutations(&purchases) {
        let rolled = aggregate(&order);
        assert_eq!(rolled.len(), 1);
        assert_eq!(rolled[0].average_unit_price, expected);
        assert_eq!(rolled[0].total_quantity_purchased, dec!(41.25));
    }
}

#[test]
fn test_running_merge_matches_batch_average() {
    let purchases = [
        (dec!(5), dec!(50)),
        (dec!(5), dec!(60)),
        (dec!(2.5), dec!(71.2)),
    ];
    let items: Vec<PurchasedItem> = purchases
        .iter()
        .map(|(q, c)| PurchasedItem::new("Rice", *q, *c, Unit::Kilogram))
        .collect();
    let batch = aggregate(&items)[0].average_unit_price;

    for order in permutations(&purchases) {
        let (q, c) = order[0];
        let mut running = AggregatedIngredient {
            name: "Rice".to_string(),
            average_unit_price: c,
            unit: Unit::Kilogram,
            total_quantity_purchased: q,
            ingredient_id: None,
        };
        for (q, c) in &order[1..] {
            running.merge(*q, *c);
        }
        assert_close(running.average_unit_price, batch);
    }
}

#[test]
fn test_aggregation_scenario() {
    let rolled = aggregate(&[
        PurchasedItem::new("Rice", dec!(5), dec!(50), Unit::Kilogram),
        PurchasedItem::new("Rice", dec!(5), dec!(60), Unit::Kilogram),
    ]);
    assert_eq!(rolled[0].average_unit_price, dec!(55));
}

// =============================================================================
// Batch and per-serving cost
// =============================================================================

#[test]
fn test_batch_total_is_sum_of_parts() {
    let cases = [
        (vec![], dec!(0), dec!(0), dec!(0)),
        (vec![line(1, dec!(2), dec!(55)), line(2, dec!(1), dec!(280))], dec!(30), dec!(80), dec!(0.15)),
        (vec![line(1, dec!(0.333), dec!(17.31))], dec!(7), dec!(13.5), dec!(0.2)),
        (vec![line(1, dec!(1000), dec!(0.001)), line(2, dec!(3), dec!(0))], dec!(0), dec!(95), dec!(0)),
    ];

    for (lines, prep, rate, overhead) in cases {
        let batch = compute_batch_cost(&lines, prep, rate, overhead);
        assert_eq!(
            batch.total_cost,
            batch.material_cost + batch.labor_cost + batch.overhead_allocation
        );
        assert!(batch.total_cost >= Decimal::ZERO);
    }
}

#[test]
fn test_batch_scenario() {
    let lines = [line(1, dec!(2), dec!(55)), line(2, dec!(1), dec!(280))];
    let batch = compute_batch_cost(&lines, dec!(30), dec!(80), dec!(0.15));

    assert_eq!(batch.material_cost, dec!(390));
    assert_eq!(batch.labor_cost, dec!(40));
    assert_eq!(batch.overhead_allocation, dec!(58.5));
    assert_eq!(batch.total_cost, dec!(488.5));
}

#[test]
fn test_per_serving_times_yield_is_batch() {
    let lines = [line(1, dec!(2), dec!(55)), line(2, dec!(1), dec!(280))];
    let batch = compute_batch_cost(&lines, dec!(30), dec!(80), dec!(0.15));

    for yield_count in [1_u32, 2, 3, 7, 10, 12, 24, 1000] {
        let unit = per_unit(&batch, yield_count);
        assert_close(
            unit.total_cost_per_unit * Decimal::from(yield_count),
            batch.total_cost,
        );
    }
    assert_eq!(per_unit(&batch, 10).total_cost_per_unit, dec!(48.85));
}

// =============================================================================
// Pricing
// =============================================================================

#[test]
fn test_price_margin_round_trip() {
    for cost in [dec!(0.01), dec!(1), dec!(48.85), dec!(100), dec!(12345.67)] {
        for margin in [dec!(0), dec!(0.5), dec!(20), dec!(33.3), dec!(75), dec!(99.9)] {
            let price = price_from_margin(margin, cost).unwrap();
            assert_close(margin_from_price(price, cost).profit_margin_percent, margin);
        }
    }
}

#[test]
fn test_pricing_scenario() {
    let price = price_from_margin(dec!(20), dec!(100)).unwrap();
    assert_eq!(price, dec!(125));

    let forward = margin_from_price(price, dec!(100));
    assert_eq!(forward.gross_profit, dec!(25));
    assert_eq!(forward.profit_margin_percent, dec!(20));
}

#[test]
fn test_margin_outside_domain_leaves_price() {
    let mut draft = RecipeDraft::default();
    draft
        .apply(DraftEdit::IngredientAdded(line(1, dec!(2), dec!(55))))
        .unwrap();
    draft.apply(DraftEdit::UnitPriceEdited(dec!(150))).unwrap();

    for margin in [dec!(100), dec!(150), dec!(-5)] {
        let outcome = draft.apply(DraftEdit::MarginEdited(margin)).unwrap();
        assert_eq!(outcome, EditOutcome::Ignored);
        assert_eq!(draft.unit_selling_price(), dec!(150));
        assert_eq!(draft.batch_selling_price(), dec!(150));
    }
}

#[test]
fn test_margin_needs_positive_cost() {
    let mut draft = RecipeDraft::default();
    draft.apply(DraftEdit::UnitPriceEdited(dec!(40))).unwrap();

    let outcome = draft.apply(DraftEdit::MarginEdited(dec!(20))).unwrap();
    assert_eq!(outcome, EditOutcome::Ignored);
    assert_eq!(draft.unit_selling_price(), dec!(40));
}

#[test]
fn test_draft_keeps_prices_in_step() {
    let mut draft = RecipeDraft::default();
    let edits = [
        DraftEdit::IngredientAdded(line(1, dec!(2), dec!(55))),
        DraftEdit::YieldEdited(4),
        DraftEdit::UnitPriceEdited(dec!(60)),
        DraftEdit::YieldEdited(6),
        DraftEdit::BatchPriceEdited(dec!(100)),
        DraftEdit::YieldEdited(0),
        DraftEdit::MarginEdited(dec!(35)),
        DraftEdit::YieldEdited(3),
    ];

    for edit in edits {
        draft.apply(edit).unwrap();
        assert_close(
            draft.unit_selling_price() * Decimal::from(draft.yield_count()),
            draft.batch_selling_price(),
        );
        assert!(draft.yield_count() >= 1);
    }
}
