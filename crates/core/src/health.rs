//! Margin warning tiers.
//!
//! A weak or negative margin never blocks saving a recipe; it is shown as a
//! colored badge. This module decides which badge.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::costing::RecipeCostResult;

/// Margin percentages separating the warning tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginThresholds {
    /// Below this margin the recipe is `Low`.
    pub low: Decimal,
    /// Below this margin (and at or above `low`) the recipe is `Fair`.
    pub fair: Decimal,
}

impl Default for MarginThresholds {
    fn default() -> Self {
        Self {
            low: Decimal::TEN,
            fair: Decimal::from(20),
        }
    }
}

/// How healthy a recipe's margin is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginHealth {
    /// Selling below cost.
    Loss,
    Low,
    Fair,
    Healthy,
}

impl MarginHealth {
    /// Classify a margin. A negative gross profit is always a loss, whatever
    /// the margin percentage says (it reads 0 when there is no price).
    #[must_use]
    pub fn classify(
        profit_margin_percent: Decimal,
        gross_profit: Decimal,
        thresholds: MarginThresholds,
    ) -> Self {
        if gross_profit < Decimal::ZERO {
            Self::Loss
        } else if profit_margin_percent < thresholds.low {
            Self::Low
        } else if profit_margin_percent < thresholds.fair {
            Self::Fair
        } else {
            Self::Healthy
        }
    }

    /// Classify a full cost result.
    #[must_use]
    pub fn of(result: &RecipeCostResult, thresholds: MarginThresholds) -> Self {
        Self::classify(result.profit_margin_percent, result.gross_profit, thresholds)
    }

    /// Whether the tier should be shown as a warning.
    #[must_use]
    pub const fn is_warning(self) -> bool {
        matches!(self, Self::Loss | Self::Low)
    }

    /// Badge text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Loss => "loss",
            Self::Low => "low margin",
            Self::Fair => "fair margin",
            Self::Healthy => "healthy margin",
        }
    }
}

impl fmt::Display for MarginHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
