//! Expense categories and inventory types.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a category string is not one of the known values.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {value}")]
pub struct CategoryParseError {
    /// Which enumeration rejected the input.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Category of an operating expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Rent,
    Utilities,
    Salaries,
    Supplies,
    Marketing,
    Maintenance,
    Equipment,
    Transportation,
    Taxes,
    Insurance,
    Other,
}

impl ExpenseCategory {
    /// Snake-case identifier, as used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rent => "rent",
            Self::Utilities => "utilities",
            Self::Salaries => "salaries",
            Self::Supplies => "supplies",
            Self::Marketing => "marketing",
            Self::Maintenance => "maintenance",
            Self::Equipment => "equipment",
            Self::Transportation => "transportation",
            Self::Taxes => "taxes",
            Self::Insurance => "insurance",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExpenseCategory {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rent" => Ok(Self::Rent),
            "utilities" => Ok(Self::Utilities),
            "salaries" | "wages" => Ok(Self::Salaries),
            "supplies" => Ok(Self::Supplies),
            "marketing" => Ok(Self::Marketing),
            "maintenance" => Ok(Self::Maintenance),
            "equipment" => Ok(Self::Equipment),
            "transportation" => Ok(Self::Transportation),
            "taxes" => Ok(Self::Taxes),
            "insurance" => Ok(Self::Insurance),
            "other" => Ok(Self::Other),
            _ => Err(CategoryParseError {
                kind: "expense category",
                value: s.to_owned(),
            }),
        }
    }
}

/// What kind of stock an inventory entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InventoryType {
    /// Raw ingredients consumed by recipes.
    #[default]
    Ingredient,
    /// Cups, boxes, wrappers.
    Packaging,
    /// Cleaning and kitchen consumables.
    Supplies,
    /// Prepared items held for sale.
    FinishedGoods,
}

impl InventoryType {
    /// Snake-case identifier, as used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ingredient => "ingredient",
            Self::Packaging => "packaging",
            Self::Supplies => "supplies",
            Self::FinishedGoods => "finished_goods",
        }
    }
}

impl fmt::Display for InventoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InventoryType {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ingredient" | "ingredients" => Ok(Self::Ingredient),
            "packaging" => Ok(Self::Packaging),
            "supplies" => Ok(Self::Supplies),
            "finished_goods" | "finished goods" => Ok(Self::FinishedGoods),
            _ => Err(CategoryParseError {
                kind: "inventory type",
                value: s.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_category_display_matches_serde() {
        let json = serde_json::to_string(&ExpenseCategory::Transportation).unwrap();
        assert_eq!(json, format!("\"{}\"", ExpenseCategory::Transportation));
    }

    #[test]
    fn test_expense_category_from_str() {
        assert_eq!(
            "Wages".parse::<ExpenseCategory>().unwrap(),
            ExpenseCategory::Salaries
        );
        let err = "snacks".parse::<ExpenseCategory>().unwrap_err();
        assert_eq!(err.to_string(), "invalid expense category: snacks");
    }

    #[test]
    fn test_inventory_type_roundtrip_through_str() {
        for ty in [
            InventoryType::Ingredient,
            InventoryType::Packaging,
            InventoryType::Supplies,
            InventoryType::FinishedGoods,
        ] {
            assert_eq!(ty.as_str().parse::<InventoryType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_unknown_category_rejected_by_serde() {
        assert!(serde_json::from_str::<ExpenseCategory>("\"snacks\"").is_err());
    }
}
