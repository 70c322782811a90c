//! Units of measure for purchases and recipe lines.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a unit string is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown unit: {0}")]
pub struct UnitParseError(pub String);

/// A unit of measure.
///
/// Purchases and recipe lines carry one of these instead of a free-form
/// string, so a typo such as `"kgs "` is caught at the boundary.
///
/// ## Examples
///
/// ```
/// use plate_cost_core::Unit;
///
/// assert_eq!("Kilograms".parse::<Unit>(), Ok(Unit::Kilogram));
/// assert_eq!("pieces".parse::<Unit>(), Ok(Unit::Piece));
/// assert_eq!(Unit::Milliliter.to_string(), "ml");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Unit {
    Kilogram,
    Gram,
    Liter,
    Milliliter,
    #[default]
    Piece,
    Pack,
    Box,
    Dozen,
    Tablespoon,
    Teaspoon,
    Cup,
}

impl Unit {
    /// Every unit, in display order.
    pub const ALL: [Self; 11] = [
        Self::Kilogram,
        Self::Gram,
        Self::Liter,
        Self::Milliliter,
        Self::Piece,
        Self::Pack,
        Self::Box,
        Self::Dozen,
        Self::Tablespoon,
        Self::Teaspoon,
        Self::Cup,
    ];

    /// Short form used on receipts and in the wire format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kilogram => "kg",
            Self::Gram => "g",
            Self::Liter => "l",
            Self::Milliliter => "ml",
            Self::Piece => "pcs",
            Self::Pack => "pack",
            Self::Box => "box",
            Self::Dozen => "dozen",
            Self::Tablespoon => "tbsp",
            Self::Teaspoon => "tsp",
            Self::Cup => "cup",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Unit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kg" | "kgs" | "kilo" | "kilos" | "kilogram" | "kilograms" => Ok(Self::Kilogram),
            "g" | "gr" | "gram" | "grams" => Ok(Self::Gram),
            "l" | "liter" | "liters" | "litre" | "litres" => Ok(Self::Liter),
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Ok(Self::Milliliter)
            }
            "pc" | "pcs" | "piece" | "pieces" | "unit" | "units" => Ok(Self::Piece),
            "pack" | "packs" | "pk" => Ok(Self::Pack),
            "box" | "boxes" => Ok(Self::Box),
            "dozen" | "dz" => Ok(Self::Dozen),
            "tbsp" | "tablespoon" | "tablespoons" => Ok(Self::Tablespoon),
            "tsp" | "teaspoon" | "teaspoons" => Ok(Self::Teaspoon),
            "cup" | "cups" => Ok(Self::Cup),
            _ => Err(UnitParseError(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Unit {
    type Error = UnitParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.as_str().to_owned()
    }
}
