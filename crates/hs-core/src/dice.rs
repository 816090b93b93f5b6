//! Parameterized dice expressions.
//!
//! A [`Dice`] row is pure data: `quantity` dice of `sides` sides plus a flat
//! `offset`. Rolling lives in `hs-mechanics` so this crate stays free of
//! randomness.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A dice expression of the form `QdS + offset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dice {
    /// How many dice to roll. At least 1.
    pub quantity: u32,
    /// Sides per die. At least 2.
    pub sides: u32,
    /// Flat modifier added to the sum. Any sign.
    pub offset: i32,
    /// Optional free-text label from the rule author. Not used for display.
    pub label: Option<String>,
}

impl Dice {
    /// Create a dice expression, validating quantity and sides.
    pub fn new(quantity: u32, sides: u32, offset: i32) -> CoreResult<Self> {
        if quantity < 1 {
            return Err(CoreError::InvalidDice(format!(
                "quantity must be at least 1, got {quantity}"
            )));
        }
        if sides < 2 {
            return Err(CoreError::InvalidDice(format!(
                "sides must be at least 2, got {sides}"
            )));
        }
        Ok(Self {
            quantity,
            sides,
            offset,
            label: None,
        })
    }

    /// Parse an expression like `"2d6"`, `"1d20 + 5"`, or `"3d4-2"`.
    ///
    /// Whitespace is ignored. A missing quantity (`"d20"`) means one die.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let bad = || CoreError::InvalidDice(s.trim().to_string());

        let (body, offset) = if let Some((body, modifier)) = compact.split_once('+') {
            (body, modifier.parse::<i32>().map_err(|_| bad())?)
        } else if let Some((body, modifier)) = compact.split_once('-') {
            let value = modifier.parse::<i32>().map_err(|_| bad())?;
            (body, -value)
        } else {
            (compact.as_str(), 0)
        };

        let (quantity, sides) = body.split_once(['d', 'D']).ok_or_else(bad)?;
        let quantity = if quantity.is_empty() {
            1
        } else {
            quantity.parse::<u32>().map_err(|_| bad())?
        };
        let sides = sides.parse::<u32>().map_err(|_| bad())?;

        Self::new(quantity, sides, offset).map_err(|_| bad())
    }

    /// The lowest total a roll of this expression can produce.
    pub fn minimum(&self) -> i64 {
        i64::from(self.quantity) + i64::from(self.offset)
    }

    /// The highest total a roll of this expression can produce.
    pub fn maximum(&self) -> i64 {
        i64::from(self.quantity) * i64::from(self.sides) + i64::from(self.offset)
    }
}

impl std::fmt::Display for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.offset < 0 {
            write!(
                f,
                "{}d{} - {}",
                self.quantity,
                self.sides,
                i64::from(self.offset).abs()
            )
        } else if self.offset == 0 {
            write!(f, "{}d{}", self.quantity, self.sides)
        } else {
            write!(f, "{}d{} + {}", self.quantity, self.sides, self.offset)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_without_offset() {
        let dice = Dice::new(2, 6, 0).unwrap();
        assert_eq!(dice.to_string(), "2d6");
    }

    #[test]
    fn display_with_positive_offset() {
        let dice = Dice::new(1, 20, 5).unwrap();
        assert_eq!(dice.to_string(), "1d20 + 5");
    }

    #[test]
    fn display_with_negative_offset() {
        let dice = Dice::new(3, 4, -2).unwrap();
        assert_eq!(dice.to_string(), "3d4 - 2");
    }

    #[test]
    fn parse_plain() {
        let dice = Dice::parse("2d6").unwrap();
        assert_eq!((dice.quantity, dice.sides, dice.offset), (2, 6, 0));
    }

    #[test]
    fn parse_with_offset_and_spaces() {
        let dice = Dice::parse("1d20 + 5").unwrap();
        assert_eq!((dice.quantity, dice.sides, dice.offset), (1, 20, 5));

        let dice = Dice::parse("3d4-2").unwrap();
        assert_eq!((dice.quantity, dice.sides, dice.offset), (3, 4, -2));
    }

    #[test]
    fn parse_implicit_quantity() {
        let dice = Dice::parse("d20").unwrap();
        assert_eq!((dice.quantity, dice.sides, dice.offset), (1, 20, 0));
    }

    #[test]
    fn parse_roundtrips_display() {
        for expr in ["2d6", "1d20 + 5", "3d4 - 2"] {
            assert_eq!(Dice::parse(expr).unwrap().to_string(), expr);
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Dice::parse("foo").is_err());
        assert!(Dice::parse("0d6").is_err());
        assert!(Dice::parse("2d1").is_err());
        assert!(Dice::parse("2d").is_err());
        assert!(Dice::parse("").is_err());
    }

    #[test]
    fn bounds() {
        let dice = Dice::new(3, 6, -2).unwrap();
        assert_eq!(dice.minimum(), 1);
        assert_eq!(dice.maximum(), 16);
    }
}
