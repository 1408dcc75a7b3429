//! Numeric specifications — constants and inclusive ranges.

use rand::{Rng, RngCore};

use crate::error::ConfigError;

/// A number that resolves to a concrete value at evaluation time.
///
/// Parsed once at load time; resolution never fails. Equal range bounds
/// resolve without consulting the generator.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberProvider {
    Constant(f64),
    /// Inclusive range. `min <= max` holds from construction.
    Range { min: f64, max: f64 },
}

impl NumberProvider {
    pub fn constant(value: f64) -> Self {
        Self::Constant(value)
    }

    /// Build a range; reversed bounds are swapped.
    pub fn range(min: f64, max: f64) -> Self {
        if min > max {
            Self::Range { min: max, max: min }
        } else {
            Self::Range { min, max }
        }
    }

    /// Parse a textual spec: a plain number (`"4"`, `"2.5"`) or a
    /// `"min-max"` range. The range dash is searched after the first
    /// character so a leading sign still parses.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ConfigError::InvalidNumber { text: text.into() });
        }
        if let Ok(value) = text.parse::<f64>() {
            return Ok(Self::Constant(value));
        }
        let dash = text
            .char_indices()
            .skip(1)
            .find(|(_, c)| *c == '-')
            .map(|(index, _)| index);
        if let Some(index) = dash {
            let lo = text[..index].trim();
            let hi = text[index + 1..].trim();
            if let (Ok(min), Ok(max)) = (lo.parse::<f64>(), hi.parse::<f64>()) {
                return Ok(Self::range(min, max));
            }
        }
        Err(ConfigError::InvalidNumber { text: text.into() })
    }

    /// Resolve to a real value. Ranges draw uniformly over `[min, max]`.
    pub fn value(&self, rng: &mut dyn RngCore) -> f64 {
        match self {
            Self::Constant(value) => *value,
            Self::Range { min, max } => {
                if min == max {
                    *min
                } else {
                    rng.gen_range(*min..=*max)
                }
            }
        }
    }

    /// Resolve to an integer. Constants floor; ranges draw uniformly and
    /// inclusively over `[floor(min), floor(max)]`.
    pub fn integer(&self, rng: &mut dyn RngCore) -> i64 {
        match self {
            Self::Constant(value) => value.floor() as i64,
            Self::Range { min, max } => {
                let min = min.floor() as i64;
                let max = max.floor() as i64;
                if min == max {
                    min
                } else {
                    rng.gen_range(min..=max)
                }
            }
        }
    }
}
