//! Fact Family - canonical factor pair
//!
//! Always stored with `factor1 <= factor2`, so `(5, 3)` and `(3, 5)` are the
//! same family with id `"3x5"`.

use serde::Serialize;
use std::str::FromStr;

use super::{MAX_MULTIPLIER, MIN_TABLE};

/// A canonical factor pair and its product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactFamily {
    factor1: u32,
    factor2: u32,
    product: u32,
}

impl FactFamily {
    /// Build a family from two factors in either order
    pub fn new(a: u32, b: u32) -> Self {
        let factor1 = a.min(b);
        let factor2 = a.max(b);
        Self {
            factor1,
            factor2,
            product: factor1 * factor2,
        }
    }

    /// The smaller factor
    pub fn factor1(&self) -> u32 {
        self.factor1
    }

    /// The larger factor
    pub fn factor2(&self) -> u32 {
        self.factor2
    }

    pub fn product(&self) -> u32 {
        self.product
    }

    /// Squares (`4x4`) have only one distinct factor to show or hide
    pub fn is_square(&self) -> bool {
        self.factor1 == self.factor2
    }

    /// Identity key, e.g. `"3x5"`
    pub fn id(&self) -> String {
        format!("{}x{}", self.factor1, self.factor2)
    }
}

/// Free-function form of [`FactFamily::new`]
pub fn create_fact_family(a: u32, b: u32) -> FactFamily {
    FactFamily::new(a, b)
}

impl std::fmt::Display for FactFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.factor1, self.factor2)
    }
}

/// Error parsing a family id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseFamilyIdError {
    #[error("family id '{0}' is not of the form <a>x<b>")]
    Malformed(String),
    #[error("family id '{0}' is not canonical (smaller factor must come first)")]
    NotCanonical(String),
    #[error("family id '{0}' has a factor outside {min}-{max}", min = MIN_TABLE, max = MAX_MULTIPLIER)]
    OutOfRange(String),
}

impl FromStr for FactFamily {
    type Err = ParseFamilyIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseFamilyIdError::Malformed(s.to_string());
        let (left, right) = s.split_once('x').ok_or_else(malformed)?;
        let a: u32 = left.parse().map_err(|_| malformed())?;
        let b: u32 = right.parse().map_err(|_| malformed())?;
        let range = MIN_TABLE..=MAX_MULTIPLIER;
        if !range.contains(&a) || !range.contains(&b) {
            return Err(ParseFamilyIdError::OutOfRange(s.to_string()));
        }
        let family = FactFamily::new(a, b);
        // rejects "5x3" as well as "+3x5" and "03x5"
        if family.id() != s {
            return Err(ParseFamilyIdError::NotCanonical(s.to_string()));
        }
        Ok(family)
    }
}
