//! Comparison operators accepted by `BTree::search`.

use std::fmt;
use std::str::FromStr;

use crate::common::Error;

/// How a search key is compared against stored keys.
///
/// # Range pairs
/// The strict and non-strict range operators behave the same way:
/// - `LessThan` and `LessThanOrEqual` collect keys strictly below the probe.
/// - `GreaterThan` and `GreaterThanOrEqual` collect keys at or above the probe.
///
/// Callers relying on the other bound should adjust the probe key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    /// `<`
    LessThan,
    /// `<=`
    LessThanOrEqual,
    /// `=`
    #[default]
    Equal,
    /// `>=`
    GreaterThanOrEqual,
    /// `>`
    GreaterThan,
    /// `!=`
    NotEqual,
}

impl Operator {
    /// All operators, in symbol order.
    pub const ALL: [Operator; 6] = [
        Operator::LessThan,
        Operator::LessThanOrEqual,
        Operator::Equal,
        Operator::GreaterThanOrEqual,
        Operator::GreaterThan,
        Operator::NotEqual,
    ];

    /// The operator's symbol.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::Equal => "=",
            Operator::GreaterThanOrEqual => ">=",
            Operator::GreaterThan => ">",
            Operator::NotEqual => "!=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| Error::InvalidOperator(s.to_string()))
    }
}
