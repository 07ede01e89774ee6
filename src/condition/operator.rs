//! Comparator operators for primitive conditions

use std::fmt;

/// Comparison operators accepted by the range grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal (=)
    Equal,
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
}

impl Operator {
    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
        }
    }

    /// Apply the operator to an ordering result
    pub(crate) fn matches(&self, ordering: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering::*;
        match self {
            Operator::Equal => ordering == Equal,
            Operator::LessThan => ordering == Less,
            Operator::LessThanOrEqual => ordering != Greater,
            Operator::GreaterThan => ordering == Greater,
            Operator::GreaterThanOrEqual => ordering != Less,
        }
    }

    /// Extend a bare `<` or `>` with a trailing `=`
    pub(crate) fn or_equal(&self) -> Option<Operator> {
        match self {
            Operator::LessThan => Some(Operator::LessThanOrEqual),
            Operator::GreaterThan => Some(Operator::GreaterThanOrEqual),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
