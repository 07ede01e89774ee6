//! Semantic version parsing and npm-style range matching
//!
//! This crate parses SemVer 2.0.0 version strings and npm-style range
//! expressions (`^1.2.3 || >=2.0.0-beta <3.0.0`) and decides whether a
//! candidate version satisfies a range. Parsing is an incremental
//! character-by-character state machine; parsed values are immutable and
//! render back to their exact input text.

mod compare;
pub mod condition;
mod expression;
mod semver;
mod version;

pub use compare::Comparator;
pub use condition::{Condition, Operator};
pub use expression::{ExpressionError, RangeExpression};
pub use semver::Semver;
pub use version::{InvalidVersion, Version, VersionBuilder};
