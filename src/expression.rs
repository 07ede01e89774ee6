//! Range expression parsing and containment evaluation

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::condition::{caret_upper, tilde_upper, Condition, Operator};
use crate::version::{InvalidVersion, Version, VersionBuilder};

/// Error type for range expression parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("Could not parse version expression \"{expression}\": {reason}")]
    InvalidExpression { expression: String, reason: String },
    #[error(transparent)]
    Version(#[from] InvalidVersion),
}

/// An npm-style version range: an OR of AND-groups of conditions.
///
/// `contains` evaluates groups left to right and short-circuits on the
/// first group whose every condition admits the candidate. The empty
/// expression contains nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeExpression {
    groups: Vec<Vec<Condition>>,
}

/// The operator context a partial version is being collected under
enum Pending {
    Partial,
    Primitive(Operator),
    Tilde,
    Caret,
    Hyphen(Version),
}

/// A condition in the middle of being parsed: its operator plus the
/// partial version characters seen so far.
struct Collector {
    pending: Pending,
    builder: Option<VersionBuilder>,
    // a bare < or > may still take a trailing =
    extendable: bool,
}

impl Collector {
    fn new(pending: Pending) -> Self {
        let extendable = matches!(
            pending,
            Pending::Primitive(Operator::LessThan) | Pending::Primitive(Operator::GreaterThan)
        );
        Collector {
            pending,
            builder: None,
            extendable,
        }
    }

    fn started(pending: Pending, first: char) -> Result<Self, ExpressionError> {
        let mut collector = Collector::new(pending);
        collector.feed(first)?;
        Ok(collector)
    }

    fn feed(&mut self, ch: char) -> Result<(), ExpressionError> {
        if ch == '=' && self.extendable && self.builder.is_none() {
            if let Pending::Primitive(op) = &mut self.pending {
                if let Some(extended) = op.or_equal() {
                    *op = extended;
                    self.extendable = false;
                    return Ok(());
                }
            }
        }
        self.extendable = false;

        let builder = self
            .builder
            .get_or_insert_with(|| VersionBuilder::new(true));
        builder.accept(ch)?;
        Ok(())
    }

    fn has_version(&self) -> bool {
        self.builder.is_some()
    }

    fn finish(self, expression: &str) -> Result<Condition, ExpressionError> {
        let builder = self.builder.ok_or_else(|| ExpressionError::InvalidExpression {
            expression: expression.to_string(),
            reason: "missing version after operator".to_string(),
        })?;
        let version = builder.finish()?;

        Ok(match self.pending {
            Pending::Partial => Condition::Partial { version },
            Pending::Primitive(op) => Condition::Primitive { op, version },
            Pending::Tilde => {
                let upper = tilde_upper(&version);
                Condition::Tilde { version, upper }
            }
            Pending::Caret => {
                let upper = caret_upper(&version);
                Condition::Caret { version, upper }
            }
            Pending::Hyphen(lower) => Condition::Hyphen {
                lower,
                upper: version,
            },
        })
    }
}

impl RangeExpression {
    /// Parse a range expression such as `^1.2.3 || >=2.0.0-beta <3.0.0`.
    pub fn parse(expression: &str) -> Result<RangeExpression, ExpressionError> {
        let invalid = |reason: &str| ExpressionError::InvalidExpression {
            expression: expression.to_string(),
            reason: reason.to_string(),
        };

        let mut groups: Vec<Vec<Condition>> = vec![Vec::new()];
        let mut collector: Option<Collector> = None;
        // saw a single '|'; the next character must complete the union
        let mut union_started = false;

        for ch in expression.chars() {
            if union_started {
                if ch != '|' {
                    return Err(invalid("expected '|'"));
                }
                if let Some(c) = collector.take() {
                    groups.last_mut().unwrap().push(c.finish(expression)?);
                }
                groups.push(Vec::new());
                union_started = false;
                continue;
            }
            if ch == '|' {
                union_started = true;
                continue;
            }

            match &mut collector {
                Some(c) => {
                    if ch.is_whitespace() {
                        if c.has_version() {
                            let cond = collector.take().unwrap().finish(expression)?;
                            groups.last_mut().unwrap().push(cond);
                        } else {
                            // optional space between an operator and its partial
                            c.extendable = false;
                        }
                    } else {
                        c.feed(ch)?;
                    }
                }
                None => {
                    if ch.is_whitespace() {
                        continue;
                    }
                    let group = groups.last_mut().unwrap();
                    if matches!(group.as_slice(), [Condition::Hyphen { .. }]) {
                        return Err(invalid("nothing may follow a hyphen range in its group"));
                    }
                    collector = Some(match ch {
                        '<' => Collector::new(Pending::Primitive(Operator::LessThan)),
                        '>' => Collector::new(Pending::Primitive(Operator::GreaterThan)),
                        '=' => Collector::new(Pending::Primitive(Operator::Equal)),
                        '~' => Collector::new(Pending::Tilde),
                        '^' => Collector::new(Pending::Caret),
                        '-' => {
                            let lower = match group.pop() {
                                Some(Condition::Partial { version }) if group.is_empty() => {
                                    version
                                }
                                _ => {
                                    return Err(invalid(
                                        "a hyphen must follow a single bare version",
                                    ))
                                }
                            };
                            Collector::new(Pending::Hyphen(lower))
                        }
                        first => Collector::started(Pending::Partial, first)?,
                    });
                }
            }
        }

        if union_started {
            return Err(invalid("trailing '|'"));
        }
        if let Some(c) = collector.take() {
            groups.last_mut().unwrap().push(c.finish(expression)?);
        }

        if groups.len() == 1 && groups[0].is_empty() {
            // a blank expression is legal but contains nothing
            return Ok(RangeExpression { groups: Vec::new() });
        }
        if groups.iter().any(|g| g.is_empty()) {
            return Err(invalid("empty alternative"));
        }

        Ok(RangeExpression { groups })
    }

    /// Decide whether `candidate` satisfies this expression: OR over
    /// groups, AND within each group, short-circuiting on the first hit.
    pub fn contains(&self, candidate: &Version) -> bool {
        self.groups
            .iter()
            .any(|group| group.iter().all(|condition| condition.contains(candidate)))
    }

    /// The parsed OR-groups, outermost first.
    pub fn groups(&self) -> &[Vec<Condition>] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl fmt::Display for RangeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                f.write_str(" || ")?;
            }
            for (j, condition) in group.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", condition)?;
            }
        }
        Ok(())
    }
}

impl FromStr for RangeExpression {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RangeExpression::parse(s)
    }
}
