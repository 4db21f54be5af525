//! # Criteria
//!
//! A criterion is a named boolean predicate over a [`Node`]. There are three
//! shapes, all carried by one [`Criterion`] struct:
//!
//! - `IsDocument`: the built-in, always registered, never removable.
//! - Simple: one attribute test, see [`Condition`].
//! - Binary: two criteria joined by `&&` or `||`.
//!
//! Negation is not a separate shape. [`Criterion::negate`] clones the target,
//! flips its `negated` flag and gives the clone a new name, so a negated
//! criterion prints as `!(…)` around the original body and evaluates as the
//! original XOR `true`.
//!
//! Binary criteria capture their operands by value when they are built.
//! Registered criteria are never mutated afterwards, so the captured copies
//! and the registry entries always agree.

use crate::disk::Disk;
use crate::error::{CvfsError, Result};
use crate::model::{Node, NodeId};
use std::fmt;
use std::str::FromStr;

pub mod registry;
pub mod spec;

pub use registry::{CriteriaRegistry, Defined};
pub use spec::{Comparison, Condition};

/// Name of the built-in criterion.
pub const IS_DOCUMENT: &str = "IsDocument";

/// Exactly two ASCII letters, or the reserved `IsDocument`.
pub fn is_valid_criterion_name(name: &str) -> bool {
    name == IS_DOCUMENT || (name.len() == 2 && name.chars().all(|c| c.is_ascii_alphabetic()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}

impl LogicOp {
    pub fn apply(&self, left: bool, right: bool) -> bool {
        match self {
            LogicOp::And => left && right,
            LogicOp::Or => left || right,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            LogicOp::And => "&&",
            LogicOp::Or => "||",
        }
    }
}

impl FromStr for LogicOp {
    type Err = CvfsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "&&" => Ok(LogicOp::And),
            "||" => Ok(LogicOp::Or),
            other => Err(CvfsError::InvalidOperator(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriterionKind {
    IsDocument,
    Simple(Condition),
    Binary {
        left: Box<Criterion>,
        op: LogicOp,
        right: Box<Criterion>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    name: String,
    negated: bool,
    kind: CriterionKind,
}

impl Criterion {
    pub fn is_document() -> Self {
        Self {
            name: IS_DOCUMENT.to_string(),
            negated: false,
            kind: CriterionKind::IsDocument,
        }
    }

    pub fn simple(name: impl Into<String>, condition: Condition) -> Self {
        Self {
            name: name.into(),
            negated: false,
            kind: CriterionKind::Simple(condition),
        }
    }

    pub fn binary(name: impl Into<String>, left: Criterion, op: LogicOp, right: Criterion) -> Self {
        Self {
            name: name.into(),
            negated: false,
            kind: CriterionKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn kind(&self) -> &CriterionKind {
        &self.kind
    }

    /// A renamed copy with the opposite result. `self` is left as is.
    pub fn negate(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            negated: !self.negated,
            kind: self.kind.clone(),
        }
    }

    /// Evaluate against a node of `disk`; an id that does not resolve is a
    /// `NullSubject`.
    pub fn check(&self, disk: &Disk, id: NodeId) -> Result<bool> {
        let node = disk.node(id).ok_or(CvfsError::NullSubject)?;
        Ok(self.matches(node))
    }

    pub fn matches(&self, node: &Node) -> bool {
        let result = match &self.kind {
            CriterionKind::IsDocument => node.is_document(),
            CriterionKind::Simple(condition) => condition.matches(node),
            CriterionKind::Binary { left, op, right } => {
                // both sides always run against the same node
                let l = left.matches(node);
                let r = right.matches(node);
                op.apply(l, r)
            }
        };
        result ^ self.negated
    }

    /// The body without the name, e.g. `!(size > 10)`.
    fn body(&self) -> String {
        match &self.kind {
            CriterionKind::IsDocument => {
                if self.negated {
                    "!(IsDocument)".to_string()
                } else {
                    "IsDocument".to_string()
                }
            }
            CriterionKind::Simple(condition) => {
                if self.negated {
                    format!("!({})", condition)
                } else {
                    condition.to_string()
                }
            }
            CriterionKind::Binary { left, op, right } => {
                let base = format!("({} {} {})", left.body(), op.symbol(), right.body());
                if self.negated {
                    format!("!{}", base)
                } else {
                    base
                }
            }
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            CriterionKind::IsDocument => {
                write!(f, "Criterion {{ {} }}", self.body())
            }
            CriterionKind::Binary { .. } => {
                write!(f, "BinaryCriteria '{}', {{ {} }}", self.name, self.body())
            }
            _ => write!(f, "Criterion '{}', {{ {} }}", self.name, self.body()),
        }
    }
}
