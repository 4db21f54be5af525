use super::{is_valid_criterion_name, Condition, Criterion, LogicOp, IS_DOCUMENT};
use crate::error::{CvfsError, Result};
use std::collections::BTreeMap;

/// A freshly registered criterion and any advisory that came with it.
#[derive(Debug, Clone)]
pub struct Defined {
    pub criterion: Criterion,
    pub warning: Option<String>,
}

/// Name-keyed set of criteria. `IsDocument` is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriteriaRegistry {
    entries: BTreeMap<String, Criterion>,
}

impl Default for CriteriaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CriteriaRegistry {
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(IS_DOCUMENT.to_string(), Criterion::is_document());
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Result<&Criterion> {
        self.entries
            .get(name)
            .ok_or_else(|| CvfsError::NotFound(format!("criterion {}", name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All criteria in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn define_simple(&mut self, name: &str, attr: &str, op: &str, value: &str) -> Result<Defined> {
        self.check_free(name)?;
        let (condition, warning) = Condition::parse(attr, op, value)?;
        let criterion = Criterion::simple(name, condition);
        self.insert(criterion.clone())?;
        Ok(Defined { criterion, warning })
    }

    pub fn define_negation(&mut self, name: &str, target: &str) -> Result<Defined> {
        self.check_free(name)?;
        let criterion = self.get(target)?.negate(name);
        self.insert(criterion.clone())?;
        Ok(Defined {
            criterion,
            warning: None,
        })
    }

    pub fn define_binary(&mut self, name: &str, left: &str, op: &str, right: &str) -> Result<Defined> {
        self.check_free(name)?;
        let left = self.get(left)?.clone();
        let right = self.get(right)?.clone();
        let op = op.parse::<LogicOp>()?;
        let criterion = Criterion::binary(name, left, op, right);
        self.insert(criterion.clone())?;
        Ok(Defined {
            criterion,
            warning: None,
        })
    }

    fn check_free(&self, name: &str) -> Result<()> {
        if !is_valid_criterion_name(name) || name == IS_DOCUMENT {
            return Err(CvfsError::InvalidName(name.to_string()));
        }
        if self.contains(name) {
            return Err(CvfsError::AlreadyExists(format!("criterion {}", name)));
        }
        Ok(())
    }

    /// Register a criterion built elsewhere, e.g. replayed from history.
    pub(crate) fn insert(&mut self, criterion: Criterion) -> Result<()> {
        if self.contains(criterion.name()) {
            return Err(CvfsError::AlreadyExists(format!(
                "criterion {}",
                criterion.name()
            )));
        }
        self.entries.insert(criterion.name().to_string(), criterion);
        Ok(())
    }

    pub(crate) fn remove(&mut self, name: &str) -> Result<Criterion> {
        if name == IS_DOCUMENT {
            return Err(CvfsError::InvalidName(name.to_string()));
        }
        self.entries
            .remove(name)
            .ok_or_else(|| CvfsError::NotFound(format!("criterion {}", name)))
    }
}
