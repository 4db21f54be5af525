//! Simple criterion conditions and their textual form.
//!
//! A simple criterion is declared as an `attr op value` triple:
//!
//! | attr   | op                               | value                 |
//! |--------|----------------------------------|-----------------------|
//! | `name` | `contains`                       | `"text"` (no spaces)  |
//! | `type` | `equals`                         | `"ext"`               |
//! | `size` | `>` `>=` `<` `<=` `==` `!=`      | integer               |
//!
//! `type` accepts any quoted value. Values outside the known document types
//! are kept and reported back as a warning.

use crate::error::{CvfsError, Result};
use crate::model::{DocumentType, Node};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
    Ne,
}

impl Comparison {
    pub fn compare(&self, lhs: i64, rhs: i64) -> bool {
        match self {
            Comparison::Gt => lhs > rhs,
            Comparison::Ge => lhs >= rhs,
            Comparison::Lt => lhs < rhs,
            Comparison::Le => lhs <= rhs,
            Comparison::Eq => lhs == rhs,
            Comparison::Ne => lhs != rhs,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Eq => "==",
            Comparison::Ne => "!=",
        }
    }
}

impl FromStr for Comparison {
    type Err = CvfsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            ">" => Ok(Comparison::Gt),
            ">=" => Ok(Comparison::Ge),
            "<" => Ok(Comparison::Lt),
            "<=" => Ok(Comparison::Le),
            "==" => Ok(Comparison::Eq),
            "!=" => Ok(Comparison::Ne),
            other => Err(CvfsError::InvalidCriterionSpec(format!(
                "size operator {}",
                other
            ))),
        }
    }
}

/// One attribute test. Values are stored unquoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    NameContains(String),
    TypeEquals(String),
    Size(Comparison, i64),
}

impl Condition {
    /// Parse an `attr op value` triple.
    ///
    /// Returns the condition and, for `type` tests on an unknown extension,
    /// a warning to pass on to the user.
    pub fn parse(attr: &str, op: &str, value: &str) -> Result<(Condition, Option<String>)> {
        let invalid = || CvfsError::InvalidCriterionSpec(format!("{} {} {}", attr, op, value));

        match attr {
            "name" => {
                if op != "contains" {
                    return Err(invalid());
                }
                let text = unquote(value).ok_or_else(invalid)?;
                Ok((Condition::NameContains(text.to_string()), None))
            }
            "type" => {
                if op != "equals" {
                    return Err(invalid());
                }
                let text = unquote(value).ok_or_else(invalid)?;
                let warning = (!DocumentType::is_known(text))
                    .then(|| format!("Unsupported file type {}", value));
                Ok((Condition::TypeEquals(text.to_string()), warning))
            }
            "size" => {
                let comparison = op.parse::<Comparison>().map_err(|_| invalid())?;
                let bound = value.parse::<i64>().map_err(|_| invalid())?;
                Ok((Condition::Size(comparison, bound), None))
            }
            _ => Err(invalid()),
        }
    }

    pub fn matches(&self, node: &Node) -> bool {
        match self {
            Condition::NameContains(text) => node.name().contains(text.as_str()),
            Condition::TypeEquals(ext) => node
                .doc_type()
                .map(|t| t.extension() == ext)
                .unwrap_or(false),
            Condition::Size(comparison, bound) => comparison.compare(node.size(), *bound),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::NameContains(text) => write!(f, "name contains \"{}\"", text),
            Condition::TypeEquals(ext) => write!(f, "type equals \"{}\"", ext),
            Condition::Size(comparison, bound) => write!(f, "size {} {}", comparison.symbol(), bound),
        }
    }
}

/// `"text"` → `text`; rejects missing quotes, empty text and whitespace.
fn unquote(value: &str) -> Option<&str> {
    let inner = value.strip_prefix('"')?.strip_suffix('"')?;
    if inner.is_empty() || inner.chars().any(char::is_whitespace) {
        return None;
    }
    Some(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str, doc_type: DocumentType, content: &str) -> Node {
        Node::document(name.into(), None, doc_type, content.into())
    }

    #[test]
    fn parses_name_condition() {
        let (cond, warning) = Condition::parse("name", "contains", "\"Doc\"").unwrap();
        assert_eq!(cond, Condition::NameContains("Doc".into()));
        assert!(warning.is_none());
    }

    #[test]
    fn rejects_bad_name_conditions() {
        for (op, value) in [
            ("equals", "\"Doc\""),
            ("contains", "Doc"),
            ("contains", "\"\""),
            ("contains", "\"Doc"),
        ] {
            assert!(
                matches!(
                    Condition::parse("name", op, value),
                    Err(CvfsError::InvalidCriterionSpec(_))
                ),
                "{} {} should be rejected",
                op,
                value
            );
        }
    }

    #[test]
    fn unknown_type_warns_but_is_accepted() {
        let (cond, warning) = Condition::parse("type", "equals", "\"rs\"").unwrap();
        assert_eq!(cond, Condition::TypeEquals("rs".into()));
        assert!(warning.unwrap().contains("rs"));

        let (_, warning) = Condition::parse("type", "equals", "\"txt\"").unwrap();
        assert!(warning.is_none());

        assert!(Condition::parse("type", "contains", "\"txt\"").is_err());
    }

    #[test]
    fn parses_all_size_operators() {
        for symbol in [">", ">=", "<", "<=", "==", "!="] {
            let (cond, _) = Condition::parse("size", symbol, "-3").unwrap();
            let Condition::Size(comparison, bound) = cond else {
                panic!("expected size condition");
            };
            assert_eq!(comparison.symbol(), symbol);
            assert_eq!(bound, -3);
        }
        assert!(Condition::parse("size", "=", "3").is_err());
        assert!(Condition::parse("size", ">", "three").is_err());
        assert!(Condition::parse("colour", "==", "3").is_err());
    }

    #[test]
    fn matches_by_attribute() {
        let txt = doc("Doc1", DocumentType::Txt, "ab");
        let dir = Node::directory("Docs".into(), None);

        assert!(Condition::NameContains("oc".into()).matches(&txt));
        assert!(Condition::NameContains("Doc".into()).matches(&dir));
        assert!(!Condition::NameContains("doc".into()).matches(&txt));

        assert!(Condition::TypeEquals("txt".into()).matches(&txt));
        assert!(!Condition::TypeEquals("html".into()).matches(&txt));
        assert!(!Condition::TypeEquals("txt".into()).matches(&dir));

        assert!(Condition::Size(Comparison::Eq, 42).matches(&txt));
        assert!(Condition::Size(Comparison::Ne, 41).matches(&txt));
        assert!(Condition::Size(Comparison::Ge, 40).matches(&dir));
        assert!(!Condition::Size(Comparison::Gt, 40).matches(&dir));
    }
}
