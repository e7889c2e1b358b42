//! Rule sets - named, ordered collections of rules
//!
//! Rule sets come from TOML or JSON files, or from the sets compiled into the
//! binary (currently the classic zookeeper rules).
//!
//! ```toml
//! name = "birds"
//!
//! [[rules]]
//! if = "(?x) has feathers"
//! then = "(?x) is a bird"
//!
//! [[rules]]
//! if = { and = ["(?x) is a bird", "(?x) swims", { not = "(?x) flies" }] }
//! then = "(?x) is a penguin"
//! ```
//!
//! # Example
//!
//! ```
//! use backchain::ruleset;
//!
//! let zoo = ruleset::builtin("zookeeper")?;
//! assert_eq!(zoo.rules.len(), 16);
//! # Ok::<(), anyhow::Error>(())
//! ```

mod internal;

use anyhow::{bail, Result};
use std::path::Path;

use crate::production::{Expr, Rule};

/// Names accepted by [`builtin`].
pub const BUILTIN_NAMES: &[&str] = &["zookeeper"];

const ZOOKEEPER: &str = include_str!("../../rules/zookeeper.toml");

/// An ordered rule collection. Order is significant: it fixes the order of
/// branches in every goal tree built from the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    pub name: String,
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }
}

/// Parse a rule set from TOML text. `fallback_name` is used when the text
/// has no `name` key.
pub fn parse_toml(content: &str, fallback_name: &str) -> Result<RuleSet> {
    internal::parse_toml(content, fallback_name)
}

/// Parse a rule set from JSON text.
pub fn parse_json(content: &str, fallback_name: &str) -> Result<RuleSet> {
    internal::parse_json(content, fallback_name)
}

/// Load a `.toml` or `.json` rule file.
pub fn load(path: &Path) -> Result<RuleSet> {
    internal::load(path)
}

/// One of the rule sets compiled into the crate.
pub fn builtin(name: &str) -> Result<RuleSet> {
    match name {
        "zookeeper" => parse_toml(ZOOKEEPER, "zookeeper"),
        _ => bail!(
            "Unknown built-in rule set '{}'. Available: {}",
            name,
            BUILTIN_NAMES.join(", ")
        ),
    }
}

/// Resolve a `--rules` style source: a built-in name, or a path to a file.
pub fn resolve(source: &str) -> Result<RuleSet> {
    if BUILTIN_NAMES.contains(&source) {
        return builtin(source);
    }
    let path = Path::new(source);
    if !path.exists() {
        bail!(
            "Rule set '{}' is neither a built-in ({}) nor an existing file",
            source,
            BUILTIN_NAMES.join(", ")
        );
    }
    load(path)
}

/// Serialize a rule set as JSON in the rule-file schema.
pub fn to_json(rule_set: &RuleSet) -> Result<String> {
    internal::to_json(rule_set)
}

/// Convert an expression (such as a goal tree) to JSON: leaves are strings,
/// combinators are `{"and": [...]}`, `{"or": [...]}`, `{"not": ...}`.
pub fn expr_to_value(expr: &Expr) -> Result<serde_json::Value> {
    internal::expr_to_value(expr)
}
