//! Internal implementation for ruleset module
//!
//! Serde shapes for rule files. The core `Expr`/`Rule` types stay free of
//! serialization concerns; these definitions convert to and from them.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::production::{Consequent, Expr, Rule};

use super::RuleSet;

/// Debug logging for rule loading
fn log_debug(msg: &str) {
    if std::env::var("BACKCHAIN_LOG").is_ok() {
        eprintln!("[DEBUG ruleset] {}", msg);
    }
}

// =============================================================================
// File Schema
// =============================================================================

/// An expression as written in a rule file: a bare string is a leaf,
/// otherwise a single-key table names the combinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum ExprDef {
    Leaf(String),
    And { and: Vec<ExprDef> },
    Or { or: Vec<ExprDef> },
    Not { not: Box<ExprDef> },
}

/// `then` accepts one expression or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum ConsequentDef {
    List(Vec<ExprDef>),
    Single(ExprDef),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RuleDef {
    #[serde(rename = "if")]
    pub antecedent: ExprDef,
    #[serde(rename = "then")]
    pub consequent: ConsequentDef,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct RuleFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub rules: Vec<RuleDef>,
}

// =============================================================================
// Conversions
// =============================================================================

impl ExprDef {
    fn into_expr(self) -> Result<Expr> {
        Ok(match self {
            ExprDef::Leaf(text) => {
                if text.trim().is_empty() {
                    bail!("empty assertion");
                }
                Expr::Leaf(text)
            }
            ExprDef::And { and } => Expr::And(convert_all(and)?),
            ExprDef::Or { or } => Expr::Or(convert_all(or)?),
            ExprDef::Not { not } => Expr::Not(Box::new(not.into_expr()?)),
        })
    }
}

fn convert_all(defs: Vec<ExprDef>) -> Result<Vec<Expr>> {
    defs.into_iter().map(ExprDef::into_expr).collect()
}

impl From<&Expr> for ExprDef {
    fn from(expr: &Expr) -> Self {
        match expr {
            Expr::Leaf(text) => ExprDef::Leaf(text.clone()),
            Expr::And(children) => ExprDef::And {
                and: children.iter().map(ExprDef::from).collect(),
            },
            Expr::Or(children) => ExprDef::Or {
                or: children.iter().map(ExprDef::from).collect(),
            },
            Expr::Not(child) => ExprDef::Not {
                not: Box::new(ExprDef::from(child.as_ref())),
            },
        }
    }
}

impl From<&Rule> for RuleDef {
    fn from(rule: &Rule) -> Self {
        let consequent = match rule.consequent() {
            Consequent::Single(expr) => ConsequentDef::Single(expr.into()),
            Consequent::List(items) => {
                ConsequentDef::List(items.iter().map(ExprDef::from).collect())
            }
        };
        Self {
            antecedent: rule.antecedent().into(),
            consequent,
        }
    }
}

impl RuleDef {
    fn into_rule(self) -> Result<Rule> {
        let antecedent = self.antecedent.into_expr().context("invalid `if`")?;
        let consequent = match self.consequent {
            ConsequentDef::Single(def) => {
                Consequent::Single(def.into_expr().context("invalid `then`")?)
            }
            ConsequentDef::List(defs) => {
                Consequent::List(convert_all(defs).context("invalid `then`")?)
            }
        };
        Ok(Rule::new(antecedent, consequent))
    }
}

fn into_rule_set(file: RuleFile, fallback_name: &str) -> Result<RuleSet> {
    let name = file.name.unwrap_or_else(|| fallback_name.to_string());
    let mut rules = Vec::with_capacity(file.rules.len());
    for (index, def) in file.rules.into_iter().enumerate() {
        let rule = def
            .into_rule()
            .with_context(|| format!("Rule #{} in '{}'", index + 1, name))?;
        rules.push(rule);
    }
    log_debug(&format!("loaded {} rules from '{}'", rules.len(), name));
    Ok(RuleSet { name, rules })
}

// =============================================================================
// Parsing and Loading
// =============================================================================

pub(crate) fn parse_toml(content: &str, fallback_name: &str) -> Result<RuleSet> {
    let file: RuleFile = toml::from_str(content).context("Failed to parse TOML rule file")?;
    into_rule_set(file, fallback_name)
}

pub(crate) fn parse_json(content: &str, fallback_name: &str) -> Result<RuleSet> {
    let file: RuleFile = serde_json::from_str(content).context("Failed to parse JSON rule file")?;
    into_rule_set(file, fallback_name)
}

pub(crate) fn load(path: &Path) -> Result<RuleSet> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule file {}", path.display()))?;
    let fallback_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("rules")
        .to_string();

    let result = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => parse_toml(&content, &fallback_name),
        Some("json") => parse_json(&content, &fallback_name),
        other => bail!(
            "Unsupported rule file extension {:?} for {} (expected .toml or .json)",
            other.unwrap_or(""),
            path.display()
        ),
    };
    result.with_context(|| format!("Failed to load rule set from {}", path.display()))
}

pub(crate) fn to_json(rule_set: &RuleSet) -> Result<String> {
    let file = RuleFile {
        name: Some(rule_set.name.clone()),
        rules: rule_set.rules.iter().map(RuleDef::from).collect(),
    };
    serde_json::to_string_pretty(&file).context("Failed to serialize rule set to JSON")
}

pub(crate) fn expr_to_value(expr: &Expr) -> Result<serde_json::Value> {
    serde_json::to_value(ExprDef::from(expr)).context("Failed to serialize expression to JSON")
}
