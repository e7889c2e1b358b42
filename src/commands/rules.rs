//! Rules command - list a rule set in declaration order

use anyhow::{Context, Result};
use backchain::config::Config;
use backchain::ruleset;

pub fn execute(rules: Option<&str>, json: bool) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let source = config.rules_source(rules);
    let rule_set = ruleset::resolve(&source)
        .with_context(|| format!("Failed to resolve rule set '{}'", source))?;

    if json {
        println!("{}", ruleset::to_json(&rule_set)?);
        return Ok(());
    }

    println!("\n  {} ({} rules)\n", rule_set.name, rule_set.rules.len());
    let width = rule_set.rules.len().to_string().len();
    for (index, rule) in rule_set.rules.iter().enumerate() {
        println!("  {:>width$}. {}", index + 1, rule, width = width);
    }
    println!();

    Ok(())
}
