//! Goal tree command - backward chain from a hypothesis and print the tree

use anyhow::{Context, Result};
use backchain::config::Config;
use backchain::goal_tree::{BuildStats, GoalTreeBuilder};
use backchain::render::render_with_indent;
use backchain::ruleset;
use serde::Serialize;
use std::collections::BTreeSet;

/// JSON output for `backchain tree --json`
#[derive(Debug, Serialize)]
pub struct TreeOutput {
    pub goal: String,
    pub rule_set: String,
    pub tree: serde_json::Value,
    pub distinct_leaves: usize,
    pub stats: BuildStats,
}

/// Execute goal tree command
///
/// # Arguments
/// * `goal` - Hypothesis to backward chain from
/// * `rules` - Rule set override (built-in name or file path)
/// * `indent` - Indent width override for text output
/// * `json` - Emit JSON instead of indented text
pub fn execute(goal: &str, rules: Option<&str>, indent: Option<usize>, json: bool) -> Result<()> {
    if goal.trim().is_empty() {
        anyhow::bail!("Goal must not be empty");
    }

    let config = Config::load().context("Failed to load configuration")?;
    let source = config.rules_source(rules);
    let rule_set = ruleset::resolve(&source)
        .with_context(|| format!("Failed to resolve rule set '{}'", source))?;

    let (tree, stats) = GoalTreeBuilder::new(&rule_set.rules).build_with_stats(goal);
    let distinct_leaves = tree.leaves().into_iter().collect::<BTreeSet<_>>().len();

    if json {
        let output = TreeOutput {
            goal: goal.to_string(),
            rule_set: rule_set.name.clone(),
            tree: ruleset::expr_to_value(&tree)?,
            distinct_leaves,
            stats,
        };
        let json = serde_json::to_string_pretty(&output)
            .context("Failed to serialize goal tree to JSON")?;
        println!("{}", json);
        return Ok(());
    }

    let indent = indent.unwrap_or(config.render.indent);
    println!("GOAL: {}", goal);
    println!("RULES: {} ({} rules)", rule_set.name, rule_set.rules.len());
    println!("\nGOAL TREE:");
    println!("{}", render_with_indent(&tree, 0, indent));
    println!(
        "\n{} distinct leaves, {} goals expanded, {} memo hits, {} cycles cut",
        distinct_leaves, stats.goals_expanded, stats.memo_hits, stats.cycles_cut
    );

    Ok(())
}
