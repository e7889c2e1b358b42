//! Match command - unify a pattern against a concrete assertion

use anyhow::{Context, Result};
use backchain::production::{unify, variables, Bindings};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MatchOutput {
    pub pattern: String,
    pub datum: String,
    pub matched: bool,
    pub variables: Vec<String>,
    pub bindings: Option<Bindings>,
}

/// Execute match command. A failed match is reported, not an error.
pub fn execute(pattern: &str, datum: &str, json: bool) -> Result<()> {
    let bindings = unify(pattern, datum);
    let output = MatchOutput {
        pattern: pattern.to_string(),
        datum: datum.to_string(),
        matched: bindings.is_some(),
        variables: variables(pattern).into_iter().collect(),
        bindings,
    };

    if json {
        let json = serde_json::to_string_pretty(&output)
            .context("Failed to serialize match result to JSON")?;
        println!("{}", json);
        return Ok(());
    }

    match &output.bindings {
        None => println!("NO MATCH"),
        Some(bindings) if bindings.is_empty() => println!("MATCH (no variables)"),
        Some(bindings) => {
            println!("MATCH");
            for (name, value) in bindings {
                println!("  (?{}) = {}", name, value);
            }
        }
    }

    Ok(())
}
