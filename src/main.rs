use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Backward-chaining goal trees over IF/THEN rules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the goal tree for a hypothesis
    Tree {
        /// Hypothesis to prove (e.g. "opus is a penguin")
        goal: String,

        /// Rule set: built-in name or path to a .toml/.json rule file
        #[arg(short, long)]
        rules: Option<String>,

        /// Spaces per nesting level (default from backchain.toml, else 2)
        #[arg(long)]
        indent: Option<usize>,

        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Unify a pattern such as "(?x) has hair" against an assertion
    Match {
        /// Pattern with (?name) variables
        pattern: String,

        /// Concrete assertion
        datum: String,

        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// List the rules of a rule set
    Rules {
        /// Rule set: built-in name or path to a .toml/.json rule file
        #[arg(short, long)]
        rules: Option<String>,

        /// Output the rule set as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tree {
            goal,
            rules,
            indent,
            json,
        } => {
            commands::tree::execute(&goal, rules.as_deref(), indent, json)?;
        }
        Commands::Match {
            pattern,
            datum,
            json,
        } => {
            commands::unify::execute(&pattern, &datum, json)?;
        }
        Commands::Rules { rules, json } => {
            commands::rules::execute(rules.as_deref(), json)?;
        }
    }

    Ok(())
}
