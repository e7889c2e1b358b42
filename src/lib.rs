pub mod config;
pub mod goal_tree;
pub mod production;
pub mod render;
pub mod ruleset;

// Re-export commonly used types
pub use goal_tree::{backchain_to_goal_tree, GoalTreeBuilder};
pub use production::{Expr, Rule};
pub use ruleset::RuleSet;
