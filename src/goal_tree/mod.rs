//! Backward chaining from a hypothesis to an AND/OR goal tree.
//!
//! Every rule whose consequent unifies with a goal contributes one branch
//! built from its instantiated antecedent. The goal itself is always kept as
//! a branch, so the tree lists what could *support* the hypothesis
//! (including assuming it outright) rather than a strict proof.
//!
//! Cycles through the rule set are cut by returning the repeated goal as a
//! plain leaf at the point it recurs.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::production::{substitute, unify, Expr, Rule};

/// Debug logging for the goal-tree builder
fn log_debug(msg: &str) {
    if std::env::var("BACKCHAIN_LOG").is_ok() {
        eprintln!("[DEBUG goal_tree] {}", msg);
    }
}

/// Build the goal tree for `hypothesis` over `rules`.
///
/// Rules are tried in declaration order and each match becomes one
/// disjunction branch in that order.
pub fn backchain_to_goal_tree(rules: &[Rule], hypothesis: &str) -> Expr {
    GoalTreeBuilder::new(rules).build(hypothesis)
}

/// Counters gathered during one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Distinct goals expanded
    pub goals_expanded: usize,
    /// Goals answered from the memo table
    pub memo_hits: usize,
    /// Goals cut because they were already on the expansion path
    pub cycles_cut: usize,
    /// Rule consequents that unified with some goal
    pub rule_matches: usize,
}

/// State for a single top-level backward-chaining call.
///
/// `build` consumes the builder, so the memo table and visiting set can
/// never leak into a second query.
pub struct GoalTreeBuilder<'r> {
    rules: &'r [Rule],
    memo: HashMap<String, Expr>,
    visiting: HashSet<String>,
    stats: BuildStats,
}

impl<'r> GoalTreeBuilder<'r> {
    pub fn new(rules: &'r [Rule]) -> Self {
        Self {
            rules,
            memo: HashMap::new(),
            visiting: HashSet::new(),
            stats: BuildStats::default(),
        }
    }

    pub fn build(self, hypothesis: &str) -> Expr {
        self.build_with_stats(hypothesis).0
    }

    pub fn build_with_stats(mut self, hypothesis: &str) -> (Expr, BuildStats) {
        let tree = self.expand(hypothesis);
        log_debug(&format!(
            "{:?}: {} goals, {} memo hits, {} cycles cut, {} rule matches",
            hypothesis,
            self.stats.goals_expanded,
            self.stats.memo_hits,
            self.stats.cycles_cut,
            self.stats.rule_matches
        ));
        (tree, self.stats)
    }

    fn expand(&mut self, goal: &str) -> Expr {
        if let Some(tree) = self.memo.get(goal) {
            self.stats.memo_hits += 1;
            return tree.clone();
        }
        if self.visiting.contains(goal) {
            self.stats.cycles_cut += 1;
            log_debug(&format!("cycle at {:?}, keeping it as a leaf", goal));
            return Expr::leaf(goal);
        }

        self.visiting.insert(goal.to_string());
        self.stats.goals_expanded += 1;

        let mut options = vec![Expr::leaf(goal)];
        let rules = self.rules;
        for (index, rule) in rules.iter().enumerate() {
            for consequent in rule.consequent().assertions() {
                let Some(bindings) = unify(consequent, goal) else {
                    continue;
                };
                self.stats.rule_matches += 1;
                log_debug(&format!("rule #{} concludes {:?}", index + 1, goal));

                let antecedent = substitute(rule.antecedent(), &bindings);
                options.push(self.expand_antecedent(antecedent));
            }
        }

        let tree = Expr::Or(options).normalize();
        self.memo.insert(goal.to_string(), tree.clone());
        self.visiting.remove(goal);
        tree
    }

    /// Expand leaves one level into an instantiated antecedent.
    ///
    /// Negations are constraints to check, not goals, and pass through as-is
    /// whether they are the whole antecedent or a child of a group.
    fn expand_antecedent(&mut self, antecedent: Expr) -> Expr {
        match antecedent {
            Expr::Leaf(text) => self.expand(&text),
            Expr::And(children) => Expr::And(self.expand_children(children)),
            Expr::Or(children) => Expr::Or(self.expand_children(children)),
            not @ Expr::Not(_) => not,
        }
    }

    fn expand_children(&mut self, children: Vec<Expr>) -> Vec<Expr> {
        children
            .into_iter()
            .map(|child| match child {
                Expr::Leaf(text) => self.expand(&text),
                other => other,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_without_rules_is_leaf() {
        let tree = backchain_to_goal_tree(&[], "opus swims");
        assert_eq!(tree, Expr::leaf("opus swims"));
    }

    #[test]
    fn test_single_rule_chain() {
        let rules = vec![Rule::new("(?x) has feathers", "(?x) is a bird")];
        let tree = backchain_to_goal_tree(&rules, "opus is a bird");
        assert_eq!(tree, Expr::or(["opus is a bird", "opus has feathers"]));
    }

    #[test]
    fn test_non_matching_rule_contributes_nothing() {
        let rules = vec![Rule::new("(?x) has hair", "(?x) is a mammal")];
        let tree = backchain_to_goal_tree(&rules, "opus is a bird");
        assert_eq!(tree, Expr::leaf("opus is a bird"));
    }

    #[test]
    fn test_two_rule_cycle_terminates() {
        let rules = vec![Rule::new("A", "B"), Rule::new("B", "A")];
        let (tree, stats) = GoalTreeBuilder::new(&rules).build_with_stats("A");
        // B expands to OR(B, A) with A cut at the cycle; splicing that into
        // A's own disjunction drops the repeated A.
        assert_eq!(tree, Expr::or(["A", "B"]));
        assert_eq!(stats.cycles_cut, 1);
        assert!(tree.leaves().contains(&"A"));
    }

    #[test]
    fn test_self_cycle_terminates() {
        let rules = vec![Rule::new("(?x) is odd", "(?x) is odd")];
        let tree = backchain_to_goal_tree(&rules, "3 is odd");
        assert_eq!(tree, Expr::leaf("3 is odd"));
    }

    #[test]
    fn test_negated_antecedent_passes_through() {
        let rules = vec![
            Rule::new(Expr::not("(?x) flies"), "(?x) is grounded"),
            Rule::new("(?x) has wings", "(?x) flies"),
        ];
        let tree = backchain_to_goal_tree(&rules, "opus is grounded");
        assert_eq!(
            tree,
            Expr::Or(vec![Expr::leaf("opus is grounded"), Expr::not("opus flies")])
        );
    }

    #[test]
    fn test_negated_child_in_group_is_not_expanded() {
        let rules = vec![
            Rule::new(
                Expr::And(vec![Expr::leaf("(?x) is a bird"), Expr::not("(?x) flies")]),
                "(?x) is flightless",
            ),
            Rule::new("(?x) has wings", "(?x) flies"),
        ];
        let tree = backchain_to_goal_tree(&rules, "opus is flightless");
        assert_eq!(
            tree,
            Expr::Or(vec![
                Expr::leaf("opus is flightless"),
                Expr::And(vec![Expr::leaf("opus is a bird"), Expr::not("opus flies")]),
            ])
        );
    }

    #[test]
    fn test_disjunctive_antecedent_merges_into_parent() {
        let rules = vec![Rule::new(
            Expr::or(["(?x) has hair", "(?x) gives milk"]),
            "(?x) is a mammal",
        )];
        let tree = backchain_to_goal_tree(&rules, "rex is a mammal");
        assert_eq!(
            tree,
            Expr::or(["rex is a mammal", "rex has hair", "rex gives milk"])
        );
    }

    #[test]
    fn test_list_consequent_each_item_tried() {
        let rules = vec![Rule::new(
            "(?x) is a penguin",
            vec![Expr::leaf("(?x) is a bird"), Expr::leaf("(?x) swims")],
        )];
        assert_eq!(
            backchain_to_goal_tree(&rules, "opus swims"),
            Expr::or(["opus swims", "opus is a penguin"])
        );
        assert_eq!(
            backchain_to_goal_tree(&rules, "opus is a bird"),
            Expr::or(["opus is a bird", "opus is a penguin"])
        );
    }

    #[test]
    fn test_conjunctive_consequent_concludes_each_part() {
        let rules = vec![Rule::new(
            "(?x) is a penguin",
            Expr::and(["(?x) is a bird", "(?x) swims"]),
        )];
        assert_eq!(
            backchain_to_goal_tree(&rules, "opus swims"),
            Expr::or(["opus swims", "opus is a penguin"])
        );
        assert_eq!(
            backchain_to_goal_tree(&rules, "opus is a bird"),
            Expr::or(["opus is a bird", "opus is a penguin"])
        );
    }

    #[test]
    fn test_negated_consequent_ignored() {
        let rules = vec![Rule::new("a", Expr::not("b"))];
        assert_eq!(backchain_to_goal_tree(&rules, "b"), Expr::leaf("b"));
    }

    #[test]
    fn test_branches_follow_rule_order() {
        let rules = vec![
            Rule::new("(?x) gives milk", "(?x) is a mammal"),
            Rule::new("(?x) has hair", "(?x) is a mammal"),
        ];
        assert_eq!(
            backchain_to_goal_tree(&rules, "rex is a mammal"),
            Expr::or(["rex is a mammal", "rex gives milk", "rex has hair"])
        );
    }

    #[test]
    fn test_shared_subgoal_is_memoized() {
        let rules = vec![
            Rule::new("(?x) has hair", "(?x) is a mammal"),
            Rule::new(Expr::and(["(?x) is a mammal", "(?x) eats meat"]), "(?x) is a carnivore"),
            Rule::new(Expr::and(["(?x) is a mammal", "(?x) has hoofs"]), "(?x) is an ungulate"),
            Rule::new(
                Expr::and(["(?x) is a carnivore", "(?x) is an ungulate"]),
                "(?x) is odd",
            ),
        ];
        let (tree, stats) = GoalTreeBuilder::new(&rules).build_with_stats("rex is odd");
        assert!(stats.memo_hits >= 1);

        let mammal = Expr::or(["rex is a mammal", "rex has hair"]);
        let Expr::Or(branches) = &tree else {
            panic!("expected a disjunction, got {}", tree);
        };
        let Expr::And(parts) = &branches[1] else {
            panic!("expected a conjunction, got {}", branches[1]);
        };
        let subtrees: Vec<&Expr> = parts
            .iter()
            .filter_map(|p| match p {
                Expr::Or(inner) => inner.get(1),
                _ => None,
            })
            .collect();
        // both the carnivore and ungulate branches hold the same mammal subtree
        assert_eq!(subtrees.len(), 2);
        assert!(subtrees.iter().all(|s| match s {
            Expr::And(items) => items[0] == mammal,
            _ => false,
        }));
    }

    #[test]
    fn test_builders_are_independent() {
        let rules = vec![Rule::new("(?x) has hair", "(?x) is a mammal")];
        let first = backchain_to_goal_tree(&rules, "rex is a mammal");
        let second = backchain_to_goal_tree(&rules, "rex is a mammal");
        assert_eq!(first, second);
    }
}
