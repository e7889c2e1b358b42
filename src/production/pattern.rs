//! Pattern matching over whitespace-tokenized assertions
//!
//! Variables are written `(?name)` and bind positionally to a single token.
//! There is no nesting and no first-order term structure: `"(?x) loves (?y)"`
//! matches any three-token assertion whose middle word is `loves`.

use regex::{Captures, Regex};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use super::expr::Expr;
use super::rule::Consequent;

/// Variable name → bound token.
pub type Bindings = BTreeMap<String, String>;

fn variable_regex() -> &'static Regex {
    static VAR_RE: OnceLock<Regex> = OnceLock::new();
    VAR_RE.get_or_init(|| Regex::new(r"\(\?([A-Za-z_]\w*)\)").expect("variable pattern is valid"))
}

/// Variable name if `token` is exactly one marker such as `(?x)`.
fn as_variable(token: &str) -> Option<&str> {
    let caps = variable_regex().captures(token)?;
    let whole = caps.get(0)?;
    if whole.start() == 0 && whole.end() == token.len() {
        caps.get(1).map(|m| m.as_str())
    } else {
        None
    }
}

/// Unify a pattern assertion against a concrete one.
///
/// Returns `None` when token counts differ, a literal token differs, or a
/// repeated variable would bind two different values.
pub fn unify(pattern: &str, datum: &str) -> Option<Bindings> {
    let pattern_tokens: Vec<&str> = pattern.split_whitespace().collect();
    let datum_tokens: Vec<&str> = datum.split_whitespace().collect();
    if pattern_tokens.len() != datum_tokens.len() {
        return None;
    }

    let mut bindings = Bindings::new();
    for (p, d) in pattern_tokens.iter().zip(datum_tokens.iter()) {
        match as_variable(p) {
            Some(name) => match bindings.get(name) {
                Some(bound) if bound.as_str() != *d => return None,
                Some(_) => {}
                None => {
                    bindings.insert(name.to_string(), d.to_string());
                }
            },
            None if p != d => return None,
            None => {}
        }
    }
    Some(bindings)
}

/// Names of every variable appearing in `pattern`.
pub fn variables(pattern: &str) -> BTreeSet<String> {
    variable_regex()
        .captures_iter(pattern)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Replace bound markers in a single assertion. Unbound markers are kept.
pub fn substitute_text(template: &str, bindings: &Bindings) -> String {
    variable_regex()
        .replace_all(template, |caps: &Captures| match bindings.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Substitute bindings through a whole expression, keeping its shape.
pub fn substitute(template: &Expr, bindings: &Bindings) -> Expr {
    match template {
        Expr::Leaf(text) => Expr::Leaf(substitute_text(text, bindings)),
        Expr::And(children) => Expr::And(substitute_all(children, bindings)),
        Expr::Or(children) => Expr::Or(substitute_all(children, bindings)),
        Expr::Not(child) => Expr::Not(Box::new(substitute(child, bindings))),
    }
}

/// Substitute into a rule consequent; lists are substituted element-wise.
pub fn substitute_consequent(consequent: &Consequent, bindings: &Bindings) -> Consequent {
    match consequent {
        Consequent::Single(expr) => Consequent::Single(substitute(expr, bindings)),
        Consequent::List(items) => Consequent::List(substitute_all(items, bindings)),
    }
}

fn substitute_all(children: &[Expr], bindings: &Bindings) -> Vec<Expr> {
    children.iter().map(|c| substitute(c, bindings)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binds(pairs: &[(&str, &str)]) -> Bindings {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_unify_binds_variable() {
        assert_eq!(
            unify("(?x) has hair", "opus has hair"),
            Some(binds(&[("x", "opus")]))
        );
    }

    #[test]
    fn test_unify_literal_mismatch() {
        assert_eq!(unify("(?x) has hair", "opus has fur"), None);
    }

    #[test]
    fn test_unify_conflicting_rebinding() {
        assert_eq!(unify("(?x) loves (?x)", "bart loves lisa"), None);
        assert_eq!(
            unify("(?x) loves (?x)", "narcissus loves narcissus"),
            Some(binds(&[("x", "narcissus")]))
        );
    }

    #[test]
    fn test_unify_token_count_mismatch() {
        assert_eq!(unify("(?x) is a bird", "opus is a big bird"), None);
        assert_eq!(unify("(?x)", ""), None);
    }

    #[test]
    fn test_unify_without_variables() {
        assert_eq!(unify("opus swims", "opus swims"), Some(Bindings::new()));
        assert_eq!(unify("opus swims", "Opus swims"), None);
    }

    #[test]
    fn test_unify_ignores_extra_whitespace() {
        assert_eq!(
            unify("  (?x)   has hair ", "opus has\thair"),
            Some(binds(&[("x", "opus")]))
        );
    }

    #[test]
    fn test_embedded_marker_is_literal() {
        // only a whole token can be a variable
        assert_eq!(unify("a(?x) b", "ab b"), None);
        assert_eq!(unify("a(?x) b", "a(?x) b"), Some(Bindings::new()));
    }

    #[test]
    fn test_variables() {
        let vars = variables("(?x) loves (?y) and (?x)");
        assert_eq!(
            vars.into_iter().collect::<Vec<_>>(),
            vec!["x".to_string(), "y".to_string()]
        );
        assert!(variables("opus swims").is_empty());
    }

    #[test]
    fn test_substitute_leaf() {
        let b = binds(&[("x", "opus")]);
        assert_eq!(substitute_text("(?x) is a bird", &b), "opus is a bird");
    }

    #[test]
    fn test_substitute_leaves_unbound_markers() {
        let b = binds(&[("x", "opus")]);
        assert_eq!(
            substitute_text("(?x) is a parent of (?y)", &b),
            "opus is a parent of (?y)"
        );
    }

    #[test]
    fn test_substitute_preserves_shape() {
        let b = binds(&[("x", "opus")]);
        let template = Expr::And(vec![
            Expr::leaf("(?x) is a bird"),
            Expr::or(["(?x) swims", "(?y) swims"]),
            Expr::not("(?x) flies"),
        ]);
        let expected = Expr::And(vec![
            Expr::leaf("opus is a bird"),
            Expr::or(["opus swims", "(?y) swims"]),
            Expr::not("opus flies"),
        ]);
        assert_eq!(substitute(&template, &b), expected);
    }

    #[test]
    fn test_substitute_consequent_list() {
        let b = binds(&[("x", "opus"), ("y", "tux")]);
        let list = Consequent::List(vec![
            Expr::leaf("(?x) is a bird"),
            Expr::not("(?y) flies"),
            Expr::leaf("(?z) swims"),
        ]);
        assert_eq!(
            substitute_consequent(&list, &b),
            Consequent::List(vec![
                Expr::leaf("opus is a bird"),
                Expr::not("tux flies"),
                Expr::leaf("(?z) swims"),
            ])
        );

        let single = Consequent::Single(Expr::or(["(?x) swims", "(?x) dives"]));
        assert_eq!(
            substitute_consequent(&single, &b),
            Consequent::Single(Expr::or(["opus swims", "opus dives"]))
        );
    }
}
