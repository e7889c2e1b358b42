//! IF/THEN rules

use std::fmt;

use super::expr::Expr;

/// Conclusion side of a rule: one expression or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Consequent {
    Single(Expr),
    List(Vec<Expr>),
}

impl Consequent {
    /// Assertions the backward chainer can match against a goal, in order.
    ///
    /// A leaf concludes itself. An `And`/`Or` consequent concludes each of
    /// its leaf children, like a list does. Negations and nested groups
    /// yield nothing.
    pub fn assertions(&self) -> Vec<&str> {
        match self {
            Consequent::Single(Expr::Leaf(text)) => vec![text.as_str()],
            Consequent::Single(Expr::And(items) | Expr::Or(items)) | Consequent::List(items) => {
                items.iter().filter_map(Expr::as_leaf).collect()
            }
            Consequent::Single(Expr::Not(_)) => Vec::new(),
        }
    }
}

impl From<Expr> for Consequent {
    fn from(expr: Expr) -> Self {
        Consequent::Single(expr)
    }
}

impl From<&str> for Consequent {
    fn from(text: &str) -> Self {
        Consequent::Single(Expr::leaf(text))
    }
}

impl From<Vec<Expr>> for Consequent {
    fn from(items: Vec<Expr>) -> Self {
        Consequent::List(items)
    }
}

/// An immutable antecedent/consequent pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    antecedent: Expr,
    consequent: Consequent,
}

impl Rule {
    /// `Rule::new(if_part, then_part)`
    pub fn new(antecedent: impl Into<Expr>, consequent: impl Into<Consequent>) -> Self {
        Self {
            antecedent: antecedent.into(),
            consequent: consequent.into(),
        }
    }

    pub fn antecedent(&self) -> &Expr {
        &self.antecedent
    }

    pub fn consequent(&self) -> &Consequent {
        &self.consequent
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IF {} THEN ", self.antecedent)?;
        match &self.consequent {
            Consequent::Single(expr) => write!(f, "{}", expr),
            Consequent::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}
