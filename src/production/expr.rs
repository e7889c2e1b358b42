//! Logical combinator nodes and their normalization

use std::fmt;

/// A node in an antecedent, consequent, or goal tree.
///
/// Leaves are raw assertion strings such as `"(?x) has hair"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Leaf(String),
    /// All children must hold. An empty conjunction is vacuously true.
    And(Vec<Expr>),
    /// Any child may hold. An empty disjunction is vacuously false.
    Or(Vec<Expr>),
    /// The child must not hold.
    Not(Box<Expr>),
}

impl Expr {
    pub fn leaf(text: impl Into<String>) -> Self {
        Expr::Leaf(text.into())
    }

    pub fn and<I, E>(children: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        Expr::And(children.into_iter().map(Into::into).collect())
    }

    pub fn or<I, E>(children: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        Expr::Or(children.into_iter().map(Into::into).collect())
    }

    pub fn not(child: impl Into<Expr>) -> Self {
        Expr::Not(Box::new(child.into()))
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Expr::Leaf(text) => Some(text),
            _ => None,
        }
    }

    /// Every leaf text in depth-first, left-to-right order (duplicates kept).
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Leaf(text) => out.push(text),
            Expr::And(children) | Expr::Or(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
            Expr::Not(child) => child.collect_leaves(out),
        }
    }

    /// Flatten nested same-kind groups, drop duplicate children and
    /// collapse single-child groups.
    ///
    /// Negation is never flattened through; only its child is normalized.
    pub fn normalize(&self) -> Expr {
        match self {
            Expr::Leaf(_) => self.clone(),
            Expr::Not(child) => Expr::Not(Box::new(child.normalize())),
            Expr::And(children) => {
                collapse(Expr::And, flatten(children, |e| match e {
                    Expr::And(inner) => Ok(inner),
                    other => Err(other),
                }))
            }
            Expr::Or(children) => {
                collapse(Expr::Or, flatten(children, |e| match e {
                    Expr::Or(inner) => Ok(inner),
                    other => Err(other),
                }))
            }
        }
    }
}

/// Normalize children, splicing in the ones `same_kind` recognizes and
/// keeping only the first occurrence of each structurally equal node.
fn flatten(children: &[Expr], same_kind: fn(Expr) -> Result<Vec<Expr>, Expr>) -> Vec<Expr> {
    let mut items: Vec<Expr> = Vec::with_capacity(children.len());
    for child in children {
        let spliced = match same_kind(child.normalize()) {
            Ok(inner) => inner,
            Err(single) => vec![single],
        };
        for item in spliced {
            if !items.contains(&item) {
                items.push(item);
            }
        }
    }
    items
}

fn collapse(wrap: fn(Vec<Expr>) -> Expr, mut items: Vec<Expr>) -> Expr {
    if items.len() == 1 {
        items.remove(0)
    } else {
        wrap(items)
    }
}

impl From<&str> for Expr {
    fn from(text: &str) -> Self {
        Expr::Leaf(text.to_string())
    }
}

impl From<String> for Expr {
    fn from(text: String) -> Self {
        Expr::Leaf(text)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Leaf(text) => write!(f, "{:?}", text),
            Expr::Not(child) => write!(f, "NOT({})", child),
            Expr::And(children) => write_group(f, "AND", children),
            Expr::Or(children) => write_group(f, "OR", children),
        }
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, name: &str, children: &[Expr]) -> fmt::Result {
    write!(f, "{}(", name)?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", child)?;
    }
    write!(f, ")")
}
