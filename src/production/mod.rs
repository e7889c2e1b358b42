//! Production rules - assertions, combinators, and pattern substitution
//!
//! Assertions are plain strings such as `"(?x) has feathers"`. Rules pair an
//! antecedent expression with a consequent, and the helpers here unify,
//! substitute, and normalize those expressions.
//!
//! # Example
//!
//! ```
//! use backchain::production::{substitute, unify, Expr};
//!
//! let bindings = unify("(?x) has feathers", "opus has feathers").unwrap();
//! let bird = substitute(&Expr::leaf("(?x) is a bird"), &bindings);
//! assert_eq!(bird, Expr::leaf("opus is a bird"));
//! ```

mod expr;
mod pattern;
mod rule;

pub use expr::Expr;
pub use pattern::{
    substitute, substitute_consequent, substitute_text, unify, variables, Bindings,
};
pub use rule::{Consequent, Rule};
