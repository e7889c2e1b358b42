//! Indented text rendering of goal trees
//!
//! ```text
//! OR
//!   opus is a penguin
//!   AND
//!     opus swims
//! ```

use crate::production::Expr;

/// Spaces per nesting level used by [`render`].
pub const DEFAULT_INDENT: usize = 2;

/// Render `node` starting at nesting level `depth`.
pub fn render(node: &Expr, depth: usize) -> String {
    render_with_indent(node, depth, DEFAULT_INDENT)
}

/// Render with a custom indent width.
pub fn render_with_indent(node: &Expr, depth: usize, indent: usize) -> String {
    let mut lines = Vec::new();
    push_lines(node, depth, indent, &mut lines);
    lines.join("\n")
}

fn push_lines(node: &Expr, depth: usize, indent: usize, lines: &mut Vec<String>) {
    let pad = " ".repeat(depth * indent);
    match node {
        Expr::Leaf(text) => lines.push(format!("{}{}", pad, text)),
        Expr::Not(child) => {
            lines.push(format!("{}NOT", pad));
            push_lines(child, depth + 1, indent, lines);
        }
        Expr::And(children) | Expr::Or(children) => {
            let header = if matches!(node, Expr::And(_)) { "AND" } else { "OR" };
            lines.push(format!("{}{}", pad, header));
            for child in children {
                push_lines(child, depth + 1, indent, lines);
            }
        }
    }
}
