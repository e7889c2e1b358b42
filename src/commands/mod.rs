pub mod rules;
pub mod tree;
pub mod unify;
