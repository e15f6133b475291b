//! The syntax tree nodes produced by the [`Parser`](super::parser::Parser).

pub mod program;
