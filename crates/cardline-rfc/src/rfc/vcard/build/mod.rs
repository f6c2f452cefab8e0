//! vCard serialization.

pub mod escape;
pub mod fold;
pub mod writer;

pub use escape::{
    escape_param_value, escape_value, join_list, join_multimap, join_semi_structured,
    join_structured,
};
pub use fold::{FoldProfile, FoldedWriter, fold_line};
pub use writer::LineWriter;
