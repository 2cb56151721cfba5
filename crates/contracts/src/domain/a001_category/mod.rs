pub mod aggregate;
pub mod reorder;
pub mod tree;
