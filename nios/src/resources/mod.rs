//! Resource implementations

pub mod grid;

pub use grid::MemberResource;
