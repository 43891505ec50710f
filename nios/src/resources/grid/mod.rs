pub mod models;
pub mod resource_member;

pub use resource_member::MemberResource;
