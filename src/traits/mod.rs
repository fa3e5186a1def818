//! Trait definitions for GitLab resource operations.
//!
//! Each resource type implements the traits its endpoints support.

mod get;
mod list;

pub use get::Get;
pub use list::List;
