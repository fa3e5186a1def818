//! GitLab API model types.

mod epic;

pub use epic::*;
