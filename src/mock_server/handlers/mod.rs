//! HTTP handlers for mock GitLab API endpoints.

mod epics;

pub use epics::*;
