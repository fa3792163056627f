//! REST endpoint handlers organized by handler group.

pub mod auth;
pub mod backup;
pub mod documents;
pub mod system;
