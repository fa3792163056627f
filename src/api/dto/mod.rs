//! Data Transfer Objects for REST request/response serialization.

pub mod auth_dto;
pub mod backup_dto;
pub mod common_dto;
pub mod document_dto;

pub use auth_dto::*;
pub use backup_dto::*;
pub use common_dto::*;
pub use document_dto::*;
