//! Domain layer: document identity, collections, and the server lifecycle.
//!
//! This module holds the types shared by the store, the HTTP handlers and
//! the startup sequencer: stored documents and their identifiers, the set
//! of collections, and the readiness state machine.

pub mod collection;
pub mod document;
pub mod document_id;
pub mod lifecycle;

pub use collection::Collection;
pub use document::{Document, DocumentPage};
pub use document_id::DocumentId;
pub use lifecycle::{Lifecycle, LifecycleError, ServerPhase};
