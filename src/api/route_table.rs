//! Static mapping from path prefixes to handler groups.
//!
//! The table is built once at startup and never changes. Construction
//! rejects prefixes that are malformed, duplicated, or a segment-prefix of
//! another entry, so dispatch is never ambiguous.

use axum::Router;

use super::handlers;
use crate::app_state::AppState;
use crate::domain::Collection;

/// A set of handlers mounted under one prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerGroup {
    /// Session cookie inspection and logout.
    Auth,
    /// Generic document CRUD for one collection.
    Documents(Collection),
    /// Whole-store export.
    Backup,
}

impl HandlerGroup {
    /// Name used in logs and request spans.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Documents(collection) => collection.as_str(),
            Self::Backup => "backup",
        }
    }

    /// Builds the router for this group, relative to its prefix.
    pub fn routes(self) -> Router<AppState> {
        match self {
            Self::Auth => handlers::auth::routes(),
            Self::Documents(collection) => handlers::documents::routes(collection),
            Self::Backup => handlers::backup::routes(),
        }
    }
}

/// Invalid route table entry.
#[derive(Debug, thiserror::Error)]
pub enum RouteTableError {
    /// Prefix is empty, lacks a leading `/`, or ends with `/`.
    #[error("malformed prefix {0:?}")]
    MalformedPrefix(&'static str),

    /// Two prefixes would compete for the same requests.
    #[error("prefix {existing:?} overlaps {added:?}")]
    Overlap {
        /// Prefix already in the table.
        existing: &'static str,
        /// Prefix being added.
        added: &'static str,
    },
}

/// Validated prefix → handler group table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<(&'static str, HandlerGroup)>,
}

impl RouteTable {
    /// The storefront's table: auth, the nine collections, and backup.
    ///
    /// # Errors
    ///
    /// Never fails in practice; validation runs on the literal table.
    pub fn standard() -> Result<Self, RouteTableError> {
        Self::new(vec![
            ("/api/auth", HandlerGroup::Auth),
            ("/api/user", HandlerGroup::Documents(Collection::User)),
            ("/api/product", HandlerGroup::Documents(Collection::Product)),
            ("/api/category", HandlerGroup::Documents(Collection::Category)),
            ("/api/brand", HandlerGroup::Documents(Collection::Brand)),
            ("/api/contact", HandlerGroup::Documents(Collection::Contact)),
            ("/api/cart", HandlerGroup::Documents(Collection::Cart)),
            ("/api/order", HandlerGroup::Documents(Collection::Order)),
            ("/api/review", HandlerGroup::Documents(Collection::Review)),
            ("/api/profile", HandlerGroup::Documents(Collection::Profile)),
            ("/api/backup", HandlerGroup::Backup),
        ])
    }

    /// Builds a table, validating every prefix against the others.
    ///
    /// # Errors
    ///
    /// Returns [`RouteTableError`] for a malformed prefix or when one
    /// prefix equals or is a segment-prefix of another.
    pub fn new(entries: Vec<(&'static str, HandlerGroup)>) -> Result<Self, RouteTableError> {
        let mut accepted: Vec<(&'static str, HandlerGroup)> = Vec::with_capacity(entries.len());
        for (prefix, group) in entries {
            if prefix.len() < 2 || !prefix.starts_with('/') || prefix.ends_with('/') {
                return Err(RouteTableError::MalformedPrefix(prefix));
            }
            if let Some(&(existing, _)) = accepted
                .iter()
                .find(|(existing, _)| overlaps(existing, prefix) || overlaps(prefix, existing))
            {
                return Err(RouteTableError::Overlap {
                    existing,
                    added: prefix,
                });
            }
            accepted.push((prefix, group));
        }
        Ok(Self { entries: accepted })
    }

    /// Entries in registration order.
    #[must_use]
    pub fn entries(&self) -> &[(&'static str, HandlerGroup)] {
        &self.entries
    }

    /// Returns the group that owns `path`, if any.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<HandlerGroup> {
        self.entries
            .iter()
            .filter(|(prefix, _)| overlaps(prefix, path))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|&(_, group)| group)
    }
}

/// `true` if `path` is `prefix` itself or lies beneath it.
fn overlaps(prefix: &str, path: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
