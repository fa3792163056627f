//! # techsnacc-server
//!
//! HTTP API server for the TECHSNACC storefront.
//!
//! The process connects to the document store first and only then opens
//! its listener; a failed connection ends the process without ever
//! accepting a request. Every response passes a credentialed CORS gate
//! built from a configured origin allow-list.
//!
//! ## Architecture
//!
//! ```text
//! Browser clients (storefront, admin)
//!     │
//!     ├── CORS gate, tracing, timeout, body limit (middleware/)
//!     │
//!     ├── Route table (api/route_table)
//!     │     ├── /api/auth      session cookie
//!     │     ├── /api/{user,product,category,brand,contact,
//!     │     │        cart,order,review,profile}   document CRUD
//!     │     └── /api/backup    export
//!     │
//!     ├── DocumentStore (persistence/)
//!     │
//!     └── PostgreSQL (JSONB documents)
//! ```
//!
//! Startup is sequenced by [`server::run`]: `Starting → Listening` on a
//! successful connect, `Starting → Terminated` otherwise.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod middleware;
pub mod openapi;
pub mod persistence;
pub mod server;
