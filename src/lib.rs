//! bbami - Application Meta Information
//!
//! Reads an application's `MANIFEST.MF` descriptor (one `Name: value` per
//! line) into a fixed-schema attribute table with typed, indexed,
//! multi-valued lookup.
//!
//! # Architecture
//!
//! - **schema**: The recognized attribute names and their identifiers
//! - **store**: Per-attribute slots holding zero, one or many owned values
//! - **manifest**: Line splitting and the loader that fills a store
//! - **config**: Manifest location and API version negotiation
//! - **api**: The [`AppInfo`] handle callers query

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod schema;
pub mod store;

// Re-exports
pub use api::{init, AppInfo};
pub use config::{ManifestLocation, API_VERSION};
pub use error::{BbamiError, Result};
pub use schema::AttributeId;
pub use store::{AttributeSlot, AttributeStore};
