//! Configuration
//!
//! Resolves where the manifest lives and negotiates the API version callers
//! were built against.
//!
//! The default location is `$HOME/MANIFEST/MANIFEST.MF`, i.e. the manifest
//! directory inside the application sandbox.

mod location;

pub use location::{default_manifest_path, manifest_path_in, ManifestLocation};

use crate::{BbamiError, Result};

/// API version implemented by this crate
pub const API_VERSION: u32 = 1;

/// Environment variable the CLI reads as a manifest path override
pub const MANIFEST_ENV_VAR: &str = "BBAMI_MANIFEST";

/// Reject callers built against a different API version
pub fn check_api_version(requested: u32) -> Result<()> {
    if requested == API_VERSION {
        Ok(())
    } else {
        Err(BbamiError::Unsupported {
            requested,
            supported: API_VERSION,
        })
    }
}
