//! Application meta information handle
//!
//! [`AppInfo`] is what callers hold: the parsed attribute store plus the
//! manifest path it came from. It is immutable once [`init`] returns and
//! can be shared read-only across threads.
//!
//! ```no_run
//! use bbami::{AttributeId, ManifestLocation, API_VERSION};
//!
//! let info = bbami::init(API_VERSION, ManifestLocation::Default)?;
//! let name = info.query(AttributeId::ApplicationName)?;
//! for i in 0..info.value_count(AttributeId::EntryPointUserActions)? {
//!     println!("{}", info.query_by_index(AttributeId::EntryPointUserActions, i as i64)?);
//! }
//! # Ok::<(), bbami::BbamiError>(())
//! ```

use crate::config::{check_api_version, ManifestLocation};
use crate::manifest;
use crate::schema::AttributeId;
use crate::store::AttributeStore;
use crate::{BbamiError, Result};
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Parsed application meta information
#[derive(Debug)]
pub struct AppInfo {
    manifest_path: Option<PathBuf>,
    store: AttributeStore,
}

/// Load the manifest at `location`
///
/// # Errors
/// - `Unsupported` if `api_version` is not [`crate::API_VERSION`]
/// - `Config` if the default location cannot be resolved
/// - `ManifestIo` if the file cannot be opened or read
/// - `ResourceExhausted` if a value cannot be copied
pub fn init(api_version: u32, location: impl Into<ManifestLocation>) -> Result<AppInfo> {
    check_api_version(api_version)?;
    let path = location.into().resolve()?;
    let store = manifest::load_file(&path)?;
    Ok(AppInfo {
        manifest_path: Some(path),
        store,
    })
}

impl AppInfo {
    /// Build from an in-memory line source instead of a file
    pub fn from_reader<R: BufRead>(api_version: u32, reader: R) -> Result<Self> {
        check_api_version(api_version)?;
        Ok(Self::from_store(manifest::load_reader(reader)?))
    }

    /// Wrap an already populated store
    pub fn from_store(store: AttributeStore) -> Self {
        Self {
            manifest_path: None,
            store,
        }
    }

    /// Path the manifest was read from, if it came from a file
    pub fn manifest_path(&self) -> Option<&Path> {
        self.manifest_path.as_deref()
    }

    /// Number of values for `attribute`
    pub fn value_count(&self, attribute: AttributeId) -> Result<usize> {
        self.store.count(attribute)
    }

    /// First value for `attribute`
    pub fn query(&self, attribute: AttributeId) -> Result<String> {
        self.store.query(attribute, 0)
    }

    /// Value at `index` for `attribute`
    pub fn query_by_index(&self, attribute: AttributeId, index: i64) -> Result<String> {
        self.store.query(attribute, index)
    }

    /// Value for a raw attribute id, as received across an untyped boundary
    pub fn query_raw(&self, attribute: i64, index: i64) -> Result<String> {
        self.store.query(AttributeId::try_from(attribute)?, index)
    }

    /// Read access to the underlying store
    pub fn store(&self) -> Result<&AttributeStore> {
        if self.store.is_disposed() {
            return Err(BbamiError::disposed());
        }
        Ok(&self.store)
    }

    /// Release every held value
    ///
    /// Later calls on this handle, including a second `dispose`, fail with
    /// `InvalidState`.
    pub fn dispose(&mut self) -> Result<()> {
        self.store.destroy()?;
        tracing::debug!(
            path = ?self.manifest_path.as_deref().map(Path::display),
            "Disposed application meta information"
        );
        self.manifest_path = None;
        Ok(())
    }
}
