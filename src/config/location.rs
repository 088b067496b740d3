//! Manifest file location

use crate::{BbamiError, Result};
use std::path::{Path, PathBuf};

/// Where to read the manifest from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ManifestLocation {
    /// An explicit manifest file
    Path(PathBuf),
    /// `$HOME/MANIFEST/MANIFEST.MF`
    #[default]
    Default,
}

impl ManifestLocation {
    /// Turn the location into a concrete file path
    pub fn resolve(&self) -> Result<PathBuf> {
        match self {
            ManifestLocation::Path(path) => Ok(path.clone()),
            ManifestLocation::Default => default_manifest_path(),
        }
    }
}

impl From<PathBuf> for ManifestLocation {
    fn from(path: PathBuf) -> Self {
        ManifestLocation::Path(path)
    }
}

impl From<&Path> for ManifestLocation {
    fn from(path: &Path) -> Self {
        ManifestLocation::Path(path.to_path_buf())
    }
}

impl From<Option<PathBuf>> for ManifestLocation {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(ManifestLocation::Default, ManifestLocation::Path)
    }
}

/// Manifest path inside the current user's home (sandbox) directory
pub fn default_manifest_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        BbamiError::Config("cannot locate home directory for default manifest path".to_string())
    })?;
    Ok(manifest_path_in(&home))
}

/// Manifest path inside `home`
pub fn manifest_path_in(home: &Path) -> PathBuf {
    let mut path = home.to_path_buf();
    path.push("MANIFEST");
    path.push("MANIFEST.MF");
    path
}
