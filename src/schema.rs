//! Attribute schema
//!
//! The fixed set of manifest attributes bbami recognizes, paired with the
//! canonical names used on `Name: value` lines. Lines whose name is not in
//! this table are ignored by the loader.

use crate::{BbamiError, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Identifier of a recognized manifest attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum AttributeId {
    Author,
    ArchiveCreatedBy,
    ArchiveManifestVersion,

    ApplicationName,
    ApplicationDescription,
    ApplicationVersion,
    ApplicationId,
    ApplicationVersionId,
    ApplicationDevelopmentMode,
    ApplicationRequiresSystem,
    ApplicationCategory,

    PackageType,
    PackageAuthor,
    PackageName,
    PackageVersion,
    PackageArchitecture,
    PackageAuthorCertificateHash,
    PackageAuthorId,
    PackageId,
    PackageVersionId,

    EntryPoint,
    EntryPointName,
    EntryPointType,
    EntryPointIcon,
    EntryPointSplashScreen,
    EntryPointOrientation,
    EntryPointUserActions,
    EntryPointSystemActions,

    ArchiveAssetName,
    ArchiveAssetSha512Digest,
}

/// Canonical names, indexed by `AttributeId as usize`
const NAMES: [&str; AttributeId::COUNT] = [
    "Author",
    "Archive-Created-By",
    "Archive-Manifest-Version",
    "Application-Name",
    "Application-Description",
    "Application-Version",
    "Application-Id",
    "Application-Version-Id",
    "Application-Development-Mode",
    "Application-Requires-System",
    "Application-Category",
    "Package-Type",
    "Package-Author",
    "Package-Name",
    "Package-Version",
    "Package-Architecture",
    "Package-Author-Certificate-Hash",
    "Package-Author-Id",
    "Package-Id",
    "Package-Version-Id",
    "Entry-Point",
    "Entry-Point-Name",
    "Entry-Point-Type",
    "Entry-Point-Icon",
    "Entry-Point-Splash-Screen",
    "Entry-Point-Orientation",
    "Entry-Point-User-Actions",
    "Entry-Point-System-Actions",
    "Archive-Asset-Name",
    "Archive-Asset-SHA-512-Digest",
];

static NAME_INDEX: LazyLock<HashMap<&'static str, AttributeId>> =
    LazyLock::new(|| AttributeId::ALL.iter().map(|&id| (id.name(), id)).collect());

impl AttributeId {
    /// Number of recognized attributes
    pub const COUNT: usize = 30;

    /// Every attribute, in schema order
    pub const ALL: [AttributeId; Self::COUNT] = [
        AttributeId::Author,
        AttributeId::ArchiveCreatedBy,
        AttributeId::ArchiveManifestVersion,
        AttributeId::ApplicationName,
        AttributeId::ApplicationDescription,
        AttributeId::ApplicationVersion,
        AttributeId::ApplicationId,
        AttributeId::ApplicationVersionId,
        AttributeId::ApplicationDevelopmentMode,
        AttributeId::ApplicationRequiresSystem,
        AttributeId::ApplicationCategory,
        AttributeId::PackageType,
        AttributeId::PackageAuthor,
        AttributeId::PackageName,
        AttributeId::PackageVersion,
        AttributeId::PackageArchitecture,
        AttributeId::PackageAuthorCertificateHash,
        AttributeId::PackageAuthorId,
        AttributeId::PackageId,
        AttributeId::PackageVersionId,
        AttributeId::EntryPoint,
        AttributeId::EntryPointName,
        AttributeId::EntryPointType,
        AttributeId::EntryPointIcon,
        AttributeId::EntryPointSplashScreen,
        AttributeId::EntryPointOrientation,
        AttributeId::EntryPointUserActions,
        AttributeId::EntryPointSystemActions,
        AttributeId::ArchiveAssetName,
        AttributeId::ArchiveAssetSha512Digest,
    ];

    /// Canonical manifest name (e.g. "Package-Version")
    pub fn name(self) -> &'static str {
        NAMES[self.index()]
    }

    /// Position of this attribute in the store
    pub fn index(self) -> usize {
        self as usize
    }

    /// Convert a raw attribute index back into an identifier
    ///
    /// # Errors
    /// `InvalidArgument` if `index` is outside the enumeration
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL.get(index).copied().ok_or_else(|| {
            BbamiError::InvalidArgument(format!(
                "attribute id {} out of range (0..{})",
                index,
                Self::COUNT
            ))
        })
    }
}

/// Resolve a manifest name by scanning the schema table
///
/// Exact, case-sensitive match. Unknown names resolve to `None`.
pub fn resolve(name: &str) -> Option<AttributeId> {
    NAMES
        .iter()
        .position(|candidate| *candidate == name)
        .map(|i| AttributeId::ALL[i])
}

/// Resolve a manifest name through the precomputed name index
///
/// Same answers as [`resolve`], without the linear scan.
pub fn resolve_indexed(name: &str) -> Option<AttributeId> {
    NAME_INDEX.get(name).copied()
}

/// Resolve a manifest name given as raw bytes
///
/// Every canonical name is ASCII, so bytes that are not UTF-8 never match.
pub fn resolve_bytes(name: &[u8]) -> Option<AttributeId> {
    std::str::from_utf8(name).ok().and_then(resolve_indexed)
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AttributeId {
    type Err = BbamiError;

    fn from_str(s: &str) -> Result<Self> {
        resolve_indexed(s)
            .ok_or_else(|| BbamiError::InvalidArgument(format!("unknown attribute name: {}", s)))
    }
}

impl TryFrom<i64> for AttributeId {
    type Error = BbamiError;

    fn try_from(value: i64) -> Result<Self> {
        let index = usize::try_from(value).map_err(|_| {
            BbamiError::InvalidArgument(format!("attribute id {} out of range", value))
        })?;
        Self::from_index(index)
    }
}

impl Serialize for AttributeId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}
