//! Leading magic/version word of every container.

use crate::cursor::ByteCursor;
use crate::error::{CodecError, Result};

/// Group of formats sharing one set of recognized version words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionFamily {
    /// Stage and palette files.
    StagePalette,
    /// The `.dat` catalogs and world maps.
    AssetCatalog,
}

impl VersionFamily {
    /// Versions this family accepts.
    pub fn versions(self) -> &'static [u32] {
        match self {
            Self::StagePalette => &[0x03C6, 0x03FC],
            Self::AssetCatalog => &[0xB6, 0x03C6, 0x03FC],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::StagePalette => "stage/palette",
            Self::AssetCatalog => "asset catalog",
        }
    }

    pub fn accepts(self, version: u32) -> bool {
        self.versions().contains(&version)
    }

    /// Read the version word, rejecting values outside the family.
    pub fn read_version(self, cur: &mut ByteCursor) -> Result<u32> {
        let offset = cur.position();
        let version = cur.read_u32()?;
        if !self.accepts(version) {
            return Err(CodecError::UnsupportedVersion {
                offset,
                family: self.name(),
                version,
            });
        }
        tracing::debug!(version, family = self.name(), "recognized version");
        Ok(version)
    }
}
