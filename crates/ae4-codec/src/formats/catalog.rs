//! Flat `.dat` asset catalogs: a version word and one array of elements.

use serde::{Deserialize, Serialize};

use crate::codec::{Codec, Pinned};
use crate::cursor::ByteCursor;
use crate::envelope::VersionFamily;
use crate::error::Result;
use crate::record;

/// A versioned list of catalog elements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Catalog<T> {
    pub version: u32,
    pub elements: Vec<T>,
}

impl<T: Codec> Codec for Catalog<T> {
    fn decode(cur: &mut ByteCursor) -> Result<Self> {
        let version = VersionFamily::AssetCatalog.read_version(cur)?;
        let elements = Vec::<T>::decode(cur)?;
        tracing::debug!(version, elements = elements.len(), "decoded catalog");
        Ok(Self { version, elements })
    }

    fn encode(&self, cur: &mut ByteCursor) -> Result<()> {
        cur.write_u32(self.version)?;
        self.elements.encode(cur)
    }
}

record! {
    /// Character bitmap with its scaling mode.
    pub struct BmpCharaExc {
        pub header: u32,
        pub is_name_same_path: u32,
        pub is_giant: u32,
        pub scale_mode: u32,
        #[serde(skip)]
        pub strings_count: Pinned<2>,
        pub name: String,
        pub path: String,
    }
}

record! {
    pub struct SwordPosition {
        pub header: u32,
        pub x: i32,
        pub y: i32,
        pub unknown1: u32,
        pub unknown2: u32,
        pub unknown3: u32,
        pub unknown4: u32,
        pub unknown5: u32,
        pub width: u32,
        pub height: u32,
        pub index: u32,
        pub unknown6: u32,
    }
}

record! {
    pub struct SwordType {
        pub header: u32,
        pub is_name_same_path: u32,
        #[serde(skip)]
        pub strings_count: Pinned<3>,
        pub name: String,
        pub path_left: String,
        pub path_right: String,
        pub positions: Vec<SwordPosition>,
    }
}

record! {
    pub struct EffectAnimation {
        pub header: u32,
        pub start: u32,
        pub end: u32,
        pub unknown: u32,
    }
}

record! {
    pub struct Effect {
        pub header: u32,
        pub is_name_same_path: u32,
        pub width: u32,
        pub height: u32,
        pub is_giant: u32,
        #[serde(skip)]
        pub strings_count: Pinned<2>,
        pub name: String,
        pub path: String,
        pub animations: Vec<EffectAnimation>,
    }
}

record! {
    /// Parameterized effect preset, used by both character and screen effects.
    pub struct EffectPreset {
        pub header: u32,
        pub effect: u32,
        pub param1: u32,
        pub param2: u32,
        pub param3: u32,
        pub param4: u32,
        pub param5: u32,
        #[serde(skip)]
        pub strings_count: Pinned<1>,
        pub name: String,
    }
}

record! {
    /// Named file reference, used by the picture and sound catalogs.
    pub struct MediaFile {
        pub header: u32,
        pub is_name_same_path: u32,
        #[serde(skip)]
        pub strings_count: Pinned<2>,
        pub name: String,
        pub path: String,
    }
}

record! {
    pub struct Bgm {
        pub header: u32,
        pub is_name_same_path: u32,
        pub volume: u32,
        #[serde(skip)]
        pub strings_count: Pinned<2>,
        pub name: String,
        pub path: String,
    }
}
