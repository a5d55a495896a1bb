//! Whole-file documents: format dispatch, file I/O and the JSON boundary.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codec::Codec;
use crate::cursor::{ByteCursor, DEFAULT_MAX_DEPTH};
use crate::error::{CodecError, Result};
use crate::formats::{
    AnimeSetElement, Animation, Bgm, BmpCharaExc, Catalog, Effect, EffectPreset, FormatKind,
    MediaFile, PaletteFile, Stage, SwordType, System, WorldMap,
};

/// Options controlling decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Deepest allowed nesting of flows inside item effects.
    pub max_flow_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_flow_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A decoded file of any supported format.
///
/// Exported JSON carries the format key under `"format"`, so an exported
/// document can be rebuilt without knowing where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format")]
pub enum Document {
    #[serde(rename = "anime")]
    Anime(Catalog<Animation>),
    #[serde(rename = "animeset")]
    AnimeSet(Catalog<AnimeSetElement>),
    #[serde(rename = "bgm")]
    Bgm(Catalog<Bgm>),
    #[serde(rename = "bmp_charaexc")]
    BmpCharaExc(Catalog<BmpCharaExc>),
    #[serde(rename = "charaeffect")]
    CharaEffect(Catalog<EffectPreset>),
    #[serde(rename = "effect")]
    Effect(Catalog<Effect>),
    #[serde(rename = "picture")]
    Picture(Catalog<MediaFile>),
    #[serde(rename = "screffect")]
    ScrEffect(Catalog<EffectPreset>),
    #[serde(rename = "sound")]
    Sound(Catalog<MediaFile>),
    #[serde(rename = "swordtype")]
    SwordType(Catalog<SwordType>),
    #[serde(rename = "system")]
    System(System),
    #[serde(rename = "worldmap")]
    WorldMap(WorldMap),
    #[serde(rename = "stage4")]
    Stage(Stage),
    #[serde(rename = "cplt4")]
    Palette(PaletteFile),
}

impl Document {
    /// Decode `bytes` as a file of the given format.
    ///
    /// Bytes left after the last field are logged and dropped; they are not
    /// part of the document and [`Document::to_bytes`] will not write them.
    pub fn parse(kind: FormatKind, bytes: &[u8], options: &DecodeOptions) -> Result<Self> {
        let mut cur = ByteCursor::fixed(bytes.to_vec()).with_max_depth(options.max_flow_depth);
        let cur = &mut cur;
        let document = match kind {
            FormatKind::Anime => Self::Anime(Catalog::decode(cur)?),
            FormatKind::AnimeSet => Self::AnimeSet(Catalog::decode(cur)?),
            FormatKind::Bgm => Self::Bgm(Catalog::decode(cur)?),
            FormatKind::BmpCharaExc => Self::BmpCharaExc(Catalog::decode(cur)?),
            FormatKind::CharaEffect => Self::CharaEffect(Catalog::decode(cur)?),
            FormatKind::Effect => Self::Effect(Catalog::decode(cur)?),
            FormatKind::Picture => Self::Picture(Catalog::decode(cur)?),
            FormatKind::ScrEffect => Self::ScrEffect(Catalog::decode(cur)?),
            FormatKind::Sound => Self::Sound(Catalog::decode(cur)?),
            FormatKind::SwordType => Self::SwordType(Catalog::decode(cur)?),
            FormatKind::System => Self::System(System::decode(cur)?),
            FormatKind::WorldMap => Self::WorldMap(WorldMap::decode(cur)?),
            FormatKind::Stage => Self::Stage(Stage::decode(cur)?),
            FormatKind::Palette => Self::Palette(PaletteFile::decode(cur)?),
        };
        if !cur.is_exhausted() {
            tracing::warn!(
                format = %kind,
                offset = cur.position(),
                trailing = cur.remaining(),
                "ignoring trailing bytes"
            );
        }
        Ok(document)
    }

    /// Serialize to the binary layout of this document's format.
    ///
    /// Output is byte-identical to the parsed input except for any trailing
    /// bytes [`Document::parse`] dropped.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cur = ByteCursor::append();
        match self {
            Self::Anime(doc) => doc.encode(&mut cur)?,
            Self::AnimeSet(doc) => doc.encode(&mut cur)?,
            Self::Bgm(doc) => doc.encode(&mut cur)?,
            Self::BmpCharaExc(doc) => doc.encode(&mut cur)?,
            Self::CharaEffect(doc) | Self::ScrEffect(doc) => doc.encode(&mut cur)?,
            Self::Effect(doc) => doc.encode(&mut cur)?,
            Self::Picture(doc) | Self::Sound(doc) => doc.encode(&mut cur)?,
            Self::SwordType(doc) => doc.encode(&mut cur)?,
            Self::System(doc) => doc.encode(&mut cur)?,
            Self::WorldMap(doc) => doc.encode(&mut cur)?,
            Self::Stage(doc) => doc.encode(&mut cur)?,
            Self::Palette(doc) => doc.encode(&mut cur)?,
        }
        tracing::debug!(format = %self.kind(), size = cur.position(), "encoded document");
        Ok(cur.finish())
    }

    pub fn kind(&self) -> FormatKind {
        match self {
            Self::Anime(_) => FormatKind::Anime,
            Self::AnimeSet(_) => FormatKind::AnimeSet,
            Self::Bgm(_) => FormatKind::Bgm,
            Self::BmpCharaExc(_) => FormatKind::BmpCharaExc,
            Self::CharaEffect(_) => FormatKind::CharaEffect,
            Self::Effect(_) => FormatKind::Effect,
            Self::Picture(_) => FormatKind::Picture,
            Self::ScrEffect(_) => FormatKind::ScrEffect,
            Self::Sound(_) => FormatKind::Sound,
            Self::SwordType(_) => FormatKind::SwordType,
            Self::System(_) => FormatKind::System,
            Self::WorldMap(_) => FormatKind::WorldMap,
            Self::Stage(_) => FormatKind::Stage,
            Self::Palette(_) => FormatKind::Palette,
        }
    }

    /// Leading version word (the magic for `System.dat` and palettes).
    pub fn version(&self) -> u32 {
        match self {
            Self::Anime(doc) => doc.version,
            Self::AnimeSet(doc) => doc.version,
            Self::Bgm(doc) => doc.version,
            Self::BmpCharaExc(doc) => doc.version,
            Self::CharaEffect(doc) | Self::ScrEffect(doc) => doc.version,
            Self::Effect(doc) => doc.version,
            Self::Picture(doc) | Self::Sound(doc) => doc.version,
            Self::SwordType(doc) => doc.version,
            Self::System(doc) => doc.magic,
            Self::WorldMap(doc) => doc.version,
            Self::Stage(doc) => doc.version,
            Self::Palette(doc) => doc.magic,
        }
    }

    /// Read and decode a file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display(), format = %kind))]
    pub fn load(path: impl AsRef<Path>, kind: FormatKind, options: &DecodeOptions) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| CodecError::io(path, e))?;
        tracing::debug!(size = bytes.len(), "read file");
        Self::parse(kind, &bytes, options)
    }

    /// Encode and write to `path`.
    ///
    /// The bytes go to a temporary file in the same directory which then
    /// replaces `path`, so a failed save never leaves a partial file behind.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display(), format = %self.kind()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| CodecError::io(path, e))?;
        temp.write_all(&bytes).map_err(|e| CodecError::io(path, e))?;
        temp.flush().map_err(|e| CodecError::io(path, e))?;
        temp.persist(path).map_err(|e| CodecError::io(path, e.error))?;
        tracing::debug!(size = bytes.len(), "saved file");
        Ok(())
    }

    /// Pretty-printed JSON export.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Single-line JSON export.
    pub fn to_json_compact(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// File name a rebuilt document is written under.
///
/// A format suffix already present on `stem` is replaced rather than
/// doubled, so `stage1.stg4_1020` rebuilds to `stage1.stg4_1020` again.
pub fn rebuild_file_name(stem: &str, document: &Document) -> String {
    match document {
        Document::Stage(stage) => {
            let base = stem
                .to_ascii_lowercase()
                .rfind(".stg4")
                .map_or(stem, |at| &stem[..at]);
            format!("{base}.stg4_{}", stage.version)
        }
        Document::Palette(_) => {
            let base = strip_suffix_ignore_case(stem, ".cplt4");
            format!("{base}.cplt4")
        }
        _ => {
            let base = strip_suffix_ignore_case(stem, ".dat");
            format!("{base}.dat")
        }
    }
}

fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> &'a str {
    if value.len() >= suffix.len()
        && value.is_char_boundary(value.len() - suffix.len())
        && value[value.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
    {
        &value[..value.len() - suffix.len()]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;

    fn bgm_catalog() -> Document {
        Document::Bgm(Catalog {
            version: 0xB6,
            elements: vec![Bgm {
                name: "title".to_string(),
                path: "bgm/title.mid".to_string(),
                volume: 80,
                ..Bgm::default()
            }],
        })
    }

    #[test]
    fn test_parse_matches_to_bytes() {
        let document = bgm_catalog();
        let bytes = document.to_bytes().unwrap();
        let parsed = Document::parse(FormatKind::Bgm, &bytes, &DecodeOptions::default()).unwrap();
        assert_eq!(parsed, document);
        assert_eq!(parsed.version(), 0xB6);
        assert_eq!(parsed.kind(), FormatKind::Bgm);
    }

    #[test]
    fn test_json_carries_format_key() {
        let json = bgm_catalog().to_json_string().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["format"], "bgm");
        assert_eq!(value["version"], 0xB6);
        assert_eq!(value["elements"][0]["volume"], 80);
        assert_eq!(Document::from_json_str(&json).unwrap(), bgm_catalog());
    }

    #[test]
    fn test_json_rejects_unknown_format() {
        let err = Document::from_json_str(r#"{"format":"movie","version":1}"#).unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }

    #[test]
    fn test_rebuild_names() {
        let stage = Document::Stage(Stage {
            version: 1020,
            ..Stage::default()
        });
        assert_eq!(rebuild_file_name("stage1", &stage), "stage1.stg4_1020");
        assert_eq!(rebuild_file_name("stage1.stg4_966", &stage), "stage1.stg4_1020");

        let palette = Document::Palette(PaletteFile {
            magic: 1020,
            unk1: 0,
            unk2: 0,
            palette: Palette::default(),
        });
        assert_eq!(rebuild_file_name("common", &palette), "common.cplt4");
        assert_eq!(rebuild_file_name("common.CPLT4", &palette), "common.cplt4");

        assert_eq!(rebuild_file_name("Bgm", &bgm_catalog()), "Bgm.dat");
        assert_eq!(rebuild_file_name("Bgm.dat", &bgm_catalog()), "Bgm.dat");
    }

    #[test]
    fn test_trailing_bytes_are_tolerated() {
        let exact = bgm_catalog().to_bytes().unwrap();
        let mut bytes = exact.clone();
        bytes.extend_from_slice(&[1, 2, 3]);
        let parsed = Document::parse(FormatKind::Bgm, &bytes, &DecodeOptions::default()).unwrap();
        assert_eq!(parsed, bgm_catalog());
        // the surplus is not carried into the rebuilt file
        assert_eq!(parsed.to_bytes().unwrap(), exact);
    }
}
