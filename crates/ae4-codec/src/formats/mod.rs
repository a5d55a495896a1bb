//! Concrete file formats and file-name based format detection.

mod anime;
mod catalog;
mod cplt4;
mod stage;
mod system;
mod world_map;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

pub use anime::{AnimeSetElement, Animation, Frame};
pub use catalog::{
    Bgm, BmpCharaExc, Catalog, Effect, EffectAnimation, EffectPreset, MediaFile, SwordPosition,
    SwordType,
};
pub use cplt4::PaletteFile;
pub use stage::{ActorHitbox, DeathFade, EnemyCollision, PlayerCollision, Stage, StageHeader};
pub use system::{IniConf, MenuText, Ranking, StatusWindow, System, SystemTargets};
pub use world_map::{WorldChip, WorldEvent, WorldEventPage, WorldMap};

/// Every file format the codec understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Anime,
    AnimeSet,
    Bgm,
    BmpCharaExc,
    CharaEffect,
    Effect,
    Picture,
    ScrEffect,
    Sound,
    SwordType,
    System,
    WorldMap,
    Stage,
    Palette,
}

impl FormatKind {
    pub const ALL: [FormatKind; 14] = [
        Self::Anime,
        Self::AnimeSet,
        Self::Bgm,
        Self::BmpCharaExc,
        Self::CharaEffect,
        Self::Effect,
        Self::Picture,
        Self::ScrEffect,
        Self::Sound,
        Self::SwordType,
        Self::System,
        Self::WorldMap,
        Self::Stage,
        Self::Palette,
    ];

    /// Short lowercase name used on the command line and in exported JSON.
    pub fn key(self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::AnimeSet => "animeset",
            Self::Bgm => "bgm",
            Self::BmpCharaExc => "bmp_charaexc",
            Self::CharaEffect => "charaeffect",
            Self::Effect => "effect",
            Self::Picture => "picture",
            Self::ScrEffect => "screffect",
            Self::Sound => "sound",
            Self::SwordType => "swordtype",
            Self::System => "system",
            Self::WorldMap => "worldmap",
            Self::Stage => "stage4",
            Self::Palette => "cplt4",
        }
    }

    /// Whether this format is one of the fixed-name `.dat` databases.
    fn is_named_dat(self) -> bool {
        !matches!(self, Self::WorldMap | Self::Stage | Self::Palette)
    }

    /// Infer the format from a file name.
    ///
    /// Fixed database names (`Anime.dat`, `System.dat`, ...) are matched
    /// case-insensitively first, then stage, palette and world map naming
    /// patterns. Returns `None` for anything else.
    pub fn detect(path: impl AsRef<Path>) -> Option<Self> {
        let name = path.as_ref().file_name()?.to_string_lossy().to_lowercase();
        let stem = name.strip_suffix(".dat").unwrap_or(&name);
        if let Some(kind) = Self::ALL
            .into_iter()
            .find(|kind| kind.is_named_dat() && kind.key() == stem)
        {
            return Some(kind);
        }
        if name.contains(".stg4_") || name.ends_with(".stg4") {
            return Some(Self::Stage);
        }
        if name.ends_with(".cplt4") {
            return Some(Self::Palette);
        }
        if name.starts_with("world_") && name.ends_with(".dat") {
            return Some(Self::WorldMap);
        }
        None
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Format name that matches no known format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown format `{0}`")]
pub struct UnknownFormat(pub String);

impl FromStr for FormatKind {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let key = lower.strip_suffix(".dat").unwrap_or(&lower);
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == key)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_named_databases() {
        assert_eq!(FormatKind::detect("Anime.dat"), Some(FormatKind::Anime));
        assert_eq!(FormatKind::detect("ANIMESET.DAT"), Some(FormatKind::AnimeSet));
        assert_eq!(
            FormatKind::detect("data/BmpCharaExc.dat"),
            Some(FormatKind::BmpCharaExc)
        );
        assert_eq!(FormatKind::detect("System.dat"), Some(FormatKind::System));
    }

    #[test]
    fn test_detect_patterns() {
        assert_eq!(FormatKind::detect("stage1.stg4_1020"), Some(FormatKind::Stage));
        assert_eq!(FormatKind::detect("boss.STG4"), Some(FormatKind::Stage));
        assert_eq!(FormatKind::detect("common.cplt4"), Some(FormatKind::Palette));
        assert_eq!(FormatKind::detect("World_01.dat"), Some(FormatKind::WorldMap));
        assert_eq!(FormatKind::detect("readme.txt"), None);
        assert_eq!(FormatKind::detect("world_01.json"), None);
        assert_eq!(FormatKind::detect("Other.dat"), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Bgm".parse::<FormatKind>(), Ok(FormatKind::Bgm));
        assert_eq!("sound.dat".parse::<FormatKind>(), Ok(FormatKind::Sound));
        assert_eq!("worldmap".parse::<FormatKind>(), Ok(FormatKind::WorldMap));
        assert_eq!("stage4".parse::<FormatKind>(), Ok(FormatKind::Stage));
        assert_eq!(
            "stage".parse::<FormatKind>(),
            Err(UnknownFormat("stage".to_string()))
        );
    }

    #[test]
    fn test_keys_roundtrip() {
        for kind in FormatKind::ALL {
            assert_eq!(kind.to_string().parse::<FormatKind>(), Ok(kind));
        }
    }
}
