//! World maps (`world_*.dat`).

use serde::{Deserialize, Serialize};

use crate::chunk::TileGrid;
use crate::codec::{Codec, CountOr};
use crate::cursor::ByteCursor;
use crate::envelope::VersionFamily;
use crate::error::Result;
use crate::record;

record! {
    /// Tile type of the world map palette.
    pub struct WorldChip {
        pub header: u32,
        pub tile_index: u32,
        pub locked: u32,
        pub graphic: u32,
        pub strings_count: CountOr<2>,
        pub name: String,
        pub unused_string: String,
    }
}

record! {
    pub struct WorldEventPage {
        pub header: u32,
        pub event_type: u32,
        pub graphic: u32,
        pub world_number: u32,
        pub pass_without_clear: u32,
        pub play_after_clear: u32,
        pub on_game_clear: u32,
        pub appearance_condition_world: u32,
        pub appearance_condition_variable: u32,
        pub appearance_condition_constant: u32,
        pub appearance_condition_comparison_content: u32,
        pub appearance_condition_total_score: u32,
        pub variation_setting_present: u32,
        pub variation_variable: u32,
        pub variation_constant: u32,
        pub strings_count: CountOr<2>,
        pub world_name: String,
        pub start_stage: String,
    }
}

record! {
    /// A placed map event and its pages.
    pub struct WorldEvent {
        pub header: u32,
        pub placement_x: u32,
        pub placement_y: u32,
        pub strings_count: CountOr<1>,
        pub name: String,
        pub pages: Vec<WorldEventPage>,
    }
}

/// A world map: settings, tile palette, tiles and events.
///
/// `tiles` holds only the logical `width * height` cells in row order; the
/// padding columns of the stored grid are dropped on read and zero-filled on
/// write.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "record")]
pub struct WorldMap {
    pub version: u32,
    pub settings_count: u32,
    pub width: u32,
    pub height: u32,
    pub chunk_width: u32,
    pub chunk_pow: u32,
    pub init_x: u32,
    pub init_y: u32,
    pub background_index: u32,
    pub use_background: u32,
    pub strings_count: u32,
    pub name: String,
    pub bg_path: String,
    pub tile_types: Vec<WorldChip>,
    pub tiles: Vec<u32>,
    pub events: Vec<WorldEvent>,
    pub event_palette: Vec<WorldEvent>,
}

impl WorldMap {
    /// Stored grid geometry of this map.
    pub fn grid(&self) -> TileGrid {
        TileGrid {
            width: self.width,
            height: self.height,
            chunk_width: self.chunk_width,
        }
    }
}

impl Codec for WorldMap {
    fn decode(cur: &mut ByteCursor) -> Result<Self> {
        let version = VersionFamily::AssetCatalog.read_version(cur)?;
        let mut map = WorldMap {
            version,
            settings_count: cur.read_u32()?,
            width: cur.read_u32()?,
            height: cur.read_u32()?,
            chunk_width: cur.read_u32()?,
            chunk_pow: cur.read_u32()?,
            init_x: cur.read_u32()?,
            init_y: cur.read_u32()?,
            background_index: cur.read_u32()?,
            use_background: cur.read_u32()?,
            strings_count: cur.read_u32()?,
            ..WorldMap::default()
        };
        map.name = String::decode(cur)?;
        map.bg_path = String::decode(cur)?;
        map.tile_types = Vec::decode(cur)?;
        map.tiles = map.grid().read(cur)?;
        map.events = Vec::decode(cur)?;
        map.event_palette = Vec::decode(cur)?;
        tracing::debug!(
            width = map.width,
            height = map.height,
            chunk_width = map.chunk_width,
            events = map.events.len(),
            "decoded world map"
        );
        Ok(map)
    }

    fn encode(&self, cur: &mut ByteCursor) -> Result<()> {
        for word in [
            self.version,
            self.settings_count,
            self.width,
            self.height,
            self.chunk_width,
            self.chunk_pow,
            self.init_x,
            self.init_y,
            self.background_index,
            self.use_background,
            self.strings_count,
        ] {
            cur.write_u32(word)?;
        }
        self.name.encode(cur)?;
        self.bg_path.encode(cur)?;
        self.tile_types.encode(cur)?;
        self.grid().write(cur, &self.tiles)?;
        self.events.encode(cur)?;
        self.event_palette.encode(cur)
    }
}
