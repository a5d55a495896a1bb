//! Stage files (`*.stg4_<version>`).
//!
//! Only the fixed stage header is decoded. Everything after it (tiles,
//! palettes, backgrounds, variables) is carried as an opaque byte block and
//! written back unchanged.

use serde::{Deserialize, Serialize};

use crate::codec::{Codec, ZeroText};
use crate::cursor::ByteCursor;
use crate::envelope::VersionFamily;
use crate::error::Result;
use crate::record;

record! {
    pub struct PlayerCollision {
        pub walking_block_width: u32,
        pub walking_block_height: u32,
        pub flying_block_width: u32,
        pub flying_block_height: u32,
        pub walking_character_width: u32,
        pub walking_character_height: u32,
        pub flying_character_width: u32,
        pub flying_character_height: u32,
        pub shot_width: u32,
        pub shot_height: u32,
        pub item_width: u32,
        pub item_height: u32,
        pub walking_block_position: u32,
        pub flying_block_position: u32,
        pub walking_character_position: u32,
        pub flying_character_position: u32,
        pub block_display: u32,
        pub character_display: u32,
        pub shot_display: u32,
        pub item_display: u32,
        pub block_display_color: u32,
        pub character_display_color: u32,
        pub shot_display_color: u32,
        pub item_display_color: u32,
    }
}

record! {
    pub struct EnemyCollision {
        pub walking_block_width: u32,
        pub walking_block_height: u32,
        pub flying_block_width: u32,
        pub flying_block_height: u32,
        pub walking_character_width: u32,
        pub walking_character_height: u32,
        pub flying_character_width: u32,
        pub flying_character_height: u32,
        pub shot_width: u32,
        pub shot_height: u32,
        pub walking_block_position: u32,
        pub flying_block_position: u32,
        pub walking_character_position: u32,
        pub flying_character_position: u32,
    }
}

record! {
    pub struct ActorHitbox {
        pub shot_width: u32,
        pub shot_height: u32,
        pub character_width: u32,
        pub character_height: u32,
    }
}

record! {
    /// Off-screen disappearance rules for one class of actor.
    pub struct DeathFade {
        pub list_size: u32,
        pub auto_disappear_left: u32,
        pub auto_disappear_right: u32,
        pub auto_disappear_top: u32,
        pub auto_disappear_bottom: u32,
        pub disappear_left_range: u32,
        pub disappear_right_range: u32,
        pub disappear_top_range: u32,
        pub disappear_bottom_range: u32,
        pub block_end: u32,
    }
}

record! {
    pub struct StageHeader {
        pub magic: u32,
        pub entry_count: u32,
        pub width: u32,
        pub chunk_width: u32,
        pub chunk_pow: u32,
        pub height: u32,
        pub enable_horizontal_scroll_minimum: u32,
        pub enable_horizontal_scroll_maximum: u32,
        pub enable_vertical_scroll_minimum: u32,
        pub enable_vertical_scroll_maximum: u32,
        pub horizontal_scroll_minimum_value: u32,
        pub horizontal_scroll_maximum_value: u32,
        pub vertical_scroll_minimum_value: u32,
        pub vertical_scroll_maximum_value: u32,
        pub frame_rate: u32,
        pub enable_time_limit: u32,
        pub time_limit_duration: u32,
        pub warning_sound_start_time: u32,
        pub enable_side_scroll: u32,
        pub enable_vertical_scroll: u32,
        pub autoscroll_speed: u32,
        pub vertical_scroll_speed: u32,
        #[serde(with = "crate::codec::lossless_f64")]
        pub gravity: f64,
        pub hit_detection_level: u32,
        pub character_shot_collision_detection_accuracy: u32,
        pub bgm_number: u32,
        pub bgm_loop_playback: u32,
        pub dont_restart_bgm_if_no_change: u32,
        pub enable_z_coordinate: u32,
        pub inherit_status_from_stock: u32,
        pub store_status_to_stock: u32,
        pub show_status_window: u32,
        pub switch_scene_immediately_on_clear: u32,
        pub allow_replay_save: u32,
        pub show_stage: u32,
        pub show_ready: u32,
        pub show_clear: u32,
        pub show_gameover: u32,
        pub player_collision: PlayerCollision,
        pub enemy_collision: EnemyCollision,
        pub item_collision_width: u32,
        pub item_collision_height: u32,
        pub player_hitbox: ActorHitbox,
        pub enemy_hitbox: ActorHitbox,
        pub undo_max_times: u32,
        pub x_coordinate_upper_limit: u32,
        pub y_coordinate_upper_limit: u32,
        pub unk75: u32,
        pub unk76: u32,
        pub unk77: u32,
        pub unk78: u32,
        pub unk79: u32,
        pub unk80: u32,
        pub unk81: u32,
        pub unk82: u32,
        pub unk83: u32,
        pub unk84: u32,
        pub unk85: u32,
        pub unk86: u32,
        pub disable_damage_outside_screen: u32,
        pub player_invincibility_from_same_enemy_duration: u32,
        pub player_invincibility_duration: u32,
        pub enemy_invincibility_from_same_player_duration: u32,
        pub enemy_invincibility_duration: u32,
        pub stage_name_count: u32,
        pub stage_name: ZeroText,
        pub ranking_size: u32,
        pub ranking_score: u32,
        pub ranking_remaining_time: u32,
        pub ranking_clear_time: u32,
        pub ranking_remaining_hp: u32,
        pub ranking_remaining_sp: u32,
        pub nonblock_enemy_death: DeathFade,
        pub block_enemy_death: DeathFade,
        pub item_death: DeathFade,
        pub player_death: DeathFade,
        pub enemy_death: DeathFade,
    }
}

/// A stage: version, decoded header and the undecoded remainder.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "record")]
pub struct Stage {
    pub version: u32,
    pub header: StageHeader,
    pub palette_payload: Vec<u8>,
}

impl Codec for Stage {
    fn decode(cur: &mut ByteCursor) -> Result<Self> {
        let version = VersionFamily::StagePalette.read_version(cur)?;
        let header = StageHeader::decode(cur)?;
        let palette_payload = cur.read_rest();
        tracing::debug!(
            version,
            width = header.width,
            height = header.height,
            payload = palette_payload.len(),
            "decoded stage"
        );
        Ok(Self {
            version,
            header,
            palette_payload,
        })
    }

    fn encode(&self, cur: &mut ByteCursor) -> Result<()> {
        cur.write_u32(self.version)?;
        self.header.encode(cur)?;
        cur.write_bytes(&self.palette_payload)
    }
}
