//! Project-wide settings (`System.dat`).
//!
//! The leading magic is kept verbatim and never checked against a version
//! family. Unlike the catalogs, the explicit string counts stored here are
//! written back exactly as read.

use crate::record;

record! {
    /// Which character properties a status target carries over.
    pub struct SystemTargets {
        pub count: u32,
        pub target_graphic: u8,
        pub target_base_anim_set: u8,
        pub target_z_coordinate: u8,
        pub target_transparency: u8,
        pub target_character_fx: u8,
        pub target_direction_fix: u8,
        pub target_flight: u8,
        pub target_invincibility: u8,
        pub target_giant_form: u8,
        pub target_sync_autoscroll: u8,
        pub target_fow: u8,
        pub target_remain_hp: u8,
        pub target_remain_sp: u8,
        pub target_max_hp: u8,
        pub target_max_sp: u8,
        pub target_col_hitbox: u8,
        pub target_col_power: u8,
        pub target_col_shock: u8,
        pub target_defense: u8,
        pub target_shock_resist: u8,
        pub target_inertia: u8,
        pub target_action: u8,
        pub target_remain_time: u8,
        pub target_player_count: u8,
        pub target_bgm: u8,
    }
}

record! {
    pub struct StatusWindow {
        pub header: u32,
        pub is_visible: u32,
        pub show_symbol: u32,
        pub max: u32,
        pub unk1: u32,
        pub color_change_condition: u32,
        pub change_operator: u32,
        pub strings_count: u32,
        pub text: String,
    }
}

record! {
    pub struct Ranking {
        pub first_unk: u32,
        pub ranking_on: u32,
        pub second_unk: u32,
        pub ranking_criterias: Vec<u8>,
    }
}

record! {
    pub struct MenuText {
        pub unk1: u32,
        pub enabled: u32,
        pub unk2: u32,
        pub text: String,
    }
}

record! {
    /// Entry of the generated settings INI.
    pub struct IniConf {
        pub unk1: u32,
        pub unk2: u32,
        pub default_value: u32,
        pub string_count: u32,
        pub id_string: String,
        pub default_str: String,
    }
}

record! {
    /// Contents of `System.dat`.
    pub struct System {
        pub magic: u32,
        pub unk0: u32,
        pub up_process_on_stage_clear: u32,
        pub score_per_1up: u32,
        pub space_pause: u32,
        pub hide_obj_pause: u32,
        pub show_symbol_image: u32,
        pub font_index: u32,
        pub decoration: u32,
        pub monospace: u32,
        pub min_damage_reduct_base: u32,
        pub min_damage_reduct_percent: u32,
        pub min_shock_reduct_base: u32,
        pub min_shock_reduct_percent: u32,
        pub enable_test_play_everywhere: u32,
        pub character_draw: u32,
        pub allow_replay_save: u32,
        pub alow_manual_replay_save: u32,
        pub replay_file_format: u32,
        pub use_explorer_file_dialog_for_file_select: u32,
        pub show_image_on_title_screen: u32,
        pub auto_save_default: u32,
        pub show_description: u32,
        pub share_lives_across_story: u32,
        pub return_worldmap_on_death: u32,
        pub show_lives_on_worldmap: u32,
        pub multistage_autosave_after_each_stage: u32,
        pub challenge_mode_world: u32,
        pub all_worlds_selectable_on_start: u32,
        pub show_highscore: u32,
        pub show_totalscore: u32,
        pub always_reset_commonvar_on_worldmap: u32,
        pub retry_pause_menu_option_in_cleared_worlds: u32,
        pub challenge_show_highscore: u32,
        pub challenge_show_totalscore: u32,
        pub challenge_death_reset_commonvar: u32,
        pub challenge_retry_pause_menu_option_in_cleared_worlds: u32,
        pub freemode_death_reset_commonvar: u32,
        pub testplay_death_reset_commonvar: u32,
        pub bitmap_color_mode: u32,
        pub transparent_color_r: u8,
        pub transparent_color_g: u8,
        pub transparent_color_b: u8,
        pub compat_v2_12: u32,
        pub compat_v2_60: u32,
        pub play_death_for_stauts_and_code_exec: u32,
        pub play_invincibility_effect: u32,
        pub invincibility_effect_speed: u32,
        pub enable_color_invincible_anim: u32,
        pub return_to_map_pause_menu_option: u32,
        pub compat_v5_23: u32,
        pub compat_v5_54: u32,
        pub compat_v6_16: u32,
        pub compat_v6_68: u32,
        pub compat_v6_76: u32,
        pub compat_v6_94: u32,
        pub unk_compat_alwayson: u32,
        pub compat_v6_96: u32,
        pub compat_v7_20: u32,
        pub compat_v7_22: u32,
        pub compat_v7_32: u32,
        pub compat_v7_34: u32,
        pub compat_v7_47: u32,
        pub compat_v7_51: u32,
        pub compat_v7_59: u32,
        pub compat_v7_47_nofx: u32,
        pub compat_v7_47_linfx: u32,
        pub compat_v7_72: u32,
        pub compat_v7_80: u32,
        pub compat_v7_81: u32,
        pub compat_v7_82: u32,
        pub compat_v7_92: u32,
        pub compat_v8_04: u32,
        pub compat_v8_07: u32,
        pub compat_v8_16: u32,
        pub compat_v8_17: u32,
        pub compat_v8_18: u32,
        pub compat_v8_21: u32,
        pub compat_v8_25: u32,
        pub compat_v8_29: u32,
        pub compat_v8_32: u32,
        pub compat_v8_36: u32,
        pub compat_v8_37: u32,
        pub compat_v8_40: u32,
        pub compat_v8_44_higherjump: u32,
        pub compat_v8_44_delayedjump: u32,
        pub compat_v8_44_lowerjump: u32,
        pub compat_v8_44_detach_riders: u32,
        pub compat_v8_60: u32,
        pub compat_v8_73: u32,
        pub compat_v8_90_wrap: u32,
        pub compat_v8_90_statuscode: u32,
        #[serde(rename = "compat_v8_90_walkerY")]
        pub compat_v8_90_walker_y: u32,
        pub compat_v8_96: u32,
        pub compat_v9_03: u32,
        pub compat_v9_11: u32,
        pub compat_v9_12: u32,
        pub compat_v9_80: u32,
        pub compat_v9_85: u32,
        pub direct3_color_depth: u32,
        pub directdraw_color_depth: u32,
        pub go_title_after_stage_clear: u32,
        pub strings_count: u32,
        pub game_title: String,
        pub description: String,
        pub targets: SystemTargets,
        pub targets_reseted: SystemTargets,
        pub status_windows: Vec<StatusWindow>,
        pub header_initial: u32,
        pub story_mode_initial: u32,
        pub challenge_mode_initial: u32,
        pub free_mode_initial: u32,
        pub free_mode_max: u32,
        pub header_infinite: u32,
        pub story_mode_infinite: u32,
        pub challenge_mode_infinite: u32,
        pub free_mode_infinite: u32,
        pub free_mode_infini_max: u32,
        pub rankings: Vec<Ranking>,
        pub terms: Vec<String>,
        pub sound_effect_paths: Vec<String>,
        pub bgm_values: Vec<u32>,
        pub bgm_loop_play: Vec<u8>,
        pub title_menu_texts: Vec<MenuText>,
        pub worldmap_menu_texts: Vec<MenuText>,
        pub option_menu_texts: Vec<MenuText>,
        pub ranking_entry_texts: Vec<String>,
        pub autoreplay_save_texts: Vec<String>,
        pub replay_order_texts: Vec<String>,
        pub setting_init: Vec<IniConf>,
    }
}
