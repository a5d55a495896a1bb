//! Payload layouts carried by commands and item effects.
//!
//! Opaque runs are named after their byte offsets inside the payload
//! (`unknown_1_30` covers bytes 1 through 30). Field order is wire order.

use crate::codec::Bytes;
use crate::flow::{BasicCondition, Flow};
use crate::record;

record! {
    /// Swap in another set of flows.
    pub struct FlowChange {
        pub unknown_1_30: Bytes<30>,
        pub flows: Vec<Flow>,
        pub unknown_69_72: Bytes<4>,
        pub operation: u32,
        pub unknown_77_80: Bytes<4>,
    }
}

record! {
    pub struct StageClear {
        pub unknown_1_14: Bytes<14>,
        pub path: String,
        pub unknown_19_38: Bytes<20>,
        pub stage_transition: u32,
        pub number: u32,
        pub change_world_map_position: u32,
        pub world_map_position_x: u32,
        pub world_map_position_y: u32,
        pub change_initial_position: u32,
        pub initial_position_x: u32,
        pub initial_position_y: u32,
        pub initial_position_main_character_direction: u32,
        pub execute_autosave: u32,
        pub add_clear_text_to_replay: u32,
    }
}

record! {
    pub struct GameWait {
        pub execution_time: u16,
        pub execution_time_double: u16,
        pub parallel_execution: u8,
        pub unknown_6_38: Bytes<33>,
        pub game_wait_execution_time: u32,
    }
}

record! {
    /// On-screen message box.
    pub struct Message {
        pub unknown_1_14: Bytes<14>,
        pub message: String,
        pub unknown_19_38: Bytes<20>,
        pub display_position_specification_method: u32,
        pub coordinate_x: u32,
        pub coordinate_y: u32,
        pub display_position_offset_x: u32,
        pub display_position_offset_y: u32,
        pub auto_adjust_to_not_go_off_screen: u32,
        pub display_time_specification_method: u32,
        pub display_time: u32,
        pub pause: u32,
        pub display_variables: u32,
        pub follow_screen: u32,
        pub auto_update: u32,
        pub message_id_present: u32,
        pub message_id: u32,
        pub window_display: u32,
        pub message_clear: u32,
        pub update_interval: u32,
        pub instant_display: u32,
        pub coordinate_unit: u32,
        pub set_options: u32,
        pub assign_return_value_to_flow_variable: u32,
    }
}

record! {
    pub struct Wait {
        pub execution_time: u16,
        pub execution_time_double: u16,
        pub parallel_execution: u8,
        pub unknown_6_38: Bytes<33>,
    }
}

record! {
    pub struct LinearMovement {
        pub execution_time: u16,
        pub execution_time_double: u16,
        pub parallel_execution: u8,
        pub unknown_6_8: Bytes<3>,
        pub animation_and_other_type: u16,
        pub unknown_11_26: Bytes<16>,
        pub movement_direction_setting_type: u8,
        pub movement_direction_direction: u8,
        pub movement_direction_angle: u16,
        pub movement_direction_angle_double: u16,
        pub movement_direction_angle_reverse_rotation_if_facing_right: u8,
        pub movement_direction_target_x_present: u8,
        pub movement_direction_target_y_present: u8,
        pub movement_direction_target_x: u16,
        pub movement_direction_target_y: u16,
        pub movement_direction_target_x_dot: u16,
        pub movement_direction_target_y_dot: u16,
        pub movement_direction_target_type: u8,
        pub movement_direction_target_coordinate_unit: u8,
        pub unknown_46: Bytes<1>,
        pub movement_direction_execute_until_target_coordinate_reached: u8,
        pub movement_direction_invalidate_horizontal_movement: u8,
        pub movement_direction_invalidate_vertical_movement: u8,
        pub movement_direction_target_x_flip_if_facing_right: u8,
        pub movement_direction_target_y_flip_if_facing_right: u8,
        pub movement_direction_reverse_speed_if_direction_changes: u8,
        pub movement_direction_prevent_blur: u8,
        pub movement_direction_dont_change_character_direction: u8,
        pub time_speed_distance_setting_type: u8,
        pub time_speed_distance_speed: u16,
        pub time_speed_distance_speed_double: u16,
        pub time_speed_distance_distance: u16,
        pub time_speed_distance_distance_double: u16,
        pub time_speed_distance_distance_unit: u8,
        pub unknown_65_68: Bytes<4>,
        pub inertia_present: u8,
        pub inertia_max_speed: u16,
        #[serde(with = "crate::codec::lossless_f64")]
        pub inertia_speed_correction_on_direction_change: f64,
        pub animation_type: u8,
        pub unknown_81_101: Bytes<21>,
    }
}

record! {
    /// Shared by the ground, circular, charge, guided, screen-avoidance and
    /// movement-invalidation commands.
    pub struct GenericMovement {
        pub execution_time: u16,
        pub execution_time_double: u16,
        pub parallel_execution: u8,
        pub unknown_6_101: Bytes<96>,
    }
}

record! {
    pub struct DirectionChange {
        pub execution_time: u16,
        pub execution_time_double: u16,
        pub parallel_execution: u8,
        pub unknown_6_42: Bytes<37>,
    }
}

record! {
    pub struct Jump {
        pub unknown_1_5: Bytes<5>,
        pub sound_effect: u16,
        pub play_if_outside_screen: u8,
        pub animation: u16,
        pub unknown_11_38: Bytes<28>,
        pub jump_type: u32,
        pub max_jump_inertial_movement_speed: u32,
        pub max_jump_height: u32,
        pub min_jump_inertial_movement_speed: u32,
        pub min_jump_height: u32,
    }
}

record! {
    /// Projectile spawn.
    pub struct Shot {
        pub execution_time: u16,
        pub execution_time_double: u16,
        pub parallel_execution: u8,
        pub sound_effect: u16,
        pub play_if_outside_screen: u8,
        pub animation: u16,
        pub unknown_11_30: Bytes<20>,
        pub number_of_shots_fired: u8,
        pub formation: u8,
        pub firing_parameter1: u16,
        pub firing_parameter2: u16,
        pub firing_parameter3: u16,
        pub target: u8,
        pub direction: u8,
        pub set_angle_to_target: u8,
        pub firing_target: u8,
        pub angle_offset: u16,
        pub angle_offset_double: u16,
        pub angle_offset_reverse_rotation_if_facing_right: u8,
        pub angle_dispersion: u16,
        pub change_firing_position_according_to_angle: u8,
        pub number_of_doubles: u8,
        pub firing_position_offset_x: u16,
        pub firing_position_offset_x_double: u16,
        pub firing_position_offset_y: u16,
        pub firing_position_offset_y_double: u16,
        pub firing_position_offset_x_flip_if_facing_right: u8,
        pub firing_position_offset_y_flip_if_facing_right: u8,
        pub graphic: u16,
        pub z_coordinate: u8,
        pub transparency: u8,
        pub faction_same_as_user: u8,
        pub faction: u16,
        pub gigantic: u16,
        pub movement_type: u8,
        pub movement_type_parameter1: u16,
        pub movement_type_parameter2: u16,
        pub movement_type_parameter3: u16,
        pub movement_target: u8,
        pub synchronize_with_auto_scroll: u8,
        pub speed: u16,
        pub speed_double: u16,
        pub acceleration_enabled: u8,
        pub acceleration: u16,
        pub acceleration_double: u16,
        pub flight_distance: u16,
        pub flight_distance_valid: u8,
        pub flight_distance_double: u16,
        pub flight_distance_does_not_disappear_at_end: u8,
        pub disappearance_time_valid: u8,
        pub disappearance_time: u16,
        pub disappearance_time_double: u16,
        pub penetrate_blocks: u8,
        pub penetrate_actors: u8,
        pub penetrate_block_actors: u8,
        pub disappear_on_hitting_shot: u8,
        pub value_for_disappearing_on_hitting_shot: u8,
        pub power: u32,
        pub unknown_109_110: Bytes<2>,
        pub impact: u8,
        pub effect: u16,
        pub acquired_item_palette_type: u8,
        pub acquired_item_palette_number: u16,
        pub unknown_117_125: Bytes<9>,
        pub attack: u8,
        pub attack_id: u8,
        pub unknown_128_143: Bytes<16>,
    }
}

record! {
    pub struct Sword {
        pub execution_time: u32,
        pub parallel_execution: u8,
        pub sound_effect: u16,
        pub play_if_outside_screen: u8,
        pub animation: u16,
        pub unknown_11_63: Bytes<53>,
        pub z_coordinate: u8,
        pub transparency: u8,
        pub faction_same_as_user: u8,
        pub faction: u16,
        pub gigantic: u16,
        pub sword_type: u32,
        pub unknown_75_104: Bytes<30>,
        pub power: u32,
        pub unknown_109_110: Bytes<2>,
        pub impact: u8,
        pub effect: u16,
        pub acquired_item_palette_type: u8,
        pub acquired_item_palette_number: u16,
        pub unknown_117_125: Bytes<9>,
        pub attack: u8,
        pub attack_id: u8,
        pub unknown_128_143: Bytes<16>,
    }
}

record! {
    /// Block or character summon.
    pub struct Summon {
        pub execution_time: u16,
        pub execution_time_double: u16,
        pub parallel_execution: u8,
        pub sound_effect: u16,
        pub play_sound_effect_if_outside_screen: u8,
        pub animation: u8,
        pub unknown_10_30: Bytes<21>,
        pub count: u8,
        pub formation: u8,
        pub interval: u16,
        pub number_of_columns: u16,
        pub column_interval: u16,
        pub target: u8,
        pub direction: u8,
        pub unknown_41: u8,
        pub target2: u8,
        pub unknown_43_51: Bytes<9>,
        pub summon_position_offset_x: u32,
        pub summon_position_offset_y: u32,
        pub summon_position_offset_x_flip: u8,
        pub summon_position_offset_y_flip: u8,
        pub unknown_62_66: Bytes<5>,
        pub faction: u8,
        pub unknown_68_88: Bytes<21>,
        pub existence_time: u16,
        pub existence_time_present: u8,
        pub unknown_92_119: Bytes<28>,
        pub palette_type: u8,
        pub palette_data_number: u16,
        pub faction_specification_method: u8,
        pub set_acquired_score_to_0: u8,
        pub direction_flip: u8,
        pub attack: u8,
        pub attack_flow: u8,
        pub unknown_128_143: Bytes<16>,
        pub return_value_to_flow_variable: u8,
        pub unknown_145_147: Bytes<3>,
    }
}

record! {
    /// Item summon: the summon layout without the trailing return slot.
    pub struct ItemSummon {
        pub execution_time: u16,
        pub execution_time_double: u16,
        pub parallel_execution: u8,
        pub sound_effect: u16,
        pub play_sound_effect_if_outside_screen: u8,
        pub animation: u8,
        pub unknown_10_30: Bytes<21>,
        pub count: u8,
        pub formation: u8,
        pub interval: u16,
        pub number_of_columns: u16,
        pub column_interval: u16,
        pub target: u8,
        pub direction: u8,
        pub unknown_41: u8,
        pub target2: u8,
        pub unknown_43_51: Bytes<9>,
        pub summon_position_offset_x: u32,
        pub summon_position_offset_y: u32,
        pub summon_position_offset_x_flip: u8,
        pub summon_position_offset_y_flip: u8,
        pub unknown_62_66: Bytes<5>,
        pub faction: u8,
        pub unknown_68_88: Bytes<21>,
        pub existence_time: u16,
        pub existence_time_present: u8,
        pub unknown_92_119: Bytes<28>,
        pub palette_type: u8,
        pub palette_data_number: u16,
        pub faction_specification_method: u8,
        pub set_acquired_score_to_0: u8,
        pub direction_flip: u8,
        pub attack: u8,
        pub attack_flow: u8,
        pub unknown_128_143: Bytes<16>,
    }
}

record! {
    /// Start, stop or query another flow, optionally behind conditions.
    pub struct FlowOperation {
        pub unknown_1_34: Bytes<34>,
        pub condition_present: u8,
        pub judgment_type: u8,
        pub unknown_37_40: Bytes<4>,
        pub conditions: Vec<BasicCondition>,
        pub unknown_45_52: Bytes<8>,
        pub operation: u32,
        pub target_flow: u32,
        pub id: u32,
        pub target_character: u32,
        pub assign_return_value_to_flow_variable: u32,
    }
}

record! {
    pub struct Warp {
        pub unknown_1_26: Bytes<26>,
        pub setting_type: u8,
        pub direction: u8,
        pub unknown_29_33: Bytes<5>,
        pub target_x_present: u8,
        pub target_y_present: u8,
        pub target_x_bl: u16,
        pub target_y_bl: u16,
        pub target_x_dot: u16,
        pub target_y_dot: u16,
        pub target_type: u8,
        pub target_unit: u8,
        pub gigantic_character_coordinate_position: u8,
        pub unknown_47_49: Bytes<3>,
        pub target_x_flip_if_facing_right: u8,
        pub target_y_flip_if_facing_right: u8,
        pub unknown_52_59: Bytes<8>,
        pub distance: u16,
        pub distance_double: u16,
        pub unknown_64_101: Bytes<38>,
        pub assign_return_value_to_flow: u32,
    }
}

record! {
    pub struct TargetSetting {
        pub unknown_1_38: Bytes<38>,
        pub unknown_39_106: Bytes<68>,
    }
}

record! {
    /// Arithmetic on a variable or status.
    pub struct StatusOperation {
        pub unknown_1_38: Bytes<38>,
        pub operation_target_type: u8,
        pub unknown_40_43: Bytes<4>,
        pub operation_target_variable_type: u8,
        pub unknown_45_46: Bytes<2>,
        pub operation_target_variable_number: u16,
        pub unknown_49_52: Bytes<4>,
        pub operation_target_target: u8,
        pub unknown_54_56: Bytes<3>,
        pub operation_target_status: u8,
        pub unknown_58: Bytes<1>,
        pub operation_target_flow_variable_number: u8,
        pub unknown_60_62: Bytes<3>,
        pub operator_type: u8,
        pub unknown_64_66: Bytes<3>,
        pub calculation_content_type: u32,
        pub calculation_content_constant: u32,
        pub calculation_content_random_lower_limit: u32,
        pub calculation_content_random_upper_limit: u32,
        pub calculation_content_variable_type: u32,
        pub calculation_content_variable_number: u32,
        pub calculation_content_target: u32,
        pub calculation_content_status: u32,
        pub calculation_content_flow_variable_number: u32,
        pub unknown_103_138: Bytes<36>,
    }
}

record! {
    pub struct StatusOperation2 {
        pub unknown_1_38: Bytes<38>,
        pub target: u32,
        pub status: u32,
        pub on: u32,
        pub unknown_51_62: Bytes<12>,
    }
}

record! {
    pub struct Disappearance {
        pub unknown_1_38: Bytes<38>,
        pub target: u32,
        pub faction: u32,
        pub range: u32,
        pub assign_return_value_to_flow_variable: u32,
    }
}

record! {
    pub struct ItemAcquisition {
        pub unknown_1_38: Bytes<38>,
        pub palette_type: u32,
        pub palette_data_number: u32,
    }
}

record! {
    pub struct GraphicChange {
        pub unknown_1_38: Bytes<38>,
        pub image_type: u32,
        pub image_number: u32,
        pub offset: u32,
    }
}

record! {
    pub struct BasicAnimationSetChange {
        pub unknown_1_38: Bytes<38>,
        pub animation_set: u32,
    }
}

record! {
    pub struct AnimationExecution {
        pub execution_time: u16,
        pub execution_time_double: u16,
        pub parallel_execution: u8,
        pub unknown_6_46: Bytes<41>,
    }
}

record! {
    pub struct EffectExecution {
        pub unknown_1_38: Bytes<38>,
        pub unknown_39_78: Bytes<40>,
    }
}

record! {
    /// Character or screen effect playback.
    pub struct EffectInvocation {
        pub unknown_1_38: Bytes<38>,
        pub effect: u32,
        pub execution_type: u32,
        pub loop_execution: u32,
    }
}

record! {
    pub struct PictureDisplay {
        pub execution_time: u16,
        pub execution_time_double: u16,
        pub parallel_execution: u8,
        pub unknown_6_118: Bytes<113>,
    }
}

record! {
    pub struct ScreenColorChange {
        pub unknown_1_38: Bytes<38>,
        pub r: u32,
        pub g: u32,
        pub b: u32,
        pub percent: u32,
        pub restore_to_original_color: u32,
        pub time_required_for_change: u32,
        pub instant_display: u32,
        pub instant_display_count: u32,
    }
}

record! {
    pub struct BackgroundChange {
        pub execution_time: u16,
        pub execution_time_double: u16,
        pub parallel_execution: u8,
        pub unknown_6_46: Bytes<41>,
    }
}

record! {
    pub struct SoundEffectPlayback {
        pub unknown_1_7: Bytes<7>,
        pub play_if_outside_screen: u8,
        pub unknown_9_38: Bytes<30>,
        pub sound_effect: u32,
    }
}

record! {
    pub struct BgmPlayback {
        pub execution_time: u16,
        pub execution_time_double: u16,
        pub parallel_execution: u8,
        pub unknown_6_46: Bytes<41>,
    }
}

record! {
    /// Inline script source.
    pub struct CodeExecution {
        pub execution_time: u16,
        pub execution_time_double: u16,
        pub parallel_execution: u8,
        pub unknown_6_14: Bytes<9>,
        pub code: String,
        pub unknown_19_38: Bytes<20>,
    }
}

record! {
    pub struct Arrangement {
        pub unknown_1_38: Bytes<38>,
        pub command: u32,
        pub parameter: u32,
        pub operator_type: u32,
        pub variable_type: u32,
        pub variable_number: u32,
    }
}

record! {
    pub struct Loop {
        pub unknown_1_38: Bytes<38>,
        pub repeat_count: u32,
        pub command_count: u32,
    }
}
