//! Palette entries: reusable block, character and item definitions.

use crate::codec::{LossyNames, NameSlot};
use crate::flow::{BasicCondition, Flow};
use crate::payload::ItemEffect;
use crate::record;

record! {
    pub struct Block {
        pub header: u32,
        pub inherit_palette: u8,
        pub inherit_palette_data: u16,
        pub any_of_appearance_conditions_true: u8,
        pub appearance_condition_once_met_always_true: u8,
        pub image_number: u16,
        pub image_type: u16,
        pub unknown1: u8,
        pub in_front_of_character: u8,
        pub transparency: u8,
        pub mark_display: u8,
        pub mark_number: u8,
        pub unknown2: u8,
        pub block_type: u8,
        pub invalid_faction: u8,
        pub action: u8,
        pub action_parameter: u32,
        pub acquired_item_palette: u8,
        pub acquired_item_palette_data_number: u16,
        pub block_summon_invalid: u8,
        pub name: NameSlot,
        pub position_x: i16,
        pub position_y: i16,
        pub inherited_data_count: u32,
        pub inherit_block_name: u8,
        pub inherit_appearance_condition: u8,
        pub inherit_image: u8,
        pub inherit_in_front_of_character: u8,
        pub inherit_transparency: u8,
        pub inherit_mark: u8,
        pub inherit_block_type: u8,
        pub inherit_invalid_faction: u8,
        pub inherit_action: u8,
        pub inherit_acquired_item: u8,
        pub inherit_block_summon: u8,
        pub display_conditions: Vec<BasicCondition>,
    }
}

record! {
    /// Enemy, player or NPC definition with its event flows.
    ///
    /// Only the first stored name survives a round trip.
    pub struct Character {
        pub header: u32,
        pub inherit_palette: u8,
        pub inherit_palette_data_number: u16,
        pub any_of_appearance_conditions_true: u8,
        pub appearance_condition_once_met_always_true: u8,
        pub facing_right: u8,
        pub number_of_doubles: u8,
        pub appearance_position_offset_x_bl: u16,
        pub appearance_position_offset_x_dot: u16,
        pub appearance_position_offset_y_bl: u16,
        pub appearance_position_offset_y_dot: u16,
        pub appearance_position_offset_x_flip_if_facing_right: u8,
        pub appearance_position_offset_y_flip_if_facing_right: u8,
        pub image_number: u16,
        pub image_type: u8,
        pub image_offset: u16,
        pub animation_set: u16,
        pub z_coordinate: u8,
        pub transparency: u8,
        pub initial_character_effect: u16,
        pub initial_character_effect_execution_type: u8,
        pub initial_character_effect_loop_execution: u8,
        pub character_effect_on_death: u16,
        pub character_effect_on_death_execution_type: u8,
        pub mark_display: u8,
        pub mark_number: u16,
        pub operation: u16,
        pub faction: u8,
        pub character_id: u8,
        pub flying: u8,
        pub direction_fixed: u8,
        pub invincible: u8,
        pub invincible_effect: u8,
        pub block: u8,
        pub gigantic: u8,
        pub synchronize_with_auto_scroll: u8,
        pub line_of_sight: u8,
        pub line_of_sight_range: u8,
        pub hp: u32,
        pub sp: u32,
        pub stopping_ease_during_inertial_movement: u16,
        pub body_hit_detection_range: u8,
        pub body_hit_power: u32,
        pub body_hit_impact: u8,
        pub body_hit_effect: u16,
        pub defense: u32,
        pub impact_resistance: u8,
        pub score: u32,
        pub holds_item_at_same_position: u8,
        pub has_group: u8,
        pub group_number: u16,
        pub action_condition_range: u8,
        pub action_condition_judgment_type: u8,
        pub character_name: LossyNames,
        pub position_x: u16,
        pub position_y: u16,
        pub some_count: i32,
        pub inherited_data_count: u32,
        pub inherit_character_name: u8,
        pub inherit_operation: u8,
        pub inherit_faction: u8,
        pub inherit_character_id: u8,
        pub inherit_appearance_condition: u8,
        pub inherit_facing_right: u8,
        pub inherit_number_of_doubles: u8,
        pub inherit_initial_position_offset_x: u8,
        pub inherit_initial_position_offset_y: u8,
        pub inherit_image: u8,
        pub inherit_animation_set: u8,
        pub inherit_z_coordinate: u8,
        pub inherit_transparency: u8,
        pub inherit_initial_character_effect: u8,
        pub inherit_character_effect_on_death: u8,
        pub inherit_mark: u8,
        pub inherit_direction_fixed: u8,
        pub inherit_flying: u8,
        pub inherit_invincible: u8,
        pub inherit_block: u8,
        pub inherit_gigantic: u8,
        pub inherit_synchronize_with_auto_scroll: u8,
        pub inherit_line_of_sight: u8,
        pub inherit_hp: u8,
        pub inherit_sp: u8,
        pub inherit_body_hit_detection_range: u8,
        pub inherit_body_hit_power: u8,
        pub inherit_body_hit_impact: u8,
        pub inherit_body_hit_effect: u8,
        pub inherit_defense: u8,
        pub inherit_impact_resistance: u8,
        pub inherit_stopping_ease_during_inertial_movement: u8,
        pub inherit_action_condition: u8,
        pub inherit_group: u8,
        pub inherit_score: u8,
        pub inherit_holds_item_at_same_position: u8,
        pub inherit_action: u8,
        pub conditions: Vec<BasicCondition>,
        pub flows: Vec<Flow>,
    }
}

record! {
    pub struct Item {
        pub header: u32,
        pub inherit_palette: u8,
        pub inherit_palette_data_number: u16,
        pub any_of_appearance_conditions_true: u8,
        pub appearance_condition_once_met_always_true: u8,
        pub appearance_position_offset_x_dot: u16,
        pub appearance_position_offset_y_dot: u16,
        pub image_number: u16,
        pub image_type: u8,
        pub frame: u16,
        pub z_coordinate: u8,
        pub transparency: u8,
        pub mark_display: u8,
        pub mark_number: u16,
        pub display_above_head_on_acquisition: u8,
        pub acquisition_type: u8,
        pub gigantic: u8,
        pub sound_effect: u16,
        pub item_name: NameSlot,
        pub position_x: u16,
        pub position_y: u16,
        pub number_of_inherited_data: u32,
        pub inherit_item_name: u8,
        pub inherit_appearance_condition: u8,
        pub inherit_initial_position_offset_x: u8,
        pub inherit_initial_position_offset_y: u8,
        pub inherit_image: u8,
        pub inherit_z_coordinate: u8,
        pub inherit_transparency: u8,
        pub inherit_mark: u8,
        pub inherit_gigantic: u8,
        pub inherit_acquisition_type: u8,
        pub inherit_display_above_head_on_acquisition: u8,
        pub inherit_sound_effect: u8,
        pub inherit_effect: u8,
        pub conditions: Vec<BasicCondition>,
        pub item_effects: Vec<ItemEffect>,
    }
}

record! {
    /// The three placeable catalogs of a stage palette.
    pub struct Palette {
        pub blocks: Vec<Block>,
        pub characters: Vec<Character>,
        pub items: Vec<Item>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;
    use crate::cursor::ByteCursor;
    use crate::payload::{Command, CommandKind, ItemEffectKind, Loop, Wait};

    fn roundtrip<T: Codec + PartialEq + std::fmt::Debug>(value: &T) -> Vec<u8> {
        let mut cur = ByteCursor::append();
        value.encode(&mut cur).unwrap();
        let bytes = cur.finish();
        let mut reader = ByteCursor::fixed(bytes.clone());
        let decoded = T::decode(&mut reader).unwrap();
        assert!(reader.is_exhausted());
        assert_eq!(&decoded, value);
        bytes
    }

    #[test]
    fn test_block_roundtrip() {
        let block = Block {
            header: 3,
            name: NameSlot("レンガ".to_string()),
            position_x: -4,
            image_type: 2,
            display_conditions: vec![BasicCondition::default()],
            ..Block::default()
        };
        roundtrip(&block);
    }

    #[test]
    fn test_block_without_name_slot() {
        let mut bytes = {
            let mut cur = ByteCursor::append();
            Block::default().encode(&mut cur).unwrap();
            cur.finish()
        };
        // name slot starts after the 30 fixed bytes: count 1, length 1
        assert_eq!(&bytes[30..38], &[1, 0, 0, 0, 1, 0, 0, 0]);
        // a zero count carries no string at all
        bytes.splice(30..38, [0, 0, 0, 0]);
        let decoded = Block::decode(&mut ByteCursor::fixed(bytes)).unwrap();
        assert_eq!(decoded, Block::default());
    }

    #[test]
    fn test_character_with_flows() {
        let character = Character {
            hp: 30,
            character_name: LossyNames("スライム".to_string()),
            some_count: -1,
            flows: vec![Flow {
                id: 1,
                commands: vec![
                    Command::new(CommandKind::Wait(Wait::default())),
                    Command::new(CommandKind::Loop(Loop::default())),
                ],
                ..Flow::default()
            }],
            ..Character::default()
        };
        roundtrip(&character);
    }

    #[test]
    fn test_item_with_effects() {
        let item = Item {
            item_name: NameSlot("コイン".to_string()),
            item_effects: vec![ItemEffect {
                aux: -1,
                payload: ItemEffectKind::Loop(Loop::default()),
            }],
            ..Item::default()
        };
        roundtrip(&item);
    }

    #[test]
    fn test_empty_palette() {
        assert_eq!(roundtrip(&Palette::default()), vec![0; 12]);
    }
}
