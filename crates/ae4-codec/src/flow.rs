//! Event flows and their conditions.
//!
//! A [`Flow`] is a scripted event: metadata switches, a memo, the conditions
//! that trigger it and the commands it runs. Flows nest through
//! [`ItemEffectKind::FlowChange`](crate::payload::ItemEffectKind::FlowChange),
//! so decoding is recursive and bounded by the cursor's depth limit.

use serde::{Deserialize, Serialize};

use crate::codec::{Codec, Pinned};
use crate::cursor::ByteCursor;
use crate::error::{CodecError, Result};
use crate::payload::Command;
use crate::record;

/// Control constant that opens every flow.
pub const FLOW_HEADER: u32 = 10;

record! {
    /// Comparison between two operands (variables, statuses or constants).
    pub struct BasicCondition {
        pub header: u32,
        pub r#type: u8,
        pub right_side_constant: u32,
        pub right_side_random_lower_limit: u32,
        pub right_side_random_upper_limit: u32,
        pub left_side_status_target: u8,
        pub left_side_status_number: u8,
        pub left_side_type: u8,
        pub left_side_common_variable_or_stage_variable: u8,
        pub left_side_variable_number: u16,
        pub left_side_flow_variable_number: u8,
        pub right_side_type: u8,
        pub right_side_status_target: u8,
        pub right_side_status_number: u8,
        pub right_side_common_variable_or_stage_variable: u8,
        pub right_side_variable_number: u16,
        pub right_side_flow_variable_number: u8,
        pub how_to_compare: u8,
        pub specify_in_percent: u8,
        pub left_side_coordinate_type: u8,
        pub right_side_coordinate_type: u8,
        pub left_side_gigantic_character_coordinate_position: u8,
        pub right_side_gigantic_character_coordinate_position: u8,
        pub unk1: u8,
        pub unk2: u8,
        pub unk3: u8,
        pub unk4: u8,
        pub unk5: u8,
    }
}

record! {
    /// Key-input trigger.
    pub struct KeyCondition {
        pub header: u32,
        pub right_and_left_to_front_and_back: u8,
        pub minimum_input_time: u16,
        pub maximum_input_time: u16,
        pub input_time_1_to_infinity: u8,
        pub judgment_type: u8,
        pub unknown: u32,
        pub number_of_key_data: u32,
        pub direction_key_neutral: u8,
        pub left_key: u8,
        pub right_key: u8,
        pub up_key: u8,
        pub down_key: u8,
        pub up_left_key: u8,
        pub down_left_key: u8,
        pub up_right_key: u8,
        pub down_right_key: u8,
        pub any_direction_key: u8,
        pub action_key_neutral: u8,
        pub z_key: u8,
        pub x_key: u8,
        pub c_key: u8,
        pub v_key: u8,
        pub a_key: u8,
        pub s_key: u8,
        pub d_key: u8,
        pub f_key: u8,
    }
}

/// A scripted event attached to a character or embedded in an item effect.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "record")]
pub struct Flow {
    pub id: u8,
    pub group: u8,
    pub test_play_only: u8,
    pub basic_condition_judgment_type: u8,
    pub basic_condition_once_met_always_met: u8,
    pub timing: u8,
    pub target_character_involved_in_timing: u8,
    pub target_number_of_character_involved_in_timing: u8,
    pub ease_of_input_with_multiple_key_conditions: u8,
    pub allow_continuous_execution_by_holding_key: u8,
    pub memo: String,
    pub conditions: Vec<BasicCondition>,
    pub key_conditions: Vec<KeyCondition>,
    pub commands: Vec<Command>,
}

impl Codec for Flow {
    fn decode(cur: &mut ByteCursor) -> Result<Self> {
        cur.descend(|cur| {
            let offset = cur.position();
            let header = cur.read_u32()?;
            if header != FLOW_HEADER {
                return Err(CodecError::mismatch(offset, "flow header", FLOW_HEADER, header));
            }
            let mut flow = Flow {
                id: cur.read_u8()?,
                group: cur.read_u8()?,
                test_play_only: cur.read_u8()?,
                basic_condition_judgment_type: cur.read_u8()?,
                basic_condition_once_met_always_met: cur.read_u8()?,
                timing: cur.read_u8()?,
                target_character_involved_in_timing: cur.read_u8()?,
                target_number_of_character_involved_in_timing: cur.read_u8()?,
                ease_of_input_with_multiple_key_conditions: cur.read_u8()?,
                allow_continuous_execution_by_holding_key: cur.read_u8()?,
                ..Flow::default()
            };
            // the memo count is not a guard: the memo is always present
            Pinned::<1>::decode(cur)?;
            flow.memo = String::decode(cur)?;
            flow.conditions = Vec::decode(cur)?;
            flow.key_conditions = Vec::decode(cur)?;
            flow.commands = Vec::decode(cur)?;
            tracing::trace!(
                offset,
                id = flow.id,
                commands = flow.commands.len(),
                "decoded flow"
            );
            Ok(flow)
        })
    }

    fn encode(&self, cur: &mut ByteCursor) -> Result<()> {
        cur.write_u32(FLOW_HEADER)?;
        for switch in [
            self.id,
            self.group,
            self.test_play_only,
            self.basic_condition_judgment_type,
            self.basic_condition_once_met_always_met,
            self.timing,
            self.target_character_involved_in_timing,
            self.target_number_of_character_involved_in_timing,
            self.ease_of_input_with_multiple_key_conditions,
            self.allow_continuous_execution_by_holding_key,
        ] {
            cur.write_u8(switch)?;
        }
        Pinned::<1>.encode(cur)?;
        self.memo.encode(cur)?;
        self.conditions.encode(cur)?;
        self.key_conditions.encode(cur)?;
        self.commands.encode(cur)
    }
}
