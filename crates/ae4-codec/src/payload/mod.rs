//! Tagged payloads: commands and item effects.
//!
//! Both share one envelope on disk:
//!
//! ```text
//! u32  header        always 8
//! aux  auxiliary     u8 for commands, i8 for item effects
//! u8   discriminant  selects the payload layout
//! ...  payload
//! ```
//!
//! The two discriminant tables are numbered independently even where they
//! share payload layouts. An unknown discriminant is fatal: without it the
//! payload length cannot be known.

mod shapes;

pub use shapes::{
    AnimationExecution, Arrangement, BackgroundChange, BasicAnimationSetChange, BgmPlayback,
    CodeExecution, DirectionChange, Disappearance, EffectExecution, EffectInvocation, FlowChange,
    FlowOperation, GameWait, GenericMovement, GraphicChange, ItemAcquisition, ItemSummon, Jump,
    LinearMovement, Loop, Message, PictureDisplay, ScreenColorChange, Shot, SoundEffectPlayback,
    StageClear, StatusOperation, StatusOperation2, Summon, Sword, TargetSetting, Warp, Wait,
};

use crate::flow::Flow;

/// Control constant that opens every tagged payload.
pub const PAYLOAD_HEADER: u32 = 8;

/// Declare an enveloped payload type and its discriminant table.
macro_rules! tagged_union {
    (
        $(#[$meta:meta])*
        pub struct $wrapper:ident {
            table: $table:literal,
            aux: $aux:ty => $read_aux:ident / $write_aux:ident,
        }

        $(#[$kind_meta:meta])*
        pub enum $kind:ident {
            $( $code:literal => $variant:ident($shape:ty), )*
        }
    ) => {
        $(#[$kind_meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(tag = "type")]
        pub enum $kind {
            $( $variant($shape), )*
        }

        impl $kind {
            /// On-disk discriminant of this variant.
            pub fn code(&self) -> u8 {
                match self {
                    $( Self::$variant(_) => $code, )*
                }
            }

            /// Every discriminant in the table, in ascending order.
            pub const CODES: &'static [u8] = &[$($code),*];

            fn decode_payload(
                code: u8,
                offset: usize,
                cur: &mut $crate::ByteCursor,
            ) -> $crate::Result<Self> {
                match code {
                    $( $code => Ok(Self::$variant(<$shape as $crate::Codec>::decode(cur)?)), )*
                    other => Err($crate::CodecError::UnknownVariant {
                        offset,
                        table: $table,
                        discriminant: other,
                    }),
                }
            }

            fn encode_payload(&self, cur: &mut $crate::ByteCursor) -> $crate::Result<()> {
                match self {
                    $( Self::$variant(payload) => $crate::Codec::encode(payload, cur), )*
                }
            }
        }

        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $wrapper {
            /// Auxiliary byte carried between header and discriminant.
            pub aux: $aux,
            pub payload: $kind,
        }

        impl $wrapper {
            /// Wrap a payload with a zero auxiliary byte.
            pub fn new(payload: $kind) -> Self {
                Self { aux: 0, payload }
            }
        }

        impl $crate::Codec for $wrapper {
            fn decode(cur: &mut $crate::ByteCursor) -> $crate::Result<Self> {
                let offset = cur.position();
                let header = cur.read_u32()?;
                if header != PAYLOAD_HEADER {
                    return Err($crate::CodecError::mismatch(
                        offset,
                        concat!($table, " header"),
                        PAYLOAD_HEADER,
                        header,
                    ));
                }
                let aux = cur.$read_aux()?;
                let code_offset = cur.position();
                let code = cur.read_u8()?;
                let payload = $kind::decode_payload(code, code_offset, cur)?;
                tracing::trace!(offset, code, table = $table, "decoded payload");
                Ok(Self { aux, payload })
            }

            fn encode(&self, cur: &mut $crate::ByteCursor) -> $crate::Result<()> {
                cur.write_u32(PAYLOAD_HEADER)?;
                cur.$write_aux(self.aux)?;
                cur.write_u8(self.payload.code())?;
                self.payload.encode_payload(cur)
            }
        }
    };
}

tagged_union! {
    /// One step of a flow script.
    pub struct Command {
        table: "command",
        aux: u8 => read_u8 / write_u8,
    }

    /// Command payload, keyed by the command discriminant.
    pub enum CommandKind {
        1 => Wait(Wait),
        2 => LinearMovement(LinearMovement),
        3 => GroundMovement(GenericMovement),
        4 => CircularMovement(GenericMovement),
        5 => ChargeMovement(GenericMovement),
        6 => GuidedMovement(GenericMovement),
        7 => ScreenOutsideAvoidanceMovement(GenericMovement),
        8 => MovementInvalidation(GenericMovement),
        9 => DirectionChange(DirectionChange),
        10 => Jump(Jump),
        11 => Shot(Shot),
        12 => Sword(Sword),
        13 => BlockSummon(Summon),
        14 => CharacterSummon(Summon),
        15 => ItemSummon(ItemSummon),
        16 => FlowOperation(FlowOperation),
        17 => StageClear(StageClear),
        18 => GameWait(GameWait),
        19 => Message(Message),
        20 => Warp(Warp),
        21 => TargetSetting(TargetSetting),
        22 => StatusOperation(StatusOperation),
        23 => StatusOperation2(StatusOperation2),
        24 => Disappearance(Disappearance),
        25 => ItemAcquisition(ItemAcquisition),
        26 => GraphicChange(GraphicChange),
        27 => BasicAnimationSetChange(BasicAnimationSetChange),
        28 => AnimationExecution(AnimationExecution),
        29 => EffectExecution(EffectExecution),
        30 => CharacterEffectExecution(EffectInvocation),
        31 => ScreenEffectExecution(EffectInvocation),
        32 => PictureDisplay(PictureDisplay),
        33 => ScreenColorChange(ScreenColorChange),
        34 => BackgroundChange(BackgroundChange),
        35 => SoundEffectPlayback(SoundEffectPlayback),
        36 => BgmPlayback(BgmPlayback),
        37 => CodeExecution(CodeExecution),
        38 => Arrangement(Arrangement),
        39 => Loop(Loop),
    }
}

tagged_union! {
    /// Effect applied when an item is picked up.
    pub struct ItemEffect {
        table: "item effect",
        aux: i8 => read_i8 / write_i8,
    }

    /// Item effect payload, keyed by the item effect discriminant.
    pub enum ItemEffectKind {
        1 => FlowChange(FlowChange),
        2 => StageClear(StageClear),
        3 => GameWait(GameWait),
        4 => Message(Message),
        5 => Warp(Warp),
        7 => StatusOperation(StatusOperation),
        8 => StatusOperation2(StatusOperation2),
        9 => Disappearance(Disappearance),
        10 => ItemAcquisition(ItemAcquisition),
        11 => GraphicChange(GraphicChange),
        12 => BasicAnimationSetChange(BasicAnimationSetChange),
        13 => AnimationExecution(AnimationExecution),
        14 => EffectExecution(EffectExecution),
        15 => CharacterEffectExecution(EffectInvocation),
        16 => ScreenEffectExecution(EffectInvocation),
        17 => PictureDisplay(PictureDisplay),
        18 => ScreenColorChange(ScreenColorChange),
        19 => BackgroundChange(BackgroundChange),
        20 => SoundEffectPlayback(SoundEffectPlayback),
        21 => BgmPlayback(BgmPlayback),
        22 => CodeExecution(CodeExecution),
        23 => Arrangement(Arrangement),
        24 => Loop(Loop),
    }
}

impl ItemEffect {
    /// Flows embedded by a flow-change effect.
    pub fn nested_flows(&self) -> Option<&[Flow]> {
        match &self.payload {
            ItemEffectKind::FlowChange(change) => Some(&change.flows),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Bytes, Codec};
    use crate::cursor::ByteCursor;
    use crate::error::CodecError;

    fn encoded<T: Codec>(value: &T) -> Vec<u8> {
        let mut cur = ByteCursor::append();
        value.encode(&mut cur).unwrap();
        cur.finish()
    }

    #[test]
    fn test_envelope_layout() {
        let command = Command {
            aux: 5,
            payload: CommandKind::Wait(Wait {
                execution_time: 60,
                ..Wait::default()
            }),
        };
        let bytes = encoded(&command);
        assert_eq!(&bytes[..7], &[8, 0, 0, 0, 5, 1, 60]);
        // header, aux, code, then 38 payload bytes
        assert_eq!(bytes.len(), 4 + 1 + 1 + 38);
    }

    #[test]
    fn test_same_shape_different_codes() {
        let message = Message {
            message: "hello".to_string(),
            ..Message::default()
        };
        let command = encoded(&Command::new(CommandKind::Message(message.clone())));
        let effect = encoded(&ItemEffect::new(ItemEffectKind::Message(message)));
        assert_eq!(command[5], 19);
        assert_eq!(effect[5], 4);
        assert_eq!(command[6..], effect[6..]);
    }

    #[test]
    fn test_unknown_command() {
        let bytes = vec![8, 0, 0, 0, 0, 40, 0, 0];
        let err = Command::decode(&mut ByteCursor::fixed(bytes)).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnknownVariant {
                offset: 5,
                table: "command",
                discriminant: 40
            }
        ));
    }

    #[test]
    fn test_item_effect_gap_is_unknown() {
        let bytes = vec![8, 0, 0, 0, 0xff, 6, 0, 0];
        let err = ItemEffect::decode(&mut ByteCursor::fixed(bytes)).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnknownVariant {
                table: "item effect",
                discriminant: 6,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_envelope_header() {
        let bytes = vec![7, 0, 0, 0, 0, 1];
        let err = Command::decode(&mut ByteCursor::fixed(bytes)).unwrap_err();
        assert!(matches!(
            err,
            CodecError::StructuralMismatch {
                what: "command header",
                expected: 8,
                found: 7,
                ..
            }
        ));
    }

    #[test]
    fn test_negative_aux_roundtrip() {
        let effect = ItemEffect {
            aux: -1,
            payload: ItemEffectKind::Loop(Loop {
                repeat_count: 3,
                command_count: 2,
                unknown_1_38: Bytes([7; 38]),
            }),
        };
        let bytes = encoded(&effect);
        assert_eq!(bytes[4], 0xff);
        let decoded = ItemEffect::decode(&mut ByteCursor::fixed(bytes)).unwrap();
        assert_eq!(decoded, effect);
    }

    #[test]
    fn test_json_tags() {
        let command = Command::new(CommandKind::GroundMovement(GenericMovement::default()));
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["payload"]["type"], "GroundMovement");
        assert_eq!(json["payload"]["record"], "GenericMovement");
        let back: Command = serde_json::from_value(json).unwrap();
        assert_eq!(back, command);
    }

    #[test]
    fn test_codes_are_sorted_and_unique() {
        for codes in [CommandKind::CODES, ItemEffectKind::CODES] {
            assert!(codes.windows(2).all(|pair| pair[0] < pair[1]));
        }
        assert_eq!(CommandKind::CODES.len(), 39);
        assert_eq!(ItemEffectKind::CODES.len(), 23);
        assert!(!ItemEffectKind::CODES.contains(&6));
    }
}
