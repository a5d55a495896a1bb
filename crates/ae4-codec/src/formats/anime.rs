//! Animation catalogs (`Anime.dat`, `AnimeSet.dat`).
//!
//! Animation names use sized text: the stored length always equals the
//! body size, including for empty names.

use crate::codec::{Pinned, SizedText};
use crate::record;

record! {
    pub struct Frame {
        pub header: u32,
        pub frame_index: u32,
        pub display_time: u32,
        pub exec_commands: u32,
        pub unknown2: u32,
    }
}

record! {
    /// A named frame sequence cut from one sample sheet.
    pub struct Animation {
        pub header: u32,
        pub sample_list_index: u16,
        pub sample_type: u8,
        pub frame_start: u16,
        #[serde(skip)]
        pub strings_count: Pinned<1>,
        pub name: SizedText,
        pub frames: Vec<Frame>,
    }
}

record! {
    /// Animation set with the frame offsets of its special states.
    pub struct AnimeSetElement {
        pub header: u32,
        pub invincibility_offset: u32,
        pub block_offset: u32,
        pub flying_offset: u32,
        #[serde(skip)]
        pub strings_count: Pinned<1>,
        pub name: SizedText,
        pub animations: Vec<Animation>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;
    use crate::cursor::ByteCursor;
    use crate::formats::Catalog;

    #[test]
    fn test_empty_name_keeps_body_byte() {
        let mut cur = ByteCursor::append();
        Animation::default().encode(&mut cur).unwrap();
        let bytes = cur.finish();
        // header, u16, u8, u16, pinned count, then length 1 and a lone NUL
        assert_eq!(&bytes[9..13], &[1, 0, 0, 0]);
        assert_eq!(&bytes[13..18], &[1, 0, 0, 0, 0]);
        assert_eq!(bytes.len(), 22);
    }

    #[test]
    fn test_animation_set_roundtrip() {
        let catalog = Catalog {
            version: 0xB6,
            elements: vec![AnimeSetElement {
                header: 1,
                flying_offset: 4,
                name: SizedText("歩き".to_string()),
                animations: vec![Animation {
                    sample_type: 2,
                    name: SizedText("walk".to_string()),
                    frames: vec![
                        Frame {
                            frame_index: 0,
                            display_time: 5,
                            ..Frame::default()
                        },
                        Frame {
                            frame_index: 1,
                            display_time: 5,
                            ..Frame::default()
                        },
                    ],
                    ..Animation::default()
                }],
                ..AnimeSetElement::default()
            }],
        };
        let mut cur = ByteCursor::append();
        catalog.encode(&mut cur).unwrap();
        let bytes = cur.finish();
        let mut reader = ByteCursor::fixed(bytes);
        let decoded = Catalog::<AnimeSetElement>::decode(&mut reader).unwrap();
        assert!(reader.is_exhausted());
        assert_eq!(decoded, catalog);
    }
}
