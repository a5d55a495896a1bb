//! Common palette files (`*.cplt4`).

use serde::{Deserialize, Serialize};

use crate::codec::Codec;
use crate::cursor::ByteCursor;
use crate::envelope::VersionFamily;
use crate::error::Result;
use crate::palette::Palette;

/// A standalone palette shared between stages.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "record")]
pub struct PaletteFile {
    pub magic: u32,
    pub unk1: u32,
    pub unk2: u32,
    pub palette: Palette,
}

impl Codec for PaletteFile {
    fn decode(cur: &mut ByteCursor) -> Result<Self> {
        let magic = VersionFamily::StagePalette.read_version(cur)?;
        let unk1 = cur.read_u32()?;
        let unk2 = cur.read_u32()?;
        let palette = Palette::decode(cur)?;
        tracing::debug!(
            magic,
            blocks = palette.blocks.len(),
            characters = palette.characters.len(),
            items = palette.items.len(),
            "decoded palette"
        );
        Ok(Self {
            magic,
            unk1,
            unk2,
            palette,
        })
    }

    fn encode(&self, cur: &mut ByteCursor) -> Result<()> {
        cur.write_u32(self.magic)?;
        cur.write_u32(self.unk1)?;
        cur.write_u32(self.unk2)?;
        self.palette.encode(cur)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::NameSlot;
    use crate::palette::Block;

    #[test]
    fn test_palette_file_roundtrip() {
        let file = PaletteFile {
            magic: 0x03C6,
            unk1: 1,
            unk2: 2,
            palette: Palette {
                blocks: vec![Block {
                    name: NameSlot("床".to_string()),
                    ..Block::default()
                }],
                ..Palette::default()
            },
        };
        let mut cur = ByteCursor::append();
        file.encode(&mut cur).unwrap();
        let bytes = cur.finish();
        assert_eq!(&bytes[..12], &[0xC6, 0x03, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0]);
        let decoded = PaletteFile::decode(&mut ByteCursor::fixed(bytes)).unwrap();
        assert_eq!(decoded, file);
    }

    #[test]
    fn test_empty_palette_file_size() {
        let mut cur = ByteCursor::append();
        PaletteFile {
            magic: 1020,
            ..PaletteFile::default()
        }
        .encode(&mut cur)
        .unwrap();
        assert_eq!(cur.finish().len(), 24);
    }
}
