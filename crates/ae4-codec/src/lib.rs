//! ActionEditor4 binary file codec.
//!
//! This crate reads and writes the binary stage, palette and database files
//! of the ActionEditor4 game maker, and maps them to a structured form that
//! round-trips through JSON.
//!
//! # Features
//!
//! - Bounds-checked little-endian cursor over a byte buffer
//! - Shift-JIS text with lossy decode and lossy encode
//! - Declarative records whose field order is the wire order
//! - Tagged command and item-effect payloads with byte-exact layouts
//! - Recursive event flows with a configurable nesting limit
//! - Chunked tile grids for world maps
//! - Version checks per format family
//!
//! # Example
//!
//! ```no_run
//! use ae4_codec::{DecodeOptions, Document, FormatKind};
//!
//! let kind = FormatKind::detect("stage1.stg4_1020").unwrap();
//! let stage = Document::load("stage1.stg4_1020", kind, &DecodeOptions::default()).unwrap();
//! println!("version {}", stage.version());
//!
//! let json = stage.to_json_string().unwrap();
//! let rebuilt = Document::from_json_str(&json).unwrap();
//! rebuilt.save("stage1_copy.stg4_1020").unwrap();
//! ```
//!
//! # Record model
//!
//! Every on-disk structure is declared with [`record!`]:
//!
//! ```
//! use ae4_codec::{record, ByteCursor, Codec};
//!
//! record! {
//!     pub struct Hitbox {
//!         pub width: u32,
//!         pub height: u32,
//!     }
//! }
//!
//! let mut cur = ByteCursor::fixed(vec![16, 0, 0, 0, 32, 0, 0, 0]);
//! let hitbox = Hitbox::decode(&mut cur).unwrap();
//! assert_eq!((hitbox.width, hitbox.height), (16, 32));
//! ```

pub mod chunk;
pub mod codec;
mod cursor;
mod document;
pub mod envelope;
mod error;
pub mod flow;
pub mod formats;
pub mod palette;
pub mod payload;
pub mod text;

// Re-export error types
pub use error::{CodecError, Result};

// Re-export the cursor and field codecs
pub use codec::{Bytes, Codec, CountOr, LossyNames, NameSlot, Pinned, SizedText, ZeroText};
pub use cursor::{ByteCursor, DEFAULT_MAX_DEPTH};

// Re-export documents
pub use document::{DecodeOptions, Document, rebuild_file_name};
pub use formats::{FormatKind, UnknownFormat};

// Re-export the structures most callers touch
pub use flow::{BasicCondition, Flow, KeyCondition};
pub use palette::{Block, Character, Item, Palette};
pub use payload::{Command, CommandKind, ItemEffect, ItemEffectKind};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
