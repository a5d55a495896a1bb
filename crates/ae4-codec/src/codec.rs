//! Field codecs and the record model.
//!
//! Every on-disk structure is a fixed sequence of fields. A field type knows
//! how to move itself through a [`ByteCursor`] by implementing [`Codec`], and
//! the [`record!`](crate::record) macro composes fields into named records
//! whose declaration order is the wire order.

use std::fmt;

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::text;

/// A value with a fixed binary layout.
pub trait Codec: Sized {
    /// Read one value at the cursor position.
    fn decode(cur: &mut ByteCursor) -> Result<Self>;

    /// Write this value at the cursor position.
    fn encode(&self, cur: &mut ByteCursor) -> Result<()>;
}

macro_rules! scalar_codec {
    ($($ty:ty => $read:ident, $write:ident;)*) => {
        $(
            impl Codec for $ty {
                fn decode(cur: &mut ByteCursor) -> Result<Self> {
                    cur.$read()
                }

                fn encode(&self, cur: &mut ByteCursor) -> Result<()> {
                    cur.$write(*self)
                }
            }
        )*
    };
}

scalar_codec! {
    u8 => read_u8, write_u8;
    i8 => read_i8, write_i8;
    u16 => read_u16, write_u16;
    i16 => read_i16, write_i16;
    u32 => read_u32, write_u32;
    i32 => read_i32, write_i32;
    f32 => read_f32, write_f32;
    f64 => read_f64, write_f64;
}

impl Codec for String {
    fn decode(cur: &mut ByteCursor) -> Result<Self> {
        text::read_text(cur)
    }

    fn encode(&self, cur: &mut ByteCursor) -> Result<()> {
        text::write_text(cur, self)
    }
}

impl<T: Codec> Codec for Vec<T> {
    fn decode(cur: &mut ByteCursor) -> Result<Self> {
        read_array(cur, T::decode)
    }

    fn encode(&self, cur: &mut ByteCursor) -> Result<()> {
        write_array(cur, self, T::encode)
    }
}

/// Read a `u32` count followed by that many elements.
pub fn read_array<T>(
    cur: &mut ByteCursor,
    mut element: impl FnMut(&mut ByteCursor) -> Result<T>,
) -> Result<Vec<T>> {
    let count = cur.read_u32()? as usize;
    // a corrupt count must not drive a huge allocation
    let mut items = Vec::with_capacity(count.min(cur.remaining()));
    for _ in 0..count {
        items.push(element(cur)?);
    }
    Ok(items)
}

/// Write the element count followed by every element in order.
pub fn write_array<T>(
    cur: &mut ByteCursor,
    items: &[T],
    mut element: impl FnMut(&T, &mut ByteCursor) -> Result<()>,
) -> Result<()> {
    cur.write_u32(items.len() as u32)?;
    for item in items {
        element(item, cur)?;
    }
    Ok(())
}

// =============================================================================
// Fixed byte blocks
// =============================================================================

/// Opaque fixed-length run of bytes, exported as an array of integers.
#[derive(Clone, PartialEq, Eq)]
pub struct Bytes<const N: usize>(pub [u8; N]);

impl<const N: usize> Default for Bytes<N> {
    fn default() -> Self {
        Self([0; N])
    }
}

impl<const N: usize> fmt::Debug for Bytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<const N: usize> Codec for Bytes<N> {
    fn decode(cur: &mut ByteCursor) -> Result<Self> {
        let mut block = [0u8; N];
        block.copy_from_slice(&cur.read_bytes(N)?);
        Ok(Self(block))
    }

    fn encode(&self, cur: &mut ByteCursor) -> Result<()> {
        cur.write_bytes(&self.0)
    }
}

impl<const N: usize> Serialize for Bytes<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de, const N: usize> Deserialize<'de> for Bytes<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct BlockVisitor<const N: usize>;

        impl<'de, const N: usize> Visitor<'de> for BlockVisitor<N> {
            type Value = Bytes<N>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "an array of {N} bytes")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
                let mut block = [0u8; N];
                for (i, slot) in block.iter_mut().enumerate() {
                    *slot = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(i, &self))?;
                }
                if seq.next_element::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(N + 1, &self));
                }
                Ok(Bytes(block))
            }
        }

        deserializer.deserialize_seq(BlockVisitor::<N>)
    }
}

// =============================================================================
// Normalized counts and name slots
// =============================================================================

/// A `u32` that is read and discarded, then always written as `K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pinned<const K: u32>;

impl<const K: u32> Codec for Pinned<K> {
    fn decode(cur: &mut ByteCursor) -> Result<Self> {
        cur.read_u32()?;
        Ok(Self)
    }

    fn encode(&self, cur: &mut ByteCursor) -> Result<()> {
        cur.write_u32(K)
    }
}

/// A stored count kept as read, except that zero is written as `D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountOr<const D: u32>(pub u32);

impl<const D: u32> Codec for CountOr<D> {
    fn decode(cur: &mut ByteCursor) -> Result<Self> {
        cur.read_u32().map(Self)
    }

    fn encode(&self, cur: &mut ByteCursor) -> Result<()> {
        cur.write_u32(if self.0 == 0 { D } else { self.0 })
    }
}

/// Optional single name: a count, then one string when the count is non-zero.
///
/// Always written back as a count of 1 followed by the string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameSlot(pub String);

impl Codec for NameSlot {
    fn decode(cur: &mut ByteCursor) -> Result<Self> {
        let count = cur.read_u32()?;
        if count == 0 {
            return Ok(Self::default());
        }
        text::read_text(cur).map(Self)
    }

    fn encode(&self, cur: &mut ByteCursor) -> Result<()> {
        cur.write_u32(1)?;
        text::write_text(cur, &self.0)
    }
}

/// A list of names of which only the first survives.
///
/// Every stored string is consumed on read but only the first is kept; the
/// slot is always written back as exactly one string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LossyNames(pub String);

impl Codec for LossyNames {
    fn decode(cur: &mut ByteCursor) -> Result<Self> {
        let count = cur.read_u32()?;
        let mut first = String::new();
        for index in 0..count {
            let name = text::read_text(cur)?;
            if index == 0 {
                first = name;
            } else {
                tracing::trace!(index, discarded = %name, "dropping extra name");
            }
        }
        Ok(Self(first))
    }

    fn encode(&self, cur: &mut ByteCursor) -> Result<()> {
        cur.write_u32(1)?;
        text::write_text(cur, &self.0)
    }
}

/// A name whose body length always matches its stored length.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizedText(pub String);

impl Codec for SizedText {
    fn decode(cur: &mut ByteCursor) -> Result<Self> {
        text::read_sized_text(cur).map(Self)
    }

    fn encode(&self, cur: &mut ByteCursor) -> Result<()> {
        text::write_sized_text(cur, &self.0)
    }
}

/// A string stored with a zero length when empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZeroText(pub String);

impl Codec for ZeroText {
    fn decode(cur: &mut ByteCursor) -> Result<Self> {
        text::read_text(cur).map(Self)
    }

    fn encode(&self, cur: &mut ByteCursor) -> Result<()> {
        text::write_text_or_zero(cur, &self.0)
    }
}

/// Serde adapter keeping non-finite `f64` values through JSON.
///
/// Finite values stay plain numbers. Infinities become `"inf"` / `"-inf"`,
/// the canonical NaN becomes `"NaN"` and any other NaN keeps its bit pattern
/// as `"NaN:0x..."`. Use with `#[serde(with = "crate::codec::lossless_f64")]`.
pub mod lossless_f64 {
    use serde::de::{self, Deserializer};
    use serde::ser::Serializer;
    use serde::Deserialize;

    const NAN_BITS_PREFIX: &str = "NaN:0x";

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            return serializer.serialize_f64(*value);
        }
        let text = if value.is_nan() {
            if value.to_bits() == f64::NAN.to_bits() {
                "NaN".to_string()
            } else {
                format!("{NAN_BITS_PREFIX}{:016x}", value.to_bits())
            }
        } else if value.is_sign_positive() {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
        serializer.serialize_str(&text)
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let text = match Repr::deserialize(deserializer)? {
            Repr::Number(value) => return Ok(value),
            Repr::Text(text) => text,
        };
        match text.as_str() {
            "NaN" => Ok(f64::NAN),
            "inf" => Ok(f64::INFINITY),
            "-inf" => Ok(f64::NEG_INFINITY),
            other => other
                .strip_prefix(NAN_BITS_PREFIX)
                .and_then(|hex| u64::from_str_radix(hex, 16).ok())
                .map(f64::from_bits)
                .filter(|value| value.is_nan())
                .ok_or_else(|| {
                    de::Error::invalid_value(de::Unexpected::Str(other), &"a number, NaN or inf")
                }),
        }
    }
}

/// Declare a record: a struct whose fields are encoded in declaration order.
///
/// ```
/// use ae4_codec::{record, ByteCursor, Codec};
///
/// record! {
///     /// A point on the map.
///     pub struct Point {
///         pub x: u16,
///         pub y: u16,
///     }
/// }
///
/// let mut cur = ByteCursor::append();
/// Point { x: 1, y: 2 }.encode(&mut cur).unwrap();
/// assert_eq!(cur.finish(), vec![1, 0, 2, 0]);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(tag = "record")]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl $crate::Codec for $name {
            fn decode(cur: &mut $crate::ByteCursor) -> $crate::Result<Self> {
                Ok(Self {
                    $( $field: <$ty as $crate::Codec>::decode(cur)?, )*
                })
            }

            fn encode(&self, cur: &mut $crate::ByteCursor) -> $crate::Result<()> {
                $( $crate::Codec::encode(&self.$field, cur)?; )*
                Ok(())
            }
        }
    };
}
