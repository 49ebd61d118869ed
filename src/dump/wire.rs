//! Field-level scan of a protobuf payload.
//!
//! prost decodes into the typed messages in [`crate::pb`] and discards any
//! field they do not declare. [`scan`] walks the same buffer key by key so
//! the decoder can tell which top-level fields the typed view lost.

use std::fmt;

use prost::encoding::{decode_key, decode_varint, WireType};
use serde::Serialize;

/// Value of one field as it appears on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "wire_type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Varint(u64),
    Fixed64(u64),
    Fixed32(u32),
    LengthDelimited(Vec<u8>),
}

/// One top-level field: tag, value, and encoded size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Field {
    pub tag: u32,
    #[serde(flatten)]
    pub value: FieldValue,
    /// Bytes occupied on the wire, key included.
    #[serde(skip)]
    pub len: usize,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            FieldValue::Varint(v) => write!(f, "#{} varint {}", self.tag, v),
            FieldValue::Fixed64(v) => write!(f, "#{} fixed64 {:#018x}", self.tag, v),
            FieldValue::Fixed32(v) => write!(f, "#{} fixed32 {:#010x}", self.tag, v),
            FieldValue::LengthDelimited(bytes) => {
                write!(f, "#{} bytes[{}] {}", self.tag, bytes.len(), hex(bytes))
            }
        }
    }
}

/// Split `buf` into its top-level fields, in wire order.
///
/// Groups are rejected; no dump message uses them.
pub fn scan(buf: &[u8]) -> Result<Vec<Field>, String> {
    let mut rest = buf;
    let mut fields = Vec::new();

    while !rest.is_empty() {
        let before = rest.len();
        let (tag, wire_type) = decode_key(&mut rest).map_err(|e| e.to_string())?;
        let value = match wire_type {
            WireType::Varint => {
                FieldValue::Varint(decode_varint(&mut rest).map_err(|e| e.to_string())?)
            }
            WireType::SixtyFourBit => {
                let mut b = [0u8; 8];
                b.copy_from_slice(take(&mut rest, 8, tag)?);
                FieldValue::Fixed64(u64::from_le_bytes(b))
            }
            WireType::ThirtyTwoBit => {
                let mut b = [0u8; 4];
                b.copy_from_slice(take(&mut rest, 4, tag)?);
                FieldValue::Fixed32(u32::from_le_bytes(b))
            }
            WireType::LengthDelimited => {
                let len = decode_varint(&mut rest).map_err(|e| e.to_string())?;
                let len = usize::try_from(len)
                    .map_err(|_| format!("field {}: length {} out of range", tag, len))?;
                FieldValue::LengthDelimited(take(&mut rest, len, tag)?.to_vec())
            }
            WireType::StartGroup | WireType::EndGroup => {
                return Err(format!("field {}: group wire type is not supported", tag));
            }
        };
        fields.push(Field {
            tag,
            value,
            len: before - rest.len(),
        });
    }

    Ok(fields)
}

/// Lowercase hex, two digits per byte.
pub fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn take<'a>(rest: &mut &'a [u8], n: usize, tag: u32) -> Result<&'a [u8], String> {
    if rest.len() < n {
        return Err(format!(
            "field {}: needs {} bytes, {} left",
            tag,
            n,
            rest.len()
        ));
    }
    let (head, tail) = rest.split_at(n);
    *rest = tail;
    Ok(head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_every_wire_type() {
        let buf = [
            0x08, 0x96, 0x01, // #1 varint 150
            0x11, 1, 0, 0, 0, 0, 0, 0, 0, // #2 fixed64 1
            0x1d, 2, 0, 0, 0, // #3 fixed32 2
            0x22, 0x02, 0xab, 0xcd, // #4 bytes
        ];
        let fields = scan(&buf).unwrap();
        let values: Vec<_> = fields.iter().map(|f| (f.tag, f.value.clone(), f.len)).collect();
        assert_eq!(
            values,
            vec![
                (1, FieldValue::Varint(150), 3),
                (2, FieldValue::Fixed64(1), 9),
                (3, FieldValue::Fixed32(2), 5),
                (4, FieldValue::LengthDelimited(vec![0xab, 0xcd]), 4),
            ]
        );
        assert_eq!(fields.iter().map(|f| f.len).sum::<usize>(), buf.len());
    }

    #[test]
    fn test_scan_rejects_short_length_delimited() {
        assert!(scan(&[0x22, 0x05, 0x01]).is_err());
    }

    #[test]
    fn test_scan_rejects_groups() {
        assert!(scan(&[0x0b, 0x0c]).is_err());
    }

    #[test]
    fn test_display() {
        let field = Field {
            tag: 9,
            value: FieldValue::Varint(5),
            len: 2,
        };
        assert_eq!(field.to_string(), "#9 varint 5");
        let field = Field {
            tag: 12,
            value: FieldValue::LengthDelimited(vec![0x0a, 0xff]),
            len: 4,
        };
        assert_eq!(field.to_string(), "#12 bytes[2] 0aff");
    }
}
