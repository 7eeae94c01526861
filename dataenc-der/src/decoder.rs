//! Cursor-tracking decoder with typed helpers.

use crate::node::DerNode;
use crate::registry::TagRegistry;
use crate::types::{decode_length, DerTag, DerTagClass};
use crate::universal::UniversalType;
use dataenc_core::{CodecError, CodecResult};

/// TLV decoder over a byte buffer.
///
/// The decoder keeps a position that advances as values are consumed,
/// allowing sequential decoding of several values from one buffer. All
/// failures carry the offending offset and leave no partial results.
pub struct DerDecoder<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> DerDecoder<'a> {
    /// Create a decoder over `buffer`.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Current position in the buffer.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes left after the current position.
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Whether any bytes are left to decode.
    pub fn has_remaining(&self) -> bool {
        self.position < self.buffer.len()
    }

    /// Decode one TLV triplet, returning the tag, the value field and
    /// the total bytes consumed.
    pub fn decode_tlv(&mut self) -> CodecResult<(DerTag, &'a [u8], usize)> {
        let start = self.position;

        let (tag, tag_len) = DerTag::decode(self.buffer, self.position)?;
        let (declared, length_width) = decode_length(self.buffer, self.position + tag_len)?;
        let declared = declared as usize;

        let value_start = start + tag_len + length_width;
        let available = self.buffer.len().saturating_sub(value_start);
        if declared > available {
            return Err(CodecError::TruncatedContent {
                offset: value_start,
                declared,
                available,
            });
        }

        self.position = value_start + declared;
        let value = &self.buffer[value_start..value_start + declared];
        Ok((tag, value, self.position - start))
    }

    /// Decode one node tree, dispatching through the registry.
    pub fn decode_node(&mut self, registry: &TagRegistry) -> CodecResult<DerNode> {
        let (node, next) = DerNode::decode(self.buffer, self.position, registry)?;
        self.position = next;
        Ok(node)
    }

    /// Decode an INTEGER (universal, primitive, tag 2) of up to 8 bytes,
    /// sign-extended from its big-endian two's complement content.
    pub fn decode_integer(&mut self) -> CodecResult<i64> {
        let (tag, value, _) = self.decode_tlv()?;
        expect_universal(&tag, UniversalType::Integer, false)?;

        if value.is_empty() || value.len() > 8 {
            return Err(CodecError::TypeMismatch {
                expected: "an INTEGER of 1 to 8 content bytes".to_string(),
                found: format!("{} content bytes", value.len()),
            });
        }

        let mut result: i64 = if value[0] & 0x80 != 0 { -1 } else { 0 };
        for &byte in value {
            result = (result << 8) | byte as i64;
        }
        Ok(result)
    }

    /// Decode a BOOLEAN (universal, primitive, tag 1); any non-zero
    /// content byte reads as `true`.
    pub fn decode_boolean(&mut self) -> CodecResult<bool> {
        let (tag, value, _) = self.decode_tlv()?;
        expect_universal(&tag, UniversalType::Boolean, false)?;

        if value.len() != 1 {
            return Err(CodecError::TypeMismatch {
                expected: "a BOOLEAN of exactly 1 content byte".to_string(),
                found: format!("{} content bytes", value.len()),
            });
        }
        Ok(value[0] != 0)
    }

    /// Decode a NULL (universal, primitive, tag 5; empty content).
    pub fn decode_null(&mut self) -> CodecResult<()> {
        let (tag, value, _) = self.decode_tlv()?;
        expect_universal(&tag, UniversalType::Null, false)?;

        if !value.is_empty() {
            return Err(CodecError::TypeMismatch {
                expected: "a NULL with empty content".to_string(),
                found: format!("{} content bytes", value.len()),
            });
        }
        Ok(())
    }

    /// Decode an OCTET STRING (universal, primitive, tag 4).
    pub fn decode_octet_string(&mut self) -> CodecResult<Vec<u8>> {
        let (tag, value, _) = self.decode_tlv()?;
        expect_universal(&tag, UniversalType::OctetString, false)?;
        Ok(value.to_vec())
    }

    /// Decode a SEQUENCE header (universal, constructed, tag 16) and
    /// return its value field, a concatenation of element TLVs.
    pub fn expect_sequence(&mut self) -> CodecResult<&'a [u8]> {
        let (tag, value, _) = self.decode_tlv()?;
        expect_universal(&tag, UniversalType::Sequence, true)?;
        Ok(value)
    }

    /// Skip one TLV and return the number of bytes skipped.
    pub fn skip_tlv(&mut self) -> CodecResult<usize> {
        let (_, _, consumed) = self.decode_tlv()?;
        Ok(consumed)
    }
}

fn expect_universal(tag: &DerTag, expected: UniversalType, constructed: bool) -> CodecResult<()> {
    if tag.class() != DerTagClass::Universal
        || tag.is_constructed() != constructed
        || tag.number() != expected.number()
    {
        return Err(CodecError::TypeMismatch {
            expected: format!("{expected:?}"),
            found: format!("{tag:?}"),
        });
    }
    Ok(())
}
