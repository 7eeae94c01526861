//! Buffer-accumulating encoder with typed helpers.

use crate::node::DerNode;
use crate::types::{encode_length, DerTag};
use crate::universal::UniversalType;
use dataenc_core::CodecResult;

/// TLV encoder accumulating into a byte buffer.
///
/// Typed helpers cover the common universal types; arbitrary values go
/// through [`DerEncoder::encode_tlv`] or [`DerEncoder::encode_node`].
/// Use `with_capacity` to pre-allocate when the output size is known.
pub struct DerEncoder {
    buffer: Vec<u8>,
}

impl DerEncoder {
    /// Create a new encoder.
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Create a new encoder with an initial buffer capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Encode one TLV triplet from a tag and already-encoded value bytes.
    pub fn encode_tlv(&mut self, tag: &DerTag, value: &[u8]) -> CodecResult<()> {
        self.buffer.extend_from_slice(&tag.encode());
        self.buffer.extend_from_slice(&encode_length(value.len())?);
        self.buffer.extend_from_slice(value);
        Ok(())
    }

    /// Encode a node tree.
    pub fn encode_node(&mut self, node: &DerNode) -> CodecResult<()> {
        self.buffer.extend_from_slice(&node.encode()?);
        Ok(())
    }

    /// Encode a BOOLEAN (universal, primitive, tag 1).
    ///
    /// `true` encodes as the canonical `0xFF`.
    pub fn encode_boolean(&mut self, value: bool) -> CodecResult<()> {
        let tag = UniversalType::Boolean.tag(false);
        self.encode_tlv(&tag, &[if value { 0xFF } else { 0x00 }])
    }

    /// Encode an INTEGER (universal, primitive, tag 2) as minimal
    /// big-endian two's complement.
    pub fn encode_integer(&mut self, value: i64) -> CodecResult<()> {
        let tag = UniversalType::Integer.tag(false);
        self.encode_tlv(&tag, &integer_bytes(value))
    }

    /// Encode a NULL (universal, primitive, tag 5; empty content).
    pub fn encode_null(&mut self) -> CodecResult<()> {
        let tag = UniversalType::Null.tag(false);
        self.encode_tlv(&tag, &[])
    }

    /// Encode an OCTET STRING (universal, primitive, tag 4).
    pub fn encode_octet_string(&mut self, value: &[u8]) -> CodecResult<()> {
        let tag = UniversalType::OctetString.tag(false);
        self.encode_tlv(&tag, value)
    }

    /// Encode a SEQUENCE (universal, constructed, tag 16) from
    /// already-encoded element TLVs.
    pub fn encode_sequence(&mut self, elements: &[u8]) -> CodecResult<()> {
        let tag = UniversalType::Sequence.tag(true);
        self.encode_tlv(&tag, elements)
    }

    /// Take the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Get a reference to the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for DerEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal big-endian two's complement representation of `value`.
///
/// Leading bytes are dropped while they stay redundant with the sign
/// bit of the following byte; zero stays one byte.
fn integer_bytes(value: i64) -> Vec<u8> {
    let raw = value.to_be_bytes();
    let mut start = 0;
    while start < raw.len() - 1 {
        let redundant = (raw[start] == 0x00 && raw[start + 1] & 0x80 == 0)
            || (raw[start] == 0xFF && raw[start + 1] & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }
    raw[start..].to_vec()
}
