//! TLV node model and the recursive encode/decode algorithm.
//!
//! A node is either primitive (raw content bytes) or constructed (an
//! ordered list of child nodes). Each node exclusively owns its content
//! or children; the wire format cannot express sharing or cycles.

use crate::registry::{NodeKind, TagRegistry};
use crate::types::{decode_length, encode_length, DerTag};
use crate::universal::UniversalType;
use dataenc_core::{CodecError, CodecResult};
use log::trace;
use serde::{Deserialize, Serialize};

/// A primitive TLV node: a tag over raw content bytes.
///
/// The encoded length is always derived from the content at encode
/// time; it is not stored separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerPrimitive {
    tag: DerTag,
    #[serde(with = "serde_bytes")]
    content: Vec<u8>,
}

impl DerPrimitive {
    /// Create a primitive node from an explicit tag and content.
    pub fn new(tag: DerTag, content: Vec<u8>) -> Self {
        Self { tag, content }
    }

    /// Get the tag.
    pub fn tag(&self) -> DerTag {
        self.tag
    }

    /// Get the content bytes.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Consume the node and take its content.
    pub fn into_content(self) -> Vec<u8> {
        self.content
    }

    /// Encode the node: tag, length of the content, content verbatim.
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        let length = encode_length(self.content.len())?;
        let mut result = self.tag.encode();
        result.reserve(length.len() + self.content.len());
        result.extend_from_slice(&length);
        result.extend_from_slice(&self.content);
        Ok(result)
    }

    /// Decode a primitive node from `buf` starting at `offset`.
    ///
    /// # Returns
    ///
    /// Returns `Ok((node, next_offset))` where `next_offset` is the
    /// index just past the node's content.
    pub fn decode(buf: &[u8], offset: usize) -> CodecResult<(Self, usize)> {
        let (tag, tag_len) = DerTag::decode(buf, offset)?;
        let (declared, length_width) = decode_length(buf, offset + tag_len)?;
        let declared = declared as usize;

        let value_start = offset + tag_len + length_width;
        let available = buf.len().saturating_sub(value_start);
        if declared > available {
            return Err(CodecError::TruncatedContent {
                offset: value_start,
                declared,
                available,
            });
        }

        let content = buf[value_start..value_start + declared].to_vec();
        Ok((Self { tag, content }, value_start + declared))
    }
}

/// A constructed TLV node: a tag over an ordered list of child nodes.
///
/// The value field is the concatenation of the fully-encoded children,
/// in order; its length is computed at encode time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerConstructed {
    tag: DerTag,
    children: Vec<DerNode>,
}

impl DerConstructed {
    /// Create a constructed node from an explicit tag and child list.
    pub fn new(tag: DerTag, children: Vec<DerNode>) -> Self {
        Self { tag, children }
    }

    /// Create a universal SEQUENCE node.
    pub fn sequence(children: Vec<DerNode>) -> Self {
        Self::new(UniversalType::Sequence.tag(true), children)
    }

    /// Get the tag.
    pub fn tag(&self) -> DerTag {
        self.tag
    }

    /// Get the child nodes.
    pub fn children(&self) -> &[DerNode] {
        &self.children
    }

    /// Consume the node and take its children.
    pub fn into_children(self) -> Vec<DerNode> {
        self.children
    }

    /// Append a child node.
    pub fn push(&mut self, child: DerNode) {
        self.children.push(child);
    }

    /// Encode the node: tag, summed length of the encoded children,
    /// then the children in order.
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        let mut value = Vec::new();
        for child in &self.children {
            value.extend_from_slice(&child.encode()?);
        }

        let length = encode_length(value.len())?;
        let mut result = self.tag.encode();
        result.reserve(length.len() + value.len());
        result.extend_from_slice(&length);
        result.extend_from_slice(&value);
        Ok(result)
    }

    /// Decode a constructed node from `buf` starting at `offset`.
    ///
    /// Children are decoded sequentially from the start of the value
    /// field until the cursor reaches its declared end exactly.
    ///
    /// # Errors
    ///
    /// - [`CodecError::TypeMismatch`] if the registry does not map the
    ///   tag at `offset` to a constructed type
    /// - [`CodecError::TruncatedContent`] if the declared value field
    ///   passes the end of the buffer
    /// - [`CodecError::ChildOverrun`] if a child's encoded span passes
    ///   the declared value end
    pub fn decode(
        buf: &[u8],
        offset: usize,
        registry: &TagRegistry,
    ) -> CodecResult<(Self, usize)> {
        let (tag, tag_len) = DerTag::decode(buf, offset)?;
        if registry.kind_of(&tag) != NodeKind::Constructed {
            return Err(CodecError::TypeMismatch {
                expected: "a tag registered as constructed".to_string(),
                found: format!("{tag:?}"),
            });
        }

        let (declared, length_width) = decode_length(buf, offset + tag_len)?;
        let declared = declared as usize;

        let value_start = offset + tag_len + length_width;
        let available = buf.len().saturating_sub(value_start);
        if declared > available {
            return Err(CodecError::TruncatedContent {
                offset: value_start,
                declared,
                available,
            });
        }

        let value_end = value_start + declared;
        let mut children = Vec::new();
        let mut cursor = value_start;
        while cursor < value_end {
            let (child, next) = DerNode::decode(buf, cursor, registry)?;
            if next > value_end {
                return Err(CodecError::ChildOverrun {
                    offset: cursor,
                    limit: value_end,
                });
            }
            children.push(child);
            cursor = next;
        }

        Ok((Self { tag, children }, value_end))
    }
}

/// A TLV node, either primitive or constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DerNode {
    /// Raw content bytes under a tag
    Primitive(DerPrimitive),
    /// An ordered list of child nodes under a tag
    Constructed(DerConstructed),
}

impl DerNode {
    /// Create a primitive node from an explicit tag and content.
    pub fn primitive(tag: DerTag, content: Vec<u8>) -> Self {
        Self::Primitive(DerPrimitive::new(tag, content))
    }

    /// Create a constructed node from an explicit tag and child list.
    pub fn constructed(tag: DerTag, children: Vec<DerNode>) -> Self {
        Self::Constructed(DerConstructed::new(tag, children))
    }

    /// Create a universal SEQUENCE node.
    pub fn sequence(children: Vec<DerNode>) -> Self {
        Self::Constructed(DerConstructed::sequence(children))
    }

    /// Get the tag.
    pub fn tag(&self) -> DerTag {
        match self {
            Self::Primitive(node) => node.tag(),
            Self::Constructed(node) => node.tag(),
        }
    }

    /// Get the primitive variant, if this is one.
    pub fn as_primitive(&self) -> Option<&DerPrimitive> {
        match self {
            Self::Primitive(node) => Some(node),
            Self::Constructed(_) => None,
        }
    }

    /// Get the constructed variant, if this is one.
    pub fn as_constructed(&self) -> Option<&DerConstructed> {
        match self {
            Self::Primitive(_) => None,
            Self::Constructed(node) => Some(node),
        }
    }

    /// Encode the node to bytes.
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        match self {
            Self::Primitive(node) => node.encode(),
            Self::Constructed(node) => node.encode(),
        }
    }

    /// Decode one node from `buf` starting at `offset`.
    ///
    /// The tag at `offset` is peeked first (no length or content read)
    /// to resolve the variant through the registry, then that variant's
    /// decoder runs. Returns the node and the offset where decoding
    /// stopped; bytes past that offset are left to the caller.
    pub fn decode(
        buf: &[u8],
        offset: usize,
        registry: &TagRegistry,
    ) -> CodecResult<(Self, usize)> {
        let (tag, _) = DerTag::decode(buf, offset)?;
        trace!(
            "decoding node at offset {offset}: tag {:?} number {}",
            tag.class(),
            tag.number()
        );

        match registry.kind_of(&tag) {
            NodeKind::Constructed => DerConstructed::decode(buf, offset, registry)
                .map(|(node, end)| (Self::Constructed(node), end)),
            NodeKind::Primitive => {
                DerPrimitive::decode(buf, offset).map(|(node, end)| (Self::Primitive(node), end))
            }
        }
    }

    /// Decode a buffer known to hold exactly one node.
    ///
    /// # Errors
    ///
    /// [`CodecError::TrailingBytes`] if the node stops short of the end
    /// of the buffer, besides the usual decode failures.
    pub fn decode_exact(buf: &[u8], registry: &TagRegistry) -> CodecResult<Self> {
        let (node, end) = Self::decode(buf, 0, registry)?;
        if end != buf.len() {
            return Err(CodecError::TrailingBytes {
                offset: end,
                expected: buf.len(),
            });
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DerTagClass;

    fn sample_sequence() -> DerNode {
        DerNode::sequence(vec![
            DerNode::primitive(UniversalType::Integer.tag(false), vec![0, 0, 0, 1]),
            DerNode::primitive(UniversalType::Boolean.tag(false), vec![1]),
            DerNode::primitive(UniversalType::Null.tag(false), vec![]),
        ])
    }

    #[test]
    fn test_primitive_encode() {
        let node = DerNode::primitive(UniversalType::Integer.tag(false), vec![0, 0, 0, 1]);
        assert_eq!(node.encode().unwrap(), vec![0x02, 0x04, 0x00, 0x00, 0x00, 0x01]);

        let end = DerNode::primitive(UniversalType::EndOfContent.tag(false), vec![]);
        assert_eq!(end.encode().unwrap(), vec![0x00, 0x00]);
    }

    #[test]
    fn test_sequence_encode() {
        let encoded = sample_sequence().encode().unwrap();
        assert_eq!(
            encoded,
            vec![0x30, 0x0B, 0x02, 0x04, 0x00, 0x00, 0x00, 0x01, 0x01, 0x01, 0x01, 0x05, 0x00]
        );
    }

    #[test]
    fn test_sequence_decode() {
        let buf = [
            0x30, 0x0B, 0x02, 0x04, 0x00, 0x00, 0x00, 0x01, 0x01, 0x01, 0x01, 0x05, 0x00,
        ];
        let registry = TagRegistry::new();
        let (node, end) = DerNode::decode(&buf, 0, &registry).unwrap();

        assert_eq!(end, 13);
        assert_eq!(node, sample_sequence());
    }

    #[test]
    fn test_primitive_round_trip() {
        let registry = TagRegistry::new();
        for number in [0u32, 2, 30, 31, 127, 128, 1 << 20] {
            let node = DerNode::primitive(
                DerTag::new(DerTagClass::ContextSpecific, false, number),
                vec![0xAB; 5],
            );
            let encoded = node.encode().unwrap();
            let (decoded, end) = DerNode::decode(&encoded, 0, &registry).unwrap();
            assert_eq!(decoded, node);
            assert_eq!(end, encoded.len());
        }
    }

    #[test]
    fn test_nested_sequence_round_trip() {
        let inner = DerNode::sequence(vec![DerNode::primitive(
            UniversalType::OctetString.tag(false),
            b"nested".to_vec(),
        )]);
        let outer = DerNode::sequence(vec![
            inner,
            DerNode::primitive(UniversalType::Integer.tag(false), vec![0x7F]),
        ]);

        let registry = TagRegistry::new();
        let encoded = outer.encode().unwrap();
        let (decoded, end) = DerNode::decode(&encoded, 0, &registry).unwrap();
        assert_eq!(decoded, outer);
        assert_eq!(end, encoded.len());

        // Re-encoding reproduces the original bytes
        assert_eq!(decoded.encode().unwrap(), encoded);
    }

    #[test]
    fn test_long_form_content_round_trip() {
        let node = DerNode::primitive(UniversalType::OctetString.tag(false), vec![0x5A; 300]);
        let encoded = node.encode().unwrap();
        assert_eq!(&encoded[..4], &[0x04, 0x82, 0x01, 0x2C]);

        let registry = TagRegistry::new();
        let (decoded, end) = DerNode::decode(&encoded, 0, &registry).unwrap();
        assert_eq!(decoded, node);
        assert_eq!(end, encoded.len());
    }

    #[test]
    fn test_decode_idempotent() {
        let buf = sample_sequence().encode().unwrap();
        let registry = TagRegistry::new();
        let first = DerNode::decode(&buf, 0, &registry).unwrap();
        let second = DerNode::decode(&buf, 0, &registry).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut buf = DerNode::primitive(UniversalType::Boolean.tag(false), vec![0xFF])
            .encode()
            .unwrap();
        buf.extend_from_slice(&[0xDE, 0xAD]);

        let registry = TagRegistry::new();
        let (_, end) = DerNode::decode(&buf, 0, &registry).unwrap();
        assert_eq!(end, 3);
    }

    #[test]
    fn test_decode_exact_rejects_trailing_bytes() {
        let mut buf = DerNode::primitive(UniversalType::Boolean.tag(false), vec![0xFF])
            .encode()
            .unwrap();
        buf.push(0x00);

        let registry = TagRegistry::new();
        assert_eq!(
            DerNode::decode_exact(&buf, &registry),
            Err(CodecError::TrailingBytes {
                offset: 3,
                expected: 4
            })
        );
    }

    #[test]
    fn test_truncated_content() {
        let buf = [0x02, 0x05, 0x01, 0x02];
        let registry = TagRegistry::new();
        assert_eq!(
            DerNode::decode(&buf, 0, &registry),
            Err(CodecError::TruncatedContent {
                offset: 2,
                declared: 5,
                available: 2
            })
        );
    }

    #[test]
    fn test_child_overrun() {
        // Sequence declares 4 value bytes, but its only child spans 6
        let buf = [0x30, 0x04, 0x02, 0x04, 0x01, 0x02, 0x03, 0x04];
        let registry = TagRegistry::new();
        assert_eq!(
            DerNode::decode(&buf, 0, &registry),
            Err(CodecError::ChildOverrun {
                offset: 2,
                limit: 6
            })
        );
    }

    #[test]
    fn test_sequence_length_one_short() {
        // Declared length misses the last child's final byte
        let buf = [
            0x30, 0x0A, 0x02, 0x04, 0x00, 0x00, 0x00, 0x01, 0x01, 0x01, 0x01, 0x05, 0x00,
        ];
        let registry = TagRegistry::new();
        assert_eq!(
            DerNode::decode(&buf, 0, &registry),
            Err(CodecError::ChildOverrun {
                offset: 11,
                limit: 12
            })
        );
    }

    #[test]
    fn test_constructed_decode_type_mismatch() {
        let buf = [0x02, 0x01, 0x2A];
        let registry = TagRegistry::new();
        assert!(matches!(
            DerConstructed::decode(&buf, 0, &registry),
            Err(CodecError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_registered_set_decodes_constructed() {
        let mut registry = TagRegistry::new();
        registry.register(
            DerTagClass::Universal,
            UniversalType::Set.number(),
            NodeKind::Constructed,
        );

        let set = DerNode::constructed(
            UniversalType::Set.tag(true),
            vec![DerNode::primitive(
                UniversalType::Integer.tag(false),
                vec![0x01],
            )],
        );
        let encoded = set.encode().unwrap();
        let (decoded, _) = DerNode::decode(&encoded, 0, &registry).unwrap();
        assert_eq!(decoded, set);

        // Without the registration the same bytes decode as an opaque
        // primitive holding the raw value field
        let fallback = TagRegistry::new();
        let (decoded, _) = DerNode::decode(&encoded, 0, &fallback).unwrap();
        assert!(decoded.as_primitive().is_some());
    }

    #[test]
    fn test_empty_sequence() {
        let node = DerNode::sequence(vec![]);
        let encoded = node.encode().unwrap();
        assert_eq!(encoded, vec![0x30, 0x00]);

        let registry = TagRegistry::new();
        let (decoded, end) = DerNode::decode(&encoded, 0, &registry).unwrap();
        assert_eq!(decoded, node);
        assert_eq!(end, 2);
    }
}
