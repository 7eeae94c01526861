//! Tag dispatch registry for untyped decoding.

use crate::types::{DerTag, DerTagClass};
use crate::universal::UniversalType;
use std::collections::HashMap;

/// Which node variant a tag decodes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Raw content bytes
    Primitive,
    /// An ordered sequence of child nodes
    Constructed,
}

/// Mapping from `(class, number)` to the node variant to instantiate
/// when decoding untyped input.
///
/// Unregistered tags fall back to [`NodeKind::Primitive`], which stores
/// the value field verbatim. The default registry maps only the
/// universal SEQUENCE tag to [`NodeKind::Constructed`]; callers that
/// need other constructed types (e.g. SET) register them up front.
///
/// Decoding borrows the registry immutably, so registration has to
/// happen before decoding starts. That also makes concurrent decodes
/// over a shared registry safe without further coordination.
#[derive(Debug, Clone)]
pub struct TagRegistry {
    kinds: HashMap<(DerTagClass, u32), NodeKind>,
}

impl TagRegistry {
    /// Create a registry with no entries: every tag decodes primitive.
    pub fn empty() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Create the default registry, with universal SEQUENCE mapped to
    /// the constructed variant.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(
            DerTagClass::Universal,
            UniversalType::Sequence.number(),
            NodeKind::Constructed,
        );
        registry
    }

    /// Register the node variant for a `(class, number)` pair,
    /// replacing any previous entry.
    pub fn register(&mut self, class: DerTagClass, number: u32, kind: NodeKind) {
        self.kinds.insert((class, number), kind);
    }

    /// Resolve the node variant for a tag.
    ///
    /// Dispatch is keyed on class and number only; the constructed bit
    /// of the tag itself does not participate.
    pub fn kind_of(&self, tag: &DerTag) -> NodeKind {
        self.kinds
            .get(&(tag.class(), tag.number()))
            .copied()
            .unwrap_or(NodeKind::Primitive)
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_maps_sequence() {
        let registry = TagRegistry::new();
        let tag = UniversalType::Sequence.tag(true);
        assert_eq!(registry.kind_of(&tag), NodeKind::Constructed);
    }

    #[test]
    fn test_unregistered_falls_back_to_primitive() {
        let registry = TagRegistry::new();
        let tag = DerTag::context_specific(true, 7);
        assert_eq!(registry.kind_of(&tag), NodeKind::Primitive);
    }

    #[test]
    fn test_register_set() {
        let mut registry = TagRegistry::new();
        registry.register(
            DerTagClass::Universal,
            UniversalType::Set.number(),
            NodeKind::Constructed,
        );
        let tag = UniversalType::Set.tag(true);
        assert_eq!(registry.kind_of(&tag), NodeKind::Constructed);
    }

    #[test]
    fn test_empty_registry() {
        let registry = TagRegistry::empty();
        let tag = UniversalType::Sequence.tag(true);
        assert_eq!(registry.kind_of(&tag), NodeKind::Primitive);
    }
}
