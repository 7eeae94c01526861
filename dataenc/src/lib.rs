//! dataenc - data-encoding toolkit
//!
//! This library bundles the encoding formats of the dataenc workspace:
//!
//! - `dataenc-core`: shared error types
//! - `dataenc-der`: binary TLV (tag-length-value) codec
//! - `dataenc-pem`: PEM block armor over the codec's byte output
//!
//! # Usage
//!
//! ```
//! use dataenc::der::{DerNode, TagRegistry, UniversalType};
//!
//! let node = DerNode::sequence(vec![DerNode::primitive(
//!     UniversalType::Integer.tag(false),
//!     vec![0x2A],
//! )]);
//! let bytes = node.encode().unwrap();
//!
//! let registry = TagRegistry::new();
//! let (decoded, end) = DerNode::decode(&bytes, 0, &registry).unwrap();
//! assert_eq!(decoded, node);
//! assert_eq!(end, bytes.len());
//! ```

// Re-export core types
pub use dataenc_core::{ArmorError, ArmorResult, CodecError, CodecResult};

// Re-export the TLV codec
pub mod der {
    pub use dataenc_der::*;
}

// Re-export the PEM armor
pub mod pem {
    pub use dataenc_pem::*;
}
