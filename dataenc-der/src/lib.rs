//! DER-style TLV (Tag-Length-Value) encoder and decoder
//!
//! This crate implements the binary TLV codec of the dataenc toolkit.
//! Each encoded value is a TLV triplet:
//!
//! ```text
//! [Tag] [Length] [Value]
//! ```
//!
//! ## Tag Encoding
//!
//! The tag identifies the type of the data:
//! - **Class** (2 bits): Universal (00), Application (01), Context-specific (10), Private (11)
//! - **Constructed/Primitive** (1 bit): 0 = Primitive, 1 = Constructed
//! - **Tag Number** (5 bits, or extended): the actual tag number
//!
//! Tag encoding format:
//! ```text
//! Bits: 8 7 6 5 4 3 2 1
//!       C C P T T T T T
//! ```
//! Where:
//! - CC = Class (00=Universal, 01=Application, 10=Context, 11=Private)
//! - P = Primitive (0) or Constructed (1)
//! - TTTTT = Tag number (0-30), or 11111 indicates the extended form
//!
//! Extended form: the tag number follows in base-128 big-endian
//! continuation bytes, bit 7 set on every byte except the last.
//!
//! ## Length Encoding
//!
//! Length can be encoded in two forms:
//! - **Short form** (1 byte): for lengths 0-127
//!   - Bit 7 = 0
//!   - Bits 6-0 = length value
//! - **Long form** (2-5 bytes): for lengths >= 128
//!   - First byte: Bit 7 = 1, Bits 6-0 = number of magnitude bytes (1-4)
//!   - Following bytes: big-endian length value, no leading zero padding
//!
//! Indefinite length (length-of-length of zero) and magnitudes wider
//! than 4 bytes are rejected.
//!
//! ## Value Encoding
//!
//! - **Primitive nodes**: the value is raw content bytes
//! - **Constructed nodes**: the value is the concatenation of the
//!   fully-encoded child nodes, in order
//!
//! Which variant a decoded tag maps to is decided by a [`TagRegistry`]:
//! an explicit `(class, number)` mapping with a primitive fallback, in
//! which only SEQUENCE is registered constructed by default. Callers
//! needing other constructed types (e.g. SET) register them before
//! decoding.
//!
//! The codec is purely synchronous and keeps no shared state: decoding
//! independent buffers on separate threads needs no coordination as
//! long as each decode borrows its registry immutably.

pub mod decoder;
pub mod encoder;
pub mod node;
pub mod registry;
pub mod types;
pub mod universal;

pub use dataenc_core::{CodecError, CodecResult};
pub use decoder::DerDecoder;
pub use encoder::DerEncoder;
pub use node::{DerConstructed, DerNode, DerPrimitive};
pub use registry::{NodeKind, TagRegistry};
pub use types::{decode_length, encode_length, DerTag, DerTagClass};
pub use universal::UniversalType;
