//! PEM block armor for the dataenc toolkit
//!
//! A PEM block wraps an opaque byte payload in Base64 between BEGIN and
//! END markers:
//!
//! ```text
//! -----BEGIN <LABEL>-----
//! <Base64 of the payload, folded at 64 columns>
//! -----END <LABEL>-----
//! ```
//!
//! The payload is typically the output of the TLV codec; the bridge
//! methods on [`PemBlock`] armor an encoded node tree and decode a
//! block body back into exactly one node.

pub mod block;
pub mod superblock;

pub use block::PemBlock;
pub use dataenc_core::{ArmorError, ArmorResult};
pub use superblock::PemSuperBlock;
