//! Tag and length codecs for the TLV identifier and length fields.

use dataenc_core::{CodecError, CodecResult};
use serde::{Deserialize, Serialize};

/// Tag class of a TLV node.
///
/// Four classes are defined:
/// - **Universal**: standard types (INTEGER, OCTET STRING, SEQUENCE, ...)
/// - **Application**: application-specific types
/// - **Context-specific**: context-dependent types (used inside SEQUENCE/SET)
/// - **Private**: private/implementation-specific types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DerTagClass {
    /// Universal class (00)
    Universal = 0,
    /// Application class (01)
    Application = 1,
    /// Context-specific class (10)
    ContextSpecific = 2,
    /// Private class (11)
    Private = 3,
}

impl DerTagClass {
    /// Extract the tag class from an identifier octet (bits 7-6).
    pub fn from_bits(byte: u8) -> Self {
        match (byte >> 6) & 0x03 {
            0 => DerTagClass::Universal,
            1 => DerTagClass::Application,
            2 => DerTagClass::ContextSpecific,
            _ => DerTagClass::Private,
        }
    }

    /// Convert the tag class to its bit position in the identifier octet.
    pub fn to_bits(self) -> u8 {
        (self as u8) << 6
    }
}

/// Tag of a TLV node.
///
/// A tag consists of:
/// - **Class**: Universal, Application, Context-specific, or Private
/// - **Constructed/Primitive**: whether the value holds nested nodes
/// - **Tag Number**: 0-30 encoded inline, larger numbers in the
///   multi-byte extended form
///
/// The byte encoding is a pure function of `(class, constructed, number)`:
/// decoding a tag and re-encoding it reproduces the original bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DerTag {
    class: DerTagClass,
    constructed: bool,
    number: u32,
}

impl DerTag {
    /// Create a new tag.
    pub fn new(class: DerTagClass, constructed: bool, number: u32) -> Self {
        Self {
            class,
            constructed,
            number,
        }
    }

    /// Create a Universal class tag.
    pub fn universal(constructed: bool, number: u32) -> Self {
        Self::new(DerTagClass::Universal, constructed, number)
    }

    /// Create an Application class tag.
    pub fn application(constructed: bool, number: u32) -> Self {
        Self::new(DerTagClass::Application, constructed, number)
    }

    /// Create a Context-specific class tag.
    pub fn context_specific(constructed: bool, number: u32) -> Self {
        Self::new(DerTagClass::ContextSpecific, constructed, number)
    }

    /// Create a Private class tag.
    pub fn private(constructed: bool, number: u32) -> Self {
        Self::new(DerTagClass::Private, constructed, number)
    }

    /// Get the tag class.
    pub fn class(&self) -> DerTagClass {
        self.class
    }

    /// Check whether the tag marks a constructed value.
    pub fn is_constructed(&self) -> bool {
        self.constructed
    }

    /// Get the tag number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Encode the tag to bytes.
    ///
    /// Numbers 0-30 fit the identifier octet directly. Larger numbers
    /// set the low 5 bits to all ones and follow with the base-128
    /// big-endian form of the number, continuation bit on every byte
    /// but the last.
    pub fn encode(&self) -> Vec<u8> {
        let class_bits = self.class.to_bits();
        let constructed_bit = if self.constructed { 0x20 } else { 0x00 };

        if self.number <= 30 {
            return vec![class_bits | constructed_bit | (self.number as u8 & 0x1F)];
        }

        let mut result = vec![class_bits | constructed_bit | 0x1F];

        // Base-128 digits, least significant first
        let mut digits = Vec::new();
        let mut remaining = self.number;
        while remaining > 0 {
            digits.push((remaining & 0x7F) as u8);
            remaining >>= 7;
        }

        for (i, &digit) in digits.iter().rev().enumerate() {
            if i < digits.len() - 1 {
                result.push(digit | 0x80);
            } else {
                result.push(digit);
            }
        }

        result
    }

    /// Decode a tag from `buf` starting at `offset`.
    ///
    /// # Returns
    ///
    /// Returns `Ok((tag, bytes_consumed))` if successful.
    ///
    /// # Errors
    ///
    /// - [`CodecError::TruncatedTag`] if the buffer ends at `offset` or
    ///   inside an extended tag number
    /// - [`CodecError::TagNumberOverflow`] if the extended number does
    ///   not fit 32 bits
    pub fn decode(buf: &[u8], offset: usize) -> CodecResult<(Self, usize)> {
        let first = *buf
            .get(offset)
            .ok_or(CodecError::TruncatedTag { offset })?;

        let class = DerTagClass::from_bits(first);
        let constructed = (first & 0x20) != 0;
        let low_bits = first & 0x1F;

        if low_bits != 0x1F {
            return Ok((Self::new(class, constructed, low_bits as u32), 1));
        }

        // Extended form: accumulate base-128 continuation bytes
        let mut number = 0u32;
        let mut consumed = 1usize;
        loop {
            let byte = *buf
                .get(offset + consumed)
                .ok_or(CodecError::TruncatedTag { offset })?;
            consumed += 1;

            number = number
                .checked_mul(128)
                .and_then(|n| n.checked_add((byte & 0x7F) as u32))
                .ok_or(CodecError::TagNumberOverflow { offset })?;

            if byte & 0x80 == 0 {
                break;
            }
        }

        Ok((Self::new(class, constructed, number), consumed))
    }
}

/// Encode a definite length field.
///
/// Lengths below 128 use the single-byte short form. Larger lengths
/// use the long form: a leading byte `0x80 | k` followed by the `k`
/// big-endian magnitude bytes, with `k` minimal (1-4).
///
/// # Errors
///
/// [`CodecError::OversizedContent`] if the length does not fit 32 bits.
pub fn encode_length(length: usize) -> CodecResult<Vec<u8>> {
    if length < 128 {
        return Ok(vec![length as u8]);
    }

    let value =
        u32::try_from(length).map_err(|_| CodecError::OversizedContent { len: length })?;

    // Magnitude bytes, least significant first
    let mut magnitude = Vec::new();
    let mut remaining = value;
    while remaining > 0 {
        magnitude.push((remaining & 0xFF) as u8);
        remaining >>= 8;
    }

    let mut result = Vec::with_capacity(1 + magnitude.len());
    result.push(0x80 | magnitude.len() as u8);
    result.extend(magnitude.iter().rev());
    Ok(result)
}

/// Decode a definite length field from `buf` starting at `offset`.
///
/// Returns the length value and the width of the length field itself
/// (1 for the short form, 1 + k for the long form).
///
/// # Errors
///
/// - [`CodecError::TruncatedLength`] if the buffer ends inside the field
/// - [`CodecError::UnsupportedIndefiniteLength`] on a length-of-length of zero
/// - [`CodecError::LengthTooWide`] on more than 4 magnitude bytes
pub fn decode_length(buf: &[u8], offset: usize) -> CodecResult<(u32, usize)> {
    let first = *buf.get(offset).ok_or(CodecError::TruncatedLength {
        offset,
        needed: 1,
        available: 0,
    })?;

    if first & 0x80 == 0 {
        return Ok((first as u32, 1));
    }

    let width = (first & 0x7F) as usize;
    if width == 0 {
        return Err(CodecError::UnsupportedIndefiniteLength { offset });
    }
    if width > 4 {
        return Err(CodecError::LengthTooWide { offset, width });
    }

    let available = buf.len().saturating_sub(offset + 1);
    if available < width {
        return Err(CodecError::TruncatedLength {
            offset,
            needed: width,
            available,
        });
    }

    let mut value = 0u32;
    for i in 0..width {
        value = (value << 8) | buf[offset + 1 + i] as u32;
    }

    Ok((value, width + 1))
}
