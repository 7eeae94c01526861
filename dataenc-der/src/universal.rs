//! Universal-class tag number inventory.

use crate::types::DerTag;
use serde::{Deserialize, Serialize};

/// Tag numbers of the universal class.
///
/// Numbers outside this inventory are still decodable; they simply stay
/// plain numbers ([`UniversalType::from_number`] returns `None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum UniversalType {
    EndOfContent = 0,
    Boolean = 1,
    Integer = 2,
    BitString = 3,
    OctetString = 4,
    Null = 5,
    ObjectIdentifier = 6,
    ObjectDescriptor = 7,
    External = 8,
    Real = 9,
    Enumerated = 10,
    EmbeddedPdv = 11,
    Utf8String = 12,
    RelativeOid = 13,
    Time = 14,
    Reserved = 15,
    Sequence = 16,
    Set = 17,
    NumericString = 18,
    PrintableString = 19,
    T61String = 20,
    VideotexString = 21,
    Ia5String = 22,
    UtcTime = 23,
    GeneralizedTime = 24,
    GraphicString = 25,
    VisibleString = 26,
    GeneralString = 27,
    UniversalString = 28,
    CharacterString = 29,
    BmpString = 30,
    Date = 31,
    TimeOfDay = 32,
    DateTime = 33,
    Duration = 34,
    OidIri = 35,
    RelativeOidIri = 36,
}

impl UniversalType {
    /// Look up the universal type for a tag number.
    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            0 => Some(UniversalType::EndOfContent),
            1 => Some(UniversalType::Boolean),
            2 => Some(UniversalType::Integer),
            3 => Some(UniversalType::BitString),
            4 => Some(UniversalType::OctetString),
            5 => Some(UniversalType::Null),
            6 => Some(UniversalType::ObjectIdentifier),
            7 => Some(UniversalType::ObjectDescriptor),
            8 => Some(UniversalType::External),
            9 => Some(UniversalType::Real),
            10 => Some(UniversalType::Enumerated),
            11 => Some(UniversalType::EmbeddedPdv),
            12 => Some(UniversalType::Utf8String),
            13 => Some(UniversalType::RelativeOid),
            14 => Some(UniversalType::Time),
            15 => Some(UniversalType::Reserved),
            16 => Some(UniversalType::Sequence),
            17 => Some(UniversalType::Set),
            18 => Some(UniversalType::NumericString),
            19 => Some(UniversalType::PrintableString),
            20 => Some(UniversalType::T61String),
            21 => Some(UniversalType::VideotexString),
            22 => Some(UniversalType::Ia5String),
            23 => Some(UniversalType::UtcTime),
            24 => Some(UniversalType::GeneralizedTime),
            25 => Some(UniversalType::GraphicString),
            26 => Some(UniversalType::VisibleString),
            27 => Some(UniversalType::GeneralString),
            28 => Some(UniversalType::UniversalString),
            29 => Some(UniversalType::CharacterString),
            30 => Some(UniversalType::BmpString),
            31 => Some(UniversalType::Date),
            32 => Some(UniversalType::TimeOfDay),
            33 => Some(UniversalType::DateTime),
            34 => Some(UniversalType::Duration),
            35 => Some(UniversalType::OidIri),
            36 => Some(UniversalType::RelativeOidIri),
            _ => None,
        }
    }

    /// Get the tag number.
    pub fn number(self) -> u32 {
        self as u32
    }

    /// Build a universal-class tag for this type.
    pub fn tag(self, constructed: bool) -> DerTag {
        DerTag::universal(constructed, self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_number_round_trip() {
        for number in 0..=36 {
            let ty = UniversalType::from_number(number).unwrap();
            assert_eq!(ty.number(), number);
        }
    }

    #[test]
    fn test_unknown_number() {
        assert_eq!(UniversalType::from_number(37), None);
        assert_eq!(UniversalType::from_number(99), None);
    }

    #[test]
    fn test_tag_helper() {
        let tag = UniversalType::Sequence.tag(true);
        assert_eq!(tag.encode(), vec![0x30]);
    }
}
