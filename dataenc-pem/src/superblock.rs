//! Handling of multiple consecutive PEM blocks.

use crate::block::PemBlock;
use dataenc_core::{ArmorError, ArmorResult};
use log::trace;
use serde::{Deserialize, Serialize};

/// A series of PEM blocks, encoded and decoded as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PemSuperBlock {
    blocks: Vec<PemBlock>,
}

impl PemSuperBlock {
    /// Create a super block from a list of blocks.
    pub fn new(blocks: Vec<PemBlock>) -> Self {
        Self { blocks }
    }

    /// Get the blocks.
    pub fn blocks(&self) -> &[PemBlock] {
        &self.blocks
    }

    /// Consume the super block and take its blocks.
    pub fn into_blocks(self) -> Vec<PemBlock> {
        self.blocks
    }

    /// Append a block.
    pub fn push(&mut self, block: PemBlock) {
        self.blocks.push(block);
    }

    /// Encode all blocks, separated by blank lines.
    pub fn encode(&self) -> String {
        self.blocks
            .iter()
            .map(PemBlock::encode)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Decode every block found in `text`, scanning from `start`.
    ///
    /// Scanning stops at the first position with no BEGIN marker left;
    /// text between and after blocks is ignored. Returns the blocks and
    /// the index just past the last one.
    pub fn decode(text: &str, start: usize) -> ArmorResult<(Self, usize)> {
        let mut blocks = Vec::new();
        let mut cursor = start;

        loop {
            match PemBlock::decode(text, cursor) {
                Ok((block, next)) => {
                    blocks.push(block);
                    cursor = next;
                }
                Err(ArmorError::MissingBegin) => break,
                Err(err) => return Err(err),
            }
        }

        trace!("decoded {} armor blocks", blocks.len());
        Ok((Self { blocks }, cursor))
    }

    /// Index of the first block whose label matches, compared
    /// case-insensitively.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        let label = label.to_uppercase();
        self.blocks
            .iter()
            .position(|block| block.label().to_uppercase() == label)
    }

    /// The first block whose label matches, compared case-insensitively.
    pub fn find(&self, label: &str) -> Option<&PemBlock> {
        self.index_of(label).map(|index| &self.blocks[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PemSuperBlock {
        PemSuperBlock::new(vec![
            PemBlock::new("FIRST", vec![1, 2, 3]),
            PemBlock::new("SECOND", vec![4, 5]),
            PemBlock::new("THIRD", vec![]),
        ])
    }

    #[test]
    fn test_round_trip() {
        let original = sample();
        let text = original.encode();
        let (decoded, _) = PemSuperBlock::decode(&text, 0).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_decode_ignores_text_between_blocks() {
        let text = format!(
            "prologue\n{}commentary between blocks\n{}trailer",
            PemBlock::new("ONE", vec![1]).encode(),
            PemBlock::new("TWO", vec![2]).encode()
        );
        let (decoded, _) = PemSuperBlock::decode(&text, 0).unwrap();
        assert_eq!(decoded.blocks().len(), 2);
        assert_eq!(decoded.blocks()[0].label(), "ONE");
        assert_eq!(decoded.blocks()[1].label(), "TWO");
    }

    #[test]
    fn test_decode_empty_text() {
        let (decoded, end) = PemSuperBlock::decode("", 0).unwrap();
        assert!(decoded.blocks().is_empty());
        assert_eq!(end, 0);
    }

    #[test]
    fn test_find_case_insensitive() {
        let blocks = sample();
        assert!(blocks.find("second").is_some());
        assert!(blocks.find("SECOND").is_some());
        assert!(blocks.find("missing").is_none());
        assert_eq!(blocks.index_of("third"), Some(2));
    }

    #[test]
    fn test_malformed_block_propagates() {
        let text = "-----BEGIN KEY-----\nAQID\n";
        assert!(matches!(
            PemSuperBlock::decode(text, 0),
            Err(ArmorError::MissingEnd { .. })
        ));
    }
}
