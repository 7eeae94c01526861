//! Single PEM block encoding and decoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use dataenc_core::{ArmorError, ArmorResult};
use dataenc_der::{DerNode, TagRegistry};
use log::trace;
use serde::{Deserialize, Serialize};

/// Column at which the Base64 body is folded.
const LINE_WIDTH: usize = 64;

/// A PEM block: a label and an opaque byte payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PemBlock {
    label: String,
    #[serde(with = "serde_bytes")]
    content: Vec<u8>,
}

impl PemBlock {
    /// Create a block from a label and payload bytes.
    pub fn new(label: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            content,
        }
    }

    /// Armor an encoded node tree under the given label.
    pub fn from_node(label: impl Into<String>, node: &DerNode) -> ArmorResult<Self> {
        Ok(Self::new(label, node.encode()?))
    }

    /// Decode the payload as exactly one TLV node.
    ///
    /// The payload must hold one complete node with no trailing bytes;
    /// anything else surfaces as a codec error.
    pub fn to_node(&self, registry: &TagRegistry) -> ArmorResult<DerNode> {
        Ok(DerNode::decode_exact(&self.content, registry)?)
    }

    /// Get the block label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the payload bytes.
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Consume the block and take its payload.
    pub fn into_content(self) -> Vec<u8> {
        self.content
    }

    /// Encode the block into its armor text.
    ///
    /// The label is uppercased and the Base64 body folded at 64
    /// columns.
    pub fn encode(&self) -> String {
        let label = self.label.to_uppercase();
        let body = fold(&STANDARD.encode(&self.content));
        format!("-----BEGIN {label}-----\n{body}\n-----END {label}-----\n")
    }

    /// Decode one block from `text`, scanning from `start`.
    ///
    /// Returns the block and the index just past its END marker. The
    /// scan tolerates a `----- BEGIN` spacing variant and CR/LF inside
    /// the Base64 body.
    pub fn decode(text: &str, start: usize) -> ArmorResult<(Self, usize)> {
        let tail = text.get(start..).ok_or(ArmorError::MissingBegin)?;

        let label_start = match tail.find("-----BEGIN ") {
            Some(at) => start + at + 11,
            None => match tail.find("----- BEGIN ") {
                Some(at) => start + at + 12,
                None => return Err(ArmorError::MissingBegin),
            },
        };

        let label_end = text[label_start..]
            .find("-----")
            .map(|at| label_start + at)
            .ok_or(ArmorError::MissingBegin)?;
        let label = text[label_start..label_end].trim_matches(' ').to_string();

        let body_start = label_end + 5;
        let end_marker = match text[body_start..].find("-----END") {
            Some(at) => body_start + at,
            None => match text[body_start..].find("----- END") {
                Some(at) => body_start + at,
                None => {
                    return Err(ArmorError::MissingEnd { label });
                }
            },
        };

        let body: String = text[body_start..end_marker]
            .chars()
            .filter(|c| *c != '\n' && *c != '\r')
            .collect();
        let content = STANDARD
            .decode(body.as_bytes())
            .map_err(|err| ArmorError::InvalidBase64 {
                label: label.clone(),
                detail: err.to_string(),
            })?;

        // The END marker line closes with a second dash run; the block
        // ends just past it.
        let end = text[end_marker + 5..]
            .find("-----")
            .map(|at| end_marker + 5 + at + 5)
            .ok_or_else(|| ArmorError::MissingEnd {
                label: label.clone(),
            })?;

        trace!("decoded block \"{label}\" ({} payload bytes)", content.len());
        Ok((Self { label, content }, end))
    }
}

/// Fold `input` into lines of at most [`LINE_WIDTH`] characters.
fn fold(input: &str) -> String {
    let mut result = String::with_capacity(input.len() + input.len() / LINE_WIDTH + 1);
    let mut column = 0;
    for ch in input.chars() {
        if column == LINE_WIDTH {
            result.push('\n');
            column = 0;
        }
        result.push(ch);
        column += 1;
    }
    result
}
