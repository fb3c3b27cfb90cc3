//! Fallback entity for the legacy (v4-style) option family.
//!
//! The legacy family uses 8-bit wire tags with a 2-byte tag+length header,
//! a tag space independent of the 16-bit v6 codes handled by the rest of
//! this crate. `UnrecognizedOption` carries a legacy option whose tag no
//! parser implementation claims: the payload is retained verbatim and no
//! decode semantics are attached.

use serde::{Deserialize, Serialize};

/// A legacy option that was not recognized by any specific decoder.
///
/// A freshly default-constructed instance has no wire tag yet; a decoder
/// assigns one by constructing via [`new`](Self::new) instead. An instance
/// must not be stored or serialized while unassigned; that is a caller
/// precondition, not enforced here. Once constructed with a tag, the tag
/// is immutable.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnrecognizedOption {
    tag: Option<u8>,
    data: Vec<u8>,
}

impl UnrecognizedOption {
    /// Wire-compat sentinel reported by [`raw_tag`](Self::raw_tag) while no
    /// tag is assigned. Distinguishable from every valid legacy tag
    /// (`0..=255`).
    pub const UNASSIGNED_TAG: i16 = -1;

    /// Create an unrecognized option bound to `tag`, with an empty payload.
    pub fn new(tag: u8) -> Self {
        Self {
            tag: Some(tag),
            data: Vec::new(),
        }
    }

    /// Create an unrecognized option bound to `tag` with a payload.
    pub fn with_data(tag: u8, data: impl Into<Vec<u8>>) -> Self {
        Self {
            tag: Some(tag),
            data: data.into(),
        }
    }

    /// Create an option not yet associated with any wire tag.
    ///
    /// Transient state only, for use before a decoder assigns the real tag.
    pub fn unassigned() -> Self {
        Self::default()
    }

    /// The assigned legacy wire tag, or `None` while unassigned.
    pub const fn tag(&self) -> Option<u8> {
        self.tag
    }

    /// The tag widened for wire compatibility: the real tag value, or
    /// [`UNASSIGNED_TAG`](Self::UNASSIGNED_TAG) while unassigned.
    pub fn raw_tag(&self) -> i16 {
        self.tag.map_or(Self::UNASSIGNED_TAG, i16::from)
    }

    /// The verbatim payload bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Replace the payload verbatim.
    pub fn set_data(&mut self, data: &[u8]) {
        self.data = data.to_vec();
    }
}
