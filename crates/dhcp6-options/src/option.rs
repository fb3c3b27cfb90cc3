//! The option capability: a wire code plus an opaque byte payload.
//!
//! Every stored option, raw or decoded, exposes the same contract: its
//! fixed wire code and an accessor pair over the undecoded payload bytes.
//! Decoded types may derive semantic fields from the payload but must keep
//! `data()` consistent with them.

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::OptionCode;

/// Fixed size of the DHCPv6 option TLV header: 2-byte code + 2-byte
/// payload length.
///
/// This is a framing contract shared with whatever encodes options onto
/// the wire, not a local implementation detail. [`Dhcp6Options::encoded_len`]
/// depends on it.
///
/// [`Dhcp6Options::encoded_len`]: crate::Dhcp6Options::encoded_len
pub const OPTION_HEADER_LEN: usize = 4;

/// A DHCPv6 option: a wire code and an opaque payload.
///
/// The code is fixed for the lifetime of an instance; only the payload is
/// replaceable, via [`set_data`](Dhcp6Option::set_data). Conversion between
/// raw and decoded shapes copies payload bytes through this accessor pair
/// and never interprets them itself.
pub trait Dhcp6Option: Any + fmt::Debug + Send + Sync {
    /// The wire code identifying this option's kind.
    fn code(&self) -> OptionCode;

    /// The undecoded wire payload.
    fn data(&self) -> &[u8];

    /// Replace the payload verbatim.
    ///
    /// Decoded implementations re-derive their semantic fields from the
    /// new bytes, eagerly or lazily at their discretion.
    fn set_data(&mut self, data: &[u8]);

    /// Upcast for downcasting; implementations return `self`.
    fn as_any(&self) -> &dyn Any;

    /// Bytes this option occupies on the wire, TLV header included.
    fn encoded_len(&self) -> usize {
        self.data().len() + OPTION_HEADER_LEN
    }
}

/// Value equality over `(code, payload)`.
///
/// This is the equality used by [`Dhcp6Options::remove_raw`]; the concrete
/// Rust type of either side is irrelevant.
///
/// [`Dhcp6Options::remove_raw`]: crate::Dhcp6Options::remove_raw
pub fn options_eq(a: &dyn Dhcp6Option, b: &dyn Dhcp6Option) -> bool {
    a.code() == b.code() && a.data() == b.data()
}

/// An undecoded option, as produced by initial message parsing or by the
/// unrecognized-code fallback of [`OptionRegistry::decode`].
///
/// [`OptionRegistry::decode`]: crate::OptionRegistry::decode
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOption {
    code: OptionCode,
    data: Vec<u8>,
}

impl RawOption {
    /// Create a raw option with the given code and payload.
    pub fn new(code: OptionCode, data: impl Into<Vec<u8>>) -> Self {
        Self {
            code,
            data: data.into(),
        }
    }
}

impl Dhcp6Option for RawOption {
    fn code(&self) -> OptionCode {
        self.code
    }

    fn data(&self) -> &[u8] {
        &self.data
    }

    fn set_data(&mut self, data: &[u8]) {
        self.data = data.to_vec();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for RawOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawOption(code={}, {} bytes)", self.code, self.data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_option_accessors() {
        let mut opt = RawOption::new(OptionCode::new(7), vec![1, 2, 3]);
        assert_eq!(opt.code(), OptionCode::new(7));
        assert_eq!(opt.data(), &[1, 2, 3]);

        opt.set_data(&[9]);
        assert_eq!(opt.data(), &[9]);
        assert_eq!(opt.code(), OptionCode::new(7));
    }

    #[test]
    fn encoded_len_includes_header() {
        let opt = RawOption::new(OptionCode::new(1), vec![0u8; 10]);
        assert_eq!(opt.encoded_len(), 10 + OPTION_HEADER_LEN);

        let empty = RawOption::new(OptionCode::new(1), Vec::new());
        assert_eq!(empty.encoded_len(), OPTION_HEADER_LEN);
    }

    #[test]
    fn value_equality_over_code_and_payload() {
        let a = RawOption::new(OptionCode::new(1), vec![1, 2]);
        let b = RawOption::new(OptionCode::new(1), vec![1, 2]);
        let c = RawOption::new(OptionCode::new(2), vec![1, 2]);
        let d = RawOption::new(OptionCode::new(1), vec![1, 3]);

        assert!(options_eq(&a, &b));
        assert!(!options_eq(&a, &c));
        assert!(!options_eq(&a, &d));
    }

    #[test]
    fn debug_is_compact() {
        let opt = RawOption::new(OptionCode::new(23), vec![0u8; 16]);
        assert_eq!(format!("{opt:?}"), "RawOption(code=23, 16 bytes)");
    }
}
