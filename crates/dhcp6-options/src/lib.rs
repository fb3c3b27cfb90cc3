//! In-memory data model for DHCPv6 message options.
//!
//! An option on the wire is a TLV: a 16-bit code, a 16-bit payload length,
//! and the payload bytes. This crate provides the entities for that model
//! ([`RawOption`], the [`Dhcp6Option`] capability trait, the legacy
//! [`UnrecognizedOption`]), the type↔code [`OptionRegistry`], and the
//! order-preserving multi-valued store [`Dhcp6Options`] that a message
//! decoder fills and a message encoder drains.
//!
//! Decoding of payload bytes into per-kind semantic fields is out of scope
//! here: decoded option types live downstream, implement [`Dhcp6Option`],
//! and are registered with an [`OptionRegistry`].

pub mod legacy;
pub mod option;
pub mod registry;
pub mod store;

pub use legacy::UnrecognizedOption;
pub use option::{Dhcp6Option, OPTION_HEADER_LEN, RawOption, options_eq};
pub use registry::OptionRegistry;
pub use store::{DecodedOptions, Dhcp6Options};

use std::fmt;

/// The wire code identifying a DHCPv6 option's kind.
///
/// This is the 16-bit code of the v6 option family. It is a different tag
/// space from the 8-bit tags of the legacy (v4-style) family that
/// [`UnrecognizedOption`] belongs to; the two are never interchangeable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct OptionCode(u16);

impl OptionCode {
    /// Create an option code from its raw wire value.
    #[inline]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the raw u16 value.
    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for OptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for OptionCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl From<OptionCode> for u16 {
    fn from(code: OptionCode) -> Self {
        code.0
    }
}
