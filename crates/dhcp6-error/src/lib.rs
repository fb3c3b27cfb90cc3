use thiserror::Error;

/// Primary error type for dhcp6 option handling.
///
/// Structured variants for the failure modes of the option store and the
/// type registry. Every variant carries enough context to name the decoded
/// type involved, so callers never have to reconstruct it from a message.
#[derive(Error, Debug)]
pub enum Dhcp6Error {
    /// The singleton accessor was used on a code that currently holds two
    /// or more options. A caller contract violation, not malformed input.
    #[error("not a singleton option: {type_name} (code {code}, {count} present): {values}")]
    NotSingleton {
        type_name: &'static str,
        code: u16,
        count: usize,
        values: String,
    },

    /// A typed lookup was attempted for a type with no registered wire
    /// code. Indicates a missing registration, so it is propagated
    /// unchanged rather than swallowed.
    #[error("no option code registered for type {type_name}")]
    UnregisteredType { type_name: &'static str },

    /// The type is already registered under a (possibly different) code.
    #[error("type {type_name} is already registered under code {code}")]
    DuplicateType { type_name: &'static str, code: u16 },

    /// The code is already bound to another decoded type.
    #[error("code {code} is already registered to {existing}; cannot register {type_name}")]
    DuplicateCode {
        code: u16,
        existing: &'static str,
        type_name: &'static str,
    },
}

impl Dhcp6Error {
    /// Whether this error is a caller-side precondition violation (as
    /// opposed to a bootstrap/registration problem).
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::NotSingleton { .. })
    }

    /// Whether this error points at a missing or conflicting registration,
    /// i.e. a programming error in registry bootstrap.
    pub const fn is_registration_error(&self) -> bool {
        matches!(
            self,
            Self::UnregisteredType { .. } | Self::DuplicateType { .. } | Self::DuplicateCode { .. }
        )
    }

    /// Create an unregistered-type error.
    pub const fn unregistered(type_name: &'static str) -> Self {
        Self::UnregisteredType { type_name }
    }
}

/// Result type alias using `Dhcp6Error`.
pub type Result<T> = std::result::Result<T, Dhcp6Error>;
