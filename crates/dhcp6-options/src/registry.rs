//! Type↔code registry for decoded option types.
//!
//! The registry replaces a process-wide static lookup: each store holds its
//! own (shared) registry instance, so independent stores and tests can use
//! independent registrations. A decoded type is registered together with a
//! monomorphized factory, which doubles as the decoder extension point:
//! [`OptionRegistry::decode`] manufactures the registered instance for a
//! wire code and falls back to [`RawOption`] for codes nobody claims.

use std::any::{TypeId, type_name};
use std::collections::HashMap;

use dhcp6_error::{Dhcp6Error, Result};
use tracing::{debug, trace};

use crate::OptionCode;
use crate::option::{Dhcp6Option, RawOption};

type Factory = fn() -> Box<dyn Dhcp6Option>;

struct Registration {
    code: OptionCode,
    type_name: &'static str,
    make: Factory,
}

fn make_default<T: Dhcp6Option + Default>() -> Box<dyn Dhcp6Option> {
    Box::new(T::default())
}

/// Bidirectional mapping between decoded option types and wire codes.
#[derive(Default)]
pub struct OptionRegistry {
    by_type: HashMap<TypeId, Registration>,
    by_code: HashMap<OptionCode, TypeId>,
}

impl OptionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` as the decoded type for `code`.
    ///
    /// `T::default()` must produce a blank instance whose `code()` equals
    /// `code`. Registering the same type twice, or two types under the
    /// same code, is an error rather than a silent shadow.
    pub fn register<T: Dhcp6Option + Default>(&mut self, code: OptionCode) -> Result<()> {
        let type_id = TypeId::of::<T>();
        let type_name = type_name::<T>();

        if let Some(existing) = self.by_type.get(&type_id) {
            return Err(Dhcp6Error::DuplicateType {
                type_name,
                code: existing.code.get(),
            });
        }
        if let Some(held) = self.by_code.get(&code) {
            return Err(Dhcp6Error::DuplicateCode {
                code: code.get(),
                existing: self.by_type[held].type_name,
                type_name,
            });
        }

        debug!(code = code.get(), type_name, "registered decoded option type");
        self.by_code.insert(code, type_id);
        self.by_type.insert(
            type_id,
            Registration {
                code,
                type_name,
                make: make_default::<T>,
            },
        );
        Ok(())
    }

    /// The wire code registered for `T`.
    ///
    /// Fails with [`Dhcp6Error::UnregisteredType`] if `T` was never
    /// registered; callers propagate this unchanged since it indicates a
    /// missing bootstrap registration.
    pub fn code_of<T: Dhcp6Option>(&self) -> Result<OptionCode> {
        self.by_type
            .get(&TypeId::of::<T>())
            .map(|reg| reg.code)
            .ok_or(Dhcp6Error::UnregisteredType {
                type_name: type_name::<T>(),
            })
    }

    /// Whether any decoded type is registered for `code`.
    pub fn is_registered(&self, code: OptionCode) -> bool {
        self.by_code.contains_key(&code)
    }

    /// Name of the decoded type registered for `code`, if any.
    pub fn type_name_of(&self, code: OptionCode) -> Option<&'static str> {
        self.by_code
            .get(&code)
            .map(|type_id| self.by_type[type_id].type_name)
    }

    /// Manufacture the decoded instance registered for `code`, loaded with
    /// `payload`.
    ///
    /// Codes with no registration fall back to a [`RawOption`] carrying the
    /// payload verbatim; the message decoder relies on this to never lose
    /// an option it cannot name.
    pub fn decode(&self, code: OptionCode, payload: &[u8]) -> Box<dyn Dhcp6Option> {
        match self.by_code.get(&code).map(|type_id| &self.by_type[type_id]) {
            Some(reg) => {
                let mut option = (reg.make)();
                option.set_data(payload);
                option
            }
            None => {
                trace!(code = code.get(), "no decoded type for code, keeping raw");
                Box::new(RawOption::new(code, payload))
            }
        }
    }
}

impl std::fmt::Debug for OptionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut entries: Vec<_> = self
            .by_type
            .values()
            .map(|reg| (reg.code, reg.type_name))
            .collect();
        entries.sort_unstable();
        f.debug_map()
            .entries(entries.iter().map(|(code, name)| (code.get(), name)))
            .finish()
    }
}
