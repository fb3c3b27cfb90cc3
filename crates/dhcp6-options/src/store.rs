//! The order-preserving, multi-valued option store.
//!
//! `Dhcp6Options` associates wire codes with the options stored under
//! them, preserving global insertion order across all codes and relative
//! insertion order within a code. Typed access converts stored options on
//! demand via the registry the store was created with; conversion is never
//! cached and never mutates the store.
//!
//! The store performs no internal locking and holds no I/O resources; all
//! operations complete synchronously. Exclusive access during mutation is
//! enforced statically by `&mut self`.

use std::any::type_name;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::slice;
use std::sync::{Arc, LazyLock};

use dhcp6_error::{Dhcp6Error, Result};
use tracing::trace;

use crate::OptionCode;
use crate::option::{Dhcp6Option, options_eq};
use crate::registry::OptionRegistry;

static EMPTY: LazyLock<Dhcp6Options> =
    LazyLock::new(|| Dhcp6Options::with_registry(Arc::new(OptionRegistry::new())));

/// Convert a stored option to the decoded shape `T`.
///
/// Identity short-circuit first: a stored instance that already is a `T`
/// is borrowed as-is, with no allocation and no payload re-parse. Anything
/// else gets a blank `T` loaded with the source's payload bytes; the new
/// instance owns any lazy or eager interpretation of them.
fn convert_to<'a, T>(stored: &'a dyn Dhcp6Option) -> Cow<'a, T>
where
    T: Dhcp6Option + Default + Clone,
{
    if let Some(already) = stored.as_any().downcast_ref::<T>() {
        return Cow::Borrowed(already);
    }
    let mut out = T::default();
    out.set_data(stored.data());
    Cow::Owned(out)
}

/// Tag-indexed, order-preserving, multi-valued collection of options.
///
/// Created empty around a registry; duplicates (even identical
/// code+payload) are permitted. See [`Dhcp6Options::empty`] for the shared
/// read-only default instance.
pub struct Dhcp6Options {
    registry: Arc<OptionRegistry>,
    // Global insertion order. Per-code access is a linear filter: option
    // counts are tens, not thousands.
    entries: Vec<Box<dyn Dhcp6Option>>,
}

impl Dhcp6Options {
    /// Create an empty store that resolves typed access through `registry`.
    pub fn with_registry(registry: Arc<OptionRegistry>) -> Self {
        Self {
            registry,
            entries: Vec::new(),
        }
    }

    /// The shared immutable empty store, for read-only default use.
    ///
    /// Its registry is empty, so typed accessors on it fail with
    /// [`Dhcp6Error::UnregisteredType`]; raw accessors all report absence.
    pub fn empty() -> &'static Self {
        &EMPTY
    }

    /// The registry this store resolves typed access through.
    pub fn registry(&self) -> &Arc<OptionRegistry> {
        &self.registry
    }

    /// True iff no options are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of stored options across all codes.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Iterate all stored options in global insertion order.
    ///
    /// Restartable: re-iterating yields the same order as long as the
    /// store was not mutated in between.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// The raw, undecoded options stored under `code`, in per-code
    /// insertion order.
    ///
    /// Returns `None` when nothing is stored under `code`: absence, as
    /// opposed to the empty sequence [`get_all`](Self::get_all) yields.
    /// Callers must preserve that distinction.
    pub fn get_raw(&self, code: OptionCode) -> Option<impl Iterator<Item = &dyn Dhcp6Option>> {
        if !self.entries.iter().any(|o| o.code() == code) {
            return None;
        }
        Some(
            self.entries
                .iter()
                .filter(move |o| o.code() == code)
                .map(|o| &**o),
        )
    }

    /// All options stored under the code registered for `T`, converted to
    /// `T`, in per-code insertion order.
    ///
    /// The sequence is lazy but finite and restartable; conversion runs on
    /// every traversal and is never cached. An empty sequence (not an
    /// absence) is returned when nothing is stored under the code.
    pub fn get_all<T>(&self) -> Result<DecodedOptions<'_, T>>
    where
        T: Dhcp6Option + Default + Clone,
    {
        let code = self.registry.code_of::<T>()?;
        Ok(DecodedOptions {
            code,
            inner: self.entries.iter(),
            _marker: PhantomData,
        })
    }

    /// The single option stored under the code registered for `T`,
    /// converted to `T`, or `None` if nothing is stored there.
    ///
    /// Singleton accessor: whether a decoded type is singleton-safe is a
    /// static, per-type caller contract. Requesting an always-multi-valued
    /// family through this accessor with two or more options present fails
    /// with [`Dhcp6Error::NotSingleton`] rather than silently picking one;
    /// such families must be read through [`get_all`](Self::get_all).
    pub fn get<T>(&self) -> Result<Option<Cow<'_, T>>>
    where
        T: Dhcp6Option + Default + Clone,
    {
        let code = self.registry.code_of::<T>()?;
        let mut matches = self.entries.iter().filter(|o| o.code() == code);
        let Some(first) = matches.next() else {
            return Ok(None);
        };
        if matches.next().is_some() {
            let conflicting: Vec<&dyn Dhcp6Option> = self
                .entries
                .iter()
                .filter(|o| o.code() == code)
                .map(|o| &**o)
                .collect();
            return Err(Dhcp6Error::NotSingleton {
                type_name: type_name::<T>(),
                code: code.get(),
                count: conflicting.len(),
                values: format!("{conflicting:?}"),
            });
        }
        Ok(Some(convert_to::<T>(&**first)))
    }

    /// True iff at least one option is stored under the code registered
    /// for `T`.
    pub fn contains<T: Dhcp6Option>(&self) -> Result<bool> {
        let code = self.registry.code_of::<T>()?;
        Ok(self.entries.iter().any(|o| o.code() == code))
    }

    /// Append `option` under its own code.
    ///
    /// No uniqueness enforcement: duplicates are stored as given. The
    /// option's code is fixed at insertion and is the multimap key.
    pub fn add<O: Dhcp6Option>(&mut self, option: O) {
        self.entries.push(Box::new(option));
    }

    /// Append an already-boxed option under its own code.
    pub fn add_boxed(&mut self, option: Box<dyn Dhcp6Option>) {
        self.entries.push(option);
    }

    /// Append every option of `options` in order; `None` is a no-op, not
    /// an error.
    pub fn add_all<I>(&mut self, options: Option<I>)
    where
        I: IntoIterator<Item = Box<dyn Dhcp6Option>>,
    {
        let Some(options) = options else { return };
        for option in options {
            self.add_boxed(option);
        }
    }

    /// Remove and return every option stored under the code registered for
    /// `T`, as the raw stored instances (not converted).
    pub fn remove_all<T: Dhcp6Option>(&mut self) -> Result<Vec<Box<dyn Dhcp6Option>>> {
        let code = self.registry.code_of::<T>()?;
        Ok(self.remove_all_raw(code))
    }

    /// Remove and return every option stored under `code`.
    pub fn remove_all_raw(&mut self, code: OptionCode) -> Vec<Box<dyn Dhcp6Option>> {
        let mut removed = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].code() == code {
                removed.push(self.entries.remove(i));
            } else {
                i += 1;
            }
        }
        if !removed.is_empty() {
            trace!(
                code = code.get(),
                removed = removed.len(),
                "removed all options under code"
            );
        }
        removed
    }

    /// Remove exactly one stored option equal to `value` (by code+payload)
    /// under the code registered for `T`; reports whether a removal took
    /// place.
    pub fn remove<T: Dhcp6Option>(&mut self, value: &dyn Dhcp6Option) -> Result<bool> {
        let code = self.registry.code_of::<T>()?;
        Ok(self.remove_raw(code, value))
    }

    /// Remove exactly one stored option equal to `value` under `code`.
    ///
    /// At most one instance is removed even when equal duplicates exist;
    /// returns `false` (store unchanged) when nothing matched.
    pub fn remove_raw(&mut self, code: OptionCode, value: &dyn Dhcp6Option) -> bool {
        let Some(pos) = self
            .entries
            .iter()
            .position(|o| o.code() == code && options_eq(&**o, value))
        else {
            return false;
        };
        self.entries.remove(pos);
        true
    }

    /// Remove all entries; the store becomes empty.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            trace!(removed = self.entries.len(), "cleared option store");
        }
        self.entries.clear();
    }

    /// Total wire length of all stored options: the sum over every option
    /// of its payload length plus [`OPTION_HEADER_LEN`].
    ///
    /// [`OPTION_HEADER_LEN`]: crate::OPTION_HEADER_LEN
    pub fn encoded_len(&self) -> usize {
        self.entries.iter().map(|o| o.encoded_len()).sum()
    }
}

impl fmt::Debug for Dhcp6Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dhcp6Options")?;
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Dhcp6Options {
    type Item = &'a dyn Dhcp6Option;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Iterator over all stored options in global insertion order.
#[derive(Clone)]
pub struct Iter<'a> {
    inner: slice::Iter<'a, Box<dyn Dhcp6Option>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a dyn Dhcp6Option;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|o| &**o)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// Lazy conversion iterator returned by [`Dhcp6Options::get_all`].
///
/// Each traversal step converts the next stored option under the resolved
/// code: borrowed when the stored instance already is a `T`, freshly
/// manufactured otherwise.
pub struct DecodedOptions<'a, T> {
    code: OptionCode,
    inner: slice::Iter<'a, Box<dyn Dhcp6Option>>,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T> Iterator for DecodedOptions<'a, T>
where
    T: Dhcp6Option + Default + Clone,
{
    type Item = Cow<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let stored = self.inner.next()?;
            if stored.code() == self.code {
                return Some(convert_to::<T>(&**stored));
            }
        }
    }
}

impl<T> Clone for DecodedOptions<'_, T> {
    fn clone(&self) -> Self {
        Self {
            code: self.code,
            inner: self.inner.clone(),
            _marker: PhantomData,
        }
    }
}
