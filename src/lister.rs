//! Bounded consumption of a paginated listing
//!
//! [`BoundedLister`] pulls records from a provider-supplied iterator until the
//! caller's cap is reached or the provider is exhausted, whichever comes first.
//! The provider has already applied owner, prefix and cursor filtering, so the
//! lister keeps the provider's order and never filters, sorts or deduplicates.

use crate::error::{Result as ShResult, ShellError};

/// Caps a listing at `max_results` records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedLister {
    max_results: usize,
}

impl BoundedLister {
    /// Create a lister returning at most `max_results` records
    ///
    /// # Errors
    /// `InvalidArgument` if `max_results` is zero.
    pub fn new(max_results: usize) -> ShResult<Self> {
        if max_results == 0 {
            return Err(ShellError::InvalidArgument(
                "max results must be a positive number".to_string(),
            ));
        }
        Ok(BoundedLister { max_results })
    }

    /// A lister that returns everything the provider yields
    pub fn unbounded() -> Self {
        BoundedLister {
            max_results: usize::MAX,
        }
    }

    /// Consume `source` into an ordered, size-capped list
    ///
    /// `source` is forward-only: once the cap is reached it is not pulled again.
    /// The first provider error stops consumption and is returned unchanged.
    pub fn list<T, I>(&self, source: I) -> ShResult<Vec<T>>
    where
        I: IntoIterator<Item = ShResult<T>>,
    {
        let mut remaining = self.max_results;
        let mut items = Vec::new();
        let mut source = source.into_iter();

        while remaining > 0 {
            match source.next() {
                Some(item) => items.push(item?),
                None => break,
            }
            remaining -= 1;
        }

        log::debug!(
            "bounded listing collected {} record(s), cap {}",
            items.len(),
            self.max_results
        );
        Ok(items)
    }
}

impl Default for BoundedLister {
    fn default() -> Self {
        Self::unbounded()
    }
}
