//! Ordered composition of filters.

use rtfilter_errors::{ConfigurationError, FilterResult, OperationError};
use tracing::debug;

use crate::any_filter::AnyFilter;
use crate::filter::Filter;

/// A sequence of filters applied in order.
///
/// `update(x)` feeds `x` to the first member, its output to the second, and
/// so on, returning the last member's output. The chain keeps its own
/// sample counter; members keep theirs.
///
/// Every member must run at a fixed rate
/// ([`Filter::supports_fixed_rate`]); variable-rate-only filters are
/// refused at construction and on [`FilterChain::add_filter`].
///
/// # Example
///
/// ```
/// use rtfilter::prelude::*;
///
/// let mut chain = FilterChain::new(vec![
///     Median::new(3, 0.0)?.into(),
///     Alpha::new(0.5, 0.0)?.into(),
/// ])?;
/// let y = chain.update(2.0)?;
/// assert_eq!(y, 1.0);
/// assert_eq!(chain.len(), 2);
/// # Ok::<(), rtfilter::FilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilterChain {
    filters: Vec<AnyFilter>,
    count: u64,
}

fn check_member(index: usize, filter: &AnyFilter) -> FilterResult<()> {
    if filter.supports_fixed_rate() {
        return Ok(());
    }
    debug!(index, kind = filter.kind(), "refusing variable-rate-only chain member");
    Err(ConfigurationError::new(
        "filters",
        "fixed-rate capable at every index",
        index as f64,
    )
    .into())
}

impl FilterChain {
    /// Build a chain from at least one member.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `filters` is empty or a member
    /// cannot run at a fixed rate.
    pub fn new(filters: Vec<AnyFilter>) -> FilterResult<Self> {
        ConfigurationError::non_empty("filters", filters.len())?;
        for (index, filter) in filters.iter().enumerate() {
            check_member(index, filter)?;
        }
        debug!(len = filters.len(), "filter chain built");
        Ok(Self { filters, count: 0 })
    }

    /// Append a member. Existing members keep their state.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the filter cannot run at a fixed rate.
    pub fn add_filter(&mut self, filter: impl Into<AnyFilter>) -> FilterResult<()> {
        let filter = filter.into();
        check_member(self.filters.len(), &filter)?;
        debug!(kind = filter.kind(), index = self.filters.len(), "filter appended to chain");
        self.filters.push(filter);
        Ok(())
    }

    /// Remove and return the member at `index`. Other members keep their state.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::IndexOutOfRange`] for a bad index, or a
    /// configuration error if removal would leave the chain empty.
    pub fn remove_filter(&mut self, index: usize) -> FilterResult<AnyFilter> {
        let len = self.filters.len();
        if index >= len {
            return Err(OperationError::IndexOutOfRange { index, len }.into());
        }
        if len == 1 {
            return Err(ConfigurationError::new("filters", "at least 1 after removal", 0.0).into());
        }
        let removed = self.filters.remove(index);
        debug!(kind = removed.kind(), index, "filter removed from chain");
        Ok(removed)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Always false; a chain has at least one member.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Member at `index`.
    pub fn get(&self, index: usize) -> Option<&AnyFilter> {
        self.filters.get(index)
    }

    /// Mutable member at `index`, for retuning in place.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut AnyFilter> {
        self.filters.get_mut(index)
    }

    /// Members in processing order.
    pub fn iter(&self) -> core::slice::Iter<'_, AnyFilter> {
        self.filters.iter()
    }
}

impl<'a> IntoIterator for &'a FilterChain {
    type Item = &'a AnyFilter;
    type IntoIter = core::slice::Iter<'a, AnyFilter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}

impl Filter for FilterChain {
    /// Thread `x` through every member.
    ///
    /// A member error aborts the pass; members before it have already
    /// advanced.
    #[inline]
    fn update(&mut self, x: f32) -> FilterResult<f32> {
        let mut value = x;
        for filter in &mut self.filters {
            value = filter.update(value)?;
        }
        self.count = self.count.saturating_add(1);
        Ok(value)
    }

    fn reset(&mut self) {
        for filter in &mut self.filters {
            filter.reset();
        }
        self.count = 0;
    }

    fn sample_count(&self) -> u64 {
        self.count
    }

    fn supports_fixed_rate(&self) -> bool {
        self.filters.iter().all(Filter::supports_fixed_rate)
    }
}
