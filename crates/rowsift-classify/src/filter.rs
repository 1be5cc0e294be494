#![deny(unsafe_code)]

//! The classification predicate seam.

use rowsift_model::AttributeView;

/// A named classification predicate over a record's raw and translated views.
///
/// Returning `Ok(true)` claims the record for this filter's bucket. Filters
/// may carry state across records (counters, seen-sets); the chain owns its
/// filters and visits them one at a time, so `matches` takes `&mut self` and
/// never needs internal synchronization. [`Filter::reset`] clears any such
/// state at the start of a run.
///
/// A returned error is treated as a configuration defect and aborts the run.
pub trait Filter: Send {
    fn matches(&mut self, raw: &AttributeView, translated: &AttributeView)
    -> anyhow::Result<bool>;

    /// Clear cross-record state accumulated in a prior run. No-op by default.
    fn reset(&mut self) {}
}

struct FnFilter<F> {
    func: F,
}

impl<F> Filter for FnFilter<F>
where
    F: FnMut(&AttributeView, &AttributeView) -> bool + Send,
{
    fn matches(
        &mut self,
        raw: &AttributeView,
        translated: &AttributeView,
    ) -> anyhow::Result<bool> {
        Ok((self.func)(raw, translated))
    }
}

/// Wrap an infallible predicate closure as a [`Filter`].
pub fn filter_fn<F>(func: F) -> Box<dyn Filter>
where
    F: FnMut(&AttributeView, &AttributeView) -> bool + Send + 'static,
{
    Box::new(FnFilter { func })
}

struct TryFnFilter<F> {
    func: F,
}

impl<F> Filter for TryFnFilter<F>
where
    F: FnMut(&AttributeView, &AttributeView) -> anyhow::Result<bool> + Send,
{
    fn matches(
        &mut self,
        raw: &AttributeView,
        translated: &AttributeView,
    ) -> anyhow::Result<bool> {
        (self.func)(raw, translated)
    }
}

/// Wrap a fallible predicate closure as a [`Filter`].
pub fn try_filter_fn<F>(func: F) -> Box<dyn Filter>
where
    F: FnMut(&AttributeView, &AttributeView) -> anyhow::Result<bool> + Send + 'static,
{
    Box::new(TryFnFilter { func })
}
