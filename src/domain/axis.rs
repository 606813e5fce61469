// Domain calculator - visible X and Y ranges
use serde::Serialize;

/// A closed `[lo, hi]` range mapped onto an axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisDomain {
    pub lo: f64,
    pub hi: f64,
}

impl AxisDomain {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn span(&self) -> f64 {
        self.hi - self.lo
    }
}

/// X domain of exactly `window_duration`, right edge on the latest timestamp.
///
/// When less than a window of data is buffered the lower edge falls below the
/// earliest timestamp, leaving an empty lead-in region on the left.
pub fn compute_domain_x(time: &[f64], window_duration: f64) -> Option<AxisDomain> {
    let latest = *time.last()?;
    let lo = latest - window_duration;
    Some(AxisDomain::new(lo, lo + window_duration))
}

/// Global min/max over every buffered value of every series.
///
/// Non-finite values are skipped. Returns `None` when nothing finite is buffered.
pub fn compute_domain_y<'a, I>(columns: I) -> Option<AxisDomain>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    columns
        .into_iter()
        .flat_map(|values| values.iter().copied())
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some(AxisDomain::new(v, v)),
            Some(d) => Some(AxisDomain::new(d.lo.min(v), d.hi.max(v))),
        })
}

/// Linear map from a domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: AxisDomain,
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: AxisDomain, range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, value: f64) -> f64 {
        let span = self.domain.span();
        if span == 0.0 {
            return self.range.0;
        }
        let t = (value - self.domain.lo) / span;
        self.range.0 + t * (self.range.1 - self.range.0)
    }
}
