use crate::error::{check_range, ModelError, Result};

/// The fixed sample schedule shared by a model's curve and its data.
///
/// `len` evenly spaced coordinates from `lo` to `hi`, both ends
/// included. A single-point grid sits at `lo`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleGrid {
    len: usize,
    lo: f64,
    hi: f64,
}

impl SampleGrid {
    pub fn new(len: usize, lo: f64, hi: f64) -> Result<Self> {
        if len == 0 {
            return Err(ModelError::EmptyGrid);
        }
        let (lo, hi) = check_range(lo, hi)?;
        Ok(SampleGrid { len, lo, hi })
    }

    /// `len` points on the unit interval.
    pub(crate) const fn unit(len: usize) -> Self {
        SampleGrid {
            len,
            lo: 0.0,
            hi: 1.0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn range(&self) -> f64 {
        self.hi - self.lo
    }

    /// Distance between neighbouring coordinates.
    pub fn spacing(&self) -> f64 {
        if self.len > 1 {
            self.range() / (self.len - 1) as f64
        } else {
            self.range()
        }
    }

    pub fn coordinate(&self, idx: usize) -> f64 {
        self.lo + idx as f64 * self.spacing()
    }

    pub fn coordinates(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        (0..self.len).map(move |idx| self.coordinate(idx))
    }
}
