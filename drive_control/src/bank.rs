//! Per-axis instance banks.
//!
//! Engines are not shared between axes. A bank holds one independent
//! instance per axis and steps them side by side, so a multi-axis drive
//! gets the same dynamics on every axis without any instance being
//! touched from two call sites.

use drive_common::consts::MAX_AXES;
use tracing::debug;

use crate::error::DesignError;
use crate::linear::discretize::DiscretizeOptions;
use crate::transfer::TransferFunction;

/// Fixed set of `AXES` independent instances.
#[derive(Debug)]
pub struct AxisBank<T, const AXES: usize> {
    axes: [T; AXES],
}

impl<T, const AXES: usize> AxisBank<T, AXES> {
    /// Build each axis with `make(axis_index)`.
    pub fn from_fn(make: impl FnMut(usize) -> T) -> Result<Self, DesignError> {
        check_axes(AXES)?;
        Ok(Self {
            axes: core::array::from_fn(make),
        })
    }

    /// Wrap already built instances.
    pub fn from_axes(axes: [T; AXES]) -> Result<Self, DesignError> {
        check_axes(AXES)?;
        Ok(Self { axes })
    }

    #[inline]
    pub fn axis(&self, index: usize) -> Option<&T> {
        self.axes.get(index)
    }

    #[inline]
    pub fn axis_mut(&mut self, index: usize) -> Option<&mut T> {
        self.axes.get_mut(index)
    }

    #[inline]
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.axes.iter_mut()
    }

    #[inline]
    pub const fn len(&self) -> usize {
        AXES
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        AXES == 0
    }
}

impl<const ORDER: usize, const AXES: usize> AxisBank<TransferFunction<ORDER>, AXES> {
    /// Same transfer function on every axis, discretized once.
    pub fn transfer_functions(
        num: &[f64],
        den: &[f64],
        ts: f64,
        options: DiscretizeOptions,
    ) -> Result<Self, DesignError> {
        let prototype = TransferFunction::<ORDER>::new(num, den, ts, options)?;
        let model = *prototype.discrete_model();
        debug!(axes = AXES, order = ORDER, "transfer function bank configured");
        Self::from_fn(|_| TransferFunction::from_discrete(model))
    }

    /// One tick on every axis.
    #[inline]
    pub fn respond(&mut self, u: &[f64; AXES]) -> [f64; AXES] {
        core::array::from_fn(|i| self.axes[i].respond(u[i]))
    }

    /// Zero every axis.
    pub fn reset(&mut self) {
        self.axes.iter_mut().for_each(TransferFunction::reset);
    }
}

fn check_axes(axes: usize) -> Result<(), DesignError> {
    if axes == 0 || axes > MAX_AXES {
        return Err(DesignError::InvalidParameters(format!(
            "axis count {axes} out of range [1, {MAX_AXES}]"
        )));
    }
    Ok(())
}
