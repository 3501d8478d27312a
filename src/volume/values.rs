//! Scalar value volumes sampled during feature aggregation.
//!
//! Feature statistics are always accumulated as 32-bit floats; integer or
//! double input is converted up front via [`ValueVolume::convert`].

use ndarray::{ArrayD, IxDyn};
use num_traits::ToPrimitive;

/// An N-dimensional `f32` value volume aligned in shape with a label volume.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueVolume {
    data: ArrayD<f32>,
}

impl ValueVolume {
    pub fn from_array(data: ArrayD<f32>) -> Self {
        Self { data }
    }

    /// Convert any numeric array to `f32`. Values outside the `f32` range
    /// become NaN rather than silently wrapping.
    pub fn convert<T: ToPrimitive + Clone>(data: &ArrayD<T>) -> Self {
        Self {
            data: data.mapv(|v| v.to_f32().unwrap_or(f32::NAN)),
        }
    }

    pub fn data(&self) -> &ArrayD<f32> {
        &self.data
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Sample the value at an ND index.
    pub fn get(&self, index: &[usize]) -> f32 {
        self.data[IxDyn(index)]
    }
}
