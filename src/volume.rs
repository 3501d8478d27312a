//! Label and value volumes with explicit axis identity.
//!
//! The label volume is an N-dimensional `u32` array (superpixel ids) tagged
//! with spatial axis identifiers from the fixed `z`/`y`/`x` set. The `u32`
//! element type enforces the dtype restriction statically; persisted dtype
//! names are re-checked by the codec on deserialization.
//!
//! A RAG that was deserialized without pixel data carries a [`LabelSource::Deferred`]
//! header instead of a full volume: structural queries (shape, dtype, axes)
//! keep working, pixel-level operations fail with `RagError::NotAvailable`.

pub mod axes;
pub mod source;
pub mod values;

pub use axes::AxisId;
pub use source::{LabelSource, VolumeHeader};
pub use values::ValueVolume;

use crate::error::RagError;
use ndarray::ArrayD;

/// Dtype name recorded in persisted volume headers.
pub const LABEL_DTYPE: &str = "uint32";

/// An N-dimensional superpixel label volume with axis identity.
///
/// Label values do not need to be consecutive; excessively sparse id spaces
/// only cost memory in per-superpixel feature lookups, not in the stores.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelVolume {
    data: ArrayD<u32>,
    axes: Vec<AxisId>,
}

impl LabelVolume {
    /// Wrap a label array, validating the axis identifiers against its rank.
    pub fn new(data: ArrayD<u32>, axes: Vec<AxisId>) -> Result<Self, RagError> {
        axes::validate_axes(&axes, data.ndim())?;
        Ok(Self { data, axes })
    }

    pub fn data(&self) -> &ArrayD<u32> {
        &self.data
    }

    pub fn axes(&self) -> &[AxisId] {
        &self.axes
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Structural metadata describing this volume.
    pub fn header(&self) -> VolumeHeader {
        VolumeHeader {
            shape: self.shape().to_vec(),
            dtype: LABEL_DTYPE.to_string(),
            axes: self.axes.clone(),
        }
    }

    /// Consume the wrapper and return the raw array and axis tags.
    pub fn into_parts(self) -> (ArrayD<u32>, Vec<AxisId>) {
        (self.data, self.axes)
    }
}
