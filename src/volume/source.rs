//! In-memory vs deferred label volumes.
//!
//! A persisted RAG may deliberately omit the label pixels (`valid_data =
//! false`). Deserializing such a file yields a [`LabelSource::Deferred`]
//! carrying only the structural header; every pixel-accessing operation must
//! go through [`LabelSource::volume`], which surfaces
//! [`RagError::NotAvailable`] on the deferred arm.

use super::{AxisId, LabelVolume};
use crate::error::RagError;
use serde::{Deserialize, Serialize};

/// Structural metadata of a label volume: shape, dtype name, axis identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VolumeHeader {
    pub shape: Vec<usize>,
    pub dtype: String,
    pub axes: Vec<AxisId>,
}

/// The label volume backing a RAG: fully materialized, or header-only.
#[derive(Clone, Debug, PartialEq)]
pub enum LabelSource {
    InMemory(LabelVolume),
    Deferred(VolumeHeader),
}

impl LabelSource {
    /// Borrow the materialized volume, or fail if only a header is present.
    ///
    /// `operation` names the caller in the error message.
    pub fn volume(&self, operation: &'static str) -> Result<&LabelVolume, RagError> {
        match self {
            LabelSource::InMemory(vol) => Ok(vol),
            LabelSource::Deferred(_) => Err(RagError::NotAvailable { operation }),
        }
    }

    pub fn is_in_memory(&self) -> bool {
        matches!(self, LabelSource::InMemory(_))
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            LabelSource::InMemory(vol) => vol.shape(),
            LabelSource::Deferred(header) => &header.shape,
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    pub fn dtype(&self) -> &str {
        match self {
            LabelSource::InMemory(_) => super::LABEL_DTYPE,
            LabelSource::Deferred(header) => &header.dtype,
        }
    }

    pub fn axes(&self) -> &[AxisId] {
        match self {
            LabelSource::InMemory(vol) => vol.axes(),
            LabelSource::Deferred(header) => &header.axes,
        }
    }

    pub fn header(&self) -> VolumeHeader {
        match self {
            LabelSource::InMemory(vol) => vol.header(),
            LabelSource::Deferred(header) => header.clone(),
        }
    }
}
