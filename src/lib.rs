#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod catalog;
pub mod error;
pub mod features;
pub mod io;
pub mod volume;

// Lower-level building blocks – public, but considered unstable internals.
pub mod accum;
pub mod edges;
pub mod groundtruth;
pub mod partition;
pub mod store;

mod rag;

// --- High-level re-exports -------------------------------------------------

// Main entry point: the RAG itself.
pub use crate::rag::Rag;

// Core data model.
pub use crate::catalog::{CanonicalEdge, EdgeCatalog, SuperpixelSet};
pub use crate::error::RagError;
pub use crate::store::{AxialEdgeTable, PixelFaceRecord};
pub use crate::volume::{AxisId, LabelSource, LabelVolume, ValueVolume};

// Feature aggregation surface.
pub use crate::accum::{MomentAccumulator, StatAccumulator};
pub use crate::features::{FeatureParams, FeatureTable};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use ndarray::ArrayD;
/// use superpixel_rag::prelude::*;
/// use superpixel_rag::volume::axes::axes_from_str;
///
/// # fn main() -> Result<(), superpixel_rag::RagError> {
/// let labels = ArrayD::<u32>::zeros(ndarray::IxDyn(&[32, 32]));
/// let rag = Rag::build(LabelVolume::new(labels, axes_from_str("yx")?)?);
/// println!("{} edges over {} superpixels", rag.num_edges(), rag.num_sp());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::features::FeatureTable;
    pub use crate::volume::{LabelVolume, ValueVolume};
    pub use crate::{Rag, RagError};
}
