//! RAG construction and the top-level read API.
//!
//! Overview
//! - Scans the label volume once per axis to collect raw boundary faces
//!   (`edges` module), keeping physical left/right order.
//! - Unifies the per-axis pairs into the canonical [`EdgeCatalog`] and joins
//!   the dense edge labels back onto every face (`catalog` module).
//! - Freezes the result into per-axis [`AxialEdgeTable`]s (`store` module).
//!
//! Everything is built once and thereafter read-only; feature computation,
//! partitioning and serialization only borrow the stores.

use crate::catalog::{CanonicalEdge, EdgeCatalog, SuperpixelSet};
use crate::edges::{raw_faces_for_axis, RawAxisFaces};
use crate::error::RagError;
use crate::store::AxialEdgeTable;
use crate::volume::{LabelSource, LabelVolume};
use log::debug;

/// Region adjacency graph of a superpixel label volume.
pub struct Rag {
    labels: LabelSource,
    catalog: EdgeCatalog,
    superpixels: SuperpixelSet,
    tables: Vec<AxialEdgeTable>,
}

impl Rag {
    /// Build the RAG of a label volume.
    pub fn build(labels: LabelVolume) -> Self {
        let shape = labels.shape().to_vec();
        debug!("Rag::build start shape={shape:?} axes={:?}", labels.axes());

        let raw: Vec<RawAxisFaces> = (0..labels.ndim())
            .map(|axis| {
                let faces = raw_faces_for_axis(labels.data(), axis);
                debug!("axis {axis}: {} boundary pixel-faces", faces.len());
                faces
            })
            .collect();

        let catalog = EdgeCatalog::from_raw_axes(&raw);
        let superpixels = SuperpixelSet::from_catalog(&catalog);
        let lookup = catalog.label_lookup();
        let tables: Vec<AxialEdgeTable> = raw
            .into_iter()
            .map(|faces| {
                let edge_labels = catalog.attach_labels(&faces, &lookup);
                AxialEdgeTable::from_raw(faces, edge_labels, &shape)
            })
            .collect();

        debug!(
            "Rag::build done num_sp={} num_edges={} faces={}",
            superpixels.num_sp(),
            catalog.len(),
            tables.iter().map(AxialEdgeTable::len).sum::<usize>()
        );
        Self {
            labels: LabelSource::InMemory(labels),
            catalog,
            superpixels,
            tables,
        }
    }

    /// Reassemble a RAG from persisted parts (used by the codec).
    pub(crate) fn from_parts(
        labels: LabelSource,
        catalog: EdgeCatalog,
        tables: Vec<AxialEdgeTable>,
    ) -> Self {
        let superpixels = SuperpixelSet::from_catalog(&catalog);
        Self {
            labels,
            catalog,
            superpixels,
            tables,
        }
    }

    pub fn label_source(&self) -> &LabelSource {
        &self.labels
    }

    /// The materialized label volume, or `NotAvailable` after a deferred
    /// deserialization.
    pub fn label_volume(&self) -> Result<&LabelVolume, RagError> {
        self.labels.volume("label volume access")
    }

    pub fn catalog(&self) -> &EdgeCatalog {
        &self.catalog
    }

    pub fn superpixels(&self) -> &SuperpixelSet {
        &self.superpixels
    }

    /// Canonical `(sp1, sp2)` pairs in edge-label order.
    pub fn edge_ids(&self) -> &[CanonicalEdge] {
        self.catalog.edges()
    }

    pub fn num_edges(&self) -> usize {
        self.catalog.len()
    }

    pub fn num_sp(&self) -> usize {
        self.superpixels.num_sp()
    }

    pub fn max_sp(&self) -> u32 {
        self.superpixels.max_sp()
    }

    /// Per-axis pixel-face tables, indexed by axis.
    pub fn axial_tables(&self) -> &[AxialEdgeTable] {
        &self.tables
    }

    /// Total boundary pixel-face count across all axes.
    pub fn total_faces(&self) -> usize {
        self.tables.iter().map(AxialEdgeTable::len).sum()
    }
}
