//! Canonical edge catalog and superpixel bookkeeping.
//!
//! The per-axis raw face pairs are canonicalized (`sp1 < sp2`), deduplicated
//! within each axis, merged, deduplicated again and sorted lexicographically.
//! Dense edge labels `0..num_edges` are assigned in that sorted order, so the
//! labeling is fully determined by the set of canonical pairs: rebuilding
//! from the same volume reproduces the identical catalog.

use crate::edges::RawAxisFaces;
use crate::volume::LabelVolume;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An adjacency between two distinct superpixels, stored with `sp1 < sp2`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CanonicalEdge {
    pub sp1: u32,
    pub sp2: u32,
}

impl CanonicalEdge {
    /// Canonicalize a raw physical pair. The two labels must differ.
    pub fn from_pair(u: u32, v: u32) -> Self {
        debug_assert_ne!(u, v, "a pixel face joins two distinct superpixels");
        if u < v {
            Self { sp1: u, sp2: v }
        } else {
            Self { sp1: v, sp2: u }
        }
    }
}

/// The deduplicated set of canonical edges, owning the dense label order.
///
/// Immutable after construction; `edge_label` is the index into [`edges`].
///
/// [`edges`]: EdgeCatalog::edges
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeCatalog {
    edges: Vec<CanonicalEdge>,
}

impl EdgeCatalog {
    /// Merge the raw per-axis face pairs into one deduplicated catalog.
    pub fn from_raw_axes(axes: &[RawAxisFaces]) -> Self {
        let mut merged: Vec<CanonicalEdge> = Vec::new();
        for faces in axes {
            let mut per_axis: Vec<CanonicalEdge> = faces
                .pairs
                .iter()
                .map(|&[u, v]| CanonicalEdge::from_pair(u, v))
                .collect();
            per_axis.sort_unstable();
            per_axis.dedup();
            merged.extend(per_axis);
        }
        merged.sort_unstable();
        merged.dedup();
        log::debug!("edge catalog holds {} canonical edges", merged.len());
        Self { edges: merged }
    }

    /// Rebuild a catalog from an already-sorted edge list (deserialization).
    pub(crate) fn from_sorted_edges(edges: Vec<CanonicalEdge>) -> Self {
        debug_assert!(edges.windows(2).all(|w| w[0] < w[1]));
        Self { edges }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> &[CanonicalEdge] {
        &self.edges
    }

    /// The canonical edge carrying a given dense label.
    pub fn edge(&self, edge_label: u32) -> CanonicalEdge {
        self.edges[edge_label as usize]
    }

    /// Dense label of `(sp1, sp2)`, if that adjacency exists.
    pub fn label_of(&self, sp1: u32, sp2: u32) -> Option<u32> {
        let probe = CanonicalEdge::from_pair(sp1, sp2);
        self.edges.binary_search(&probe).ok().map(|i| i as u32)
    }

    /// Hash lookup used for the per-face join; built once per construction.
    pub(crate) fn label_lookup(&self) -> HashMap<CanonicalEdge, u32> {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, &e)| (e, i as u32))
            .collect()
    }

    /// Attach dense edge labels to every raw face of one axis.
    ///
    /// Every face pair is catalogued by construction, so the join is total.
    pub(crate) fn attach_labels(
        &self,
        faces: &RawAxisFaces,
        lookup: &HashMap<CanonicalEdge, u32>,
    ) -> Vec<u32> {
        faces
            .pairs
            .iter()
            .map(|&[u, v]| lookup[&CanonicalEdge::from_pair(u, v)])
            .collect()
    }
}

/// Sorted, deduplicated superpixel ids: the union of catalog endpoints.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SuperpixelSet {
    ids: Vec<u32>,
}

impl SuperpixelSet {
    pub fn from_catalog(catalog: &EdgeCatalog) -> Self {
        let mut ids: Vec<u32> = catalog
            .edges()
            .iter()
            .flat_map(|e| [e.sp1, e.sp2])
            .collect();
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    /// Number of distinct superpixels participating in at least one edge.
    pub fn num_sp(&self) -> usize {
        self.ids.len()
    }

    /// Largest id, or 0 for an edge-free volume. May exceed `num_sp - 1`
    /// since ids are not required to be consecutive.
    pub fn max_sp(&self) -> u32 {
        self.ids.last().copied().unwrap_or(0)
    }

    /// Dense position of `id` in the sorted id list.
    pub fn dense_index(&self, id: u32) -> Option<usize> {
        self.ids.binary_search(&id).ok()
    }
}

/// One-shot convenience: the edge catalog of a volume, without building the
/// per-axis stores.
pub fn edge_catalog_for_volume(labels: &LabelVolume) -> EdgeCatalog {
    let raw: Vec<RawAxisFaces> = (0..labels.ndim())
        .map(|axis| crate::edges::raw_faces_for_axis(labels.data(), axis))
        .collect();
    EdgeCatalog::from_raw_axes(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::raw_faces_for_axis;
    use ndarray::arr2;

    #[test]
    fn catalog_is_sorted_deduplicated_and_canonical() {
        // 2 | 1
        // --+--
        // 1 | 3
        let labels = arr2(&[[2u32, 1], [1, 3]]).into_dyn();
        let raw = vec![
            raw_faces_for_axis(&labels, 0),
            raw_faces_for_axis(&labels, 1),
        ];
        let catalog = EdgeCatalog::from_raw_axes(&raw);
        let pairs: Vec<(u32, u32)> = catalog.edges().iter().map(|e| (e.sp1, e.sp2)).collect();
        assert_eq!(pairs, vec![(1, 2), (1, 3)]);
        assert_eq!(catalog.label_of(2, 1), Some(0));
        assert_eq!(catalog.label_of(3, 1), Some(1));
        assert_eq!(catalog.label_of(2, 3), None);
    }

    #[test]
    fn superpixel_set_is_the_union_of_endpoints() {
        let catalog = EdgeCatalog::from_sorted_edges(vec![
            CanonicalEdge { sp1: 1, sp2: 5 },
            CanonicalEdge { sp1: 5, sp2: 9 },
        ]);
        let sps = SuperpixelSet::from_catalog(&catalog);
        assert_eq!(sps.ids(), &[1, 5, 9]);
        assert_eq!(sps.num_sp(), 3);
        assert_eq!(sps.max_sp(), 9);
        assert_eq!(sps.dense_index(5), Some(1));
        assert_eq!(sps.dense_index(2), None);
    }
}
