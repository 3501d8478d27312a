//! Graph partitioning from boolean edge decisions.
//!
//! `true` keeps an edge active (its endpoints stay distinct); `false` marks
//! it inactive and merges its endpoints. Connected components over the
//! inactive subgraph define the output regions: components receive dense ids
//! starting at 1, assigned in sorted-superpixel order, and the label volume
//! is relabeled through that mapping.

use crate::error::RagError;
use crate::rag::Rag;
use log::debug;
use ndarray::ArrayD;
use petgraph::unionfind::UnionFind;
use std::collections::HashMap;

impl Rag {
    /// Map each superpixel id to its dense output component id (from 1).
    ///
    /// Superpixels untouched by an inactive edge stay singleton components.
    pub fn component_mapping(&self, edge_decisions: &[bool]) -> Result<HashMap<u32, u32>, RagError> {
        if edge_decisions.len() != self.num_edges() {
            return Err(RagError::ShapeMismatch {
                context: "edge decisions",
                expected: self.num_edges().to_string(),
                actual: edge_decisions.len().to_string(),
            });
        }

        let ids = self.superpixels().ids();
        let mut components = UnionFind::<usize>::new(ids.len());
        for (edge, &active) in self.edge_ids().iter().zip(edge_decisions) {
            if !active {
                let a = self
                    .superpixels()
                    .dense_index(edge.sp1)
                    .expect("catalog endpoints are in the superpixel set");
                let b = self
                    .superpixels()
                    .dense_index(edge.sp2)
                    .expect("catalog endpoints are in the superpixel set");
                components.union(a, b);
            }
        }

        // Dense component ids from 1, in sorted-superpixel order.
        let mut component_of_root: HashMap<usize, u32> = HashMap::new();
        let mut mapping = HashMap::with_capacity(ids.len());
        let mut next = 1u32;
        for (index, &id) in ids.iter().enumerate() {
            let root = components.find(index);
            let component = *component_of_root.entry(root).or_insert_with(|| {
                let c = next;
                next += 1;
                c
            });
            mapping.insert(id, component);
        }
        debug!(
            "partition: {} superpixels -> {} components",
            ids.len(),
            next - 1
        );
        Ok(mapping)
    }

    /// Apply edge decisions and relabel the volume into merged regions.
    ///
    /// Fails with `ShapeMismatch` when the decision count differs from
    /// `num_edges`, and with `NotAvailable` when the label pixels were not
    /// deserialized.
    pub fn partition(&self, edge_decisions: &[bool]) -> Result<ArrayD<u32>, RagError> {
        let labels = self.label_source().volume("partitioning")?;
        let mut mapping = self.component_mapping(edge_decisions)?;

        // Labels that never touched an edge (e.g. a single-superpixel volume)
        // get fresh ids in scan order.
        let mut next = mapping.values().copied().max().unwrap_or(0) + 1;
        let out = labels.data().mapv(|label| {
            *mapping.entry(label).or_insert_with(|| {
                let component = next;
                next += 1;
                component
            })
        });
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volume::{axes::axes_from_str, LabelVolume};
    use ndarray::arr2;

    fn quad_rag() -> Rag {
        // 1 1 2
        // 3 3 2
        let labels = arr2(&[[1u32, 1, 2], [3, 3, 2]]).into_dyn();
        Rag::build(LabelVolume::new(labels, axes_from_str("yx").unwrap()).unwrap())
    }

    #[test]
    fn decision_length_is_checked() {
        let rag = quad_rag();
        assert!(matches!(
            rag.partition(&[true]),
            Err(RagError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn inactive_edges_merge_their_endpoints() {
        let rag = quad_rag();
        // edges sorted: (1,2), (1,3), (2,3)
        let decisions = vec![true, false, true];
        let mapping = rag.component_mapping(&decisions).unwrap();
        assert_eq!(mapping[&1], mapping[&3]);
        assert_ne!(mapping[&1], mapping[&2]);

        let out = rag.partition(&decisions).unwrap();
        assert_eq!(out[[0, 0]], out[[1, 0]]);
        assert_ne!(out[[0, 0]], out[[0, 2]]);
    }

    #[test]
    fn single_label_volume_partitions_to_one_fresh_id() {
        let labels = arr2(&[[7u32, 7], [7, 7]]).into_dyn();
        let rag = Rag::build(LabelVolume::new(labels, axes_from_str("yx").unwrap()).unwrap());
        assert_eq!(rag.num_edges(), 0);
        let out = rag.partition(&[]).unwrap();
        assert!(out.iter().all(|&v| v == 1));
    }
}
