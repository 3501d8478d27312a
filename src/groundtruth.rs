//! Ground-truth edge decisions via majority voxel overlap.
//!
//! A sparse contingency table counts voxel co-occurrences between the RAG's
//! label volume and an independently-labeled reference volume. Each
//! superpixel maps to the reference id it overlaps most (ties break towards
//! the lowest reference id, keeping the mapping deterministic). An edge is
//! decided active (true) iff its endpoints map to different reference ids.

use crate::catalog::CanonicalEdge;
use crate::error::RagError;
use crate::rag::Rag;
use ndarray::ArrayD;
use std::collections::HashMap;

/// Sparse voxel co-occurrence counts keyed by `(id_a, id_b)`.
pub fn contingency_table(
    a: &ArrayD<u32>,
    b: &ArrayD<u32>,
) -> Result<HashMap<(u32, u32), u64>, RagError> {
    if a.shape() != b.shape() {
        return Err(RagError::ShapeMismatch {
            context: "contingency table",
            expected: format!("{:?}", a.shape()),
            actual: format!("{:?}", b.shape()),
        });
    }
    let mut table: HashMap<(u32, u32), u64> = HashMap::new();
    for (&ida, &idb) in a.iter().zip(b.iter()) {
        *table.entry((ida, idb)).or_insert(0) += 1;
    }
    Ok(table)
}

/// Map every id of `from` to the id of `to` it overlaps most.
///
/// Not commutative. Overlap ties resolve to the lowest `to` id.
pub fn label_mapping(
    from: &ArrayD<u32>,
    to: &ArrayD<u32>,
) -> Result<HashMap<u32, u32>, RagError> {
    let table = contingency_table(from, to)?;
    let mut best: HashMap<u32, (u64, u32)> = HashMap::new();
    for (&(ida, idb), &count) in &table {
        match best.get(&ida) {
            Some(&(best_count, best_id))
                if best_count > count || (best_count == count && best_id <= idb) => {}
            _ => {
                best.insert(ida, (count, idb));
            }
        }
    }
    Ok(best.into_iter().map(|(ida, (_, idb))| (ida, idb)).collect())
}

impl Rag {
    /// Boolean decisions in catalog order: true (active) iff the two
    /// superpixels of an edge map to different reference regions.
    ///
    /// An inactive decision means the edge should be merged away to best
    /// match the reference segmentation.
    pub fn decisions_from_groundtruth(
        &self,
        reference: &ArrayD<u32>,
    ) -> Result<Vec<bool>, RagError> {
        let labels = self.label_source().volume("ground-truth decisions")?;
        let mapping = label_mapping(labels.data(), reference)?;
        Ok(self
            .edge_ids()
            .iter()
            .map(|e| mapping.get(&e.sp1) != mapping.get(&e.sp2))
            .collect())
    }

    /// [`decisions_from_groundtruth`] keyed by canonical edge pair.
    ///
    /// [`decisions_from_groundtruth`]: Rag::decisions_from_groundtruth
    pub fn decisions_from_groundtruth_map(
        &self,
        reference: &ArrayD<u32>,
    ) -> Result<HashMap<CanonicalEdge, bool>, RagError> {
        let decisions = self.decisions_from_groundtruth(reference)?;
        Ok(self
            .edge_ids()
            .iter()
            .copied()
            .zip(decisions)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn contingency_counts_cooccurrences() {
        let a = arr2(&[[1u32, 1], [2, 2]]).into_dyn();
        let b = arr2(&[[10u32, 10], [10, 20]]).into_dyn();
        let table = contingency_table(&a, &b).unwrap();
        assert_eq!(table[&(1, 10)], 2);
        assert_eq!(table[&(2, 10)], 1);
        assert_eq!(table[&(2, 20)], 1);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn mapping_prefers_majority_then_lowest_id() {
        let from = arr2(&[[1u32, 1, 1], [2, 2, 2]]).into_dyn();
        let to = arr2(&[[10u32, 10, 20], [30, 40, 30]]).into_dyn();
        let mapping = label_mapping(&from, &to).unwrap();
        assert_eq!(mapping[&1], 10);
        // 2 overlaps 30 twice, 40 once
        assert_eq!(mapping[&2], 30);

        // exact tie: 3 overlaps 50 and 60 equally -> lowest wins
        let from = arr2(&[[3u32, 3]]).into_dyn();
        let to = arr2(&[[60u32, 50]]).into_dyn();
        assert_eq!(label_mapping(&from, &to).unwrap()[&3], 50);
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let a = arr2(&[[1u32, 1]]).into_dyn();
        let b = arr2(&[[1u32], [1]]).into_dyn();
        assert!(matches!(
            contingency_table(&a, &b),
            Err(RagError::ShapeMismatch { .. })
        ));
    }
}
