//! Statistical feature aggregation over edges and superpixels.
//!
//! Overview
//! - Edge features (`edge_<stat>`): every boundary pixel-face contributes one
//!   sample, the mean of the value volume at the physically-left and -right
//!   voxels of the face. Samples are grouped by dense edge label across all
//!   axes; each axis is accumulated into its own partial table and the
//!   partials are merged, so the result is independent of axis order.
//! - Superpixel features (`sp_<stat>`): every voxel contributes its value to
//!   the accumulator of its superpixel id. Each edge then emits two columns,
//!   `sp_<stat>_sum` and `sp_<stat>_difference`, over its endpoint values.
//!   `sp_count` endpoint counts are first raised to a reduction exponent
//!   (default `1/ndim`, i.e. square root in 2D and cube root in 3D, the
//!   size-normalization convention of multicut pipelines).
//!
//! All samples are 32-bit floats; the accumulator capability guarantees
//! merge-order independence (see the `accum` module).

pub mod names;

pub use names::{FeatureName, FeatureScope, Statistic};

use crate::accum::{MomentAccumulator, StatAccumulator};
use crate::error::RagError;
use crate::rag::Rag;
use crate::store::AxialEdgeTable;
use crate::volume::ValueVolume;
use log::debug;
use std::collections::HashMap;

/// Knobs for feature aggregation.
#[derive(Clone, Debug, Default)]
pub struct FeatureParams {
    /// Exponent applied to `sp_count` endpoint counts before the sum and
    /// difference columns are formed. `None` uses `1 / ndim`, matching the
    /// documented square/cube-root convention for 2D/3D volumes.
    pub count_reduction_exponent: Option<f32>,
}

/// One named output column of `f32` values in edge-label order.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureColumn {
    pub name: String,
    pub values: Vec<f32>,
}

/// Per-edge feature table keyed by `(sp1, sp2)` in catalog order.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureTable {
    sp1: Vec<u32>,
    sp2: Vec<u32>,
    columns: Vec<FeatureColumn>,
}

impl FeatureTable {
    fn new(rag: &Rag) -> Self {
        Self {
            sp1: rag.edge_ids().iter().map(|e| e.sp1).collect(),
            sp2: rag.edge_ids().iter().map(|e| e.sp2).collect(),
            columns: Vec::new(),
        }
    }

    pub fn num_rows(&self) -> usize {
        self.sp1.len()
    }

    pub fn sp1(&self) -> &[u32] {
        &self.sp1
    }

    pub fn sp2(&self) -> &[u32] {
        &self.sp2
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    /// Values of a column by its output name, e.g. `"sp_mean_sum"`.
    pub fn column(&self, name: &str) -> Option<&[f32]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    fn push(&mut self, name: String, values: Vec<f32>) {
        debug_assert_eq!(values.len(), self.num_rows());
        self.columns.push(FeatureColumn { name, values });
    }
}

impl Rag {
    /// Compute edge/superpixel features with the built-in accumulator.
    ///
    /// `values` must match the label volume's shape; feature names follow the
    /// grammar in [`names`]. Returns one `edge_<stat>` column per edge
    /// feature and a `_sum`/`_difference` column pair per superpixel feature,
    /// edge features first, each group in request order.
    pub fn compute_features(
        &self,
        values: &ValueVolume,
        feature_names: &[&str],
    ) -> Result<FeatureTable, RagError> {
        self.compute_features_with::<MomentAccumulator>(
            values,
            feature_names,
            &FeatureParams::default(),
        )
    }

    /// [`compute_features`] generalized over any accumulator capability.
    ///
    /// [`compute_features`]: Rag::compute_features
    pub fn compute_features_with<A: StatAccumulator>(
        &self,
        values: &ValueVolume,
        feature_names: &[&str],
        params: &FeatureParams,
    ) -> Result<FeatureTable, RagError> {
        let parsed: Vec<FeatureName> = feature_names
            .iter()
            .map(|raw| FeatureName::parse(raw))
            .collect::<Result<_, _>>()?;

        let label_shape = self.label_source().shape();
        if values.shape() != label_shape {
            return Err(RagError::ShapeMismatch {
                context: "value volume",
                expected: format!("{label_shape:?}"),
                actual: format!("{:?}", values.shape()),
            });
        }

        let edge_stats: Vec<Statistic> = parsed
            .iter()
            .filter(|n| n.scope == FeatureScope::Edge)
            .map(|n| n.statistic)
            .collect();
        let sp_stats: Vec<Statistic> = parsed
            .iter()
            .filter(|n| n.scope == FeatureScope::Superpixel)
            .map(|n| n.statistic)
            .collect();

        let mut table = FeatureTable::new(self);
        if !edge_stats.is_empty() {
            self.append_edge_features::<A>(values, &edge_stats, &mut table);
        }
        if !sp_stats.is_empty() {
            self.append_sp_features::<A>(values, &sp_stats, params, &mut table)?;
        }
        Ok(table)
    }

    fn append_edge_features<A: StatAccumulator>(
        &self,
        values: &ValueVolume,
        stats: &[Statistic],
        table: &mut FeatureTable,
    ) {
        let num_edges = self.num_edges();
        let mut merged: Vec<A> = vec![A::for_stats(stats); num_edges];

        for axial in self.axial_tables() {
            debug!(
                "edge features: axis {} ingesting {} faces",
                axial.axis(),
                axial.len()
            );
            let partial = accumulate_axis::<A>(axial, values, stats, num_edges);
            for (dst, src) in merged.iter_mut().zip(&partial) {
                dst.merge(src);
            }
        }

        for stat in stats {
            let column: Vec<f32> = merged.iter().map(|acc| acc.extract(*stat)).collect();
            table.push(format!("edge_{}", stat.suffix()), column);
        }
    }

    fn append_sp_features<A: StatAccumulator>(
        &self,
        values: &ValueVolume,
        stats: &[Statistic],
        params: &FeatureParams,
        table: &mut FeatureTable,
    ) -> Result<(), RagError> {
        let labels = self.label_source().volume("superpixel features")?;
        debug!(
            "superpixel features: ingesting {} voxels",
            values.data().len()
        );

        let mut per_sp: HashMap<u32, A> = HashMap::new();
        for (&label, &value) in labels.data().iter().zip(values.data().iter()) {
            per_sp
                .entry(label)
                .or_insert_with(|| A::for_stats(stats))
                .ingest(value);
        }

        let exponent = params
            .count_reduction_exponent
            .unwrap_or(1.0 / labels.ndim() as f32);

        for stat in stats {
            let endpoint = |sp: u32| -> f32 {
                let raw = per_sp
                    .get(&sp)
                    .map_or(f32::NAN, |acc| acc.extract(*stat));
                if *stat == Statistic::Count {
                    raw.powf(exponent)
                } else {
                    raw
                }
            };
            let mut sums = Vec::with_capacity(table.num_rows());
            let mut differences = Vec::with_capacity(table.num_rows());
            for edge in self.edge_ids() {
                let v1 = endpoint(edge.sp1);
                let v2 = endpoint(edge.sp2);
                sums.push(v1 + v2);
                differences.push(v1 - v2);
            }
            table.push(format!("sp_{}_sum", stat.suffix()), sums);
            table.push(format!("sp_{}_difference", stat.suffix()), differences);
        }
        Ok(())
    }
}

/// Accumulate the per-face samples of one axis into a fresh partial table.
fn accumulate_axis<A: StatAccumulator>(
    axial: &AxialEdgeTable,
    values: &ValueVolume,
    stats: &[Statistic],
    num_edges: usize,
) -> Vec<A> {
    let mut partial: Vec<A> = vec![A::for_stats(stats); num_edges];
    let axis = axial.axis();
    let mut coord = vec![0usize; axial.coords().ndim()];
    for row in 0..axial.len() {
        axial.coords().fill_coord(row, &mut coord);
        let left = values.get(&coord);
        coord[axis] += 1;
        let right = values.get(&coord);
        let sample = 0.5 * (left + right);
        partial[axial.edge_labels()[row] as usize].ingest(sample);
    }
    partial
}
