//! Per-axis boundary pixel-face extraction.
//!
//! Overview
//! - For one axis, overlay two shifted views of the label volume: the "left"
//!   view (all but the last slice along that axis) and the "right" view (all
//!   but the first slice). Every position where the views disagree is a
//!   boundary pixel-face.
//! - Faces are emitted in the volume's logical (row-major) scan order, with
//!   the raw `(label_left, label_right)` pair kept in physical order so the
//!   forwardness of each face survives canonicalization downstream.
//! - Coordinates always refer to the physically-left voxel of the face and
//!   are stored as one column per dimension.
//!
//! No sorting or deduplication happens here; the catalog stage owns that.

use ndarray::{ArrayD, Axis, Dimension, Slice};

/// Raw boundary faces discovered along one axis, in scan order.
///
/// `pairs[i]` is the physical `[left, right]` label pair of face `i`;
/// `coords[d][i]` is the left voxel's coordinate along dimension `d`.
#[derive(Clone, Debug, Default)]
pub struct RawAxisFaces {
    pub axis: usize,
    pub pairs: Vec<[u32; 2]>,
    pub coords: Vec<Vec<u32>>,
}

impl RawAxisFaces {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Scan `labels` along `axis` and collect every boundary pixel-face.
///
/// A volume with extent 0 or 1 along the axis produces no faces.
pub fn raw_faces_for_axis(labels: &ArrayD<u32>, axis: usize) -> RawAxisFaces {
    let ndim = labels.ndim();
    debug_assert!(axis < ndim, "axis {axis} out of range for ndim {ndim}");

    let mut faces = RawAxisFaces {
        axis,
        pairs: Vec::new(),
        coords: vec![Vec::new(); ndim],
    };
    if labels.len_of(Axis(axis)) < 2 {
        return faces;
    }

    let left = labels.slice_axis(Axis(axis), Slice::from(..-1));
    let right = labels.slice_axis(Axis(axis), Slice::from(1..));

    // indexed_iter visits elements in logical order regardless of layout,
    // which is the emission-order guarantee callers rely on.
    for ((index, &l), &r) in left.indexed_iter().zip(right.iter()) {
        if l != r {
            faces.pairs.push([l, r]);
            for (column, &c) in faces.coords.iter_mut().zip(index.slice()) {
                column.push(c as u32);
            }
        }
    }
    faces
}
