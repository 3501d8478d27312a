//! Deterministic label/value volumes used across the integration tests.

use ndarray::{ArrayD, IxDyn};
use superpixel_rag::volume::axes::axes_from_str;
use superpixel_rag::{LabelVolume, ValueVolume};

/// `1×1×4` volume with labels `[1, 1, 2, 2]` along its only non-trivial axis.
pub fn strip_1x1x4() -> LabelVolume {
    let data = ArrayD::from_shape_vec(IxDyn(&[1, 1, 4]), vec![1u32, 1, 2, 2]).unwrap();
    LabelVolume::new(data, axes_from_str("zyx").unwrap()).unwrap()
}

/// `4×4` 2D volume split into four quadrants:
///
/// ```text
/// 1 1 2 2
/// 1 1 2 2
/// 3 3 4 4
/// 3 3 4 4
/// ```
pub fn quadrants_2d() -> LabelVolume {
    let mut data = ArrayD::zeros(IxDyn(&[4, 4]));
    for y in 0..4 {
        for x in 0..4 {
            let label = 1 + (y / 2) as u32 * 2 + (x / 2) as u32;
            data[[y, x]] = label;
        }
    }
    LabelVolume::new(data, axes_from_str("yx").unwrap()).unwrap()
}

/// `3×3` 2D volume with one label per row: rows `1`, `2`, `3`.
pub fn three_rows_2d() -> LabelVolume {
    let mut data = ArrayD::zeros(IxDyn(&[3, 3]));
    for y in 0..3 {
        for x in 0..3 {
            data[[y, x]] = 1 + y as u32;
        }
    }
    LabelVolume::new(data, axes_from_str("yx").unwrap()).unwrap()
}

/// 3D volume (`1×5×7`) whose two labels cover exactly 8 and 27 voxels, in
/// scan order: the first 8 voxels are label 1, the remaining 27 label 2.
pub fn count_blocks_3d() -> LabelVolume {
    let data: Vec<u32> = (0..35).map(|i| if i < 8 { 1 } else { 2 }).collect();
    let data = ArrayD::from_shape_vec(IxDyn(&[1, 5, 7]), data).unwrap();
    LabelVolume::new(data, axes_from_str("zyx").unwrap()).unwrap()
}

/// Value volume enumerating voxels in scan order: `0, 1, 2, ...`.
pub fn ramp_values(shape: &[usize]) -> ValueVolume {
    let len: usize = shape.iter().product();
    let data = ArrayD::from_shape_vec(IxDyn(shape), (0..len).map(|i| i as f32).collect()).unwrap();
    ValueVolume::from_array(data)
}

/// Value volume equal to the label id at every voxel.
pub fn label_valued(labels: &LabelVolume) -> ValueVolume {
    ValueVolume::from_array(labels.data().mapv(|l| l as f32))
}
