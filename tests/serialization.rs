mod common;

use common::synthetic_volume::{quadrants_2d, ramp_values};
use superpixel_rag::io::{read_json_file, write_json_file, RagFile};
use superpixel_rag::{LabelSource, Rag, RagError};

#[test]
fn full_round_trip_reproduces_the_rag() {
    let rag = Rag::build(quadrants_2d());
    let file = rag.to_file(true).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rag.json");
    write_json_file(&path, &file).unwrap();
    let loaded: RagFile = read_json_file(&path).unwrap();
    assert_eq!(loaded, file);

    let restored = Rag::from_file(loaded, None).unwrap();
    assert_eq!(restored.catalog(), rag.catalog());
    assert_eq!(restored.superpixels(), rag.superpixels());
    assert_eq!(restored.axial_tables(), rag.axial_tables());
    assert_eq!(
        restored.label_volume().unwrap().data(),
        rag.label_volume().unwrap().data()
    );

    // restored RAG computes identical features
    let values = ramp_values(&[4, 4]);
    let names = ["edge_mean", "sp_count"];
    assert_eq!(
        restored.compute_features(&values, &names).unwrap(),
        rag.compute_features(&values, &names).unwrap()
    );
}

#[test]
fn deferred_round_trip_keeps_structure_but_not_pixels() {
    let rag = Rag::build(quadrants_2d());
    let file = rag.to_file(false).unwrap();
    assert!(!file.label_volume.valid_data);
    assert!(file.label_volume.data.is_none());

    let restored = Rag::from_file(file, None).unwrap();
    assert!(matches!(restored.label_source(), LabelSource::Deferred(_)));
    assert_eq!(restored.label_source().shape(), &[4, 4]);
    assert_eq!(restored.catalog(), rag.catalog());

    // edge features only need face coordinates and the value volume
    let values = ramp_values(&[4, 4]);
    let edge_only = restored.compute_features(&values, &["edge_mean"]).unwrap();
    assert_eq!(
        edge_only,
        rag.compute_features(&values, &["edge_mean"]).unwrap()
    );

    // pixel-level operations are rejected
    assert!(matches!(
        restored.compute_features(&values, &["sp_mean"]),
        Err(RagError::NotAvailable { .. })
    ));
    let decisions = vec![true; restored.num_edges()];
    assert!(matches!(
        restored.partition(&decisions),
        Err(RagError::NotAvailable { .. })
    ));
    // and the deferred RAG cannot be re-persisted with pixels
    assert!(matches!(
        restored.to_file(true),
        Err(RagError::NotAvailable { .. })
    ));
}

#[test]
fn external_labels_satisfy_a_deferred_file() {
    let rag = Rag::build(quadrants_2d());
    let file = rag.to_file(false).unwrap();

    let restored = Rag::from_file(file, Some(quadrants_2d())).unwrap();
    assert!(restored.label_source().is_in_memory());

    let values = ramp_values(&[4, 4]);
    assert_eq!(
        restored.compute_features(&values, &["sp_mean"]).unwrap(),
        rag.compute_features(&values, &["sp_mean"]).unwrap()
    );
}

#[test]
fn external_labels_must_match_the_persisted_header() {
    let rag = Rag::build(quadrants_2d());
    let file = rag.to_file(false).unwrap();

    // wrong shape
    let wrong_shape = superpixel_rag::LabelVolume::new(
        ndarray::ArrayD::zeros(ndarray::IxDyn(&[3, 4])),
        superpixel_rag::volume::axes::axes_from_str("yx").unwrap(),
    )
    .unwrap();
    assert!(matches!(
        Rag::from_file(file.clone(), Some(wrong_shape)),
        Err(RagError::ShapeMismatch { .. })
    ));

    // wrong axis identity
    let wrong_axes = superpixel_rag::LabelVolume::new(
        ndarray::ArrayD::zeros(ndarray::IxDyn(&[4, 4])),
        superpixel_rag::volume::axes::axes_from_str("zy").unwrap(),
    )
    .unwrap();
    assert!(matches!(
        Rag::from_file(file, Some(wrong_axes)),
        Err(RagError::ShapeMismatch { .. })
    ));
}

#[test]
fn persisted_pixels_refuse_an_external_volume() {
    let rag = Rag::build(quadrants_2d());
    let file = rag.to_file(true).unwrap();
    assert!(matches!(
        Rag::from_file(file, Some(quadrants_2d())),
        Err(RagError::InvalidInput { .. })
    ));
}

#[test]
fn axial_table_count_must_match_the_volume_rank() {
    let rag = Rag::build(quadrants_2d());
    let mut file = rag.to_file(true).unwrap();
    file.axial_tables.pop();
    assert!(matches!(
        Rag::from_file(file, None),
        Err(RagError::UnsupportedFormat { .. })
    ));
}

#[test]
fn unknown_schema_version_is_unsupported() {
    let rag = Rag::build(quadrants_2d());
    let mut file = rag.to_file(true).unwrap();
    file.schema_version = "superpixel-rag.v99".to_string();
    assert!(matches!(
        Rag::from_file(file, None),
        Err(RagError::UnsupportedFormat { .. })
    ));
}
