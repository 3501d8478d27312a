//! Persistence codec: a versioned JSON schema for the RAG.
//!
//! The persisted form mirrors the logical structure: one generic table
//! container per axial store, one for the edge catalog, and a label-volume
//! record whose `valid_data` flag says whether pixel contents were written.
//! Table containers hold a row index, a column-index descriptor (flat names,
//! or grouped two-level names for the coordinate columns) and one data array
//! per column, each tagged with its dtype.
//!
//! Deserialization accepts an optional externally-supplied label volume for
//! the `valid_data = false` case; without one, the RAG carries a deferred
//! header and pixel-level operations fail with `NotAvailable`.

use crate::catalog::{CanonicalEdge, EdgeCatalog};
use crate::error::RagError;
use crate::rag::Rag;
use crate::store::{AxialEdgeTable, CoordColumns};
use crate::volume::{AxisId, LabelSource, LabelVolume, VolumeHeader, LABEL_DTYPE};
use ndarray::{ArrayD, IxDyn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Schema identifier written into every persisted RAG.
pub const RAG_SCHEMA_V1: &str = "superpixel-rag.v1";

const INDEX_KIND_FLAT: &str = "flat";
const INDEX_KIND_GROUPED: &str = "grouped";
const COORD_GROUP: &str = "coord";

/// Column-index descriptor: flat names, or names paired with group labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnIndexFile {
    pub kind: String,
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
}

/// One persisted column, tagged with its dtype.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dtype", content = "data")]
pub enum ColumnData {
    #[serde(rename = "uint16")]
    U16(Vec<u16>),
    #[serde(rename = "uint32")]
    U32(Vec<u32>),
    #[serde(rename = "bool")]
    Bool(Vec<bool>),
}

/// Generic table container: row index, column descriptor, per-column data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableFile {
    pub row_index: Vec<u32>,
    pub column_index: ColumnIndexFile,
    pub columns: Vec<ColumnData>,
}

/// Persisted label volume: structural header plus optional pixel contents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelVolumeFile {
    pub shape: Vec<usize>,
    pub dtype: String,
    pub axes: Vec<AxisId>,
    pub valid_data: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<u32>>,
}

/// The complete persisted RAG.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RagFile {
    pub schema_version: String,
    pub axial_tables: Vec<TableFile>,
    pub edge_catalog: TableFile,
    pub label_volume: LabelVolumeFile,
}

impl Rag {
    /// Encode the RAG. With `store_labels = false` only the label header is
    /// written (`valid_data = false`) and the consumer must re-supply the
    /// volume externally, or accept a deferred placeholder.
    pub fn to_file(&self, store_labels: bool) -> Result<RagFile, RagError> {
        let header = self.label_source().header();
        let data = if store_labels {
            let labels = self.label_source().volume("storing label pixels")?;
            Some(labels.data().iter().copied().collect())
        } else {
            None
        };

        Ok(RagFile {
            schema_version: RAG_SCHEMA_V1.to_string(),
            axial_tables: self
                .axial_tables()
                .iter()
                .map(|t| encode_axial_table(t, &header.axes))
                .collect(),
            edge_catalog: encode_catalog(self.catalog()),
            label_volume: LabelVolumeFile {
                shape: header.shape,
                dtype: header.dtype,
                axes: header.axes,
                valid_data: data.is_some(),
                data,
            },
        })
    }

    /// Decode a persisted RAG.
    ///
    /// `external_labels` satisfies the `valid_data = false` case; it must
    /// match the persisted shape and axis identity, and must not be combined
    /// with persisted pixels.
    pub fn from_file(
        file: RagFile,
        external_labels: Option<LabelVolume>,
    ) -> Result<Self, RagError> {
        if file.schema_version != RAG_SCHEMA_V1 {
            return Err(RagError::UnsupportedFormat {
                detail: format!(
                    "schema version {:?} (expected {RAG_SCHEMA_V1:?})",
                    file.schema_version
                ),
            });
        }

        let labels = decode_label_source(file.label_volume, external_labels)?;
        if file.axial_tables.len() != labels.ndim() {
            return Err(RagError::UnsupportedFormat {
                detail: format!(
                    "{} axial tables persisted for a {}-dimensional volume",
                    file.axial_tables.len(),
                    labels.ndim()
                ),
            });
        }
        let catalog = decode_catalog(&file.edge_catalog)?;
        let tables = file
            .axial_tables
            .iter()
            .enumerate()
            .map(|(axis, table)| decode_axial_table(axis, table, labels.axes()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Rag::from_parts(labels, catalog, tables))
    }
}

fn encode_catalog(catalog: &EdgeCatalog) -> TableFile {
    let n = catalog.len();
    TableFile {
        row_index: (0..n as u32).collect(),
        column_index: ColumnIndexFile {
            kind: INDEX_KIND_FLAT.to_string(),
            names: vec![
                "sp1".to_string(),
                "sp2".to_string(),
                "edge_label".to_string(),
            ],
            groups: None,
        },
        columns: vec![
            ColumnData::U32(catalog.edges().iter().map(|e| e.sp1).collect()),
            ColumnData::U32(catalog.edges().iter().map(|e| e.sp2).collect()),
            ColumnData::U32((0..n as u32).collect()),
        ],
    }
}

fn decode_catalog(table: &TableFile) -> Result<EdgeCatalog, RagError> {
    if table.column_index.kind != INDEX_KIND_FLAT {
        return Err(RagError::UnsupportedFormat {
            detail: format!(
                "edge catalog column index kind {:?}",
                table.column_index.kind
            ),
        });
    }
    if table.column_index.names != ["sp1", "sp2", "edge_label"] {
        return Err(RagError::UnsupportedFormat {
            detail: format!("edge catalog columns {:?}", table.column_index.names),
        });
    }
    let [sp1, sp2, edge_label] = table.columns.as_slice() else {
        return Err(RagError::UnsupportedFormat {
            detail: format!("edge catalog holds {} columns", table.columns.len()),
        });
    };
    let (ColumnData::U32(sp1), ColumnData::U32(sp2), ColumnData::U32(edge_label)) =
        (sp1, sp2, edge_label)
    else {
        return Err(RagError::UnsupportedFormat {
            detail: "edge catalog columns must be uint32".to_string(),
        });
    };

    let edges: Vec<CanonicalEdge> = sp1
        .iter()
        .zip(sp2)
        .map(|(&sp1, &sp2)| CanonicalEdge { sp1, sp2 })
        .collect();
    let sorted = edges.windows(2).all(|w| w[0] < w[1]);
    let dense = edge_label.iter().enumerate().all(|(i, &l)| l as usize == i);
    if !sorted || !dense || edges.iter().any(|e| e.sp1 >= e.sp2) {
        return Err(RagError::UnsupportedFormat {
            detail: "edge catalog is not in canonical sorted order".to_string(),
        });
    }
    Ok(EdgeCatalog::from_sorted_edges(edges))
}

fn encode_axial_table(table: &AxialEdgeTable, axes: &[AxisId]) -> TableFile {
    let mut names = vec![
        "sp1".to_string(),
        "sp2".to_string(),
        "forwardness".to_string(),
        "edge_label".to_string(),
    ];
    let mut groups = vec![String::new(); 4];
    for axis in axes {
        names.push(axis.as_char().to_string());
        groups.push(COORD_GROUP.to_string());
    }

    let mut columns = vec![
        ColumnData::U32(table.sp1().to_vec()),
        ColumnData::U32(table.sp2().to_vec()),
        ColumnData::Bool(table.forwardness().to_vec()),
        ColumnData::U32(table.edge_labels().to_vec()),
    ];
    match table.coords() {
        CoordColumns::U16(cols) => {
            columns.extend(cols.iter().map(|c| ColumnData::U16(c.clone())));
        }
        CoordColumns::U32(cols) => {
            columns.extend(cols.iter().map(|c| ColumnData::U32(c.clone())));
        }
    }

    TableFile {
        row_index: (0..table.len() as u32).collect(),
        column_index: ColumnIndexFile {
            kind: INDEX_KIND_GROUPED.to_string(),
            names,
            groups: Some(groups),
        },
        columns,
    }
}

fn decode_axial_table(
    axis: usize,
    table: &TableFile,
    axes: &[AxisId],
) -> Result<AxialEdgeTable, RagError> {
    let index = &table.column_index;
    if index.kind != INDEX_KIND_GROUPED {
        return Err(RagError::UnsupportedFormat {
            detail: format!("axial table column index kind {:?}", index.kind),
        });
    }
    let ndim = axes.len();
    let expected_columns = 4 + ndim;
    if index.names.len() != expected_columns || table.columns.len() != expected_columns {
        return Err(RagError::UnsupportedFormat {
            detail: format!(
                "axial table for axis {axis} holds {} columns (expected {expected_columns})",
                table.columns.len()
            ),
        });
    }
    let groups = index.groups.as_deref().unwrap_or(&[]);
    let grouped_ok = groups.len() == expected_columns
        && groups[..4].iter().all(String::is_empty)
        && groups[4..].iter().all(|g| g == COORD_GROUP);
    if index.names[..4] != ["sp1", "sp2", "forwardness", "edge_label"] || !grouped_ok {
        return Err(RagError::UnsupportedFormat {
            detail: format!("axial table column layout {:?}", index.names),
        });
    }

    let (ColumnData::U32(sp1), ColumnData::U32(sp2), ColumnData::Bool(forwardness), ColumnData::U32(edge_label)) =
        (&table.columns[0], &table.columns[1], &table.columns[2], &table.columns[3])
    else {
        return Err(RagError::UnsupportedFormat {
            detail: format!("axial table for axis {axis} has unexpected column dtypes"),
        });
    };

    let coord_cols = &table.columns[4..];
    let coords = if coord_cols.iter().all(|c| matches!(c, ColumnData::U16(_))) {
        CoordColumns::U16(
            coord_cols
                .iter()
                .map(|c| match c {
                    ColumnData::U16(v) => v.clone(),
                    _ => unreachable!(),
                })
                .collect(),
        )
    } else if coord_cols.iter().all(|c| matches!(c, ColumnData::U32(_))) {
        CoordColumns::U32(
            coord_cols
                .iter()
                .map(|c| match c {
                    ColumnData::U32(v) => v.clone(),
                    _ => unreachable!(),
                })
                .collect(),
        )
    } else {
        return Err(RagError::UnsupportedFormat {
            detail: format!("axial table for axis {axis} mixes coordinate dtypes"),
        });
    };

    Ok(AxialEdgeTable::from_columns(
        axis,
        sp1.clone(),
        sp2.clone(),
        forwardness.clone(),
        edge_label.clone(),
        coords,
    ))
}

fn decode_label_source(
    file: LabelVolumeFile,
    external: Option<LabelVolume>,
) -> Result<LabelSource, RagError> {
    if file.dtype != LABEL_DTYPE {
        return Err(RagError::InvalidInput {
            reason: format!("persisted label dtype {:?} is not {LABEL_DTYPE:?}", file.dtype),
        });
    }

    if file.valid_data {
        if external.is_some() {
            return Err(RagError::InvalidInput {
                reason: "label pixels were persisted; do not also supply them externally"
                    .to_string(),
            });
        }
        let Some(data) = file.data else {
            return Err(RagError::UnsupportedFormat {
                detail: "valid_data is set but no pixel data is present".to_string(),
            });
        };
        let array = ArrayD::from_shape_vec(IxDyn(&file.shape), data).map_err(|e| {
            RagError::UnsupportedFormat {
                detail: format!("label pixel data does not fit its shape: {e}"),
            }
        })?;
        return Ok(LabelSource::InMemory(LabelVolume::new(array, file.axes)?));
    }

    match external {
        Some(volume) => {
            if volume.shape() != file.shape.as_slice() {
                return Err(RagError::ShapeMismatch {
                    context: "external label volume",
                    expected: format!("{:?}", file.shape),
                    actual: format!("{:?}", volume.shape()),
                });
            }
            if volume.axes() != file.axes.as_slice() {
                return Err(RagError::ShapeMismatch {
                    context: "external label volume axis identity",
                    expected: file.axes.iter().map(|a| a.as_char()).collect(),
                    actual: volume.axes().iter().map(|a| a.as_char()).collect(),
                });
            }
            Ok(LabelSource::InMemory(volume))
        }
        None => Ok(LabelSource::Deferred(VolumeHeader {
            shape: file.shape,
            dtype: file.dtype,
            axes: file.axes,
        })),
    }
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

/// Read a JSON value written by [`write_json_file`].
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&data).map_err(|e| format!("Failed to parse {}: {e}", path.display()))
}
