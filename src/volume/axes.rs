//! Spatial axis identifiers.
//!
//! Only the `z`, `y`, `x` axes are permitted, each at most once, matching the
//! rank of the volume (1 to 3 dimensions).

use crate::error::RagError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the permitted spatial axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisId {
    Z,
    Y,
    X,
}

impl AxisId {
    pub fn as_char(self) -> char {
        match self {
            AxisId::Z => 'z',
            AxisId::Y => 'y',
            AxisId::X => 'x',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'z' => Some(AxisId::Z),
            'y' => Some(AxisId::Y),
            'x' => Some(AxisId::X),
            _ => None,
        }
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Parse an ordered axis list from a compact string such as `"zyx"` or `"yx"`.
pub fn axes_from_str(s: &str) -> Result<Vec<AxisId>, RagError> {
    s.chars()
        .map(|c| {
            AxisId::from_char(c).ok_or_else(|| RagError::InvalidInput {
                reason: format!("axis {c:?} is not one of z, y, x"),
            })
        })
        .collect()
}

/// Check that `axes` is a duplicate-free subset of `{z, y, x}` matching `ndim`.
pub(crate) fn validate_axes(axes: &[AxisId], ndim: usize) -> Result<(), RagError> {
    if ndim == 0 || ndim > 3 {
        return Err(RagError::InvalidInput {
            reason: format!("volumes must have 1 to 3 dimensions, got {ndim}"),
        });
    }
    if axes.len() != ndim {
        return Err(RagError::InvalidInput {
            reason: format!(
                "{} axis identifiers supplied for a {ndim}-dimensional volume",
                axes.len()
            ),
        });
    }
    for (i, a) in axes.iter().enumerate() {
        if axes[..i].contains(a) {
            return Err(RagError::InvalidInput {
                reason: format!("axis {a} appears more than once"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_axis_strings() {
        assert_eq!(
            axes_from_str("zyx").unwrap(),
            vec![AxisId::Z, AxisId::Y, AxisId::X]
        );
        assert_eq!(axes_from_str("yx").unwrap(), vec![AxisId::Y, AxisId::X]);
        assert!(axes_from_str("t").is_err());
    }

    #[test]
    fn rejects_duplicate_and_mismatched_axes() {
        assert!(validate_axes(&[AxisId::Y, AxisId::Y], 2).is_err());
        assert!(validate_axes(&[AxisId::Y], 2).is_err());
        assert!(validate_axes(&[AxisId::Z, AxisId::Y, AxisId::X], 3).is_ok());
    }
}
