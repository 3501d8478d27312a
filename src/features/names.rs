//! Feature-name grammar.
//!
//! `(edge_ | sp_) + statistic`, where statistic is one of `count`, `sum`,
//! `minimum`, `maximum`, `mean`, `variance`, `skewness`, `kurtosis` or
//! `quantiles_<q>` with `q` in {10, 25, 50, 75, 90}. Names are lower-cased
//! before parsing.

use crate::error::RagError;
use std::fmt;

/// Whether a feature aggregates over edge pixel-faces or whole superpixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureScope {
    Edge,
    Superpixel,
}

/// A statistic extractable from an accumulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Statistic {
    Count,
    Sum,
    Minimum,
    Maximum,
    Mean,
    Variance,
    Skewness,
    Kurtosis,
    /// Percentile in {10, 25, 50, 75, 90}.
    Quantile(u8),
}

pub(crate) const SUPPORTED_QUANTILES: [u8; 5] = [10, 25, 50, 75, 90];

impl Statistic {
    /// The grammar suffix, e.g. `"mean"` or `"quantiles_25"`.
    pub fn suffix(&self) -> String {
        match self {
            Statistic::Count => "count".to_string(),
            Statistic::Sum => "sum".to_string(),
            Statistic::Minimum => "minimum".to_string(),
            Statistic::Maximum => "maximum".to_string(),
            Statistic::Mean => "mean".to_string(),
            Statistic::Variance => "variance".to_string(),
            Statistic::Skewness => "skewness".to_string(),
            Statistic::Kurtosis => "kurtosis".to_string(),
            Statistic::Quantile(q) => format!("quantiles_{q}"),
        }
    }
}

/// A parsed feature request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FeatureName {
    pub scope: FeatureScope,
    pub statistic: Statistic,
}

impl FeatureName {
    pub fn parse(raw: &str) -> Result<Self, RagError> {
        let lower = raw.to_ascii_lowercase();
        let (scope, rest) = if let Some(rest) = lower.strip_prefix("edge_") {
            (FeatureScope::Edge, rest)
        } else if let Some(rest) = lower.strip_prefix("sp_") {
            (FeatureScope::Superpixel, rest)
        } else {
            return Err(RagError::InvalidFeatureName {
                name: raw.to_string(),
                reason: "feature names must start with 'edge_' or 'sp_'",
            });
        };

        let statistic = match rest {
            "count" => Statistic::Count,
            "sum" => Statistic::Sum,
            "minimum" => Statistic::Minimum,
            "maximum" => Statistic::Maximum,
            "mean" => Statistic::Mean,
            "variance" => Statistic::Variance,
            "skewness" => Statistic::Skewness,
            "kurtosis" => Statistic::Kurtosis,
            other => match other.strip_prefix("quantiles_") {
                Some(q) => {
                    let q: u8 = q.parse().map_err(|_| RagError::InvalidFeatureName {
                        name: raw.to_string(),
                        reason: "quantile suffix must be an integer",
                    })?;
                    if !SUPPORTED_QUANTILES.contains(&q) {
                        return Err(RagError::InvalidFeatureName {
                            name: raw.to_string(),
                            reason: "supported quantiles are 10, 25, 50, 75, 90",
                        });
                    }
                    Statistic::Quantile(q)
                }
                None => {
                    return Err(RagError::InvalidFeatureName {
                        name: raw.to_string(),
                        reason: "unknown statistic",
                    })
                }
            },
        };
        Ok(Self { scope, statistic })
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.scope {
            FeatureScope::Edge => "edge",
            FeatureScope::Superpixel => "sp",
        };
        write!(f, "{prefix}_{}", self.statistic.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_full_grammar() {
        let name = FeatureName::parse("edge_mean").unwrap();
        assert_eq!(name.scope, FeatureScope::Edge);
        assert_eq!(name.statistic, Statistic::Mean);

        let name = FeatureName::parse("SP_Quantiles_75").unwrap();
        assert_eq!(name.scope, FeatureScope::Superpixel);
        assert_eq!(name.statistic, Statistic::Quantile(75));
        assert_eq!(name.to_string(), "sp_quantiles_75");
    }

    #[test]
    fn rejects_bad_names() {
        assert!(matches!(
            FeatureName::parse("mean"),
            Err(RagError::InvalidFeatureName { .. })
        ));
        assert!(FeatureName::parse("edge_median").is_err());
        assert!(FeatureName::parse("sp_quantiles_33").is_err());
        assert!(FeatureName::parse("sp_quantiles_").is_err());
    }
}
