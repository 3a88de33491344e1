// comparator.rs - Column-type comparators and their dispatch

use crate::core::geo::{distance_km, GeoMethod, LatLon};
use crate::core::pairwise::{lexical_order, CondensedMatrix, RelationMatrix};
use crate::core::threshold::rank_cutoff;
use crate::data::metadata::{ColumnKind, ColumnValues};
use crate::error::{MatrixError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_EUCLIDEAN_FRACTION: f64 = 0.10;
pub const DEFAULT_MAX_KM: f64 = 1000.0;

/// Run-wide numeric parameters for the data-dependent comparators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparatorParams {
    /// Fraction of ranked positive distances below which continuous pairs relate
    pub euclidean_fraction: f64,
    /// Absolute cutoff for geo-coordinate pairs
    pub max_km: f64,
    pub geo_method: GeoMethod,
}

impl Default for ComparatorParams {
    fn default() -> Self {
        Self {
            euclidean_fraction: DEFAULT_EUCLIDEAN_FRACTION,
            max_km: DEFAULT_MAX_KM,
            geo_method: GeoMethod::default(),
        }
    }
}

/// Comparison strategy, resolved once per column from its kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparator {
    Discrete,
    Continuous { fraction: f64 },
    GeoCoordinate { max_km: f64, method: GeoMethod },
}

/// Binary matrix for one column, with the distance cutoff that produced it
#[derive(Debug, Clone)]
pub struct ColumnRelation {
    pub matrix: RelationMatrix,
    pub cutoff: Option<f64>,
}

impl Comparator {
    pub fn for_kind(kind: ColumnKind, params: &ComparatorParams) -> Self {
        match kind {
            ColumnKind::Discrete => Comparator::Discrete,
            ColumnKind::Continuous => Comparator::Continuous {
                fraction: params.euclidean_fraction,
            },
            ColumnKind::GeoCoordinate => Comparator::GeoCoordinate {
                max_km: params.max_km,
                method: params.geo_method,
            },
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Comparator::Discrete => ColumnKind::Discrete,
            Comparator::Continuous { .. } => ColumnKind::Continuous,
            Comparator::GeoCoordinate { .. } => ColumnKind::GeoCoordinate,
        }
    }

    /// Relate every pair of `samples`; `values[k]` belongs to `samples[k]`
    pub fn relate(&self, samples: &[String], values: &ColumnValues) -> Result<ColumnRelation> {
        if samples.len() != values.len() {
            return Err(MatrixError::data(format!(
                "{} samples but {} values",
                samples.len(),
                values.len()
            )));
        }

        match (self, values) {
            (Comparator::Discrete, ColumnValues::Discrete(v)) => Ok(ColumnRelation {
                matrix: discrete_relations(samples, v),
                cutoff: None,
            }),
            (Comparator::Continuous { fraction }, ColumnValues::Continuous(v)) => {
                let (matrix, cutoff) = continuous_relations(samples, v, *fraction)?;
                Ok(ColumnRelation { matrix, cutoff })
            }
            (Comparator::GeoCoordinate { max_km, method }, ColumnValues::GeoCoordinate(v)) => {
                Ok(ColumnRelation {
                    matrix: geo_relations(samples, v, *max_km, *method),
                    cutoff: Some(*max_km),
                })
            }
            (comparator, values) => Err(MatrixError::data(format!(
                "{} comparator cannot compare {} values",
                comparator.kind(),
                values.kind()
            ))),
        }
    }
}

/// Related iff the two categorical values are identical
pub fn discrete_relations(samples: &[String], values: &[String]) -> RelationMatrix {
    RelationMatrix::build(samples, |a, b| values[a] == values[b])
}

/// Euclidean distance between two equal-length value vectors
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Related iff the pair distance is below the column's rank-derived cutoff.
///
/// With fewer than two samples there is no pair to rank and no cutoff.
pub fn continuous_relations(
    samples: &[String],
    values: &[Vec<f64>],
    fraction: f64,
) -> Result<(RelationMatrix, Option<f64>)> {
    let order = lexical_order(samples);
    let distances =
        CondensedMatrix::compute(order.len(), |i, j| euclidean(&values[order[i]], &values[order[j]]));
    let ordered: Vec<String> = order.iter().map(|&k| samples[k].clone()).collect();

    if distances.is_empty() {
        return Ok((RelationMatrix::from_ordered(ordered, distances.map(|_| false)), None));
    }

    let cutoff = rank_cutoff(distances.values().iter().copied(), fraction)?;
    let related = distances.map(|&d| d < cutoff);
    Ok((RelationMatrix::from_ordered(ordered, related), Some(cutoff)))
}

/// Related iff the surface distance is below `max_km`
pub fn geo_relations(
    samples: &[String],
    coords: &[LatLon],
    max_km: f64,
    method: GeoMethod,
) -> RelationMatrix {
    RelationMatrix::build(samples, |a, b| {
        distance_km(&coords[a], &coords[b], method) < max_km
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn assert_symmetric(m: &RelationMatrix) {
        for i in 0..m.len() {
            assert_eq!(m.get(i, i), 1);
            for j in 0..m.len() {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
    }

    #[test]
    fn test_discrete_equality() {
        let samples = names(&["b", "a", "c"]);
        let values = ColumnValues::Discrete(names(&["soil", "marine", "soil"]));
        let relation = Comparator::Discrete.relate(&samples, &values).unwrap();

        let m = &relation.matrix;
        assert_symmetric(m);
        assert_eq!(m.samples(), &names(&["a", "b", "c"])[..]);
        assert_eq!(m.get(1, 2), 1); // b, c: soil
        assert_eq!(m.get(0, 1), 0); // a, b
        assert!(relation.cutoff.is_none());
    }

    #[test]
    fn test_continuous_rank_threshold() {
        let samples = names(&["s1", "s2", "s3", "s4"]);
        let values = vec![vec![0.0], vec![2.0], vec![4.0], vec![8.0]];
        // Distances: 2, 4, 8, 2, 6, 4 -> sorted 2, 2, 4, 4, 6, 8; rank floor(6 * 0.5) = 3 -> 4
        let (m, cutoff) = continuous_relations(&samples, &values, 0.5).unwrap();
        assert_eq!(cutoff, Some(4.0));
        assert_symmetric(&m);
        assert_eq!(m.get(0, 1), 1); // 2 < 4
        assert_eq!(m.get(0, 2), 0); // 4 is not below 4
        assert_eq!(m.get(1, 2), 1);
        assert_eq!(m.get(2, 3), 0);
        assert_eq!(m.related_pairs(), 2);
    }

    #[test]
    fn test_continuous_with_identical_pair() {
        // One zero distance is excluded from ranking but still related
        let samples = names(&["a", "b", "c"]);
        let values = vec![vec![1.0], vec![1.0], vec![5.0]];
        let (m, cutoff) = continuous_relations(&samples, &values, 0.5).unwrap();
        // Positive distances 4, 4 -> rank 1 -> cutoff 4
        assert_eq!(cutoff, Some(4.0));
        assert_eq!(m.get(0, 1), 1);
        assert_eq!(m.get(0, 2), 0);
    }

    #[test]
    fn test_continuous_all_identical_is_error() {
        let samples = names(&["a", "b", "c"]);
        let values = vec![vec![3.0], vec![3.0], vec![3.0]];
        let err = continuous_relations(&samples, &values, 0.1).unwrap_err();
        assert!(err.is_data());
    }

    #[test]
    fn test_continuous_single_sample() {
        let (m, cutoff) = continuous_relations(&names(&["a"]), &[vec![3.0]], 0.1).unwrap();
        assert_eq!(m.len(), 1);
        assert!(cutoff.is_none());
    }

    #[test]
    fn test_euclidean_vectors() {
        assert_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(euclidean(&[2.5], &[2.5]), 0.0);
    }

    #[test]
    fn test_geo_cutoff() {
        let samples = names(&["tucson", "phoenix", "honolulu"]);
        let coords = vec![
            LatLon::new(32.2226, -110.9747).unwrap(),
            LatLon::new(33.4484, -112.0740).unwrap(),
            LatLon::new(21.3069, -157.8583).unwrap(),
        ];
        let comparator = Comparator::for_kind(ColumnKind::GeoCoordinate, &ComparatorParams::default());
        let relation = comparator
            .relate(&samples, &ColumnValues::GeoCoordinate(coords))
            .unwrap();

        let m = &relation.matrix;
        assert_symmetric(m);
        // honolulu, phoenix, tucson
        assert_eq!(m.samples()[0], "honolulu");
        assert_eq!(m.get(1, 2), 1); // ~165 km
        assert_eq!(m.get(0, 1), 0);
        assert_eq!(m.get(0, 2), 0);
        assert_eq!(relation.cutoff, Some(DEFAULT_MAX_KM));
    }

    #[test]
    fn test_kind_mismatch() {
        let samples = names(&["a", "b"]);
        let values = ColumnValues::Discrete(names(&["x", "y"]));
        let comparator = Comparator::Continuous { fraction: 0.1 };
        assert!(comparator.relate(&samples, &values).is_err());
    }
}
