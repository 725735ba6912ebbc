use std::collections::VecDeque;

use crate::clustering::domain::encoding_clusterer::{EncodingClusterer, NOISE};
use crate::shared::encoding::Encoding;

/// Maximum Euclidean distance for two encodings to count as neighbors.
/// 0.45 is the recommended operating value for face identity encodings.
pub const DEFAULT_EPS: f64 = 0.5;

/// Minimum neighborhood size (the point itself included) to seed a cluster.
pub const DEFAULT_MIN_SAMPLES: usize = 3;

/// Density-based clusterer over Euclidean distance.
///
/// A point whose eps-neighborhood (itself included) holds at least
/// `min_samples` points is a core point; clusters are maximal chains of
/// density-reachable points. Everything else is noise. The number of
/// clusters is discovered, not configured, which fits grouping faces when
/// the number of distinct people is unknown in advance.
pub struct DbscanClusterer {
    eps: f64,
    min_samples: usize,
}

const UNCLASSIFIED: i32 = -2;

impl DbscanClusterer {
    pub fn new(eps: f64, min_samples: usize) -> Self {
        Self { eps, min_samples }
    }

    fn region_query(&self, points: &[&Encoding], idx: usize) -> Vec<usize> {
        let center = points[idx];
        (0..points.len())
            .filter(|&i| i == idx || center.euclidean_distance(points[i]) <= self.eps)
            .collect()
    }
}

impl Default for DbscanClusterer {
    fn default() -> Self {
        Self::new(DEFAULT_EPS, DEFAULT_MIN_SAMPLES)
    }
}

impl EncodingClusterer for DbscanClusterer {
    fn fit(&self, points: &[&Encoding]) -> Result<Vec<i32>, Box<dyn std::error::Error>> {
        if points.is_empty() {
            return Ok(Vec::new());
        }

        let dim = points[0].dim();
        if let Some(p) = points.iter().find(|p| p.dim() != dim) {
            return Err(format!(
                "mixed encoding dimensions: expected {dim}, found {}",
                p.dim()
            )
            .into());
        }

        let mut labels = vec![UNCLASSIFIED; points.len()];
        let mut cluster = 0i32;

        for p in 0..points.len() {
            if labels[p] != UNCLASSIFIED {
                continue;
            }

            let neighbors = self.region_query(points, p);
            if neighbors.len() < self.min_samples {
                labels[p] = NOISE;
                continue;
            }

            // p is a core point: grow the cluster through density-reachable
            // neighbors. Noise points reached here become border members but
            // are not expanded further.
            labels[p] = cluster;
            let mut seeds: VecDeque<usize> = neighbors.into_iter().filter(|&q| q != p).collect();
            while let Some(q) = seeds.pop_front() {
                if labels[q] == NOISE {
                    labels[q] = cluster;
                    continue;
                }
                if labels[q] != UNCLASSIFIED {
                    continue;
                }
                labels[q] = cluster;
                let q_neighbors = self.region_query(points, q);
                if q_neighbors.len() >= self.min_samples {
                    seeds.extend(q_neighbors);
                }
            }

            cluster += 1;
        }

        Ok(labels)
    }
}
