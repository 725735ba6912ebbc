use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EncodingError {
    #[error("encoding must not be empty")]
    Empty,
}

/// A fixed-length identity signature for one detected face.
///
/// The dimension is whatever the embedding model produces; all encodings in
/// one run share it, which the clusterer checks before fitting.
#[derive(Clone, Debug, PartialEq)]
pub struct Encoding {
    values: Vec<f32>,
}

impl Encoding {
    pub fn new(values: Vec<f32>) -> Result<Self, EncodingError> {
        if values.is_empty() {
            return Err(EncodingError::Empty);
        }
        Ok(Self { values })
    }

    pub fn dim(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn euclidean_distance(&self, other: &Encoding) -> f64 {
        debug_assert_eq!(
            self.dim(),
            other.dim(),
            "encodings must share a dimension"
        );
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| {
                let d = f64::from(*a) - f64::from(*b);
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Element-wise mean of a non-empty set of same-dimension encodings.
    pub fn centroid(encodings: &[&Encoding]) -> Option<Encoding> {
        let first = encodings.first()?;
        let dim = first.dim();
        let mut sums = vec![0.0f64; dim];
        for e in encodings {
            debug_assert_eq!(e.dim(), dim, "encodings must share a dimension");
            for (s, v) in sums.iter_mut().zip(e.values.iter()) {
                *s += f64::from(*v);
            }
        }
        let n = encodings.len() as f64;
        Some(Encoding {
            values: sums.into_iter().map(|s| (s / n) as f32).collect(),
        })
    }
}
