use crate::shared::encoding::Encoding;

/// Label given to observations too isolated to join any cluster.
pub const NOISE: i32 = -1;

/// Domain interface for grouping identity encodings into person-clusters.
///
/// Returns one label per input row: dense non-negative cluster ids in
/// discovery order, or [`NOISE`] for observations that join no cluster.
/// Label values carry no meaning beyond distinctness.
pub trait EncodingClusterer: Send {
    fn fit(&self, points: &[&Encoding]) -> Result<Vec<i32>, Box<dyn std::error::Error>>;
}
