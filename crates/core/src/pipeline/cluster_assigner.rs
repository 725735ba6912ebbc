use std::collections::HashMap;
use std::path::Path;

use crate::pipeline::signature_extractor::Observation;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::encoding::Encoding;

/// The winning face for one (cluster, image) pair.
#[derive(Clone, Debug)]
pub struct BestMatch {
    pub bounding_box: BoundingBox,
    pub distance: f64,
}

/// Decides which face region in an image represents a cluster.
///
/// Indexes every face observed per source image during extraction. For a
/// given cluster, the winning face in an image is the one whose encoding is
/// nearest the cluster's representative encoding, ties broken by
/// first-encountered index. Images with several people in them therefore
/// export a different face for each cluster they belong to.
pub struct ClusterAssigner<'a> {
    observations: &'a [Observation],
    faces_by_image: HashMap<&'a Path, Vec<usize>>,
}

impl<'a> ClusterAssigner<'a> {
    pub fn new(observations: &'a [Observation]) -> Self {
        let mut faces_by_image: HashMap<&Path, Vec<usize>> = HashMap::new();
        for (idx, obs) in observations.iter().enumerate() {
            faces_by_image
                .entry(obs.source.as_path())
                .or_default()
                .push(idx);
        }
        Self {
            observations,
            faces_by_image,
        }
    }

    /// Picks the face in `image` nearest to `reference`.
    ///
    /// Returns `None` when no face was ever observed in the image; callers
    /// treat that as a skippable condition, not an error for the batch.
    pub fn best_match(&self, image: &Path, reference: &Encoding) -> Option<BestMatch> {
        let candidates = self.faces_by_image.get(image)?;

        let mut best: Option<BestMatch> = None;
        for &idx in candidates {
            let obs = &self.observations[idx];
            let distance = obs.encoding.euclidean_distance(reference);
            if best.as_ref().map_or(true, |b| distance < b.distance) {
                best = Some(BestMatch {
                    bounding_box: obs.bounding_box,
                    distance,
                });
            }
        }
        best
    }
}
