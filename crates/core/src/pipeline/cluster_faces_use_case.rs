use std::fs;
use std::path::{Path, PathBuf};

use crate::clustering::domain::encoding_clusterer::EncodingClusterer;
use crate::clustering::domain::person_cluster::PersonCluster;
use crate::detection::domain::face_encoder::FaceEncoder;
use crate::imaging::domain::image_reader::ImageReader;
use crate::imaging::domain::image_writer::ImageWriter;
use crate::pipeline::cluster_assigner::ClusterAssigner;
use crate::pipeline::face_cropper::FaceCropper;
use crate::pipeline::signature_extractor::{ProgressFn, SignatureExtractor};
use crate::shared::encoding::Encoding;

/// What one run did, threaded back to the caller instead of accumulated
/// in global counters.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub images_scanned: usize,
    pub faces_found: usize,
    /// `(cluster id, member count)` per discovered person, in id order.
    pub clusters: Vec<(u32, usize)>,
    pub faces_exported: usize,
    pub skipped_files: Vec<PathBuf>,
}

impl RunSummary {
    pub fn people_found(&self) -> usize {
        self.clusters.len()
    }
}

/// End-to-end pipeline: scan → cluster → assign → crop → export.
///
/// After the output root exists, no failure on one file, one cluster, or one
/// export aborts the rest of the batch; partial output with the failures
/// logged is the success criterion.
pub struct ClusterFacesUseCase {
    reader: Box<dyn ImageReader>,
    extractor: SignatureExtractor,
    clusterer: Box<dyn EncodingClusterer>,
    cropper: FaceCropper,
}

impl ClusterFacesUseCase {
    pub fn new(
        reader: Box<dyn ImageReader>,
        encoder: Box<dyn FaceEncoder>,
        clusterer: Box<dyn EncodingClusterer>,
        writer: Box<dyn ImageWriter>,
        padding_ratio: f64,
        on_progress: Option<ProgressFn>,
    ) -> Self {
        Self {
            reader,
            extractor: SignatureExtractor::new(encoder, on_progress),
            clusterer,
            cropper: FaceCropper::new(writer, padding_ratio),
        }
    }

    pub fn execute(
        &mut self,
        input_dir: &Path,
        output_dir: &Path,
    ) -> Result<RunSummary, Box<dyn std::error::Error>> {
        // The one fatal precondition: an output root we cannot create.
        fs::create_dir_all(output_dir)?;

        let extraction = self.extractor.extract(&*self.reader, input_dir)?;
        let mut summary = RunSummary {
            images_scanned: extraction.images_scanned,
            faces_found: extraction.observations.len(),
            skipped_files: extraction.skipped,
            ..Default::default()
        };

        if extraction.observations.is_empty() {
            log::info!("No faces found in {}", input_dir.display());
            return Ok(summary);
        }

        let observations = extraction.observations;
        let encodings: Vec<&Encoding> = observations.iter().map(|o| &o.encoding).collect();
        let labels = self.clusterer.fit(&encodings)?;
        let clusters = PersonCluster::from_labels(&labels, &encodings);
        let assigner = ClusterAssigner::new(&observations);

        for cluster in &clusters {
            let cluster_dir = output_dir.join(format!("person_{}", cluster.id));
            if let Err(e) = fs::create_dir_all(&cluster_dir) {
                log::error!("Cannot create {}: {e}", cluster_dir.display());
                continue;
            }

            let reference = &observations[cluster.representative].encoding;
            for (face_index, &member) in cluster.members.iter().enumerate() {
                let source = &observations[member].source;
                match self.export_face(&assigner, reference, source, &cluster_dir, face_index) {
                    Ok(()) => summary.faces_exported += 1,
                    Err(e) => {
                        log::warn!("Cluster {}: skipping {}: {e}", cluster.id, source.display());
                    }
                }
            }

            log::info!("person_{}: {} faces", cluster.id, cluster.members.len());
            summary.clusters.push((cluster.id, cluster.members.len()));
        }

        Ok(summary)
    }

    fn export_face(
        &self,
        assigner: &ClusterAssigner,
        reference: &Encoding,
        source: &Path,
        cluster_dir: &Path,
        face_index: usize,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let best = assigner
            .best_match(source, reference)
            .ok_or("no face observed in image")?;
        let frame = self.reader.read(source)?;
        let dest = cluster_dir.join(export_filename(source, face_index));
        self.cropper.export(&frame, &best.bounding_box, &dest)
    }
}

/// `<basename without extension>_face_<index within cluster>.jpg`
fn export_filename(source: &Path, face_index: usize) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "face".to_string());
    format!("{stem}_face_{face_index}.jpg")
}
