use std::fs;
use std::path::{Path, PathBuf};

use crate::detection::domain::face_encoder::FaceEncoder;
use crate::imaging::domain::image_reader::ImageReader;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::encoding::Encoding;

/// Progress callback: `(files_processed, files_total)`.
/// Return `false` to cancel the scan.
pub type ProgressFn = Box<dyn Fn(usize, usize) -> bool + Send>;

/// One detected face and where it came from.
///
/// The bounding box is retained alongside the encoding so the export phase
/// never has to detect faces a second time.
#[derive(Clone, Debug)]
pub struct Observation {
    pub bounding_box: BoundingBox,
    pub encoding: Encoding,
    pub source: PathBuf,
}

/// Everything one scan produced, threaded back to the caller.
#[derive(Debug, Default)]
pub struct ExtractionResult {
    pub observations: Vec<Observation>,
    pub skipped: Vec<PathBuf>,
    pub images_scanned: usize,
}

/// Scans a photo directory and yields one observation per detected face.
///
/// A file that cannot be read, decoded, or encoded is logged, recorded as
/// skipped, and never aborts the scan of the remaining files.
pub struct SignatureExtractor {
    encoder: Box<dyn FaceEncoder>,
    on_progress: Option<ProgressFn>,
}

impl SignatureExtractor {
    pub fn new(encoder: Box<dyn FaceEncoder>, on_progress: Option<ProgressFn>) -> Self {
        Self {
            encoder,
            on_progress,
        }
    }

    pub fn extract(
        &mut self,
        reader: &dyn ImageReader,
        input_dir: &Path,
    ) -> Result<ExtractionResult, Box<dyn std::error::Error>> {
        let files = list_image_files(input_dir)?;
        let total = files.len();

        let mut result = ExtractionResult::default();
        for (i, path) in files.iter().enumerate() {
            match self.process(reader, path) {
                Ok(observations) => {
                    log::info!(
                        "Processed {}: {} faces",
                        path.display(),
                        observations.len()
                    );
                    result.observations.extend(observations);
                }
                Err(e) => {
                    log::warn!("Skipping {}: {e}", path.display());
                    result.skipped.push(path.clone());
                }
            }
            result.images_scanned += 1;
            self.report_progress(i + 1, total)?;
        }

        Ok(result)
    }

    fn process(
        &mut self,
        reader: &dyn ImageReader,
        path: &Path,
    ) -> Result<Vec<Observation>, Box<dyn std::error::Error>> {
        let frame = reader.read(path)?;
        let faces = self.encoder.detect_and_encode(&frame)?;
        Ok(faces
            .into_iter()
            .map(|face| Observation {
                bounding_box: face.bounding_box,
                encoding: face.encoding,
                source: path.to_path_buf(),
            })
            .collect())
    }

    fn report_progress(
        &self,
        current: usize,
        total: usize,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(ref callback) = self.on_progress {
            if !callback(current, total) {
                return Err("Cancelled".into());
            }
        }
        Ok(())
    }
}

/// Lists regular files with a recognized image extension, sorted by path
/// for a deterministic scan order. Subdirectories and other entries are
/// ignored.
fn list_image_files(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_image_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
