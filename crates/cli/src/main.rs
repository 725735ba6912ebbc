use std::path::PathBuf;
use std::process;

use clap::Parser;

use facesort_core::clustering::infrastructure::dbscan_clusterer::{
    DbscanClusterer, DEFAULT_EPS, DEFAULT_MIN_SAMPLES,
};
use facesort_core::detection::domain::face_encoder::FaceEncoder;
use facesort_core::detection::infrastructure::onnx_face_encoder::{
    OnnxFaceEncoder, DEFAULT_CONFIDENCE,
};
use facesort_core::imaging::infrastructure::image_file_reader::ImageFileReader;
use facesort_core::imaging::infrastructure::image_file_writer::ImageFileWriter;
use facesort_core::pipeline::cluster_faces_use_case::{ClusterFacesUseCase, RunSummary};
use facesort_core::pipeline::face_cropper::DEFAULT_PADDING_RATIO;
use facesort_core::shared::constants::{
    DETECTOR_MODEL_NAME, DETECTOR_MODEL_URL, EMBEDDING_MODEL_NAME, EMBEDDING_MODEL_URL,
};
use facesort_core::shared::model_resolver;

/// Sort a photo collection into per-person directories.
#[derive(Parser)]
#[command(name = "facesort")]
struct Cli {
    /// Directory of input photos (.png/.jpg/.jpeg).
    input: PathBuf,

    /// Output directory; one person_<id> subdirectory per discovered person.
    output: PathBuf,

    /// Maximum neighbor distance between two face encodings (0.45 works well
    /// for most collections).
    #[arg(long, default_value_t = DEFAULT_EPS)]
    eps: f64,

    /// Minimum neighborhood size to form an identity cluster.
    #[arg(long, default_value_t = DEFAULT_MIN_SAMPLES)]
    min_samples: usize,

    /// Crop padding as a fraction of the face's larger dimension.
    #[arg(long, default_value_t = DEFAULT_PADDING_RATIO)]
    padding: f64,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f64,

    /// Directory holding pre-downloaded ONNX models.
    #[arg(long)]
    model_dir: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let encoder = build_encoder(&cli)?;

    let progress: Box<dyn Fn(usize, usize) -> bool + Send> = Box::new(|current, total| {
        eprint!("\rScanning photo {current}/{total}");
        true
    });

    let mut use_case = ClusterFacesUseCase::new(
        Box::new(ImageFileReader::new()),
        encoder,
        Box::new(DbscanClusterer::new(cli.eps, cli.min_samples)),
        Box::new(ImageFileWriter::new()),
        cli.padding,
        Some(progress),
    );

    let summary = use_case.execute(&cli.input, &cli.output)?;
    eprintln!();
    report(&summary, &cli.output);
    Ok(())
}

fn report(summary: &RunSummary, output: &std::path::Path) {
    if summary.faces_found == 0 {
        println!(
            "No faces found in {} photos; nothing to sort.",
            summary.images_scanned
        );
        return;
    }

    println!(
        "Found {} people across {} photos ({} faces).",
        summary.people_found(),
        summary.images_scanned,
        summary.faces_found
    );
    for (id, count) in &summary.clusters {
        println!("  person_{id}: {count} faces");
    }
    println!(
        "Exported {} face crops to {}",
        summary.faces_exported,
        output.display()
    );

    if !summary.skipped_files.is_empty() {
        println!("Skipped {} unreadable files:", summary.skipped_files.len());
        for path in &summary.skipped_files {
            println!("  {}", path.display());
        }
    }
}

fn build_encoder(cli: &Cli) -> Result<Box<dyn FaceEncoder>, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {DETECTOR_MODEL_NAME}");
    let detector_path = model_resolver::resolve(
        DETECTOR_MODEL_NAME,
        DETECTOR_MODEL_URL,
        cli.model_dir.as_deref(),
        Some(Box::new(|d, t| download_progress("detection", d, t))),
    )?;
    eprintln!();

    log::info!("Resolving model: {EMBEDDING_MODEL_NAME}");
    let embedder_path = model_resolver::resolve(
        EMBEDDING_MODEL_NAME,
        EMBEDDING_MODEL_URL,
        cli.model_dir.as_deref(),
        Some(Box::new(|d, t| download_progress("embedding", d, t))),
    )?;
    eprintln!();

    Ok(Box::new(OnnxFaceEncoder::new(
        &detector_path,
        &embedder_path,
        cli.confidence,
    )?))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.is_dir() {
        return Err(format!("Input is not a directory: {}", cli.input.display()).into());
    }
    if cli.eps <= 0.0 {
        return Err(format!("Eps must be positive, got {}", cli.eps).into());
    }
    if cli.min_samples == 0 {
        return Err("Min samples must be at least 1".into());
    }
    if !(0.0..=1.0).contains(&cli.padding) {
        return Err(format!(
            "Padding must be between 0.0 and 1.0, got {}",
            cli.padding
        )
        .into());
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    Ok(())
}

fn download_progress(what: &str, downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading {what} model... {pct}%");
    } else {
        eprint!("\rDownloading {what} model... {downloaded} bytes");
    }
}
