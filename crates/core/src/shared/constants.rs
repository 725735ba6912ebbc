pub const DETECTOR_MODEL_NAME: &str = "yolo11n_widerface.onnx";
pub const DETECTOR_MODEL_URL: &str =
    "https://github.com/facesort/models/releases/download/v0.1.0/yolo11n_widerface.onnx";

pub const EMBEDDING_MODEL_NAME: &str = "w600k_r50.onnx";
pub const EMBEDDING_MODEL_URL: &str =
    "https://github.com/facesort/models/releases/download/v0.1.0/w600k_r50.onnx";

/// Extensions scanned for input photos (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
