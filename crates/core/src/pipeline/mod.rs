pub mod cluster_assigner;
pub mod cluster_faces_use_case;
pub mod face_cropper;
pub mod signature_extractor;
