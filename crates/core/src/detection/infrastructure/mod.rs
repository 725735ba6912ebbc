pub mod onnx_face_encoder;
