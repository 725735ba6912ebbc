pub mod bounding_box;
pub mod constants;
pub mod encoding;
pub mod frame;
pub mod model_resolver;
