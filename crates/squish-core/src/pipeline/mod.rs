//! Processing pipeline components.
//!
//! - **validate**: Size checks and loading files from disk
//! - **decode**: Decode images with a timeout
//! - **encode**: Render onto a surface and re-encode
//! - **processor**: Dispatches an input to the convert or compress path

pub mod decode;
pub mod encode;
pub mod processor;
pub mod validate;

// Re-exports for convenient access
pub use decode::{DecodedImage, ImageDecoder};
pub use encode::Surface;
pub use processor::Processor;
pub use validate::Validator;
