pub mod color;
pub mod config;
pub mod error;
pub mod mask;

pub use color::ColorSpec;
pub use config::ServerConfig;
pub use error::{Error, Result};
pub use mask::{MaskDescriptor, PointMask};
