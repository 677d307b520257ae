pub mod config;
pub mod error;

pub use config::AcademyConfig;
pub use error::{AcademyError, Result};
