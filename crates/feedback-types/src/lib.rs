pub mod config;
pub mod error;
pub mod feedback;

pub use error::ConfigError;
pub use feedback::{Rating, Submission};
