pub mod error;
pub mod feedback;
pub mod state;
pub mod validate;
