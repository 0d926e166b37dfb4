pub mod error;
pub mod health;
pub mod operations;

pub use error::AppError;
