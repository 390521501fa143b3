//! Draw infrastructure

mod service;

pub use service::{DrawService, DrawServiceError};
