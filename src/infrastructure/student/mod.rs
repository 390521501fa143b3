//! Student roster infrastructure

mod photo;
mod repository;
mod service;

pub use photo::{FsPhotoStore, PhotoStore};
pub use repository::InMemoryStudentRepository;
pub use service::{RegisterStudentRequest, StudentService, UpdateStudentRequest};
