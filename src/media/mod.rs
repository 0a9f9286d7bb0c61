pub mod detection;
pub mod pdf;
pub mod processing;
pub mod types;

pub use processing::FileNormalizer;
pub use types::{FileCategory, UploadedFile};
