//! Classical machine learning algorithms

pub mod knn;
pub mod svm;

pub use knn::Knn;
pub use svm::Svm;
