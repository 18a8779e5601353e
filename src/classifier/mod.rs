mod client;
mod preprocess;
mod types;

pub use client::{Classifier, HostedClassifier};
pub use preprocess::normalize_image;
pub use types::{LabelScore, Prediction, top_label};
