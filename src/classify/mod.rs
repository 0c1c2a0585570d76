//! Shoreline classification of coordinate batches.

mod classifier;
mod pipeline;
mod summary;

pub use classifier::{Classifier, ClassifierConfig, METRIC_CRS};
pub use pipeline::{Classification, Pipeline};
pub use summary::Summary;
