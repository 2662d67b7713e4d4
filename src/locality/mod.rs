//! Locality text normalization and structured feature extraction.
//!
//! Both the scorer and the exported columns work on the normalized text, so
//! features are always extracted after [`normalize_locality`].

mod features;
mod normalize;

pub use features::{
    Compass, Distance, DistanceUnit, LocalityFeatures, extract_compass, extract_distance,
};
pub use normalize::normalize_locality;
