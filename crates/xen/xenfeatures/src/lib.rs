pub mod cli;
pub mod error;
pub mod mask;
pub mod reader;
pub mod report;
pub mod table;

pub use crate::mask::XenFeatureMask;
pub use crate::reader::{RawXenFeatures, XenFeatureReader, XEN_FEATURES_PATH};
pub use crate::table::{XenFeature, XEN_FEATURES};
