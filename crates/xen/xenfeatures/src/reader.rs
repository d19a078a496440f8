use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::mask::XenFeatureMask;

pub const XEN_FEATURES_PATH: &str = "/sys/hypervisor/properties/features";

/// Feature bits as exposed by the kernel: the trimmed text and its value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawXenFeatures {
    pub raw: String,
    pub mask: XenFeatureMask,
}

impl RawXenFeatures {
    pub fn parse(content: &str) -> Result<RawXenFeatures> {
        let raw = content.trim_end().to_string();
        let mask = XenFeatureMask::parse_hex(&raw)?;
        Ok(RawXenFeatures { raw, mask })
    }
}

#[derive(Clone, Debug)]
pub struct XenFeatureReader {
    path: PathBuf,
}

impl Default for XenFeatureReader {
    fn default() -> Self {
        XenFeatureReader::new(XEN_FEATURES_PATH)
    }
}

impl XenFeatureReader {
    pub fn new(path: impl Into<PathBuf>) -> XenFeatureReader {
        XenFeatureReader { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<RawXenFeatures> {
        debug!("reading xen features from {:?}", self.path);
        let bytes = fs::read(&self.path).map_err(|source| Error::Unavailable {
            path: self.path.clone(),
            source,
        })?;
        let content = String::from_utf8(bytes).map_err(|error| {
            let lossy = String::from_utf8_lossy(error.as_bytes());
            Error::MalformedContent(lossy.trim_end().to_string())
        })?;
        let features = RawXenFeatures::parse(&content)?;
        debug!("xen features raw={} mask={}", features.raw, features.mask);
        Ok(features)
    }
}
