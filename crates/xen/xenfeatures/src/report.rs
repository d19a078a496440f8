use std::io::Write;

use log::debug;
use serde::Serialize;

use crate::error::Result;
use crate::mask::XenFeatureMask;
use crate::reader::RawXenFeatures;
use crate::table::{lookup, XenFeature};

/// Table entries whose bit is set, in table order. Each call starts a new pass.
pub fn enabled_features<'a>(
    mask: &'a XenFeatureMask,
    table: &'a [XenFeature],
) -> impl Iterator<Item = &'a XenFeature> + 'a {
    table.iter().filter(move |feature| mask.is_set(feature.bit))
}

/// Set bits that have no entry in the table.
pub fn unknown_bits<'a>(
    mask: &'a XenFeatureMask,
    table: &'a [XenFeature],
) -> impl Iterator<Item = u32> + 'a {
    mask.set_bits().filter(move |bit| lookup(table, *bit).is_none())
}

pub fn write_simple<W: Write>(
    out: &mut W,
    features: &RawXenFeatures,
    table: &[XenFeature],
) -> Result<()> {
    writeln!(out, "Xen features: {}", features.raw)?;
    for feature in enabled_features(&features.mask, table) {
        writeln!(out, "enabled: {}", feature.name())?;
    }
    for bit in unknown_bits(&features.mask, table) {
        debug!("xen feature bit {} is set but not known", bit);
    }
    Ok(())
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct XenFeatureReport {
    pub raw: String,
    pub mask: String,
    pub enabled: Vec<String>,
    pub unknown: Vec<u32>,
}

impl XenFeatureReport {
    pub fn new(features: &RawXenFeatures, table: &[XenFeature]) -> XenFeatureReport {
        XenFeatureReport {
            raw: features.raw.clone(),
            mask: features.mask.to_string(),
            enabled: enabled_features(&features.mask, table)
                .map(|feature| feature.name().to_string())
                .collect(),
            unknown: unknown_bits(&features.mask, table).collect(),
        }
    }

    pub fn to_key_value(&self) -> String {
        let unknown = self
            .unknown
            .iter()
            .map(|bit| bit.to_string())
            .collect::<Vec<_>>();
        [
            ("raw", self.raw.clone()),
            ("enabled", self.enabled.join(",")),
            ("unknown", unknown.join(",")),
        ]
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, v.replace('"', "\\\"")))
        .collect::<Vec<_>>()
        .join(" ")
    }
}
