use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::reader::{XenFeatureReader, XEN_FEATURES_PATH};
use crate::report::{write_simple, XenFeatureReport};
use crate::table::XEN_FEATURES;

#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum XenFeaturesFormat {
    Simple,
    Json,
    JsonPretty,
    Yaml,
    KeyValue,
}

#[derive(Parser)]
#[command(version, about = "Print Linux Xen guest feature bits in human-readable form")]
pub struct XenFeaturesCommand {
    #[arg(short, long, default_value = "simple", help = "Output format")]
    format: XenFeaturesFormat,

    #[arg(
        short,
        long,
        help = "The file exposing the Xen feature bitmask",
        default_value = XEN_FEATURES_PATH
    )]
    path: PathBuf,
}

impl XenFeaturesCommand {
    pub fn run(self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out)
    }

    /// Reads and decodes the features before writing anything to `out`.
    pub fn run_to<W: Write>(self, out: &mut W) -> Result<()> {
        let features = XenFeatureReader::new(self.path).read()?;

        match self.format {
            XenFeaturesFormat::Simple => {
                write_simple(out, &features, XEN_FEATURES)?;
            }

            XenFeaturesFormat::Json | XenFeaturesFormat::JsonPretty | XenFeaturesFormat::Yaml => {
                let report = XenFeatureReport::new(&features, XEN_FEATURES);
                let encoded = if self.format == XenFeaturesFormat::JsonPretty {
                    serde_json::to_string_pretty(&report)?
                } else if self.format == XenFeaturesFormat::Yaml {
                    serde_yaml::to_string(&report)?
                } else {
                    serde_json::to_string(&report)?
                };
                writeln!(out, "{}", encoded.trim())?;
            }

            XenFeaturesFormat::KeyValue => {
                let report = XenFeatureReport::new(&features, XEN_FEATURES);
                writeln!(out, "{}", report.to_key_value())?;
            }
        }
        out.flush()?;
        Ok(())
    }
}
