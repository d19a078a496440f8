use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use xenfeatures::cli::XenFeaturesCommand;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    XenFeaturesCommand::parse().run()
}
