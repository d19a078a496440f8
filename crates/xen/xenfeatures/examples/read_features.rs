use xenfeatures::error::Result;
use xenfeatures::report::enabled_features;
use xenfeatures::{XenFeatureReader, XEN_FEATURES};

fn main() -> Result<()> {
    env_logger::init();

    let reader = XenFeatureReader::default();
    let features = reader.read()?;
    println!("{}: {:#x} (low word)", reader.path().display(), features.mask.low_word());
    if features.mask.is_empty() {
        println!("no feature bits set");
    }
    for feature in enabled_features(&features.mask, XEN_FEATURES) {
        println!("{} (bit {})", feature.symbol, feature.bit);
    }
    Ok(())
}
