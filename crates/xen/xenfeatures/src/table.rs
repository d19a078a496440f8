//! Known Xen guest feature bits, as defined by `xen/include/public/features.h`.

/// Prefix shared by every feature symbol in the Xen public headers.
pub const XENFEAT_PREFIX: &str = "XENFEAT_";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XenFeature {
    pub bit: u32,
    pub symbol: &'static str,
}

impl XenFeature {
    pub const fn new(bit: u32, symbol: &'static str) -> XenFeature {
        XenFeature { bit, symbol }
    }

    /// The symbol without its `XENFEAT_` prefix, e.g. `hvm_pirqs`.
    pub fn name(&self) -> &'static str {
        self.symbol
            .strip_prefix(XENFEAT_PREFIX)
            .unwrap_or(self.symbol)
    }
}

// Bits 6 and 7 are reserved.
pub const XEN_FEATURES: &[XenFeature] = &[
    XenFeature::new(0, "XENFEAT_writable_page_tables"),
    XenFeature::new(1, "XENFEAT_writable_descriptor_tables"),
    XenFeature::new(2, "XENFEAT_auto_translated_physmap"),
    XenFeature::new(3, "XENFEAT_supervisor_mode_kernel"),
    XenFeature::new(4, "XENFEAT_pae_pgdir_above_4gb"),
    XenFeature::new(5, "XENFEAT_mmu_pt_update_preserve_ad"),
    XenFeature::new(8, "XENFEAT_hvm_callback_vector"),
    XenFeature::new(9, "XENFEAT_hvm_safe_pvclock"),
    XenFeature::new(10, "XENFEAT_hvm_pirqs"),
    XenFeature::new(11, "XENFEAT_dom0"),
];

pub fn lookup(table: &[XenFeature], bit: u32) -> Option<&XenFeature> {
    table.iter().find(|feature| feature.bit == bit)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_names_strip_prefix() {
        let names = XEN_FEATURES
            .iter()
            .map(|feature| feature.name())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "writable_page_tables",
                "writable_descriptor_tables",
                "auto_translated_physmap",
                "supervisor_mode_kernel",
                "pae_pgdir_above_4gb",
                "mmu_pt_update_preserve_ad",
                "hvm_callback_vector",
                "hvm_safe_pvclock",
                "hvm_pirqs",
                "dom0",
            ]
        );
    }

    #[test]
    fn test_table_is_ascending_and_skips_reserved() {
        let bits = XEN_FEATURES.iter().map(|f| f.bit).collect::<Vec<_>>();
        assert_eq!(bits, vec![0, 1, 2, 3, 4, 5, 8, 9, 10, 11]);
        assert!(lookup(XEN_FEATURES, 6).is_none());
        assert!(lookup(XEN_FEATURES, 7).is_none());
        assert_eq!(lookup(XEN_FEATURES, 11).map(|f| f.name()), Some("dom0"));
    }

    #[test]
    fn test_name_without_prefix_is_unchanged() {
        let feature = XenFeature::new(42, "custom_feature");
        assert_eq!(feature.name(), "custom_feature");
    }
}
