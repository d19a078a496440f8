use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

const WORD_BITS: u32 = u64::BITS;
const DIGITS_PER_WORD: usize = (u64::BITS / 4) as usize;

/// Feature bitmask of arbitrary width, stored as little-endian 64-bit words.
/// Trailing zero words are never stored, so equal values compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XenFeatureMask {
    words: Vec<u64>,
}

impl XenFeatureMask {
    /// Parses a bare hex string such as `1f` or `800`. The kernel writes plain
    /// hex digits, so a `0x` prefix, a sign, a separator or an empty string is
    /// malformed. Leading whitespace is skipped.
    pub fn parse_hex(input: &str) -> Result<XenFeatureMask> {
        let digits = input.trim_start();
        if digits.is_empty() {
            return Err(Error::MalformedContent(input.to_string()));
        }

        let mut words = vec![0u64; digits.len().div_ceil(DIGITS_PER_WORD)];
        for (index, c) in digits.chars().rev().enumerate() {
            let Some(value) = c.to_digit(16) else {
                return Err(Error::MalformedContent(input.to_string()));
            };
            let shift = (index % DIGITS_PER_WORD) * 4;
            words[index / DIGITS_PER_WORD] |= (value as u64) << shift;
        }
        Ok(XenFeatureMask::from_words(words))
    }

    fn from_words(mut words: Vec<u64>) -> XenFeatureMask {
        while words.last() == Some(&0) {
            words.pop();
        }
        XenFeatureMask { words }
    }

    pub fn is_set(&self, bit: u32) -> bool {
        self.words
            .get((bit / WORD_BITS) as usize)
            .map(|word| (word >> (bit % WORD_BITS)) & 1 == 1)
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Every set bit, lowest first.
    pub fn set_bits(&self) -> impl Iterator<Item = u32> + '_ {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(index, &word)| {
                (0..WORD_BITS)
                    .filter(move |bit| (word >> bit) & 1 == 1)
                    .map(move |bit| index as u32 * WORD_BITS + bit)
            })
    }

    /// The low 64 bits of the mask.
    pub fn low_word(&self) -> u64 {
        self.words.first().copied().unwrap_or(0)
    }
}

impl From<u64> for XenFeatureMask {
    fn from(value: u64) -> Self {
        XenFeatureMask::from_words(vec![value])
    }
}

impl FromStr for XenFeatureMask {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        XenFeatureMask::parse_hex(s)
    }
}

impl fmt::Display for XenFeatureMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((high, rest)) = self.words.split_last() else {
            return write!(f, "0");
        };
        write!(f, "{:x}", high)?;
        for word in rest.iter().rev() {
            write!(f, "{:016x}", word)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_small_masks() {
        assert_eq!(XenFeatureMask::parse_hex("1f").unwrap().low_word(), 0x1f);
        assert_eq!(XenFeatureMask::parse_hex("800").unwrap().low_word(), 0x800);
        assert_eq!(XenFeatureMask::parse_hex("C0").unwrap().low_word(), 0xc0);
        assert!(XenFeatureMask::parse_hex("0").unwrap().is_empty());
        assert!(XenFeatureMask::parse_hex("0000").unwrap().is_empty());
        assert_eq!("800".parse::<XenFeatureMask>().unwrap(), XenFeatureMask::from(0x800));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "   ", "zz", "0x1f", "-1", "+1", "1 f", "1_f"] {
            match XenFeatureMask::parse_hex(input) {
                Err(Error::MalformedContent(content)) => assert_eq!(content, input),
                other => panic!("expected malformed content for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_parse_tolerates_leading_whitespace() {
        assert_eq!(XenFeatureMask::parse_hex("  a").unwrap().low_word(), 0xa);
    }

    #[test]
    fn test_wide_mask_keeps_low_bits() {
        let mask = XenFeatureMask::parse_hex("100000000000000000801").unwrap();
        assert!(mask.is_set(0));
        assert!(mask.is_set(11));
        assert!(mask.is_set(80));
        assert!(!mask.is_set(79));
        assert!(!mask.is_set(4096));
        assert_eq!(mask.set_bits().collect::<Vec<_>>(), vec![0, 11, 80]);
        assert_eq!(mask.to_string(), "100000000000000000801");
    }

    #[test]
    fn test_display_is_canonical() {
        assert_eq!(XenFeatureMask::parse_hex("000800").unwrap().to_string(), "800");
        assert_eq!(XenFeatureMask::default().to_string(), "0");
        assert_eq!(XenFeatureMask::from(u64::MAX).to_string(), "ffffffffffffffff");
    }

    #[test]
    fn test_is_set_matches_shift() {
        let value = 0b1010_0110_1101u64;
        let mask = XenFeatureMask::from(value);
        for bit in 0..64 {
            assert_eq!(mask.is_set(bit), (value >> bit) & 1 == 1);
        }
    }
}
