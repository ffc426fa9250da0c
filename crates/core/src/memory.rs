//! Memory and disk quantities, normalised to megabytes.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// A quantity of memory or disk in megabytes.
///
/// Parsed from user input such as `512M`, `512MB`, `1G` or `2gb`. A bare
/// number is rejected because the unit is ambiguous. Zero means "unset" and
/// is what scaling requests leave out.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemorySize(u64);

impl MemorySize {
    pub const UNSET: MemorySize = MemorySize(0);

    pub fn from_megabytes(mb: u64) -> Self {
        Self(mb)
    }

    pub fn megabytes(&self) -> u64 {
        self.0
    }

    pub fn is_unset(&self) -> bool {
        self.0 == 0
    }
}

impl ValueObject for MemorySize {}

impl core::fmt::Display for MemorySize {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.0 != 0 && self.0 % 1024 == 0 {
            write!(f, "{}G", self.0 / 1024)
        } else {
            write!(f, "{}M", self.0)
        }
    }
}

impl FromStr for MemorySize {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().to_ascii_uppercase();

        let (digits, multiplier) = if let Some(n) = raw.strip_suffix("GB").or_else(|| raw.strip_suffix('G')) {
            (n, 1024)
        } else if let Some(n) = raw.strip_suffix("MB").or_else(|| raw.strip_suffix('M')) {
            (n, 1)
        } else {
            return Err(DomainError::invalid_size(s));
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::invalid_size(s));
        }

        digits
            .parse::<u64>()
            .ok()
            .and_then(|n| n.checked_mul(multiplier))
            .map(MemorySize)
            .ok_or_else(|| DomainError::invalid_size(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_megabyte_and_gigabyte_suffixes() {
        assert_eq!("512M".parse::<MemorySize>().unwrap().megabytes(), 512);
        assert_eq!("512MB".parse::<MemorySize>().unwrap().megabytes(), 512);
        assert_eq!("1G".parse::<MemorySize>().unwrap().megabytes(), 1024);
        assert_eq!("2gb".parse::<MemorySize>().unwrap().megabytes(), 2048);
    }

    #[test]
    fn rejects_missing_or_unknown_units() {
        for bad in ["512", "", "M", "12K", "1.5G", "-1M", "G512"] {
            let err = bad.parse::<MemorySize>().unwrap_err();
            assert!(matches!(err, DomainError::InvalidSize(_)), "{bad} should fail");
        }
    }

    #[test]
    fn rejects_overflow() {
        let huge = format!("{}G", u64::MAX);
        assert!(huge.parse::<MemorySize>().is_err());
    }

    #[test]
    fn display_prefers_gigabytes_when_exact() {
        assert_eq!(MemorySize::from_megabytes(2048).to_string(), "2G");
        assert_eq!(MemorySize::from_megabytes(512).to_string(), "512M");
    }

    proptest! {
        #[test]
        fn megabytes_are_taken_verbatim(n in 0u64..10_000_000u64, long in any::<bool>(), lower in any::<bool>()) {
            let unit = match (long, lower) {
                (true, true) => "mb",
                (true, false) => "MB",
                (false, true) => "m",
                (false, false) => "M",
            };
            let parsed: MemorySize = format!("{n}{unit}").parse().unwrap();
            prop_assert_eq!(parsed.megabytes(), n);
        }

        #[test]
        fn gigabytes_scale_by_1024(n in 0u64..1_000_000u64) {
            let parsed: MemorySize = format!("{n}G").parse().unwrap();
            prop_assert_eq!(parsed.megabytes(), n * 1024);
        }

        #[test]
        fn display_round_trips(n in 1u64..10_000_000u64) {
            let size = MemorySize::from_megabytes(n);
            prop_assert_eq!(size.to_string().parse::<MemorySize>().unwrap(), size);
        }
    }
}
