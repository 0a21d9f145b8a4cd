/// Radio preset catalog for the simulated LoRa link.
///
/// Presets trade speed against range: a higher spreading factor stretches
/// every symbol over more chips, which buys link budget and costs airtime.
/// The table is fixed at compile time and looked up by id.
use crate::error::SimError;

/// A single radio preset with its link parameters
#[derive(Clone, Debug)]
pub struct RadioPreset {
    pub id: &'static str,
    pub data_rate_kbps: f64,
    pub packet_size_bytes: usize,
    /// Spreading factor / chips per symbol, e.g. "11/2048"
    pub spreading_factor: &'static str,
    pub bandwidth_khz: u32,
    pub coding_rate: &'static str,
    pub description: &'static str,
    /// Typical-conditions range estimate shown in the detailed view
    pub range_estimate: &'static str,
}

impl RadioPreset {
    /// Short preset name, the description up to the first " - "
    pub fn name(&self) -> &'static str {
        self.description
            .split(" - ")
            .next()
            .unwrap_or(self.description)
    }

    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_PRESET_ID
    }
}

/// LongFast, the stock preset on real deployments
pub const DEFAULT_PRESET_ID: &str = "6";

static PRESETS: [RadioPreset; 8] = [
    RadioPreset {
        id: "1",
        data_rate_kbps: 21.88,
        packet_size_bytes: 237,
        spreading_factor: "7/128",
        bandwidth_khz: 500,
        coding_rate: "4/5",
        description: "Short Range / Turbo - Fastest speed, shortest range",
        range_estimate: "2-5km",
    },
    RadioPreset {
        id: "2",
        data_rate_kbps: 10.94,
        packet_size_bytes: 237,
        spreading_factor: "7/128",
        bandwidth_khz: 250,
        coding_rate: "4/5",
        description: "Short Range / Fast - High speed, short range",
        range_estimate: "3-8km",
    },
    RadioPreset {
        id: "3",
        data_rate_kbps: 6.25,
        packet_size_bytes: 237,
        spreading_factor: "8/256",
        bandwidth_khz: 250,
        coding_rate: "4/5",
        description: "Short Range / Slow - Moderate speed, short range",
        range_estimate: "5-12km",
    },
    RadioPreset {
        id: "4",
        data_rate_kbps: 3.52,
        packet_size_bytes: 237,
        spreading_factor: "9/512",
        bandwidth_khz: 250,
        coding_rate: "4/5",
        description: "Medium Range / Fast - Good balance of speed and range",
        range_estimate: "8-15km",
    },
    RadioPreset {
        id: "5",
        data_rate_kbps: 1.95,
        packet_size_bytes: 237,
        spreading_factor: "10/1024",
        bandwidth_khz: 250,
        coding_rate: "4/5",
        description: "Medium Range / Slow - Lower speed, better range",
        range_estimate: "10-20km",
    },
    RadioPreset {
        id: "6",
        data_rate_kbps: 1.07,
        packet_size_bytes: 237,
        spreading_factor: "11/2048",
        bandwidth_khz: 250,
        coding_rate: "4/5",
        description: "Long Range / Fast - Low speed, long range",
        range_estimate: "15-25km",
    },
    RadioPreset {
        id: "7",
        data_rate_kbps: 0.34,
        packet_size_bytes: 237,
        spreading_factor: "11/2048",
        bandwidth_khz: 125,
        coding_rate: "4/8",
        description: "Long Range / Moderate - Very low speed, very long range",
        range_estimate: "20-35km",
    },
    RadioPreset {
        id: "8",
        data_rate_kbps: 0.18,
        packet_size_bytes: 237,
        spreading_factor: "12/4096",
        bandwidth_khz: 125,
        coding_rate: "4/8",
        description: "Long Range / Slow - Slowest speed, maximum range",
        range_estimate: "25-50km+",
    },
];

/// All presets in display order
pub fn all() -> &'static [RadioPreset] {
    &PRESETS
}

pub fn lookup(id: &str) -> Option<&'static RadioPreset> {
    PRESETS.iter().find(|p| p.id == id)
}

/// Like `lookup`, but an unknown id is an error instead of a fallback
pub fn resolve(id: &str) -> Result<&'static RadioPreset, SimError> {
    lookup(id).ok_or_else(|| SimError::InvalidPreset(id.to_string()))
}

pub fn default_preset() -> &'static RadioPreset {
    lookup(DEFAULT_PRESET_ID).expect("default preset is registered")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_eight_presets() {
        assert_eq!(all().len(), 8);

        let mut ids: Vec<&str> = all().iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 8, "preset ids must be unique");
    }

    #[test]
    fn test_all_rates_and_packet_sizes_positive() {
        for p in all() {
            assert!(p.data_rate_kbps > 0.0, "preset {} has zero rate", p.id);
            assert!(p.packet_size_bytes > 0, "preset {} has zero packet size", p.id);
        }
    }

    #[test]
    fn test_default_preset_is_long_fast() {
        let p = default_preset();
        assert_eq!(p.id, "6");
        assert_eq!(p.name(), "Long Range / Fast");
        assert!(p.is_default());
        assert_eq!(p.data_rate_kbps, 1.07);
        assert_eq!(p.packet_size_bytes, 237);
    }

    #[test]
    fn test_lookup_and_resolve() {
        assert_eq!(lookup("1").unwrap().name(), "Short Range / Turbo");
        assert!(lookup("9").is_none());
        assert!(lookup("").is_none());

        assert!(resolve("8").is_ok());
        assert!(matches!(
            resolve("42"),
            Err(SimError::InvalidPreset(id)) if id == "42"
        ));
    }
}
