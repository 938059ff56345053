//! Crop Suitability Ranges
//!
//! Static per-crop growing envelopes: inclusive bounds for temperature (°C),
//! soil pH, and annual rainfall (mm). Defined in code, never mutated.

/// Inclusive growing envelope for one crop.
#[derive(Debug, Clone, Copy)]
pub struct SuitabilityRange {
    pub crop: &'static str,
    pub temperature: (f64, f64),
    pub soil_ph: (f64, f64),
    pub rainfall: (f64, f64),
}

// ============================================================================
// EMBEDDED SUITABILITY TABLE
// ============================================================================

static CROP_SUITABILITY: &[SuitabilityRange] = &[
    SuitabilityRange {
        crop: "wheat",
        temperature: (15.0, 25.0),
        soil_ph: (6.0, 7.0),
        rainfall: (300.0, 500.0),
    },
    SuitabilityRange {
        crop: "rice",
        temperature: (20.0, 30.0),
        soil_ph: (5.5, 6.5),
        rainfall: (500.0, 2000.0),
    },
    SuitabilityRange {
        crop: "corn",
        temperature: (18.0, 27.0),
        soil_ph: (5.8, 7.0),
        rainfall: (400.0, 800.0),
    },
];

/// Look up a crop's envelope, case-insensitively.
pub fn lookup(crop: &str) -> Option<&'static SuitabilityRange> {
    let crop = crop.to_lowercase();
    CROP_SUITABILITY.iter().find(|range| range.crop == crop)
}

impl SuitabilityRange {
    /// All three measurements inside their closed intervals.
    pub fn is_suitable(&self, temperature: f64, soil_ph: f64, rainfall: f64) -> bool {
        within(self.temperature, temperature)
            && within(self.soil_ph, soil_ph)
            && within(self.rainfall, rainfall)
    }

    /// Human-readable verdict for the given conditions.
    pub fn verdict(&self, temperature: f64, soil_ph: f64, rainfall: f64) -> String {
        let word = if self.is_suitable(temperature, soil_ph, rainfall) {
            "suitable"
        } else {
            "not suitable"
        };
        format!("The conditions are {} for growing {}.", word, self.crop)
    }
}

fn within(range: (f64, f64), value: f64) -> bool {
    value >= range.0 && value <= range.1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheat_in_range_is_suitable() {
        let wheat = lookup("wheat").unwrap();
        assert!(wheat.is_suitable(20.0, 6.5, 400.0));
        assert_eq!(
            wheat.verdict(20.0, 6.5, 400.0),
            "The conditions are suitable for growing wheat."
        );
    }

    #[test]
    fn wheat_too_hot_is_not_suitable() {
        let wheat = lookup("wheat").unwrap();
        assert!(!wheat.is_suitable(35.0, 6.5, 400.0));
        assert_eq!(
            wheat.verdict(35.0, 6.5, 400.0),
            "The conditions are not suitable for growing wheat."
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        let wheat = lookup("wheat").unwrap();
        assert!(wheat.is_suitable(15.0, 6.0, 300.0));
        assert!(wheat.is_suitable(25.0, 7.0, 500.0));
        assert!(!wheat.is_suitable(25.01, 7.0, 500.0));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(lookup("Wheat").is_some());
        assert!(lookup("RICE").is_some());
        assert!(lookup("CoRn").is_some());
    }

    #[test]
    fn unknown_crop_has_no_entry() {
        assert!(lookup("dragonfruit").is_none());
    }
}
