//! Static agronomic reference tables
//!
//! Crop base temperatures for GDD derivation and pest optimal-temperature
//! ranges for advisory text. Pure lookup data consumed by the core, never
//! produced by it; the host renders these tables on its reference page.

use crate::app::models::{CropProfile, PestProfile};
use crate::{Error, Result};

/// Crop base temperatures in degrees Celsius
const CROP_BASE_TEMPERATURES: &[(&str, f64)] = &[
    ("Durian", 15.0),
    ("Maize", 10.0),
    ("Mango", 13.0),
    ("Cassava", 8.0),
    ("Rice", 8.0),
    ("Lychee", 7.0),
];

/// Pest optimal temperature ranges and advisory notes
const PEST_RANGES: &[(&str, f64, f64, &str)] = &[
    ("Thrips", 28.0, 32.0, "Sensitive to light and dry air."),
    ("Mealybug", 25.0, 30.0, "Prefers stable climates."),
    ("Red spider mite", 30.0, 32.0, "Outbreaks in dry air."),
    ("Fruit borer", 28.0, 30.0, "Damages mango and durian fruit."),
    ("Mango weevil", 30.0, 30.0, "Active during hot seasons."),
    ("Armyworm", 27.0, 30.0, "Life cycle accelerates in heat."),
    ("Fruit fly", 27.0, 30.0, "Lays eggs during ripening."),
];

/// All known crop profiles in reference-table order
pub fn crop_profiles() -> Vec<CropProfile> {
    CROP_BASE_TEMPERATURES
        .iter()
        .map(|(name, base)| CropProfile::new(*name, *base))
        .collect()
}

/// Look up a crop by name, case-insensitively
pub fn crop_profile(name: &str) -> Result<CropProfile> {
    CROP_BASE_TEMPERATURES
        .iter()
        .find(|(crop, _)| crop.eq_ignore_ascii_case(name.trim()))
        .map(|(crop, base)| CropProfile::new(*crop, *base))
        .ok_or_else(|| Error::unknown_crop(name.trim()))
}

/// All known pest profiles in reference-table order
pub fn pest_profiles() -> Vec<PestProfile> {
    PEST_RANGES
        .iter()
        .map(|(name, min, max, note)| PestProfile {
            name: name.to_string(),
            optimal_min: *min,
            optimal_max: *max,
            note: *note,
        })
        .collect()
}

/// Pests whose optimal temperature range contains the given temperature
pub fn pests_active_at(temperature: f64) -> Vec<PestProfile> {
    pest_profiles()
        .into_iter()
        .filter(|pest| temperature >= pest.optimal_min && temperature <= pest.optimal_max)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_lookup_is_case_insensitive() {
        let crop = crop_profile("durian").unwrap();
        assert_eq!(crop.name, "Durian");
        assert_eq!(crop.base_temperature, 15.0);

        let crop = crop_profile(" MAIZE ").unwrap();
        assert_eq!(crop.base_temperature, 10.0);
    }

    #[test]
    fn test_unknown_crop_is_an_error() {
        let result = crop_profile("tomato");
        assert!(matches!(result, Err(crate::Error::UnknownCrop { .. })));
    }

    #[test]
    fn test_all_crops_listed() {
        let crops = crop_profiles();
        assert_eq!(crops.len(), 6);
        assert!(crops.iter().all(|crop| crop.base_temperature > 0.0));
    }

    #[test]
    fn test_pests_active_at_temperature() {
        let active = pests_active_at(31.0);
        let names: Vec<&str> = active.iter().map(|pest| pest.name.as_str()).collect();

        assert!(names.contains(&"Thrips"));
        assert!(names.contains(&"Red spider mite"));
        assert!(!names.contains(&"Mealybug"));
    }

    #[test]
    fn test_pests_inactive_in_cool_weather() {
        assert!(pests_active_at(20.0).is_empty());
    }
}
