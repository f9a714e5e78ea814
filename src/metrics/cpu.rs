use sysinfo::{CpuRefreshKind, RefreshKind, System};

use super::error::ProviderError;
use super::types::CpuInfo;

pub fn query_cpu() -> Result<CpuInfo, ProviderError> {
    let system = System::new_with_specifics(
        RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_frequency()),
    );

    let cpus = system.cpus();
    let first = cpus
        .first()
        .ok_or_else(|| ProviderError::Unavailable("cpu list".to_string()))?;

    let raw_brand = first.brand().trim();
    let manufacturer = manufacturer_from_vendor(first.vendor_id(), raw_brand);
    let speed = nominal_speed(raw_brand, first.frequency());
    let cores = cpus.len() as u32;
    let physical_cores = System::physical_core_count()
        .map(|count| count as u32)
        .unwrap_or(cores);

    Ok(CpuInfo {
        brand: clean_brand(raw_brand, &manufacturer),
        manufacturer,
        speed,
        cores,
        physical_cores,
    })
}

pub(crate) fn manufacturer_from_vendor(vendor_id: &str, brand: &str) -> String {
    match vendor_id.trim() {
        "GenuineIntel" => "Intel".to_string(),
        "AuthenticAMD" | "AMDisbetter!" => "AMD".to_string(),
        "HygonGenuine" => "Hygon".to_string(),
        "CentaurHauls" => "VIA".to_string(),
        "" => brand
            .split_whitespace()
            .next()
            .map(strip_marks)
            .unwrap_or_default(),
        other => other.to_string(),
    }
}

/// Drops trademark marks, the vendor prefix, the word "CPU" and any "@ x GHz" suffix.
pub(crate) fn clean_brand(brand: &str, manufacturer: &str) -> String {
    let without_clock = brand.split(" @ ").next().unwrap_or(brand);
    let unmarked = strip_marks(without_clock);

    let mut words = unmarked
        .split_whitespace()
        .filter(|word| !word.eq_ignore_ascii_case("cpu"))
        .peekable();
    if let Some(first) = words.peek() {
        if !manufacturer.is_empty() && first.eq_ignore_ascii_case(manufacturer) {
            words.next();
        }
    }

    let cleaned = words.collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        brand.trim().to_string()
    } else {
        cleaned
    }
}

fn strip_marks(text: &str) -> String {
    text.replace("(R)", "")
        .replace("(r)", "")
        .replace("(TM)", "")
        .replace("(tm)", "")
        .replace(['®', '™'], "")
}

/// The brand's `@ x GHz` rating when present; the reported clock otherwise.
pub(crate) fn nominal_speed(brand: &str, frequency_mhz: u64) -> f64 {
    speed_from_brand(brand).unwrap_or_else(|| mhz_to_ghz(frequency_mhz))
}

fn mhz_to_ghz(mhz: u64) -> f64 {
    (mhz as f64 / 10.0).round() / 100.0
}

pub(crate) fn speed_from_brand(brand: &str) -> Option<f64> {
    let (_, clock) = brand.split_once('@')?;
    let clock = clock.trim();
    let digits = clock
        .trim_end_matches(|c: char| c.is_ascii_alphabetic())
        .trim();
    let value: f64 = digits.parse().ok()?;
    if clock.to_ascii_lowercase().ends_with("mhz") {
        Some((value / 10.0).round() / 100.0)
    } else {
        Some(value)
    }
}
