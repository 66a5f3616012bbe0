//! Composite location splitting.
//!
//! The ride exports encode location as `"<CITY NAME><2-letter state>"`
//! with no separator ("NEW YORK NY", "DALLAS TX"). Two literal values in
//! the upstream data carry no state suffix at all and are pinned to a
//! fixed code via an exception table, so future irregular values can be
//! added without touching the split logic.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Location strings with no trailing state code, and the code they map to.
static LOCATION_EXCEPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([("SILICON VALLEY", "LA"), ("ORANGE COUNTY", "LA")])
});

/// Split a raw composite location into `(city, state)`.
///
/// The input is trimmed first. If the trimmed string is an exception-table
/// key it is returned whole with the table's code. Otherwise the trailing
/// two characters become the state and the re-trimmed remainder the city;
/// if that remainder is itself an exception key, the table's code wins
/// over the trailing pair (`"SILICON VALLEYCA"` → `("SILICON VALLEY", "LA")`).
pub fn split_location(raw: &str) -> (String, String) {
    let trimmed = raw.trim();

    if let Some(code) = LOCATION_EXCEPTIONS.get(trimmed) {
        return (trimmed.to_string(), (*code).to_string());
    }

    let chars: Vec<char> = trimmed.chars().collect();
    if chars.len() <= 2 {
        // Degenerate: nothing left once the suffix is taken.
        return (String::new(), trimmed.to_string());
    }

    let split = chars.len() - 2;
    let state: String = chars[split..].iter().collect();
    let city = chars[..split].iter().collect::<String>().trim().to_string();

    if let Some(code) = LOCATION_EXCEPTIONS.get(city.as_str()) {
        return (city, (*code).to_string());
    }

    (city, state)
}
