//! Fixed lookup tables for the SPROUT data collection sites and demographic
//! codes.

/// Site prefix of a participant identifier to city name.
static CITY_NAMES: &[(&str, &str)] = &[
    ("ATL", "Atlanta, GA"),
    ("BLT", "Baltimore, MD"),
    ("CHI", "Chicago, IL"),
    ("DLS", "Dallas, TX"),
    ("ISN", "Iselin, NJ"),
    ("LAX", "Los Angeles, CA"),
    ("ORL", "Orlando, FL"),
    ("STL", "St. Louis, MO"),
];

/// City name to (latitude, longitude).
static CITY_COORDS: &[(&str, (f64, f64))] = &[
    ("Atlanta, GA", (33.749, -84.388)),
    ("Baltimore, MD", (39.2904, -76.6122)),
    ("Chicago, IL", (41.8781, -87.6298)),
    ("Dallas, TX", (32.7767, -96.7970)),
    ("Iselin, NJ", (40.5754, -74.3221)),
    ("Los Angeles, CA", (34.0522, -118.2437)),
    ("Orlando, FL", (28.5383, -81.3792)),
    ("St. Louis, MO", (38.6270, -90.1994)),
];

/// Race code as reported in the intake survey.
static RACE_NAMES: &[(&str, &str)] = &[
    ("1", "American Indian or Alaska Native"),
    ("2", "Asian"),
    ("3", "Black or African American"),
    ("4", "Middle Eastern or North African"),
    ("5", "Native Hawaiian or Other Pacific Islander"),
    ("6", "Caucasian"),
    ("7", "Other"),
];

pub const OTHER_RACE: &str = "Other";

/// Resolves a site code to its city name. Unknown codes are returned as-is.
pub fn city_name(code: &str) -> String {
    CITY_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| code.to_string())
}

pub fn is_known_city_code(code: &str) -> bool {
    CITY_NAMES.iter().any(|(c, _)| *c == code)
}

pub fn city_coords(city: &str) -> Option<(f64, f64)> {
    CITY_COORDS
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, coords)| *coords)
}

/// Race bucket for one code; anything outside the table is "Other".
pub fn race_name(code: &str) -> &'static str {
    RACE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(OTHER_RACE)
}
