use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use super::types::CityCount;
use super::utility::pct_label;
use crate::normalize::ParticipantRecord;
use crate::normalize::tables::city_coords;

/// Number of distinct participant identifiers.
pub fn unique_participants(records: &[ParticipantRecord]) -> usize {
    records
        .iter()
        .map(|r| r.identifier.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Distinct participants per city. Repeat visits count once.
pub fn city_participant_counts(records: &[ParticipantRecord]) -> BTreeMap<String, usize> {
    let mut ids: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for record in records {
        if let Some(city) = record.city.as_deref() {
            ids.entry(city).or_default().insert(record.identifier.as_str());
        }
    }
    ids.into_iter()
        .map(|(city, set)| (city.to_string(), set.len()))
        .collect()
}

/// Cities with known coordinates, most participants first.
///
/// Cities missing from the coordinate table are left out of this list only;
/// they still count towards `unique_total`.
pub fn geographic(counts: &BTreeMap<String, usize>, unique_total: usize) -> Vec<CityCount> {
    let mut cities: Vec<CityCount> = counts
        .iter()
        .filter_map(|(city, &participants)| {
            let (lat, lon) = city_coords(city)?;
            Some(CityCount {
                city: city.clone(),
                participants,
                percentage: pct_label(participants, unique_total),
                lat,
                lon,
            })
        })
        .collect();

    // stable: ties keep alphabetical order from the map
    cities.sort_by_key(|c| Reverse(c.participants));
    cities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::HispanicStatus;
    use crate::normalize::tables::city_name;

    fn record(id: &str) -> ParticipantRecord {
        let code: String = id.chars().take(3).collect();
        ParticipantRecord {
            identifier: id.to_string(),
            city: Some(city_name(&code)),
            city_code: Some(code),
            age_months: Some(40.0),
            age_label: None,
            income_group: None,
            race_codes: vec![],
            hispanic: HispanicStatus::Unknown,
        }
    }

    #[test]
    fn test_repeat_visits_counted_once() {
        let records = vec![record("ATL1"), record("ATL1"), record("ATL2"), record("CHI1")];
        let counts = city_participant_counts(&records);

        assert_eq!(counts["Atlanta, GA"], 2);
        assert_eq!(counts["Chicago, IL"], 1);
        assert_eq!(unique_participants(&records), 3);
    }

    #[test]
    fn test_percentage_of_unique_total() {
        let counts = BTreeMap::from([("Dallas, TX".to_string(), 40)]);
        let cities = geographic(&counts, 400);
        assert_eq!(cities[0].percentage, "10.0");
        assert_eq!(cities[0].lat, 32.7767);
        assert_eq!(cities[0].lon, -96.7970);
    }

    #[test]
    fn test_cities_without_coordinates_excluded() {
        let records = vec![record("SEA1"), record("ATL1")];
        let counts = city_participant_counts(&records);
        assert_eq!(counts.len(), 2);

        let cities = geographic(&counts, unique_participants(&records));
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].city, "Atlanta, GA");
        assert_eq!(cities[0].percentage, "50.0");
    }

    #[test]
    fn test_sorted_descending_then_by_name() {
        let records = vec![
            record("STL1"),
            record("CHI1"),
            record("ORL1"),
            record("ORL2"),
        ];
        let cities = geographic(&city_participant_counts(&records), 4);
        let names: Vec<_> = cities.iter().map(|c| c.city.as_str()).collect();
        assert_eq!(names, vec!["Orlando, FL", "Chicago, IL", "St. Louis, MO"]);
    }
}
