use crate::domain::model::{CountryCode, CountryToCountry, ResolutionStats};
use std::collections::{BTreeMap, BTreeSet};

/// Per resolved country: how many domains resolved there at all
/// (`total_resolutions`) and for how many it took the largest single count
/// (`primary_resolutions`). Both are presence counts, one per domain.
///
/// Equal maxima go to the lexicographically smallest country code.
pub fn total_resolution_stats(
    dataset: Option<&CountryToCountry>,
) -> BTreeMap<CountryCode, ResolutionStats> {
    let mut stats: BTreeMap<CountryCode, ResolutionStats> = BTreeMap::new();
    let Some(dataset) = dataset else {
        return stats;
    };

    for matrix in dataset.domains.values() {
        let mut seen: BTreeSet<&CountryCode> = BTreeSet::new();
        let mut primary: Option<(&CountryCode, f64)> = None;

        for resolved in matrix.values() {
            for (country, &count) in resolved {
                if country.is_unknown() {
                    continue;
                }
                seen.insert(country);
                primary = match primary {
                    Some((best, best_count))
                        if best_count > count || (best_count == count && best <= country) =>
                    {
                        Some((best, best_count))
                    }
                    _ => Some((country, count)),
                };
            }
        }

        for country in seen {
            stats.entry(country.clone()).or_default().total_resolutions += 1;
        }
        if let Some((country, _)) = primary {
            stats.entry(country.clone()).or_default().primary_resolutions += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::parse_country_to_country;

    fn graph(json: &str) -> CountryToCountry {
        parse_country_to_country("test/country-country.json", json.as_bytes()).unwrap()
    }

    fn stats_for(
        stats: &BTreeMap<CountryCode, ResolutionStats>,
        code: &str,
    ) -> Option<(u64, u64)> {
        stats
            .get(&CountryCode::new(code))
            .map(|s| (s.primary_resolutions, s.total_resolutions))
    }

    #[test]
    fn test_primary_and_total_counts() {
        let dataset = graph(r#"{"x.com": {"O1": {"A": 5, "B": 2}}, "y.com": {"O1": {"A": 1}}}"#);
        let stats = total_resolution_stats(Some(&dataset));

        assert_eq!(stats.len(), 2);
        assert_eq!(stats_for(&stats, "A"), Some((2, 2)));
        assert_eq!(stats_for(&stats, "B"), Some((0, 1)));
    }

    #[test]
    fn test_country_counted_once_per_domain() {
        let dataset = graph(
            r#"{"x.com": {"US": {"DE": 1, "FR": 3}, "BR": {"DE": 9}, "CN": {"DE": 2}}}"#,
        );
        let stats = total_resolution_stats(Some(&dataset));

        assert_eq!(stats_for(&stats, "DE"), Some((1, 1)));
        assert_eq!(stats_for(&stats, "FR"), Some((0, 1)));
    }

    #[test]
    fn test_primary_is_largest_single_count_not_sum() {
        // FR sums to 8 across origins but DE holds the largest single count.
        let dataset = graph(r#"{"x.com": {"US": {"FR": 4, "DE": 6}, "BR": {"FR": 4}}}"#);
        let stats = total_resolution_stats(Some(&dataset));

        assert_eq!(stats_for(&stats, "DE"), Some((1, 1)));
        assert_eq!(stats_for(&stats, "FR"), Some((0, 1)));
    }

    #[test]
    fn test_ties_go_to_smallest_country_code() {
        let dataset = graph(r#"{"x.com": {"US": {"FR": 3}, "BR": {"DE": 3}}}"#);
        let stats = total_resolution_stats(Some(&dataset));

        assert_eq!(stats_for(&stats, "DE"), Some((1, 1)));
        assert_eq!(stats_for(&stats, "FR"), Some((0, 1)));
    }

    #[test]
    fn test_unknown_target_never_reported() {
        let dataset = graph(r#"{"x.com": {"US": {"undefined": 100, "DE": 1}}, "y.com": {"US": {"undefined": 1}}}"#);
        let stats = total_resolution_stats(Some(&dataset));

        assert_eq!(stats.len(), 1);
        assert_eq!(stats_for(&stats, "DE"), Some((1, 1)));
    }

    #[test]
    fn test_absent_day_is_empty() {
        assert!(total_resolution_stats(None).is_empty());
    }

    #[test]
    fn test_serialized_field_names() {
        let dataset = graph(r#"{"x.com": {"US": {"DE": 1}}}"#);
        let json = serde_json::to_value(total_resolution_stats(Some(&dataset))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"DE": {"primary_resolutions": 1, "total_resolutions": 1}})
        );
    }
}
