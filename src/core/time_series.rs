use crate::domain::model::{
    ChartSeries, CountryCode, CountryCodeMap, CountryMatrix, CountryToCountry, Day,
    DomainSelector, ResolvedCounts,
};
use std::collections::BTreeMap;

const SERIES_KIND: &str = "area";

/// One stacked-area series per resolved country across every day.
///
/// Days must arrive oldest first. Each day contributes the selected
/// domains' counts, either from the single `origin` country or summed over
/// all origins. A point whose timestamp matches the series' last point is
/// folded into it, so no series carries two points for the same timestamp.
/// Zero contributions add no point.
pub fn chart_for_domain<'a, I>(
    days: I,
    selector: &DomainSelector,
    origin: Option<&str>,
    names: &CountryCodeMap,
) -> Vec<ChartSeries>
where
    I: IntoIterator<Item = (&'a Day, &'a CountryToCountry)>,
{
    let origin = origin
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(CountryCode::new);
    let mut series: BTreeMap<CountryCode, Vec<(i64, f64)>> = BTreeMap::new();

    for (day, dataset) in days {
        let timestamp = day.timestamp_millis();
        match selector {
            DomainSelector::Domain(domain) => {
                if let Some(matrix) = dataset.domain(domain) {
                    add_domain(&mut series, timestamp, matrix, origin.as_ref());
                }
            }
            DomainSelector::All => {
                for matrix in dataset.domains.values() {
                    add_domain(&mut series, timestamp, matrix, origin.as_ref());
                }
            }
        }
    }

    series
        .into_iter()
        .map(|(country, data)| ChartSeries {
            kind: SERIES_KIND,
            name: names
                .name_of(country.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| country.to_string()),
            data,
        })
        .collect()
}

fn add_domain(
    series: &mut BTreeMap<CountryCode, Vec<(i64, f64)>>,
    timestamp: i64,
    matrix: &CountryMatrix,
    origin: Option<&CountryCode>,
) {
    match origin {
        Some(origin) => {
            if let Some(resolved) = matrix.get(origin) {
                add_points(series, timestamp, resolved);
            }
        }
        None => {
            for resolved in matrix.values() {
                add_points(series, timestamp, resolved);
            }
        }
    }
}

fn add_points(
    series: &mut BTreeMap<CountryCode, Vec<(i64, f64)>>,
    timestamp: i64,
    resolved: &ResolvedCounts,
) {
    for (country, &count) in resolved {
        if country.is_unknown() || count == 0.0 {
            continue;
        }
        let points = series.entry(country.clone()).or_default();
        match points.last_mut() {
            Some((last_timestamp, value)) if *last_timestamp == timestamp => *value += count,
            _ => points.push((timestamp, count)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::parse_country_to_country;

    fn day(key: &str) -> Day {
        Day::parse(key).unwrap()
    }

    fn graph(json: &str) -> CountryToCountry {
        parse_country_to_country("test/country-country.json", json.as_bytes()).unwrap()
    }

    fn names() -> CountryCodeMap {
        CountryCodeMap::new(
            [("fr", "France"), ("de", "Germany")]
                .into_iter()
                .map(|(code, name)| (CountryCode::new(code), name.to_string()))
                .collect(),
        )
    }

    fn find<'a>(series: &'a [ChartSeries], name: &str) -> &'a ChartSeries {
        series.iter().find(|s| s.name == name).unwrap()
    }

    #[test]
    fn test_same_day_contributions_merge_into_one_point() {
        let d = day("06-29-2015");
        let dataset = graph(r#"{"a.com": {"O1": {"FR": 3}}, "b.com": {"O1": {"FR": 4}}}"#);

        let series = chart_for_domain([(&d, &dataset)], &DomainSelector::All, None, &names());

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].kind, "area");
        assert_eq!(series[0].name, "France");
        assert_eq!(series[0].data, vec![(d.timestamp_millis(), 7.0)]);
    }

    #[test]
    fn test_origins_are_summed_without_filter() {
        let d = day("06-29-2015");
        let dataset = graph(r#"{"a.com": {"US": {"DE": 2}, "BR": {"DE": 5, "FR": 1}}}"#);

        let series = chart_for_domain(
            [(&d, &dataset)],
            &DomainSelector::parse("a.com"),
            None,
            &names(),
        );

        assert_eq!(find(&series, "Germany").data, vec![(d.timestamp_millis(), 7.0)]);
        assert_eq!(find(&series, "France").data, vec![(d.timestamp_millis(), 1.0)]);
    }

    #[test]
    fn test_origin_filter_is_case_insensitive() {
        let d = day("06-29-2015");
        let dataset = graph(r#"{"a.com": {"US": {"DE": 2}, "BR": {"FR": 1}}}"#);

        let series = chart_for_domain(
            [(&d, &dataset)],
            &DomainSelector::parse("a.com"),
            Some("us"),
            &names(),
        );

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, "Germany");
        assert_eq!(series[0].data, vec![(d.timestamp_millis(), 2.0)]);
    }

    #[test]
    fn test_series_are_chronological_without_duplicate_timestamps() {
        let d1 = day("06-29-2015");
        let d2 = day("06-30-2015");
        let d3 = day("07-01-2015");
        let g1 = graph(r#"{"a.com": {"US": {"DE": 1}, "BR": {"DE": 1}}, "b.com": {"US": {"DE": 1}}}"#);
        let g2 = graph(r#"{"a.com": {"US": {"FR": 2}}}"#);
        let g3 = graph(r#"{"b.com": {"US": {"DE": 4, "FR": 1}}}"#);
        let days = [(&d1, &g1), (&d2, &g2), (&d3, &g3)];

        for selector in [DomainSelector::All, DomainSelector::parse("a.com")] {
            for origin in [None, Some("US")] {
                let series = chart_for_domain(days, &selector, origin, &names());
                for s in &series {
                    assert!(s.data.windows(2).all(|w| w[0].0 < w[1].0), "{:?}", s);
                }
            }
        }

        let series = chart_for_domain(days, &DomainSelector::All, None, &names());
        assert_eq!(
            find(&series, "Germany").data,
            vec![(d1.timestamp_millis(), 3.0), (d3.timestamp_millis(), 4.0)]
        );
        assert_eq!(
            find(&series, "France").data,
            vec![(d2.timestamp_millis(), 2.0), (d3.timestamp_millis(), 1.0)]
        );
    }

    #[test]
    fn test_unknown_targets_and_zero_counts_are_skipped() {
        let d = day("06-29-2015");
        let dataset = graph(r#"{"a.com": {"US": {"undefined": 5, "DE": 0, "FR": 1}}}"#);

        let series = chart_for_domain([(&d, &dataset)], &DomainSelector::All, None, &names());

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].name, "France");
    }

    #[test]
    fn test_unnamed_country_falls_back_to_code() {
        let d = day("06-29-2015");
        let dataset = graph(r#"{"a.com": {"US": {"jp": 1}}}"#);

        let series = chart_for_domain([(&d, &dataset)], &DomainSelector::All, None, &names());

        assert_eq!(series[0].name, "JP");
    }

    #[test]
    fn test_missing_domain_or_origin_yields_no_series() {
        let d = day("06-29-2015");
        let dataset = graph(r#"{"a.com": {"US": {"DE": 1}}}"#);

        assert!(chart_for_domain(
            [(&d, &dataset)],
            &DomainSelector::parse("z.com"),
            None,
            &names()
        )
        .is_empty());
        assert!(chart_for_domain([(&d, &dataset)], &DomainSelector::All, Some("CN"), &names())
            .is_empty());
    }
}
