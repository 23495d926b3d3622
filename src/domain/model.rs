use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Directory-name formats accepted for a day partition, tried in order.
const DAY_FORMATS: [&str; 2] = ["%m-%d-%Y", "%Y-%m-%d"];

/// Resolved-country key the measurement pipeline writes when the target is unknown.
pub const UNKNOWN_COUNTRY: &str = "undefined";

/// Domain selector value meaning "every domain of the day".
pub const ALL_DOMAINS: &str = "all";

/// One measurement day. Keeps the directory name as the lookup key and the
/// parsed date for chronological ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Day {
    key: String,
    date: NaiveDate,
}

impl Day {
    pub fn parse(key: &str) -> Option<Self> {
        DAY_FORMATS.iter().find_map(|format| {
            NaiveDate::parse_from_str(key, format)
                .ok()
                .map(|date| Self {
                    key: key.to_string(),
                    date,
                })
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// UTC midnight of the day, in epoch milliseconds.
    pub fn timestamp_millis(&self) -> i64 {
        self.date
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc().timestamp_millis())
            .unwrap_or_default()
    }
}

impl Ord for Day {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date
            .cmp(&other.date)
            .then_with(|| self.key.cmp(&other.key))
    }
}

impl PartialOrd for Day {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// ISO 3166-1 alpha-2 code, stored upper case. The unknown-target sentinel
/// is kept as the literal `undefined`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case(UNKNOWN_COUNTRY) {
            Self(UNKNOWN_COUNTRY.to_string())
        } else {
            Self(trimmed.to_ascii_uppercase())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_COUNTRY
    }
}

impl From<String> for CountryCode {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for CountryCode {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DomainSelector {
    All,
    Domain(String),
}

impl DomainSelector {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed == ALL_DOMAINS {
            DomainSelector::All
        } else {
            DomainSelector::Domain(trimmed.to_string())
        }
    }
}

impl From<&str> for DomainSelector {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// Resolved country -> resolution count.
pub type ResolvedCounts = BTreeMap<CountryCode, f64>;

/// Origin country -> resolved country -> resolution count.
pub type CountryMatrix = BTreeMap<CountryCode, ResolvedCounts>;

/// One day's domain -> origin -> resolved -> count graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryToCountry {
    pub domains: BTreeMap<String, CountryMatrix>,
}

impl CountryToCountry {
    pub fn domain(&self, domain: &str) -> Option<&CountryMatrix> {
        self.domains.get(domain)
    }

    pub fn domain_names(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// One day's clusters of similarly resolving domains. `None` marks a
/// placeholder slot in the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterSet {
    pub clusters: Vec<Option<Vec<String>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CountryCodeMap {
    names: BTreeMap<CountryCode, String>,
}

impl CountryCodeMap {
    pub fn new(names: BTreeMap<CountryCode, String>) -> Self {
        Self { names }
    }

    /// Case-insensitive lookup of a country's display name.
    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.names.get(&CountryCode::new(code)).map(String::as_str)
    }

    pub fn entries(&self) -> &BTreeMap<CountryCode, String> {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A stacked-area series for the dashboard chart: `[timestamp_ms, count]` points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    pub data: Vec<(i64, f64)>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionStats {
    pub primary_resolutions: u64,
    pub total_resolutions: u64,
}

/// Operator-facing overview of what was loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub days: usize,
    pub country_codes: usize,
    pub domains_per_day: BTreeMap<String, usize>,
    pub global_datasets: Vec<String>,
}

pub const DEFAULT_COUNTRY_TO_COUNTRY_FILE: &str = "country-country.json";
pub const DEFAULT_CLUSTERS_FILE: &str = "clusters.json";
pub const DEFAULT_COUNTRY_CODE_MAP_FILE: &str = "country_code_map.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    CountryToCountry,
    Clusters,
    CountryCodeMap,
}

/// Loader mapping table: which file name carries which dataset kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFiles {
    pub country_to_country: String,
    pub clusters: String,
    pub country_code_map: String,
}

impl Default for DatasetFiles {
    fn default() -> Self {
        Self {
            country_to_country: DEFAULT_COUNTRY_TO_COUNTRY_FILE.to_string(),
            clusters: DEFAULT_CLUSTERS_FILE.to_string(),
            country_code_map: DEFAULT_COUNTRY_CODE_MAP_FILE.to_string(),
        }
    }
}

impl DatasetFiles {
    pub fn kind_of(&self, file_name: &str) -> Option<DatasetKind> {
        if file_name == self.country_to_country {
            Some(DatasetKind::CountryToCountry)
        } else if file_name == self.clusters {
            Some(DatasetKind::Clusters)
        } else if file_name == self.country_code_map {
            Some(DatasetKind::CountryCodeMap)
        } else {
            None
        }
    }
}
