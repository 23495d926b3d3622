use crate::domain::model::{
    ClusterSet, CountryCode, CountryCodeMap, CountryMatrix, CountryToCountry, DatasetFiles,
    DatasetKind, Day, LoadSummary,
};
use crate::domain::ports::{DataSource, EntryKind};
use crate::utils::error::{AtlasError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

/// Everything loaded for one day directory.
#[derive(Debug, Clone, Default)]
pub struct DayPartition {
    pub country_to_country: CountryToCountry,
    pub clusters: Option<ClusterSet>,
    /// Files with no known dataset kind, keyed by file stem.
    pub raw: HashMap<String, Value>,
}

/// The whole corpus, loaded once and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    days: Vec<Day>,
    partitions: HashMap<String, DayPartition>,
    country_codes: CountryCodeMap,
    globals: HashMap<String, Value>,
}

impl DatasetStore {
    /// Scans the data root once. Any unreadable entry or malformed file fails
    /// the whole load.
    pub async fn load<D: DataSource>(source: &D, files: &DatasetFiles) -> Result<Self> {
        let start_time = Instant::now();
        tracing::info!("Loading datasets");

        let mut store = DatasetStore::default();
        let mut entries = source.list_entries("").await?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        for entry in entries {
            if entry.name.starts_with('.') {
                tracing::debug!("Skipping hidden entry {}", entry.name);
                continue;
            }

            match entry.kind {
                EntryKind::Directory => {
                    let day = Day::parse(&entry.name).ok_or_else(|| AtlasError::InvalidDayError {
                        name: entry.name.clone(),
                    })?;
                    let partition = load_day(source, files, &day).await?;
                    tracing::info!(
                        "Loaded day {} ({} domains)",
                        day,
                        partition.country_to_country.len()
                    );
                    store.partitions.insert(day.key().to_string(), partition);
                    store.days.push(day);
                }
                EntryKind::File => {
                    let bytes = source.read_file(&entry.name).await?;
                    match files.kind_of(&entry.name) {
                        Some(DatasetKind::CountryCodeMap) => {
                            store.country_codes = parse_country_code_map(&entry.name, &bytes)?;
                        }
                        _ => {
                            let value = parse_json::<Value>(&entry.name, &bytes)?;
                            store.globals.insert(file_stem(&entry.name), value);
                        }
                    }
                    tracing::debug!("Loaded data file: {}", entry.name);
                }
            }
        }

        if store.country_codes.is_empty() {
            tracing::warn!(
                "No country code map found ({}); chart series will be named by code",
                files.country_code_map
            );
        }

        store.days.sort();

        tracing::info!(
            "Loaded {} days and {} country names in {:?}",
            store.days.len(),
            store.country_codes.len(),
            start_time.elapsed()
        );
        Ok(store)
    }

    pub fn has_day(&self, day: &str) -> bool {
        self.partitions.contains_key(day)
    }

    /// Days in ascending chronological order.
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn country_to_country(&self, day: &str) -> Option<&CountryToCountry> {
        self.partitions.get(day).map(|p| &p.country_to_country)
    }

    pub fn clusters(&self, day: &str) -> Option<&ClusterSet> {
        self.partitions.get(day).and_then(|p| p.clusters.as_ref())
    }

    /// A per-day file that has no typed dataset kind, by file stem.
    pub fn raw_dataset(&self, day: &str, name: &str) -> Option<&Value> {
        self.partitions.get(day).and_then(|p| p.raw.get(name))
    }

    /// A top-level file other than the country code map, by file stem.
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }

    pub fn country_codes(&self) -> &CountryCodeMap {
        &self.country_codes
    }

    /// Every day paired with its country-to-country dataset, oldest first.
    pub fn country_to_country_by_day(&self) -> impl Iterator<Item = (&Day, &CountryToCountry)> {
        self.days.iter().filter_map(move |day| {
            self.country_to_country(day.key())
                .map(|dataset| (day, dataset))
        })
    }

    pub fn summary(&self) -> LoadSummary {
        let mut global_datasets: Vec<String> = self.globals.keys().cloned().collect();
        global_datasets.sort();

        LoadSummary {
            days: self.days.len(),
            country_codes: self.country_codes.len(),
            domains_per_day: self
                .partitions
                .iter()
                .map(|(day, p)| (day.clone(), p.country_to_country.len()))
                .collect(),
            global_datasets,
        }
    }
}

async fn load_day<D: DataSource>(
    source: &D,
    files: &DatasetFiles,
    day: &Day,
) -> Result<DayPartition> {
    let mut partition = DayPartition::default();
    let mut found_country_to_country = false;

    let mut entries = source.list_entries(day.key()).await?;
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    for entry in entries {
        if entry.name.starts_with('.') || entry.kind != EntryKind::File {
            tracing::debug!("Skipping {}/{}", day, entry.name);
            continue;
        }

        let path = format!("{}/{}", day.key(), entry.name);
        let bytes = source.read_file(&path).await?;

        match files.kind_of(&entry.name) {
            Some(DatasetKind::CountryToCountry) => {
                partition.country_to_country = parse_country_to_country(&path, &bytes)?;
                found_country_to_country = true;
            }
            Some(DatasetKind::Clusters) => {
                partition.clusters = Some(parse_clusters(&path, &bytes)?);
            }
            Some(DatasetKind::CountryCodeMap) | None => {
                let value = parse_json::<Value>(&path, &bytes)?;
                partition.raw.insert(file_stem(&entry.name), value);
            }
        }
        tracing::debug!("Loaded data file: {}", path);
    }

    if !found_country_to_country {
        tracing::warn!(
            "Day {} has no {}; treating it as empty",
            day,
            files.country_to_country
        );
    }

    Ok(partition)
}

fn file_stem(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name)
        .to_string()
}

fn parse_json<T: DeserializeOwned>(path: &str, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|source| AtlasError::JsonError {
        path: path.to_string(),
        source,
    })
}

/// Parses syntax first so that a syntax error and a layout mismatch are
/// reported as different failures.
fn parse_typed<T: DeserializeOwned>(path: &str, bytes: &[u8]) -> Result<T> {
    let value: Value = parse_json(path, bytes)?;
    serde_json::from_value(value).map_err(|e| AtlasError::DatasetShapeError {
        path: path.to_string(),
        message: e.to_string(),
    })
}

pub fn parse_country_to_country(path: &str, bytes: &[u8]) -> Result<CountryToCountry> {
    type RawGraph = BTreeMap<String, BTreeMap<String, BTreeMap<String, f64>>>;
    let raw: RawGraph = parse_typed(path, bytes)?;

    let mut domains = BTreeMap::new();
    for (domain, origins) in raw {
        let mut matrix = CountryMatrix::new();
        for (origin, resolved) in origins {
            let row = matrix.entry(CountryCode::new(&origin)).or_default();
            for (resolved_country, count) in resolved {
                if !count.is_finite() || count < 0.0 {
                    return Err(AtlasError::DatasetShapeError {
                        path: path.to_string(),
                        message: format!(
                            "count {} for {} -> {} -> {} is not a non-negative number",
                            count, domain, origin, resolved_country
                        ),
                    });
                }
                *row.entry(CountryCode::new(&resolved_country)).or_insert(0.0) += count;
            }
        }
        domains.insert(domain, matrix);
    }

    Ok(CountryToCountry { domains })
}

pub fn parse_clusters(path: &str, bytes: &[u8]) -> Result<ClusterSet> {
    let clusters: Vec<Option<Vec<String>>> = parse_typed(path, bytes)?;
    Ok(ClusterSet { clusters })
}

pub fn parse_country_code_map(path: &str, bytes: &[u8]) -> Result<CountryCodeMap> {
    let raw: BTreeMap<String, String> = parse_typed(path, bytes)?;
    Ok(CountryCodeMap::new(
        raw.into_iter()
            .map(|(code, name)| (CountryCode::new(&code), name))
            .collect(),
    ))
}
