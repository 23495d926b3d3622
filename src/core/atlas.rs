use crate::core::store::DatasetStore;
use crate::core::{country_graph, resolution_stats, similarity, time_series};
use crate::domain::model::{
    ChartSeries, CountryCode, CountryCodeMap, CountryMatrix, DatasetFiles, DomainSelector,
    LoadSummary, ResolutionStats,
};
use crate::domain::ports::DataSource;
use crate::utils::error::Result;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The operations an outer layer (CLI, HTTP routes) can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    CountryCodeMap,
    ListDays,
    ChartForDomain {
        domain: String,
        country: Option<String>,
    },
    TotalResolutionStats {
        day: String,
    },
    CountriesByDomain {
        domain: String,
        day: String,
    },
    ListDomains {
        day: String,
    },
    SimilarDomains {
        domain: String,
        day: String,
    },
    Summary,
}

/// Read-only query front over a loaded store. Cloning shares the store.
#[derive(Debug, Clone)]
pub struct AtlasEngine {
    store: Arc<DatasetStore>,
}

impl AtlasEngine {
    pub fn new(store: DatasetStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub async fn load<D: DataSource>(source: &D, files: &DatasetFiles) -> Result<Self> {
        Ok(Self::new(DatasetStore::load(source, files).await?))
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub fn country_code_map(&self) -> &CountryCodeMap {
        self.store.country_codes()
    }

    pub fn list_days(&self) -> Vec<String> {
        self.store
            .days()
            .iter()
            .map(|day| day.key().to_string())
            .collect()
    }

    pub fn chart_for_domain(&self, domain: &str, country: Option<&str>) -> Vec<ChartSeries> {
        time_series::chart_for_domain(
            self.store.country_to_country_by_day(),
            &DomainSelector::parse(domain),
            country,
            self.store.country_codes(),
        )
    }

    pub fn total_resolution_stats(&self, day: &str) -> BTreeMap<CountryCode, ResolutionStats> {
        resolution_stats::total_resolution_stats(self.store.country_to_country(day.trim()))
    }

    pub fn countries_by_domain(&self, domain: &str, day: &str) -> CountryMatrix {
        country_graph::countries_by_domain(
            self.store.country_to_country(day.trim()),
            &DomainSelector::parse(domain),
        )
    }

    pub fn list_domains(&self, day: &str) -> Vec<String> {
        country_graph::list_domains(self.store.country_to_country(day.trim()))
    }

    pub fn similar_domains(&self, domain: &str, day: &str) -> Vec<String> {
        similarity::similar_domains(self.store.clusters(day.trim()), domain.trim())
    }

    pub fn summary(&self) -> LoadSummary {
        self.store.summary()
    }

    /// Runs a query and renders its result in the dashboard's JSON shape.
    pub fn execute(&self, query: &Query) -> serde_json::Result<Value> {
        tracing::debug!("Executing {:?}", query);
        match query {
            Query::CountryCodeMap => serde_json::to_value(self.country_code_map()),
            Query::ListDays => serde_json::to_value(self.list_days()),
            Query::ChartForDomain { domain, country } => {
                serde_json::to_value(self.chart_for_domain(domain, country.as_deref()))
            }
            Query::TotalResolutionStats { day } => {
                serde_json::to_value(self.total_resolution_stats(day))
            }
            Query::CountriesByDomain { domain, day } => {
                serde_json::to_value(self.countries_by_domain(domain, day))
            }
            Query::ListDomains { day } => serde_json::to_value(self.list_domains(day)),
            Query::SimilarDomains { domain, day } => {
                serde_json::to_value(self.similar_domains(domain, day))
            }
            Query::Summary => serde_json::to_value(self.summary()),
        }
    }
}
