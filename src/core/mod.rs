pub mod atlas;
pub mod country_graph;
pub mod resolution_stats;
pub mod similarity;
pub mod store;
pub mod time_series;

pub use crate::domain::model::{
    ChartSeries, CountryCode, CountryCodeMap, CountryMatrix, CountryToCountry, DatasetFiles, Day,
    DomainSelector, ResolutionStats,
};
pub use crate::domain::ports::{ConfigProvider, DataSource};
pub use crate::utils::error::Result;
