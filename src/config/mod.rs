pub mod local;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::atlas::Query;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use toml_config::{AtlasConfig, LogFormat};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "geodns-atlas")]
#[command(about = "Query pre-computed DNS resolution analytics by day, domain and country")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Data root directory (overrides the config file)
    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Pretty-print the JSON result
    #[arg(long)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Country code -> country name mapping
    CountryCodeMap,
    /// All days with data, oldest first
    ListDays,
    /// Per resolved country time series for a domain (or "all")
    Chart {
        #[arg(long)]
        domain: String,
        /// Only count queries from this origin country
        #[arg(long)]
        country: Option<String>,
    },
    /// Primary and total resolutions per country on a day
    Stats {
        #[arg(long)]
        day: String,
    },
    /// Origin -> resolved country counts for a domain (or "all") on a day
    Countries {
        #[arg(long)]
        domain: String,
        #[arg(long)]
        day: String,
    },
    /// Domains measured on a day
    Domains {
        #[arg(long)]
        day: String,
    },
    /// Domains that resolved like the given one on a day
    Similar {
        #[arg(long)]
        domain: String,
        #[arg(long)]
        day: String,
    },
    /// What was loaded
    Summary,
}

#[cfg(feature = "cli")]
impl Command {
    pub fn to_query(&self) -> Query {
        match self {
            Command::CountryCodeMap => Query::CountryCodeMap,
            Command::ListDays => Query::ListDays,
            Command::Chart { domain, country } => Query::ChartForDomain {
                domain: domain.clone(),
                country: country.clone(),
            },
            Command::Stats { day } => Query::TotalResolutionStats { day: day.clone() },
            Command::Countries { domain, day } => Query::CountriesByDomain {
                domain: domain.clone(),
                day: day.clone(),
            },
            Command::Domains { day } => Query::ListDomains { day: day.clone() },
            Command::Similar { domain, day } => Query::SimilarDomains {
                domain: domain.clone(),
                day: day.clone(),
            },
            Command::Summary => Query::Summary,
        }
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn resolve(&self) -> Result<AtlasConfig> {
        let mut config = match &self.config {
            Some(path) => AtlasConfig::from_file(path)?,
            None => AtlasConfig::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            config.data.root = data_dir.clone();
        }
        if self.json_logs {
            config.logging.format = LogFormat::Json;
        }

        Ok(config)
    }
}
