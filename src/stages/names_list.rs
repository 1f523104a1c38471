use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::io::{SessionStats, read_speakers, save_table};
use crate::models::{NameRecord, Roster, Speaker, ToTable};

pub const DEFAULT_SESSIONS_DIR: &str = "./data/sessions/";
pub const DEFAULT_NAMES_LIST: &str = "./data/speakers/speaker-names.csv";

/// Configuration for building the unique names list
#[derive(Debug, Clone)]
pub struct NamesListConfig {
    /// Directory containing the crawled session files
    pub sessions_dir: PathBuf,
    /// CSV file receiving the names list
    pub names_list: PathBuf,
}

impl Default for NamesListConfig {
    fn default() -> Self {
        Self {
            sessions_dir: PathBuf::from(DEFAULT_SESSIONS_DIR),
            names_list: PathBuf::from(DEFAULT_NAMES_LIST),
        }
    }
}

/// Result of building the names list
#[derive(Debug)]
pub struct NamesListResult {
    pub unique_names: usize,
    pub output_path: PathBuf,
    pub stats: SessionStats,
}

/// One record per distinct speaker name, in first-seen order
pub fn unique_names<I>(speakers: I) -> Vec<NameRecord>
where
    I: IntoIterator<Item = Speaker>,
{
    let mut roster = Roster::new();
    for speaker in speakers {
        roster.insert(speaker);
    }
    roster
        .into_speakers()
        .into_iter()
        .map(|s| NameRecord::new(s.full_name))
        .collect()
}

/// Read every session and save the list of unique speaker names
pub fn build_names_list(config: &NamesListConfig) -> Result<NamesListResult> {
    let mut reader = read_speakers(&config.sessions_dir)?;
    let records = reader.consume_with(|speakers| unique_names(speakers))?;
    let stats = reader.stats().clone();

    info!("Found {} unique speaker names", records.len());

    save_table(&records.to_table(), &config.names_list)
        .with_context(|| format!("Failed to save names list to {:?}", config.names_list))?;
    info!("Names list written to {:?}", config.names_list);

    Ok(NamesListResult {
        unique_names: records.len(),
        output_path: config.names_list.clone(),
        stats,
    })
}
