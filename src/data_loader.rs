#![allow(dead_code)]

use serde::Deserialize;
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Loading a document can fail two ways, and callers care which: a missing or
// unreadable file is not the same thing as a file that exists but holds
// garbage. An empty season parses fine and is not an error.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

// The per-season document: canonical team roster, logo lookup and the full
// calendar of rounds ("giornate").
pub fn load_season(path: &Path) -> Result<SeasonData, LoadError> {
    load_json(path)
}

// Presentation config: classification zones plus any administrative point
// adjustments. Penalties are data, not code.
pub fn load_config(path: &Path) -> Result<Config, LoadError> {
    load_json(path)
}

// The archive home page document listing every recorded season.
pub fn load_seasons_index(path: &Path) -> Result<SeasonsIndex, LoadError> {
    load_json(path)
}

#[derive(Deserialize, Debug, Clone)]
pub struct SeasonData {
    pub teams: Vec<String>,
    #[serde(rename = "teamLogos", default)]
    pub team_logos: HashMap<String, String>,
    pub calendar: Vec<Round>,
}

impl SeasonData {
    // Round grouping only matters to the calendar view; the standings
    // pipeline works on the flat list.
    pub fn all_matches(&self) -> Vec<Match> {
        self.calendar
            .iter()
            .flat_map(|round| round.matches.iter().cloned())
            .collect()
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Round {
    // Hand-edited files carry the round number both quoted and bare.
    #[serde(rename = "giornata", deserialize_with = "deserialize_number_from_string")]
    pub number: u32,
    #[serde(rename = "partite")]
    pub matches: Vec<Match>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Match {
    pub home: String,
    pub away: String,
    #[serde(
        rename = "homeScore",
        default,
        deserialize_with = "deserialize_option_number_from_string"
    )]
    pub home_score: Option<u32>,
    #[serde(
        rename = "awayScore",
        default,
        deserialize_with = "deserialize_option_number_from_string"
    )]
    pub away_score: Option<u32>,
}

impl Match {
    // A score missing on either side means the match has not been played.
    pub fn result(&self) -> Option<(u32, u32)> {
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }

    pub fn involves(&self, name: &str) -> bool {
        self.home == name || self.away == name
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub positions: BTreeMap<String, Zone>,
    #[serde(rename = "pointAdjustments", default)]
    pub point_adjustments: HashMap<String, i32>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Zone {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub positions: Vec<usize>,
    #[serde(rename = "backgroundColor", default)]
    pub background_color: String,
    #[serde(rename = "borderColor", default)]
    pub border_color: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SeasonsIndex {
    pub seasons: Vec<SeasonEntry>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SeasonEntry {
    pub year: String,
    pub title: String,
    #[serde(default)]
    pub champion: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub logo: String,
}

impl SeasonEntry {
    // A blank champion string counts as "no champion yet".
    pub fn is_concluded(&self) -> bool {
        self.champion
            .as_deref()
            .map_or(false, |c| !c.trim().is_empty())
    }
}
