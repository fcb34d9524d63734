//! User configuration
//!
//! Which tables are drilled, which question formats may be asked, and how
//! many never-tried families may be introduced per day. Persisted by the
//! storage layer as a single JSON document.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::facts::{MAX_TABLE, MIN_TABLE};
use crate::quiz::QuizFormat;
use crate::scheduler::NewFamilyLimit;

/// Tables selected when nothing has been configured yet
pub const DEFAULT_TABLES: std::ops::RangeInclusive<u32> = 2..=10;

/// Persisted user preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    /// Multiplication tables to drill (each in `1..=10`)
    pub selected_tables: BTreeSet<u32>,
    /// Formats the difficulty selector may choose from
    pub enabled_formats: BTreeSet<QuizFormat>,
    /// Never-tried families allowed per UTC day (0 = unlimited)
    #[serde(default)]
    pub daily_new_family_limit: usize,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            selected_tables: DEFAULT_TABLES.collect(),
            enabled_formats: QuizFormat::ALL.into_iter().collect(),
            daily_new_family_limit: 0,
        }
    }
}

/// Tolerant shape for whatever is on disk
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredUserConfig {
    selected_tables: Option<Vec<i64>>,
    enabled_formats: Option<Vec<String>>,
    daily_new_family_limit: Option<usize>,
}

impl UserConfig {
    /// The daily cap as a scheduler option
    pub fn new_family_limit(&self) -> NewFamilyLimit {
        NewFamilyLimit::from(self.daily_new_family_limit)
    }

    /// Drop out-of-range tables; an empty format set reverts to every format
    pub fn sanitized(mut self) -> Self {
        self.selected_tables
            .retain(|table| (MIN_TABLE..=MAX_TABLE).contains(table));
        if self.enabled_formats.is_empty() {
            self.enabled_formats = QuizFormat::ALL.into_iter().collect();
        }
        self
    }

    /// Parse a stored document.
    ///
    /// Missing fields take their defaults. Unknown format names and
    /// out-of-range tables are dropped rather than rejected, so configs
    /// written by older versions still load.
    pub fn from_stored_json(json: &str) -> Result<Self, serde_json::Error> {
        let stored: StoredUserConfig = serde_json::from_str(json)?;
        let defaults = UserConfig::default();

        let selected_tables = match stored.selected_tables {
            Some(tables) => tables
                .into_iter()
                .filter_map(|table| u32::try_from(table).ok())
                .collect(),
            None => defaults.selected_tables,
        };

        let enabled_formats = match stored.enabled_formats {
            Some(names) => names
                .iter()
                .filter_map(|name| match name.parse::<QuizFormat>() {
                    Ok(format) => Some(format),
                    Err(e) => {
                        tracing::warn!("Ignoring stored format: {}", e);
                        None
                    }
                })
                .collect(),
            None => defaults.enabled_formats,
        };

        Ok(UserConfig {
            selected_tables,
            enabled_formats,
            daily_new_family_limit: stored.daily_new_family_limit.unwrap_or(0),
        }
        .sanitized())
    }
}
