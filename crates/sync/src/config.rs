//! Configuration for the min-width synchronizer.
//!
//! Identifies the two page elements and the sidebar transitions worth
//! reacting to. Can be loaded from environment variables or constructed
//! programmatically; hosts that carry their own configuration files get
//! serde support for free.

use serde::{Deserialize, Serialize};
use std::env;

/// Runtime configuration for the min-width synchronizer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Markup identifier of the sidebar element.
    pub sidebar_id: String,
    /// Markup identifier of the main content element.
    pub main_id: String,
    /// Sidebar style properties whose transition completion requalifies a
    /// recompute. Transitions of anything else (color, opacity) are ignored.
    pub watched_transitions: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            sidebar_id: String::from("sidebar"),
            main_id: String::from("main"),
            watched_transitions: vec![String::from("width"), String::from("left")],
        }
    }
}

impl SyncConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables, falling back to defaults:
    /// - `GUTTER_SIDEBAR_ID`: sidebar element id (default: "sidebar")
    /// - `GUTTER_MAIN_ID`: main content element id (default: "main")
    /// - `GUTTER_WATCHED_TRANSITIONS`: comma-separated property list
    ///   (default: "width,left")
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let sidebar_id = env::var("GUTTER_SIDEBAR_ID")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.sidebar_id);
        let main_id = env::var("GUTTER_MAIN_ID")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.main_id);
        let watched_transitions = env::var("GUTTER_WATCHED_TRANSITIONS")
            .ok()
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_owned)
                    .collect::<Vec<_>>()
            })
            .filter(|names| !names.is_empty())
            .unwrap_or(defaults.watched_transitions);
        Self {
            sidebar_id,
            main_id,
            watched_transitions,
        }
    }

    /// Whether a completed transition of this property requalifies a
    /// recompute. Property names are case-insensitive per CSS.
    #[must_use]
    pub fn watches_transition(&self, property: &str) -> bool {
        self.watched_transitions
            .iter()
            .any(|watched| watched.eq_ignore_ascii_case(property))
    }
}
