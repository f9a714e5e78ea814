use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::SystemData;

/// What the window shows. Absent results never clear a snapshot already on screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum DisplayState {
    #[serde(rename_all = "camelCase")]
    Loading {
        missed_polls: u32,
    },
    #[serde(rename_all = "camelCase")]
    Ready {
        data: SystemData,
        received_at: DateTime<Utc>,
        /// Consecutive polls that returned no data since `received_at`.
        missed_polls: u32,
    },
}

impl Default for DisplayState {
    fn default() -> Self {
        DisplayState::Loading { missed_polls: 0 }
    }
}

impl DisplayState {
    pub fn apply(&mut self, outcome: Option<SystemData>, now: DateTime<Utc>) {
        match outcome {
            Some(data) => {
                *self = DisplayState::Ready {
                    data,
                    received_at: now,
                    missed_polls: 0,
                };
            }
            None => match self {
                DisplayState::Loading { missed_polls }
                | DisplayState::Ready { missed_polls, .. } => {
                    *missed_polls = missed_polls.saturating_add(1);
                }
            },
        }
    }

    pub fn data(&self) -> Option<&SystemData> {
        match self {
            DisplayState::Ready { data, .. } => Some(data),
            DisplayState::Loading { .. } => None,
        }
    }

    pub fn missed_polls(&self) -> u32 {
        match self {
            DisplayState::Loading { missed_polls } | DisplayState::Ready { missed_polls, .. } => {
                *missed_polls
            }
        }
    }
}
