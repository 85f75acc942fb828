//! Display state machine for one lookup widget.
//!
//! The controller owns the only instance; every transition replaces it.

use citycast_weather::{PipelineEvent, PlaceQuery, ResolvedLocation, WeatherSummary};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplayState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A lookup is in flight. `location` is set once geocoding succeeded.
    Loading {
        query: String,
        location: Option<ResolvedLocation>,
    },
    /// A city was submitted but nothing is loading and there is neither
    /// data nor an error.
    Empty { query: String },
    Error { query: String, message: String },
    Ready {
        query: String,
        location: ResolvedLocation,
        summary: WeatherSummary,
    },
}

impl DisplayState {
    /// The submitted city, if any.
    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Loading { query, .. }
            | Self::Empty { query }
            | Self::Error { query, .. }
            | Self::Ready { query, .. } => Some(query),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn summary(&self) -> Option<&WeatherSummary> {
        match self {
            Self::Ready { summary, .. } => Some(summary),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// State after a submission, from any state.
    pub fn on_submit(query: &PlaceQuery) -> Self {
        Self::Loading {
            query: query.to_string(),
            location: None,
        }
    }

    /// State after a pipeline event for the current query.
    ///
    /// Events only move a `Loading` state; anything else is returned as is.
    pub fn on_event(self, event: PipelineEvent) -> Self {
        let (query, location) = match self {
            Self::Loading { query, location } => (query, location),
            other => {
                tracing::debug!("Ignoring {:?} outside of loading", event);
                return other;
            }
        };

        match event {
            PipelineEvent::Resolved(resolved) => Self::Loading {
                query,
                location: Some(resolved),
            },
            PipelineEvent::Summarised(summary) => match location {
                Some(location) => Self::Ready {
                    query,
                    location,
                    summary,
                },
                // The pipeline always resolves before summarising
                None => Self::Empty { query },
            },
            PipelineEvent::Failed(e) => {
                tracing::warn!("Lookup for {:?} failed: {}", query, e);
                Self::Error {
                    query,
                    message: e.user_message().to_string(),
                }
            }
        }
    }

    /// State once the current query's pipeline has stopped.
    pub fn on_finished(self) -> Self {
        match self {
            Self::Loading { query, .. } => Self::Empty { query },
            other => other,
        }
    }
}
