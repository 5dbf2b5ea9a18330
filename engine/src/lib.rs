//! Application state for Lumen - no TUI dependencies.
//!
//! # Architecture
//!
//! [`App`] owns everything the dashboard shows: the host coordinate, the
//! category cursor, the latest [`Resolution`], and the event table read. The
//! TUI crate renders this state and feeds key presses back; the cli crate
//! drives the loop.
//!
//! One user interaction = one call to [`App::resolve_selected`]: a single
//! provider request, then (when a landmark was found) a single spoken
//! announcement. Provider failures keep their identity all the way to the
//! screen; "nothing nearby" is never presented as an error, and an error is
//! never presented as "nothing nearby".

use lumen_providers::ProviderError;
use lumen_providers::places::PlacesClient;
use lumen_types::{Coordinate, EventTable, Landmark, PlaceKind};

// Re-export the pieces the cli wires together.
pub use lumen_providers::geoip::IpLocator;
pub use lumen_providers::places;
pub use lumen_speech::{Announcer, CommandAnnouncer, NullAnnouncer};
pub use lumen_store::{EventStore, StoreError};
pub use lumen_types as types;

/// Outcome of the most recent landmark resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No resolution attempted yet.
    Idle,
    /// The provider answered; `landmark` is `None` for a well-formed empty
    /// result set.
    Resolved {
        kind: PlaceKind,
        landmark: Option<Landmark>,
    },
    /// The provider call failed. Distinct from an empty result set.
    Failed { kind: PlaceKind, message: String },
}

/// Which table the lower pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Events,
    Alerts,
}

impl Tab {
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Tab::Events => Tab::Alerts,
            Tab::Alerts => Tab::Events,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Tab::Events => "Events",
            Tab::Alerts => "Alerts",
        }
    }
}

/// The event table plus its precomputed alerts view.
#[derive(Debug, Clone)]
struct Events {
    all: EventTable,
    alerts: EventTable,
}

/// Dashboard state.
pub struct App {
    location: Coordinate,
    places: PlacesClient,
    announcer: Box<dyn Announcer>,
    events: Result<Events, StoreError>,
    selected: usize,
    resolution: Resolution,
    tab: Tab,
}

impl App {
    #[must_use]
    pub fn new(
        location: Coordinate,
        places: PlacesClient,
        events: Result<EventTable, StoreError>,
        announcer: Box<dyn Announcer>,
    ) -> Self {
        if let Err(e) = &events {
            tracing::warn!("Event store unavailable: {e}");
        }
        let events = events.map(|all| {
            let alerts = all.alerts();
            Events { all, alerts }
        });

        Self {
            location,
            places,
            announcer,
            events,
            selected: 0,
            resolution: Resolution::Idle,
            tab: Tab::default(),
        }
    }

    #[must_use]
    pub const fn location(&self) -> Coordinate {
        self.location
    }

    #[must_use]
    pub fn kinds(&self) -> &'static [PlaceKind] {
        PlaceKind::all()
    }

    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_kind(&self) -> PlaceKind {
        PlaceKind::all()[self.selected]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % PlaceKind::all().len();
    }

    pub fn select_previous(&mut self) {
        let len = PlaceKind::all().len();
        self.selected = (self.selected + len - 1) % len;
    }

    #[must_use]
    pub const fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    #[must_use]
    pub const fn active_tab(&self) -> Tab {
        self.tab
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.toggle();
    }

    /// All events, or the store failure to render in their place.
    pub fn events(&self) -> Result<&EventTable, &StoreError> {
        self.events.as_ref().map(|events| &events.all)
    }

    /// The filtered alerts view, or the store failure.
    pub fn alerts(&self) -> Result<&EventTable, &StoreError> {
        self.events.as_ref().map(|events| &events.alerts)
    }

    /// Resolve the currently selected category: one provider call, then one
    /// announcement when a landmark was found.
    ///
    /// Speech failures never fail the interaction; they are logged and the
    /// resolved landmark still renders.
    pub async fn resolve_selected(&mut self) {
        let kind = self.selected_kind();
        match self.places.nearest(self.location, kind).await {
            Ok(landmark) => {
                if let Some(found) = &landmark {
                    let line = announcement(kind, found);
                    if let Err(e) = self.announcer.announce(&line) {
                        tracing::warn!("Speech synthesis failed: {e}");
                    }
                }
                self.resolution = Resolution::Resolved { kind, landmark };
            }
            Err(e) => {
                tracing::warn!(kind = kind.as_str(), "Landmark resolution failed: {e}");
                self.resolution = Resolution::Failed {
                    kind,
                    message: user_facing_message(&e),
                };
            }
        }
    }
}

/// The spoken line for a found landmark.
#[must_use]
pub fn announcement(kind: PlaceKind, landmark: &Landmark) -> String {
    format!("The closest {} is: {}", kind.display_name(), landmark.name)
}

/// Collapse a provider error to one sidebar-sized line, keeping the failure
/// class visible.
fn user_facing_message(error: &ProviderError) -> String {
    match error {
        ProviderError::Transport { .. } => format!("Search unreachable: {error}"),
        ProviderError::Http { .. } | ProviderError::Service { .. } => {
            format!("Search failed: {error}")
        }
        ProviderError::Payload { .. } => format!("Search gave an unusable answer: {error}"),
        ProviderError::Credential { .. } => format!("Check your API key: {error}"),
        ProviderError::LocationUnavailable { .. } => error.to_string(),
    }
}
