//! Team-selection store: the team list cached once per session, plus the
//! user's selected abbreviations persisted through an injected storage port.

use std::sync::{Arc, Mutex};

use tracing::{error, warn};

use crate::model::team::{Team, TeamsPayload};

/// Persistence port for the selected-team list. Implementations hold one
/// opaque JSON string.
pub trait SelectionStorage {
    fn read(&self) -> Result<Option<String>, String>;
    fn write(&self, payload: &str) -> Result<(), String>;
}

/// In-process storage cell. Cloning shares the underlying slot, so a fresh
/// store built from a clone sees earlier writes.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl SelectionStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, String> {
        Ok(self.slot.lock().map_err(|e| e.to_string())?.clone())
    }

    fn write(&self, payload: &str) -> Result<(), String> {
        *self.slot.lock().map_err(|e| e.to_string())? = Some(payload.to_string());
        Ok(())
    }
}

/// Source of the team list the store caches.
pub trait TeamsSource {
    fn fetch_teams(&self) -> Result<Vec<Team>, String>;
}

/// `TeamsSource` backed by this service's own `/api/getTeams` endpoint.
#[derive(Debug, Clone)]
pub struct TeamsClient {
    base_url: String,
}

impl TeamsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }
}

impl TeamsSource for TeamsClient {
    fn fetch_teams(&self) -> Result<Vec<Team>, String> {
        let url = format!("{}/api/getTeams", self.base_url);
        match ureq::get(&url).call() {
            Ok(response) => {
                let mut body_reader = response.into_body();
                match body_reader.read_json::<TeamsPayload>() {
                    Ok(payload) => Ok(payload.teams_list),
                    Err(e) => {
                        error!(error = %e, "Invalid teams data format");
                        Err(format!("Invalid teams data format: {}", e))
                    }
                }
            }
            Err(ureq::Error::StatusCode(code)) => {
                error!(status = code, "Failed to fetch teams");
                Err(format!("Failed to fetch teams: {}", code))
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch teams");
                Err(format!("Failed to fetch teams: {}", e))
            }
        }
    }
}

/// One observable view of the store's state.
#[derive(Debug, Clone, Default)]
pub struct SelectionSnapshot {
    pub teams_list: Vec<Team>,
    pub selected_teams: Vec<String>,
    pub is_loading: bool,
    pub error: Option<String>,
}

type Listener = Box<dyn Fn(&SelectionSnapshot) + Send>;

/// Team-selection state. The team list is fetched once per session via
/// [`SelectionStore::load`]; the selection survives across store instances
/// through the storage port.
pub struct SelectionStore<S: SelectionStorage> {
    storage: S,
    snapshot: SelectionSnapshot,
    listeners: Vec<Listener>,
}

impl<S: SelectionStorage> SelectionStore<S> {
    /// Build a store seeded from persisted state. Unreadable or corrupt
    /// storage yields an empty selection, never an error.
    pub fn new(storage: S) -> Self {
        let selected_teams = match storage.read() {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(teams) => teams,
                Err(e) => {
                    warn!(error = %e, "Ignoring corrupt stored team selection");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Stored team selection unavailable");
                Vec::new()
            }
        };
        Self {
            storage,
            snapshot: SelectionSnapshot {
                selected_teams,
                ..SelectionSnapshot::default()
            },
            listeners: Vec::new(),
        }
    }

    /// Fetch and cache the team list, sorted by name. On failure the list
    /// stays empty and `error` carries the message.
    pub fn load(&mut self, source: &dyn TeamsSource) {
        self.snapshot.is_loading = true;
        self.snapshot.error = None;
        self.notify();

        match source.fetch_teams() {
            Ok(mut teams) => {
                teams.sort_by(|a, b| a.name.cmp(&b.name));
                self.snapshot.teams_list = teams;
            }
            Err(e) => {
                error!(error = %e, "Error fetching teams");
                self.snapshot.error = Some(e);
            }
        }
        self.snapshot.is_loading = false;
        self.notify();
    }

    /// Append the abbreviation to the selection, or remove its first
    /// occurrence if already present. Empty input is ignored.
    pub fn toggle(&mut self, abbreviation: &str) {
        if abbreviation.is_empty() {
            return;
        }
        let selected = &mut self.snapshot.selected_teams;
        match selected.iter().position(|a| a == abbreviation) {
            Some(index) => {
                selected.remove(index);
            }
            None => selected.push(abbreviation.to_string()),
        }
        self.persist();
        self.notify();
    }

    pub fn subscribe(&mut self, listener: impl Fn(&SelectionSnapshot) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn snapshot(&self) -> &SelectionSnapshot {
        &self.snapshot
    }

    pub fn has_teams(&self) -> bool {
        !self.snapshot.teams_list.is_empty()
    }

    /// Selected abbreviations mapped back to ids, in team-list order.
    pub fn team_ids(&self) -> Vec<i64> {
        self.snapshot
            .teams_list
            .iter()
            .filter(|t| self.snapshot.selected_teams.contains(&t.abbreviation))
            .map(|t| t.id)
            .collect()
    }

    /// Best-effort write-through of the current selection.
    fn persist(&self) {
        match serde_json::to_string(&self.snapshot.selected_teams) {
            Ok(raw) => {
                if let Err(e) = self.storage.write(&raw) {
                    warn!(error = %e, "Error storing team selection");
                }
            }
            Err(e) => warn!(error = %e, "Error serializing team selection"),
        }
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(&self.snapshot);
        }
    }
}
