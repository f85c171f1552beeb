//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::api::FetchError;

/// First generation of the catalog.
pub const DEFAULT_LIMIT: u32 = 151;

/// Loading spinner timing.
pub const SPINNER_TICK_MS: u64 = 120;

/// One row of the first-page listing: name plus the canonical detail URL.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonRef {
    pub name: String,
    pub url: String,
}

/// Denormalized record rendered in the dex list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonSummary {
    pub id: u16,
    pub name: String,
    pub artwork_url: String,
    pub types: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonStat {
    pub name: String,
    pub value: u16,
}

/// Full record backing the detail screen.
///
/// Height and weight keep the source units (decimetres / hectograms);
/// metric display values are derived, not stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonDetail {
    pub id: u16,
    pub name: String,
    pub artwork_url: String,
    pub types: Vec<String>,
    pub height: u16,
    pub weight: u16,
    pub stats: Vec<PokemonStat>,
}

impl PokemonDetail {
    pub fn height_m(&self) -> f32 {
        self.height as f32 / 10.0
    }

    pub fn weight_kg(&self) -> f32 {
        self.weight as f32 / 10.0
    }
}

impl From<PokemonDetail> for PokemonSummary {
    fn from(detail: PokemonDetail) -> Self {
        Self {
            id: detail.id,
            name: detail.name,
            artwork_url: detail.artwork_url,
            types: detail.types,
        }
    }
}

/// Fetch lifecycle for one screen: Idle → Loading → Ready/Failed.
///
/// Ready and Failed are terminal for a cycle; only a new fetch/navigation
/// action restarts it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(FetchError),
}

impl<T> FetchState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, FetchState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, FetchState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchState::Failed(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Screen {
    List,
    Detail,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    pub limit: u32,
    pub screen: Screen,
    pub list: FetchState<Vec<PokemonSummary>>,
    pub selected_index: usize,
    /// Identifier of the detail fetch currently in flight or displayed.
    /// Completions carrying any other identifier are stale and dropped.
    pub detail_target: Option<String>,
    pub detail: FetchState<PokemonDetail>,
    pub stats_visible: bool,
    pub tick: u64,
}

impl AppState {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            screen: Screen::List,
            list: FetchState::Idle,
            selected_index: 0,
            detail_target: None,
            detail: FetchState::Idle,
            stats_visible: false,
            tick: 0,
        }
    }

    pub fn selected_summary(&self) -> Option<&PokemonSummary> {
        self.list.data()?.get(self.selected_index)
    }

    pub fn is_busy(&self) -> bool {
        self.list.is_loading() || self.detail.is_loading()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Catalog")
                .entry("limit", ron_string(&self.limit))
                .entry("entries", ron_string(&self.list.data().map(Vec::len)))
                .entry("selected", ron_string(&self.selected_index)),
            DebugSection::new("Screens")
                .entry("screen", ron_string(&self.screen))
                .entry("list_loading", ron_string(&self.list.is_loading()))
                .entry("detail_target", ron_string(&self.detail_target))
                .entry("detail_loading", ron_string(&self.detail.is_loading()))
                .entry("stats_visible", ron_string(&self.stats_visible)),
        ]
    }
}
