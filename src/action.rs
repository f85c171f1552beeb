//! Actions with automatic category inference

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::FetchError;
use crate::nav::NavTarget;
use crate::state::{PokemonDetail, PokemonSummary};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== List screen =====
    /// Intent: load the first catalog page and enrich every entry
    ListFetch,

    /// Result: enriched list ready, input order preserved
    ListDidLoad(Vec<PokemonSummary>),

    /// Result: the listing or the whole enrichment failed
    ListDidError(FetchError),

    /// Move the list selection (by index)
    ListSelect(usize),

    // ===== Detail screen =====
    /// Navigate to the detail screen; `None` falls back to the default creature
    DetailOpen(Option<NavTarget>),

    /// Result: detail loaded, tagged with the identifier it was fetched for
    DetailDidLoad {
        target: String,
        detail: PokemonDetail,
    },

    /// Result: detail fetch failed, tagged like DetailDidLoad
    DetailDidError { target: String, error: FetchError },

    /// Return to the list, abandoning any in-flight detail fetch
    DetailClose,

    /// Show or hide the base-stats panel
    StatsToggle,

    // ===== Uncategorized (global) =====
    /// Periodic tick driving the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
