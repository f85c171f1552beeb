//! Navigation bridge between the dex list and the detail screen

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::PokemonSummary;

/// Shown when the detail screen is opened without a target.
pub const DEFAULT_POKEMON: &str = "psyduck";

/// Navigation intent produced by selecting a list row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NavTarget {
    pub id: u16,
}

impl NavTarget {
    /// Parse the string-encoded `id` route parameter.
    /// Anything that is not a positive integer reads as absent.
    pub fn from_param(param: &str) -> Option<Self> {
        param
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|id| *id > 0)
            .map(|id| Self { id })
    }

    pub fn param(&self) -> String {
        self.id.to_string()
    }
}

/// Map a selected list row to a navigation intent.
pub fn select(summary: &PokemonSummary) -> NavTarget {
    NavTarget { id: summary.id }
}

/// The identifier handed to the detail fetch.
pub fn resolve_target(target: Option<&NavTarget>) -> String {
    match target {
        Some(target) => target.id.to_string(),
        None => DEFAULT_POKEMON.to_string(),
    }
}
