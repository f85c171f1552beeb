//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::nav;
use crate::state::{AppState, FetchState, Screen};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== List screen =====
        Action::ListFetch => {
            state.list = FetchState::Loading;
            state.tick = 0;
            DispatchResult::changed_with(Effect::FetchList { limit: state.limit })
        }

        Action::ListDidLoad(summaries) => {
            state.selected_index = state.selected_index.min(summaries.len().saturating_sub(1));
            state.list = FetchState::Ready(summaries);
            DispatchResult::changed()
        }

        Action::ListDidError(error) => {
            state.list = FetchState::Failed(error);
            DispatchResult::changed()
        }

        Action::ListSelect(index) => {
            let count = state.list.data().map(Vec::len).unwrap_or(0);
            if index < count && index != state.selected_index {
                state.selected_index = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Detail screen =====
        Action::DetailOpen(target) => {
            let ident = nav::resolve_target(target.as_ref());
            state.screen = Screen::Detail;
            state.detail = FetchState::Loading;
            state.detail_target = Some(ident.clone());
            state.stats_visible = false;
            state.tick = 0;
            DispatchResult::changed_with(Effect::FetchDetail { target: ident })
        }

        Action::DetailDidLoad { target, detail } => {
            // A completion from a previous cycle must never touch the
            // current cycle's state.
            if state.detail_target.as_deref() != Some(target.as_str()) {
                return DispatchResult::unchanged();
            }
            state.detail = FetchState::Ready(detail);
            DispatchResult::changed()
        }

        Action::DetailDidError { target, error } => {
            if state.detail_target.as_deref() != Some(target.as_str()) {
                return DispatchResult::unchanged();
            }
            state.detail = FetchState::Failed(error);
            DispatchResult::changed()
        }

        Action::DetailClose => {
            if state.screen != Screen::Detail {
                return DispatchResult::unchanged();
            }
            state.screen = Screen::List;
            state.detail = FetchState::Idle;
            state.detail_target = None;
            state.stats_visible = false;
            DispatchResult::changed_with(Effect::AbandonDetail)
        }

        Action::StatsToggle => {
            if state.screen == Screen::Detail && state.detail.is_ready() {
                state.stats_visible = !state.stats_visible;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Global =====
        Action::Tick => {
            if state.is_busy() {
                state.tick = state.tick.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FetchError;
    use crate::nav::NavTarget;
    use crate::state::{PokemonDetail, PokemonStat, PokemonSummary};

    fn summary(id: u16, name: &str) -> PokemonSummary {
        PokemonSummary {
            id,
            name: name.to_string(),
            artwork_url: format!("https://img.test/{id}.png"),
            types: vec!["normal".to_string()],
        }
    }

    fn detail(id: u16, name: &str) -> PokemonDetail {
        PokemonDetail {
            id,
            name: name.to_string(),
            artwork_url: format!("https://img.test/{id}.png"),
            types: vec!["water".to_string()],
            height: 8,
            weight: 196,
            stats: vec![PokemonStat {
                name: "hp".to_string(),
                value: 50,
            }],
        }
    }

    #[test]
    fn test_list_fetch_sets_loading() {
        let mut state = AppState::default();
        assert!(state.list.is_idle());

        let result = reducer(&mut state, Action::ListFetch);

        assert!(result.changed);
        assert!(state.list.is_loading());
        assert_eq!(result.effects.len(), 1);
        assert!(matches!(result.effects[0], Effect::FetchList { limit: 151 }));
    }

    #[test]
    fn test_list_load_clamps_selection() {
        let mut state = AppState {
            selected_index: 10,
            ..Default::default()
        };

        reducer(&mut state, Action::ListFetch);
        let result = reducer(
            &mut state,
            Action::ListDidLoad(vec![summary(1, "bulbasaur"), summary(2, "ivysaur")]),
        );

        assert!(result.changed);
        assert!(state.list.is_ready());
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn test_list_error_is_terminal_until_refetch() {
        let mut state = AppState::default();
        reducer(&mut state, Action::ListFetch);
        reducer(
            &mut state,
            Action::ListDidError(FetchError::Network("offline".into())),
        );
        assert!(state.list.is_failed());

        // No automatic retry; only a fresh fetch re-arms the cycle.
        let result = reducer(&mut state, Action::ListFetch);
        assert!(state.list.is_loading());
        assert_eq!(result.effects.len(), 1);
    }

    #[test]
    fn test_list_select_is_bounds_checked() {
        let mut state = AppState::default();
        state.list = FetchState::Ready(vec![summary(1, "bulbasaur"), summary(2, "ivysaur")]);

        assert!(reducer(&mut state, Action::ListSelect(1)).changed);
        assert_eq!(state.selected_index, 1);

        assert!(!reducer(&mut state, Action::ListSelect(5)).changed);
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn test_detail_open_starts_new_cycle() {
        let mut state = AppState::default();
        state.stats_visible = true;

        let result = reducer(&mut state, Action::DetailOpen(Some(NavTarget { id: 54 })));

        assert!(result.changed);
        assert_eq!(state.screen, Screen::Detail);
        assert!(state.detail.is_loading());
        assert_eq!(state.detail_target.as_deref(), Some("54"));
        assert!(!state.stats_visible, "new cycle resets the stats panel");
        assert!(
            matches!(&result.effects[0], Effect::FetchDetail { target } if target == "54")
        );
    }

    #[test]
    fn test_detail_open_without_target_uses_default() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::DetailOpen(None));

        assert_eq!(state.detail_target.as_deref(), Some("psyduck"));
        assert!(
            matches!(&result.effects[0], Effect::FetchDetail { target } if target == "psyduck")
        );
    }

    #[test]
    fn test_detail_load_applies_to_matching_cycle() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DetailOpen(Some(NavTarget { id: 54 })));

        let result = reducer(
            &mut state,
            Action::DetailDidLoad {
                target: "54".into(),
                detail: detail(54, "psyduck"),
            },
        );

        assert!(result.changed);
        assert_eq!(state.detail.data().map(|d| d.id), Some(54));
    }

    #[test]
    fn test_stale_detail_result_is_discarded() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DetailOpen(Some(NavTarget { id: 25 })));
        reducer(&mut state, Action::DetailOpen(Some(NavTarget { id: 54 })));

        // The slow completion for the first target arrives last.
        let result = reducer(
            &mut state,
            Action::DetailDidLoad {
                target: "25".into(),
                detail: detail(25, "pikachu"),
            },
        );

        assert!(!result.changed);
        assert!(state.detail.is_loading());
        assert_eq!(state.detail_target.as_deref(), Some("54"));
    }

    #[test]
    fn test_stale_detail_error_is_discarded() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DetailOpen(Some(NavTarget { id: 54 })));
        reducer(&mut state, Action::DetailClose);

        let result = reducer(
            &mut state,
            Action::DetailDidError {
                target: "54".into(),
                error: FetchError::Network("late".into()),
            },
        );

        assert!(!result.changed);
        assert!(state.detail.is_idle());
    }

    #[test]
    fn test_stats_toggle_pair_is_identity() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DetailOpen(Some(NavTarget { id: 54 })));
        reducer(
            &mut state,
            Action::DetailDidLoad {
                target: "54".into(),
                detail: detail(54, "psyduck"),
            },
        );

        reducer(&mut state, Action::StatsToggle);
        assert!(state.stats_visible);
        reducer(&mut state, Action::StatsToggle);
        assert!(!state.stats_visible);
    }

    #[test]
    fn test_stats_toggle_inert_unless_detail_ready() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::StatsToggle).changed);

        reducer(&mut state, Action::DetailOpen(Some(NavTarget { id: 9999 })));
        assert!(!reducer(&mut state, Action::StatsToggle).changed);

        reducer(
            &mut state,
            Action::DetailDidError {
                target: "9999".into(),
                error: FetchError::NotFound("9999".into()),
            },
        );
        assert!(state.detail.is_failed());
        assert!(!reducer(&mut state, Action::StatsToggle).changed);
        assert!(!state.stats_visible);
    }

    #[test]
    fn test_detail_close_abandons_cycle() {
        let mut state = AppState::default();
        reducer(&mut state, Action::DetailOpen(Some(NavTarget { id: 54 })));

        let result = reducer(&mut state, Action::DetailClose);

        assert!(result.changed);
        assert_eq!(state.screen, Screen::List);
        assert!(state.detail.is_idle());
        assert_eq!(state.detail_target, None);
        assert!(matches!(result.effects[0], Effect::AbandonDetail));

        // Closing again is a no-op.
        assert!(!reducer(&mut state, Action::DetailClose).changed);
    }

    #[test]
    fn test_tick_advances_only_while_busy() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick, 0);

        reducer(&mut state, Action::ListFetch);
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick, 1);
    }
}
