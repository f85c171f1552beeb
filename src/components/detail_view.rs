//! Detail screen: one creature's profile with a toggled stats panel

use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::prelude::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{render_error, render_loading, Component, ACCENT_GOLD, ACCENT_TEAL, TEXT_DIM};
use crate::action::Action;
use crate::state::{AppState, FetchState, PokemonDetail, PokemonStat};

/// Props for DetailView - read-only view of state
pub struct DetailViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct DetailView;

impl Component<Action> for DetailView {
    type Props<'a> = DetailViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('s') => Some(Action::StatsToggle),
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                    Some(Action::DetailClose)
                }
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Min(1),    // profile
            Constraint::Length(1), // hints
        ])
        .split(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("DATA")
            .border_style(Style::default().fg(TEXT_DIM));
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        match &props.state.detail {
            FetchState::Ready(detail) => {
                render_profile(frame, inner, detail, props.state.stats_visible)
            }
            FetchState::Loading => {
                let target = props.state.detail_target.as_deref().unwrap_or("pokemon");
                render_loading(
                    frame,
                    inner,
                    props.state.tick,
                    &format!("Loading {target}..."),
                );
            }
            FetchState::Failed(error) => {
                render_error(frame, inner, &error.to_string(), "Esc", "go back")
            }
            FetchState::Idle => {}
        }

        let stats_hint = if props.state.stats_visible {
            "hide stats"
        } else {
            "show stats"
        };
        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[1],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("s", stats_hint),
                    StatusBarHint::new("Esc", "back"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_profile(frame: &mut Frame, area: Rect, detail: &PokemonDetail, stats_visible: bool) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                detail.name.to_uppercase(),
                Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(format!("No.{:03}", detail.id), Style::default().fg(ACCENT_GOLD)),
        ]),
        Line::default(),
        Line::from(format!("Type:   {}", detail.types.join(", "))),
        Line::from(format!("Height: {:.1} m", detail.height_m())),
        Line::from(format!("Weight: {:.1} kg", detail.weight_kg())),
        Line::default(),
        Line::from(Span::styled(
            format!("Artwork: {}", detail.artwork_url),
            Style::default().fg(Color::DarkGray),
        )),
        Line::default(),
    ];

    if stats_visible {
        lines.push(Line::from(Span::styled(
            "BASE STATS",
            Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
        )));
        for stat in &detail.stats {
            lines.push(Line::from(stat_line(stat)));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "Press s to show base stats",
            Style::default().fg(TEXT_DIM),
        )));
    }

    frame.render_widget(
        Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true }),
        area,
    );
}

fn stat_line(stat: &PokemonStat) -> String {
    let label = shorten_stat(&stat.name);
    let bar_len = (stat.value as usize / 10).min(20).max(1);
    let bar = "#".repeat(bar_len);
    format!("{label:>4} {value:>3} {bar}", value = stat.value)
}

fn shorten_stat(name: &str) -> String {
    match name {
        "hp" => " HP".to_string(),
        "attack" => "ATK".to_string(),
        "defense" => "DEF".to_string(),
        "special-attack" => "SAT".to_string(),
        "special-defense" => "SDF".to_string(),
        "speed" => "SPD".to_string(),
        _ => name.to_ascii_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FetchError;
    use crate::state::Screen;
    use tui_dispatch::testing::*;

    fn detail() -> PokemonDetail {
        PokemonDetail {
            id: 54,
            name: "psyduck".into(),
            artwork_url: "https://img.test/54.png".into(),
            types: vec!["water".into()],
            height: 8,
            weight: 196,
            stats: vec![
                PokemonStat {
                    name: "hp".into(),
                    value: 50,
                },
                PokemonStat {
                    name: "attack".into(),
                    value: 52,
                },
            ],
        }
    }

    fn ready_state() -> AppState {
        let mut state = AppState::default();
        state.screen = Screen::Detail;
        state.detail_target = Some("54".into());
        state.detail = FetchState::Ready(detail());
        state
    }

    #[test]
    fn test_stats_key_toggles() {
        let mut component = DetailView;
        let state = ready_state();

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(key("s")),
                DetailViewProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();

        actions.assert_count(1);
        actions.assert_first(Action::StatsToggle);
    }

    #[test]
    fn test_escape_closes_detail() {
        let mut component = DetailView;
        let state = ready_state();

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(crossterm::event::KeyEvent::new(
                    KeyCode::Esc,
                    crossterm::event::KeyModifiers::empty(),
                )),
                DetailViewProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();

        actions.assert_first(Action::DetailClose);
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut component = DetailView;
        let state = ready_state();

        let actions: Vec<_> = component
            .handle_event(
                &EventKind::Key(key("s")),
                DetailViewProps {
                    state: &state,
                    is_focused: false,
                },
            )
            .into_iter()
            .collect();

        actions.assert_empty();
    }

    #[test]
    fn test_render_profile_uses_metric_conversions() {
        let mut render = RenderHarness::new(70, 24);
        let mut component = DetailView;
        let state = ready_state();

        let output = render.render_to_string_plain(|frame| {
            component.render(
                frame,
                frame.area(),
                DetailViewProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains("PSYDUCK"));
        assert!(output.contains("0.8 m"));
        assert!(output.contains("19.6 kg"));
        assert!(!output.contains("ATK"), "stats start hidden");
    }

    #[test]
    fn test_render_stats_panel_behind_toggle() {
        let mut render = RenderHarness::new(70, 24);
        let mut component = DetailView;
        let mut state = ready_state();
        state.stats_visible = true;

        let output = render.render_to_string_plain(|frame| {
            component.render(
                frame,
                frame.area(),
                DetailViewProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains("BASE STATS"));
        assert!(output.contains("HP"));
        assert!(output.contains("ATK"));
        assert!(output.contains("52"));
    }

    #[test]
    fn test_render_failed_shows_static_error() {
        let mut render = RenderHarness::new(70, 24);
        let mut component = DetailView;
        let mut state = AppState::default();
        state.screen = Screen::Detail;
        state.detail_target = Some("9999".into());
        state.detail = FetchState::Failed(FetchError::NotFound("9999".into()));

        let output = render.render_to_string_plain(|frame| {
            component.render(
                frame,
                frame.area(),
                DetailViewProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains("Error"));
        assert!(output.contains("not found: 9999"));
    }
}
