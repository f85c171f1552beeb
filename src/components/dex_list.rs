//! Dex list screen: every enriched catalog entry, one row each

use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::prelude::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps, SelectListStyle,
    SelectionStyle, StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{render_error, render_loading, Component, ACCENT_GOLD, ACCENT_TEAL, TEXT_DIM};
use crate::action::Action;
use crate::nav;
use crate::state::{AppState, FetchState};

/// Props for DexList - read-only view of state
pub struct DexListProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

pub struct DexList {
    list: SelectList,
}

impl DexList {
    pub fn new() -> Self {
        Self {
            list: SelectList::new(),
        }
    }

    fn render_entries(&mut self, frame: &mut Frame, area: Rect, state: &AppState, is_focused: bool) {
        let items = dex_items(state);
        let props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: state.selected_index.min(items.len().saturating_sub(1)),
            is_focused,
            style: dex_list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::ListSelect,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, area, props);
    }
}

impl Default for DexList {
    fn default() -> Self {
        Self::new()
    }
}

impl Component<Action> for DexList {
    type Props<'a> = DexListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Char('q') => return vec![Action::Quit],
                KeyCode::Char('r') => return vec![Action::ListFetch],
                KeyCode::Enter => {
                    return match props.state.selected_summary() {
                        Some(summary) => vec![Action::DetailOpen(Some(nav::select(summary)))],
                        None => Vec::new(),
                    };
                }
                _ => {}
            }
        }

        let items = dex_items(props.state);
        if items.is_empty() {
            return Vec::new();
        }
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.state.selected_index.min(items.len().saturating_sub(1)),
            is_focused: true,
            style: dex_list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::ListSelect,
            render_item: &|item| item.clone(),
        };
        self.list.handle_event(event, list_props).into_iter().collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // header
            Constraint::Min(1),   // entries
            Constraint::Length(1), // hints
        ])
        .split(area);

        render_title(frame, chunks[0], props.state);

        match &props.state.list {
            FetchState::Ready(_) => {
                self.render_entries(frame, chunks[1], props.state, props.is_focused)
            }
            FetchState::Loading => {
                render_loading(frame, chunks[1], props.state.tick, "Loading Pokedex...")
            }
            FetchState::Failed(error) => {
                render_error(frame, chunks[1], &error.to_string(), "r", "retry")
            }
            FetchState::Idle => render_fetch_hint(frame, chunks[1]),
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("j/k", "move"),
                    StatusBarHint::new("Enter", "open"),
                    StatusBarHint::new("r", "reload"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_title(frame: &mut Frame, area: Rect, state: &AppState) {
    let count = state.list.data().map(Vec::len).unwrap_or(0);
    let text = Line::from(vec![
        Span::styled(
            "KANTO",
            Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{count:>3}/{}", state.limit),
            Style::default().fg(ACCENT_GOLD),
        ),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("POKEDEX")
        .border_style(Style::default().fg(TEXT_DIM));
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_fetch_hint(frame: &mut Frame, area: Rect) {
    let hint = Line::from(vec![
        Span::styled("Press ", Style::default().fg(TEXT_DIM)),
        Span::styled(
            "r",
            Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" to load the Pokedex", Style::default().fg(TEXT_DIM)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(hint), area);
}

fn dex_items(state: &AppState) -> Vec<Line<'static>> {
    let Some(summaries) = state.list.data() else {
        return Vec::new();
    };
    summaries
        .iter()
        .map(|summary| {
            Line::from(format!(
                "#{:03} {:<12} {}",
                summary.id,
                summary.name,
                summary.types.join("/")
            ))
        })
        .collect()
}

fn dex_list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: None,
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .fg(ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}
