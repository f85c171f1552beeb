pub mod detail_view;
pub mod dex_list;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use detail_view::{DetailView, DetailViewProps};
pub use dex_list::{DexList, DexListProps};

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

pub(crate) const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub(crate) const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
pub(crate) const TEXT_DIM: Color = Color::Rgb(176, 195, 207);

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

pub(crate) fn spinner_char(tick: u64) -> char {
    SPINNER[(tick as usize) % SPINNER.len()]
}

pub(crate) fn render_loading(frame: &mut Frame, area: Rect, tick: u64, message: &str) {
    let line = Line::from(vec![Span::styled(
        format!("{} {message}", spinner_char(tick)),
        Style::default().fg(Color::DarkGray),
    )])
    .centered();
    let chunks = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);
    frame.render_widget(Paragraph::new(line), chunks[0]);
}

/// Static error panel shown while a screen is in its failed state.
pub(crate) fn render_error(
    frame: &mut Frame,
    area: Rect,
    error: &str,
    hint_key: &str,
    hint_label: &str,
) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // icon
        Constraint::Length(1), // "Error"
        Constraint::Length(1), // message
        Constraint::Length(1), // blank
        Constraint::Length(1), // hint
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(Paragraph::new(Line::from(ERROR_ICON).centered()), chunks[0]);
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                "Error",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )])
            .centered(),
        ),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                error.to_string(),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            )])
            .centered(),
        ),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    hint_key.to_string(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" to {hint_label}"),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
            .centered(),
        ),
        chunks[4],
    );
}
