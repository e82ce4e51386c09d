use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::session::Phase;
use crate::text::CharacterCell;
use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Typing => render_typing(self, area, buf),
            AppState::Results => render_results(self, area, buf),
        }
        render_banner(self, area, buf);
    }
}

/// Urgency ramp for the countdown, brightest early, red at the end.
fn countdown_color(secs: u64) -> Color {
    match secs {
        s if s > 40 => Color::LightYellow,
        s if s > 30 => Color::Yellow,
        s if s > 10 => Color::LightRed,
        _ => Color::Red,
    }
}

fn cell_span(cell: &CharacterCell, at_cursor: bool) -> Span<'static> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let style = if cell.incorrect {
        bold.fg(Color::Red)
    } else if cell.correct {
        bold.fg(Color::Green)
    } else if at_cursor {
        bold.add_modifier(Modifier::DIM | Modifier::UNDERLINED)
    } else {
        bold.add_modifier(Modifier::DIM)
    };
    // Make a missed space visible.
    let shown = if cell.incorrect && cell.letter == ' ' {
        "·".to_owned()
    } else {
        cell.letter.to_string()
    };
    Span::styled(shown, style)
}

fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Length(area.height.saturating_sub(6) / 2),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);

    let countdown = Paragraph::new(Span::styled(
        session.seconds_remaining.to_string(),
        Style::default()
            .fg(countdown_color(session.seconds_remaining))
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    countdown.render(chunks[1], buf);

    let spans: Vec<Span> = session
        .text()
        .cells()
        .iter()
        .enumerate()
        .map(|(idx, cell)| cell_span(cell, idx == session.input_cursor))
        .collect();

    // One horizontal strip, shifted left as correct input accumulates so the
    // cursor stays in view.
    let stream: String = session.text().cells().iter().map(|c| c.letter).collect();
    let visible = chunks[2].width.saturating_sub(1);
    let max_scroll = (stream.width() as u16).saturating_sub(visible);
    let scroll = session
        .scroll_offset
        .saturating_sub(visible / 2)
        .min(max_scroll);
    Paragraph::new(Line::from(spans))
        .scroll((0, scroll))
        .render(chunks[2], buf);

    let hint = match session.phase() {
        Phase::Idle => "start typing...",
        _ => "",
    };
    Paragraph::new(Span::styled(
        hint,
        Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let result = app.session.result().unwrap_or_default();

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} wpm", result.speed),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{}% accuracy", result.accuracy),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];

    if app.is_new_high_score && !app.score_saved {
        lines.push(Line::from(Span::styled(
            "new high score!",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("name: {}_", app.name_input)));
        lines.push(Line::from(Span::styled(
            "(enter)save",
            Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
        )));
    } else if app.score_saved {
        lines.push(Line::from(Span::styled(
            "high score saved",
            Style::default().fg(Color::Magenta),
        )));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "(r)etry / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
    )));

    let dialog = centered_rect(50, 60, area);
    Clear.render(dialog, buf);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL))
        .render(dialog, buf);
}

fn render_banner(app: &App, area: Rect, buf: &mut Buffer) {
    if let Some(content) = app.banner.current() {
        let line = Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(1),
            width: area.width,
            height: 1,
        };
        Paragraph::new(Span::styled(
            content,
            Style::default().fg(Color::Magenta).add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Right)
        .render(line, buf);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(vertical[1])[1]
}
