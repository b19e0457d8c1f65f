//! TUI views and rendering
//!
//! All rendering logic is contained here. Views draw from SessionState but
//! never modify it.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tracing::trace;

use crate::session::{SessionState, TargetModel};

/// UI colors
mod colors {
    use ratatui::style::Color;

    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const SELECTED: Color = Color::Rgb(0, 255, 127); // Spring green
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const FEEDBACK: Color = Color::Rgb(255, 215, 0); // Gold
    pub const DIM: Color = Color::DarkGray;
}

/// Main render function
pub fn render(state: &SessionState, frame: &mut Frame) {
    trace!("render: called");
    let show_output = state.is_in_flight() || state.result_text().is_some();
    let show_error = state.last_error().is_some();

    let mut constraints = vec![
        Constraint::Length(3), // Header
        Constraint::Length(3), // Target selector
        Constraint::Min(6),    // Input
    ];
    if show_output {
        constraints.push(Constraint::Min(8)); // Output
    }
    if show_error {
        constraints.push(Constraint::Length(3)); // Error
    }
    constraints.push(Constraint::Length(3)); // Footer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    let mut idx = 0;
    render_header(frame, chunks[idx]);
    idx += 1;
    render_target_selector(state, frame, chunks[idx]);
    idx += 1;
    render_input(state, frame, chunks[idx]);
    idx += 1;
    if show_output {
        render_output(state, frame, chunks[idx]);
        idx += 1;
    }
    if show_error {
        render_error(state, frame, chunks[idx]);
        idx += 1;
    }
    render_footer(state, frame, chunks[idx]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " Prompt Engineer ",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "- transform simple ideas into powerful, effective prompts",
            Style::default().fg(colors::DIM),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_target_selector(state: &SessionState, frame: &mut Frame, area: Rect) {
    let option = |tag: TargetModel| -> Vec<Span<'static>> {
        let selected = state.target() == tag;
        let marker = if selected { "(•) " } else { "( ) " };
        let style = if state.is_in_flight() {
            Style::default().fg(colors::DIM)
        } else if selected {
            Style::default().fg(colors::SELECTED).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        vec![
            Span::styled(marker, style),
            Span::styled(tag.display_name(), style),
            Span::raw("   "),
        ]
    };

    let mut spans = vec![Span::raw(" ")];
    spans.extend(option(TargetModel::Gemini));
    spans.extend(option(TargetModel::ChatGpt));

    let selector = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL).title(" Target AI "));
    frame.render_widget(selector, area);
}

fn render_input(state: &SessionState, frame: &mut Frame, area: Rect) {
    let style = if state.is_in_flight() {
        Style::default().fg(colors::DIM)
    } else {
        Style::default()
    };

    let text = if state.raw_input.is_empty() && !state.is_in_flight() {
        Paragraph::new("Describe what you want the AI to do in simple terms... e.g., 'a story about a robot who discovers music'")
            .style(Style::default().fg(colors::DIM))
    } else {
        Paragraph::new(state.raw_input.as_str()).style(style)
    };

    frame.render_widget(
        text.wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Your idea ")),
        area,
    );
}

fn render_output(state: &SessionState, frame: &mut Frame, area: Rect) {
    let content = if state.is_in_flight() {
        Paragraph::new("Generating...").style(Style::default().fg(colors::DIM))
    } else {
        Paragraph::new(state.result_text().unwrap_or_default())
    };

    frame.render_widget(
        content
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Engineered Prompt ")),
        area,
    );
}

fn render_error(state: &SessionState, frame: &mut Frame, area: Rect) {
    let error = Paragraph::new(format!("Error: {}", state.last_error().unwrap_or_default()))
        .style(Style::default().fg(colors::ERROR))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::ERROR)),
        );
    frame.render_widget(error, area);
}

fn render_footer(state: &SessionState, frame: &mut Frame, area: Rect) {
    let keybind = Style::default().fg(colors::KEYBIND);
    let dim = Style::default().fg(colors::DIM);

    let trigger = if state.is_in_flight() {
        Span::styled("Engineering...", dim)
    } else {
        Span::styled("Engineer Prompt", Style::default())
    };

    let mut spans = vec![
        Span::raw(" "),
        Span::styled("Enter", keybind),
        Span::raw(" "),
        trigger,
        Span::styled("  Alt+Enter", keybind),
        Span::raw(" newline"),
        Span::styled("  Tab", keybind),
        Span::raw(" target"),
    ];

    if state.result_text().is_some() {
        spans.push(Span::styled("  Ctrl+Y", keybind));
        spans.push(Span::raw(" copy"));
        if let Some(label) = state.copy_feedback().label() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                label,
                Style::default().fg(colors::FEEDBACK).add_modifier(Modifier::BOLD),
            ));
        }
    }

    spans.push(Span::styled("  Esc", keybind));
    spans.push(Span::raw(" quit"));

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
