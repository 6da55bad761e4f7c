//! TUI rendering functions.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use session_journal::LogStatus;

use super::app::{App, FormField, View};

/// Draw the TUI.
pub fn draw(frame: &mut Frame, app: &App) {
    match app.view {
        View::Transform => draw_transform_view(frame, app),
        View::Inspector => draw_inspector_view(frame, app),
    }
}

// ---------------------------------------------------------------------------
// Transform view
// ---------------------------------------------------------------------------

fn draw_transform_view(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(3), // Input buffer
            Constraint::Min(5),    // Log panel
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_title(frame, chunks[0], "Payload Transform Simulator");
    draw_input_buffer(frame, app, chunks[1]);
    draw_transform_log(frame, app, chunks[2]);
    draw_footer(frame, chunks[3], app.view);
}

fn draw_input_buffer(frame: &mut Frame, app: &App, area: Rect) {
    let style = if app.playing {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let paragraph = Paragraph::new(Span::styled(app.transform.buffer(), style)).block(
        Block::default()
            .title(" Payload ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

fn draw_transform_log(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .transform
        .journal()
        .iter()
        .take(area.height as usize)
        .map(|entry| {
            let color = status_color(entry.status);
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", entry.timestamp.format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled("» ", Style::default().fg(color)),
                Span::styled(entry.message.as_str(), Style::default().fg(color)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Session Log ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Inspector view
// ---------------------------------------------------------------------------

fn draw_inspector_view(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(5), // Request form
            Constraint::Length(1), // Counters
            Constraint::Min(5),    // Audit table
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_title(frame, chunks[0], "Mock Traffic Inspector");
    draw_request_form(frame, app, chunks[1]);
    draw_counters(frame, app, chunks[2]);
    draw_audit_table(frame, app, chunks[3]);
    draw_footer(frame, chunks[4], app.view);
}

fn draw_request_form(frame: &mut Frame, app: &App, area: Rect) {
    let field_line = |label: &'static str, value: &str, field: FormField| {
        let focused = app.focus == field;
        let marker = if focused { "> " } else { "  " };
        let value_style = if focused {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(format!("{label:<8}"), Style::default().fg(Color::DarkGray)),
            Span::styled(value.to_string(), value_style),
        ])
    };

    let lines = vec![
        field_line("Method", &app.method_input, FormField::Method),
        field_line("Path", &app.path_input, FormField::Path),
        field_line("Payload", &app.payload_input, FormField::Payload),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Simulated Request ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

fn draw_counters(frame: &mut Frame, app: &App, area: Rect) {
    let counters = app.inspector.counters();
    let text = Line::from(vec![
        Span::styled("Total ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            counters.total_requests.to_string(),
            Style::default().fg(Color::White),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled("Blocked ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            counters.blocked_requests.to_string(),
            Style::default().fg(Color::Red),
        ),
    ]);
    frame.render_widget(Paragraph::new(text), area);
}

fn draw_audit_table(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec!["Time", "Method", "Target", "Verdict", "Reason"])
        .style(Style::default().fg(Color::DarkGray))
        .bottom_margin(0);

    let rows: Vec<Row> = app
        .inspector
        .journal()
        .iter()
        .filter_map(|entry| entry.request.as_ref().map(|req| (entry, req)))
        .take(area.height as usize)
        .map(|(entry, req)| {
            let (badge, badge_style) = if req.allowed {
                ("ALLOWED", Style::default().fg(Color::Green))
            } else {
                ("BLOCKED", Style::default().fg(Color::Red))
            };
            Row::new(vec![
                Cell::from(entry.timestamp.format("%H:%M:%S").to_string()),
                Cell::from(req.method.clone()).style(method_style(&req.method)),
                Cell::from(req.target.clone()),
                Cell::from(badge).style(badge_style),
                Cell::from(req.reason.clone().unwrap_or_else(|| "-".to_string())),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(9),
            Constraint::Length(7),
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(" Audit Log ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(table, area);
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

fn draw_title(frame: &mut Frame, area: Rect, title: &'static str) {
    let line = Line::from(vec![
        Span::styled(
            " SENTINEL LAB ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(Color::DarkGray)),
        Span::styled(title, Style::default().fg(Color::White)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_footer(frame: &mut Frame, area: Rect, view: View) {
    let hint = |key: &'static str, action: &'static str| {
        [
            Span::styled(key, Style::default().fg(Color::Cyan)),
            Span::styled(format!(" {action}  "), Style::default().fg(Color::DarkGray)),
        ]
    };

    let mut spans: Vec<Span> = Vec::new();
    spans.extend(hint("Tab", "Switch widget"));
    match view {
        View::Transform => {
            spans.extend(hint("Enter", "Encode"));
            spans.extend(hint("Ctrl+D", "Decode"));
            spans.extend(hint("Ctrl+L", "Clear"));
        }
        View::Inspector => {
            spans.extend(hint("↑/↓", "Field"));
            spans.extend(hint("Enter", "Submit"));
        }
    }
    spans.extend(hint("Ctrl+C", "Quit"));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn status_color(status: LogStatus) -> Color {
    match status {
        LogStatus::Info => Color::Cyan,
        LogStatus::Success => Color::Green,
        LogStatus::Error => Color::Red,
    }
}

fn method_style(method: &str) -> Style {
    match method {
        "GET" => Style::default().fg(Color::Green),
        "POST" => Style::default().fg(Color::Yellow),
        "PUT" => Style::default().fg(Color::Blue),
        "DELETE" => Style::default().fg(Color::Red),
        "SYSTEM" => Style::default().fg(Color::Cyan),
        _ => Style::default().fg(Color::White),
    }
}
