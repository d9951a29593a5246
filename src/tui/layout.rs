//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap};

use super::runtime::App;
use super::style;
use crate::engine::{GateDecision, MAX_HEAVY_DUTY};

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // body
            Constraint::Length(1), // status
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(48), Constraint::Length(44)])
        .split(chunks[1]);
    render_catalog(frame, app, body[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // totals
            Constraint::Length(3), // capacity gauge
            Constraint::Min(3),    // warnings
        ])
        .split(body[1]);
    render_totals(frame, app, side[0]);
    render_capacity_gauge(frame, app, side[1]);
    render_warnings(frame, app, side[2]);

    render_status(frame, app, chunks[2]);
    render_footer(frame, chunks[3]);
}

/// Header bar: preset name, selection size, heavy-duty slots used.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            " INVERTER-SIZER ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            &app.preset_name,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ {} selected │ heavy-duty {}/{} ",
            app.selected_count(),
            app.heavy_duty_count(),
            MAX_HEAVY_DUTY,
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Catalog rows grouped under category headings; blocked rows are dimmed
/// and labelled with the gate reason.
fn render_catalog(frame: &mut Frame, app: &App, area: Rect) {
    let mut items = Vec::with_capacity(app.evaluation.rows.len() + 6);
    let mut highlighted = None;
    let mut current_category = None;

    for (idx, row) in app.evaluation.rows.iter().enumerate() {
        if current_category != Some(row.category) {
            current_category = Some(row.category);
            items.push(ListItem::new(Line::from(Span::styled(
                row.category.display_name(),
                Style::default()
                    .fg(style::CATEGORY_FG)
                    .add_modifier(Modifier::BOLD),
            ))));
        }
        if idx == app.cursor {
            highlighted = Some(items.len());
        }

        let marker = match (row.is_heavy_duty, row.solo_only) {
            (true, true) => "◆ solo",
            (true, false) => "◆",
            _ => "",
        };
        let mut spans = vec![
            Span::raw(format!("  {:>3}  ", row.quantity)),
            Span::raw(format!("{:<28}", row.name)),
            Span::styled(
                format!("{marker:<7}"),
                Style::default().fg(style::HEAVY_DUTY_FG),
            ),
        ];
        let row_style = match row.decision {
            GateDecision::Blocked(reason) => {
                spans.push(Span::raw(reason.to_string()));
                Style::default().fg(style::BLOCKED_FG)
            }
            GateDecision::Allowed if row.quantity > 0 => Style::default().fg(style::SELECTED_FG),
            GateDecision::Allowed => Style::default(),
        };
        items.push(ListItem::new(Line::from(spans)).style(row_style));
    }

    let list = List::new(items)
        .block(Block::default().title(" Appliances ").borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("›");
    let mut state = ListState::default().with_selected(highlighted);
    frame.render_stateful_widget(list, area, &mut state);
}

/// Running, surge, required and recommended capacity.
fn render_totals(frame: &mut Frame, app: &App, area: Rect) {
    let totals = &app.evaluation.totals;
    let sizing = &app.evaluation.sizing;
    let recommended = sizing
        .recommended_kva
        .map_or_else(|| "above table".to_string(), |kva| format!("{kva} kVA"));
    let lines = vec![
        Line::from(format!("  Running:     {:>8.0} W", totals.total_running_watts)),
        Line::from(format!("  Surge:       {:>8.0} W", totals.total_surge_watts)),
        Line::from(format!("  Required:    {:>8.2} kVA", sizing.required_kva)),
        Line::from(Span::styled(
            format!("  Recommended: {recommended:>12}"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    let block = Block::default().title(" Load ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Required capacity as a share of the recommended rating.
fn render_capacity_gauge(frame: &mut Frame, app: &App, area: Rect) {
    let ratio = app.capacity_ratio();
    let gauge = Gauge::default()
        .block(Block::default().title(" Capacity ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(style::load_color(ratio)))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    frame.render_widget(gauge, area);
}

fn render_warnings(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = if app.evaluation.warnings.is_empty() {
        vec![Line::from(Span::styled(
            "  No warnings",
            Style::default().fg(style::FOOTER_FG),
        ))]
    } else {
        app.evaluation
            .warnings
            .iter()
            .map(|w| {
                Line::from(Span::styled(
                    format!("! {w}"),
                    Style::default().fg(style::WARNING_FG),
                ))
            })
            .collect()
    };
    let block = Block::default().title(" Warnings ").borders(Borders::ALL);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let text = app.status.as_deref().unwrap_or("");
    let status = Paragraph::new(Line::from(Span::styled(
        format!(" {text}"),
        Style::default().fg(style::STATUS_FG),
    )));
    frame.render_widget(status, area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  ↑/↓:Move  →/+:Add  ←/-:Remove  Space:Toggle  c:Clear  1/2/3:Preset",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
