use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table};

use crate::output::format_share;
use crate::tui::app::{App, Criterion, InputMode};
use crate::tui::theme;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 10 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Controls(2) + Table(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(2), // Weight sliders + scenario controls
        Constraint::Fill(1),   // Supplier table
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_controls(frame, chunks[1], app);
    render_table(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);

    match app.input_mode {
        InputMode::NegotiateInput => render_negotiate_popup(frame, app),
        InputMode::Advice => render_advice_popup(frame, app),
        InputMode::PoView => render_po_popup(frame, app),
        InputMode::Help => render_help_popup(frame),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        "SmartProcure",
        Style::default().fg(theme::TITLE_COLOR).bold(),
    )];

    let source_text = format!("source: {}", app.source_label);
    let left_len = "SmartProcure".len();
    let padding_len = (area.width as usize).saturating_sub(left_len + source_text.len());
    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(Span::styled(source_text, Style::default().fg(theme::MUTED)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn weight_slider(value: f64, width: usize) -> String {
    let filled = (value.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(width.saturating_sub(filled))
    )
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    // Line 1: the four weight sliders, selected criterion highlighted
    let mut weight_spans = vec![Span::styled("Weights ", Style::default().fg(theme::MUTED))];
    for criterion in Criterion::ALL {
        let value = app.weight_of(criterion);
        let selected = criterion == app.selected_criterion;
        let label_style = if selected {
            Style::default().fg(theme::SLIDER_SELECTED).bold()
        } else {
            Style::default().fg(theme::MUTED)
        };
        let bar_style = if selected {
            Style::default().fg(theme::SLIDER_SELECTED)
        } else {
            Style::default().fg(theme::SLIDER_FILLED)
        };

        weight_spans.push(Span::styled(format!("{} ", criterion.label()), label_style));
        weight_spans.push(Span::styled(weight_slider(value, 8), bar_style));
        weight_spans.push(Span::raw(format!(" {:.2}  ", value)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(weight_spans)),
        Rect { height: 1, ..area },
    );

    // Line 2: scenario controls
    let scenario = Line::from(vec![
        Span::styled("Demand ", Style::default().fg(theme::MUTED)),
        Span::styled(
            format!("{}", app.total_demand),
            Style::default().fg(theme::TITLE_COLOR),
        ),
        Span::raw("    "),
        Span::styled("Disruption ", Style::default().fg(theme::MUTED)),
        Span::styled(
            format!("{:.0}%", app.disruption_level),
            Style::default().fg(theme::TITLE_COLOR),
        ),
        Span::raw("    "),
        Span::styled(
            format!("{} suppliers ranked", app.rows.len()),
            Style::default().fg(theme::MUTED),
        ),
    ]);
    let scenario_area = Rect {
        y: area.y + 1,
        height: 1,
        ..area
    };
    frame.render_widget(Paragraph::new(scenario), scenario_area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App) {
    if app.rows.is_empty() {
        let empty_msg = Paragraph::new("No suppliers to rank")
            .alignment(Alignment::Center)
            .block(Block::default());
        frame.render_widget(empty_msg, area);
        return;
    }

    let max_score = app.rows.iter().map(|r| r.score).fold(0.0_f64, f64::max);

    let rows: Vec<Row> = app
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let index = format!("{}.", idx + 1);

            let score_color = theme::score_color(row.score, max_score);
            let mut score_spans = vec![Span::styled(
                format!("{:>6.3} ", row.score),
                Style::default().fg(score_color),
            )];
            score_spans.extend(score_bar(row.score, max_score, 8).spans);
            let score_line = Line::from(score_spans);

            let adj_risk = Span::styled(
                format!("{:.3}", row.adjusted_risk),
                Style::default().fg(theme::risk_color(row.adjusted_risk)),
            );

            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme::ROW_ALT_BG)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(index).style(Style::default().fg(theme::INDEX_COLOR)),
                Cell::from(row.record.name.clone()),
                Cell::from(score_line),
                Cell::from(format!("{:>6}", format_share(row.allocation_share))),
                Cell::from(format!("{:>6}", row.allocated_qty)),
                Cell::from(format!("{:>6.1}%", row.disruption_probability * 100.0)),
                Cell::from(Line::from(adj_risk)),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),  // Index: "99."
        Constraint::Fill(1),    // Supplier name
        Constraint::Length(16), // Score + bar
        Constraint::Length(7),  // Allocation share
        Constraint::Length(7),  // Allocated qty
        Constraint::Length(8),  // Disruption probability
        Constraint::Length(8),  // Adjusted risk
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec![
                "#", "Supplier", "Score", "Share", "Qty", "Disrupt", "AdjRisk",
            ])
            .style(theme::HEADER_STYLE)
            .bottom_margin(1),
        )
        .row_highlight_style(theme::ROW_SELECTED);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let text = if app.is_advising {
        Line::from(Span::styled(
            "Contacting negotiation advisor...",
            Style::default().fg(theme::TITLE_COLOR),
        ))
    } else if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Error") || msg.contains("failed") {
            theme::FLASH_ERROR
        } else {
            theme::FLASH_SUCCESS
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints = [
            ("j/k", ":nav "),
            ("Tab", ":criterion "),
            ("+/-", ":weight "),
            ("d/D", ":demand "),
            ("x/X", ":disruption "),
            ("f", ":forecast "),
            ("n", ":negotiate "),
            ("p", ":po "),
            ("?", ":help "),
            ("q", ":quit"),
        ];
        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                *key,
                Style::default().fg(theme::STATUS_KEY_COLOR),
            ));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme::STATUS_BAR_BG)),
        area,
    );
}

fn score_bar(score: f64, max_score: f64, width: usize) -> Line<'static> {
    let ratio = if max_score > 0.0 {
        (score / max_score).min(1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let bar_color = theme::score_color(score, max_score);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled(
            "█".repeat(filled),
            Style::default().fg(bar_color),
        ));
    }
    if empty > 0 {
        spans.push(Span::styled(
            "░".repeat(empty),
            Style::default().fg(theme::BAR_EMPTY),
        ));
    }

    Line::from(spans)
}

/// Render the negotiation input popup
fn render_negotiate_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(48, 6, frame.area());
    frame.render_widget(Clear, popup_area);

    let supplier = app
        .selected_row()
        .map(|r| r.record.name.clone())
        .unwrap_or_default();
    let block = Block::bordered().title(format!(" Negotiate with {} ", supplier));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let chunks = Layout::vertical([
        Constraint::Length(1), // Prompt
        Constraint::Length(1), // Input line
        Constraint::Length(1), // Help text
    ])
    .split(inner);

    frame.render_widget(
        Paragraph::new("Offered price and target price:"),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(format!("{}|", app.negotiate_input)),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new("e.g. '100 90'  Enter: run | Esc: cancel")
            .style(Style::default().fg(theme::MUTED)),
        chunks[2],
    );
}

/// Render the advisor recommendation popup
fn render_advice_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(60, 10, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered().title(" Negotiation Advice ");
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let mut lines = Vec::new();
    if let Some(advice) = &app.advice {
        lines.push(Line::from(vec![
            Span::styled("Decision: ", Style::default().fg(theme::MUTED)),
            Span::styled(advice.decision.label(), Style::default().bold()),
        ]));
        lines.push(Line::from(""));
        for strategy_line in advice.strategy.lines() {
            lines.push(Line::from(strategy_line.to_string()));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Esc to close",
        Style::default().fg(theme::MUTED),
    )));

    frame.render_widget(Paragraph::new(lines).wrap(ratatui::widgets::Wrap { trim: true }), inner);
}

/// Render the purchase-order popup
fn render_po_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(56, 16, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered().title(" Purchase Order ");
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let mut lines: Vec<Line> = app
        .po_text
        .as_deref()
        .unwrap_or("")
        .lines()
        .map(|l| Line::from(l.to_string()))
        .collect();
    lines.push(Line::from(Span::styled(
        "Esc to close",
        Style::default().fg(theme::MUTED),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame) {
    let popup_area = centered_rect_fixed(52, 17, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered().title(" Keyboard Shortcuts ");
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let key_style = Style::default().fg(Color::Cyan).bold();
    let help_lines = vec![
        Line::from(vec![
            Span::styled("j / k         ", key_style),
            Span::raw("Move down / up"),
        ]),
        Line::from(vec![
            Span::styled("Tab / 1-4     ", key_style),
            Span::raw("Select weight criterion"),
        ]),
        Line::from(vec![
            Span::styled("+ / -         ", key_style),
            Span::raw("Adjust selected weight"),
        ]),
        Line::from(vec![
            Span::styled("D / d         ", key_style),
            Span::raw("Raise / lower total demand"),
        ]),
        Line::from(vec![
            Span::styled("X / x         ", key_style),
            Span::raw("Raise / lower disruption level"),
        ]),
        Line::from(vec![
            Span::styled("f             ", key_style),
            Span::raw("Redraw disruption forecast"),
        ]),
        Line::from(vec![
            Span::styled("n             ", key_style),
            Span::raw("Negotiate with selected supplier"),
        ]),
        Line::from(vec![
            Span::styled("p             ", key_style),
            Span::raw("Draft purchase order"),
        ]),
        Line::from(vec![
            Span::styled("?             ", key_style),
            Span::raw("Show/hide this help"),
        ]),
        Line::from(vec![
            Span::styled("q / Ctrl-c    ", key_style),
            Span::raw("Quit"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(theme::MUTED),
        )),
    ];

    frame.render_widget(Paragraph::new(help_lines), inner);
}
