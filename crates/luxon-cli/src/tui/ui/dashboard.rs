//! The light level panel: reading, gauge and status.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};

use super::theme::{AppTheme, BORDER_TYPE, rgb};
use crate::tui::app::App;

const NO_SENSOR_HINT: &str = "Işık sensörü bulunamadı. Test modunu açmak için m tuşuna basın.";

/// Draw the main light level panel.
pub(super) fn draw_light_panel(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let status = app.status();
    let accent = rgb(status.accent_color);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(Style::default().fg(accent))
        .title(" Işık Seviyesi ")
        .title_style(theme.title_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // lux value
            Constraint::Length(3), // gauge
            Constraint::Length(1), // scale
            Constraint::Length(1),
            Constraint::Length(1), // message
            Constraint::Min(2),    // description and hints
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                app.display_lux().to_string(),
                Style::default()
                    .fg(theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" lux", Style::default().fg(theme.text_secondary)),
        ]))
        .alignment(Alignment::Center),
        chunks[0],
    );

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BORDER_TYPE)
                .border_style(theme.border_inactive_style()),
        )
        .gauge_style(Style::default().fg(accent).bg(theme.bg_track))
        .ratio(f64::from(app.progress()))
        .label(Span::styled(
            format!("{} lux", app.display_lux()),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(gauge, chunks[1]);

    let scale = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    let muted = Style::default().fg(theme.text_muted);
    frame.render_widget(Paragraph::new(Span::styled(" 0", muted)), scale[0]);
    frame.render_widget(
        Paragraph::new(Span::styled("1000 ", muted)).alignment(Alignment::Right),
        scale[1],
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            status.message,
            Style::default()
                .fg(rgb(status.text_color))
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        chunks[4],
    );

    let mut lines = vec![Line::from(Span::styled(
        status.description,
        Style::default().fg(theme.text_secondary),
    ))];
    if app.sensor_missing() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            NO_SENSOR_HINT,
            Style::default().fg(theme.warning),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[5],
    );
}
