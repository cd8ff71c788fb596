//! Dialogs drawn over the dashboard.

use luxon_core::advice::{
    INFO_BODY, INFO_HEADLINE, INFO_TITLE, RECOMMENDATIONS_TITLE, TEST_MODE_DISABLED_HINT,
    TEST_MODE_ENABLED_HINT, TEST_MODE_TITLE,
};
use luxon_core::{TEST_PRESETS, TEST_VALUE_MAX, current_level_line, recommendation_lines};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::theme::{AppTheme, BORDER_TYPE, LOGO_ACCENT, rgb};
use crate::tui::app::App;

/// Centered popup area taking a share of the screen.
fn popup_area(area: Rect, width_pct: u16, height_pct: u16, min_width: u16, min_height: u16) -> Rect {
    let width = (area.width * width_pct / 100)
        .max(min_width)
        .min(area.width.saturating_sub(2));
    let height = (area.height * height_pct / 100)
        .max(min_height)
        .min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn popup_block<'a>(title: &str, theme: &AppTheme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(theme.border_active_style())
        .title(format!(" {title} "))
        .title_style(theme.title_style())
        .title_bottom(Line::from(" Enter: Tamam ").right_aligned())
}

fn draw_popup(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>, theme: &AppTheme) {
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .block(popup_block(title, theme))
            .wrap(Wrap { trim: false }),
        area,
    );
}

/// Slider track for `value` over `0..=1000`, `width` characters wide.
pub fn slider_track(value: f32, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let fraction = (value / TEST_VALUE_MAX).clamp(0.0, 1.0);
    let fraction = if fraction.is_nan() { 0.0 } else { fraction };
    let knob = (fraction * (width - 1) as f32).round() as usize;
    let mut track = String::with_capacity(width * 3);
    track.extend(std::iter::repeat_n('━', knob));
    track.push('●');
    track.extend(std::iter::repeat_n('─', width - 1 - knob));
    track
}

pub(super) fn draw_recommendations(frame: &mut Frame, app: &App, theme: &AppTheme) {
    let area = popup_area(frame.area(), 70, 50, 50, 10);
    let status = app.status();

    let mut lines = vec![
        Line::from(Span::styled(
            current_level_line(app.reading),
            Style::default()
                .fg(rgb(status.text_color))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(recommendation_lines(app.reading).into_iter().map(|line| {
        Line::from(Span::styled(
            line,
            Style::default().fg(theme.text_secondary),
        ))
    }));

    draw_popup(frame, area, RECOMMENDATIONS_TITLE, lines, theme);
}

pub(super) fn draw_info(frame: &mut Frame, theme: &AppTheme) {
    let area = popup_area(frame.area(), 70, 70, 50, 16);

    let mut lines = vec![
        Line::from(Span::styled(
            INFO_HEADLINE,
            Style::default()
                .fg(LOGO_ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(INFO_BODY.lines().map(|line| {
        Line::from(Span::styled(
            line,
            Style::default().fg(theme.text_secondary),
        ))
    }));

    draw_popup(frame, area, INFO_TITLE, lines, theme);
}

pub(super) fn draw_test_mode(frame: &mut Frame, app: &App, theme: &AppTheme) {
    let area = popup_area(frame.area(), 70, 70, 50, 18);
    let enabled = app.mode.is_test();
    let label = Style::default().fg(theme.text_secondary);
    let key = Style::default().fg(theme.warning);

    let mut lines = vec![Line::from(vec![
        Span::styled(if enabled { "[x] " } else { "[ ] " }, key),
        Span::styled(
            "Test Modunu Aç",
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  (m)", Style::default().fg(theme.text_muted)),
    ])];
    lines.push(Line::from(""));

    if enabled {
        let accent = rgb(app.status().accent_color);
        let track_width = usize::from(area.width.saturating_sub(14)).max(10);

        lines.push(Line::from(Span::styled(
            format!("Işık Seviyesi: {} lux", app.display_lux()),
            Style::default().fg(theme.text_primary),
        )));
        lines.push(Line::from(vec![
            Span::styled("0 ", label),
            Span::styled(
                slider_track(app.test_value, track_width),
                Style::default().fg(accent),
            ),
            Span::styled(" 1000", label),
        ]));
        lines.push(Line::from(Span::styled(
            format!("Lux Değeri: {}", app.test_value as i32),
            label,
        )));
        lines.push(Line::from(Span::styled(
            "←/→ ±10  Shift ±100",
            Style::default().fg(theme.text_muted),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Hızlı Test Değerleri:", label)));

        let mut presets = Vec::new();
        for (i, preset) in TEST_PRESETS.iter().enumerate() {
            presets.push(Span::styled(format!("[{}] ", i + 1), key));
            presets.push(Span::styled(
                format!("{}  ", preset.label),
                Style::default().fg(theme.text_primary),
            ));
        }
        lines.push(Line::from(presets));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            TEST_MODE_ENABLED_HINT,
            Style::default().fg(theme.text_muted),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            TEST_MODE_DISABLED_HINT,
            Style::default().fg(theme.text_muted),
        )));
    }

    draw_popup(frame, area, TEST_MODE_TITLE, lines, theme);
}

pub(super) fn draw_help(frame: &mut Frame, theme: &AppTheme) {
    let area = popup_area(frame.area(), 60, 70, 44, 16);

    let lines = vec![
        Line::from(Span::styled(
            "--- Kısayollar ---",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        shortcut_line("m / Space", "Test modunu aç/kapat", theme),
        shortcut_line("← / →", "Test değeri ±10 lux", theme),
        shortcut_line("Shift+← / →", "Test değeri ±100 lux", theme),
        shortcut_line("1 2 3", "Hızlı test değerleri", theme),
        shortcut_line("t", "Test modu paneli", theme),
        shortcut_line("r", "Tavsiyeler", theme),
        shortcut_line("i", "Bilgilendirme", theme),
        shortcut_line("?", "Bu yardım", theme),
        shortcut_line("Esc / Enter", "Pencereyi kapat", theme),
        shortcut_line("q", "Çıkış", theme),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BORDER_TYPE)
                .border_style(theme.border_active_style())
                .title(" Yardım ")
                .title_style(theme.title_style()),
        ),
        area,
    );
}

fn shortcut_line<'a>(key: &str, desc: &str, theme: &AppTheme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:>12} ", key), Style::default().fg(theme.warning)),
        Span::styled(desc.to_string(), Style::default().fg(theme.text_secondary)),
    ])
}
