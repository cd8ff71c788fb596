//! Main UI layout and rendering for the TUI dashboard.
//!
//! The layout consists of:
//!
//! - **Header**: Logo, test mode badge and sensor state
//! - **Main content**: Light level panel with gauge and status
//! - **Status bar**: Key hints or the latest status message, and the clock

pub mod theme;

mod dashboard;
mod overlays;

use chrono::Local;
use luxon_core::SensorStatus;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::app::{App, Overlay};
use theme::{AppTheme, LOGO_ACCENT};

/// Draw the complete TUI interface.
pub fn draw(frame: &mut Frame, app: &App) {
    let theme = AppTheme::dark();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], app, &theme);
    dashboard::draw_light_panel(frame, chunks[1], app, &theme);
    draw_status_bar(frame, chunks[2], app, &theme);

    match app.overlay {
        Some(Overlay::Recommendations) => overlays::draw_recommendations(frame, app, &theme),
        Some(Overlay::Info) => overlays::draw_info(frame, &theme),
        Some(Overlay::TestMode) => overlays::draw_test_mode(frame, app, &theme),
        Some(Overlay::Help) => overlays::draw_help(frame, &theme),
        None => {}
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let mut spans = vec![
        Span::styled(
            " LUX",
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "ON ",
            Style::default()
                .fg(LOGO_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            concat!("v", env!("CARGO_PKG_VERSION"), " "),
            Style::default().fg(theme.text_muted),
        ),
    ];

    if app.mode.is_test() {
        spans.push(Span::styled(
            " Test Modu ",
            Style::default()
                .fg(theme.bg_header)
                .bg(LOGO_ACCENT)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let sensor_color = match app.sensor_status {
        SensorStatus::Available => theme.text_secondary,
        SensorStatus::Unavailable => theme.warning,
        SensorStatus::Unknown | SensorStatus::Paused => theme.text_muted,
    };
    let sensor_label = match &app.sensor_name {
        Some(name) => format!(" {}: {} ", name, app.sensor_status.label()),
        None => format!(" {} ", app.sensor_status.label()),
    };
    spans.push(Span::styled(sensor_label, Style::default().fg(sensor_color)));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(theme.header_style()),
        area,
    );
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let time_str = Local::now().format("%H:%M:%S").to_string();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(10)])
        .split(area);

    let left = match app.current_status_message() {
        Some(msg) => Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(theme.warning),
        )),
        None => Line::from(vec![
            Span::styled(" q", Style::default().fg(theme.primary)),
            Span::styled(" Çıkış  ", Style::default().fg(theme.text_muted)),
            Span::styled("m", Style::default().fg(theme.primary)),
            Span::styled(" Test  ", Style::default().fg(theme.text_muted)),
            Span::styled("r", Style::default().fg(theme.primary)),
            Span::styled(" Tavsiyeler  ", Style::default().fg(theme.text_muted)),
            Span::styled("i", Style::default().fg(theme.primary)),
            Span::styled(" Bilgi  ", Style::default().fg(theme.text_muted)),
            Span::styled("?", Style::default().fg(theme.primary)),
            Span::styled(" Yardım", Style::default().fg(theme.text_muted)),
        ]),
    };

    frame.render_widget(Paragraph::new(left).style(theme.header_style()), chunks[0]);
    frame.render_widget(
        Paragraph::new(Span::styled(
            time_str,
            Style::default().fg(theme.text_secondary),
        ))
        .alignment(Alignment::Right)
        .style(theme.header_style()),
        chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use luxon_core::{InputMode, MonitorUpdate};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tokio::sync::mpsc;

    use super::*;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app_with(lux: f32, mode: InputMode) -> App {
        let (_tx, rx) = mpsc::channel(1);
        let mut app = App::new(rx, 300.0);
        app.handle_update(MonitorUpdate::Reading { lux, mode });
        app
    }

    #[test]
    fn test_dashboard_shows_reading_and_status() {
        let screen = render(&app_with(100.0, InputMode::Live));
        assert!(screen.contains("LUXON"));
        assert!(screen.contains("100 lux"));
        assert!(screen.contains("Ortam ışığı yetersiz"));
        assert!(!screen.contains("Test Modu"));
    }

    #[test]
    fn test_dashboard_shows_test_badge() {
        let screen = render(&app_with(700.0, InputMode::Test));
        assert!(screen.contains("Test Modu"));
        assert!(screen.contains("Ortam ışığı fazla parlak"));
    }

    #[test]
    fn test_missing_sensor_hint() {
        let mut app = app_with(0.0, InputMode::Live);
        app.handle_update(MonitorUpdate::SensorStatus {
            status: SensorStatus::Unavailable,
            sensor: "iio".to_string(),
        });
        let screen = render(&app);
        assert!(screen.contains("Işık sensörü bulunamadı"));
    }

    #[test]
    fn test_overlays_render() {
        let mut app = app_with(300.0, InputMode::Live);

        app.overlay = Some(Overlay::Recommendations);
        let screen = render(&app);
        assert!(screen.contains("Tavsiyeler"));
        assert!(screen.contains("Mevcut ışık seviyesi: 300 lux"));

        app.overlay = Some(Overlay::Info);
        assert!(render(&app).contains("LUXON - Smart Light Assistant"));

        app.overlay = Some(Overlay::TestMode);
        assert!(render(&app).contains("Test Modunu Aç"));

        app.overlay = Some(Overlay::Help);
        assert!(render(&app).contains("Kısayollar"));
    }

    #[test]
    fn test_test_mode_overlay_shows_slider_values() {
        let mut app = app_with(600.0, InputMode::Test);
        app.overlay = Some(Overlay::TestMode);
        let screen = render(&app);
        assert!(screen.contains("Işık Seviyesi: 600 lux"));
        assert!(screen.contains("Lux Değeri: 600"));
        assert!(screen.contains("Hızlı Test Değerleri:"));
    }
}
