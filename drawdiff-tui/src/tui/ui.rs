use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use crate::tui::app::{App, View};
use crate::tui::scene_widget::SceneWidget;
use crate::tui::theme::Theme;

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    app.sync_scene(chunks[1]);
    let theme = &app.theme;
    render_topbar(frame, app, chunks[0], theme);
    frame.render_widget(SceneWidget::new(&app.scene, theme, app.hover.active()), chunks[1]);
    render_tooltip(frame, app, area, theme);
    render_bottombar(frame, app, chunks[2], theme);
    if app.view == View::Help { render_help(frame, area); }
}

fn render_topbar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let info = match &app.dataset {
        Some(ds) => format!(" {} | {} regions | {} bins", app.input_path.display(), ds.states.len(), app.chart.settings().bins),
        None => format!(" {}", app.input_path.display()),
    };
    let badge = if app.watch_rx.is_some() {
        Span::styled("[WATCH]", Style::default().fg(theme.highlight))
    } else {
        Span::raw("")
    };
    let line = Line::from(vec![badge, Span::raw(info)]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(theme.bg).fg(theme.fg)), area);
}

fn render_tooltip(frame: &mut Frame, app: &App, bounds: Rect, theme: &Theme) {
    let Some(popup) = app.tooltip.popup_rect(app.chart_area, bounds) else { return };
    let text: Vec<Line> = app.tooltip.lines().iter().map(|l| Line::from(l.as_str())).collect();
    let style = Style::default().bg(theme.tooltip_bg).fg(theme.tooltip_fg);
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(text).style(style).block(Block::default().borders(Borders::ALL).style(style)), popup);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled("Keybindings", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("  q        Quit"),
        Line::from("  ?        Toggle help"),
        Line::from("  Esc      Close help / quit"),
        Line::from("  t        Cycle theme"),
        Line::from("  r        Reload data file"),
        Line::from("  e        Export chart as SVG"),
        Line::from("  mouse    Hover a bar for details"),
    ];
    let popup = centered_rect(50, 50, area);
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Help (?)")), popup);
}

fn render_bottombar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let style = if app.status_msg.contains("error") {
        Style::default().bg(theme.bg).fg(theme.error)
    } else {
        Style::default().bg(theme.bg).fg(theme.fg)
    };
    let bar_text = format!(" {} | q:quit ?:help t:theme r:reload e:export", app.status_msg);
    frame.render_widget(Paragraph::new(bar_text).style(style), area);
}

fn centered_rect(px: u16, py: u16, r: Rect) -> Rect {
    let v = Layout::default().direction(Direction::Vertical).constraints([Constraint::Percentage((100-py)/2), Constraint::Percentage(py), Constraint::Percentage((100-py)/2)]).split(r);
    Layout::default().direction(Direction::Horizontal).constraints([Constraint::Percentage((100-px)/2), Constraint::Percentage(px), Constraint::Percentage((100-px)/2)]).split(v[1])[1]
}
