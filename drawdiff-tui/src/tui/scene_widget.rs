use crate::tui::theme::Theme;
use drawdiff_core::{Anchor, Axis, AxisOrient, Bar, Rgb, Scene, Shape, Text};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// Paints a cell-unit [`Scene`] into a terminal buffer.
pub struct SceneWidget<'a> {
    scene: &'a Scene,
    theme: &'a Theme,
    hovered: Option<usize>,
}

impl<'a> SceneWidget<'a> {
    pub fn new(scene: &'a Scene, theme: &'a Theme, hovered: Option<usize>) -> Self {
        Self { scene, theme, hovered }
    }
}

impl Widget for SceneWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.theme.bg).fg(self.theme.fg));
        for shape in &self.scene.shapes {
            match shape {
                Shape::Bar(b) => self.paint_bar(b, area, buf),
                Shape::Axis(a) => self.paint_axis(a, area, buf),
                Shape::Text(t) => self.paint_text(t, area, buf),
            }
        }
    }
}

fn color(c: Rgb) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Writes `s` at chart-relative (col, row), dropping whatever falls outside.
fn put(buf: &mut Buffer, area: Rect, col: i32, row: i32, s: &str, style: Style) {
    if row < 0 || row >= area.height as i32 || col >= area.width as i32 {
        return;
    }
    let skip = (-col).max(0) as usize;
    let visible: String = s.chars().skip(skip).collect();
    if visible.is_empty() {
        return;
    }
    let col = col.max(0) as u16;
    let max = (area.width - col) as usize;
    buf.set_stringn(area.x + col, area.y + row as u16, visible, max, style);
}

fn to_cell(v: f64) -> i32 {
    if v.is_finite() { v.round() as i32 } else { i32::MIN / 2 }
}

impl SceneWidget<'_> {
    fn paint_bar(&self, b: &Bar, area: Rect, buf: &mut Buffer) {
        if b.height <= 0.0 || b.width <= 0.0 {
            return;
        }
        let (w, h) = (area.width as i32, area.height as i32);
        let (c0, r0) = (to_cell(b.x).clamp(0, w), to_cell(b.y).clamp(0, h));
        let c1 = to_cell(b.x + b.width).max(c0 + 1).min(w);
        let r1 = to_cell(b.y + b.height).max(r0 + 1).min(h);
        let bg = if self.hovered == Some(b.index) { self.theme.highlight } else { color(b.fill) };
        let cells = " ".repeat((c1 - c0).max(0) as usize);
        for row in r0..r1 {
            put(buf, area, c0, row, &cells, Style::default().bg(bg));
        }
    }

    fn paint_axis(&self, a: &Axis, area: Rect, buf: &mut Buffer) {
        let line = Style::default().fg(self.theme.axis).bg(self.theme.bg);
        let label = Style::default().fg(self.theme.fg).bg(self.theme.bg);
        match a.orient {
            AxisOrient::Bottom => {
                let row = to_cell(a.offset);
                let (c0, c1) = (to_cell(a.range.0).max(0), to_cell(a.range.1).min(area.width as i32));
                put(buf, area, c0, row, &"─".repeat((c1 - c0 + 1).max(0) as usize), line);
                let mut free_from = i32::MIN;
                for t in &a.ticks {
                    let col = to_cell(t.position);
                    put(buf, area, col, row, "┬", line);
                    let len = t.label.chars().count() as i32;
                    let start = col - len / 2;
                    // skip labels that would run into the previous one
                    if start > free_from {
                        put(buf, area, start, row + 1, &t.label, label);
                        free_from = start + len;
                    }
                }
            }
            AxisOrient::Left => {
                let col = to_cell(a.offset) - 1;
                let (top, bottom) = (to_cell(a.range.1).max(0), to_cell(a.range.0).min(area.height as i32));
                for row in top..bottom {
                    put(buf, area, col, row, "│", line);
                }
                put(buf, area, col, bottom, "└", line);
                let mut last_row = i32::MIN;
                for t in &a.ticks {
                    let row = to_cell(t.position);
                    if row == last_row {
                        continue;
                    }
                    last_row = row;
                    if row != bottom {
                        put(buf, area, col, row, "┤", line);
                    }
                    let len = t.label.chars().count() as i32;
                    put(buf, area, col - 1 - len, row, &t.label, label);
                }
            }
        }
    }

    fn paint_text(&self, t: &Text, area: Rect, buf: &mut Buffer) {
        let len = t.content.chars().count() as i32;
        let x = to_cell(t.x);
        let start = match t.anchor {
            Anchor::Start => x,
            Anchor::Middle => x - len / 2,
            Anchor::End => x - len,
        };
        let style = if t.bold {
            Style::default().fg(self.theme.title).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.muted)
        };
        put(buf, area, start, to_cell(t.y), &t.content, style);
    }
}
