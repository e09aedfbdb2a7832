use drawdiff_core::{PointerEvent, TooltipController};
use ratatui::layout::Rect;

/// Popup that follows the mouse over the chart. Its anchor is kept in chart
/// coordinates; the screen position is worked out when drawn.
#[derive(Debug, Default)]
pub struct TerminalTooltip {
    visible: bool,
    anchor: (f64, f64),
    lines: Vec<String>,
}

impl TooltipController for TerminalTooltip {
    fn show(&mut self, event: &PointerEvent, lines: &[String]) {
        self.anchor = (event.x, event.y);
        self.lines = lines.to_vec();
        self.visible = true;
    }

    fn move_to(&mut self, event: &PointerEvent) {
        self.anchor = (event.x, event.y);
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}

impl TerminalTooltip {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Bordered box below-right of the pointer, flipped to the other side
    /// when it would spill out of `bounds`.
    pub fn popup_rect(&self, chart: Rect, bounds: Rect) -> Option<Rect> {
        if !self.visible || self.lines.is_empty() || bounds.width < 3 || bounds.height < 3 {
            return None;
        }
        let w = (self.lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16 + 2).min(bounds.width);
        let h = (self.lines.len() as u16 + 2).min(bounds.height);
        let col = chart.x.saturating_add(self.anchor.0.max(0.0) as u16);
        let row = chart.y.saturating_add(self.anchor.1.max(0.0) as u16);

        let mut x = col.saturating_add(2);
        if x.saturating_add(w) > bounds.right() {
            x = col.saturating_sub(w + 1);
        }
        let mut y = row.saturating_add(1);
        if y.saturating_add(h) > bounds.bottom() {
            y = row.saturating_sub(h);
        }
        let x = x.clamp(bounds.x, bounds.right() - w);
        let y = y.clamp(bounds.y, bounds.bottom() - h);
        Some(Rect::new(x, y, w, h))
    }
}
