use crate::scene::{Bar, Scene};

/// Pointer position in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A floating annotation owned by the host. The chart only moves, fills and
/// hides it.
pub trait TooltipController {
    /// Move under the pointer and replace the content.
    fn show(&mut self, event: &PointerEvent, lines: &[String]);
    fn move_to(&mut self, event: &PointerEvent);
    fn hide(&mut self);
}

pub fn tooltip_lines(bar: &Bar, count_label: &str) -> Vec<String> {
    let mean = match bar.mean_count {
        Some(m) => format!("{m:.2}"),
        None => "n/a".to_owned(),
    };
    vec![
        format!("Difficulty Range: {:.2} - {:.2}", bar.x0, bar.x1),
        format!("Average {count_label}: {mean}"),
    ]
}

/// Turns raw pointer positions into enter / move / leave on the scene's bars.
#[derive(Debug, Clone, Default)]
pub struct HoverState {
    active: Option<usize>,
}

impl HoverState {
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn pointer_moved<T>(&mut self, scene: &Scene, event: PointerEvent, count_label: &str, tooltip: &mut T)
    where
        T: TooltipController + ?Sized,
    {
        let hit = scene.bar_at(event.x, event.y);
        match (self.active, hit) {
            (Some(prev), Some(bar)) if prev == bar.index => tooltip.move_to(&event),
            (prev, Some(bar)) => {
                if prev.is_some() {
                    tooltip.hide();
                }
                self.active = Some(bar.index);
                tooltip.show(&event, &tooltip_lines(bar, count_label));
            }
            (Some(_), None) => {
                self.active = None;
                tooltip.hide();
            }
            (None, None) => {}
        }
    }

    /// The pointer left the surface entirely.
    pub fn pointer_left<T: TooltipController + ?Sized>(&mut self, tooltip: &mut T) {
        if self.active.take().is_some() {
            tooltip.hide();
        }
    }

    /// Forget the hovered bar after a redraw replaced it.
    pub fn reset<T: TooltipController + ?Sized>(&mut self, tooltip: &mut T) {
        self.active = None;
        tooltip.hide();
    }
}
