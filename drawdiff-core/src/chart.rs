use crate::difficulty::DifficultyTable;
use crate::histogram::{bin_records, Histogram};
use crate::scale::{LinearScale, SequentialColor};
use crate::scene::{Anchor, Axis, AxisOrient, Bar, DrawingSurface, Shape, Text, Tick};
use drawdiff_common::{ChartConfig, Dataset, RegionRecord};

pub const DEFAULT_TICKS: usize = 10;
pub const TITLE_SIZE: f64 = 20.0;
pub const DISCLAIMER_SIZE: f64 = 10.0;

/// Surface-unit measurements for one kind of surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub margin: f64,
    /// Subtracted from every bar's width so neighbours don't touch.
    pub bar_gap: f64,
    /// Minimum distance between ticks; 0 keeps the default tick count.
    pub x_tick_spacing: f64,
    pub y_tick_spacing: f64,
}

impl ChartLayout {
    pub fn pixels() -> Self {
        Self { margin: 80.0, bar_gap: 1.0, x_tick_spacing: 0.0, y_tick_spacing: 0.0 }
    }

    /// A terminal cell is roughly twice as tall as it is wide, and x labels
    /// need room for a few digits.
    pub fn cells() -> Self {
        Self { margin: 6.0, bar_gap: 1.0, x_tick_spacing: 8.0, y_tick_spacing: 2.0 }
    }

    fn tick_count(span: f64, spacing: f64) -> usize {
        if spacing <= 0.0 {
            return DEFAULT_TICKS;
        }
        ((span / spacing).floor().max(1.0) as usize).min(DEFAULT_TICKS)
    }
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self::pixels()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub bins: usize,
    pub layout: ChartLayout,
    pub title: String,
    pub disclaimer: String,
    pub count_label: String,
}

impl ChartSettings {
    pub fn from_config(cfg: &ChartConfig, layout: ChartLayout) -> Self {
        Self {
            bins: cfg.bins.max(1),
            layout,
            title: cfg.title.clone(),
            disclaimer: cfg.disclaimer.clone(),
            count_label: cfg.count_label.clone(),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default(), ChartLayout::pixels())
    }
}

/// Histogram of region counts over drawing difficulty.
#[derive(Debug, Clone)]
pub struct HistogramChart {
    table: DifficultyTable,
    settings: ChartSettings,
}

impl HistogramChart {
    pub fn new(table: DifficultyTable, settings: ChartSettings) -> Self {
        Self { table, settings }
    }

    pub fn table(&self) -> &DifficultyTable {
        &self.table
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn with_layout(mut self, layout: ChartLayout) -> Self {
        self.settings.layout = layout;
        self
    }

    pub fn histogram(&self, records: &[RegionRecord]) -> Histogram {
        bin_records(records, &self.table, self.settings.bins)
    }

    /// Redraws the surface from scratch. Does nothing at all, not even a
    /// clear, until both the data and the surface exist.
    pub fn render<S>(&self, data: Option<&Dataset>, surface: Option<&mut S>)
    where
        S: DrawingSurface + ?Sized,
    {
        let (Some(data), Some(surface)) = (data, surface) else {
            return;
        };
        self.draw(&data.states, surface);
    }

    fn draw<S: DrawingSurface + ?Sized>(&self, records: &[RegionRecord], surface: &mut S) {
        let layout = &self.settings.layout;
        let (w, h, m) = (surface.width(), surface.height(), layout.margin);
        let hist = self.histogram(records);
        if hist.is_degenerate() {
            tracing::warn!(domain = ?hist.domain, "every record has the same difficulty; widened the only bin");
        }

        let xs = LinearScale::new(hist.domain, (m, w - m));
        let ys = LinearScale::new((0.0, hist.max_len().max(1) as f64), (h - m, m));
        let fill = SequentialColor::new((0.0, (self.settings.bins.max(1) - 1) as f64));

        surface.clear();

        for (i, bin) in hist.bins.iter().enumerate() {
            let top = ys.map(bin.len() as f64);
            let left = xs.map(bin.x0);
            surface.draw(Shape::Bar(Bar {
                x: left,
                y: top,
                width: (xs.map(bin.x1) - left - layout.bar_gap).max(0.0),
                height: (h - m - top).max(0.0),
                fill: fill.map(i as f64),
                index: i,
                x0: bin.x0,
                x1: bin.x1,
                members: bin.len(),
                mean_count: bin.mean_count(),
            }));
        }

        let x_ticks = ChartLayout::tick_count(w - 2.0 * m, layout.x_tick_spacing);
        let y_ticks = ChartLayout::tick_count(h - 2.0 * m, layout.y_tick_spacing);
        surface.draw(Shape::Axis(Axis {
            orient: AxisOrient::Bottom,
            offset: h - m,
            range: xs.range,
            ticks: ticks_for(&xs, x_ticks),
        }));
        surface.draw(Shape::Axis(Axis {
            orient: AxisOrient::Left,
            offset: m,
            range: ys.range,
            ticks: ticks_for(&ys, y_ticks),
        }));

        surface.draw(Shape::Text(Text {
            x: w / 2.0,
            y: h - m / 2.0,
            anchor: Anchor::Middle,
            font_size: TITLE_SIZE,
            bold: true,
            content: self.settings.title.clone(),
        }));
        surface.draw(Shape::Text(Text {
            x: w - m,
            y: h / 3.0,
            anchor: Anchor::End,
            font_size: DISCLAIMER_SIZE,
            bold: false,
            content: self.settings.disclaimer.clone(),
        }));

        tracing::debug!(
            records = records.len(),
            bins = hist.bins.len(),
            domain = ?hist.domain,
            tallest = hist.max_len(),
            "histogram drawn"
        );
    }
}

fn ticks_for(scale: &LinearScale, count: usize) -> Vec<Tick> {
    scale
        .tick_labels(count)
        .into_iter()
        .map(|(v, label)| Tick { position: scale.map(v), label })
        .collect()
}

/// What a drawing depends on: the dataset revision and the surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderKey {
    pub data_revision: u64,
    pub width: f64,
    pub height: f64,
}

/// Remembers the last drawn [`RenderKey`] so hosts redraw only when the
/// data or the surface changed.
#[derive(Debug, Clone, Default)]
pub struct Redraw {
    last: Option<RenderKey>,
}

impl Redraw {
    /// True (and recorded) when `key` differs from the last drawn key.
    pub fn needed(&mut self, key: RenderKey) -> bool {
        if self.last == Some(key) {
            return false;
        }
        self.last = Some(key);
        true
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }
}
