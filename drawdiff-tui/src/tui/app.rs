use crate::tui::theme::Theme;
use crate::tui::tooltip::TerminalTooltip;
use drawdiff_common::{Config, Dataset, ExportConfig};
use drawdiff_core::{
    export_svg, ChartLayout, HistogramChart, HoverState, PointerEvent, Redraw, RenderKey, Scene,
};
use ratatui::layout::Rect;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Chart,
    Help,
}

pub struct App {
    pub input_path: PathBuf,
    pub config: Config,
    pub chart: HistogramChart,
    pub dataset: Option<Dataset>,
    pub data_revision: u64, // bumped on every (re)load
    pub scene: Scene,
    redraw: Redraw,
    pub chart_area: Rect,
    pub hover: HoverState,
    pub tooltip: TerminalTooltip,
    pub theme: Theme,
    pub view: View,
    pub status_msg: String,
    pub should_quit: bool,
    pub watch_rx: Option<std::sync::mpsc::Receiver<()>>, // reload events from filesystem watcher
}

impl App {
    pub fn new(input_path: PathBuf, config: Config, chart: HistogramChart) -> Self {
        Self {
            input_path,
            chart,
            dataset: None,
            data_revision: 0,
            scene: Scene::default(),
            redraw: Redraw::default(),
            chart_area: Rect::default(),
            hover: HoverState::default(),
            tooltip: TerminalTooltip::default(),
            theme: Theme::from_name(&config.display.theme),
            view: View::Chart,
            status_msg: String::from("Loading..."),
            should_quit: false,
            config,
            watch_rx: None,
        }
    }

    pub fn set_dataset(&mut self, dataset: Option<Dataset>) {
        self.dataset = dataset;
        self.data_revision += 1;
    }

    /// Reads the input file again. A failed read keeps the last good data.
    pub fn reload(&mut self) {
        match Dataset::from_path(&self.input_path) {
            Ok(ds) => {
                tracing::info!(path = %self.input_path.display(), records = ds.states.len(), "dataset loaded");
                self.status_msg = format!("{} regions loaded", ds.states.len());
                self.set_dataset(Some(ds));
            }
            Err(e) => {
                tracing::error!(path = %self.input_path.display(), "load failed: {e}");
                self.status_msg = format!("load error: {e}");
            }
        }
    }

    /// Drains the watcher channel; any event means the file changed.
    pub fn poll_watch(&mut self) {
        let changed = match &self.watch_rx {
            Some(rx) => rx.try_iter().count() > 0,
            None => false,
        };
        if changed {
            self.reload();
        }
    }

    /// Redraws the scene when the data or the chart area changed since the
    /// last frame.
    pub fn sync_scene(&mut self, area: Rect) {
        self.chart_area = area;
        let key = RenderKey {
            data_revision: self.data_revision,
            width: area.width as f64,
            height: area.height as f64,
        };
        if !self.redraw.needed(key) {
            return;
        }
        self.scene.resize(key.width, key.height);
        self.chart.render(self.dataset.as_ref(), Some(&mut self.scene));
        self.hover.reset(&mut self.tooltip);
    }

    /// Mouse position in screen cells.
    pub fn pointer_at(&mut self, col: u16, row: u16) {
        let a = self.chart_area;
        if col >= a.x && col < a.right() && row >= a.y && row < a.bottom() {
            let event = PointerEvent::new((col - a.x) as f64 + 0.5, (row - a.y) as f64 + 0.5);
            let label = &self.chart.settings().count_label;
            self.hover.pointer_moved(&self.scene, event, label, &mut self.tooltip);
        } else {
            self.hover.pointer_left(&mut self.tooltip);
        }
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status_msg = format!("theme: {}", self.theme.name);
    }

    pub fn toggle_help(&mut self) {
        self.view = if self.view == View::Help { View::Chart } else { View::Help };
    }

    /// Writes a pixel-sized SVG of the current data next to the configured
    /// export directory.
    pub fn export_current(&mut self) {
        let Some(ds) = &self.dataset else {
            self.status_msg = "nothing to export yet".into();
            return;
        };
        let scene = pixel_scene(&self.chart, ds, &self.config.export);
        let out = default_output(&self.input_path, &self.config.export.output_dir, "svg");
        let result = out
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or(Ok(()), std::fs::create_dir_all)
            .map_err(drawdiff_common::DrawDiffError::from)
            .and_then(|_| export_svg(&out, &scene));
        self.status_msg = match result {
            Ok(()) => format!("exported {}", out.display()),
            Err(e) => {
                tracing::error!("export failed: {e}");
                format!("export error: {e}")
            }
        };
    }
}

/// Renders `ds` into a fresh pixel-unit scene sized by the export settings.
pub fn pixel_scene(chart: &HistogramChart, ds: &Dataset, export: &ExportConfig) -> Scene {
    let mut scene = Scene::new(export.width as f64, export.height as f64);
    chart.clone().with_layout(ChartLayout::pixels()).render(Some(ds), Some(&mut scene));
    scene
}

/// `<output_dir>/<input stem>.<ext>`
pub fn default_output(input: &Path, output_dir: &str, ext: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("histogram");
    Path::new(output_dir).join(format!("{stem}.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawdiff_core::{ChartSettings, DifficultyTable};

    fn app_with(json: &str) -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deaths.json");
        std::fs::write(&path, json).unwrap();
        let mut config = Config::default();
        config.export.output_dir = dir.path().join("out").to_string_lossy().into_owned();
        let chart = HistogramChart::new(DifficultyTable::builtin(), ChartSettings::from_config(&config.chart, ChartLayout::cells()));
        let mut app = App::new(path, config, chart);
        app.reload();
        (dir, app)
    }

    const DATA: &str = r#"{"states":[{"abreviation":"CO","count":10},{"abreviation":"WY","count":30},{"abreviation":"MD","count":2}]}"#;

    #[test]
    fn reload_bumps_revision() {
        let (_dir, mut app) = app_with(DATA);
        assert_eq!(app.data_revision, 1);
        assert_eq!(app.dataset.as_ref().map(|d| d.states.len()), Some(3));
        app.reload();
        assert_eq!(app.data_revision, 2);
    }

    #[test]
    fn bad_file_keeps_previous_data() {
        let (dir, mut app) = app_with(DATA);
        std::fs::write(dir.path().join("deaths.json"), "not json").unwrap();
        app.reload();
        assert_eq!(app.data_revision, 1);
        assert!(app.status_msg.starts_with("load error"));
        assert!(app.dataset.is_some());
    }

    #[test]
    fn scene_follows_size_and_data() {
        let (_dir, mut app) = app_with(DATA);
        app.sync_scene(Rect::new(0, 1, 80, 30));
        assert_eq!(app.scene.bars().count(), 10);
        assert_eq!(app.scene.width, 80.0);
        app.sync_scene(Rect::new(0, 1, 100, 30));
        assert_eq!(app.scene.width, 100.0);
        app.set_dataset(None);
        app.sync_scene(Rect::new(0, 1, 100, 30));
        // no data: previous drawing stays
        assert_eq!(app.scene.bars().count(), 10);
    }

    #[test]
    fn hover_over_first_bar_then_away() {
        let (_dir, mut app) = app_with(DATA);
        let area = Rect::new(0, 1, 80, 30);
        app.sync_scene(area);
        let bar = app.scene.bars().next().unwrap().clone();
        app.pointer_at(bar.x.ceil() as u16, area.y + bar.y.ceil() as u16 + 1);
        assert!(app.tooltip.is_visible());
        assert_eq!(app.tooltip.lines()[1], "Average Gun Deaths: 20.00");
        assert_eq!(app.hover.active(), Some(0));
        app.pointer_at(0, 0);
        assert!(!app.tooltip.is_visible());
    }

    #[test]
    fn redraw_hides_tooltip() {
        let (_dir, mut app) = app_with(DATA);
        let area = Rect::new(0, 0, 80, 30);
        app.sync_scene(area);
        let bar = app.scene.bars().next().unwrap().clone();
        app.pointer_at(bar.x.ceil() as u16, bar.y.ceil() as u16 + 1);
        assert!(app.tooltip.is_visible());
        app.sync_scene(Rect::new(0, 0, 90, 30));
        assert!(!app.tooltip.is_visible());
        assert_eq!(app.hover.active(), None);
    }

    #[test]
    fn export_writes_svg() {
        let (dir, mut app) = app_with(DATA);
        app.export_current();
        let out = dir.path().join("out").join("deaths.svg");
        assert!(app.status_msg.starts_with("exported"), "{}", app.status_msg);
        let svg = std::fs::read_to_string(out).unwrap();
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<rect").count(), 10);
    }

    #[test]
    fn watch_event_triggers_reload() {
        let (_dir, mut app) = app_with(DATA);
        let (tx, rx) = std::sync::mpsc::channel();
        app.watch_rx = Some(rx);
        app.poll_watch();
        assert_eq!(app.data_revision, 1);
        tx.send(()).unwrap();
        tx.send(()).unwrap();
        app.poll_watch();
        assert_eq!(app.data_revision, 2);
    }

    #[test]
    fn default_output_uses_stem() {
        assert_eq!(default_output(Path::new("/data/us.json"), "out", "svg"), PathBuf::from("out/us.svg"));
        assert_eq!(default_output(Path::new(""), ".", "json"), PathBuf::from("./histogram.json"));
    }
}
