mod tui;

use clap::{CommandFactory, Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use drawdiff_common::Config;
use drawdiff_core::{
    export_json, export_svg, histogram_json, print_summary, ChartLayout, ChartSettings,
    Dataset, DifficultyTable, HistogramChart,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io,
    path::{Path, PathBuf},
    sync::mpsc,
    time::Duration,
};
use tracing_subscriber::EnvFilter;
use tui::app::{default_output, pixel_scene, App};
use tui::events::{handle_key, handle_mouse};
use tui::ui::render;

#[derive(Parser)]
#[command(name = "drawdiff", version, about = "Histogram of region counts by drawing difficulty")]
struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chart in the terminal
    View {
        path: PathBuf,
        /// Reload when the file changes
        #[arg(long)] watch: bool,
    },
    /// Print the bins as a table
    Summary { path: PathBuf, #[arg(long)] save: bool },
    /// Write the chart as SVG or the bins as JSON
    Export {
        path: PathBuf,
        #[arg(long)] format: Option<String>,
        #[arg(long)] output: Option<PathBuf>,
        #[arg(long)] width: Option<u32>,
        #[arg(long)] height: Option<u32>,
    },
    /// Print shell completions
    Completions { shell: clap_complete::Shell },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let to_file = matches!(cli.command, Commands::View { .. });
    setup_logging(cli.verbose, cli.quiet, to_file);
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("config ignored: {e}");
            Config::default()
        }
    };
    match cli.command {
        Commands::View { path, watch } => run_view(path, watch, config)?,
        Commands::Summary { path, save } => run_summary(&path, save, &config)?,
        Commands::Export { path, format, output, width, height } => {
            run_export(&path, format, output, width, height, config)?
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "drawdiff", &mut io::stdout());
        }
    }
    Ok(())
}

/// `info` by default. The interactive view writes to a log file so the
/// alternate screen is left alone.
fn setup_logging(verbose: bool, quiet: bool, to_file: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    if to_file {
        let dir = dirs::cache_dir().unwrap_or_else(|| PathBuf::from(".")).join("drawdiff");
        let file = std::fs::create_dir_all(&dir)
            .and_then(|_| std::fs::OpenOptions::new().create(true).append(true).open(dir.join("drawdiff.log")));
        if let Ok(file) = file {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        return;
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();
}

fn build_chart(config: &Config, layout: ChartLayout) -> anyhow::Result<HistogramChart> {
    let table = DifficultyTable::from_config(&config.difficulty, config.chart.fallback_difficulty)
        .map_err(|e| anyhow::anyhow!("difficulty table: {e}"))?;
    Ok(HistogramChart::new(table, ChartSettings::from_config(&config.chart, layout)))
}

fn load(path: &Path) -> anyhow::Result<Dataset> {
    Dataset::from_path(path).map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))
}

fn run_view(input_path: PathBuf, watch: bool, config: Config) -> anyhow::Result<()> {
    let chart = build_chart(&config, ChartLayout::cells())?;
    let mut app = App::new(input_path, config, chart);
    app.reload();
    // keep the watcher alive for the whole session
    let _watcher = if watch {
        let (tx, rx) = mpsc::channel();
        let w = watch_file(&app.input_path, tx)?;
        app.watch_rx = Some(rx);
        Some(w)
    } else {
        None
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> anyhow::Result<()> {
    let tick = Duration::from_millis(66); // 15Hz
    loop {
        app.poll_watch();
        terminal.draw(|f| render(f, app))?;
        if event::poll(tick)? {
            match event::read()? {
                Event::Key(key) => handle_key(app, key),
                Event::Mouse(mouse) => handle_mouse(app, mouse),
                _ => {}
            }
        }
        if app.should_quit { return Ok(()); }
    }
}

fn watch_file(path: &Path, tx: mpsc::Sender<()>) -> anyhow::Result<notify::RecommendedWatcher> {
    use notify::{RecursiveMode, Watcher};
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| match res {
        Ok(ev) if ev.kind.is_modify() || ev.kind.is_create() => {
            let _ = tx.send(());
        }
        Ok(_) => {}
        Err(e) => tracing::warn!("watch error: {e}"),
    })?;
    watcher.watch(path, RecursiveMode::NonRecursive)?;
    tracing::info!(path = %path.display(), "watching for changes");
    Ok(watcher)
}

fn run_summary(input_path: &Path, save: bool, config: &Config) -> anyhow::Result<()> {
    let dataset = load(input_path)?;
    let chart = build_chart(config, ChartLayout::pixels())?;
    let hist = chart.histogram(&dataset.states);
    print_summary(&hist);
    if save {
        let out_dir = Path::new(&config.export.output_dir);
        std::fs::create_dir_all(out_dir)?;
        let out_path = out_dir.join("summary.json");
        std::fs::write(&out_path, serde_json::to_string_pretty(&histogram_json(&hist))?)?;
        println!("Summary saved to {}", out_path.display());
    }
    Ok(())
}

fn run_export(
    input_path: &Path,
    format: Option<String>,
    output: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
    mut config: Config,
) -> anyhow::Result<()> {
    if let Some(w) = width { config.export.width = w; }
    if let Some(h) = height { config.export.height = h; }
    config.validate().map_err(|e| anyhow::anyhow!("{e}"))?;
    let format = format.unwrap_or_else(|| config.export.format.clone());
    let dataset = load(input_path)?;
    let chart = build_chart(&config, ChartLayout::pixels())?;
    let out_path = output.unwrap_or_else(|| default_output(input_path, &config.export.output_dir, &format));
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() { std::fs::create_dir_all(parent)?; }
    }
    match format.as_str() {
        "svg" => {
            let scene = pixel_scene(&chart, &dataset, &config.export);
            export_svg(&out_path, &scene).map_err(|e| anyhow::anyhow!("{e}"))?;
        }
        "json" => {
            export_json(&out_path, &chart.histogram(&dataset.states)).map_err(|e| anyhow::anyhow!("{e}"))?;
        }
        _ => anyhow::bail!("Unknown format: {format} (use svg or json)"),
    }
    println!("Exported to {}", out_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["drawdiff", "-v", "export", "d.json", "--format", "json", "--width", "400"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Export { format, width, height, .. } => {
                assert_eq!(format.as_deref(), Some("json"));
                assert_eq!(width, Some(400));
                assert_eq!(height, None);
            }
            _ => panic!("expected export"),
        }
        assert!(Cli::try_parse_from(["drawdiff", "-v", "-q", "summary", "d.json"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn export_writes_svg_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("us.json");
        std::fs::write(&input, r#"{"states":[{"abreviation":"CO","count":4},{"abreviation":"MD","count":8}]}"#).unwrap();
        let mut config = Config::default();
        config.export.output_dir = dir.path().to_string_lossy().into_owned();
        run_export(&input, None, None, None, None, config.clone()).unwrap();
        let svg = std::fs::read_to_string(dir.path().join("us.svg")).unwrap();
        assert!(svg.contains("width=\"960\""));
        let out = dir.path().join("bins.json");
        run_export(&input, Some("json".into()), Some(out.clone()), None, None, config.clone()).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert!(doc.is_object() || doc.is_array());
        assert!(run_export(&input, Some("png".into()), None, None, None, config.clone()).is_err());
        assert!(run_export(&input, None, None, Some(0), None, config).is_err());
    }

    #[test]
    fn summary_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("us.json");
        std::fs::write(&input, r#"{"states":[{"abreviation":"CO","count":4}]}"#).unwrap();
        let mut config = Config::default();
        config.export.output_dir = dir.path().join("out").to_string_lossy().into_owned();
        run_summary(&input, true, &config).unwrap();
        assert!(dir.path().join("out").join("summary.json").exists());
        assert!(run_summary(&dir.path().join("missing.json"), false, &config).is_err());
    }
}
