use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use candlewick::config::Settings;
use candlewick::data::duration::{format_duration, parse_duration};
use candlewick::data::{Candle, QuoteSnapshot, Row, SeriesHistory};
use candlewick::live::{AnsiTerminal, RedrawLoop, Shutdown, StreamPrinter};
use candlewick::source::{read_json, FileSource, QuoteSource, TradeStream};
use candlewick::ui::candlestick::GRID_OFFSET;
use candlewick::ui::format::fmt_price;
use candlewick::ui::rule::spinner_frame;
use candlewick::ui::scale::finite_bounds;
use candlewick::ui::tape::{closing_line, missing_quote_line, quote_line, summary_line, trade_line};
use candlewick::ui::{
    sparkline, terminal_width, CandleChart, ColorMode, Column, Intent, Panel, ProgressBar, Table,
    Theme,
};

#[derive(Parser, Debug)]
#[command(name = "candlewick")]
#[command(about = "Render market data as terminal charts, tables and live views")]
struct Args {
    /// Settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// When to emit color; overrides the settings file
    #[arg(long, global = true, value_enum)]
    color: Option<ColorMode>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Candlestick chart from a JSON array of candles
    Chart {
        /// Path to candles.json
        #[arg(short, long)]
        file: PathBuf,

        /// Chart rows (defaults to `chart_height` from settings)
        #[arg(long)]
        height: Option<usize>,

        /// Panel title (defaults to the file name)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Sparkline from a list of numbers
    Spark {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,

        #[arg(short, long, default_value_t = 40)]
        width: usize,
    },

    /// Progress bar for a percentage
    Bar {
        #[arg(allow_negative_numbers = true)]
        percent: f64,

        #[arg(short, long, default_value_t = 30)]
        width: usize,

        /// Caption shown before the bar
        #[arg(long)]
        label: Option<String>,
    },

    /// Table from a JSON array of objects
    Table {
        /// Path to rows.json
        #[arg(short, long)]
        file: PathBuf,

        /// Column as key:width[:right][:Label]; repeat in display order
        #[arg(short, long = "column", required = true)]
        columns: Vec<String>,

        #[arg(short, long)]
        title: Option<String>,
    },

    /// Redraw a price watch in place from a quote file
    Watch {
        /// Path to quotes.json
        #[arg(short, long)]
        file: PathBuf,

        /// Refresh interval (e.g. "5s", "500ms"); defaults to `refresh` from settings
        #[arg(short, long)]
        interval: Option<String>,
    },

    /// Print newline-delimited JSON trades from stdin as a live tape
    Stream {
        /// Skip trades below this value
        #[arg(long, default_value_t = 0.0)]
        min: f64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(color) = args.color {
        settings.color = color;
    }
    let theme = settings.theme();
    debug!(?settings, color = theme.has_color(), "settings loaded");

    match args.command {
        Command::Chart {
            file,
            height,
            title,
        } => run_chart(&file, height, title, &settings, &theme),
        Command::Spark { values, width } => {
            println!("  {}", sparkline(&values, width, &theme));
            Ok(())
        }
        Command::Bar {
            percent,
            width,
            label,
        } => {
            let bar = ProgressBar::new(width).render(percent, &theme);
            match label {
                Some(label) => println!("  {}  {bar}", theme.paint(Intent::Muted, label)),
                None => println!("  {bar}"),
            }
            Ok(())
        }
        Command::Table {
            file,
            columns,
            title,
        } => run_table(&file, &columns, title, &settings, &theme),
        Command::Watch { file, interval } => run_watch(&file, interval.as_deref(), &settings, theme),
        Command::Stream { min } => run_stream(min, &settings, theme),
    }
}

/// Log to stderr so frames on stdout stay intact. `RUST_LOG` overrides the
/// default `warn` level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn panel(settings: &Settings, title: impl Into<String>) -> Panel {
    Panel::new(terminal_width())
        .max_width(settings.panel_max_width)
        .title(title)
        .overflow(settings.overflow)
}

fn file_title(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn run_chart(
    file: &Path,
    height: Option<usize>,
    title: Option<String>,
    settings: &Settings,
    theme: &Theme,
) -> Result<()> {
    let candles: Vec<Candle> = read_json(file)?;
    info!(count = candles.len(), "candles loaded");

    let panel = panel(settings, title.unwrap_or_else(|| file_title(file)));
    let chart = CandleChart::new(
        panel.content_width().saturating_sub(GRID_OFFSET),
        height.unwrap_or(settings.chart_height),
    );

    println!();
    if !candles.is_empty() {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        println!(
            "  {} {}  {}",
            theme.paint(Intent::Muted, "Trend:"),
            sparkline(&closes, 40, theme),
            theme.paint(Intent::Muted, format!("({} candles)", candles.len()))
        );
        println!();
    }

    println!("{}", panel.render(&chart.render(&candles, theme), theme));

    let finite = candles.iter().filter(|c| c.is_finite());
    let range = finite_bounds(finite.clone().flat_map(|c| [c.low, c.high]));
    if let (Some((low, high)), Some(last)) = (range, finite.last()) {
        let pct = if high > low {
            (last.close - low) / (high - low) * 100.0
        } else {
            100.0
        };
        println!(
            "  {} {} {} {}",
            theme.paint(Intent::Muted, "Range:"),
            fmt_price(Some(low), theme),
            ProgressBar::new(24).label(false).render(pct, theme),
            fmt_price(Some(high), theme)
        );
    }
    println!();
    Ok(())
}

fn run_table(
    file: &Path,
    column_defs: &[String],
    title: Option<String>,
    settings: &Settings,
    theme: &Theme,
) -> Result<()> {
    let columns = column_defs
        .iter()
        .map(|def| Column::parse(def))
        .collect::<Result<Vec<_>>>()?;
    let rows: Vec<Row> = read_json(file)?;
    info!(rows = rows.len(), columns = columns.len(), "table loaded");

    let table = Table::new(columns).overflow(settings.overflow);
    let panel = panel(settings, title.unwrap_or_else(|| file_title(file)));
    println!("{}", panel.render(&table.render(&rows, theme), theme));
    Ok(())
}

/// State carried between watch frames.
#[derive(Debug)]
struct WatchView {
    source: FileSource,
    history: SeriesHistory,
    symbols: BTreeSet<String>,
    latest: Option<QuoteSnapshot>,
}

impl WatchView {
    fn new(source: FileSource, history_cap: usize) -> Self {
        Self {
            source,
            history: SeriesHistory::new(history_cap),
            symbols: BTreeSet::new(),
            latest: None,
        }
    }

    /// Poll the source and build the frame for `tick`.
    ///
    /// Every tick records each symbol's current price, so sparklines advance
    /// even when the file has not changed. Symbols that drop out of the file
    /// stay listed as errors.
    fn frame(&mut self, tick: u64, now: &str, theme: &Theme) -> Vec<String> {
        if let Some(snapshot) = self.source.poll() {
            self.symbols.extend(snapshot.keys().cloned());
            self.latest = Some(snapshot);
        }

        let mut lines = vec![
            String::new(),
            theme.paint(Intent::Muted, format!("  Last update: {now}  Tick #{tick}")),
            String::new(),
        ];

        match &self.latest {
            None => lines.push(spinner_frame(
                tick,
                &format!("Waiting for {}", self.source.description()),
                theme,
            )),
            Some(snapshot) => {
                for symbol in &self.symbols {
                    match snapshot.get(symbol) {
                        Some(quote) => {
                            self.history.record(symbol, quote.current_price);
                            lines.push(quote_line(symbol, quote, &self.history, theme));
                        }
                        None => lines.push(missing_quote_line(symbol, theme)),
                    }
                }
            }
        }

        if let Some(error) = self.source.error() {
            lines.push(String::new());
            lines.push(theme.paint(Intent::Negative, format!("  {error}")));
        }
        lines
    }
}

fn run_watch(file: &Path, interval: Option<&str>, settings: &Settings, theme: Theme) -> Result<()> {
    let interval = match interval {
        Some(s) => parse_duration(s).context("invalid --interval")?,
        None => settings.refresh_interval()?,
    };
    info!(file = %file.display(), interval = %format_duration(interval), "starting watch");

    let mut view = WatchView::new(FileSource::new(file), settings.history_cap);
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let (shutdown, signal) = Shutdown::new();
        shutdown.trigger_on_ctrl_c();

        let mut redraw = RedrawLoop::new(AnsiTerminal::stdout(), interval, theme.clone());
        let ticks = redraw
            .run(
                |tick| {
                    let now = Local::now().format("%H:%M:%S").to_string();
                    Ok(view.frame(tick, &now, &theme))
                },
                signal,
            )
            .await?;

        debug!(ticks, "watch stopped");
        println!("{}", theme.paint(Intent::Muted, "\n  Stopped watching.\n"));
        Ok::<_, anyhow::Error>(())
    })
}

fn run_stream(min: f64, settings: &Settings, theme: Theme) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(async {
        let (shutdown, signal) = Shutdown::new();
        shutdown.trigger_on_ctrl_c();

        let stream = TradeStream::spawn(tokio::io::stdin(), "stdin");
        info!(source = stream.description(), min, "starting trade stream");

        println!();
        println!(
            "  {}  {}",
            theme.paint(Intent::Emphasis, "Live trades"),
            theme.paint(Intent::Muted, format!("min {}  (Ctrl-C to stop)", fmt_price(Some(min), &Theme::plain())))
        );
        println!();

        let mut printer = StreamPrinter::new(AnsiTerminal::stdout())
            .summary_every(settings.summary_every)
            .min_amount(min);
        let tally = printer
            .run(
                stream.into_receiver(),
                |trade| trade_line(trade, &theme),
                |tally| summary_line(tally, &theme),
                signal,
            )
            .await?;

        println!();
        println!("{}", closing_line(&tally, &theme));
        Ok::<_, anyhow::Error>(())
    });

    // stdin reads block a runtime thread; don't wait for them.
    rt.shutdown_background();
    result
}
