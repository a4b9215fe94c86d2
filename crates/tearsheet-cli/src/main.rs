use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tearsheet_core::document::HeadlessDocument;
use tearsheet_core::theme::{LayoutPolicy, Theme};
use tearsheet_core::types::{FontName, Point};
use tearsheet_core::{AssetFetcher, FsAssetFetcher};
use tearsheet_pipeline::import_design;
use tearsheet_pipeline::shell::{ShellEvent, ShellNotifier};
use tearsheet_schema::parse_document;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the capture payload (JSON)
    #[arg(value_name = "PAYLOAD")]
    payload: PathBuf,

    /// Directory that relative image sources resolve against
    #[arg(long, default_value = "assets")]
    assets_root: PathBuf,

    /// Hard cap, in milliseconds, on each vector conversion
    #[arg(long, default_value_t = 10_000)]
    raster_timeout_ms: u64,

    /// Skip the rasterization worker; vector sources become placeholders
    #[arg(long)]
    no_raster: bool,

    /// Print the assembled node tree to stdout
    #[arg(long)]
    dump_tree: bool,

    /// Treat FAMILY/STYLE as installed instead of scanning system fonts
    #[arg(long, value_name = "FAMILY/STYLE")]
    available_font: Vec<String>,

    /// Viewport center the board is positioned around, as "x,y"
    #[arg(long, default_value = "0,0")]
    viewport_center: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

/// Mirrors shell events into the log stream; there is no UI surface here.
struct LogNotifier;

impl ShellNotifier for LogNotifier {
    fn notify(&self, event: ShellEvent) {
        match event {
            ShellEvent::ReportVisibility(visible) => {
                debug!(visible, "import surface visibility");
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize Logging
    let filter = EnvFilter::builder()
        .with_default_directive(cli.log_level.to_string().parse().unwrap())
        .from_env_lossy();

    let subscriber_builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false); // Clean output for humans (default)

    match cli.log_format {
        LogFormat::Json => {
            subscriber_builder.json().init();
        }
        LogFormat::Pretty => {
            subscriber_builder.pretty().init();
        }
    }

    if let Err(e) = run(cli) {
        error!("Import failed: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let raw = fs::read_to_string(&cli.payload)
        .with_context(|| format!("reading payload {:?}", cli.payload))?;
    let document = parse_document(&raw).context("payload rejected")?;
    let report = document.report();
    info!(
        version = %report.version,
        url = %report.url,
        colors = report.colors,
        fonts = report.fonts,
        images = report.images,
        "payload accepted"
    );

    let mut backend = HeadlessDocument::new();
    backend.set_viewport_center(parse_point(&cli.viewport_center)?);

    let fonts = if cli.available_font.is_empty() {
        tearsheet_raster::system_fonts()
    } else {
        cli.available_font
            .iter()
            .map(|spec| parse_font_spec(spec))
            .collect::<Result<Vec<_>>>()?
    };
    info!(faces = fonts.len(), "font set ready");
    for font in fonts {
        backend.insert_font(font);
    }

    let fetcher = Arc::new(FsAssetFetcher::new(cli.assets_root.clone()));

    let mut policy = LayoutPolicy::default();
    policy.raster_timeout = Duration::from_millis(cli.raster_timeout_ms);

    // The worker only gets spawned when the payload actually carries
    // vector sources.
    let has_vectors = document
        .units
        .images
        .as_deref()
        .unwrap_or_default()
        .iter()
        .any(|unit| tearsheet_pipeline::is_vector_source(&unit.source));

    let (mut bridge, context) = if has_vectors && !cli.no_raster {
        let (bridge, context) = tearsheet_raster::spawn(
            fetcher.clone() as Arc<dyn AssetFetcher>,
            policy.raster_timeout,
        );
        (Some(bridge), Some(context))
    } else {
        (None, None)
    };

    let summary = import_design(
        &document,
        &mut backend,
        fetcher.as_ref(),
        bridge.as_mut(),
        &LogNotifier,
        &policy,
        &Theme::default(),
    )?;

    drop(bridge);
    if let Some(context) = context {
        context.close();
    }

    if cli.dump_tree {
        print!("{}", backend.dump_tree(summary.root));
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);
    info!("Import complete.");
    Ok(())
}

fn parse_font_spec(spec: &str) -> Result<FontName> {
    match spec.split_once('/') {
        Some((family, style)) => {
            let family = family.trim();
            let style = style.trim();
            if family.is_empty() || style.is_empty() {
                anyhow::bail!("invalid font spec '{spec}', expected FAMILY/STYLE");
            }
            Ok(FontName::new(family, style))
        }
        None => {
            let family = spec.trim();
            if family.is_empty() {
                anyhow::bail!("invalid font spec '{spec}', expected FAMILY/STYLE");
            }
            Ok(FontName::new(family, "Regular"))
        }
    }
}

fn parse_point(raw: &str) -> Result<Point> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| anyhow::anyhow!("invalid viewport center '{raw}', expected \"x,y\""))?;
    Ok(Point::new(
        x.trim().parse::<f32>().context("viewport center x")?,
        y.trim().parse::<f32>().context("viewport center y")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_font_spec() {
        assert_eq!(
            parse_font_spec("Georgia/Book").unwrap(),
            FontName::new("Georgia", "Book")
        );
        assert_eq!(
            parse_font_spec(" Inter / Medium ").unwrap(),
            FontName::new("Inter", "Medium")
        );
        assert_eq!(
            parse_font_spec("Georgia").unwrap(),
            FontName::new("Georgia", "Regular")
        );
        assert!(parse_font_spec("/Bold").is_err());
    }

    #[test]
    fn test_parse_point() {
        let point = parse_point("120.5,-40").unwrap();
        assert_eq!((point.x, point.y), (120.5, -40.0));
        assert!(parse_point("120").is_err());
        assert!(parse_point("a,b").is_err());
    }
}
