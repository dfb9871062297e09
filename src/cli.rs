use crate::config::{Config, load_config};
use crate::layout::compute_layout;
use crate::layout_dump::{layout_dump_json, write_layout_dump};
use crate::logging::init_logging;
use crate::mount::{DataSource, FileSource, MountOutcome, mount};
use crate::parser::parse_timeline;
use crate::render::{render_svg, write_output_svg, write_output_text};
use crate::surface::HtmlDocument;
use crate::error::TimelineError;
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use log::info;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "lifeline", version, about = "Render a compressed life/career timeline")]
pub struct Args {
    /// Input timeline JSON file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for text formats if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, timeline)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Day positions are measured from (YYYY-MM-DD)
    #[arg(long = "reference-date")]
    pub reference_date: Option<NaiveDate>,

    /// Log level written to stderr
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Html,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level).map_err(|err| anyhow::anyhow!(err))?;

    let mut config = load_config(args.config.as_deref())?;
    apply_args(&mut config, &args);

    let source = InputSource::new(args.input.clone());
    match args.output_format {
        OutputFormat::Html => render_html(&source, &config, args.output.as_deref()),
        format => {
            let timeline = parse_timeline(&source.fetch()?)?;
            let layout = compute_layout(&timeline, &config.theme, &config.layout);
            info!(
                "laid out {} events in {} groups",
                layout.markers.len(),
                layout.groups.len()
            );
            match format {
                OutputFormat::Json => match args.output.as_deref() {
                    Some(path) => write_layout_dump(path, &layout, &timeline),
                    None => write_output_text(&layout_dump_json(&layout, &timeline)?, None),
                },
                OutputFormat::Png => {
                    let svg = render_svg(&timeline, &layout, &config.theme, &config.layout, &config.render);
                    let output = ensure_output(&args.output, "png")?;
                    write_png(&svg, &output, &config)
                }
                _ => {
                    let svg = render_svg(&timeline, &layout, &config.theme, &config.layout, &config.render);
                    write_output_svg(&svg, args.output.as_deref())
                }
            }
        }
    }
}

fn apply_args(config: &mut Config, args: &Args) {
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if let Some(date) = args.reference_date {
        config.layout.reference_date = date;
    }
}

/// Renders through the page surface, the same way a browser host would.
fn render_html(source: &InputSource, config: &Config, output: Option<&Path>) -> Result<()> {
    let mut doc = HtmlDocument::timeline_scaffold(
        config.render.width as f64,
        config.render.height as f64,
        config.layout.marker_size,
    );
    match mount(&mut doc, source, &config.theme, &config.layout) {
        MountOutcome::Mounted(_) => write_output_text(&doc.to_html(), output),
        MountOutcome::Aborted(err) => Err(err.into()),
        MountOutcome::NotPresent => Err(anyhow::anyhow!("timeline scaffold is missing containers")),
    }
}

struct InputSource {
    file: Option<FileSource>,
}

impl InputSource {
    fn new(path: Option<PathBuf>) -> Self {
        let file = path.filter(|path| path != Path::new("-")).map(FileSource::new);
        Self { file }
    }
}

impl DataSource for InputSource {
    fn fetch(&self) -> crate::error::Result<String> {
        if let Some(file) = &self.file {
            return file.fetch();
        }
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|err| TimelineError::Fetch(format!("stdin: {err}")))?;
        Ok(buf)
    }
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render, &config.theme)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "lifeline",
            "-i",
            "data/timeline.json",
            "-e",
            "html",
            "--reference-date",
            "2025-12-31",
            "-w",
            "900",
        ])
        .unwrap();
        assert_eq!(args.output_format, OutputFormat::Html);
        assert_eq!(args.reference_date, NaiveDate::from_ymd_opt(2025, 12, 31));

        let mut config = Config::default();
        apply_args(&mut config, &args);
        assert_eq!(config.render.width, 900.0);
        assert_eq!(config.render.height, Config::default().render.height);
        assert_eq!(config.layout.reference_date, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn dash_means_stdin() {
        assert!(InputSource::new(Some(PathBuf::from("-"))).file.is_none());
        assert!(InputSource::new(Some(PathBuf::from("t.json"))).file.is_some());
    }

    #[test]
    fn png_needs_output_path() {
        assert!(ensure_output(&None, "png").is_err());
    }
}
