use anyhow::{Result, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tinychart::viz_plotters_adapter::PlottersSurface;
use tinychart::{
    ChartError, ChartSpec, ModeSet, RecordingSurface, Region, RegionReport, RegionStatus,
    RenderOptions, SpecRegistry, storage, viz,
};

#[derive(Parser, Debug)]
#[command(
    name = "tinychart",
    version,
    about = "Lay out and render small multi-series charts (bars, stacked bars, dots, lines, curves)"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one chart to an SVG or PNG file.
    Render(RenderArgs),
    /// Render every region of a manifest against a spec registry.
    Batch(BatchArgs),
    /// Print the computed layout and the drawing operations as JSON.
    Inspect(InspectArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    fn extension(self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
        }
    }
}

#[derive(Args, Debug)]
struct SpecArgs {
    /// Chart spec: a spec JSON, a registry JSON (with --id) or a CSV table.
    #[arg(short, long)]
    spec: PathBuf,
    /// Which spec to use when --spec is a registry.
    #[arg(long)]
    id: Option<String>,
    /// Title for CSV input.
    #[arg(long, default_value = "")]
    title: String,
    /// Colors for CSV input, axis color first (e.g. "black,cyan,#ff8800").
    #[arg(long)]
    colors: Option<String>,
    /// Render modes separated by spaces or commas (bars, stacked-bars, dots, lines, bezier).
    #[arg(short, long, default_value = "bars")]
    modes: String,
    /// Width of the chart (default 800).
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Height of the chart (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Locale for tick labels (e.g. en, de, fr).
    #[arg(long)]
    locale: Option<String>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    spec: SpecArgs,
    /// Output path (.svg or .png).
    #[arg(short, long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Spec registry JSON (`{"region id": spec, ...}`).
    #[arg(long)]
    specs: PathBuf,
    /// Region manifest JSON (`[{"id", "width", "height", "modes"}, ...]`).
    #[arg(long)]
    regions: PathBuf,
    /// Directory for the rendered charts, one file per region.
    #[arg(long)]
    out_dir: PathBuf,
    #[arg(long, value_enum, default_value_t = ImageFormat::Svg)]
    format: ImageFormat,
    /// Locale for tick labels (e.g. en, de, fr).
    #[arg(long)]
    locale: Option<String>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    spec: SpecArgs,
}

/// Split a color list on commas that are not inside `rgb(...)`.
fn parse_colors(s: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut cur = String::new();
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' | ';' if depth == 0 => {
                out.push(std::mem::take(&mut cur));
                continue;
            }
            _ => {}
        }
        cur.push(c);
    }
    out.push(cur);
    out.into_iter()
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn options(locale: Option<String>) -> RenderOptions {
    RenderOptions { locale }
}

fn load_spec(args: &SpecArgs) -> Result<ChartSpec> {
    let is_csv = args
        .spec
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        let colors = args.colors.as_deref().map(parse_colors).unwrap_or_default();
        storage::load_spec_csv(&args.spec, &args.title, &colors)
    } else {
        storage::load_spec_or_registry(&args.spec, args.id.as_deref())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Batch(args) => cmd_batch(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let spec = load_spec(&args.spec)?;
    let modes: ModeSet = args.spec.modes.parse()?;
    let opts = options(args.spec.locale.clone());
    let layout = viz::plot_chart(
        &spec,
        modes,
        &args.out,
        args.spec.width,
        args.spec.height,
        &opts,
    )?;
    log::info!(
        "domain [{}, {}] step {}",
        layout.domain.y_min,
        layout.domain.y_max,
        layout.domain.step
    );
    eprintln!("Wrote chart to {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> Result<()> {
    let spec = load_spec(&args.spec)?;
    let modes: ModeSet = args.spec.modes.parse()?;
    let opts = options(args.spec.locale.clone());
    let mut surface = RecordingSurface::new(args.spec.width as f64, args.spec.height as f64);
    let layout = tinychart::render_chart_with(&mut surface, &spec, modes, &opts)?;
    let doc = serde_json::json!({
        "layout": layout,
        "ops": surface.ops(),
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

/// File name for a region: its id with anything unusual replaced.
fn region_file_name(id: &str, format: ImageFormat) -> String {
    let stem: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{stem}.{}", format.extension())
}

fn surface_error<E: std::fmt::Debug>(e: E) -> ChartError {
    ChartError::Surface(format!("{:?}", e))
}

fn output_path<'p>(
    paths: &'p HashMap<String, PathBuf>,
    r: &Region,
) -> Result<&'p Path, ChartError> {
    paths
        .get(&r.id)
        .map(PathBuf::as_path)
        .ok_or_else(|| ChartError::Surface(format!("no output path for `{}`", r.id)))
}

fn render_batch(
    regions: &[Region],
    registry: &SpecRegistry,
    paths: &HashMap<String, PathBuf>,
    format: ImageFormat,
    opts: &RenderOptions,
) -> Vec<RegionReport> {
    match format {
        ImageFormat::Svg => tinychart::host::render_regions_with(
            regions,
            registry,
            |r| {
                let path = output_path(paths, r)?;
                let root = SVGBackend::new(path, (r.width, r.height)).into_drawing_area();
                root.fill(&WHITE).map_err(surface_error)?;
                Ok(PlottersSurface::new(root))
            },
            opts,
        ),
        ImageFormat::Png => tinychart::host::render_regions_with(
            regions,
            registry,
            |r| {
                let path = output_path(paths, r)?;
                let root = BitMapBackend::new(path, (r.width, r.height)).into_drawing_area();
                root.fill(&WHITE).map_err(surface_error)?;
                Ok(PlottersSurface::new(root))
            },
            opts,
        ),
    }
}

fn cmd_batch(args: BatchArgs) -> Result<()> {
    let registry = storage::load_registry_json(&args.specs)?;
    let regions = storage::load_regions_json(&args.regions)?;
    std::fs::create_dir_all(&args.out_dir)
        .map_err(|e| anyhow!("creating {}: {e}", args.out_dir.display()))?;

    let paths: HashMap<String, PathBuf> = regions
        .iter()
        .map(|r| {
            (
                r.id.clone(),
                args.out_dir.join(region_file_name(&r.id, args.format)),
            )
        })
        .collect();
    let opts = options(args.locale.clone());
    let reports = render_batch(&regions, &registry, &paths, args.format, &opts);

    let mut failed = 0usize;
    for report in &reports {
        match &report.status {
            RegionStatus::Rendered(_) => {
                let path = paths.get(&report.id).map(|p| p.display().to_string());
                println!("rendered {} -> {}", report.id, path.unwrap_or_default());
            }
            RegionStatus::Skipped => println!("skipped {} (no chart spec)", report.id),
            RegionStatus::Failed(e) => {
                failed += 1;
                println!("failed {}: {e}", report.id);
            }
        }
    }
    if failed > 0 {
        bail!("{failed} of {} region(s) failed", reports.len());
    }
    Ok(())
}
