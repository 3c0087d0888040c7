use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use svgasset::{
    BuildOptions, CATALOG_EXTENSION, Catalog, CatalogBuilder, CatalogError, InkscapeConverter,
    ResvgConverter, SVG_EXTENSION, SvgConverter, TracingObserver,
};

/// Build an asset catalog from a directory of SVG files.
#[derive(Parser, Debug)]
#[command(name = "createcatalog", version)]
struct Cli {
    /// Output directory for the asset catalog (must end in .xcassets).
    #[arg(long)]
    out: PathBuf,

    /// Path to the SVG to use as the app icon.
    #[arg(long)]
    appicon: Option<PathBuf>,

    /// Regenerate every image regardless of modification times.
    #[arg(long)]
    force: bool,

    /// Convert spaces in group and image set names into underscores.
    #[arg(long)]
    sanitize: bool,

    /// Rasterize independent image sets concurrently.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for --parallel.
    #[arg(long, requires = "parallel")]
    threads: Option<usize>,

    /// Skip SVG files that fail to parse instead of aborting.
    #[arg(long)]
    keep_going: bool,

    /// Rasterizer to use.
    #[arg(long, value_enum, default_value_t = Renderer::Resvg)]
    renderer: Renderer,

    /// Inkscape executable used by `--renderer inkscape`.
    #[arg(long, default_value = "inkscape")]
    inkscape: PathBuf,

    /// Print progress.
    #[arg(short, long)]
    verbose: bool,

    /// Source directory.
    src: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Renderer {
    Resvg,
    Inkscape,
}

// Exit status reserved for a missing external rasterizer. Usage errors exit with 1.
const EXIT_MISSING_TOOL: u8 = 2;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = validate(&cli) {
        eprintln!("error: {e}");
        eprintln!("Usage: createcatalog --out <path/to/Catalog.xcassets> <src>");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let missing_tool = e
                .downcast_ref::<CatalogError>()
                .is_some_and(CatalogError::is_missing_tool);
            eprintln!("error: {e:#}");
            if missing_tool {
                ExitCode::from(EXIT_MISSING_TOOL)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn validate(cli: &Cli) -> anyhow::Result<()> {
    let is_catalog = cli
        .out
        .extension()
        .is_some_and(|e| e == CATALOG_EXTENSION);
    if !is_catalog {
        anyhow::bail!(
            "unsupported output directory '{}' (must end in .{CATALOG_EXTENSION})",
            cli.out.display()
        );
    }
    if !cli.src.is_dir() {
        anyhow::bail!("input directory '{}' does not exist", cli.src.display());
    }
    if let Some(icon) = &cli.appicon {
        if icon.extension().is_none_or(|e| e != SVG_EXTENSION) {
            anyhow::bail!("app icon '{}' is not an svg file", icon.display());
        }
        if !icon.is_file() {
            anyhow::bail!("app icon '{}' does not exist", icon.display());
        }
    }
    Ok(())
}

fn make_converter(cli: &Cli) -> anyhow::Result<Box<dyn SvgConverter>> {
    match cli.renderer {
        Renderer::Resvg => Ok(Box::new(ResvgConverter::new())),
        Renderer::Inkscape => {
            let inkscape = InkscapeConverter::new(&cli.inkscape);
            if !inkscape.is_available() {
                return Err(CatalogError::missing_tool(format!(
                    "{} not installed. inkscape (https://inkscape.org/) is needed to convert SVG files",
                    cli.inkscape.display()
                ))
                .into());
            }
            Ok(Box::new(inkscape))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let converter = make_converter(&cli)?;
    let opts = BuildOptions {
        force: cli.force,
        sanitize: cli.sanitize,
        parallel: cli.parallel,
        threads: cli.threads,
        continue_on_error: cli.keep_going,
    };

    let catalog = Catalog::open(&cli.out)?;
    let mut builder =
        CatalogBuilder::new(catalog, opts)?.with_observer(Arc::new(TracingObserver));

    let report = builder
        .add_svgs(&cli.src)
        .with_context(|| format!("scan '{}'", cli.src.display()))?;
    for (path, err) in &report.failed {
        eprintln!("warning: skipped {}: {err}", path.display());
    }
    if let Some(icon) = &cli.appicon {
        builder
            .add_app_icon_svg(icon)
            .with_context(|| format!("app icon '{}'", icon.display()))?;
    }

    let stats = builder.write(converter.as_ref())?;
    eprintln!(
        "wrote {} ({} regenerated, {} up to date, {} images)",
        cli.out.display(),
        report.regenerated.len(),
        report.up_to_date.len(),
        stats.tasks_run
    );
    Ok(())
}
