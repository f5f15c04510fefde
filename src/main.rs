use clap::{Parser, Subcommand};
use pubmanifest::{config, manifest, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "pubmanifest")]
#[command(about = "Generate the publications manifest from asset folders and books.xlsx")]
#[command(long_about = "\
Generate the publications manifest from asset folders and books.xlsx

The asset folders are the data source. Every volume folder with a cover and
an abstract becomes one manifest entry; the spreadsheet only adds titles,
authors and years.

Asset structure:

  assets/
  ├── books.xlsx                   # Optional metadata (first sheet)
  ├── GLM/                         # Series folder: GLM, GPS, GPT or GRP
  │   └── GLM_06/                  # Volume folder: <SERIES>_<volume>
  │       ├── glm_06_titel.pdf     # Cover (required)
  │       ├── glm_06_abstract.docx # Abstract (required)
  │       └── glm_06_text.pdf      # Full text (optional; also _kern.pdf, _ktext.pdf)
  └── GRP/
      └── GRP_14-15/               # Ranges are fine

Spreadsheet columns (header names are matched loosely):
  Nummer / Number / No / Nr        e.g. GLM6, GRP 14-15 (required)
  Buchtitel / Titel / Title / Name
  Autor / Authors / Editor(s)
  Jahr / Year

Set RUST_LOG=pubmanifest=debug to see why folders or rows were skipped.

Run 'pubmanifest gen-config' to generate a documented pubmanifest.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Project root (holds pubmanifest.toml; other paths are relative to it)
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Assets directory (overrides config)
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    /// Output manifest path (overrides config)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate and write the manifest, printing one summary line (default)
    Build,
    /// Generate the manifest and print the per-series inventory without writing
    Check,
    /// Print a stock pubmanifest.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pubmanifest=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let paths = resolve_paths(&cli.root, cli.assets, cli.output)?;
            let manifest = manifest::build(&paths)?;
            output::print_write_summary(&manifest, &paths.output, &cli.root);
        }
        Command::Check => {
            let paths = resolve_paths(&cli.root, cli.assets, cli.output)?;
            println!("==> Checking {}", paths.assets_root.display());
            let manifest = manifest::generate(&paths)?;
            output::print_manifest_output(&manifest);
            println!("==> {} volumes found", manifest.volumes.len());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config from the root, apply CLI overrides, size the thread pool.
fn resolve_paths(
    root: &std::path::Path,
    assets: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<config::Paths, config::ConfigError> {
    let mut site_config = config::load_config(root)?;
    if let Some(assets) = assets {
        site_config.assets_dir = assets.to_string_lossy().into_owned();
    }
    if let Some(output) = output {
        site_config.output = output.to_string_lossy().into_owned();
    }
    site_config.validate()?;
    init_thread_pool(&site_config.processing);
    Ok(site_config.paths(root))
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
