use clap::{Parser, Subcommand};
use postpress::{config, generate, output, scan};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "postpress")]
#[command(about = "Static site generator for a personal technical blog")]
#[command(long_about = "\
Static site generator for a personal technical blog

Articles are markdown files with a short header. The site gets a landing
page with a hero banner, a post index, one page per article and an RSS feed.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── posts/
  │   ├── scala-101.md             # /posts/scala-101/
  │   ├── python-generators.mdx    # MDX: import/export lines are dropped
  │   ├── type-classes/
  │   │   └── index.md             # /posts/type-classes/
  │   └── _draft.md                # Leading underscore = skipped
  └── public/                      # Copied to the output root unchanged
      └── assets/images/avatar.png

Article header:

  ---
  title: Scala 101                 # required
  pubDate: 2024-02-18              # required
  description: Learn the very basics of Scala 3
  imgSrc: /assets/images/articles/scala-101-1.png
  imgAlt: Scala logo
  ---

Run 'postpress gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".postpress-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the final HTML site from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let report = run_generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&report);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let manifest_path = write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            init_thread_pool(&manifest.config.processing);
            let report = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Serialize the scan manifest into the temp directory.
fn write_manifest(manifest: &scan::Manifest, temp_dir: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&manifest_path, json)?;
    Ok(manifest_path)
}

/// Standalone generate: the thread pool size comes from the manifest's config.
fn run_generate(
    manifest_path: &Path,
    source: &Path,
    output_dir: &Path,
) -> Result<generate::GenerateReport, Box<dyn std::error::Error>> {
    let manifest_content = std::fs::read_to_string(manifest_path)?;
    let manifest: scan::Manifest = serde_json::from_str(&manifest_content)?;
    init_thread_pool(&manifest.config.processing);
    Ok(generate::generate_from_manifest(&manifest, source, output_dir)?)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
