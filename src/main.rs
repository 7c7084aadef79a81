use clap::{Parser, Subcommand};
use env_logger::Env;
use gitbook2mkdocs::convert::{self, NavOutcome};
use gitbook2mkdocs::{config, nav, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("G2M_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("G2M_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "gitbook2mkdocs")]
#[command(about = "Convert a GitBook tree into an MkDocs tree")]
#[command(long_about = "\
Convert a GitBook tree into an MkDocs tree

The source tree is copied to the target, GitBook markup in every page is
rewritten for MkDocs Material, SUMMARY.md becomes one .nav.yml file per
directory for the awesome-nav plugin, and uploaded assets are copied under
short names.

Source structure:

  src/
  ├── gitbook2mkdocs.toml          # Converter config (optional)
  ├── SUMMARY.md                   # Outline → .nav.yml files
  ├── README.md                    # Root pages (only .md is copied at the root)
  ├── .gitbook/assets/             # Uploads → docs/assets/, renamed image-N.ext
  └── guide/
      ├── README.md                # Directory index
      └── draft.md                 # `hidden: true` frontmatter → draft.hidden.md

The asset rename map is written to src/assets.json. Files under the extra
directory (default: extra/, relative to the working directory) are copied
over the result last.

Set RUST_LOG=debug for per-file detail.

Run 'gitbook2mkdocs gen-config' to generate a documented config file.")]
#[command(version = version_string())]
struct Cli {
    /// GitBook source directory
    #[arg(long, default_value = "src", global = true)]
    source: PathBuf,

    /// MkDocs target directory (deleted and rebuilt)
    #[arg(long, default_value = "docs", global = true)]
    target: PathBuf,

    /// Only print warnings and errors
    #[arg(long, global = true)]
    silent: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full conversion: copy → rewrite → navigation → assets → extra
    Convert {
        /// Skip generating .nav.yml files
        #[arg(long)]
        no_nav: bool,
    },
    /// Only write .nav.yml files from SUMMARY.md into the target
    Nav,
    /// Parse SUMMARY.md and show the navigation without writing anything
    Check,
    /// Print a stock gitbook2mkdocs.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let default_level = if cli.silent { "warn" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    // Stage headers go to stdout and follow --silent; diagnostics go through log.
    let stage = |message: String| {
        if !cli.silent {
            println!("==> {message}");
        }
    };

    match cli.command {
        Command::Convert { no_nav } => {
            let config = config::load_config(&cli.source)?;
            stage(format!(
                "Converting {} \u{2192} {}",
                cli.source.display(),
                cli.target.display()
            ));
            let report = convert::convert(&cli.source, &cli.target, &config, !no_nav)?;
            if !cli.silent {
                output::print_convert_report(&report, &cli.source, &cli.target);
            }
            stage(format!("Conversion complete: {}", cli.target.display()));
        }
        Command::Nav => {
            let config = config::load_config(&cli.source)?;
            stage(format!(
                "Writing navigation {} \u{2192} {}",
                cli.source.join(&config.nav.summary_file).display(),
                cli.target.display()
            ));
            match convert::generate_nav_files(&cli.source, &cli.target, &config)? {
                NavOutcome::Emitted { report, .. } => {
                    if !cli.silent {
                        output::print_emit_report(&report, &cli.target);
                    }
                    if !report.failures.is_empty() {
                        return Err(format!(
                            "{} navigation files could not be written",
                            report.failures.len()
                        )
                        .into());
                    }
                }
                NavOutcome::MissingOutline(path) => {
                    return Err(format!("{} not found", path.display()).into());
                }
                NavOutcome::Disabled => {}
            }
        }
        Command::Check => {
            let config = config::load_config(&cli.source)?;
            let outline = cli.source.join(&config.nav.summary_file);
            stage(format!("Checking {}", outline.display()));
            let Some(tree) = nav::build_nav_tree(&cli.source, &config.nav)? else {
                return Err(format!("{} not found", outline.display()).into());
            };
            output::print_nav_tree(&tree, &config.nav);
            if tree.malformed.is_empty() {
                stage("Outline is valid".to_string());
            } else {
                return Err(format!(
                    "{} malformed outline lines",
                    tree.malformed.len()
                )
                .into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
