use clap::{Parser, Subcommand};
use study_import::config::{self, ImportConfig};
use study_import::import::{self, ImportOptions};
use study_import::output;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "study-import")]
#[command(about = "Import markdown study notes into a blog content collection")]
#[command(long_about = "\
Import markdown study notes into a blog content collection

Each configured series is a directory under the source root. Its notes are
copied to the output directory as <series-key>-<name>.md with a generated
frontmatter block; the leading `# heading` becomes the title.

Source structure:

  study/
  ├── cpp-mastery/                  # Fixed-directory series (`dirs = [...]`)
  │   ├── part1-basics/
  │   │   ├── README.md             # Ignored
  │   │   └── 01-hello.md           # → cpp-mastery-01-hello.md (order 1)
  │   └── part2-oop/
  │       └── 01-classes.md         # → cpp-mastery-01-classes.md
  └── rabbitmq-mastery/             # Scan-mode series (`scan_docs = true`)
      └── docs/
          ├── 01-intro/intro.md     # → rabbitmq-mastery-01-intro.md
          └── 02-setup/README.md    # → rabbitmq-mastery-02-setup.md

Frontmatter (first available wins):
  title:        first `# heading` → filename (03-my-file.md → \"my file\")
  description:  first plain line (max 200 chars) → fallback_description
  order:        leading number of the filename (scan mode: directory name)

Run 'study-import gen-config' to print a documented import.toml.")]
#[command(version)]
struct Cli {
    /// Series registry (default: ./import.toml if present, else built-in)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Study notes directory (overrides `source_root`)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Content collection directory (overrides `dest_root`)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Import every series into the output directory (default)
    Import,
    /// List what an import would write, without writing anything
    Check {
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock import.toml with all options documented
    GenConfig,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = ImportOptions::default();

    match cli.command.unwrap_or(Command::Import) {
        Command::Import => {
            let config = load_config(cli.config.as_deref())?;
            let source = cli.source.unwrap_or_else(|| config.source_root.clone());
            let dest = cli.output.unwrap_or_else(|| config.dest_root.clone());
            println!("==> Importing {} \u{2192} {}", source.display(), dest.display());
            let summary = import::run(&config, &source, &dest, &options, output::print_event)?;
            output::print_summary(&summary);
        }
        Command::Check { json } => {
            let config = load_config(cli.config.as_deref())?;
            let source = cli.source.unwrap_or_else(|| config.source_root.clone());
            let plan = import::plan(&config, &source, &options)?;
            plan.check_collisions()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                output::print_plan(&plan, &source);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Resolve the registry: explicit `--config`, else `./import.toml`, else stock.
fn load_config(path: Option<&Path>) -> Result<ImportConfig, config::ConfigError> {
    match path {
        Some(path) => config::load_config(path),
        None => config::load_config_in(Path::new(".")),
    }
}
