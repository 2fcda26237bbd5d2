use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

mod check;
mod logging;
mod output;
mod registry;
mod render;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "readme-tables")]
#[command(about = "Job table registry for generated README files", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the table registry (tables, headers, markers) as JSON.
    List,

    /// Validate the registry and the marker regions of every target file.
    Check {
        /// Repository root the table paths are relative to.
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Print the full report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Replace the content of one marker region in a file.
    Splice {
        #[arg(long)]
        file: PathBuf,

        #[arg(long, value_enum)]
        marker: registry::MarkerKind,

        /// File holding the new region content.
        #[arg(long)]
        content: PathBuf,

        /// Prepend the shared header rows to the content.
        #[arg(long)]
        with_header: bool,

        /// Write here instead of rewriting `--file` in place.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    match cli.cmd {
        Commands::List => {
            registry::validate_registry()?;
            let json = serde_json::to_string_pretty(&registry::Registry::get())?;
            println!("{}", json);
        }
        Commands::Check { root, json } => {
            registry::validate_registry()?;
            let report = check::check_tables(&root, registry::tables(), registry::markers())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for f in &report.files {
                    println!(
                        "{:<28} {:<8} regions={} errors={}",
                        f.path,
                        f.status,
                        f.regions.len(),
                        f.errors.len()
                    );
                    for e in &f.errors {
                        println!("    error: {}", e);
                    }
                    for m in &f.unknown_markers {
                        println!("    unregistered sentinel: {}", m);
                    }
                }
            }

            if report.has_errors() {
                anyhow::bail!(
                    "{} marker error(s) across {} file(s)",
                    report.totals.errors,
                    report.totals.files
                );
            }
        }
        Commands::Splice {
            file,
            marker,
            content,
            with_header,
            out,
        } => {
            use anyhow::Context;

            if let Some(t) = file.to_str().and_then(registry::table_for) {
                info!(
                    rpc = %t.rpc,
                    salary = t.salary,
                    job_type = ?t.query.get("job_type"),
                    "splicing registered table {}",
                    t.path
                );
            }

            let doc = std::fs::read_to_string(&file)
                .with_context(|| format!("read {}", file.display()))?;
            let rows = std::fs::read_to_string(&content)
                .with_context(|| format!("read content file {}", content.display()))?;
            let body = render::table_body(registry::headers(), &rows, with_header);

            let updated = render::splice_region(&doc, marker.pair(), &body)
                .with_context(|| format!("splice {} region in {}", marker, file.display()))?;

            let out = out.unwrap_or(file);
            output::write_replacing(&out, &updated)?;
            info!(path = %out.display(), %marker, "region updated");
            println!("Wrote {}", out.display());
        }
    }

    Ok(())
}
