//! JSAF Audit CLI - audit, overview and result inspection of JSAF exports

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use jsaf_audit::audit::DEFAULT_TOLERANCE;
use jsaf_audit::prelude::*;
use jsaf_audit::render;

#[derive(Parser)]
#[command(name = "jsaf-audit")]
#[command(version, about = "Integrity and completeness checks for JSAF structural models")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit references, results and empty collections.
    Audit {
        /// Path to the JSAF document.
        file: PathBuf,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,

        /// Magnitude a value must exceed to count as non-zero.
        #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,

        /// Number of errors and of warnings listed.
        #[arg(long, default_value_t = render::DEFAULT_MAX_LISTED)]
        max_listed: usize,

        /// Do not warn about empty collections.
        #[arg(long)]
        no_empty_check: bool,
    },

    /// Show record counts and type distributions.
    Overview {
        /// Path to the JSAF document.
        file: PathBuf,

        /// Print the overview as JSON.
        #[arg(long)]
        json: bool,

        /// Also list load combinations with their factors.
        #[arg(long)]
        combinations: bool,
    },

    /// List the records of one collection.
    Entities {
        /// Path to the JSAF document.
        file: PathBuf,

        /// Collection key, e.g. CurveMembers or PointSupports.
        #[arg(short, long)]
        collection: Collection,
    },

    /// Show the per-owner result table.
    Results {
        /// Path to the JSAF document.
        file: PathBuf,

        /// Result collection (1d, mesh).
        #[arg(short, long, default_value = "1d")]
        kind: ResultKind,

        /// Owners to show.
        #[arg(short, long, value_enum, default_value_t = Filter::All)]
        filter: Filter,

        /// Print the table as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show one result record.
    Record {
        /// Path to the JSAF document.
        file: PathBuf,

        /// Result collection (1d, mesh).
        #[arg(short, long, default_value = "1d")]
        kind: ResultKind,

        /// Bar or surface id.
        #[arg(short, long)]
        owner: String,

        /// Load case or combination id. Lists the available loads when omitted.
        #[arg(short, long)]
        load: Option<String>,

        /// Print the record detail as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    fn file(&self) -> &Path {
        match self {
            Commands::Audit { file, .. }
            | Commands::Overview { file, .. }
            | Commands::Entities { file, .. }
            | Commands::Results { file, .. }
            | Commands::Record { file, .. } => file,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Filter {
    All,
    Values,
    Zero,
}

impl From<Filter> for OwnerFilter {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::All => OwnerFilter::All,
            Filter::Values => OwnerFilter::HasValues,
            Filter::Zero => OwnerFilter::AllZero,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load(path: &Path) -> anyhow::Result<JsafDocument> {
    JsafDocument::from_path(path).with_context(|| format!("failed to load {}", path.display()))
}

fn run(command: Commands, doc: &JsafDocument) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Audit {
            json,
            tolerance,
            max_listed,
            no_empty_check,
            ..
        } => {
            let mut options = AuditOptions::default().with_tolerance(tolerance);
            if no_empty_check {
                options = options.without_empty_collection_check();
            }
            let report = run_audit(doc, &options);
            if json {
                print_json(&report)?;
            } else {
                print!("{}", render::render_report(&report, max_listed));
            }
            if report.errors.is_empty() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }

        Commands::Overview {
            json, combinations, ..
        } => {
            let overview = ModelOverview::from_document(doc);
            if json {
                print_json(&overview)?;
            } else {
                print!("{}", render::render_overview(&overview));
                if combinations {
                    println!();
                    print!("{}", render::render_combinations(doc, &ModelIndex::new(doc)));
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Entities { collection, .. } => {
            print!(
                "{}",
                render::render_entities(doc, &ModelIndex::new(doc), collection)
            );
            Ok(ExitCode::SUCCESS)
        }

        Commands::Results {
            kind, filter, json, ..
        } => {
            let auditor = Auditor::new(doc, AuditOptions::default());
            let summary = auditor.summarize(kind);
            if json {
                print_json(&summary.owner_rows(filter.into()))?;
            } else {
                let owners = match kind {
                    ResultKind::OneD => &auditor.index().bars,
                    ResultKind::Mesh => &auditor.index().surfaces,
                };
                print!("{}", render::render_owner_table(&summary, filter.into(), owners));
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Record {
            kind,
            owner,
            load,
            json,
            ..
        } => {
            let auditor = Auditor::new(doc, AuditOptions::default());
            let Some(load) = load else {
                let loads = auditor.loads(kind);
                if json {
                    print_json(&loads)?;
                } else {
                    for option in &loads {
                        println!("{:<40}{}", option.id, option.name);
                    }
                }
                return Ok(ExitCode::SUCCESS);
            };

            let detail = auditor.record_detail(kind, &owner, &load)?;
            if json {
                print_json(&detail)?;
            } else {
                print!(
                    "{}",
                    render::render_record_detail(
                        &detail,
                        auditor.owner_name(kind, &owner),
                        auditor.index().load_display_name(&load),
                    )
                );
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let doc = match load(cli.command.file()) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::from(2);
        }
    };

    match run(cli.command, &doc) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
