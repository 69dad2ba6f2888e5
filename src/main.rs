use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use inkweek::pdf::PdfConverter;
use inkweek::{config, ingest, output, pdf, render, slots};
use std::path::PathBuf;

/// Shared flags for commands that ingest the week file.
#[derive(clap::Args, Clone)]
struct IngestArgs {
    /// Skip events that fail validation instead of aborting
    #[arg(long)]
    skip_invalid: bool,
}

/// Tagged release builds report the crate version; everything else
/// reports the commit they were built from.
fn version_string() -> &'static str {
    if env!("ON_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("GIT_HASH") {
        "" => "dev@unknown",
        // clap wants 'static; one leak per process is fine
        hash => String::leak(format!("dev@{hash}")),
    }
}

#[derive(Parser)]
#[command(name = "inkweek")]
#[command(about = "Weekly planner generator for e-ink tablets")]
#[command(long_about = "\
Weekly planner generator for e-ink tablets

A single JSON file is the data source. Events are keyed by weekday, and the
output is a linked set of HTML pages: one landscape weekly overview plus
seven portrait day pages, sized for a 1620x2160 e-ink screen.

Input structure (week.json):

  {
    \"events\": {
      \"monday\": [
        { \"title\": \"Standup\", \"time\": \"09:00\", \"duration\": 60 },
        { \"title\": \"Review\", \"time\": \"14:00\" }
      ],
      \"wednesday\": [
        { \"title\": \"Sprint planning\", \"time\": \"14:00\", \"duration\": 120 }
      ]
    },
    \"priorityTasks\": [\"Ship the release\"],
    \"weeklyGoals\": [\"Inbox zero\"]
  }

Event fields (everything except title is optional):
  time         \"H:MM\" or \"HH:MM\", 24-hour; defaults to 09:00
  duration     minutes; defaults to 60
  priority     \"normal\" or \"high\"; events over 90 min default to high
  showInWeekly appear on the weekly overview; defaults on for events
               over 60 min, but only business-hours events make the cut
  description  free text shown on the day page

Run 'inkweek gen-config' to generate a documented planner.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Week data file
    #[arg(long, default_value = "week.json", global = true)]
    input: PathBuf,

    /// Output directory
    #[arg(long, default_value = "out", global = true)]
    output: PathBuf,

    /// Config file (missing file means defaults)
    #[arg(long, default_value = "planner.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: ingest → render, optionally convert to PDF
    Build {
        /// Date the week starts on; normalized back to its Monday.
        /// Defaults to the Monday of the current week.
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Convert the rendered pages to a PDF after rendering
        #[arg(long)]
        pdf: bool,

        #[command(flatten)]
        ingest_args: IngestArgs,
    },
    /// Validate the week file and print the event inventory without rendering
    Check,
    /// Print the time slot grid for the configured hours
    Slots,
    /// Print a stock planner.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load_config(&cli.config)?;

    match cli.command {
        Command::Build {
            start_date,
            pdf: to_pdf,
            ingest_args,
        } => {
            let monday = ingest::week_monday(
                start_date.unwrap_or_else(|| chrono::Local::now().date_naive()),
            );

            println!("==> Stage 1: Ingesting {}", cli.input.display());
            let data = ingest::load_week_data(&cli.input)?;
            let report = ingest::ingest(&data, config.business_hours, ingest_args.skip_invalid)?;
            output::print_week_output(&report.schedule, &report.skipped);

            println!("==> Stage 2: Rendering HTML → {}", cli.output.display());
            let summary = render::render(&report.schedule, &data, monday, &config, &cli.output)?;
            output::print_render_output(&report.schedule, &summary.pages);

            if to_pdf {
                let pdf_path = cli.output.join("planner.pdf");
                println!("==> Stage 3: Converting to {}", pdf_path.display());
                let converter = pdf::CommandConverter::from_config(&config.converter);
                converter.convert(&cli.output.join("index.html"), &pdf_path)?;
            }

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            // Lenient ingestion so every offending event gets reported,
            // not just the first.
            println!("==> Checking {}", cli.input.display());
            let data = ingest::load_week_data(&cli.input)?;
            let report = ingest::ingest(&data, config.business_hours, true)?;
            output::print_week_output(&report.schedule, &report.skipped);
            if !report.skipped.is_empty() {
                return Err(format!("{} invalid events in week file", report.skipped.len()).into());
            }
            println!("==> Week file is valid");
        }
        Command::Slots => {
            for slot in slots::time_slots(&config.slots) {
                println!("{}", slot.label);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
