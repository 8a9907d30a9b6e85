//! # Inspection report CLI
//!
//! Usage:
//!   inspection-report report.json -o report.pdf
//!   echo '{ ... }' | inspection-report -o report.pdf
//!   inspection-report capture.json --record --summary "Good overall." -o report.pdf
//!   inspection-report --example > report.json

use std::fs;
use std::io::{self, Read};
use std::process;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use clap::Parser;
use log::{debug, error, info, LevelFilter};

use inspection_report::config::LayoutConfig;
use inspection_report::error::ReportError;
use inspection_report::model::inspection::InspectionRecord;
use inspection_report::GenerationOptions;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Report JSON to read; stdin when omitted
    input: Option<String>,

    /// Path to the output PDF file
    #[arg(short, long, default_value = "report.pdf")]
    output: String,

    /// Layout configuration (JSON); missing fields keep their defaults
    #[arg(short, long)]
    config: Option<String>,

    /// Treat the input as a captured inspection record instead of a report
    #[arg(long)]
    record: bool,

    /// Condition summary for --record input
    #[arg(long, requires = "record")]
    summary: Option<String>,

    /// Creation date written to the PDF (RFC 3339)
    #[arg(long)]
    timestamp: Option<String>,

    /// Author written to the PDF
    #[arg(long)]
    author: Option<String>,

    /// Print an example report JSON and exit
    #[arg(long)]
    example: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", args.log_level);
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    if args.example {
        print!("{}", example_report_json());
        return;
    }

    debug!("parsed arguments: {:?}", args);

    if let Err(err) = run(&args) {
        error!("{}", err);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ReportError> {
    let input = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let config = match &args.config {
        Some(path) => LayoutConfig::from_json_file(path)?,
        None => LayoutConfig::default(),
    };

    let created_at = args
        .timestamp
        .as_deref()
        .map(|ts| {
            DateTime::parse_from_rfc3339(ts)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| ReportError::Config(format!("invalid timestamp '{}': {}", ts, e)))
        })
        .transpose()?;
    let options = GenerationOptions {
        created_at,
        author: args.author.clone(),
    };

    let pdf_bytes = if args.record {
        let record: InspectionRecord = serde_json::from_str(&input)?;
        inspection_report::generate_record(&record, args.summary.as_deref(), &config, &options)?
    } else {
        inspection_report::generate_json(&input, &config, &options)?
    };

    fs::write(&args.output, &pdf_bytes)?;
    info!("wrote {} bytes to {}", pdf_bytes.len(), args.output);
    Ok(())
}

fn example_report_json() -> &'static str {
    r##"{
  "title": "Property Inspection Report (Initial)",
  "details": [
    { "label": "Inspector", "value": "Ana Souza" },
    { "label": "Landlord", "value": "Carlos Dias" },
    { "label": "Tenant", "value": "Bruno Lima" },
    { "label": "Address", "value": "Rua das Flores, 123, Apt 45, Sao Paulo" },
    { "label": "Date", "value": "2026-02-14" },
    { "label": "Geolocation", "value": "-23.55052, -46.63331" }
  ],
  "observations": "Keys handed over at the start of the inspection.\nGas meter reading: 01234.",
  "summary": "The property is in good overall condition. Minor wear on the living room floor and a small water stain on the bathroom ceiling.",
  "items": [
    {
      "ordinal": 1,
      "image": "./photos/living-room.jpg",
      "description": "Living room floor: light scratches near the balcony door."
    },
    {
      "ordinal": 2,
      "image": "./photos/bathroom.jpg",
      "description": "Bathroom ceiling: water stain of about 10 cm next to the vent."
    }
  ],
  "signatures": [
    { "role": "inspector", "signerName": "Ana Souza", "roleTitle": "Inspector" },
    { "role": "landlord", "signerName": "Carlos Dias", "roleTitle": "Landlord" },
    { "role": "tenant", "signerName": "Bruno Lima", "roleTitle": "Tenant" }
  ]
}
"##
}
