#![deny(clippy::all)]
#![forbid(unsafe_code)]

use std::error::Error;
use std::io::prelude::*;
use std::path::PathBuf;

use itertools::Itertools;
use structopt::StructOpt;
use tracing::{info, warn};

use navtex_parser::bulletin::{Bulletin, BulletinFile};
use navtex_parser::MappedLocation;

static REPORT_SEPARATOR: &str =
    "\n;===============================================================================\n";

#[derive(StructOpt)]
#[structopt(about = "Extract locations from NAVTEX navigational warnings")]
struct Args {
    #[structopt(name = "input", parse(from_os_str))]
    input: PathBuf,
    #[structopt(short = "o", long = "output", parse(from_os_str))]
    output: Option<PathBuf>,
    /// Include the WKT geometry of every location
    #[structopt(long = "wkt")]
    wkt: bool,
    /// More output per occurrence (-v info, -vv debug, -vvv trace)
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("navtex_parser={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn field(report: &mut String, name: &str, value: &Option<String>) {
    if let Some(value) = value {
        *report += &format!("{:14} {}\n", name, value);
    }
}

fn report_bulletin(bulletin: &Bulletin, mapped: &MappedLocation, wkt: bool) -> String {
    let mut report = String::new();
    field(&mut report, "ID", &bulletin.id.map(str::to_string));
    field(&mut report, "AREA", &mapped.location_name);
    field(&mut report, "SPECIFIC AREA", &mapped.specific_area);
    field(&mut report, "SUBJECT", &mapped.subject);
    field(&mut report, "DNC", &mapped.dnc);
    field(&mut report, "CHART", &mapped.chart);

    for (i, location) in mapped.locations.iter().enumerate() {
        report += &format!("\n[LOCATION {}] {}\n", i + 1, location.location_type);
        field(&mut report, "DESCRIPTION", &location.location_description);
        field(&mut report, "DISTANCE", &location.distance_from_location);
        if let Some(meters) = location.distance_in_meters() {
            report += &format!("{:14} {:.0}\n", "METERS", meters);
        }
        report += &format!("{}\n", location.points.iter().format("\n"));

        if wkt {
            match location.to_wkt() {
                Ok(wkt) => report += &format!("{:14} {}\n", "WKT", wkt),
                Err(e) => warn!("Location {} of {:?}: {}", i + 1, bulletin.id, e),
            }
        }
    }

    if !mapped.extra.is_empty() {
        report += "\n[EXTRA]\n";
        report += &mapped.extra;
        report += "\n";
    }

    report
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::from_args();
    init_logging(args.verbose);

    info!("Reading bulletins from {}", args.input.display());
    let file = BulletinFile::from_file(&args.input)?;

    let mut report = String::new();
    let mut count = 0;
    for bulletin in file.bulletins() {
        let mapped = navtex_parser::parse(&bulletin.text);
        report += REPORT_SEPARATOR;
        report += &report_bulletin(&bulletin, &mapped, args.wkt);
        count += 1;
    }
    info!("Parsed {} bulletins", count);

    match args.output {
        Some(path) => {
            info!("Writing report to {}", path.display());
            std::fs::File::create(path)?.write_all(report.as_bytes())?;
        }
        None => std::io::stdout().write_all(report.as_bytes())?,
    }
    Ok(())
}
