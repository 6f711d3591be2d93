//! Exp table printing CLI
//!
//! Usage: genexptable [options]
//!
//! Options:
//!   --draft          Print the first-draft layout (tables 1 and 2, no table 1 header)
//!   --exact          Print the exact decimal expansion of each f64
//!   --fixed          Print Q8.24 raw integers instead of decimals
//!   --output <path>  Also write the tables as a binary export file
//!   --help, -h       Show help
//!
//! Example: genexptable --output tables/full.expt

use exptable::DecimalStyle;
use exptable::Variant;
use exptable::app::generator::{ValueFormat, generate_tables, write_tables};
use exptable::infra::table_io::save_tables;
use log::{debug, info};
use std::env;
use std::io::{self, BufWriter};
use std::path::PathBuf;

#[derive(Debug)]
struct Args {
    variant: Variant,
    format: ValueFormat,
    output: Option<PathBuf>,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --draft          Print tables 1 and 2 only, without the table 1 header");
    eprintln!("  --exact          Print the exact decimal expansion of each value");
    eprintln!("  --fixed          Print Q8.24 raw integers instead of decimals");
    eprintln!("  --output <path>  Also write the tables as a binary export file");
    eprintln!("  --help, -h       Show this help message");
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().collect();

    let mut variant = Variant::Full;
    let mut exact = false;
    let mut fixed = false;
    let mut output: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--draft" => variant = Variant::Draft,
            "--exact" => exact = true,
            "--fixed" => fixed = true,
            "--output" => {
                i += 1;
                let path = args.get(i).ok_or("--output requires a path")?;
                output = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                std::process::exit(0);
            }
            arg if !arg.starts_with('-') => {
                return Err(format!("Unexpected argument: {}", arg));
            }
            _ => return Err(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    let format = match (exact, fixed) {
        (true, true) => return Err("--exact and --fixed cannot be combined".to_string()),
        (true, false) => ValueFormat::Decimal(DecimalStyle::Exact),
        (false, true) => ValueFormat::Fixed,
        (false, false) => ValueFormat::Decimal(DecimalStyle::Shortest),
    };

    Ok(Args {
        variant,
        format,
        output,
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage(&env::args().next().unwrap_or_default());
            std::process::exit(1);
        }
    };
    debug!("{:?}", args);

    let tables = generate_tables(args.variant);

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    if let Err(e) = write_tables(&mut writer, args.variant, &tables, args.format) {
        eprintln!("Error writing tables: {}", e);
        std::process::exit(1);
    }

    if let Some(path) = args.output {
        match save_tables(&path, args.variant, &tables) {
            Ok(_) => info!("Tables saved to {}", path.display()),
            Err(e) => {
                eprintln!("Error saving tables: {}", e);
                std::process::exit(1);
            }
        }
    }
}
