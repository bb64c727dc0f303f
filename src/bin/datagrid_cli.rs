//! CLI tool for datagrid - renders a user payload as a text table
//!
//! Usage:
//!   datagrid_cli <users.json>                        # First 20 rows at 1200px
//!   datagrid_cli <users.json> --width 900 --rows 50  # Narrower container
//!   datagrid_cli <users.json> --sort age --desc      # Sorted, descending
//!   datagrid_cli <users.json> --from 100 -v          # Start at row 100, debug log

#![allow(clippy::exit)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use datagrid::demo::{decode_users, user_schema};
use datagrid::grid::render_text;
use datagrid::{Grid, GridConfig, GridError, Result};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

const USAGE: &str = "Usage: datagrid_cli <users.json> [--width N] [--rows N] [--from N] [--sort KEY] [--desc] [--config config.json] [-v]";

/// Pixels per character cell when mapping column widths to text
const PX_PER_CHAR: u32 = 10;

struct Options {
    input: String,
    width: u32,
    rows: usize,
    from: usize,
    sort: Option<String>,
    descending: bool,
    config: Option<String>,
    verbose: bool,
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn number<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> T {
    match value.map(|v| v.parse()) {
        Some(Ok(n)) => n,
        _ => fail(&format!("{flag} expects a number\n{USAGE}")),
    }
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options {
        input: String::new(),
        width: 1200,
        rows: 20,
        from: 0,
        sort: None,
        descending: false,
        config: None,
        verbose: false,
    };
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--width" => options.width = number("--width", iter.next()),
            "--rows" => options.rows = number("--rows", iter.next()),
            "--from" => options.from = number("--from", iter.next()),
            "--sort" => options.sort = iter.next().cloned(),
            "--desc" => options.descending = true,
            "--config" => options.config = iter.next().cloned(),
            "-v" | "--verbose" => options.verbose = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other if options.input.is_empty() && !other.starts_with('-') => {
                options.input = other.to_string();
            }
            other => fail(&format!("Unknown argument: {other}\n{USAGE}")),
        }
    }
    if options.input.is_empty() {
        fail(USAGE);
    }
    options
}

fn run(options: &Options) -> Result<()> {
    let config = match &options.config {
        Some(path) => GridConfig::from_json(&fs::read_to_string(path)?)?,
        None => GridConfig::default(),
    };

    let json = fs::read_to_string(&options.input)?;
    let mut users = decode_users(&json)?;

    let mut grid = Grid::new(user_schema(), config);
    grid.observe_container_width(options.width);

    if let Some(key) = &options.sort {
        // The sort cycle is asc first, so a descending sort takes two clicks
        let clicks = if options.descending { 2 } else { 1 };
        for _ in 0..clicks {
            if grid.sort_by_key(key, &mut users)?.is_none() {
                return Err(GridError::Config(format!("column {key} is not sortable")));
            }
        }
    }

    let end = options.from.saturating_add(options.rows);
    let table = render_text(&grid, &users, options.from..end, PX_PER_CHAR);
    io::stdout().write_all(table.as_bytes())?;
    eprintln!(
        "{} of {} rows",
        end.min(users.len()).saturating_sub(options.from),
        users.len()
    );
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args);

    let level = if options.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    if let Err(e) = run(&options) {
        fail(&format!("Error: {e}"));
    }
}
