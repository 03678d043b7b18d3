//! Gridcalc - evaluate spreadsheet formulas from the command line

mod config;
mod logger;

use anyhow::{Context, Result, bail};
use gridcalc_core::Document;
use gridcalc_engine::EvalOptions;
use gridcalc_engine::builtins::BUILTINS;
use log::LevelFilter;
use std::env;
use std::path::PathBuf;

fn print_usage() {
    eprintln!("Usage: gridcalc [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Sheet file to evaluate (.grd)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <FORMULA>   Evaluate a formula against FILE (can be repeated)");
    eprintln!("  -s, --set <CELL=TEXT>     Commit text to a cell before evaluating (can be repeated)");
    eprintln!("  -o, --output <FILE>       Write the evaluated sheet to a .grd file");
    eprintln!("  --max-iterations <N>      Passes allowed before a formula counts as circular");
    eprintln!("  --config <FILE>           Load settings from a TOML file");
    eprintln!("  --no-config               Ignore the default config file");
    eprintln!("  --list-functions          Print the built-in functions");
    eprintln!("  -v, --verbose             Log to stderr (repeat for more detail)");
    eprintln!("  -h, --help                Print help");
}

#[derive(Debug, Default, PartialEq)]
struct Options {
    file_path: Option<PathBuf>,
    commands: Vec<String>,
    assignments: Vec<(String, String)>,
    output_file: Option<PathBuf>,
    max_iterations: Option<usize>,
    config_file: Option<PathBuf>,
    no_config: bool,
    list_functions: bool,
    verbosity: u8,
    help: bool,
}

fn parse_args(args: &[String]) -> std::result::Result<Options, String> {
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                options.help = true;
                return Ok(options);
            }
            "-c" | "--command" => {
                i += 1;
                let formula = args.get(i).ok_or("--command requires a formula")?;
                options.commands.push(formula.to_string());
            }
            "-s" | "--set" => {
                i += 1;
                let assignment = args.get(i).ok_or("--set requires CELL=TEXT")?;
                let Some((cell, text)) = assignment.split_once('=') else {
                    return Err(format!("Invalid assignment: {}", assignment));
                };
                options
                    .assignments
                    .push((cell.to_string(), text.to_string()));
            }
            "-o" | "--output" => {
                i += 1;
                let path = args.get(i).ok_or("--output requires a file path")?;
                options.output_file = Some(PathBuf::from(path));
            }
            "--max-iterations" => {
                i += 1;
                let value = args.get(i).ok_or("--max-iterations requires a value")?;
                match value.parse::<usize>() {
                    Ok(n) if n > 0 => options.max_iterations = Some(n),
                    _ => return Err(format!("Invalid --max-iterations: {}", value)),
                }
            }
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or("--config requires a file path")?;
                options.config_file = Some(PathBuf::from(path));
            }
            "--no-config" => options.no_config = true,
            "--list-functions" => options.list_functions = true,
            "-v" | "--verbose" => options.verbosity = options.verbosity.saturating_add(1),
            "-vv" => options.verbosity = options.verbosity.saturating_add(2),
            arg if arg.starts_with('-') && arg.len() > 1 => {
                return Err(format!("Unknown option: {}", arg));
            }
            _ => {
                if options.file_path.is_none() {
                    options.file_path = Some(PathBuf::from(&args[i]));
                } else {
                    return Err(format!("Unexpected argument: {}", args[i]));
                }
            }
        }
        i += 1;
    }

    if !options.commands.is_empty() && options.output_file.is_some() {
        return Err("--output cannot be combined with --command".to_string());
    }
    Ok(options)
}

fn print_functions() {
    for builtin in BUILTINS {
        let name = if builtin.name.is_empty() {
            "(...)"
        } else {
            builtin.name
        };
        println!("{:<10} {}", name, builtin.description);
    }
}

fn run(options: Options) -> Result<bool> {
    let (config, warnings) = if options.no_config && options.config_file.is_none() {
        (config::Config::default(), Vec::new())
    } else {
        config::load_config(options.config_file.as_deref())
    };

    let level = logger::level_for_verbosity(options.verbosity)
        .or_else(|| config.level_filter())
        .unwrap_or(LevelFilter::Warn);
    logger::init(level);
    for warning in warnings {
        log::warn!("{}", warning);
    }

    if options.list_functions {
        print_functions();
        return Ok(true);
    }

    let mut eval_options = EvalOptions::default();
    if let Some(n) = options
        .max_iterations
        .or(config.max_iterations.filter(|n| *n > 0))
    {
        eval_options.max_iterations = n;
    }

    let mut doc = Document::with_file(options.file_path.clone())
        .with_context(|| match &options.file_path {
            Some(path) => format!("Failed to load {}", path.display()),
            None => "Failed to create sheet".to_string(),
        })?;
    doc.options = eval_options;

    for (cell, text) in &options.assignments {
        doc.commit_named(cell, text)
            .with_context(|| format!("Failed to set {}", cell))?;
    }

    if !options.commands.is_empty() {
        for formula in &options.commands {
            let result = doc
                .evaluate(formula)
                .with_context(|| format!("Failed to evaluate {}", formula))?;
            println!("{}", result);
        }
        return Ok(true);
    }

    if options.file_path.is_none() && options.assignments.is_empty() {
        bail!("Nothing to evaluate: pass a FILE, --set or --command");
    }

    let failures = doc.commit_all();
    for (cell_ref, err) in &failures {
        eprintln!("Error in {}: {}", cell_ref, err);
    }

    if let Some(output_path) = options.output_file {
        doc.save_file_as(&output_path)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        println!("Exported to {}", output_path.display());
    } else {
        for (cell_ref, text) in doc.iter_filled() {
            println!("{}: {}", cell_ref, text);
        }
    }

    Ok(failures.is_empty())
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            print_usage();
            std::process::exit(1);
        }
    };
    if options.help {
        print_usage();
        return;
    }

    match run(options) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
