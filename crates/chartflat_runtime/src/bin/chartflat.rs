//! chartflat CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use chartflat_flatten::{FlattenConfig, Flattener, TracerConfig};
use chartflat_foundation::Error;
use chartflat_runtime::flatten_file;
use tracing_subscriber::EnvFilter;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    show_help: bool,
    show_version: bool,
    summary: bool,
    // Debug flags
    trace: bool,
    verbose: bool,
    separator: Option<char>,
    suffix: Option<String>,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            if let Some(context) = e.downcast_ref::<Error>().and_then(|e| e.context.as_ref()) {
                eprintln!("{context}");
            }
            ExitCode::FAILURE
        }
    }
}

fn option_value<'a>(
    args: &'a [String],
    i: &mut usize,
    flag: &str,
) -> Result<&'a str, Box<dyn std::error::Error>> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value").into())
}

fn parse_args(args: &[String]) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-s" | "--summary" => config.summary = true,
            "--trace" => config.trace = true,
            "-v" | "--verbose" => config.verbose = true,
            "-o" | "--output" => {
                config.output = Some(PathBuf::from(option_value(args, &mut i, "--output")?));
            }
            "--separator" => {
                let value = option_value(args, &mut i, "--separator")?;
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => config.separator = Some(c),
                    _ => return Err(format!("invalid --separator value: {value}").into()),
                }
            }
            "--suffix" => {
                let value = option_value(args, &mut i, "--suffix")?;
                if value.is_empty() {
                    return Err("--suffix must not be empty".into());
                }
                config.suffix = Some(value.to_string());
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => {
                if config.input.is_some() {
                    return Err(format!("unexpected extra input: {path}").into());
                }
                config.input = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(&args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("chartflat {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if config.verbose {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    let Some(input) = config.input.as_deref() else {
        return Err("no input file given (try --help)".into());
    };

    let mut flatten_config = FlattenConfig::new();
    if let Some(separator) = config.separator {
        flatten_config = flatten_config.with_separator(separator);
    }
    if let Some(suffix) = config.suffix {
        flatten_config = flatten_config.with_collision_suffix(suffix);
    }
    if config.trace {
        flatten_config = flatten_config.with_trace(TracerConfig::new().enabled().to_stderr());
    }

    let report = flatten_file(
        &Flattener::with_config(flatten_config),
        input,
        config.output.as_deref(),
    )?;

    if config.summary {
        println!("\x1b[1;36m=== Summary ===\x1b[0m");
        println!("Input:  {}", report.before);
        println!("Output: {}", report.after);
    }
    println!("Wrote {}", report.output.display());
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mchartflat\x1b[0m - Hierarchical statechart flattener

\x1b[1mUSAGE:\x1b[0m
    chartflat [OPTIONS] INPUT [-o OUTPUT]

\x1b[1mARGUMENTS:\x1b[0m
    INPUT    MessagePack-encoded statechart to flatten

\x1b[1mOPTIONS:\x1b[0m
    -h, --help            Print help information
    -V, --version         Print version information
    -o, --output FILE     Write the flat chart to FILE (default: INPUT.flat.msgpack)
    -s, --summary         Print state and transition counts before and after
    --separator CHAR      Separator for mangled names (default: _)
    --suffix TEXT         Text appended to colliding names (default: 1)

\x1b[1mDEBUG OPTIONS:\x1b[0m
    --trace               Print stage trace records to stderr
    -v, --verbose         Enable diagnostic logging (honours RUST_LOG)

\x1b[1mEXAMPLES:\x1b[0m
    chartflat door.msgpack                  Write door.flat.msgpack
    chartflat door.msgpack -o flat.msgpack  Choose the output file
    chartflat --summary --trace door.msgpack"
    );
}
