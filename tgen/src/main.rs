use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod emit;
mod render;

#[derive(Parser)]
#[command(name = "tgen")]
#[command(about = "Generate the AES S-box and round tables as source code")]
struct Args {
    /// Emit the Te0..Te4 and Td0..Td4 tables
    #[arg(long)]
    tbl: bool,

    #[arg(short, long, env = "TGEN_CONFIG")]
    config: Option<PathBuf>,

    // Defaults to stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, default_value_t = tracing_subscriber::filter::LevelFilter::INFO)]
    verbosity: tracing_subscriber::filter::LevelFilter,
}

/// The classic generator took a single-dash `-tbl`; clap only knows `--tbl`.
fn normalize_args<I: IntoIterator<Item = std::ffi::OsString>>(args: I) -> Vec<std::ffi::OsString> {
    args.into_iter()
        .map(|arg| if arg == "-tbl" { "--tbl".into() } else { arg })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse_from(normalize_args(std::env::args_os()));

    // stdout carries the generated source, so logs go to stderr
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(args.verbosity);

    tracing_subscriber::registry().with(stderr_layer).init();

    let emitted = run(&args)?;
    tracing::info!("Generated {emitted} tables");
    Ok(())
}

/// Returns the number of tables written. Everything is rendered into memory first so a failed run
/// leaves an existing output file untouched.
fn run(args: &Args) -> anyhow::Result<usize> {
    if !args.tbl {
        tracing::warn!("Nothing to generate; pass --tbl to emit the round tables");
        return Ok(0);
    }

    let config: tgen_config::TgenConfig = match &args.config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Unable to read config {}", path.display()))?;
            toml::from_str(&contents).with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => tgen_config::TgenConfig::default(),
    };

    let mut rendered = Vec::new();
    let emitted = emit::emit_tables(&config, &mut rendered)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered).with_context(|| format!("Unable to write {}", path.display()))?;
        }
        None => {
            let mut sink = std::io::stdout().lock();
            sink.write_all(&rendered)?;
            sink.flush()?;
        }
    }

    Ok(emitted)
}

#[cfg(test)]
fn scratch_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("tgen-{}-{name}", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn test_without_tbl_generates_nothing() {
    let output = scratch_path("no-tbl.c");
    let args = Args::try_parse_from(normalize_args(["tgen".into(), "-o".into(), output.clone().into_os_string()])).unwrap();

    assert!(!args.tbl);
    assert_eq!(run(&args).unwrap(), 0);
    assert!(!output.exists());
}

#[test]
fn test_tables_written_to_output_file() {
    let output = scratch_path("tables.c");
    let args = Args::try_parse_from(["tgen".into(), "--tbl".into(), "-o".into(), output.clone().into_os_string()]).unwrap();

    assert_eq!(run(&args).unwrap(), 10);
    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written.matches("static const u32 ").count(), 10);
    assert!(written.starts_with("static const u32 Te0[256] = {\n    0xc66363a5U,"));
    std::fs::remove_file(&output).unwrap();
}

#[test]
fn test_single_dash_tbl() {
    let args = Args::try_parse_from(normalize_args(["tgen", "-tbl"].map(std::ffi::OsString::from))).unwrap();
    assert!(args.tbl);
    assert!(Args::try_parse_from(["tgen", "-tbl"]).is_err());
}

#[test]
fn test_failed_run_keeps_existing_output() {
    let output = scratch_path("kept.c");
    std::fs::write(&output, "previous tables").unwrap();
    let args = Args::try_parse_from([
        "tgen".into(),
        "--tbl".into(),
        "-c".into(),
        scratch_path("missing.toml").into_os_string(),
        "-o".into(),
        output.clone().into_os_string(),
    ])
    .unwrap();

    assert!(run(&args).is_err());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous tables");
    std::fs::remove_file(&output).unwrap();
}
