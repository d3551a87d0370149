//! mfnet command-line tool.
//!
//! Thin glue over the library crates: loads interchange files, runs the
//! equivalence matcher, validates documents, converts between versions,
//! and characterizes devices.

mod args;
mod stats;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use mfnet_common::interchange;
use mfnet_equiv::EquivalenceMatcher;
use tracing::info;
use walkdir::WalkDir;

use crate::args::{Args, Command};
use crate::stats::DeviceStats;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match args.command {
        Command::Compare {
            file_a,
            file_b,
            compare_params,
            check_connection_target,
            max_steps,
            report,
        } => cmd_compare(
            &file_a,
            &file_b,
            args::to_config(compare_params, check_connection_target, max_steps),
            report,
        ),
        Command::Validate { paths, recursive } => cmd_validate(&paths, recursive),
        Command::Convert { input, output, to } => cmd_convert(&input, &output, to.into()),
        Command::Stats { paths, csv } => cmd_stats(&paths, csv.as_deref()),
    }
}

fn load_device(path: &Path) -> Result<mfnet_common::Device, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let device = interchange::from_str(&text)?;
    info!(path = %path.display(), device = %device.name, "loaded netlist");
    Ok(device)
}

fn cmd_compare(
    file_a: &Path,
    file_b: &Path,
    config: mfnet_equiv::CompareConfig,
    report: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let device_a = load_device(file_a)?;
    let device_b = load_device(file_b)?;

    let comparison = EquivalenceMatcher::compare(&device_a, &device_b, &config);

    if comparison.budget_exhausted {
        println!("INDETERMINATE: step budget exhausted before the search finished");
    } else if comparison.is_match() {
        println!("EQUIVALENT: {} == {}", device_a.name, device_b.name);
    } else {
        println!("NOT EQUIVALENT: {} != {}", device_a.name, device_b.name);
    }

    if report {
        print!("{}", comparison.report());
    }

    Ok(if comparison.is_match() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn collect_json_files(paths: &[PathBuf], recursive: bool) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let max_depth = if recursive { usize::MAX } else { 1 };
            for entry in WalkDir::new(path)
                .max_depth(max_depth)
                .into_iter()
                .filter_map(Result::ok)
            {
                if entry.file_type().is_file()
                    && entry.path().extension().is_some_and(|e| e == "json")
                {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    files.sort();
    files
}

fn cmd_validate(
    paths: &[PathBuf],
    recursive: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let files = collect_json_files(paths, recursive);
    if files.is_empty() {
        return Err("no netlist files found".into());
    }

    let mut failures = 0usize;
    for file in &files {
        match load_device(file) {
            Ok(_) => println!("OK      {}", file.display()),
            Err(err) => {
                failures += 1;
                println!("FAILED  {}: {err}", file.display());
            }
        }
    }

    println!("{} file(s) checked, {} failure(s)", files.len(), failures);
    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn cmd_convert(
    input: &Path,
    output: &Path,
    version: interchange::Version,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let device = load_device(input)?;
    let text = interchange::to_string_pretty(&device, version)?;
    std::fs::write(output, text)?;
    println!("wrote {} as version {}", output.display(), version);
    Ok(ExitCode::SUCCESS)
}

fn cmd_stats(
    paths: &[PathBuf],
    csv_out: Option<&Path>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let files = collect_json_files(paths, false);
    if files.is_empty() {
        return Err("no netlist files found".into());
    }

    let mut rows = Vec::with_capacity(files.len());
    for file in &files {
        rows.push(DeviceStats::characterize(&load_device(file)?));
    }

    match csv_out {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            stats::write_csv(file, &rows)?;
            println!("wrote {}", path.display());
        }
        None => print!("{}", stats::render_table(&rows)),
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_json_files_from_files_and_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        std::fs::write(root.join("a.json"), "{}").expect("write");
        std::fs::write(root.join("notes.txt"), "").expect("write");
        std::fs::create_dir(root.join("nested")).expect("mkdir");
        std::fs::write(root.join("nested").join("b.json"), "{}").expect("write");

        let shallow = collect_json_files(&[root.to_path_buf()], false);
        assert_eq!(shallow, vec![root.join("a.json")]);

        let deep = collect_json_files(&[root.to_path_buf()], true);
        assert_eq!(deep, vec![root.join("a.json"), root.join("nested").join("b.json")]);

        // Explicit file paths pass through untouched, whatever the extension.
        let explicit = collect_json_files(&[root.join("notes.txt")], false);
        assert_eq!(explicit, vec![root.join("notes.txt")]);
    }
}
