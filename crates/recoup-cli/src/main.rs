// Copyright 2026 the recoup authors
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use recoup_app::AppState;
use recoup_data::{FileSource, RecordSource, SeedSource, SpoolSink, seed_notifications};
use runtime::SourceRuntime;
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `recoup --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let records_path = options.records_path.clone().or_else(|| config.records_path());
    let loans = match &records_path {
        Some(path) => FileSource::new(path).list_loans().with_context(|| {
            format!(
                "load records {} -- if this path is wrong, pass --records or set [portfolio].records_path",
                path.display()
            )
        })?,
        None => SeedSource.list_loans()?,
    };

    let spool_dir = config.spool_dir()?;
    if options.check_only {
        return Ok(());
    }

    let sink = SpoolSink::new(spool_dir, config.max_document_size());
    let mut state = AppState {
        active_section: config.start_section(),
        ..AppState::default()
    };
    let mut runtime = SourceRuntime::new(
        loans,
        seed_notifications(),
        sink,
        config.max_document_size(),
    );
    recoup_tui::run_app(&mut state, &mut runtime)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    records_path: Option<PathBuf>,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        records_path: None,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--records" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--records requires a file path"))?;
                options.records_path = Some(PathBuf::from(value.as_ref()));
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("recoup");
    println!("  --config <path>          Use a specific config path");
    println!("  --records <path>         Load loan records from a JSON file");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config and records, then exit");
    println!("  --help                   Show this help");
}
