use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context as _, Result};
use clap::Parser;
use rustyline::{DefaultEditor, error::ReadlineError};
use stackcalc::{
    interpreter::{evaluator::core::Context, source::LineJoiner},
    suite::run_suite,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// stackcalc is a small arithmetic language with an operand stack and
/// directives.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print every expression tree in postfix form and enable debug logs.
    #[arg(short, long)]
    verbose: bool,

    /// Treat the input as a test suite of `input,expected` lines. Reads the
    /// suite from standard input when no file is given.
    #[arg(short, long)]
    test: bool,

    /// Script or suite to run instead of the interactive prompt.
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        },
    }
}

/// Logs go to stderr, filtered by `RUST_LOG`. `--verbose` adds debug output
/// for this crate on top of it.
fn init_tracing(verbose: bool) {
    let mut filter = EnvFilter::from_default_env();
    if verbose && let Ok(directive) = "stackcalc=debug".parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr))
                                  .with(filter)
                                  .init();
}

fn run(args: &Args) -> Result<ExitCode> {
    let mut context = Context::new();

    match (&args.file, args.test) {
        (Some(path), true) => run_suite_source(&mut context, &read_file(path)?),
        (None, true) => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)
                       .context("failed to read the suite from standard input")?;
            run_suite_source(&mut context, &source)
        },
        (Some(path), false) => {
            let source = read_file(path)?;
            let mut joiner = LineJoiner::new();
            for line in source.lines() {
                if let Some(logical) = joiner.push(line) {
                    execute(&mut context, &logical, args.verbose);
                }
            }
            if let Some(rest) = joiner.finish() {
                execute(&mut context, &rest, args.verbose);
            }
            Ok(ExitCode::SUCCESS)
        },
        (None, false) => {
            repl(&mut context, args.verbose)?;
            Ok(ExitCode::SUCCESS)
        },
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

fn run_suite_source(context: &mut Context, source: &str) -> Result<ExitCode> {
    let report = run_suite(context, source);
    println!("{report}");

    Ok(if report.passed() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Runs one logical line and prints what it produced.
///
/// Errors are printed and do not end the session.
fn execute(context: &mut Context, line: &str, verbose: bool) {
    match context.run_interactive(line) {
        Ok(echo) => {
            if verbose && let Some(tree) = &echo.tree {
                println!("RETURN({}): {}", tree.kind(), tree.postfix());
            }
            if let Some(value) = echo.value {
                println!("{value}");
            }
        },
        Err(e) => println!("ERROR({}): {e}", e.kind()),
    }
}

fn repl(context: &mut Context, verbose: bool) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let mut joiner = LineJoiner::new();

    loop {
        let prompt = if joiner.is_pending() { "  " } else { "> " };

        match editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(line.as_str())?;
                }
                if let Some(logical) = joiner.push(&line) {
                    execute(context, &logical, verbose);
                }
            },
            Err(ReadlineError::Interrupted) => joiner.reset(),
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
