//! Command-line entry point: reads a unified diff from stdin and prints it side by side.

use std::io::{self, BufWriter, IsTerminal, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, ValueEnum};
use diffview::{Error, RenderOptions};

const EXAMPLES: &str = "\
Examples:
  git diff | diffview
  git diff --staged | diffview
  git diff HEAD~1 | diffview
  git diff | diffview --stat --width 120
  diff -u file1 file2 | diffview";

#[derive(Parser, Debug)]
#[command(name = "diffview")]
#[command(version)]
#[command(about = "Side-by-side viewer for unified diffs read from stdin", long_about = None)]
#[command(after_help = EXAMPLES)]
struct Args {
    /// Output width in columns (defaults to the terminal width)
    #[arg(short, long, value_name = "COLUMNS", value_parser = clap::value_parser!(u16).range(1..))]
    width: Option<u16>,

    /// Print a `+additions -deletions` summary after the table
    #[arg(long)]
    stat: bool,

    /// When to color the output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    /// Color only when stdout is a terminal
    #[value(name = "auto")]
    Auto,
    #[value(name = "always")]
    Always,
    #[value(name = "never")]
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            Self::Auto => io::stdout().is_terminal(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

impl Args {
    fn render_options(&self) -> RenderOptions {
        let options = RenderOptions::default().with_color(self.color.enabled());
        match self.width {
            Some(width) => options.with_width(width),
            None => options,
        }
    }
}

/// Reads the piped diff, failing with [`Error::NoInput`] when stdin is a terminal.
fn read_stdin() -> diffview::Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(Error::NoInput);
    }
    diffview::read_diff(stdin.lock())
}

fn run(args: &Args, diff: &str) -> Result<()> {
    let (left, right) = diffview::parse(diff);
    log::debug!("{} rows", left.len());

    let options = args.render_options();
    log::debug!("render options: {options:?}");

    let mut out = BufWriter::new(io::stdout().lock());
    diffview::display(&mut out, &left, &right, &options)
        .context("Failed to write diff to stdout")?;

    if args.stat {
        let stats = diffview::summarize(&left, &right);
        writeln!(out, "{}", diffview::render_summary(&stats, options.color))
            .and_then(|()| out.flush())
            .context("Failed to write summary to stdout")?;
    }
    Ok(())
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let diff = match read_stdin() {
        Ok(diff) => diff,
        Err(err @ (Error::NoInput | Error::EmptyInput)) => {
            eprintln!("error: {err}");
            eprintln!();
            eprintln!("{}", Args::command().render_usage());
            eprintln!();
            eprintln!("{EXAMPLES}");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err).context("Failed to read diff from stdin"),
    };
    log::debug!("read {} bytes of diff input", diff.len());

    run(&args, &diff)?;
    Ok(ExitCode::SUCCESS)
}
