use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use framekit::{
    init_logging, unit_label, Config, FileProgramSource, FrameJob, FrameJobReport, LogFormat,
    Point2D, RecordingSink, StaticMachineState, WriterSink,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Commands, one per line
    Text,
    /// Frame, unit mode and commands as JSON
    Json,
}

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(author, version, long_version = LONG_VERSION, about, long_about = None)]
struct Args {
    /// The G-code program to frame.
    #[arg()]
    program: PathBuf,

    /// Current machine position as X,Y. The outline returns here when done.
    #[arg(long, default_value = "0,0", value_parser = parse_position, allow_hyphen_values = true)]
    position: Point2D,

    /// Feed setting as the operator entered it. Empty uses the configured default.
    #[arg(long, default_value = "")]
    feed: String,

    /// Configuration file (.toml or .json). Defaults to the user config file if present.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit log events as JSON.
    #[arg(long)]
    log_json: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    unit_mode: &'static str,
    #[serde(flatten)]
    report: &'a FrameJobReport,
}

fn parse_position(text: &str) -> Result<Point2D, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got {:?}", text))?;
    let parse = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("invalid coordinate {:?}", value))
    };
    Ok(Point2D::new(parse(x)?, parse(y)?))
}

fn open_output(path: Option<&PathBuf>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(if args.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    })?;

    let config =
        Config::load_or_default(args.config.as_deref()).context("loading configuration")?;
    let job = FrameJob::new(config.frame);
    let source = FileProgramSource::new(&args.program);
    let machine = StaticMachineState::new(args.position, args.feed.clone());
    let mut output = open_output(args.output.as_ref())?;

    match args.format {
        OutputFormat::Text => {
            let mut sink = WriterSink::new(output);
            job.run(&source, &machine, &mut sink)
                .with_context(|| format!("framing {}", args.program.display()))?;
        }
        OutputFormat::Json => {
            let mut sink = RecordingSink::default();
            let report = job
                .run(&source, &machine, &mut sink)
                .with_context(|| format!("framing {}", args.program.display()))?;
            let json = JsonReport {
                version: framekit::VERSION,
                unit_mode: unit_label(report.frame.unit_mode),
                report: &report,
            };
            serde_json::to_writer_pretty(&mut output, &json)?;
            writeln!(output)?;
            output.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("1.5,-2").unwrap(), Point2D::new(1.5, -2.0));
        assert_eq!(parse_position(" 3 , 4 ").unwrap(), Point2D::new(3.0, 4.0));
        assert!(parse_position("3").is_err());
        assert!(parse_position("a,1").is_err());
        assert!(parse_position("inf,1").is_err());
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["framekit", "part.nc"]).unwrap();
        assert_eq!(args.position, Point2D::ORIGIN);
        assert_eq!(args.feed, "");
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_args_negative_position() {
        let args = Args::try_parse_from([
            "framekit",
            "part.nc",
            "--position",
            "-10,5",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(args.position, Point2D::new(-10.0, 5.0));
        assert_eq!(args.format, OutputFormat::Json);
    }
}
