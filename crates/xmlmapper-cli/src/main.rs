use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(
    name = "xmlmapper",
    about = "Convert XML to JSON and inject the total of its Score elements",
    version
)]
struct Args {
    /// Spaces per indentation level of the JSON output (0 = compact)
    #[arg(long, default_value_t = 4)]
    indent: usize,

    /// Treat a Score sum overflow as a failed conversion instead of truncating
    #[arg(long, default_value_t = false)]
    fail_on_overflow: bool,

    /// Do not print the input prompt
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Increase log verbosity on stderr (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Input file (defaults to stdin, read up to the first blank line)
    input: Option<PathBuf>,
}

fn verbosity_level(v: u8) -> Level {
    match v {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = verbosity_level(verbose);
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .with_env_filter(env_filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Collect lines until the first blank (or whitespace-only) line or EOF.
///
/// Every kept line is terminated with `\n`. Invalid UTF-8 is replaced with
/// U+FFFD rather than aborting the read.
fn read_until_blank_line<R: BufRead>(mut reader: R) -> io::Result<String> {
    let mut out = String::new();
    let mut raw = Vec::new();
    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&raw);
        let line = line.trim_end_matches('\n').trim_end_matches('\r');
        if xmlmapper::parse::trim_xml(line).is_empty() {
            break;
        }
        out.push_str(line);
        out.push('\n');
    }
    Ok(out)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let xml = match &args.input {
        Some(path) => String::from_utf8_lossy(&fs::read(path)?).into_owned(),
        None => {
            if !args.quiet {
                println!("Please enter the XML input:");
                println!("NOTE: Do not enter extra line break between xml input");
            }
            read_until_blank_line(io::stdin().lock())?
        }
    };
    debug!(bytes = xml.len(), "read XML input");

    let options = xmlmapper::Options {
        indent: args.indent,
        overflow: if args.fail_on_overflow {
            xmlmapper::OverflowPolicy::Fail
        } else {
            xmlmapper::OverflowPolicy::Truncate
        },
    };
    let json = xmlmapper::convert_with_options(&xml, &options);
    println!("Converted JSON:\n{}", json);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_first_blank_line() {
        let input = "<a>\n  <b>1</b>\n</a>\n   \n<ignored/>\n";
        let got = read_until_blank_line(input.as_bytes()).unwrap();
        assert_eq!(got, "<a>\n  <b>1</b>\n</a>\n");
    }

    #[test]
    fn eof_without_blank_line() {
        let got = read_until_blank_line("<a/>".as_bytes()).unwrap();
        assert_eq!(got, "<a/>\n");
        assert_eq!(read_until_blank_line("".as_bytes()).unwrap(), "");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let input: &[u8] = b"<a>\xff</a>\r\n\n<b/>\n";
        let got = read_until_blank_line(input).unwrap();
        assert_eq!(got, "<a>\u{FFFD}</a>\n");
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(verbosity_level(0), Level::WARN);
        assert_eq!(verbosity_level(2), Level::DEBUG);
        assert_eq!(verbosity_level(9), Level::TRACE);
    }
}
