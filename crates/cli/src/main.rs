#![deny(unsafe_code)]
//! CLI binary for the gradient tool.
//!
//! Subcommands:
//! - `interpolate [A] [B]`: print a gradient, optionally through a midpoint
//! - `convert --from <format>`: rewrite a block of colors in every notation
//! - `list`: print supported spaces and formats
//!
//! Endpoints, space, format and tile counts omitted on the command line come
//! from the `--config` settings file, then from built-in defaults.

mod error;
mod settings;

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use error::CliError;
use gradient_core::{
    convert_text, format_as_with, interpolate, interpolate_three, ColorSpace, Format,
    GradientSpace, Hex, Notation,
};
use settings::{Settings, AB_COUNT_RANGE, SEGMENT_COUNT_RANGE};
use std::io::{self, Read};
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gradient", about = "Color gradient and conversion tool")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// JSON settings file with defaults for `interpolate`.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a gradient between two colors, or three with --via.
    Interpolate {
        /// Start color as hex (e.g. "#e31b23").
        a: Option<String>,

        /// End color as hex.
        b: Option<String>,

        /// Midpoint color; makes a three-color gradient A→C→B.
        #[arg(long, value_name = "C")]
        via: Option<String>,

        /// Total colors A→B, endpoints included (3 to 11).
        #[arg(short, long, value_parser = steps_parser(AB_COUNT_RANGE))]
        steps: Option<usize>,

        /// Total colors A→C in three-color mode (3 to 7).
        #[arg(long, value_parser = steps_parser(SEGMENT_COUNT_RANGE))]
        ac_steps: Option<usize>,

        /// Total colors C→B in three-color mode (3 to 7).
        #[arg(long, value_parser = steps_parser(SEGMENT_COUNT_RANGE))]
        cb_steps: Option<usize>,

        /// Interpolation space (oklch, oklab, lch, lab, srgb, hsl, hwb).
        #[arg(long)]
        space: Option<String>,

        /// Output format (hex, rgb256, rgb01).
        #[arg(short, long)]
        format: Option<String>,

        /// Wrap RGB output as rgb(...).
        #[arg(long)]
        functional: bool,
    },
    /// Convert a block of colors from one notation to the others.
    Convert {
        /// Notation of the input (hex, rgb256, rgb01).
        #[arg(long, value_name = "FORMAT")]
        from: String,

        /// Print only this notation.
        #[arg(long, value_name = "FORMAT")]
        to: Option<String>,

        /// Colors, one per line. Read from stdin when omitted.
        text: Option<String>,
    },
    /// List supported spaces and formats.
    List,
}

/// Accepts a step count whose intermediate tiles fall within `counts`.
fn steps_parser(counts: RangeInclusive<usize>) -> RangedU64ValueParser<usize> {
    let lo = *counts.start() as u64 + 2;
    let hi = *counts.end() as u64 + 2;
    RangedU64ValueParser::new().range(lo..=hi)
}

fn hex_or(arg: Option<&str>, fallback: &Hex) -> Result<Hex, CliError> {
    match arg {
        Some(s) => Ok(Hex::parse(s.trim())?),
        None => Ok(fallback.clone()),
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let spaces = GradientSpace::list_names();
            let conversion_spaces = ColorSpace::list_names();
            let formats = Format::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "spaces": spaces,
                    "conversion_spaces": conversion_spaces,
                    "formats": formats,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Gradient spaces:");
                println!("  {}", spaces.join(", "));
                println!("Conversion spaces:");
                println!("  {}", conversion_spaces.join(", "));
                println!("Formats:");
                println!("  {}", formats.join(", "));
            }
        }
        Command::Interpolate {
            a,
            b,
            via,
            steps,
            ac_steps,
            cb_steps,
            space,
            format,
            functional,
        } => {
            let settings = Settings::load(cli.config.as_deref())?;
            let a = hex_or(a.as_deref(), &settings.color_a)?;
            let b = hex_or(b.as_deref(), &settings.color_b)?;
            let via = match via {
                Some(c) => Some(Hex::parse(c.trim())?),
                None if settings.three_mode => Some(settings.color_c.clone()),
                None => None,
            };
            let space = match space {
                Some(name) => GradientSpace::from_name(&name)?,
                None => settings.gradient_space(),
            };
            let format = match format {
                Some(name) => Format::from_name(&name)?,
                None => settings.output_format(),
            };
            let notation = if functional {
                Notation::Functional
            } else {
                Notation::Bare
            };
            if via.is_some() && steps.is_some() {
                return Err(CliError::Input(
                    "--steps applies to two-color gradients; use --ac-steps and --cb-steps".to_string(),
                ));
            }
            if via.is_none() && (ac_steps.is_some() || cb_steps.is_some()) {
                return Err(CliError::Input(
                    "--ac-steps and --cb-steps need a midpoint color (--via)".to_string(),
                ));
            }

            match via {
                Some(c) => {
                    let three = interpolate_three(
                        &a,
                        &c,
                        &b,
                        ac_steps.unwrap_or(settings.ac_steps()),
                        cb_steps.unwrap_or(settings.cb_steps()),
                        space,
                    );
                    let lines = format_as_with(&three.combined(), format, notation);
                    if cli.json {
                        let info = serde_json::json!({
                            "space": space.name(),
                            "format": format.name(),
                            "colors": lines,
                            "segments": {
                                "ac": format_as_with(three.ac.colors(), format, notation),
                                "cb": format_as_with(three.cb.colors(), format, notation),
                            },
                            "fallbacks": {
                                "ac": three.ac.fallbacks(),
                                "cb": three.cb.fallbacks(),
                            },
                        });
                        println!("{}", serde_json::to_string_pretty(&info)?);
                    } else {
                        print_lines(&lines);
                    }
                    for note in [three.ac.status_note(), three.cb.status_note()]
                        .into_iter()
                        .flatten()
                    {
                        eprintln!("note: {note}");
                    }
                }
                None => {
                    let gradient = interpolate(&a, &b, steps.unwrap_or(settings.ab_steps()), space);
                    let lines = format_as_with(gradient.colors(), format, notation);
                    if cli.json {
                        let info = serde_json::json!({
                            "space": space.name(),
                            "format": format.name(),
                            "colors": lines,
                            "fallbacks": gradient.fallbacks(),
                        });
                        println!("{}", serde_json::to_string_pretty(&info)?);
                    } else {
                        print_lines(&lines);
                    }
                    if let Some(note) = gradient.status_note() {
                        eprintln!("note: {note}");
                    }
                }
            }
        }
        Command::Convert { from, to, text } => {
            let source = Format::from_name(&from)?;
            let target = to.as_deref().map(Format::from_name).transpose()?;
            let text = match text {
                Some(t) => t,
                None => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };

            let conversions = convert_text(&text, source)?;
            if conversions.is_empty() {
                return Err(CliError::Input("no colors in input".to_string()));
            }

            match (cli.json, target) {
                (true, Some(t)) => {
                    let info = serde_json::json!({
                        "format": t.name(),
                        "colors": conversions.get(t),
                    });
                    println!("{}", serde_json::to_string_pretty(&info)?);
                }
                (true, None) => println!("{}", serde_json::to_string_pretty(&conversions)?),
                (false, Some(t)) => print_lines(conversions.get(t)),
                (false, None) => {
                    for (i, f) in [Format::Hex, Format::Rgb256, Format::Rgb01].into_iter().enumerate() {
                        if i > 0 {
                            println!();
                        }
                        println!("{f}:");
                        print_lines(conversions.get(f));
                    }
                }
            }
            eprintln!("converted {} color(s) from {source}", conversions.len());
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
