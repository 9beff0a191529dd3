// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ozone_core::advisory::Tier;
use ozone_core::envelope::{EnvelopeRepair, DEFAULT_PREFIX_LEN, DEFAULT_SUFFIX_LEN};
use ozone_core::feed::{FeedSource, StaticFeed};
use ozone_core::handler::{OzoneAdvisory, Outcome};
use ozone_core::response::ResponseEnvelope;
use ozone_core::station::Reading;
use ozone_core::{AdvisoryConfig, FEED_URL, STATION_ID};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Ozone feed URL
    #[arg(long, env = "OZONE_FEED_URL", default_value = FEED_URL)]
    url: String,

    /// Station id to report on
    #[arg(short, long, env = "OZONE_STATION", default_value = STATION_ID)]
    station: String,

    /// Characters of wrapper in front of the station array
    #[arg(long, default_value_t = DEFAULT_PREFIX_LEN)]
    prefix_len: usize,

    /// Characters of wrapper after the station array
    #[arg(long, default_value_t = DEFAULT_SUFFIX_LEN)]
    suffix_len: usize,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer one request against the live feed
    Invoke {
        #[arg(long)]
        pretty: bool,
    },
    /// Answer one request against a saved feed body
    Replay {
        file: PathBuf,
        #[arg(long)]
        pretty: bool,
    },
    /// Classify a one-hour ozone reading (µg/m³)
    Classify { value: String },
    /// List the stations in the feed
    Stations {
        /// Read a saved feed body instead of the live feed
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

impl Cli {
    fn config(&self) -> AdvisoryConfig {
        AdvisoryConfig {
            feed_url: self.url.clone(),
            station_id: self.station.clone(),
            envelope: EnvelopeRepair::new(self.prefix_len, self.suffix_len),
            ..Default::default()
        }
    }

    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Warn;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the payload.
    TermLogger::init(
        cli.log_level(),
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Failed to initialise logger")?;

    let config = cli.config();

    match &cli.command {
        Commands::Invoke { pretty } => {
            let handler = OzoneAdvisory::live(config);
            respond(&handler, *pretty)?;
        }
        Commands::Replay { file, pretty } => {
            let feed = StaticFeed::from_file(file)
                .with_context(|| format!("Failed to read feed body from {:?}", file))?;
            let handler = OzoneAdvisory::new(config, feed);
            respond(&handler, *pretty)?;
        }
        Commands::Classify { value } => {
            let reading = Reading::Text(value.clone());
            let tier = Tier::classify(reading.value());
            println!("{} ({}): {}", reading, tier, tier.advice());
        }
        Commands::Stations { file } => {
            let stations = match file {
                Some(path) => {
                    let feed = StaticFeed::from_file(path)
                        .with_context(|| format!("Failed to read feed body from {:?}", path))?;
                    OzoneAdvisory::new(config, feed).stations()?
                }
                None => OzoneAdvisory::live(config).stations()?,
            };
            for station in stations {
                println!(
                    "{:<10} {}",
                    station.id,
                    station.name.as_deref().unwrap_or("-")
                );
            }
        }
    }

    Ok(())
}

/// Stand-in for the voice platform: runs one invocation and prints what the
/// handler hands to its sink.
fn respond<F: FeedSource>(handler: &OzoneAdvisory<F>, pretty: bool) -> Result<()> {
    let mut sink: Vec<ResponseEnvelope> = Vec::new();
    let outcome = handler.handle(&mut sink)?;
    if let Outcome::Fallback(e) = &outcome {
        log::warn!("Answered with fallback — station={} cause={}", handler.config().station_id, e);
    }

    for payload in &sink {
        let json = if pretty {
            serde_json::to_string_pretty(payload)?
        } else {
            serde_json::to_string(payload)?
        };
        println!("{}", json);
    }
    Ok(())
}
