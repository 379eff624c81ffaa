#![doc = include_str!("../README.md")]

mod cli;

use clap::Parser;
use cli::config::{CliArgs, GenConfig, Mode};
use cli::telemetry::init_telemetry;
use pseud_uuid::{Identifier, new_random_identifier, new_seeded_factory, registry};
use std::io::{self, BufWriter, Write};

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = GenConfig::try_from(args)?;

    init_telemetry()?;
    tracing::debug!(?config, "starting");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match config.mode {
        Mode::Random => {
            for _ in 0..config.count {
                write_id(&mut out, new_random_identifier(), config.upper)?;
            }
        }
        Mode::Seeded { seed, factory: watermarks } => {
            // Surface a failed global initialization here, before any work.
            let registry = registry()?;
            let lease = registry.lease(seed);
            let factory = new_seeded_factory(lease.seed(), watermarks.queue_min, watermarks.queue_max)?;
            for _ in 0..config.count {
                write_id(&mut out, factory.dequeue()?, config.upper)?;
            }
            lease.release()?;
        }
    }

    out.flush()?;
    Ok(())
}

fn write_id(out: &mut impl Write, id: Identifier, upper: bool) -> io::Result<()> {
    let mut buf = Identifier::encode_buffer();
    let text = id.hyphenated();
    if upper {
        writeln!(out, "{}", text.encode_upper(&mut buf))
    } else {
        writeln!(out, "{}", text.encode_lower(&mut buf))
    }
}
