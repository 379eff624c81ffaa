use anyhow::{Context, bail};
use clap::Parser;
use pseud_uuid::{FactoryConfig, Seed};

/// Runtime configuration for the `pseud-uuid` binary.
///
/// All values are parsed from CLI arguments or environment variables. Without
/// a seed, identifiers are cryptographically random; with one, they replay
/// that seed's stream from its start.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pseud-uuid",
    version,
    about = "Generate random or reproducible seeded UUIDs"
)]
pub struct CliArgs {
    /// Number of identifiers to print.
    ///
    /// Environment variable: `COUNT`
    #[arg(short = 'n', long, env = "COUNT", default_value_t = 1)]
    pub count: usize,

    /// Seed selecting a deterministic stream. Omit for random identifiers.
    ///
    /// Negative seeds are valid and distinct from their absolute values.
    ///
    /// Environment variable: `SEED`
    #[arg(short, long, env = "SEED", allow_negative_numbers = true)]
    pub seed: Option<Seed>,

    /// Low-water mark of the prefetch queue (seeded mode only).
    ///
    /// Environment variable: `QUEUE_MIN`
    #[arg(long, env = "QUEUE_MIN", default_value_t = FactoryConfig::DEFAULT_QUEUE_MIN)]
    pub queue_min: usize,

    /// High-water mark of the prefetch queue (seeded mode only).
    ///
    /// Environment variable: `QUEUE_MAX`
    #[arg(long, env = "QUEUE_MAX", default_value_t = FactoryConfig::DEFAULT_QUEUE_MAX)]
    pub queue_max: usize,

    /// Print identifiers in uppercase.
    #[arg(short, long, default_value_t = false)]
    pub upper: bool,
}

/// Which stream identifiers come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Random,
    Seeded { seed: Seed, factory: FactoryConfig },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
    pub count: usize,
    pub mode: Mode,
    pub upper: bool,
}

impl TryFrom<CliArgs> for GenConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.count == 0 {
            bail!("COUNT must be greater than 0");
        }

        let mode = match args.seed {
            None => Mode::Random,
            Some(seed) => {
                let factory = FactoryConfig::new(args.queue_min, args.queue_max)
                    .context("QUEUE_MIN must not exceed QUEUE_MAX")?;
                if factory.queue_max == 0 {
                    bail!("QUEUE_MAX must be greater than 0 in seeded mode");
                }
                Mode::Seeded { seed, factory }
            }
        };

        Ok(Self {
            count: args.count,
            mode,
            upper: args.upper,
        })
    }
}
