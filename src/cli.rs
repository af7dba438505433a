//! Command-line structure and command handlers.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use u_roster::config::RunConfig;
use u_roster::fitness::Evaluator;
use u_roster::ga::MutationScope;
use u_roster::io::{
    format_rows, load_names, load_registry, load_schedule, save_schedule, synthesize_workers,
    write_reports, write_schedule,
};
use u_roster::models::RequiredWorkers;
use u_roster::problem::solve;
use u_roster::random::rng_from_option;

/// u-roster - weekly shift roster optimization
///
/// Builds a 7-day, 3-shift roster from a worker file with a genetic
/// algorithm, and scores or reports on saved schedules.
#[derive(Parser)]
#[command(name = "u-roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search for a roster and write it in schedule format
    Solve(SolveArgs),

    /// Print the fitness breakdown of a saved schedule
    Score(ScoreArgs),

    /// Write one text grid per worker for a saved schedule
    Report(ReportArgs),

    /// Write a file of random workers for testing
    GenerateWorkers(GenerateArgs),
}

impl Commands {
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Solve(args) => args.execute(),
            Commands::Score(args) => args.execute(),
            Commands::Report(args) => args.execute(),
            Commands::GenerateWorkers(args) => args.execute(),
        }
    }
}

/// Headcount overrides shared by commands that need them.
#[derive(Args, Debug, Default)]
pub struct HeadcountArgs {
    /// Workers per night shift
    #[arg(long)]
    pub night: Option<usize>,

    /// Workers per day shift
    #[arg(long)]
    pub day: Option<usize>,

    /// Workers per evening shift
    #[arg(long)]
    pub evening: Option<usize>,
}

impl HeadcountArgs {
    fn apply(&self, base: RequiredWorkers) -> RequiredWorkers {
        RequiredWorkers::new(
            self.night.unwrap_or(base.night),
            self.day.unwrap_or(base.day),
            self.evening.unwrap_or(base.evening),
        )
    }

    /// Checks the given flags against headcounts read from a schedule.
    fn check(&self, inferred: RequiredWorkers) -> Result<RequiredWorkers> {
        let wanted = self.apply(inferred);
        if wanted != inferred {
            bail!(
                "schedule staffs night/day/evening with {}/{}/{} workers, flags ask for {}/{}/{}",
                inferred.night,
                inferred.day,
                inferred.evening,
                wanted.night,
                wanted.day,
                wanted.evening,
            );
        }
        Ok(wanted)
    }
}

#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Worker rows: name; day; shift; uuid
    #[arg(short, long)]
    pub workers: PathBuf,

    /// TOML run configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Schedule output file (stdout if omitted)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub headcount: HeadcountArgs,

    /// Generation budget
    #[arg(short, long)]
    pub generations: Option<usize>,

    /// Population size
    #[arg(long)]
    pub population: Option<usize>,

    /// Stop after this many generations without improvement
    #[arg(long)]
    pub stagnation: Option<usize>,

    /// Wall-clock limit in milliseconds
    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Let mutation draw from the whole roster instead of the block's day
    #[arg(long)]
    pub global_mutation: bool,

    /// Disable parallel evaluation and breeding
    #[arg(long)]
    pub serial: bool,
}

impl SolveArgs {
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => RunConfig::default(),
        };

        config.required = self.headcount.apply(config.required);
        let mut ga = std::mem::take(&mut config.ga);
        if let Some(g) = self.generations {
            ga = ga.with_max_generations(g);
        }
        if let Some(p) = self.population {
            ga = ga.with_population_size(p);
        }
        if let Some(s) = self.stagnation {
            ga = ga.with_stagnation_limit(s);
        }
        if let Some(ms) = self.time_limit_ms {
            ga = ga.with_time_limit_ms(ms);
        }
        if let Some(seed) = self.seed {
            ga = ga.with_seed(seed);
        }
        if self.global_mutation {
            ga = ga.with_mutation_scope(MutationScope::Global);
        }
        if self.serial {
            ga = ga.with_parallel(false);
        }
        config.ga = ga;
        Ok(config)
    }

    fn execute(self) -> Result<()> {
        let config = self.run_config()?;
        if config.required.per_day() == 0 {
            bail!("no headcount configured; pass --night/--day/--evening or a [required] table");
        }

        let registry = load_registry(&self.workers)
            .with_context(|| format!("loading workers {}", self.workers.display()))?;
        let result = solve(&registry, &config, None)?;

        info!(
            event = "solve_summary",
            best_score = result.best_score,
            generations = result.generations,
            stop_reason = %result.stop_reason,
        );
        eprintln!(
            "best score {} after {} generations ({})",
            result.best_score, result.generations, result.stop_reason
        );

        match &self.out {
            Some(path) => save_schedule(path, &result.best, &registry)
                .with_context(|| format!("writing schedule {}", path.display()))?,
            None => print!("{}", write_schedule(&result.best, &registry)),
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Worker rows the schedule refers to
    #[arg(short, long)]
    pub workers: PathBuf,

    /// Saved schedule file
    #[arg(short, long)]
    pub schedule: PathBuf,

    // Each omitted flag is inferred from the file.
    #[command(flatten)]
    pub headcount: HeadcountArgs,
}

impl ScoreArgs {
    fn execute(self) -> Result<()> {
        let registry = load_registry(&self.workers)
            .with_context(|| format!("loading workers {}", self.workers.display()))?;
        let loaded = load_schedule(&self.schedule, &registry, None)
            .with_context(|| format!("loading schedule {}", self.schedule.display()))?;
        self.headcount.check(loaded.required)?;

        let evaluator = Evaluator::new(registry.workers());
        let breakdown = evaluator.breakdown(&loaded.roster, &mut evaluator.scratch());
        println!("{breakdown}");
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Worker rows the schedule refers to
    #[arg(short, long)]
    pub workers: PathBuf,

    /// Saved schedule file
    #[arg(short, long)]
    pub schedule: PathBuf,

    /// Directory for the per-worker reports
    #[arg(short, long)]
    pub out_dir: PathBuf,
}

impl ReportArgs {
    fn execute(self) -> Result<()> {
        let registry = load_registry(&self.workers)
            .with_context(|| format!("loading workers {}", self.workers.display()))?;
        let loaded = load_schedule(&self.schedule, &registry, None)
            .with_context(|| format!("loading schedule {}", self.schedule.display()))?;

        let summary = write_reports(&self.out_dir, &loaded.roster, &registry)
            .with_context(|| format!("preparing report dir {}", self.out_dir.display()))?;
        println!(
            "{} reports written to {}",
            summary.written.len(),
            self.out_dir.display()
        );
        for (uuid, err) in &summary.failed {
            eprintln!("worker {uuid}: {err}");
        }
        if !summary.is_complete() {
            bail!("{} reports failed", summary.failed.len());
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Names file, one name per line
    #[arg(short, long)]
    pub names: PathBuf,

    /// Number of workers
    #[arg(short, long, default_value_t = 400)]
    pub count: usize,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// RNG seed
    #[arg(long)]
    pub seed: Option<u64>,
}

impl GenerateArgs {
    fn execute(self) -> Result<()> {
        let names = load_names(&self.names)
            .with_context(|| format!("loading names {}", self.names.display()))?;
        let mut rng = rng_from_option(self.seed);
        let workers = synthesize_workers(&names, self.count, &mut rng)?;
        let text = format_rows(&workers);
        match &self.out {
            Some(path) => std::fs::write(path, text)
                .with_context(|| format!("writing workers {}", path.display()))?,
            None => print!("{text}"),
        }
        Ok(())
    }
}
