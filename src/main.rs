//! Totem Packer
//!
//! Local single-shot runs of the totem packing strategies: pack a shape
//! sequence given on the command line, or a random one, and print the
//! packing with its score.

use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use totem_packer::grid::format_packing;
use totem_packer::pieces::ShapeKind;
use totem_packer::{score, validate, Placement, Solver, SolverConfig, StrategyKind};

/// Packs tetromino totems as densely as possible.
#[derive(Parser)]
#[command(name = "totem-packer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pack the given shapes, e.g. `solve O O L T`.
    Solve {
        /// Shape kinds: I, O, J, L, S, Z or T.
        #[arg(required = true)]
        shapes: Vec<ShapeKind>,
        #[command(flatten)]
        options: SolveOptions,
    },
    /// Pack a random shape sequence.
    Random {
        /// Number of shapes to draw.
        #[arg(long, default_value_t = 8)]
        count: usize,
        /// Seed for a reproducible draw.
        #[arg(long)]
        seed: Option<u64>,
        #[command(flatten)]
        options: SolveOptions,
    },
    /// List every rotation of every shape kind.
    Catalog,
}

#[derive(Args)]
struct SolveOptions {
    /// Placement strategy to run.
    #[arg(long, value_enum, default_value_t = StrategyArg::Best)]
    strategy: StrategyArg,
    /// Node expansions allowed to the exhaustive search (0 for no limit).
    #[arg(long, default_value_t = totem_packer::search::DEFAULT_SEARCH_BUDGET)]
    budget: usize,
    /// Largest input on which `best` also runs the exhaustive search.
    #[arg(long, default_value_t = SolverConfig::default().exhaustive_max_shapes)]
    exhaustive_max_shapes: usize,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Greedy,
    Touchpoint,
    Rectangle,
    Exhaustive,
    Best,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Greedy => StrategyKind::Greedy,
            StrategyArg::Touchpoint => StrategyKind::Touchpoint,
            StrategyArg::Rectangle => StrategyKind::Rectangle,
            StrategyArg::Exhaustive => StrategyKind::Exhaustive,
            StrategyArg::Best => StrategyKind::Best,
        }
    }
}

impl SolveOptions {
    fn config(&self) -> SolverConfig {
        SolverConfig {
            strategy: self.strategy.into(),
            search_budget: (self.budget > 0).then_some(self.budget),
            exhaustive_max_shapes: self.exhaustive_max_shapes,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Solve { shapes, options } => run_solver(&shapes, &options),
        Command::Random {
            count,
            seed,
            options,
        } => {
            let shapes = random_shapes(count, seed);
            println!(
                "Shapes: {}",
                shapes.iter().map(ShapeKind::to_string).collect::<Vec<_>>().join(" ")
            );
            run_solver(&shapes, &options);
        }
        Command::Catalog => print!("{}", format_catalog()),
    }
}

/// Solves and prints the report, exiting non-zero on a fatal error.
fn run_solver(shapes: &[ShapeKind], options: &SolveOptions) {
    match Solver::new(options.config()).solve(shapes) {
        Ok(placements) => print!("{}", format_report(&placements)),
        Err(e) => {
            eprintln!("Failed to pack shapes: {e}");
            std::process::exit(1);
        }
    }
}

/// Draws `count` shapes uniformly, seeded from the OS unless `seed` is set.
fn random_shapes(count: usize, seed: Option<u64>) -> Vec<ShapeKind> {
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    };
    (0..count)
        .map(|_| ShapeKind::ALL[rng.random_range(0..ShapeKind::ALL.len())])
        .collect()
}

/// Rendered grid, score, one line per totem, then any validation findings.
fn format_report(placements: &[Placement]) -> String {
    let mut output = format_packing(placements);
    output.push_str(&format!("Score: {:.3}\n", score(placements)));
    for placement in placements {
        output.push_str(&format!("{placement}\n"));
    }
    for violation in validate(placements) {
        output.push_str(&format!("Invalid: {violation}\n"));
    }
    output
}

/// Every rotation of every kind, drawn with y growing upward.
fn format_catalog() -> String {
    let mut output = String::new();
    for kind in ShapeKind::ALL {
        for (i, variant) in kind.variants().iter().enumerate() {
            output.push_str(&format!(
                "{kind} #{i} ({}x{})\n",
                variant.width, variant.height
            ));
            output.push_str(&format_packing(&[Placement::new(kind, variant.cells)]));
            output.push('\n');
        }
    }
    output
}
