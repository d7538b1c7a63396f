//! Strategy selection.
//!
//! A [`Solver`] runs the configured strategy, or for [`StrategyKind::Best`]
//! several strategies on independent boards, and keeps the highest-scoring
//! packing. Every answer is checked with [`validate`] before it is returned;
//! violations are logged, never fatal.

use crate::error::SolveError;
use crate::greedy::GreedyStrategy;
use crate::pieces::{Placement, ShapeKind};
use crate::rectangle::RectangleStrategy;
use crate::scoring::{score, validate};
use crate::search::{ExhaustiveSearch, DEFAULT_SEARCH_BUDGET};
use crate::touchpoint::TouchpointStrategy;
use crate::PackingStrategy;

/// Which strategy a [`Solver`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    Greedy,
    Touchpoint,
    /// Touchpoint attempts over score-ordered rectangles.
    Rectangle,
    Exhaustive,
    /// Greedy, touchpoint and rectangle, plus the exhaustive search on small
    /// inputs.
    #[default]
    Best,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    pub strategy: StrategyKind,
    /// Node expansions allowed to the exhaustive search; `None` is unbounded.
    pub search_budget: Option<usize>,
    /// Largest input on which [`StrategyKind::Best`] tries the exhaustive
    /// search.
    pub exhaustive_max_shapes: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Best,
            search_budget: Some(DEFAULT_SEARCH_BUDGET),
            exhaustive_max_shapes: 4,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The strategies to run for an input of `count` shapes, in tie-break
    /// order.
    fn strategies(&self, count: usize) -> Vec<Box<dyn PackingStrategy>> {
        let search = ExhaustiveSearch::new(self.config.search_budget);
        match self.config.strategy {
            StrategyKind::Greedy => vec![Box::new(GreedyStrategy)],
            StrategyKind::Touchpoint => vec![Box::new(TouchpointStrategy)],
            StrategyKind::Rectangle => vec![Box::new(RectangleStrategy)],
            StrategyKind::Exhaustive => vec![Box::new(search)],
            StrategyKind::Best => {
                let mut strategies: Vec<Box<dyn PackingStrategy>> = vec![
                    Box::new(GreedyStrategy),
                    Box::new(TouchpointStrategy),
                    Box::new(RectangleStrategy),
                ];
                if count <= self.config.exhaustive_max_shapes {
                    strategies.push(Box::new(search));
                }
                strategies
            }
        }
    }

    /// Packs `shapes`, returning one placement per shape.
    ///
    /// With a single strategy its error is returned as is. When several run,
    /// a failing one is skipped as long as another succeeds; the first
    /// error is returned only if all of them fail.
    pub fn solve(&self, shapes: &[ShapeKind]) -> Result<Vec<Placement>, SolveError> {
        if shapes.is_empty() {
            return Err(SolveError::EmptyInput);
        }

        let mut best: Option<(f64, &'static str, Vec<Placement>)> = None;
        let mut first_error = None;

        for strategy in self.strategies(shapes.len()) {
            match strategy.pack(shapes) {
                Ok(placements) => {
                    let packing_score = score(&placements);
                    log::debug!("{} scored {packing_score:.3}", strategy.name());
                    if best
                        .as_ref()
                        .map_or(true, |(top, _, _)| packing_score > *top)
                    {
                        best = Some((packing_score, strategy.name(), placements));
                    }
                }
                Err(err) => {
                    log::warn!("{} failed: {err}", strategy.name());
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }

        let Some((packing_score, name, placements)) = best else {
            return Err(first_error.unwrap_or(SolveError::NoCandidate {
                remaining: shapes.len(),
            }));
        };

        log::info!(
            "packed {} totems with {name} (score {packing_score:.3})",
            placements.len()
        );
        for violation in validate(&placements) {
            log::warn!("{name} produced an invalid packing: {violation}");
        }
        Ok(placements)
    }
}
