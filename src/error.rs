//! Error types shared by the strategies and the CLI.

use crate::pieces::ShapeKind;

/// Fatal outcome of a `solve` call or of a single strategy run.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("cannot pack an empty shape sequence")]
    EmptyInput,
    #[error("no rotation of shape {0} covers the origin")]
    NoOriginVariant(ShapeKind),
    #[error("no legal placement found for the {remaining} remaining shapes")]
    NoCandidate { remaining: usize },
    #[error("search frontier exhausted after {expansions} expansions without a complete packing")]
    SearchExhausted { expansions: usize },
    #[error("search gave up after {expansions} expansions")]
    SearchBudgetExceeded { expansions: usize },
}

/// A shape token that names none of the seven kinds.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseShapeError {
    #[error("unknown shape kind '{0}', expected one of I, O, J, L, S, Z, T")]
    Unknown(String),
}
