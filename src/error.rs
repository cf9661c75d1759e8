//! Crate-level error types.

use thiserror::Error;

/// Errors surfaced from polygon construction.
///
/// Geometry that merely vanishes under cleaning/simplification is not an
/// error; creation reports that as an empty id list instead. Guarded
/// operations (wrong mode, empty history) are silent no-ops.
#[derive(Debug, Error)]
pub enum Error {
    /// The supplied ring contains a NaN or infinite coordinate.
    #[error("ring coordinate {index} is not finite")]
    NonFiniteCoordinate { index: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
