//! Shared primitive types for the quire typesetter.
//!
//! Everything in the engine measures one-dimensional space in *scaled points*
//! (`Sp`): 1 pt = 65,536 sp, kept in a signed 64-bit integer so that all
//! position and width arithmetic is exact. This crate owns the unit
//! conversions, the distance literal parser ("2.5 cm", "-3pt", ...), and the
//! roman-numeral rendering used for front-matter folios.

mod distance;
mod roman;

pub use distance::{format_distance, parse_distance, Distance, DistanceError, SpaceUnit};
pub use roman::to_roman;

/// A distance in scaled points. 1 pt = 65,536 sp; an `i64` lets us represent
/// distances up to about 49 gigameters, which is plenty for a book.
pub type Sp = i64;
