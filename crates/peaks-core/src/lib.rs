//! Peak and valley detection over a single, fully materialized series.
//!
//! [`detect`] finds interior local maxima of the series (peaks) and of its
//! negation (valleys), measures their prominence and width, and keeps the ones
//! whose prominence reaches the caller's threshold.

pub mod detector;
pub mod error;
pub mod extrema;
pub mod properties;

pub use detector::{detect, Detection, Extremum, ExtremumKind};
pub use error::DetectError;
pub use properties::Properties;
