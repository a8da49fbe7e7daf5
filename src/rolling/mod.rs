//! Time-based rotation checkpoints for rolling log files
//!
//! A rolling sink writes into one file per period. This module tells it
//! where the current period started, when the next one begins, and how the
//! files for each period are named and recognized.

mod granularity;
mod instant;
mod format;
mod naming;

pub use granularity::Granularity;
pub use instant::{resolve_wall_clock, CalendarInstant};
pub use format::FormatDescriptor;
pub use naming::RollingFileNamer;

use crate::error::{Error, Result};

/// Look up the date-format token and matching pattern for a granularity.
///
/// Accepts a [`Granularity`] or a raw code or name; raw values outside the
/// enumeration fail with [`Error::InvalidGranularity`].
pub fn format_and_pattern<G>(granularity: G) -> Result<(String, String)>
where
    G: TryInto<Granularity>,
    Error: From<G::Error>,
{
    let granularity = granularity.try_into()?;
    Ok(granularity.format().into_parts())
}

/// Start of the period containing `instant`
pub fn current_checkpoint<G, I>(granularity: G, instant: &I) -> Result<Option<I>>
where
    G: TryInto<Granularity>,
    Error: From<G::Error>,
    I: CalendarInstant,
{
    let granularity = granularity.try_into()?;
    Ok(granularity.current_checkpoint(instant))
}

/// Start of the period after the one containing `instant`
pub fn next_checkpoint<G, I>(granularity: G, instant: &I) -> Result<Option<I>>
where
    G: TryInto<Granularity>,
    Error: From<G::Error>,
    I: CalendarInstant,
{
    let granularity = granularity.try_into()?;
    Ok(granularity.next_checkpoint(instant))
}
