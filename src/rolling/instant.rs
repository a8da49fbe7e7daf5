//! Instants with a time-zone disposition
//!
//! Checkpoints are computed on the wall clock of the caller's instant and
//! mapped back into the same zone, so a `DateTime<Local>` yields local
//! checkpoints, a `DateTime<Utc>` yields UTC ones and a `NaiveDateTime`
//! stays unzoned.

use chrono::{
    DateTime, Duration as ChronoDuration, FixedOffset, LocalResult, NaiveDateTime, Offset,
    TimeZone,
};

/// Upper bound on how far a skipped wall-clock reading is walked forward.
/// The longest real-world gaps are a full calendar day.
const MAX_GAP_MINUTES: i64 = 48 * 60;

/// An instant that carries its own time-zone disposition
pub trait CalendarInstant: Clone + PartialOrd {
    /// The wall-clock reading of this instant in its own zone
    fn wall_clock(&self) -> NaiveDateTime;

    /// An instant in the same zone whose wall clock reads `wall`
    fn at_wall_clock(&self, wall: NaiveDateTime) -> Self;
}

impl CalendarInstant for NaiveDateTime {
    fn wall_clock(&self) -> NaiveDateTime {
        *self
    }

    fn at_wall_clock(&self, wall: NaiveDateTime) -> Self {
        wall
    }
}

impl<Tz: TimeZone> CalendarInstant for DateTime<Tz> {
    fn wall_clock(&self) -> NaiveDateTime {
        self.naive_local()
    }

    // Inside a fold, stay on the side of it the instant itself is on
    fn at_wall_clock(&self, wall: NaiveDateTime) -> Self {
        resolve(&self.timezone(), wall, Some(self.offset().fix()))
    }
}

/// Map a wall-clock reading into `tz`.
///
/// Ambiguous readings (clocks turned back) take the earliest instant, unless
/// the instant being truncated sits in the later half of the fold.
/// Readings skipped by the zone (clocks turned forward) move to the first
/// minute that exists after them.
pub fn resolve_wall_clock<Tz: TimeZone>(tz: &Tz, wall: NaiveDateTime) -> DateTime<Tz> {
    resolve(tz, wall, None)
}

fn resolve<Tz: TimeZone>(
    tz: &Tz,
    wall: NaiveDateTime,
    preferred: Option<FixedOffset>,
) -> DateTime<Tz> {
    match tz.from_local_datetime(&wall) {
        LocalResult::Single(instant) => return instant,
        LocalResult::Ambiguous(earliest, latest) => {
            if preferred == Some(latest.offset().fix()) {
                return latest;
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(%wall, "ambiguous wall clock, using earliest instant");
            return earliest;
        }
        LocalResult::None => {}
    }

    for minutes in 1..=MAX_GAP_MINUTES {
        let Some(shifted) = wall.checked_add_signed(ChronoDuration::minutes(minutes)) else {
            break;
        };
        if let Some(instant) = tz.from_local_datetime(&shifted).earliest() {
            #[cfg(feature = "tracing")]
            tracing::debug!(%wall, %shifted, "wall clock skipped by zone, moved forward");
            return instant;
        }
    }

    // No offset found nearby; read the wall clock as UTC
    #[cfg(feature = "tracing")]
    tracing::debug!(%wall, "no local mapping for wall clock, reading it as UTC");
    tz.from_utc_datetime(&wall)
}
