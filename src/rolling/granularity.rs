//! Rolling granularity implementation
//!
//! Defines the closed set of rotation periods and the checkpoint arithmetic
//! attached to each of them.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{
    Datelike, Days, Duration as ChronoDuration, Months, NaiveDateTime, NaiveTime, Timelike,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rolling::{CalendarInstant, FormatDescriptor};

/// Rotation granularity of a rolling file sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Granularity {
    /// A single file that never rolls
    #[default]
    #[serde(alias = "infinite")]
    Unbounded = 0,
    /// One file per calendar year
    Year = 1,
    /// One file per calendar month
    Month = 2,
    /// One file per calendar day
    Day = 3,
    /// One file per hour
    Hour = 4,
    /// One file per minute
    Minute = 5,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "unbounded" | "infinite" => Ok(Self::Unbounded),
            "year" => Ok(Self::Year),
            "month" => Ok(Self::Month),
            "day" => Ok(Self::Day),
            "hour" => Ok(Self::Hour),
            "minute" => Ok(Self::Minute),
            _ => Err(Error::invalid_granularity(s)),
        }
    }
}

impl TryFrom<&str> for Granularity {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl TryFrom<u8> for Granularity {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::Unbounded),
            1 => Ok(Self::Year),
            2 => Ok(Self::Month),
            3 => Ok(Self::Day),
            4 => Ok(Self::Hour),
            5 => Ok(Self::Minute),
            _ => Err(Error::invalid_granularity(code)),
        }
    }
}

impl From<Granularity> for u8 {
    fn from(granularity: Granularity) -> Self {
        granularity.code()
    }
}

// Longer periods compare greater; Unbounded is the longest of all.
impl Ord for Granularity {
    fn cmp(&self, other: &Self) -> Ordering {
        other.code().cmp(&self.code())
    }
}

impl PartialOrd for Granularity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Granularity {
    /// Get the stable numeric code of the granularity
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Get the name of the granularity
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unbounded => "unbounded",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
        }
    }

    /// Get all granularities, coarsest first
    pub fn all() -> [Self; 6] {
        [
            Self::Unbounded,
            Self::Year,
            Self::Month,
            Self::Day,
            Self::Hour,
            Self::Minute,
        ]
    }

    /// Get the next finer granularity
    pub fn finer(&self) -> Option<Self> {
        match self {
            Self::Unbounded => Some(Self::Year),
            Self::Year => Some(Self::Month),
            Self::Month => Some(Self::Day),
            Self::Day => Some(Self::Hour),
            Self::Hour => Some(Self::Minute),
            Self::Minute => None,
        }
    }

    /// Get the next coarser granularity
    pub fn coarser(&self) -> Option<Self> {
        match self {
            Self::Minute => Some(Self::Hour),
            Self::Hour => Some(Self::Day),
            Self::Day => Some(Self::Month),
            Self::Month => Some(Self::Year),
            Self::Year => Some(Self::Unbounded),
            Self::Unbounded => None,
        }
    }

    /// Get the date-format token and matching pattern for file names
    pub fn format(&self) -> FormatDescriptor {
        let token = match self {
            Self::Unbounded => "",
            Self::Year => "%Y",
            Self::Month => "%Y-%m",
            Self::Day => "%Y-%m-%d",
            Self::Hour => "%Y-%m-%d-%H",
            Self::Minute => "%Y-%m-%d-%H-%M",
        };
        FormatDescriptor::from_token(token)
    }

    /// Start of the period containing `instant`, in the instant's own zone.
    ///
    /// Finer fields are zeroed, never rounded. Returns `None` for
    /// [`Granularity::Unbounded`].
    pub fn current_checkpoint<I: CalendarInstant>(&self, instant: &I) -> Option<I> {
        let start = self.truncate(instant.wall_clock())?;
        Some(instant.at_wall_clock(start))
    }

    /// Start of the period following the one containing `instant`.
    ///
    /// The current checkpoint is advanced by one calendar unit on the wall
    /// clock (one month after January 1 is February 1). If the zone skips
    /// that wall-clock reading and the result would not be later than the
    /// current checkpoint, another unit is added. Returns `None` for
    /// [`Granularity::Unbounded`] and when the boundary lies past the
    /// representable range.
    pub fn next_checkpoint<I: CalendarInstant>(&self, instant: &I) -> Option<I> {
        let mut wall = self.truncate(instant.wall_clock())?;
        let current = instant.at_wall_clock(wall);

        loop {
            wall = self.advance(wall)?;
            let next = instant.at_wall_clock(wall);
            if next > current {
                return Some(next);
            }
        }
    }

    /// The half-open period `[current, next)` containing `instant`
    pub fn checkpoint_range<I: CalendarInstant>(&self, instant: &I) -> Option<(I, I)> {
        let current = self.current_checkpoint(instant)?;
        let next = self.next_checkpoint(instant)?;
        Some((current, next))
    }

    fn truncate(&self, wall: NaiveDateTime) -> Option<NaiveDateTime> {
        let date = wall.date();
        let midnight = |days_back: u32| {
            (date - ChronoDuration::days(i64::from(days_back))).and_time(NaiveTime::MIN)
        };

        let start = match self {
            Self::Unbounded => return None,
            Self::Year => midnight(date.ordinal0()),
            Self::Month => midnight(date.day0()),
            Self::Day => midnight(0),
            Self::Hour => midnight(0) + ChronoDuration::hours(i64::from(wall.hour())),
            Self::Minute => {
                midnight(0) + ChronoDuration::minutes(i64::from(wall.hour() * 60 + wall.minute()))
            }
        };
        Some(start)
    }

    fn advance(&self, wall: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Self::Unbounded => None,
            Self::Year => wall.checked_add_months(Months::new(12)),
            Self::Month => wall.checked_add_months(Months::new(1)),
            Self::Day => wall.checked_add_days(Days::new(1)),
            Self::Hour => wall.checked_add_signed(ChronoDuration::hours(1)),
            Self::Minute => wall.checked_add_signed(ChronoDuration::minutes(1)),
        }
    }
}
