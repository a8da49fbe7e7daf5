//! # roll_period
//!
//! Rotation checkpoints for time-based rolling log files.
//!
//! A rolling sink configured with a [`Granularity`] asks this crate three
//! things: which date token and matching pattern name its files, where the
//! period containing an instant starts, and when the next period begins.
//! Everything is a pure function of its inputs; opening, writing and
//! deleting files stays with the sink.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use roll_period::Granularity;
//!
//! let now = Utc.with_ymd_and_hms(2021, 3, 15, 14, 27, 9).unwrap();
//! let start = Granularity::Day.current_checkpoint(&now).unwrap();
//! let roll_at = Granularity::Day.next_checkpoint(&now).unwrap();
//!
//! assert_eq!(start, Utc.with_ymd_and_hms(2021, 3, 15, 0, 0, 0).unwrap());
//! assert_eq!(roll_at, Utc.with_ymd_and_hms(2021, 3, 16, 0, 0, 0).unwrap());
//! assert_eq!(Granularity::Day.format().render(&start), "2021-03-15");
//! ```

pub mod config;
pub mod error;
pub mod rolling;

pub use config::RollingConfig;
pub use error::{Error, Result};
pub use rolling::{
    current_checkpoint, format_and_pattern, next_checkpoint, CalendarInstant, FormatDescriptor,
    Granularity, RollingFileNamer,
};
