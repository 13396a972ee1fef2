//! Validity Windows
//!
//! The inclusive range of civil dates during which a discount may apply.

use jiff::civil::Date;
use thiserror::Error;

/// A requested window violates the required date ordering.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InvalidWindow {
    /// The end date falls before the start date.
    #[error("end date {end} precedes start date {start}")]
    EndBeforeStart {
        /// Start of the requested window
        start: Date,

        /// End of the requested window
        end: Date,
    },

    /// An extension would move the end date earlier.
    #[error("new end date {requested} precedes current end date {current}")]
    WouldShorten {
        /// Current end date
        current: Date,

        /// Requested end date
        requested: Date,
    },

    /// A shortened end date would fall before the start date.
    #[error("new end date {requested} precedes start date {start}")]
    PrecedesStart {
        /// Start of the window
        start: Date,

        /// Requested end date
        requested: Date,
    },

    /// A shortened end date is not earlier than the current end date.
    #[error("new end date {requested} is not before current end date {current}")]
    DoesNotShorten {
        /// Current end date
        current: Date,

        /// Requested end date
        requested: Date,
    },

    /// A live discount cannot be shortened to end in the past.
    #[error("new end date {requested} precedes today ({today}) for a live discount")]
    EndsBeforeToday {
        /// The date the change was requested on
        today: Date,

        /// Requested end date
        requested: Date,
    },
}

/// Inclusive `[start, end]` date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiscountWindow {
    start: Date,
    end: Date,
}

impl DiscountWindow {
    /// Create a new window.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidWindow::EndBeforeStart`] if `end` precedes `start`.
    pub fn new(start: Date, end: Date) -> Result<Self, InvalidWindow> {
        if end < start {
            return Err(InvalidWindow::EndBeforeStart { start, end });
        }

        Ok(Self { start, end })
    }

    /// Create a window covering a single day.
    pub const fn single_day(date: Date) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// First day of the window
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Last day of the window
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Whether `date` falls within the window, boundaries included.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Move the end date later (or keep it).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidWindow::WouldShorten`] if `new_end` precedes the current end.
    pub fn extend(self, new_end: Date) -> Result<Self, InvalidWindow> {
        if new_end < self.end {
            return Err(InvalidWindow::WouldShorten {
                current: self.end,
                requested: new_end,
            });
        }

        Ok(Self {
            end: new_end,
            ..self
        })
    }

    /// Move the end date strictly earlier, never before the start.
    ///
    /// # Errors
    ///
    /// - [`InvalidWindow::PrecedesStart`] if `new_end` precedes the start.
    /// - [`InvalidWindow::DoesNotShorten`] if `new_end` is not before the current end.
    pub fn shorten(self, new_end: Date) -> Result<Self, InvalidWindow> {
        if new_end < self.start {
            return Err(InvalidWindow::PrecedesStart {
                start: self.start,
                requested: new_end,
            });
        }

        if new_end >= self.end {
            return Err(InvalidWindow::DoesNotShorten {
                current: self.end,
                requested: new_end,
            });
        }

        Ok(Self {
            end: new_end,
            ..self
        })
    }
}
