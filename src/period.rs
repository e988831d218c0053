//! Calendar-month periods, the unit of time-based aggregation.
//!
//! A [Period] is keyed by an ASCII string such as `January_2024`, which is
//! stable across locales and safe to use as a map key or query value. The key
//! is turned into a display label by replacing the underscore with a space.

use std::{cmp::Ordering, fmt::Display, ops::RangeInclusive, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, Month};

use crate::{Error, Transaction};

/// The number of months shown either side of the current month in the period selector.
pub const PERIOD_WINDOW_RADIUS: u8 = 8;

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// A calendar month in a specific year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    year: i32,
    month: Month,
}

impl Period {
    /// Create a period from a year and month.
    pub fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// The period that `date` falls in.
    pub fn of(date: Date) -> Self {
        Self::new(date.year(), date.month())
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The calendar month.
    pub fn month(&self) -> Month {
        self.month
    }

    /// The map key for this period, e.g. `January_2024`.
    pub fn key(&self) -> String {
        format!("{}_{:04}", self.month, self.year)
    }

    /// The human-readable label for this period, e.g. `January 2024`.
    pub fn label(&self) -> String {
        format!("{} {:04}", self.month, self.year)
    }

    /// Whether `date` falls in this period.
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The period immediately after this one.
    pub fn next(&self) -> Self {
        match self.month {
            Month::December => Self::new(self.year + 1, Month::January),
            month => Self::new(self.year, month.next()),
        }
    }

    /// The period immediately before this one.
    pub fn previous(&self) -> Self {
        match self.month {
            Month::January => Self::new(self.year - 1, Month::December),
            month => Self::new(self.year, month.previous()),
        }
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year
            .cmp(&other.year)
            .then((self.month as u8).cmp(&(other.month as u8)))
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Period {
    type Err = Error;

    /// Parse a period key such as `January_2024`.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidPeriod] if the month name is not a full
    /// English month name or the year is not four digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidPeriod(s.to_owned());

        let (month_name, year) = s.split_once('_').ok_or_else(invalid)?;

        let month = MONTHS
            .into_iter()
            .find(|month| month.to_string() == month_name)
            .ok_or_else(invalid)?;

        if year.len() != 4 || !year.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(invalid());
        }

        let year = year.parse().map_err(|_| invalid())?;

        Ok(Self::new(year, month))
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key())
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(serde::de::Error::custom)
    }
}

/// Turn any period key into its display label by replacing underscores with spaces.
pub fn display_label(key: &str) -> String {
    key.split('_').collect::<Vec<_>>().join(" ")
}

/// Lists the periods offered in the period selector.
///
/// The window runs from [PERIOD_WINDOW_RADIUS] months before the month of
/// `today` to the same number of months after it, whether or not there are
/// any transactions in those months.
pub fn period_window(today: Date) -> Vec<Period> {
    let mut period = Period::of(today);

    for _ in 0..PERIOD_WINDOW_RADIUS {
        period = period.previous();
    }

    let window_length = 2 * PERIOD_WINDOW_RADIUS as usize + 1;
    let mut periods = Vec::with_capacity(window_length);

    for _ in 0..window_length {
        periods.push(period);
        period = period.next();
    }

    periods
}

/// Selects the transactions that occurred on a date in `dates`, inclusive of both ends.
pub fn within_dates(
    transactions: &[Transaction],
    dates: RangeInclusive<Date>,
) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|transaction| dates.contains(&transaction.occurred_at().date()))
        .collect()
}

/// Sorts transactions with the most recent first.
///
/// Transactions are ordered by when they occurred, and transactions that
/// occurred at the same time are ordered by when they were recorded.
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| {
        b.occurred_at()
            .cmp(&a.occurred_at())
            .then_with(|| b.recorded_at().cmp(&a.recorded_at()))
    });
}
