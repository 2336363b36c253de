//! Year-month buckets and their human-readable labels
//!
//! Movements are bucketed by the calendar month of their effective date.
//! `YearMonth` is the machine form ("2025-01"); `MonthLabel` is the display
//! form ("Ene 2025") whose ordering follows the calendar, not the alphabet.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Localized month abbreviations in calendar order
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// English abbreviations, accepted when parsing labels produced by other tools
const ENGLISH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Error parsing a period or label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    UnknownMonth(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            Self::UnknownMonth(s) => write!(f, "Unknown month abbreviation: {}", s),
        }
    }
}

impl std::error::Error for PeriodParseError {}

/// A calendar month of a specific year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Create a year-month; `None` when the month is outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing a date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of this month
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// The following month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::from_date(date) == *self
    }

    /// The display label for this month
    pub fn label(&self) -> MonthLabel {
        MonthLabel(*self)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = PeriodParseError;

    /// Parse "YYYY-MM"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        Self::new(year, month).ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A "Mon YYYY" label, e.g. "Ene 2025"
///
/// Ordering is chronological: by year, then by position of the month in the
/// fixed calendar sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthLabel(YearMonth);

impl MonthLabel {
    pub fn period(&self) -> YearMonth {
        self.0
    }
}

impl fmt::Display for MonthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abbr = MONTH_ABBREVIATIONS[(self.0.month - 1) as usize];
        write!(f, "{} {}", abbr, self.0.year)
    }
}

impl FromStr for MonthLabel {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (abbr, year) = s
            .split_once(' ')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .trim()
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let index = MONTH_ABBREVIATIONS
            .iter()
            .position(|m| m.eq_ignore_ascii_case(abbr))
            .or_else(|| {
                ENGLISH_ABBREVIATIONS
                    .iter()
                    .position(|m| m.eq_ignore_ascii_case(abbr))
            })
            .ok_or_else(|| PeriodParseError::UnknownMonth(abbr.to_string()))?;
        let period = YearMonth::new(year, index as u32 + 1)
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        Ok(Self(period))
    }
}

impl Serialize for MonthLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Order a set of month labels chronologically
///
/// Duplicates collapse; the result depends only on the labels supplied, so it
/// must be recomputed whenever the set of labels changes.
pub fn order_month_labels<I, S>(labels: I) -> Result<Vec<MonthLabel>, PeriodParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parsed = labels
        .into_iter()
        .map(|s| s.as_ref().parse::<MonthLabel>())
        .collect::<Result<BTreeSet<_>, _>>()?;
    Ok(parsed.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_month_parse_and_display() {
        let ym: YearMonth = "2025-01".parse().unwrap();
        assert_eq!(ym.year(), 2025);
        assert_eq!(ym.month(), 1);
        assert_eq!(ym.to_string(), "2025-01");
        assert!("2025-13".parse::<YearMonth>().is_err());
        assert!("202501".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_next_crosses_year() {
        let dec = YearMonth::new(2024, 12).unwrap();
        assert_eq!(dec.next(), YearMonth::new(2025, 1).unwrap());
    }

    #[test]
    fn test_label_display() {
        let label = YearMonth::new(2024, 12).unwrap().label();
        assert_eq!(label.to_string(), "Dic 2024");
        assert_eq!(YearMonth::new(2025, 8).unwrap().label().to_string(), "Ago 2025");
    }

    #[test]
    fn test_label_parse() {
        let label: MonthLabel = "Abr 2025".parse().unwrap();
        assert_eq!(label.period(), YearMonth::new(2025, 4).unwrap());

        let english: MonthLabel = "Aug 2025".parse().unwrap();
        assert_eq!(english.to_string(), "Ago 2025");

        assert!(matches!(
            "Foo 2025".parse::<MonthLabel>(),
            Err(PeriodParseError::UnknownMonth(_))
        ));
    }

    #[test]
    fn test_ordering_across_year_boundary() {
        let ordered = order_month_labels(["Ene 2025", "Dic 2024", "Feb 2025", "Ene 2025"]).unwrap();
        let rendered: Vec<String> = ordered.iter().map(|l| l.to_string()).collect();
        assert_eq!(rendered, vec!["Dic 2024", "Ene 2025", "Feb 2025"]);
    }

    #[test]
    fn test_ordering_is_not_alphabetical() {
        let ordered = order_month_labels(["Oct 2025", "Abr 2025", "Ago 2025", "Ene 2025"]).unwrap();
        let rendered: Vec<String> = ordered.iter().map(|l| l.to_string()).collect();
        assert_eq!(rendered, vec!["Ene 2025", "Abr 2025", "Ago 2025", "Oct 2025"]);
    }

    #[test]
    fn test_label_serializes_as_string() {
        let label = YearMonth::new(2025, 3).unwrap().label();
        assert_eq!(serde_json::to_string(&label).unwrap(), "\"Mar 2025\"");
    }
}
