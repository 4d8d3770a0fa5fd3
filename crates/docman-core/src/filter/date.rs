use super::FilterCriterion;
use crate::document::{parse_date, Document, DATE_FORMAT};
use crate::error::{Error, Result};
use chrono::{Local, NaiveDate};

/// The dates a [`DateFilter`] accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSpan {
    /// A single day
    On(NaiveDate),
    /// An inclusive range of days
    Between(NaiveDate, NaiveDate),
}

/// Matches dated documents whose date falls in a span.
///
/// Documents without a date never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFilter {
    span: DateSpan,
}

impl DateFilter {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            span: DateSpan::On(date),
        }
    }

    pub fn between(begin: NaiveDate, end: NaiveDate) -> Result<Self> {
        if begin > end {
            return Err(Error::InvalidFilter(format!(
                "date range starts after it ends: {} > {}",
                begin.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            )));
        }
        Ok(Self {
            span: DateSpan::Between(begin, end),
        })
    }

    /// Every day of a year
    pub fn year(year: i32) -> Result<Self> {
        Self::between(ymd(year, 1, 1)?, ymd(year, 12, 31)?)
    }

    /// Every day of a month
    pub fn month(year: i32, month: u32) -> Result<Self> {
        let first = ymd(year, month, 1)?;
        let last = match month {
            12 => ymd(year, 12, 31)?,
            _ => ymd(year, month + 1, 1)?
                .pred_opt()
                .ok_or_else(|| invalid(year, month, 1))?,
        };
        Self::between(first, last)
    }

    pub fn day(year: i32, month: u32, day: u32) -> Result<Self> {
        Ok(Self::on(ymd(year, month, day)?))
    }

    pub fn today() -> Self {
        Self::on(Local::now().date_naive())
    }

    /// Parse `YYYY-MM-DD` bounds; without an end the filter is a single day
    pub fn parse(begin: &str, end: Option<&str>) -> Result<Self> {
        let begin = parse_date(begin)?;
        match end {
            Some(end) => Self::between(begin, parse_date(end)?),
            None => Ok(Self::on(begin)),
        }
    }

    /// Build from loose numbers: a non-positive month selects the whole year
    /// and a non-positive day the whole month
    pub fn from_numbers(year: i32, month: i32, day: i32) -> Result<Self> {
        let Ok(month) = u32::try_from(month) else {
            return Self::year(year);
        };
        if month == 0 {
            return Self::year(year);
        }
        match u32::try_from(day) {
            Ok(day) if day > 0 => Self::day(year, month, day),
            _ => Self::month(year, month),
        }
    }

    pub fn span(&self) -> DateSpan {
        self.span
    }
}

impl FilterCriterion for DateFilter {
    fn matches(&self, document: &Document) -> bool {
        let Some(date) = document.date() else {
            return false;
        };
        match self.span {
            DateSpan::On(day) => date == day,
            DateSpan::Between(begin, end) => begin <= date && date <= end,
        }
    }

    fn accuracy(&self, _document: &Document) -> u32 {
        match self.span {
            DateSpan::On(_) => 0,
            DateSpan::Between(..) => 1,
        }
    }

    fn describe(&self) -> String {
        match self.span {
            DateSpan::On(day) => format!("date = {}", day.format(DATE_FORMAT)),
            DateSpan::Between(begin, end) => format!(
                "date in {}..={}",
                begin.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            ),
        }
    }
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid(year, month, day))
}

fn invalid(year: i32, month: u32, day: u32) -> Error {
    Error::InvalidDate(format!("{:04}-{:02}-{:02}", year, month, day))
}
