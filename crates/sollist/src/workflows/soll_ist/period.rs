use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Inclusive month range within one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    year: i32,
    start_month: u32,
    end_month: u32,
    #[serde(skip)]
    start_date: NaiveDate,
    #[serde(skip)]
    end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeriodError {
    #[error("month {0} is outside 1..=12")]
    InvalidMonth(u32),
    #[error("start month {start} is after end month {end}")]
    InvertedRange { start: u32, end: u32 },
    #[error("quarter {0} is outside 1..=4")]
    InvalidQuarter(u32),
    #[error("year {0} cannot be represented as a calendar date")]
    YearOutOfRange(i32),
}

impl Period {
    pub fn new(year: i32, start_month: u32, end_month: u32) -> Result<Self, PeriodError> {
        for month in [start_month, end_month] {
            if !(1..=12).contains(&month) {
                return Err(PeriodError::InvalidMonth(month));
            }
        }
        if start_month > end_month {
            return Err(PeriodError::InvertedRange {
                start: start_month,
                end: end_month,
            });
        }

        let start_date = NaiveDate::from_ymd_opt(year, start_month, 1)
            .ok_or(PeriodError::YearOutOfRange(year))?;
        let end_date = last_day_of_month(year, end_month).ok_or(PeriodError::YearOutOfRange(year))?;

        Ok(Self {
            year,
            start_month,
            end_month,
            start_date,
            end_date,
        })
    }

    pub fn month(year: i32, month: u32) -> Result<Self, PeriodError> {
        Self::new(year, month, month)
    }

    pub fn quarter(year: i32, quarter: u32) -> Result<Self, PeriodError> {
        if !(1..=4).contains(&quarter) {
            return Err(PeriodError::InvalidQuarter(quarter));
        }
        let start = (quarter - 1) * 3 + 1;
        Self::new(year, start, start + 2)
    }

    pub fn full_year(year: i32) -> Result<Self, PeriodError> {
        Self::new(year, 1, 12)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn start_month(&self) -> u32 {
        self.start_month
    }

    pub fn end_month(&self) -> u32 {
        self.end_month
    }

    pub fn month_count(&self) -> u32 {
        self.end_month - self.start_month + 1
    }

    /// First day of the start month.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of the end month.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    pub fn contains_month(&self, year: i32, month: u32) -> bool {
        year == self.year && (self.start_month..=self.end_month).contains(&month)
    }

    /// `2025-01..2025-03`, or `2025-04` for a single month.
    pub fn label(&self) -> String {
        if self.start_month == self.end_month {
            format!("{}-{:02}", self.year, self.start_month)
        } else {
            format!(
                "{}-{:02}..{}-{:02}",
                self.year, self.start_month, self.year, self.end_month
            )
        }
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if month == 12 {
        return NaiveDate::from_ymd_opt(year, 12, 31);
    }
    NaiveDate::from_ymd_opt(year, month + 1, 1)
        .and_then(|first| first.pred_opt())
        .filter(|date| date.month() == month)
}
