//! Day-by-day availability of a service.
//!
//! A [`ServiceCalendar`] folds the weekly pattern of a `calendar` row and the
//! `calendar_dates` exceptions for the same service into one value that can
//! answer "does this service run on that date" without touching the dataset.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::identifiers::Identifier;
use crate::models::service::Service;
use crate::models::service_change::{ExceptionType, ServiceChange};

pub(crate) const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Set of weekdays packed into one byte, bit 0 = Monday.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WeekdayFlags(u8);

impl WeekdayFlags {
    pub fn new() -> Self {
        Self(0)
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }

    pub fn set(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    pub fn unset(&mut self, day: Weekday) {
        self.0 &= !Self::bit(day);
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Days in the set, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEK.into_iter().filter(|day| self.contains(*day))
    }
}

impl FromIterator<Weekday> for WeekdayFlags {
    fn from_iter<I: IntoIterator<Item = Weekday>>(days: I) -> Self {
        days.into_iter().fold(Self::new(), |mut flags, day| {
            flags.set(day);
            flags
        })
    }
}

/// Weekly pattern plus dated exceptions of one service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceCalendar {
    pub service_id: Identifier<Service>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub weekdays: WeekdayFlags,
    /// At most one exception per date; a later change for the same date wins.
    pub exceptions: HashMap<NaiveDate, ExceptionType>,
}

impl ServiceCalendar {
    /// Build the calendar of `service`, applying the exceptions that belong
    /// to it. Changes for other services are ignored.
    pub fn new<'a>(service: &Service, changes: impl IntoIterator<Item = &'a ServiceChange>) -> Self {
        let exceptions = changes
            .into_iter()
            .filter(|change| change.service_id == service.id)
            .map(|change| (change.date, change.exception_type))
            .collect();

        Self {
            service_id: service.id.clone(),
            start_date: service.start_date,
            end_date: service.end_date,
            weekdays: service.service_days(),
            exceptions,
        }
    }

    pub fn exception_on(&self, date: NaiveDate) -> Option<ExceptionType> {
        self.exceptions.get(&date).copied()
    }

    /// Exceptions override the weekly pattern, even outside the date range.
    pub fn runs_on(&self, date: NaiveDate) -> bool {
        match self.exception_on(date) {
            Some(ExceptionType::Added) => true,
            Some(ExceptionType::Removed) => false,
            None => {
                (self.start_date..=self.end_date).contains(&date) && self.weekdays.contains(date.weekday())
            }
        }
    }

    /// Dates in `[from, to]` on which the service runs.
    pub fn active_dates(&self, from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> + '_ {
        from.iter_days()
            .take_while(move |date| *date <= to)
            .filter(|date| self.runs_on(*date))
    }
}
