//! Daily traded-value tracking
//!
//! Accumulates the quote value each account traded during the current UTC
//! day. Timestamps are caller supplied Unix nanos; the tracker only ever
//! rolls forward to a later day, and value from an earlier day is dropped.

use std::collections::HashMap;

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use types::ids::AccountId;

/// UTC calendar day containing `timestamp` (Unix nanos)
pub fn utc_day(timestamp: i64) -> NaiveDate {
    Utc.timestamp_nanos(timestamp).date_naive()
}

/// Per-account traded value for one UTC day
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyVolume {
    day: Option<NaiveDate>,
    traded: HashMap<AccountId, Decimal>,
}

impl DailyVolume {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to the day containing `timestamp`, clearing totals when it is a
    /// later day than the current one
    pub fn roll(&mut self, timestamp: i64) {
        let day = utc_day(timestamp);
        if self.day.map_or(true, |current| day > current) {
            self.day = Some(day);
            self.traded.clear();
        }
    }

    /// Add `value` to the account's total for the day of `timestamp`
    ///
    /// Returns `false` when that day is already behind the tracked one and
    /// the value was not counted.
    pub fn record(&mut self, account_id: AccountId, value: Decimal, timestamp: i64) -> bool {
        self.roll(timestamp);
        if self.day != Some(utc_day(timestamp)) {
            return false;
        }
        *self.traded.entry(account_id).or_insert(Decimal::ZERO) += value;
        true
    }

    /// Value traded by the account in the current day
    pub fn traded(&self, account_id: &AccountId) -> Decimal {
        self.traded.get(account_id).copied().unwrap_or(Decimal::ZERO)
    }

    /// Value traded by the account on the day containing `timestamp`
    ///
    /// Zero for any day other than the tracked one.
    pub fn traded_at(&self, account_id: &AccountId, timestamp: i64) -> Decimal {
        if self.day == Some(utc_day(timestamp)) {
            self.traded(account_id)
        } else {
            Decimal::ZERO
        }
    }

    pub fn day(&self) -> Option<NaiveDate> {
        self.day
    }
}
