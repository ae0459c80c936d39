//! The two textual date shapes the audit file uses.

use chrono::{NaiveDate, NaiveDateTime};

use super::validate::ValueFault;

/// Plain dates: `YYYY-MM-DD`.
pub const SQL_DATE: &str = "%Y-%m-%d";

/// Timestamps: `YYYY-MM-DDThh:mm:ss`.
pub const DATE_T_TIME: &str = "%Y-%m-%dT%H:%M:%S";

pub fn format_date(date: NaiveDate) -> String {
    date.format(SQL_DATE).to_string()
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ValueFault> {
    NaiveDate::parse_from_str(raw, SQL_DATE).map_err(|_| ValueFault::BadDate(raw.to_string()))
}

pub fn format_date_time(date_time: NaiveDateTime) -> String {
    date_time.format(DATE_T_TIME).to_string()
}

pub fn parse_date_time(raw: &str) -> Result<NaiveDateTime, ValueFault> {
    NaiveDateTime::parse_from_str(raw, DATE_T_TIME)
        .map_err(|_| ValueFault::BadDateTime(raw.to_string()))
}
