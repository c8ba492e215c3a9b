use chrono::NaiveDate;

/// `m:ss`, as shown on the question countdown.
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes}:{remainder:02}")
}

#[must_use]
pub fn format_seconds(seconds: u64) -> String {
    format!("{seconds}s")
}

#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
