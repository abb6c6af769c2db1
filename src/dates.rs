//! dates.rs
//!
//! Short date formatting for the stats block on the landing page:
//!     "MM/DD/YY"
//!
//! Month and day are zero-padded, the year keeps its last two digits.
//! Dates are rendered in UTC so the output does not depend on the host's
//! local timezone.

use chrono::{DateTime, Utc};

/// Returns a commit date as `MM/DD/YY`
pub fn short_date(date: DateTime<Utc>) -> String {
    date.format("%m/%d/%y").to_string()
}
