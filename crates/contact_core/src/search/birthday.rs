//! Rolling birthday-window query.
//!
//! # Responsibility
//! - Compute the cyclic month/day window from today forward.
//! - Match contacts whose recurring birthday falls inside that window.
//!
//! # Invariants
//! - Membership is a single wrap-aware interval test on a fixed 366-day
//!   calendar projection, never independent month/day comparisons.
//! - Feb 29 occupies slot 60 of the projection and matches exactly the
//!   windows whose arc covers that slot (any window spanning the
//!   Feb 28 -> Mar 1 boundary), in leap and non-leap years alike.

use crate::model::contact::Contact;
use crate::repo::contact_repo::{contact_from_row, CONTACT_SELECT_SQL};
use crate::search::{SearchError, SearchResult};
use chrono::{Datelike, Days, NaiveDate};
use rusqlite::Connection;

/// Maximum forward shift: a full non-leap year minus one day, since day
/// zero of the window is today itself.
pub const MAX_FORWARD_SHIFT_DAYS: u16 = 364;

/// Cumulative day offsets for a calendar where every month has its
/// maximum length (Feb = 29), so every real month/day pair has a slot.
const MONTH_SLOT_OFFSETS: [u16; 12] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

/// Inclusive cyclic window of recurring calendar dates, compared by
/// month/day only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthdayWindow {
    start_slot: u16,
    end_slot: u16,
}

impl BirthdayWindow {
    /// Builds the window `[today, today + forward_shift_days]`.
    ///
    /// The end date is computed with real calendar arithmetic (month and
    /// year rollover), then both endpoints are projected onto the fixed
    /// 366-day calendar.
    ///
    /// # Errors
    /// - [`SearchError::ShiftOutOfRange`] when `forward_shift_days`
    ///   exceeds [`MAX_FORWARD_SHIFT_DAYS`].
    pub fn starting(today: NaiveDate, forward_shift_days: u16) -> SearchResult<Self> {
        if forward_shift_days > MAX_FORWARD_SHIFT_DAYS {
            return Err(SearchError::ShiftOutOfRange {
                requested: forward_shift_days,
            });
        }

        let end = today
            .checked_add_days(Days::new(u64::from(forward_shift_days)))
            .ok_or(SearchError::ShiftOutOfRange {
                requested: forward_shift_days,
            })?;

        Ok(Self {
            start_slot: day_slot(today.month(), today.day()),
            end_slot: day_slot(end.month(), end.day()),
        })
    }

    /// Tests whether a recurring `(month, day)` date lies on the forward
    /// cyclic arc from start to end, inclusive.
    pub fn contains(&self, month: u32, day: u32) -> bool {
        let slot = day_slot(month, day);
        if self.start_slot <= self.end_slot {
            (self.start_slot..=self.end_slot).contains(&slot)
        } else {
            // Arc crosses Dec 31 -> Jan 1: late-year and early-year segments.
            slot >= self.start_slot || slot <= self.end_slot
        }
    }
}

/// Projects a month/day pair onto the fixed 366-day calendar, 1-based.
fn day_slot(month: u32, day: u32) -> u16 {
    let offset = MONTH_SLOT_OFFSETS[(month as usize).saturating_sub(1).min(11)];
    offset + day as u16
}

/// Returns contacts whose birthday falls inside `window`, in insertion
/// order. Issues one SELECT and applies the cyclic test per row.
pub fn upcoming_birthdays(conn: &Connection, window: &BirthdayWindow) -> SearchResult<Vec<Contact>> {
    let mut stmt = conn.prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY id ASC;"))?;
    let mut rows = stmt.query([])?;
    let mut contacts = Vec::new();

    while let Some(row) = rows.next()? {
        let contact = contact_from_row(row)?;
        if window.contains(contact.birth_date.month(), contact.birth_date.day()) {
            contacts.push(contact);
        }
    }

    Ok(contacts)
}
