/*
ironfit: membership and attendance engine for the Iron Man Fitness Studio.
Copyright (C) 2025 Iron Man Fitness Studio

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/
use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Expired,
}

/// A member's subscription window. Replaced wholesale on renewal or a new
/// purchase; the status flip to `Expired` is one-way and recomputed lazily
/// on read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub plan: String,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
    pub status: SubscriptionStatus,
}

/// The stored member record. Attendance is a set of naive calendar dates;
/// `BTreeSet` keeps it deduplicated and in chronological order, which for
/// zero-padded ISO dates is also the serialized string order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Member {
    pub id: u64,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub phone: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    // Opaque to the engine; the hashing scheme belongs to the auth gate.
    #[serde(rename = "passwordHash", default)]
    pub password_hash: Option<String>,
    #[serde(default)]
    pub subscription: Option<Subscription>,
    #[serde(default)]
    pub attendance: BTreeSet<NaiveDate>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

impl Member {
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Derived attendance stats persisted as a secondary, best-effort record.
/// Never authoritative: recomputed from the attendance set on every write,
/// so a lost update self-corrects on the next one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberStats {
    #[serde(rename = "memberId")]
    pub member_id: u64,
    #[serde(rename = "memberName")]
    pub member_name: String,
    #[serde(rename = "lastAttendance")]
    pub last_attendance: Option<NaiveDate>,
    #[serde(rename = "attendanceStreak")]
    pub current_streak: u32,
    #[serde(rename = "maxStreak")]
    pub max_streak: u32,
}

/// Transient view of a member's streak state relative to a reference date.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreakSnapshot {
    pub current_streak: u32,
    pub max_streak: u32,
    pub last_attendance: Option<NaiveDate>,
}

/// One day of the subscription window, ready for heatmap rendering.
/// `day_of_week` is Sunday-based: 0=Sunday .. 6=Saturday.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub attended: bool,
    #[serde(rename = "isToday")]
    pub is_today: bool,
    #[serde(rename = "dayOfWeek")]
    pub day_of_week: u32,
}
