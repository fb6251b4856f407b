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
use chrono::NaiveDate;

use crate::model::StreakSnapshot;

/// The single authoritative streak computation. Every presentation surface
/// and every derived-stats write goes through here; the algorithm is never
/// duplicated elsewhere.
///
/// `dates` must be ascending and distinct (the attendance set guarantees
/// this). `today` is injected rather than read from the wall clock so the
/// result is deterministic under test.
///
/// The walk keeps a running run length that restarts at 1 on any gap other
/// than exactly one calendar day; `max_streak` is the longest run seen.
/// `current_streak` is the final run only while the streak is alive, i.e.
/// the last attendance is `today` or the day before; a lapsed streak reports
/// 0 even though the historical run stays in `max_streak`.
pub fn compute(dates: &[NaiveDate], today: NaiveDate) -> StreakSnapshot {
    let Some(&last) = dates.last() else {
        return StreakSnapshot::default();
    };

    let mut run: u32 = 1;
    let mut max_streak: u32 = 1;
    for pair in dates.windows(2) {
        // Calendar-date subtraction, not timestamp subtraction: a "gap of 1"
        // means adjacent calendar days, immune to DST drift.
        if (pair[1] - pair[0]).num_days() == 1 {
            run += 1;
        } else {
            run = 1;
        }
        max_streak = max_streak.max(run);
    }

    let current_streak = match (today - last).num_days() {
        0 | 1 => run,
        _ => 0,
    };

    StreakSnapshot {
        current_streak,
        max_streak,
        last_attendance: Some(last),
    }
}
