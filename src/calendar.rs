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
//! Activity-calendar projection over a subscription window, for heatmap
//! rendering. Recomputed fresh on every call; no iterator state survives.
use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::model::CalendarDay;

/// One `CalendarDay` per calendar day of the inclusive `[start, end]`
/// window, in chronological order. Lazy and restartable; an inverted window
/// yields nothing.
pub fn project<'a>(
    start: NaiveDate,
    end: NaiveDate,
    attendance: &'a BTreeSet<NaiveDate>,
    today: NaiveDate,
) -> impl Iterator<Item = CalendarDay> + 'a {
    start
        .iter_days()
        .take_while(move |date| *date <= end)
        .map(move |date| CalendarDay {
            date,
            attended: attendance.contains(&date),
            is_today: date == today,
            day_of_week: date.weekday().num_days_from_sunday(),
        })
}

/// Groups projected days into 7-wide rows for grid rendering. The first row
/// is padded with `None` placeholders up to the first day's Sunday-based
/// weekday index, and the last row is padded with trailing `None`s to a full
/// week, so a window starting on a Wednesday gets exactly 3 leading blanks.
pub fn weeks(days: impl IntoIterator<Item = CalendarDay>) -> Vec<Vec<Option<CalendarDay>>> {
    let mut rows: Vec<Vec<Option<CalendarDay>>> = Vec::new();
    let mut row: Vec<Option<CalendarDay>> = Vec::new();

    for day in days {
        if rows.is_empty() && row.is_empty() {
            row.extend(std::iter::repeat(None).take(day.day_of_week as usize));
        }
        row.push(Some(day));
        if row.len() == 7 {
            rows.push(std::mem::take(&mut row));
        }
    }

    if !row.is_empty() {
        row.resize(7, None);
        rows.push(row);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn set(specs: &[&str]) -> BTreeSet<NaiveDate> {
        specs.iter().map(|s| d(s)).collect()
    }

    #[test]
    fn projects_every_day_of_the_window_in_order() {
        let attendance = set(&["2024-06-06", "2024-06-08"]);
        let days: Vec<_> =
            project(d("2024-06-05"), d("2024-06-08"), &attendance, d("2024-06-07")).collect();

        assert_eq!(days.len(), 4);
        assert_eq!(days[0].date, d("2024-06-05"));
        assert!(!days[0].attended);
        assert!(days[1].attended);
        assert!(days[2].is_today);
        assert!(!days[2].attended);
        assert!(days[3].attended);
        assert_eq!(days[3].date, d("2024-06-08"));
    }

    #[test]
    fn projection_is_restartable() {
        let attendance = set(&["2024-06-06"]);
        let first: Vec<_> =
            project(d("2024-06-05"), d("2024-06-08"), &attendance, d("2024-06-07")).collect();
        let second: Vec<_> =
            project(d("2024-06-05"), d("2024-06-08"), &attendance, d("2024-06-07")).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn inverted_window_is_empty() {
        let attendance = BTreeSet::new();
        let days: Vec<_> =
            project(d("2024-06-08"), d("2024-06-05"), &attendance, d("2024-06-07")).collect();
        assert!(days.is_empty());
    }

    // 2024-06-05 is a Wednesday: the first grid row must carry 3 leading
    // blanks (Sun, Mon, Tue) before Wed..Sat.
    #[test]
    fn wednesday_start_pads_three_leading_blanks() {
        let attendance = set(&["2024-06-05", "2024-06-07"]);
        let rows = weeks(project(
            d("2024-06-05"),
            d("2024-06-08"),
            &attendance,
            d("2024-06-07"),
        ));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 7);
        assert!(rows[0][0].is_none());
        assert!(rows[0][1].is_none());
        assert!(rows[0][2].is_none());

        let wed = rows[0][3].expect("Wednesday cell should be filled");
        assert_eq!(wed.date, d("2024-06-05"));
        assert!(wed.attended);
        let thu = rows[0][4].expect("Thursday cell should be filled");
        assert!(!thu.attended);
        let fri = rows[0][5].expect("Friday cell should be filled");
        assert!(fri.attended);
        assert!(fri.is_today);
        let sat = rows[0][6].expect("Saturday cell should be filled");
        assert!(!sat.attended);
    }

    #[test]
    fn final_partial_week_is_padded_to_seven() {
        let attendance = BTreeSet::new();
        // 2024-06-02 is a Sunday; ten days span two rows, the second ending
        // after Tuesday 2024-06-11.
        let rows = weeks(project(
            d("2024-06-02"),
            d("2024-06-11"),
            &attendance,
            d("2024-06-11"),
        ));

        assert_eq!(rows.len(), 2);
        assert!(rows[0].iter().all(|cell| cell.is_some()));
        assert_eq!(rows[1].len(), 7);
        assert!(rows[1][2].is_some());
        assert!(rows[1][3].is_none());
        assert!(rows[1][6].is_none());
    }

    #[test]
    fn empty_projection_yields_no_rows() {
        assert!(weeks(std::iter::empty()).is_empty());
    }
}
