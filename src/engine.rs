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
use tracing::{debug, trace, warn};

use crate::calendar;
use crate::error::EngineError;
use crate::model::{
    CalendarDay, Member, MemberStats, StreakSnapshot, Subscription, SubscriptionStatus,
};
use crate::store::MemberStore;
use crate::streak;

/// Attendance and membership engine. Every operation is a read-modify-write
/// cycle against the store; the reference date is always injected by the
/// caller, never read from the wall clock here.
pub struct AttendanceEngine<S> {
    store: S,
}

impl<S: MemberStore> AttendanceEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records a visit for `date` (defaulting to `today`). Marking a date
    /// that is already present is a no-op that still succeeds. The member
    /// write is authoritative; the derived-stats write that follows is
    /// best-effort. Returns the attendance set in chronological order.
    pub async fn mark_attendance(
        &self,
        member_id: u64,
        date: Option<&str>,
        today: NaiveDate,
    ) -> Result<Vec<NaiveDate>, EngineError> {
        let date = match date {
            Some(raw) => parse_date(raw)?,
            None => today,
        };

        let mut member = self.store.get(member_id).await?;
        if !member.attendance.insert(date) {
            trace!("Attendance for {} on {} already recorded", member_id, date);
            return Ok(member.attendance.iter().copied().collect());
        }

        debug!("Marking attendance for member {} on {}", member_id, date);
        self.store.put(member.clone()).await?;
        self.persist_stats(&member, today).await;

        Ok(member.attendance.iter().copied().collect())
    }

    /// Bulk variant: replaces the whole stored set with the deduplicated,
    /// sorted union of `dates`. This is a destructive full replace, not a
    /// merge: dates absent from the input are dropped.
    pub async fn replace_attendance(
        &self,
        member_id: u64,
        dates: &[&str],
        today: NaiveDate,
    ) -> Result<Vec<NaiveDate>, EngineError> {
        let mut parsed = BTreeSet::new();
        for raw in dates {
            parsed.insert(parse_date(raw)?);
        }

        let mut member = self.store.get(member_id).await?;
        debug!(
            "Replacing {} attendance dates with {} for member {}",
            member.attendance.len(),
            parsed.len(),
            member_id
        );
        member.attendance = parsed;
        self.store.put(member.clone()).await?;
        self.persist_stats(&member, today).await;

        Ok(member.attendance.iter().copied().collect())
    }

    /// Read-only attendance view, ascending.
    pub async fn attendance(&self, member_id: u64) -> Result<Vec<NaiveDate>, EngineError> {
        let member = self.store.get(member_id).await?;
        Ok(member.attendance.iter().copied().collect())
    }

    /// Streak snapshot for a member, recomputed from scratch.
    pub async fn streaks(
        &self,
        member_id: u64,
        today: NaiveDate,
    ) -> Result<StreakSnapshot, EngineError> {
        let member = self.store.get(member_id).await?;
        let dates: Vec<NaiveDate> = member.attendance.iter().copied().collect();
        Ok(streak::compute(&dates, today))
    }

    /// Loads a member profile, lazily flipping an overrun `Active`
    /// subscription to `Expired` and persisting the flip. The flip is
    /// one-way and idempotent, so a lost persist self-corrects on the next
    /// read and concurrent readers converge on the same record.
    pub async fn profile(&self, member_id: u64, today: NaiveDate) -> Result<Member, EngineError> {
        let mut member = self.store.get(member_id).await?;

        if let Some(subscription) = member.subscription.as_mut() {
            if subscription.status == SubscriptionStatus::Active && subscription.end_date < today {
                debug!(
                    "Subscription for member {} lapsed on {}, marking expired",
                    member_id, subscription.end_date
                );
                subscription.status = SubscriptionStatus::Expired;
                if let Err(err) = self.store.put(member.clone()).await {
                    warn!(
                        "Failed to persist subscription expiry for member {}: {}",
                        member_id, err
                    );
                }
            }
        }

        Ok(member)
    }

    /// Wholesale replaces the member's subscription with a fresh `Active`
    /// window, as on renewal or a new purchase.
    pub async fn start_subscription(
        &self,
        member_id: u64,
        plan: &str,
        start: &str,
        end: &str,
    ) -> Result<Member, EngineError> {
        let start_date = parse_date(start)?;
        let end_date = parse_date(end)?;
        if end_date < start_date {
            return Err(EngineError::invalid(format!(
                "subscription window ends ({end}) before it starts ({start})"
            )));
        }

        let mut member = self.store.get(member_id).await?;
        debug!(
            "Starting '{}' subscription for member {}: {} to {}",
            plan, member_id, start_date, end_date
        );
        member.subscription = Some(Subscription {
            plan: plan.to_owned(),
            start_date,
            end_date,
            status: SubscriptionStatus::Active,
        });
        self.store.put(member.clone()).await?;

        Ok(member)
    }

    /// Activity calendar over the member's subscription window. A member
    /// without a subscription has no window and gets an empty calendar.
    pub async fn calendar(
        &self,
        member_id: u64,
        today: NaiveDate,
    ) -> Result<Vec<CalendarDay>, EngineError> {
        let member = self.store.get(member_id).await?;
        let Some(subscription) = member.subscription.as_ref() else {
            return Ok(Vec::new());
        };
        Ok(calendar::project(
            subscription.start_date,
            subscription.end_date,
            &member.attendance,
            today,
        )
        .collect())
    }

    /// Every member whose subscription is still live as of `today`, with a
    /// fresh streak snapshot. Read-only: the expiry rule is applied as a
    /// filter without persisting flips.
    pub async fn subscribed_members(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<(Member, StreakSnapshot)>, EngineError> {
        let members = self.store.list().await?;
        let mut rows = Vec::new();
        for member in members {
            let live = member
                .subscription
                .as_ref()
                .is_some_and(|s| s.status == SubscriptionStatus::Active && s.end_date >= today);
            if !live {
                continue;
            }
            trace!("Member {} holds a live subscription", member.id);
            let dates: Vec<NaiveDate> = member.attendance.iter().copied().collect();
            let snapshot = streak::compute(&dates, today);
            rows.push((member, snapshot));
        }
        Ok(rows)
    }

    // Derived stats are never authoritative: a failed write is logged and
    // swallowed, and the next recomputation overwrites it from scratch.
    async fn persist_stats(&self, member: &Member, today: NaiveDate) {
        let dates: Vec<NaiveDate> = member.attendance.iter().copied().collect();
        let snapshot = streak::compute(&dates, today);
        let stats = MemberStats {
            member_id: member.id,
            member_name: member.name(),
            last_attendance: snapshot.last_attendance,
            current_streak: snapshot.current_streak,
            max_streak: snapshot.max_streak,
        };
        if let Err(err) = self.store.put_stats(stats).await {
            warn!(
                "Failed to persist derived stats for member {}: {}",
                member.id, err
            );
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, EngineError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| EngineError::invalid(format!("'{raw}' is not a valid YYYY-MM-DD date")))
}
