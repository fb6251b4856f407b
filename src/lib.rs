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
pub mod calendar;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod store;
/// The single authoritative streak computation; every surface that shows a
/// streak goes through this module.
pub mod streak;

pub use config::Config;
pub use engine::AttendanceEngine;
pub use error::EngineError;
pub use model::{
    CalendarDay, Member, MemberStats, StreakSnapshot, Subscription, SubscriptionStatus,
};
pub use store::{JsonFileStore, MemberStore, MemoryStore};
