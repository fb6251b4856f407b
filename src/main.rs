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
use anyhow::Context as _;
use chrono::{Local, NaiveDate};
use tracing::{info, trace};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ironfit::{AttendanceEngine, Config, JsonFileStore, MemberStore};

fn setup_tracing() -> anyhow::Result<()> {
    let env =
        std::env::var("IRONFIT_RUST_ENV").context("IRONFIT_RUST_ENV was not found in the ENV")?;
    let crate_name = env!("CARGO_CRATE_NAME");

    let filter = EnvFilter::new(if env == "production" {
        format!("{crate_name}=info")
    } else {
        format!("{crate_name}=trace")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().pretty().with_writer(std::io::stdout))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    setup_tracing().context("Failed to setup tracing")?;

    info!("Tracing initialized. Continuing main...");
    let config = Config::from_env().context("Failed to load configuration")?;
    let store = JsonFileStore::new(&config);
    let engine = AttendanceEngine::new(store);

    let today = Local::now().date_naive();
    run_presence_report(&engine, today).await
}

/// Logs the daily presence report: who of the actively subscribed members
/// showed up today, and who carries the longest live streaks.
async fn run_presence_report<S: MemberStore>(
    engine: &AttendanceEngine<S>,
    today: NaiveDate,
) -> anyhow::Result<()> {
    trace!("Starting presence report");
    let mut rows = engine
        .subscribed_members(today)
        .await
        .context("Failed to load subscribed members")?;

    if rows.is_empty() {
        info!("No members hold an active subscription today");
        return Ok(());
    }

    let total = rows.len();
    let present = rows
        .iter()
        .filter(|(member, _)| member.attendance.contains(&today))
        .count();
    let percentage = (present as f32 / total as f32) * 100.0;

    info!("Presence report - {}", today.format("%B %d, %Y"));
    info!(
        "Present: {} of {} subscribed members ({}%)",
        present,
        total,
        percentage.round() as i32
    );

    for (member, _) in &rows {
        if !member.attendance.contains(&today) {
            info!("Absent today: {}", member.name());
        }
    }

    rows.sort_by(|a, b| b.1.current_streak.cmp(&a.1.current_streak));
    for (member, snapshot) in rows.iter().take(3) {
        if snapshot.current_streak > 0 {
            info!(
                "Streak leader: {} - {} days (best {})",
                member.name(),
                snapshot.current_streak,
                snapshot.max_streak
            );
        }
    }

    trace!("Completed presence report");
    Ok(())
}
