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
use std::path::{Path, PathBuf};

use anyhow::Context as _;

/// Runtime configuration, read once at startup and passed down. There are no
/// module-level path or secret singletons and no built-in fallback for the
/// secret: a missing variable is a startup error.
#[derive(Clone, Debug)]
pub struct Config {
    /// Flat JSON file holding the member records.
    pub members_path: PathBuf,
    /// Flat JSON file holding the derived attendance stats.
    pub stats_path: PathBuf,
    /// Secret material handed to the auth gate that fronts the engine.
    pub secret: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let data_dir =
            std::env::var("IRONFIT_DATA_DIR").context("IRONFIT_DATA_DIR was not found in the ENV")?;
        let secret =
            std::env::var("IRONFIT_SECRET").context("IRONFIT_SECRET was not found in the ENV")?;

        Ok(Self::new(Path::new(&data_dir), secret))
    }

    pub fn new(data_dir: &Path, secret: impl Into<String>) -> Self {
        Self {
            members_path: data_dir.join("members.json"),
            stats_path: data_dir.join("stats.json"),
            secret: secret.into(),
        }
    }
}
