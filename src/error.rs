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
use std::io;

use thiserror::Error;

/// Engine error taxonomy. `NotFound` and `InvalidInput` are surfaced to the
/// caller immediately; `WriteFailure` is fatal on the primary member write
/// and logged-and-swallowed on derived-stats writes.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("member record not found")]
    NotFound,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("persistence layer unavailable: {0}")]
    WriteFailure(#[from] io::Error),
}

impl EngineError {
    pub fn invalid(message: impl Into<String>) -> Self {
        EngineError::InvalidInput(message.into())
    }
}
