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
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::EngineError;
use crate::model::{Member, MemberStats};

/// Durable mapping from member identity to the full member record, plus the
/// secondary derived-stats record. Writes replace whole records atomically;
/// last write wins.
#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn get(&self, id: u64) -> Result<Member, EngineError>;
    async fn put(&self, member: Member) -> Result<(), EngineError>;
    async fn list(&self) -> Result<Vec<Member>, EngineError>;
    async fn put_stats(&self, stats: MemberStats) -> Result<(), EngineError>;
}

/// Flat-JSON-file store: one array file for member records, a second for
/// derived stats, mirroring the split that makes the stats write a separate
/// failure domain from the member write. Each write rewrites the whole file
/// through a temp-file-and-rename, so readers never observe a torn file.
pub struct JsonFileStore {
    members_path: PathBuf,
    stats_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(config: &Config) -> Self {
        Self {
            members_path: config.members_path.clone(),
            stats_path: config.stats_path.clone(),
        }
    }

    async fn read_all<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, EngineError> {
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            // A store that has never been written reads as empty.
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(EngineError::WriteFailure(err)),
        };
        if bytes.is_empty() {
            return Ok(Vec::new());
        }
        let records = serde_json::from_slice(&bytes).map_err(io::Error::from)?;
        Ok(records)
    }

    async fn write_all<T: Serialize>(path: &Path, records: &[T]) -> Result<(), EngineError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(records).map_err(io::Error::from)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, path).await?;
        trace!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }
}

#[async_trait]
impl MemberStore for JsonFileStore {
    async fn get(&self, id: u64) -> Result<Member, EngineError> {
        let members: Vec<Member> = Self::read_all(&self.members_path).await?;
        members
            .into_iter()
            .find(|member| member.id == id)
            .ok_or(EngineError::NotFound)
    }

    async fn put(&self, member: Member) -> Result<(), EngineError> {
        let mut members: Vec<Member> = Self::read_all(&self.members_path).await?;
        match members.iter().position(|existing| existing.id == member.id) {
            Some(idx) => members[idx] = member,
            None => members.push(member),
        }
        Self::write_all(&self.members_path, &members).await
    }

    async fn list(&self) -> Result<Vec<Member>, EngineError> {
        Self::read_all(&self.members_path).await
    }

    async fn put_stats(&self, stats: MemberStats) -> Result<(), EngineError> {
        let mut all: Vec<MemberStats> = Self::read_all(&self.stats_path).await?;
        match all.iter().position(|existing| existing.member_id == stats.member_id) {
            Some(idx) => all[idx] = stats,
            None => all.push(stats),
        }
        debug!("Updating derived stats in {}", self.stats_path.display());
        Self::write_all(&self.stats_path, &all).await
    }
}

/// In-memory store for tests and demos. The failure toggles let callers
/// exercise the primary-versus-secondary write policy without touching a
/// filesystem.
#[derive(Default)]
pub struct MemoryStore {
    members: RwLock<HashMap<u64, Member>>,
    stats: RwLock<HashMap<u64, MemberStats>>,
    fail_member_writes: AtomicBool,
    fail_stats_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_member_writes(&self, fail: bool) {
        self.fail_member_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_stats_writes(&self, fail: bool) {
        self.fail_stats_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn stats_for(&self, member_id: u64) -> Option<MemberStats> {
        self.stats.read().await.get(&member_id).cloned()
    }

    fn broken_pipe() -> EngineError {
        EngineError::WriteFailure(io::Error::new(io::ErrorKind::BrokenPipe, "store unavailable"))
    }
}

#[async_trait]
impl MemberStore for MemoryStore {
    async fn get(&self, id: u64) -> Result<Member, EngineError> {
        self.members
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(EngineError::NotFound)
    }

    async fn put(&self, member: Member) -> Result<(), EngineError> {
        if self.fail_member_writes.load(Ordering::SeqCst) {
            return Err(Self::broken_pipe());
        }
        self.members.write().await.insert(member.id, member);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Member>, EngineError> {
        let mut members: Vec<Member> = self.members.read().await.values().cloned().collect();
        members.sort_by_key(|member| member.id);
        Ok(members)
    }

    async fn put_stats(&self, stats: MemberStats) -> Result<(), EngineError> {
        if self.fail_stats_writes.load(Ordering::SeqCst) {
            return Err(Self::broken_pipe());
        }
        self.stats.write().await.insert(stats.member_id, stats);
        Ok(())
    }
}
