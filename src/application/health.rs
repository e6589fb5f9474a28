//! Liveness report for load balancers and uptime monitors.

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use serde::Serialize;
use sysinfo::System;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::warn;

pub const SERVICE_NAME: &str = "arcadia";

const MEMORY_WARNING_RATIO: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthChecks {
    pub server: CheckStatus,
    pub memory: CheckStatus,
    pub filesystem: CheckStatus,
}

impl HealthChecks {
    pub fn has_errors(&self) -> bool {
        [self.server, self.memory, self.filesystem].contains(&CheckStatus::Error)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: String,
    pub service: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub checks: HealthChecks,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        !self.checks.has_errors()
    }
}

pub struct HealthService {
    data_directory: PathBuf,
    uploads_directory: PathBuf,
    started_at: Instant,
}

impl HealthService {
    pub fn new(data_directory: impl Into<PathBuf>, uploads_directory: impl Into<PathBuf>) -> Self {
        Self {
            data_directory: data_directory.into(),
            uploads_directory: uploads_directory.into(),
            started_at: Instant::now(),
        }
    }

    pub async fn report(&self) -> HealthReport {
        let checks = HealthChecks {
            server: CheckStatus::Ok,
            memory: self.memory_check(),
            filesystem: self.filesystem_check().await,
        };

        HealthReport {
            status: if checks.has_errors() {
                "unhealthy"
            } else {
                "healthy"
            },
            timestamp: OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .unwrap_or_default(),
            service: SERVICE_NAME,
            version: env!("CARGO_PKG_VERSION"),
            uptime_seconds: self.started_at.elapsed().as_secs(),
            checks,
        }
    }

    fn memory_check(&self) -> CheckStatus {
        let mut system = System::new();
        system.refresh_memory();
        memory_status(system.used_memory(), system.total_memory())
    }

    async fn filesystem_check(&self) -> CheckStatus {
        let mut status = CheckStatus::Ok;
        for directory in [&self.data_directory, &self.uploads_directory] {
            match directory_status(directory).await {
                CheckStatus::Ok => {}
                CheckStatus::Warning => status = CheckStatus::Warning,
                CheckStatus::Error => return CheckStatus::Error,
            }
        }
        status
    }
}

/// Warning once more than nine tenths of system memory is in use.
pub fn memory_status(used: u64, total: u64) -> CheckStatus {
    if total == 0 {
        return CheckStatus::Ok;
    }
    if used as f64 / total as f64 > MEMORY_WARNING_RATIO {
        CheckStatus::Warning
    } else {
        CheckStatus::Ok
    }
}

async fn directory_status(path: &Path) -> CheckStatus {
    match tokio::fs::try_exists(path).await {
        Ok(true) => CheckStatus::Ok,
        Ok(false) => CheckStatus::Warning,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Filesystem health check failed");
            CheckStatus::Error
        }
    }
}
