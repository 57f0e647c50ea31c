use std::{fs, path::Path, sync::Arc};

use anyhow::{bail, Context};
use serde::Serialize;
use serde_json::{json, Value};
use shared::{
    error::TimelineQueryError,
    protocol::{coerce_year, TimelineResponse},
};

/// Read-only timeline entries, served in file order.
#[derive(Clone)]
pub struct ApiContext {
    pub entries: Arc<Vec<Value>>,
}

impl ApiContext {
    pub fn new(entries: Vec<Value>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_entries())
    }
}

pub fn timeline_route() -> &'static str {
    "/api/v1/timeline"
}

pub fn health_route() -> &'static str {
    "/api/v1/health"
}

pub fn ready_route() -> &'static str {
    "/api/v1/ready"
}

/// Service identity reported by the liveness check.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub name: String,
    pub env: String,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub ok: bool,
    pub service: String,
    pub env: String,
}

#[derive(Debug, Serialize)]
pub struct ReadyStatus {
    pub ready: bool,
}

pub fn health(service: &ServiceInfo) -> HealthStatus {
    HealthStatus {
        ok: true,
        service: service.name.clone(),
        env: service.env.clone(),
    }
}

/// Entries are loaded before the listener binds, so a running server is ready.
pub fn ready() -> ReadyStatus {
    ReadyStatus { ready: true }
}

pub fn seed_entries() -> Vec<Value> {
    vec![
        json!({
            "id": "evt_001",
            "year": 2018,
            "title": "First Song Saved",
            "type": "memory",
            "created_at": "2018-06-12T00:00:00Z"
        }),
        json!({
            "id": "evt_002",
            "year": 2020,
            "title": "Music Rewind Started",
            "type": "event",
            "created_at": "2020-01-01T00:00:00Z"
        }),
    ]
}

/// Accepts either a bare JSON array or an `{ "items": [...] }` envelope.
pub fn load_entries(path: &Path) -> anyhow::Result<Vec<Value>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read timeline file '{}'", path.display()))?;
    let parsed: Value = serde_json::from_str(&raw)
        .with_context(|| format!("timeline file '{}' is not valid JSON", path.display()))?;

    match parsed {
        Value::Array(entries) => Ok(entries),
        Value::Object(mut envelope) => match envelope.remove("items") {
            Some(Value::Array(entries)) => Ok(entries),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(_) => bail!("timeline file '{}' has non-array items", path.display()),
        },
        _ => bail!(
            "timeline file '{}' must hold an array or an items envelope",
            path.display()
        ),
    }
}

pub fn parse_year_param(raw: Option<&str>) -> Result<Option<i32>, TimelineQueryError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    raw.parse::<i32>()
        .map(Some)
        .map_err(|_| TimelineQueryError::InvalidYear(raw.to_string()))
}

/// Entries whose year cannot be read never match a year filter but are still
/// listed unfiltered; clients decide what to drop.
pub fn timeline(ctx: &ApiContext, year: Option<i32>) -> TimelineResponse {
    let items = ctx
        .entries
        .iter()
        .filter(|entry| match year {
            None => true,
            Some(year) => entry.get("year").and_then(coerce_year) == Some(year),
        })
        .cloned()
        .collect();
    TimelineResponse::ok(items)
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
