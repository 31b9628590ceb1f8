//! Engine adapter driving an external container-engine binary.
//!
//! All supported backends are command-line programs; isolation itself is the
//! engine's job. This adapter's job is argument construction and output
//! parsing: one [`CliEngine`] drives any backend described by an
//! [`EngineProfile`], so the per-backend differences stay in data rather
//! than in branching logic.

use crate::engine::domain::{
    EngineError, EngineResult, EnvironmentConfig, EnvironmentFilter, EnvironmentId,
    EnvironmentName, EnvironmentStats, EnvironmentStatus, ExecOutput, ExecRequest,
    ExecutionEnvironment,
};
use crate::engine::ports::{ContainerEngine, EngineKind};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Subcommand spellings for one backend binary.
pub(crate) struct EngineCommands {
    /// Availability probe; exit zero means usable.
    pub probe: &'static [&'static str],
    /// Environment creation (may start the process, see `starts_on_create`).
    pub create: &'static [&'static str],
    /// Start a created or stopped environment.
    pub start: &'static [&'static str],
    /// Graceful stop.
    pub stop: &'static [&'static str],
    /// Removal.
    pub remove: &'static [&'static str],
    /// Listing.
    pub list: &'static [&'static str],
    /// Detail lookup.
    pub inspect: &'static [&'static str],
    /// In-environment command execution.
    pub exec: &'static [&'static str],
    /// Image pull.
    pub pull: &'static [&'static str],
    /// Resource-usage snapshot, when the engine has one.
    pub stats: &'static [&'static str],
}

/// Host platform constraint for engines tied to one OS/architecture.
pub(crate) struct PlatformGate {
    /// Required `std::env::consts::OS` value.
    pub os: &'static str,
    /// Required `std::env::consts::ARCH` value.
    pub arch: &'static str,
}

impl PlatformGate {
    fn matches_host(&self) -> bool {
        std::env::consts::OS == self.os && std::env::consts::ARCH == self.arch
    }
}

/// Pure data describing one CLI backend.
pub(crate) struct EngineProfile {
    /// Backend identity.
    pub kind: EngineKind,
    /// Binary name resolved through `PATH`.
    pub binary: &'static str,
    /// Subcommand spellings.
    pub commands: EngineCommands,
    /// Native status vocabulary mapped onto the shared enum.
    pub status_map: &'static [(&'static str, EnvironmentStatus)],
    /// Whether the engine exposes a stats endpoint.
    pub supports_stats: bool,
    /// Whether the engine can filter listings by label server-side.
    pub supports_label_filters: bool,
    /// Whether `create` also starts the process.
    pub starts_on_create: bool,
    /// Host constraint, when the engine only ships on one platform.
    pub platform: Option<PlatformGate>,
}

/// Captured result of one engine-binary invocation.
struct CliOutput {
    status: i64,
    stdout: String,
    stderr: String,
}

impl CliOutput {
    fn success(&self) -> bool {
        self.status == 0
    }
}

/// Execution backend adapter invoking an external engine binary.
pub struct CliEngine {
    profile: &'static EngineProfile,
}

impl CliEngine {
    /// Creates an adapter over the given backend profile.
    pub(crate) const fn new(profile: &'static EngineProfile) -> Self {
        Self { profile }
    }

    /// Adapter for the general container engine.
    #[must_use]
    pub fn docker() -> Self {
        Self::new(&super::docker::PROFILE)
    }

    /// Adapter for the drop-in compatible daemonless engine.
    #[must_use]
    pub fn podman() -> Self {
        Self::new(&super::podman::PROFILE)
    }

    /// Adapter for the lightweight-VM engine on Apple silicon.
    #[must_use]
    pub fn apple_container() -> Self {
        Self::new(&super::apple::PROFILE)
    }

    /// Invokes the engine binary and captures its output.
    async fn run(&self, args: &[String], timeout: Option<Duration>) -> EngineResult<CliOutput> {
        let command_line = format!("{} {}", self.profile.binary, args.join(" "));
        debug!(engine = %self.profile.kind, command = %command_line, "invoking engine binary");

        let mut command = Command::new(self.profile.binary);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|source| EngineError::Spawn {
            command: command_line.clone(),
            source,
        })?;

        let wait = child.wait_with_output();
        let output = match timeout {
            Some(ceiling) => match tokio::time::timeout(ceiling, wait).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(EngineError::Timeout {
                        command: command_line,
                        seconds: ceiling.as_secs(),
                    });
                }
            },
            None => wait.await,
        }
        .map_err(|source| EngineError::Spawn {
            command: command_line.clone(),
            source,
        })?;

        Ok(CliOutput {
            status: output.status.code().map_or(-1, i64::from),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Invokes the engine binary, requiring a zero exit.
    async fn run_checked(&self, args: &[String]) -> EngineResult<CliOutput> {
        let output = self.run(args, None).await?;
        if output.success() {
            Ok(output)
        } else {
            Err(EngineError::Invocation {
                command: format!("{} {}", self.profile.binary, args.join(" ")),
                status: output.status,
                stderr: output.stderr,
            })
        }
    }

    fn owned(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| (*part).to_owned()).collect()
    }

    /// Builds the full create invocation from immutable parameters.
    fn create_args(&self, config: &EnvironmentConfig) -> Vec<String> {
        let mut args = Self::owned(self.profile.commands.create);
        args.push("--name".to_owned());
        args.push(config.name.clone());

        for (key, value) in &config.labels {
            args.push("--label".to_owned());
            args.push(format!("{key}={value}"));
        }
        for (key, value) in &config.env {
            args.push("--env".to_owned());
            args.push(format!("{key}={value}"));
        }
        for mount in &config.mounts {
            args.push("--volume".to_owned());
            args.push(format!(
                "{}:{}:{}",
                mount.source,
                mount.target,
                mount.mode.as_str()
            ));
        }

        push_resource_args(&mut args, config);
        push_sandbox_args(&mut args, config);

        args.push("--network".to_owned());
        args.push(config.network.as_str().to_owned());
        if let Some(dir) = &config.working_dir {
            args.push("--workdir".to_owned());
            args.push(dir.clone());
        }

        args.push(config.image.clone());
        args.extend(config.command.iter().cloned());
        args
    }

    /// Parses one inspect record into the normalized snapshot.
    fn parse_record(&self, record: &Value) -> EngineResult<ExecutionEnvironment> {
        match self.profile.kind {
            EngineKind::AppleContainer => self.parse_apple_record(record),
            _ => self.parse_daemon_record(record),
        }
    }

    /// Parses the docker/podman inspect shape (`State`, `Config`, `Created`).
    fn parse_daemon_record(&self, record: &Value) -> EngineResult<ExecutionEnvironment> {
        let id = string_field(record, &["Id"]).ok_or_else(|| EngineError::UnexpectedOutput {
            reason: "inspect record is missing 'Id'".to_owned(),
        })?;
        let name = string_field(record, &["Name"])
            .map(|raw| raw.trim_start_matches('/').to_owned())
            .unwrap_or_default();
        let image = string_field(record, &["Config", "Image"]).unwrap_or_default();
        let native_status = string_field(record, &["State", "Status"]).unwrap_or_default();
        let created_at = string_field(record, &["Created"])
            .as_deref()
            .and_then(parse_engine_timestamp)
            .unwrap_or_else(Utc::now);

        Ok(ExecutionEnvironment {
            id: EnvironmentId::new(id),
            name: EnvironmentName::new(name),
            image,
            status: EnvironmentStatus::from_native(self.profile.status_map, &native_status),
            created_at,
            started_at: string_field(record, &["State", "StartedAt"])
                .as_deref()
                .and_then(parse_engine_timestamp),
            finished_at: string_field(record, &["State", "FinishedAt"])
                .as_deref()
                .and_then(parse_engine_timestamp),
            exit_code: record
                .get("State")
                .and_then(|state| state.get("ExitCode"))
                .and_then(Value::as_i64),
            labels: label_map(record.get("Config").and_then(|config| config.get("Labels"))),
        })
    }

    /// Parses the lightweight-VM engine's list/inspect shape.
    fn parse_apple_record(&self, record: &Value) -> EngineResult<ExecutionEnvironment> {
        let configuration = record.get("configuration").unwrap_or(record);
        let id = string_field(configuration, &["id"])
            .or_else(|| string_field(record, &["id"]))
            .ok_or_else(|| EngineError::UnexpectedOutput {
                reason: "inspect record is missing 'id'".to_owned(),
            })?;
        let native_status = string_field(record, &["status"]).unwrap_or_default();
        let image = string_field(configuration, &["image", "reference"]).unwrap_or_default();

        Ok(ExecutionEnvironment {
            id: EnvironmentId::new(id.clone()),
            // The lightweight-VM engine does not separate id from name.
            name: EnvironmentName::new(id),
            image,
            status: EnvironmentStatus::from_native(self.profile.status_map, &native_status),
            created_at: string_field(record, &["createdAt"])
                .as_deref()
                .and_then(parse_engine_timestamp)
                .unwrap_or_else(Utc::now),
            started_at: string_field(record, &["startedAt"])
                .as_deref()
                .and_then(parse_engine_timestamp),
            finished_at: string_field(record, &["finishedAt"])
                .as_deref()
                .and_then(parse_engine_timestamp),
            exit_code: record.get("exitCode").and_then(Value::as_i64),
            labels: label_map(configuration.get("labels")),
        })
    }

    /// Inspects a set of ids and parses every record.
    async fn inspect(&self, ids: &[String]) -> EngineResult<Vec<ExecutionEnvironment>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut args = Self::owned(self.profile.commands.inspect);
        args.extend(ids.iter().cloned());
        let output = self.run_checked(&args).await?;
        let parsed: Value =
            serde_json::from_str(&output.stdout).map_err(|err| EngineError::UnexpectedOutput {
                reason: format!("inspect output is not JSON: {err}"),
            })?;
        let records = parsed
            .as_array()
            .ok_or_else(|| EngineError::UnexpectedOutput {
                reason: "inspect output is not a JSON array".to_owned(),
            })?;
        records.iter().map(|record| self.parse_record(record)).collect()
    }

    /// Lists raw environments before client-side label filtering.
    async fn list_unfiltered(
        &self,
        filter: &EnvironmentFilter,
    ) -> EngineResult<Vec<ExecutionEnvironment>> {
        if self.profile.kind == EngineKind::AppleContainer {
            let mut args = Self::owned(self.profile.commands.list);
            if filter.include_stopped {
                args.push("--all".to_owned());
            }
            args.push("--format".to_owned());
            args.push("json".to_owned());
            let output = self.run_checked(&args).await?;
            let parsed: Value = serde_json::from_str(&output.stdout).map_err(|err| {
                EngineError::UnexpectedOutput {
                    reason: format!("list output is not JSON: {err}"),
                }
            })?;
            let records = parsed
                .as_array()
                .ok_or_else(|| EngineError::UnexpectedOutput {
                    reason: "list output is not a JSON array".to_owned(),
                })?;
            return records.iter().map(|record| self.parse_record(record)).collect();
        }

        let mut args = Self::owned(self.profile.commands.list);
        if filter.include_stopped {
            args.push("--all".to_owned());
        }
        args.push("--quiet".to_owned());
        if self.profile.supports_label_filters {
            for (key, value) in &filter.label_selectors {
                args.push("--filter".to_owned());
                args.push(format!("label={key}={value}"));
            }
        }
        let output = self.run_checked(&args).await?;
        let ids: Vec<String> = output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        self.inspect(&ids).await
    }
}

#[async_trait]
impl ContainerEngine for CliEngine {
    fn kind(&self) -> EngineKind {
        self.profile.kind
    }

    async fn is_available(&self) -> bool {
        if let Some(gate) = &self.profile.platform
            && !gate.matches_host()
        {
            return false;
        }
        let args = Self::owned(self.profile.commands.probe);
        match self.run(&args, Some(Duration::from_secs(10))).await {
            Ok(output) => output.success(),
            Err(_) => false,
        }
    }

    async fn create_container(
        &self,
        config: &EnvironmentConfig,
    ) -> EngineResult<ExecutionEnvironment> {
        self.pull_image(&config.image).await?;
        let args = self.create_args(config);
        let output = self.run_checked(&args).await?;
        let id = output
            .stdout
            .lines()
            .last()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .ok_or_else(|| EngineError::UnexpectedOutput {
                reason: "create did not print an environment id".to_owned(),
            })?;

        match self.inspect(std::slice::from_ref(&id)).await {
            Ok(mut environments) if !environments.is_empty() => Ok(environments.remove(0)),
            // Fall back to the parameters we know when inspect lags create.
            _ => Ok(ExecutionEnvironment {
                id: EnvironmentId::new(id),
                name: EnvironmentName::new(config.name.clone()),
                image: config.image.clone(),
                status: if self.profile.starts_on_create {
                    EnvironmentStatus::Running
                } else {
                    EnvironmentStatus::Created
                },
                created_at: Utc::now(),
                started_at: None,
                finished_at: None,
                exit_code: None,
                labels: config.labels.clone(),
            }),
        }
    }

    async fn start_container(&self, id: &EnvironmentId) -> EngineResult<()> {
        let mut args = Self::owned(self.profile.commands.start);
        args.push(id.as_str().to_owned());
        self.run_checked(&args).await.map(|_| ())
    }

    async fn stop_container(&self, id: &EnvironmentId, timeout: Duration) -> EngineResult<()> {
        let mut args = Self::owned(self.profile.commands.stop);
        args.push("--time".to_owned());
        args.push(timeout.as_secs().to_string());
        args.push(id.as_str().to_owned());
        self.run_checked(&args).await.map(|_| ())
    }

    async fn remove_container(&self, id: &EnvironmentId, force: bool) -> EngineResult<()> {
        let mut args = Self::owned(self.profile.commands.remove);
        if force {
            args.push("--force".to_owned());
        }
        args.push(id.as_str().to_owned());
        match self.run_checked(&args).await {
            Ok(_) => Ok(()),
            // Removing an id the engine no longer knows is a no-op, so a
            // manual removal racing a sweep stays idempotent.
            Err(EngineError::Invocation { stderr, .. }) if is_unknown_id(&stderr) => Ok(()),
            Err(err) => Err(err),
        }
    }

    async fn list_containers(&self, filter: &EnvironmentFilter) -> Vec<ExecutionEnvironment> {
        match self.list_unfiltered(filter).await {
            Ok(environments) => environments
                .into_iter()
                .filter(|env| matches_selectors(env, filter))
                .collect(),
            Err(err) => {
                warn!(engine = %self.profile.kind, error = %err, "listing failed, returning empty");
                Vec::new()
            }
        }
    }

    async fn get_container(
        &self,
        id: &EnvironmentId,
    ) -> EngineResult<Option<ExecutionEnvironment>> {
        let ids = vec![id.as_str().to_owned()];
        match self.inspect(&ids).await {
            Ok(mut environments) if !environments.is_empty() => Ok(Some(environments.remove(0))),
            Ok(_) => Ok(None),
            Err(EngineError::Invocation { stderr, .. }) if is_unknown_id(&stderr) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn get_stats(&self, id: &EnvironmentId) -> EngineResult<EnvironmentStats> {
        if !self.profile.supports_stats {
            return Ok(EnvironmentStats::default());
        }
        let mut args = Self::owned(self.profile.commands.stats);
        args.push(id.as_str().to_owned());
        let output = self.run_checked(&args).await?;
        let line = output
            .stdout
            .lines()
            .find(|line| !line.trim().is_empty())
            .unwrap_or_default();
        let parsed: Value =
            serde_json::from_str(line).map_err(|err| EngineError::UnexpectedOutput {
                reason: format!("stats output is not JSON: {err}"),
            })?;
        Ok(parse_stats_record(&parsed))
    }

    async fn exec(&self, id: &EnvironmentId, request: &ExecRequest) -> EngineResult<ExecOutput> {
        let mut args = Self::owned(self.profile.commands.exec);
        for (key, value) in &request.env {
            args.push("--env".to_owned());
            args.push(format!("{key}={value}"));
        }
        if let Some(dir) = &request.working_dir {
            args.push("--workdir".to_owned());
            args.push(dir.clone());
        }
        args.push(id.as_str().to_owned());
        args.extend(request.command.iter().cloned());

        // The engine forwards the command's exit code, so a non-zero exit
        // here is the command's result, not an invocation failure.
        let output = self.run(&args, request.timeout).await?;
        Ok(ExecOutput {
            exit_code: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    async fn pull_image(&self, image: &str) -> EngineResult<()> {
        let mut args = Self::owned(self.profile.commands.pull);
        args.push(image.to_owned());
        self.run_checked(&args).await.map(|_| ())
    }
}

/// Appends resource-limit flags shared by the CLI backends.
fn push_resource_args(args: &mut Vec<String>, config: &EnvironmentConfig) {
    let resources = &config.resources;
    if let Some(shares) = resources.cpu_shares {
        args.push("--cpu-shares".to_owned());
        args.push(shares.to_string());
    }
    if let Some(milli) = resources.milli_cpus {
        args.push("--cpus".to_owned());
        args.push(format_milli_cpus(milli));
    }
    if let Some(bytes) = resources.memory_limit_bytes {
        args.push("--memory".to_owned());
        args.push(format!("{bytes}b"));
    }
    if let Some(bytes) = resources.memory_reservation_bytes {
        args.push("--memory-reservation".to_owned());
        args.push(format!("{bytes}b"));
    }
    if let Some(limit) = resources.pids_limit {
        args.push("--pids-limit".to_owned());
        args.push(limit.to_string());
    }
}

/// Appends sandbox-hardening flags shared by the CLI backends.
fn push_sandbox_args(args: &mut Vec<String>, config: &EnvironmentConfig) {
    let sandbox = &config.sandbox;
    if sandbox.read_only_rootfs {
        args.push("--read-only".to_owned());
    }
    for capability in &sandbox.cap_drop {
        args.push("--cap-drop".to_owned());
        args.push(capability.clone());
    }
    for capability in &sandbox.cap_add {
        args.push("--cap-add".to_owned());
        args.push(capability.clone());
    }
    if sandbox.no_new_privileges {
        args.push("--security-opt".to_owned());
        args.push("no-new-privileges".to_owned());
    }
    if let Some(profile) = &sandbox.mac_profile {
        args.push("--security-opt".to_owned());
        args.push(profile.clone());
    }
    if let Some(user) = &sandbox.run_as {
        args.push("--user".to_owned());
        args.push(user.clone());
    }
}

/// Renders thousandths of a core as the engines' decimal `--cpus` value.
fn format_milli_cpus(milli: u64) -> String {
    let whole = milli.div_euclid(1000);
    let frac = milli.rem_euclid(1000);
    if frac == 0 {
        whole.to_string()
    } else {
        format!("{whole}.{frac:03}")
            .trim_end_matches('0')
            .to_owned()
    }
}

/// Walks a nested path of object keys to a string value.
fn string_field(value: &Value, path: &[&str]) -> Option<String> {
    let mut current = value;
    for key in path {
        current = current.get(key)?;
    }
    current.as_str().map(ToOwned::to_owned)
}

/// Reads a JSON label object into the domain's label map.
fn label_map(value: Option<&Value>) -> BTreeMap<String, String> {
    value
        .and_then(Value::as_object)
        .map(|object| {
            object
                .iter()
                .filter_map(|(key, val)| {
                    val.as_str().map(|text| (key.clone(), text.to_owned()))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Parses an engine timestamp, treating the zero sentinel as unset.
fn parse_engine_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() || raw.starts_with("0001-") {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Whether an engine error message denotes an unknown id.
fn is_unknown_id(stderr: &str) -> bool {
    let lowered = stderr.to_ascii_lowercase();
    lowered.contains("no such") || lowered.contains("not found") || lowered.contains("no container")
}

/// Whether an environment matches every label selector in the filter.
fn matches_selectors(env: &ExecutionEnvironment, filter: &EnvironmentFilter) -> bool {
    filter
        .label_selectors
        .iter()
        .all(|(key, value)| env.labels.get(key).is_some_and(|found| found == value))
}

/// Parses the engines' human-readable stats line.
fn parse_stats_record(record: &Value) -> EnvironmentStats {
    let (memory_used_bytes, memory_limit_bytes) = string_field(record, &["MemUsage"])
        .as_deref()
        .map(parse_size_pair)
        .unwrap_or_default();
    let (network_rx_bytes, network_tx_bytes) = string_field(record, &["NetIO"])
        .as_deref()
        .map(parse_size_pair)
        .unwrap_or_default();
    let (disk_read_bytes, disk_write_bytes) = string_field(record, &["BlockIO"])
        .as_deref()
        .map(parse_size_pair)
        .unwrap_or_default();

    EnvironmentStats {
        cpu_percent: string_field(record, &["CPUPerc"])
            .as_deref()
            .map(|raw| raw.trim_end_matches('%').trim())
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default(),
        memory_used_bytes,
        memory_limit_bytes,
        disk_read_bytes,
        disk_write_bytes,
        network_rx_bytes,
        network_tx_bytes,
        pids: string_field(record, &["PIDs"])
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or_default(),
    }
}

/// Parses a `"used / limit"` pair of human-readable sizes.
fn parse_size_pair(raw: &str) -> (u64, u64) {
    let mut parts = raw.split('/');
    let first = parts.next().map(parse_size).unwrap_or_default();
    let second = parts.next().map(parse_size).unwrap_or_default();
    (first, second)
}

/// Parses one human-readable size (`"7.7MiB"`, `"648B"`) into bytes.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the engines report sizes as human-readable decimal strings"
)]
fn parse_size(raw: &str) -> u64 {
    let trimmed = raw.trim();
    let split = trimmed
        .find(|ch: char| ch.is_ascii_alphabetic())
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(split);
    let value: f64 = number.trim().parse().unwrap_or_default();
    let multiplier: f64 = match unit.trim().to_ascii_lowercase().as_str() {
        "kb" => 1_000.0,
        "kib" => 1_024.0,
        "mb" => 1_000_000.0,
        "mib" => 1_048_576.0,
        "gb" => 1_000_000_000.0,
        "gib" => 1_073_741_824.0,
        "tb" => 1_000_000_000_000.0,
        "tib" => 1_099_511_627_776.0,
        _ => 1.0,
    };
    (value * multiplier).round() as u64
}

#[cfg(test)]
mod tests {
    use super::{format_milli_cpus, is_unknown_id, parse_engine_timestamp, parse_size};

    #[test]
    fn parse_size_handles_binary_and_decimal_units() {
        assert_eq!(parse_size("648B"), 648);
        assert_eq!(parse_size("1KiB"), 1024);
        assert_eq!(parse_size("7.5MB"), 7_500_000);
        assert_eq!(parse_size("2GiB"), 2_147_483_648);
    }

    #[test]
    fn format_milli_cpus_renders_decimal_cores() {
        assert_eq!(format_milli_cpus(1000), "1");
        assert_eq!(format_milli_cpus(1500), "1.5");
        assert_eq!(format_milli_cpus(250), "0.25");
    }

    #[test]
    fn zero_timestamp_sentinel_is_unset() {
        assert_eq!(parse_engine_timestamp("0001-01-01T00:00:00Z"), None);
        assert!(parse_engine_timestamp("2026-03-01T10:00:00Z").is_some());
    }

    #[test]
    fn unknown_id_messages_are_recognized() {
        assert!(is_unknown_id("Error: No such container: abc"));
        assert!(is_unknown_id("container 'xyz' not found"));
        assert!(!is_unknown_id("permission denied"));
    }
}
