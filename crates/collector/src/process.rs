//! Process-list probe.
//!
//! Matches running processes against a built-in table of remote-control
//! tools. Matching is case-insensitive on the executable name; the reported
//! signal name is the tool's display name, exactly as listed here.

use async_trait::async_trait;
use chrono::Utc;
use sentinel_core::{Error, Result, Signal};

use crate::probe::Probe;

/// A known remote-control tool.
struct ToolRule {
    /// Executable name, without path. Compared case-insensitively, with any
    /// trailing `.exe` ignored.
    process: &'static str,
    /// Display name reported in signals (case-sensitive downstream).
    tool: &'static str,
}

const REMOTE_TOOLS: &[ToolRule] = &[
    ToolRule { process: "todesk.exe", tool: "ToDesk" },
    ToolRule { process: "sunloginclient.exe", tool: "Sunlogin" },
    ToolRule { process: "teamviewer.exe", tool: "TeamViewer" },
    ToolRule { process: "teamviewerd.exe", tool: "TeamViewer" },
    ToolRule { process: "anydesk.exe", tool: "AnyDesk" },
    ToolRule { process: "rustdesk.exe", tool: "RustDesk" },
    ToolRule { process: "mstsc.exe", tool: "Remote Desktop" },
    ToolRule { process: "vncserver", tool: "VNC" },
    ToolRule { process: "x11vnc", tool: "VNC" },
    ToolRule { process: "GameViewerServer.exe", tool: "UU Remote" },
    ToolRule { process: "AskLink.exe", tool: "AskLink" },
    ToolRule { process: "RCClient.exe", tool: "RemoteView" },
];

/// Scans the OS process list for known remote-control tools.
pub struct ProcessProbe;

impl ProcessProbe {
    pub fn new() -> Self {
        Self
    }

    /// Signals for a list of observed executable names.
    fn match_rules(names: &[String]) -> Vec<Signal> {
        let now = Utc::now();
        let mut signals = Vec::new();

        for rule in REMOTE_TOOLS {
            let wanted = normalize(rule.process);
            let hit = names.iter().find(|n| {
                let seen = normalize(n);
                // /proc comm entries are truncated to 15 bytes.
                seen == wanted || (seen.len() == 15 && wanted.starts_with(seen.as_str()))
            });

            if let Some(name) = hit {
                signals.push(Signal::observed_at(
                    rule.tool,
                    format!("process:{}", name),
                    now,
                ));
            }
        }

        signals
    }
}

impl Default for ProcessProbe {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    lower.strip_suffix(".exe").unwrap_or(&lower).to_string()
}

#[async_trait]
impl Probe for ProcessProbe {
    fn name(&self) -> &'static str {
        "process"
    }

    async fn scan(&self) -> Result<Vec<Signal>> {
        let names = list_process_names().await?;
        Ok(Self::match_rules(&names))
    }
}

/// Executable names of all running processes.
#[cfg(target_os = "linux")]
async fn list_process_names() -> Result<Vec<String>> {
    tokio::task::spawn_blocking(|| {
        let mut names = Vec::new();
        let entries = std::fs::read_dir("/proc")
            .map_err(|e| Error::collection(format!("reading /proc: {e}")))?;

        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let pid = file_name.to_string_lossy();
            if !pid.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            // Processes exit between readdir and read; skip quietly.
            if let Ok(comm) = std::fs::read_to_string(entry.path().join("comm")) {
                names.push(comm.trim().to_string());
            }
        }

        Ok(names)
    })
    .await
    .map_err(|e| Error::collection(format!("process scan task: {e}")))?
}

#[cfg(windows)]
async fn list_process_names() -> Result<Vec<String>> {
    let output = tokio::process::Command::new("tasklist")
        .args(["/FO", "CSV", "/NH"])
        .output()
        .await
        .map_err(|e| Error::collection(format!("spawning tasklist: {e}")))?;

    if !output.status.success() {
        return Err(Error::collection(format!(
            "tasklist exited with {}",
            output.status
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout
        .lines()
        .filter_map(|line| line.split(',').next())
        .map(|field| field.trim_matches('"').to_string())
        .collect())
}

#[cfg(not(any(target_os = "linux", windows)))]
async fn list_process_names() -> Result<Vec<String>> {
    Ok(Vec::new())
}
