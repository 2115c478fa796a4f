//! Line-oriented state input.
//!
//! Each line is either a bare state word (`speaking`) or a JSON object
//! (`{"state": "speaking"}`). Blank lines are ignored.

use std::io::BufRead;

use anyhow::{Context, Result};
use orb_core::ConversationState;
use orb_render::StateHandle;
use serde::Deserialize;

#[derive(Deserialize)]
struct StateMessage {
    state: ConversationState,
}

pub fn parse_state_line(line: &str) -> Result<Option<ConversationState>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if line.starts_with('{') {
        let msg: StateMessage =
            serde_json::from_str(line).with_context(|| format!("invalid state message: {line}"))?;
        return Ok(Some(msg.state));
    }
    Ok(Some(line.parse()?))
}

/// Apply every parsed line to `handle` until EOF. Bad lines are logged and
/// skipped.
pub fn pump_states(reader: impl BufRead, handle: &StateHandle) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("stopped reading state input: {e}");
                return;
            }
        };
        match parse_state_line(&line) {
            Ok(Some(state)) => {
                tracing::info!("state -> {state}");
                handle.set(state);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("ignoring state line: {e:#}"),
        }
    }
    tracing::debug!("state input closed");
}
