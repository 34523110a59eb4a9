//! Send and status command handlers - talk to the running indicator via IPC

use crate::domain::event::ChannelEnvelope;

use super::args::parse_event_arg;
use super::ipc::{create_ipc_client, IpcClient, STATUS_COMMAND};
use super::presenter::Presenter;

const NOT_RUNNING: &str = "No indicator running. Start with: share-indicator run";

/// Build the envelope for `send`
pub fn build_envelope(event: &str, payload: Option<&str>) -> Result<ChannelEnvelope, String> {
    let payload = payload
        .map(serde_json::from_str::<serde_json::Value>)
        .transpose()
        .map_err(|e| format!("Invalid payload JSON: {}", e))?;

    Ok(ChannelEnvelope::new(&parse_event_arg(event), payload))
}

/// Handle `send`
pub async fn handle_send_command(
    event: &str,
    payload: Option<&str>,
    presenter: &Presenter,
) -> Result<(), String> {
    let envelope = build_envelope(event, payload)?;
    let line = envelope.to_json().map_err(|e| e.to_string())?;

    let client = create_ipc_client();
    let response = request(client.as_ref(), &line).await?;

    if let Some(stripped) = response.strip_prefix("error:") {
        return Err(stripped.trim().to_string());
    }
    presenter.info(&format!("Event sent: {}", envelope.event()));
    Ok(())
}

/// Handle `status`
pub async fn handle_status_command(presenter: &Presenter) -> Result<(), String> {
    let client = create_ipc_client();
    let response = request(client.as_ref(), STATUS_COMMAND).await?;

    if let Some(stripped) = response.strip_prefix("error:") {
        return Err(stripped.trim().to_string());
    }
    presenter.indicator_status(&response);
    Ok(())
}

async fn request(client: &dyn IpcClient, line: &str) -> Result<String, String> {
    if !client.is_indicator_running() {
        return Err(NOT_RUNNING.to_string());
    }

    let response = client
        .send_command(line)
        .await
        .map_err(|e| format!("Failed to communicate with indicator: {}", e))?;

    Ok(response.trim().to_string())
}
