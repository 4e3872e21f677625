// Device control endpoints: webhook registration and valve actuation.

use serde_json::json;
use tracing::{debug, info};

use crate::client::LocalClient;
use crate::error::Error;
use crate::media_type;
use crate::models::ValveState;

const WEBHOOK_PATH: &str = "/webhook";
const VALVE_PATH: &str = "/valve";

impl LocalClient {
    /// Set the URL the device pushes webhook events to.
    ///
    /// `PATCH /api/sonic/webhook` with `{"webhookUrl": "..."}`
    pub async fn set_webhook_url(&self, webhook_url: &str) -> Result<(), Error> {
        debug!(webhook_url, "setting webhook URL");
        self.patch(
            WEBHOOK_PATH,
            media_type::WEBHOOK,
            &json!({ "webhookUrl": webhook_url }),
        )
        .await
    }

    /// Open or close the valve.
    ///
    /// `PUT /api/sonic/valve` with `{"state": "open" | "closed"}`
    pub async fn set_valve_state(&self, state: ValveState) -> Result<(), Error> {
        info!(%state, "changing valve state");
        self.put(VALVE_PATH, media_type::VALVE_CHANGE, &json!({ "state": state }))
            .await
    }
}
