// Auto-shut-off endpoints: configuration read/patch and the last report.

use tracing::debug;

use crate::client::{LocalClient, parse_model};
use crate::error::Error;
use crate::media_type;
use crate::models::{AutoShutOffReport, AutoShutOffState, AutoShutOffUpdate};

const AUTO_SHUT_OFF_PATH: &str = "/auto-shut-off";
const REPORT_PATH: &str = "/auto-shut-off/report";

impl LocalClient {
    /// `GET /api/sonic/auto-shut-off`
    pub async fn get_auto_shut_off(&self) -> Result<Option<AutoShutOffState>, Error> {
        debug!("fetching auto-shut-off state");
        let data = self.get(AUTO_SHUT_OFF_PATH, media_type::AUTO_SHUT_OFF).await?;
        parse_model(data)
    }

    /// Update auto-shut-off settings. Arguments left as `None` are not sent,
    /// so the device keeps its current value for them.
    ///
    /// `PATCH /api/sonic/auto-shut-off`
    pub async fn patch_auto_shut_off(
        &self,
        enabled: Option<bool>,
        duration: Option<u32>,
        volume: Option<u32>,
    ) -> Result<(), Error> {
        let update = AutoShutOffUpdate {
            enabled,
            duration_threshold: duration,
            volume_threshold: volume,
        };
        self.update_auto_shut_off(&update).await
    }

    /// Send a prepared [`AutoShutOffUpdate`].
    ///
    /// `PATCH /api/sonic/auto-shut-off`
    pub async fn update_auto_shut_off(&self, update: &AutoShutOffUpdate) -> Result<(), Error> {
        debug!(?update, "patching auto-shut-off");
        self.patch(AUTO_SHUT_OFF_PATH, media_type::AUTO_SHUT_OFF, update)
            .await
    }

    /// Get the report of the last auto shut-off.
    ///
    /// Returns `None` when the device answers 204 (no report yet).
    ///
    /// `GET /api/sonic/auto-shut-off/report`
    pub async fn get_auto_shut_off_report(&self) -> Result<Option<AutoShutOffReport>, Error> {
        debug!("fetching auto-shut-off report");
        let data = self
            .get_optional(REPORT_PATH, media_type::AUTO_SHUT_OFF_REPORT)
            .await?;
        parse_model(data)
    }
}
