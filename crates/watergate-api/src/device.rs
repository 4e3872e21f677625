// Read-only device endpoints: state, networking, telemetry.

use tracing::debug;

use crate::client::{LocalClient, parse_model};
use crate::error::Error;
use crate::media_type;
use crate::models::{DeviceState, DeviceStateV2, NetworkingData, TelemetryData};

const NETWORKING_PATH: &str = "/networking";
const TELEMETRY_PATH: &str = "/telemetry";

impl LocalClient {
    /// Get the device state.
    ///
    /// `GET /api/sonic`
    pub async fn get_device_state(&self) -> Result<Option<DeviceState>, Error> {
        debug!("fetching device state");
        let data = self.get("", media_type::DEVICE_STATE).await?;
        parse_model(data)
    }

    /// Get the device state with positive/negative meter readings.
    ///
    /// `GET /api/sonic` (v2 representation)
    pub async fn get_device_state_v2(&self) -> Result<Option<DeviceStateV2>, Error> {
        debug!("fetching device state (v2)");
        let data = self.get("", media_type::DEVICE_STATE_V2).await?;
        parse_model(data)
    }

    /// `GET /api/sonic/networking`
    pub async fn get_networking(&self) -> Result<Option<NetworkingData>, Error> {
        debug!("fetching networking");
        let data = self.get(NETWORKING_PATH, media_type::NETWORKING).await?;
        parse_model(data)
    }

    /// Get live flow, pressure and temperature readings.
    ///
    /// `GET /api/sonic/telemetry`
    pub async fn get_telemetry_data(&self) -> Result<Option<TelemetryData>, Error> {
        debug!("fetching telemetry");
        let data = self.get(TELEMETRY_PATH, media_type::TELEMETRY).await?;
        parse_model(data)
    }
}
