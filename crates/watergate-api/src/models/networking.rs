// Networking model (`GET /api/sonic/networking`).

use serde::{Deserialize, Serialize};

/// Wi-Fi and MQTT connectivity of the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkingData {
    pub mqtt_connected: Option<bool>,
    pub wifi_connected: Option<bool>,
    pub ip: Option<String>,
    pub gateway: Option<String>,
    pub subnet: Option<String>,
    pub ssid: Option<String>,
    /// Signal strength in dBm.
    pub rssi: Option<i32>,
    /// Seconds since Wi-Fi connected.
    #[serde(rename = "wifiUpTime")]
    pub wifi_uptime: Option<i64>,
    /// Seconds since MQTT connected.
    #[serde(rename = "mqttUpTime")]
    pub mqtt_uptime: Option<i64>,
}
