//! Read-only device views: state, networking, telemetry.

use watergate_api::LocalClient;
use watergate_api::models::{DeviceState, DeviceStateV2, NetworkingData, TelemetryData};

use crate::cli::{GlobalOpts, StateArgs};
use crate::error::CliError;
use crate::output::{self, opt};

const NO_DATA: &str = "Device returned no data";

pub async fn state(
    client: &LocalClient,
    args: &StateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let out = if args.v2 {
        let state = client.get_device_state_v2().await?;
        output::render_optional(global.output, state.as_ref(), state_v2_detail, NO_DATA)
    } else {
        let state = client.get_device_state().await?;
        output::render_optional(global.output, state.as_ref(), state_detail, NO_DATA)
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn networking(client: &LocalClient, global: &GlobalOpts) -> Result<(), CliError> {
    let data = client.get_networking().await?;
    let out = output::render_optional(global.output, data.as_ref(), networking_detail, NO_DATA);
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn telemetry(client: &LocalClient, global: &GlobalOpts) -> Result<(), CliError> {
    let data = client.get_telemetry_data().await?;
    let out = output::render_optional(global.output, data.as_ref(), telemetry_detail, NO_DATA);
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Detail views ─────────────────────────────────────────────────────

fn state_detail(s: &DeviceState) -> String {
    let meter = s.water_meter.as_ref();
    output::detail_table(vec![
        ("Valve", opt(s.valve_state)),
        ("Water flowing", opt(s.water_flow_indicator)),
        ("Power supply", opt(s.power_supply)),
        ("Wi-Fi connected", opt(s.wifi_status)),
        ("MQTT connected", opt(s.mqtt_status)),
        ("Firmware", opt(s.firmware_version.as_deref())),
        ("Serial number", opt(s.serial_number.as_deref())),
        ("Uptime (s)", opt(s.uptime)),
        ("Meter volume", opt(meter.and_then(|m| m.volume))),
        ("Meter duration", opt(meter.and_then(|m| m.duration))),
    ])
}

fn state_v2_detail(s: &DeviceStateV2) -> String {
    let positive = s.water_meter.as_ref().and_then(|m| m.positive.as_ref());
    let negative = s.water_meter.as_ref().and_then(|m| m.negative.as_ref());
    output::detail_table(vec![
        ("Valve", opt(s.valve_state)),
        ("Water flowing", opt(s.water_flow_indicator)),
        ("Power supply", opt(s.power_supply)),
        ("Wi-Fi connected", opt(s.wifi_status)),
        ("MQTT connected", opt(s.mqtt_status)),
        ("Firmware", opt(s.firmware_version.as_deref())),
        ("Serial number", opt(s.serial_number.as_deref())),
        ("Uptime (s)", opt(s.uptime)),
        ("Forward volume", opt(positive.and_then(|m| m.volume))),
        ("Forward duration", opt(positive.and_then(|m| m.duration))),
        ("Reverse volume", opt(negative.and_then(|m| m.volume))),
        ("Reverse duration", opt(negative.and_then(|m| m.duration))),
    ])
}

fn networking_detail(n: &NetworkingData) -> String {
    output::detail_table(vec![
        ("Wi-Fi connected", opt(n.wifi_connected)),
        ("MQTT connected", opt(n.mqtt_connected)),
        ("SSID", opt(n.ssid.as_deref())),
        ("RSSI (dBm)", opt(n.rssi)),
        ("IP", opt(n.ip.as_deref())),
        ("Gateway", opt(n.gateway.as_deref())),
        ("Subnet", opt(n.subnet.as_deref())),
        ("Wi-Fi uptime (s)", opt(n.wifi_uptime)),
        ("MQTT uptime (s)", opt(n.mqtt_uptime)),
    ])
}

fn telemetry_detail(t: &TelemetryData) -> String {
    let event = t.ongoing_event.as_ref();
    let errors = t.errors.as_ref().map(|e| {
        if e.is_empty() {
            "none".to_owned()
        } else {
            e.join(", ")
        }
    });
    output::detail_table(vec![
        ("Flow (ml/min)", opt(t.flow)),
        ("Pressure (mbar)", opt(t.pressure)),
        ("Temperature (°C)", opt(t.water_temperature)),
        ("Event volume", opt(event.and_then(|e| e.volume))),
        ("Event duration", opt(event.and_then(|e| e.duration))),
        ("Sensor errors", opt(errors)),
    ])
}
