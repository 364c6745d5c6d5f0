//! Protocol constants for the Victron BLE advertising protocol.

/// Bluetooth SIG company identifier assigned to Victron Energy.
pub const VICTRON_MANUFACTURER_ID: u16 = 0x02E1;

/// Fixed manufacturer string reported with every decoded update.
pub const MANUFACTURER_NAME: &str = "Victron Energy";

/// Manufacturer data record type carrying an encrypted instant readout.
pub const PRODUCT_ADVERTISEMENT: u8 = 0x10;

/// Length of the cleartext header before the ciphertext starts.
pub const HEADER_LEN: usize = 8;

/// Advertisement keys are AES-128.
pub const KEY_LEN: usize = 16;

/// Solar charger readings above this are treated as transmission garbage.
/// Observed MPPT firmware occasionally emits transient nonsense during mode
/// transitions; the ceiling is inclusive, exactly 1500 W still passes.
pub const MAX_SOLAR_POWER_W: f64 = 1500.0;

/// Readout record types, one per supported device family.
pub mod record_type {
    pub const SOLAR_CHARGER: u8 = 0x01;
    pub const BATTERY_MONITOR: u8 = 0x02;
    pub const DCDC_CONVERTER: u8 = 0x04;
}

/// Measurement keys, namespaced per physical device by the host platform.
pub mod keys {
    pub const BATTERY_VOLTAGE: &str = "battery_voltage";
    pub const BATTERY_CURRENT: &str = "battery_current";
    pub const BATTERY_POWER: &str = "battery_power";
    pub const STATE_OF_CHARGE: &str = "state_of_charge";
    pub const TIME_REMAINING: &str = "time_remaining";
    pub const ALARM: &str = "alarm";
    pub const STARTER_VOLTAGE: &str = "starter_voltage";
    pub const MIDPOINT_VOLTAGE: &str = "midpoint_voltage";
    pub const TEMPERATURE: &str = "temperature";
    pub const CHARGE_STATE: &str = "charge_state";
    pub const BATTERY_CHARGING_CURRENT: &str = "battery_charging_current";
    pub const YIELD_TODAY: &str = "yield_today";
    pub const SOLAR_POWER: &str = "solar_power";
    pub const EXTERNAL_DEVICE_LOAD: &str = "external_device_load";
    pub const INPUT_VOLTAGE: &str = "input_voltage";
    pub const OUTPUT_VOLTAGE: &str = "output_voltage";
}
