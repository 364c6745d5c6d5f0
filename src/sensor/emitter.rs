//! # Measurement Emitter
//!
//! Flattens a parsed record into named measurements. A pure function of the
//! record: no state survives between cycles, derived values are recomputed on
//! every call. Absent (sentinel) fields emit nothing at all; the sink keeps
//! whatever it had, and the next advertisement supersedes it.

use crate::constants::keys;
use crate::devices::{AuxMode, BatteryMonitorData, DcDcConverterData, ParsedRecord, SolarChargerData};
use crate::sensor::{DeviceClass, Measurement, Unit};

/// Map a parsed record to its measurement set.
pub fn emit(record: &ParsedRecord) -> Vec<Measurement> {
    match record {
        ParsedRecord::BatteryMonitor(data) => emit_battery_monitor(data),
        ParsedRecord::SolarCharger(data) => emit_solar_charger(data),
        ParsedRecord::DcDcConverter(data) => emit_dcdc_converter(data),
    }
}

fn emit_battery_monitor(data: &BatteryMonitorData) -> Vec<Measurement> {
    let mut out = Vec::new();

    if let Some(voltage) = data.voltage {
        out.push(Measurement::numeric(
            keys::BATTERY_VOLTAGE,
            DeviceClass::Voltage,
            Unit::Volt,
            voltage,
        ));
    }
    if let Some(current) = data.current {
        out.push(Measurement::numeric(
            keys::BATTERY_CURRENT,
            DeviceClass::Current,
            Unit::Ampere,
            current,
        ));
    }
    // Power is not transmitted; derive it fresh every cycle.
    if let (Some(voltage), Some(current)) = (data.voltage, data.current) {
        out.push(Measurement::numeric(
            keys::BATTERY_POWER,
            DeviceClass::Power,
            Unit::Watt,
            voltage * current,
        ));
    }
    if let Some(soc) = data.soc {
        out.push(Measurement::numeric(
            keys::STATE_OF_CHARGE,
            DeviceClass::Battery,
            Unit::Percent,
            soc,
        ));
    }
    if let Some(mins) = data.remaining_mins {
        out.push(Measurement::numeric(
            keys::TIME_REMAINING,
            DeviceClass::Duration,
            Unit::Minute,
            f64::from(mins),
        ));
    }
    out.push(Measurement::enumeration(keys::ALARM, data.alarm.to_string()));

    // The aux word carries exactly one quantity, chosen by the mode field.
    match data.aux_mode {
        AuxMode::StarterVoltage => {
            if let Some(voltage) = data.starter_voltage() {
                out.push(Measurement::numeric(
                    keys::STARTER_VOLTAGE,
                    DeviceClass::Voltage,
                    Unit::Volt,
                    voltage,
                ));
            }
        }
        AuxMode::Temperature => {
            if let Some(kelvin) = data.temperature_kelvin() {
                out.push(Measurement::numeric(
                    keys::TEMPERATURE,
                    DeviceClass::Temperature,
                    Unit::Kelvin,
                    kelvin,
                ));
            }
        }
        AuxMode::MidpointVoltage => {
            if let Some(voltage) = data.midpoint_voltage() {
                out.push(Measurement::numeric(
                    keys::MIDPOINT_VOLTAGE,
                    DeviceClass::Voltage,
                    Unit::Volt,
                    voltage,
                ));
            }
        }
        AuxMode::Disabled => {}
    }

    out
}

fn emit_solar_charger(data: &SolarChargerData) -> Vec<Measurement> {
    let mut out = vec![Measurement::enumeration(
        keys::CHARGE_STATE,
        data.charge_state.to_string(),
    )];

    if let Some(voltage) = data.battery_voltage {
        out.push(Measurement::numeric(
            keys::BATTERY_VOLTAGE,
            DeviceClass::Voltage,
            Unit::Volt,
            voltage,
        ));
    }
    if let Some(current) = data.battery_charging_current {
        out.push(Measurement::numeric(
            keys::BATTERY_CHARGING_CURRENT,
            DeviceClass::Current,
            Unit::Ampere,
            current,
        ));
    }
    if let Some(yield_today) = data.yield_today {
        out.push(Measurement::numeric(
            keys::YIELD_TODAY,
            DeviceClass::Energy,
            Unit::WattHour,
            yield_today,
        ));
    }
    if let Some(power) = data.solar_power {
        out.push(Measurement::numeric(
            keys::SOLAR_POWER,
            DeviceClass::Power,
            Unit::Watt,
            power,
        ));
    }
    if let Some(load) = data.external_device_load {
        out.push(Measurement::numeric(
            keys::EXTERNAL_DEVICE_LOAD,
            DeviceClass::Current,
            Unit::Ampere,
            load,
        ));
    }

    out
}

fn emit_dcdc_converter(data: &DcDcConverterData) -> Vec<Measurement> {
    let mut out = vec![Measurement::enumeration(
        keys::CHARGE_STATE,
        data.charge_state.to_string(),
    )];

    if let Some(voltage) = data.input_voltage {
        out.push(Measurement::numeric(
            keys::INPUT_VOLTAGE,
            DeviceClass::Voltage,
            Unit::Volt,
            voltage,
        ));
    }
    if let Some(voltage) = data.output_voltage {
        out.push(Measurement::numeric(
            keys::OUTPUT_VOLTAGE,
            DeviceClass::Voltage,
            Unit::Volt,
            voltage,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::BatteryMonitorData;
    use crate::sensor::Value;

    fn battery_record(aux_mode_bits: u8) -> BatteryMonitorData {
        // 12.81 V, 1.0 A, aux = 0x0501 so every aux interpretation is valid.
        let plaintext = [
            0x3C, 0x00, 0x01, 0x05, 0x00, 0x00, 0x01, 0x05, 0xA0 | (aux_mode_bits & 0x03), 0x0F,
            0x00, 0xF4, 0x01, 0x70, 0x1F, 0x00,
        ];
        BatteryMonitorData::parse(&plaintext).unwrap()
    }

    fn keys_of(measurements: &[Measurement]) -> Vec<&'static str> {
        measurements.iter().map(|m| m.key).collect()
    }

    #[test]
    fn test_aux_mode_selects_exactly_one_measurement() {
        for (bits, expected) in [
            (0, keys::STARTER_VOLTAGE),
            (1, keys::MIDPOINT_VOLTAGE),
            (2, keys::TEMPERATURE),
        ] {
            let record = ParsedRecord::BatteryMonitor(battery_record(bits));
            let keys_seen = keys_of(&emit(&record));
            let aux_keys = [keys::STARTER_VOLTAGE, keys::MIDPOINT_VOLTAGE, keys::TEMPERATURE];
            let present: Vec<_> = aux_keys
                .iter()
                .filter(|k| keys_seen.contains(k))
                .collect();
            assert_eq!(present, vec![&expected]);
        }

        let record = ParsedRecord::BatteryMonitor(battery_record(3));
        let keys_seen = keys_of(&emit(&record));
        assert!(!keys_seen.contains(&keys::STARTER_VOLTAGE));
        assert!(!keys_seen.contains(&keys::MIDPOINT_VOLTAGE));
        assert!(!keys_seen.contains(&keys::TEMPERATURE));
    }

    #[test]
    fn test_derived_power() {
        let record = ParsedRecord::BatteryMonitor(battery_record(3));
        let measurements = emit(&record);
        let power = measurements
            .iter()
            .find(|m| m.key == keys::BATTERY_POWER)
            .unwrap();
        match power.value {
            Value::Numeric(w) => assert!((w - 12.81).abs() < 1e-9),
            _ => panic!("expected numeric power"),
        }
        assert_eq!(power.unit, Some(Unit::Watt));
    }

    #[test]
    fn test_power_absent_without_current() {
        // Current sentinel: bits 2.. of bytes 8-10 all ones.
        let plaintext = [
            0x3C, 0x00, 0x01, 0x05, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xF4, 0x01, 0x70,
            0x1F, 0x00,
        ];
        let data = BatteryMonitorData::parse(&plaintext).unwrap();
        let keys_seen = keys_of(&emit(&ParsedRecord::BatteryMonitor(data)));
        assert!(keys_seen.contains(&keys::BATTERY_VOLTAGE));
        assert!(!keys_seen.contains(&keys::BATTERY_CURRENT));
        assert!(!keys_seen.contains(&keys::BATTERY_POWER));
    }

    #[test]
    fn test_emit_is_pure() {
        let record = ParsedRecord::BatteryMonitor(battery_record(0));
        assert_eq!(emit(&record), emit(&record));
    }

    #[test]
    fn test_alarm_always_emitted() {
        let record = ParsedRecord::BatteryMonitor(battery_record(3));
        let measurements = emit(&record);
        let alarm = measurements.iter().find(|m| m.key == keys::ALARM).unwrap();
        assert_eq!(alarm.value, Value::Enumeration("no_alarm".to_string()));
    }
}
