//! Victron model ID to product name mapping.
//!
//! The model ID travels in cleartext in the advertisement header. Unknown IDs
//! resolve to a placeholder embedding the numeric ID so the pipeline can
//! always report some device type string, even for unseen hardware revisions.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static MODEL_NAMES: Lazy<HashMap<u16, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Battery monitors
        (0x0203, "BMV-700"),
        (0x0204, "BMV-702"),
        (0x0205, "BMV-700H"),
        (0xA381, "BMV-712 Smart"),
        (0xA382, "BMV-710H Smart"),
        (0xA383, "BMV-712 Smart Rev2"),
        (0xA389, "SmartShunt 500A/50mV"),
        (0xA38A, "SmartShunt 1000A/50mV"),
        (0xA38B, "SmartShunt 2000A/50mV"),
        // BlueSolar MPPT charge controllers
        (0xA040, "BlueSolar MPPT 75|50"),
        (0xA041, "BlueSolar MPPT 150|35"),
        (0xA042, "BlueSolar MPPT 75|15"),
        (0xA043, "BlueSolar MPPT 100|15"),
        (0xA044, "BlueSolar MPPT 100|30"),
        (0xA045, "BlueSolar MPPT 100|50"),
        (0xA046, "BlueSolar MPPT 150|70"),
        (0xA047, "BlueSolar MPPT 150|100"),
        (0xA049, "BlueSolar MPPT 100|50 rev2"),
        (0xA04A, "BlueSolar MPPT 100|30 rev2"),
        (0xA04B, "BlueSolar MPPT 150|35 rev2"),
        (0xA04C, "BlueSolar MPPT 75|10"),
        // SmartSolar MPPT charge controllers
        (0xA050, "SmartSolar MPPT 250|100"),
        (0xA051, "SmartSolar MPPT 150|100"),
        (0xA052, "SmartSolar MPPT 150|85"),
        (0xA053, "SmartSolar MPPT 75|15"),
        (0xA054, "SmartSolar MPPT 75|10"),
        (0xA055, "SmartSolar MPPT 100|15"),
        (0xA056, "SmartSolar MPPT 100|30"),
        (0xA057, "SmartSolar MPPT 100|50"),
        (0xA058, "SmartSolar MPPT 150|35"),
        (0xA059, "SmartSolar MPPT 150|100 rev2"),
        (0xA05A, "SmartSolar MPPT 150|85 rev2"),
        (0xA05B, "SmartSolar MPPT 250|70"),
        (0xA05C, "SmartSolar MPPT 250|85"),
        (0xA05D, "SmartSolar MPPT 250|60"),
        (0xA05E, "SmartSolar MPPT 250|45"),
        (0xA05F, "SmartSolar MPPT 100|20"),
        (0xA060, "SmartSolar MPPT 100|20 48V"),
        (0xA061, "SmartSolar MPPT 150|45"),
        (0xA062, "SmartSolar MPPT 150|60"),
        (0xA063, "SmartSolar MPPT 150|70"),
        (0xA064, "SmartSolar MPPT 250|85 rev2"),
        (0xA065, "SmartSolar MPPT 250|100 rev2"),
        // Orion-Tr Smart DC-DC converters
        (0xA3C0, "Orion-Tr Smart 12|12-18A"),
        (0xA3C1, "Orion-Tr Smart 12|12-30A"),
        (0xA3C2, "Orion-Tr Smart 12|24-10A"),
        (0xA3C3, "Orion-Tr Smart 12|24-15A"),
        (0xA3C4, "Orion-Tr Smart 24|12-20A"),
        (0xA3C5, "Orion-Tr Smart 24|12-30A"),
        (0xA3C6, "Orion-Tr Smart 24|24-12A"),
        (0xA3C7, "Orion-Tr Smart 24|24-17A"),
        (0xA3D0, "Orion-Tr Smart 12|12-18A Isolated"),
        (0xA3D1, "Orion-Tr Smart 12|12-30A Isolated"),
        (0xA3D2, "Orion-Tr Smart 12|24-10A Isolated"),
        (0xA3D3, "Orion-Tr Smart 12|24-15A Isolated"),
        (0xA3D4, "Orion-Tr Smart 24|12-20A Isolated"),
        (0xA3D5, "Orion-Tr Smart 24|12-30A Isolated"),
        (0xA3D6, "Orion-Tr Smart 24|24-12A Isolated"),
        (0xA3D7, "Orion-Tr Smart 24|24-17A Isolated"),
    ])
});

/// Look up the product name for a model ID. Unknown IDs produce a
/// placeholder rather than failing.
pub fn model_name(model_id: u16) -> String {
    match MODEL_NAMES.get(&model_id) {
        Some(name) => (*name).to_string(),
        None => format!("<Unknown device: {model_id}>"),
    }
}
