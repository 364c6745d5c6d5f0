use clap::Parser;
use victron_ble::{
    constants::VICTRON_MANUFACTURER_ID, decode_hex, init_logger, try_decode, Advertisement,
    DeviceKey, VictronError,
};

#[derive(Parser)]
#[command(name = "victron-decode")]
#[command(about = "Decode a captured Victron Instant Readout BLE advertisement")]
struct Cli {
    /// Hex-encoded manufacturer data block (the 0x02E1 payload)
    data: String,

    /// Hex-encoded 16-byte advertisement key for the device
    #[arg(short, long)]
    key: String,

    /// Device display name used in the output
    #[arg(short, long, default_value = "Victron device")]
    name: String,
}

fn main() -> Result<(), VictronError> {
    init_logger();

    let cli = Cli::parse();
    let key = DeviceKey::from_hex(&cli.key)?;
    let data = decode_hex(&cli.data)
        .map_err(|e| VictronError::Parse(format!("invalid hex advertisement data: {e}")))?;

    let adv = Advertisement {
        name: &cli.name,
        manufacturer_id: VICTRON_MANUFACTURER_ID,
        data: &data,
    };
    let update = try_decode(&adv, Some(&key))?;

    let json = serde_json::to_string_pretty(&update)
        .map_err(|e| VictronError::Parse(format!("serializing output: {e}")))?;
    println!("{json}");

    Ok(())
}
