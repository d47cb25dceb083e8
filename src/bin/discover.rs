use cue::drivers::ble::scan;
use cue_tools as cue;
use std::time::Duration;

extern crate clap;
use clap::{value_parser, Arg, Command};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let matches = Command::new("discover")
        .about("List BLE devices in range.")
        .arg(
            Arg::new("time")
                .short('t')
                .long("time")
                .value_parser(value_parser!(u64))
                .default_value("5")
                .help("Scan duration in seconds"),
        )
        .get_matches();

    let secs = *matches.get_one::<u64>("time").unwrap();
    let found = match scan::scan(Duration::from_secs(secs)).await {
        Ok(found) => found,
        Err(e) => {
            eprintln!("Scan failed: {}", e);
            return;
        }
    };
    if found.is_empty() {
        println!("No devices found");
        return;
    }
    for d in found {
        println!(
            "{}  rssi {:>4}  {}",
            d.address,
            d.rssi.map(|r| r.to_string()).unwrap_or_default(),
            d.name.unwrap_or_default()
        );
    }
}
