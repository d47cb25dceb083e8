use cue::color::gamut::Gamut;
use cue::control::bulb::Bulb;
use cue::control::profile::{DeviceProfile, GamutClass};
use cue::drivers::driver::OpenError;
use cue::drivers::send_flags::{Flags, NO_FLAG, RESPONSE};
use cue_tools as cue;
use std::path::Path;

extern crate clap;
use clap::{Arg, Command};

fn parse_rgb(s: &str) -> Option<(u8, u8, u8)> {
    let mut value = 0u32;
    let mut digits = 0;
    for c in s.chars() {
        if c.is_whitespace() {
            // Skip
        } else if let Some(d) = c.to_digit(16) {
            value = (value << 4) | d;
            digits += 1;
        } else {
            return None;
        }
    }
    if digits != 6 {
        return None;
    }
    Some(((value >> 16) as u8, (value >> 8) as u8, value as u8))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = cue::drivers::init() {
        eprintln!("Failed to initialize bulb drivers: {}", e);
    }
    let matches = Command::new("set_color")
        .about("Set the bulb color from an sRGB triplet.")
        .arg(
            Arg::new("RGB")
                .required(true)
                .help("Hex color, six digits: RRGGBB"),
        )
        .arg(
            Arg::new("DEVICE")
                .short('d')
                .long("device")
                .default_value("default")
                .help("Driver specification, e.g. btleplug:address=c7:46:23:94:4a:14"),
        )
        .arg(
            Arg::new("gamut")
                .short('g')
                .long("gamut")
                .default_value("c")
                .help("Gamut class, b or c"),
        )
        .arg(
            Arg::new("profile")
                .short('p')
                .long("profile")
                .help("Device profile (JSON), overrides --device and --gamut"),
        )
        .arg(
            Arg::new("response")
                .long("with-response")
                .action(clap::ArgAction::SetTrue)
                .help("Use acknowledged GATT writes"),
        )
        .get_matches();

    let rgb_string = matches.get_one::<String>("RGB").unwrap();
    let Some((r, g, b)) = parse_rgb(rgb_string) else {
        eprintln!("Invalid color '{}', expected six hex digits", rgb_string);
        return;
    };

    let (device_name, gamut): (String, Gamut) =
        match matches.get_one::<String>("profile") {
            Some(path) => match DeviceProfile::load(Path::new(path)) {
                Ok(p) => (p.device.clone(), p.gamut.gamut()),
                Err(e) => {
                    eprintln!("Failed to load profile {}: {}", path, e);
                    return;
                }
            },
            None => {
                let class: GamutClass =
                    match matches.get_one::<String>("gamut").unwrap().parse() {
                        Ok(c) => c,
                        Err(e) => {
                            eprintln!("{}", e);
                            return;
                        }
                    };
                (
                    matches.get_one::<String>("DEVICE").unwrap().clone(),
                    class.gamut(),
                )
            }
        };

    let driver = match cue::drivers::open(&device_name) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Failed to open bulb device: {}", e);
            if let OpenError::NotFound = e {
                eprintln!("Available drivers:");
                for name in cue::drivers::driver_names() {
                    eprintln!("  {}", name);
                }
            }
            return;
        }
    };
    let flags = if *matches.get_one::<bool>("response").unwrap() {
        NO_FLAG | RESPONSE | Flags::Retries(2)
    } else {
        NO_FLAG | Flags::Retries(2)
    };
    let mut bulb = Bulb::new(driver, gamut).with_flags(flags);
    match bulb.set_color_rgb(r, g, b).await {
        Ok(()) => println!("Color set to #{:02x}{:02x}{:02x}", r, g, b),
        Err(e) => eprintln!("Write failed: {}", e),
    }
    if let Err(e) = bulb.disconnect().await {
        eprintln!("Disconnect failed: {}", e);
    }
}
