use cue::control::bulb::Bulb;
use cue::control::profile::{DeviceProfile, GamutClass};
use cue::drivers::driver::OpenError;
use cue::drivers::send_flags::{Flags, NO_FLAG};
use cue_tools as cue;
use std::path::Path;

extern crate clap;
use clap::{value_parser, Arg, Command};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = cue::drivers::init() {
        eprintln!("Failed to initialize bulb drivers: {}", e);
    }
    let matches = Command::new("bulb_ctl")
        .about("Switch, dim and tune a BLE bulb.")
        .arg(
            Arg::new("DEVICE")
                .short('d')
                .long("device")
                .default_value("default")
                .help("Driver specification, e.g. btleplug:address=c7:46:23:94:4a:14"),
        )
        .arg(
            Arg::new("profile")
                .short('p')
                .long("profile")
                .help("Device profile (JSON), overrides --device"),
        )
        .subcommand_required(true)
        .subcommand(Command::new("on").about("Power on"))
        .subcommand(Command::new("off").about("Power off"))
        .subcommand(
            Command::new("brightness")
                .about("Set brightness")
                .arg(
                    Arg::new("PERCENT")
                        .required(true)
                        .value_parser(value_parser!(f32))
                        .help("Brightness in percent, 0-100"),
                ),
        )
        .subcommand(
            Command::new("temp")
                .about("Set white color temperature")
                .arg(
                    Arg::new("KELVIN")
                        .required(true)
                        .value_parser(value_parser!(u32))
                        .help("Color temperature in kelvin"),
                )
                .arg(
                    Arg::new("via_color")
                        .long("via-color")
                        .action(clap::ArgAction::SetTrue)
                        .help("Render through the color characteristic instead"),
                ),
        )
        .get_matches();

    let (device_name, gamut) = match matches.get_one::<String>("profile") {
        Some(path) => match DeviceProfile::load(Path::new(path)) {
            Ok(p) => (p.device.clone(), p.gamut.gamut()),
            Err(e) => {
                eprintln!("Failed to load profile {}: {}", path, e);
                return;
            }
        },
        None => (
            matches.get_one::<String>("DEVICE").unwrap().clone(),
            GamutClass::GamutC.gamut(),
        ),
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
    let mut bulb = Bulb::new(driver, gamut).with_flags(NO_FLAG | Flags::Retries(2));

    let res = match matches.subcommand() {
        Some(("on", _)) => bulb.power_on().await,
        Some(("off", _)) => bulb.power_off().await,
        Some(("brightness", sub)) => {
            let percent = *sub.get_one::<f32>("PERCENT").unwrap();
            bulb.set_brightness(percent).await
        }
        Some(("temp", sub)) => {
            let kelvin = *sub.get_one::<u32>("KELVIN").unwrap();
            if *sub.get_one::<bool>("via_color").unwrap() {
                bulb.set_color_temp_xy(kelvin).await
            } else {
                bulb.set_color_temp(kelvin).await
            }
        }
        _ => unreachable!(),
    };
    match res {
        Ok(()) => println!("OK"),
        Err(e) => eprintln!("Command failed: {}", e),
    }
    if let Err(e) = bulb.disconnect().await {
        eprintln!("Disconnect failed: {}", e);
    }
}
