use crate::drivers;
#[cfg(feature = "btleplug_driver")]
use drivers::ble::btleplug_driver;
use drivers::driver::add_driver;
use drivers::dummy;

pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    add_driver(dummy::driver_info());
    #[cfg(feature = "btleplug_driver")]
    add_driver(btleplug_driver::driver_info());
    Ok(())
}
