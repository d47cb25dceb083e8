pub mod driver;
pub mod driver_init;
pub use driver::driver_names;
pub use driver::open;
pub use driver_init::init;

pub mod dummy;
pub mod send_flags;

#[cfg(feature = "btleplug_driver")]
pub mod ble {
    pub mod btleplug_driver;
    pub mod scan;
}
