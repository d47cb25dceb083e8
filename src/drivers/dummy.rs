use super::driver::{BulbDriver, DriverInfo, GattPayload, OpenError, WriteResult};
use super::send_flags::Flags;
use crate::protocol::characteristics::BulbChar;
use crate::utils::dyn_future::DynFuture;
use log::debug;
use std::collections::HashMap;
use std::time::Duration;

/// Driver that acknowledges every write without touching any hardware.
/// Used for dry runs and tests.
pub struct DummyDriver;

impl BulbDriver for DummyDriver {
    fn write_char(
        &mut self,
        char: BulbChar,
        value: GattPayload,
        flags: Flags,
    ) -> DynFuture<'_, WriteResult> {
        Box::pin(async move {
            debug!(
                "dummy write {:?} <- {:02x?} (response={})",
                char,
                value.as_slice(),
                flags.response()
            );
            // Roughly one connection interval
            tokio::time::sleep(Duration::from_millis(8)).await;
            WriteResult::Ok
        })
    }

    fn disconnect(&mut self) -> DynFuture<'_, WriteResult> {
        Box::pin(futures::future::ready(WriteResult::Ok))
    }
}

fn driver_open(_params: HashMap<String, String>) -> Result<Box<dyn BulbDriver>, OpenError> {
    Ok(Box::new(DummyDriver))
}

pub fn driver_info() -> DriverInfo {
    DriverInfo {
        name: "dummy".to_string(),
        description: "Dummy driver. Acknowledges writes, talks to nothing.".to_string(),
        open: driver_open,
    }
}
