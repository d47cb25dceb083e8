use crate::drivers::driver::{
    BulbDriver, DriverInfo, GattPayload, OpenError, WriteResult,
};
use crate::drivers::send_flags::Flags;
use crate::protocol::characteristics::BulbChar;
use crate::utils::dyn_future::DynFuture;
use btleplug::api::{
    BDAddr, Central, Characteristic, Manager as _, Peripheral as _, ScanFilter, WriteType,
};
use btleplug::platform::{Adapter, Manager, Peripheral};
use log::{debug, info};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// BLE transport through the system Bluetooth stack.
///
/// The connection is established lazily on the first write and dropped
/// on any GATT error, so a failed write followed by a retry goes through
/// a fresh connection.
pub struct BtleplugDriver {
    address: BDAddr,
    scan_timeout: Duration,
    link: Option<Link>,
}

struct Link {
    peripheral: Peripheral,
    chars: HashMap<BulbChar, Characteristic>,
}

impl BulbDriver for BtleplugDriver {
    fn write_char(
        &mut self,
        char: BulbChar,
        value: GattPayload,
        flags: Flags,
    ) -> DynFuture<'_, WriteResult> {
        Box::pin(async move {
            let mut attempts = flags.retries() + 1;
            loop {
                let res = self.write_once(char, value, &flags).await;
                attempts -= 1;
                match res {
                    WriteResult::Timeout | WriteResult::Disconnected if attempts > 0 => {
                        debug!("write to {:?} failed ({}), retrying", char, res);
                    }
                    res => return res,
                }
            }
        })
    }

    fn disconnect(&mut self) -> DynFuture<'_, WriteResult> {
        Box::pin(async move {
            if let Some(link) = self.link.take() {
                if let Err(e) = link.peripheral.disconnect().await {
                    return ble_error(e);
                }
            }
            WriteResult::Ok
        })
    }
}

impl BtleplugDriver {
    async fn write_once(
        &mut self,
        char: BulbChar,
        value: GattPayload,
        flags: &Flags,
    ) -> WriteResult {
        if self.link.is_none() {
            match connect(self.address, self.scan_timeout).await {
                Ok(link) => self.link = Some(link),
                Err(res) => return res,
            }
        }
        let Some(link) = self.link.as_ref() else {
            return WriteResult::Disconnected;
        };
        let Some(ch) = link.chars.get(&char) else {
            return WriteResult::NotSupported(char);
        };
        let write_type = if flags.response() {
            WriteType::WithResponse
        } else {
            WriteType::WithoutResponse
        };
        match link.peripheral.write(ch, value.as_slice(), write_type).await {
            Ok(()) => WriteResult::Ok,
            Err(e) => {
                // Reconnect on the next attempt
                self.link = None;
                ble_error(e)
            }
        }
    }
}

fn ble_error(e: btleplug::Error) -> WriteResult {
    match e {
        btleplug::Error::TimedOut(_) => WriteResult::Timeout,
        btleplug::Error::NotConnected => WriteResult::Disconnected,
        e => WriteResult::DriverError(Box::new(e)),
    }
}

async fn connect(address: BDAddr, scan_timeout: Duration) -> Result<Link, WriteResult> {
    let manager = Manager::new().await.map_err(ble_error)?;
    let adapters = manager.adapters().await.map_err(ble_error)?;
    let Some(central) = adapters.into_iter().next() else {
        return Err(WriteResult::DriverError("no Bluetooth adapter found".into()));
    };
    central
        .start_scan(ScanFilter::default())
        .await
        .map_err(ble_error)?;
    let deadline = Instant::now() + scan_timeout;
    let peripheral = loop {
        if let Some(p) = lookup(&central, address).await.map_err(ble_error)? {
            break p;
        }
        if Instant::now() >= deadline {
            let _ = central.stop_scan().await;
            return Err(WriteResult::Timeout);
        }
        tokio::time::sleep(Duration::from_millis(250)).await;
    };
    let _ = central.stop_scan().await;
    peripheral.connect().await.map_err(ble_error)?;
    peripheral.discover_services().await.map_err(ble_error)?;

    let mut chars = HashMap::new();
    for ch in peripheral.characteristics() {
        if let Some(sel) = BulbChar::from_uuid(ch.uuid) {
            chars.insert(sel, ch);
        }
    }
    if chars.is_empty() {
        let _ = peripheral.disconnect().await;
        return Err(WriteResult::DriverError(
            "device exposes none of the expected bulb characteristics".into(),
        ));
    }
    info!("connected to {}", address);
    Ok(Link { peripheral, chars })
}

async fn lookup(central: &Adapter, address: BDAddr) -> Result<Option<Peripheral>, btleplug::Error> {
    for p in central.peripherals().await? {
        if p.address() == address {
            return Ok(Some(p));
        }
    }
    Ok(None)
}

fn driver_open(params: HashMap<String, String>) -> Result<Box<dyn BulbDriver>, OpenError> {
    let address = params
        .get("address")
        .ok_or_else(|| OpenError::ParameterError("address is required".to_string()))?;
    let address: BDAddr = address
        .parse()
        .map_err(|e| OpenError::ParameterError(format!("address: {}", e)))?;
    let scan_timeout = match params.get("timeout") {
        Some(t) => Duration::from_secs(
            t.parse()
                .map_err(|_| OpenError::ParameterError(format!("timeout: {}", t)))?,
        ),
        None => Duration::from_secs(10),
    };
    Ok(Box::new(BtleplugDriver {
        address,
        scan_timeout,
        link: None,
    }))
}

pub fn driver_info() -> DriverInfo {
    DriverInfo {
        name: "btleplug".to_string(),
        description:
            "BLE transport via the system Bluetooth stack. \
             Parameters: address (required), timeout (scan timeout in seconds)."
                .to_string(),
        open: driver_open,
    }
}
