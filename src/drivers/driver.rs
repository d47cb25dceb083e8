use super::send_flags::Flags;
use crate::protocol::characteristics::BulbChar;
use crate::utils::dyn_future::DynFuture;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Mutex;

/// Value written to a characteristic. The vendor service only uses one,
/// two and four byte payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GattPayload {
    Single([u8; 1]),
    Pair([u8; 2]),
    Quad([u8; 4]),
}

impl GattPayload {
    pub fn as_slice(&self) -> &[u8] {
        match self {
            GattPayload::Single(b) => b,
            GattPayload::Pair(b) => b,
            GattPayload::Quad(b) => b,
        }
    }
}

/// Outcome of a single write transaction.
#[derive(Debug)]
pub enum WriteResult {
    Ok,
    Timeout,
    Disconnected,
    NotSupported(BulbChar),
    DriverError(Box<dyn Error + Send + Sync>),
}

impl WriteResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, WriteResult::Ok)
    }
}

impl fmt::Display for WriteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteResult::Ok => write!(f, "OK"),
            WriteResult::Timeout => write!(f, "Write timed out"),
            WriteResult::Disconnected => write!(f, "Device disconnected"),
            WriteResult::NotSupported(c) => {
                write!(f, "Device has no {:?} characteristic", c)
            }
            WriteResult::DriverError(e) => write!(f, "Driver error: {}", e),
        }
    }
}

/// A transport that can deliver payloads to the bulb's characteristics.
///
/// Writes on one driver are serialized by the `&mut self` receiver; BLE
/// stacks require in-order GATT writes on a single connection.
pub trait BulbDriver: Send {
    fn write_char(
        &mut self,
        char: BulbChar,
        value: GattPayload,
        flags: Flags,
    ) -> DynFuture<'_, WriteResult>;

    fn disconnect(&mut self) -> DynFuture<'_, WriteResult>;
}

#[derive(Debug)]
pub enum OpenError {
    NotFound,
    ParameterError(String),
    DriverError(Box<dyn Error + Send + Sync>),
}

impl fmt::Display for OpenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenError::NotFound => write!(f, "No matching driver found"),
            OpenError::ParameterError(p) => write!(f, "Invalid driver parameter: {}", p),
            OpenError::DriverError(e) => write!(f, "Driver failed to open: {}", e),
        }
    }
}

impl Error for OpenError {}

pub type DriverOpen =
    fn(params: HashMap<String, String>) -> Result<Box<dyn BulbDriver>, OpenError>;

pub struct DriverInfo {
    pub name: String,
    pub description: String,
    pub open: DriverOpen,
}

lazy_static! {
    static ref DRIVERS: Mutex<Vec<DriverInfo>> = Mutex::new(Vec::new());
}

pub fn add_driver(info: DriverInfo) {
    let mut drivers = DRIVERS.lock().unwrap();
    if !drivers.iter().any(|d| d.name == info.name) {
        drivers.push(info);
    }
}

pub fn driver_names() -> Vec<String> {
    DRIVERS.lock().unwrap().iter().map(|d| d.name.clone()).collect()
}

/// Open a driver by specification string.
///
/// The format is `name` or `name:key=value;key=value`. Parameter values
/// may themselves contain colons, only the first colon separates the
/// driver name (BLE addresses look like `aa:bb:cc:dd:ee:ff`). The name
/// `default` selects the first registered driver.
pub fn open(spec: &str) -> Result<Box<dyn BulbDriver>, OpenError> {
    let (name, param_str) = match spec.split_once(':') {
        Some((n, p)) => (n, p),
        None => (spec, ""),
    };
    let mut params = HashMap::new();
    for kv in param_str.split(';').filter(|s| !s.is_empty()) {
        match kv.split_once('=') {
            Some((k, v)) => {
                params.insert(k.to_string(), v.to_string());
            }
            None => return Err(OpenError::ParameterError(kv.to_string())),
        }
    }
    let drivers = DRIVERS.lock().unwrap();
    let info = if name == "default" {
        drivers.first()
    } else {
        drivers.iter().find(|d| d.name == name)
    }
    .ok_or(OpenError::NotFound)?;
    (info.open)(params)
}

#[cfg(test)]
mod test {
    use super::*;

    struct NullDriver;
    impl BulbDriver for NullDriver {
        fn write_char(
            &mut self,
            _char: BulbChar,
            _value: GattPayload,
            _flags: Flags,
        ) -> DynFuture<'_, WriteResult> {
            Box::pin(futures::future::ready(WriteResult::Ok))
        }
        fn disconnect(&mut self) -> DynFuture<'_, WriteResult> {
            Box::pin(futures::future::ready(WriteResult::Ok))
        }
    }

    fn null_open(
        params: HashMap<String, String>,
    ) -> Result<Box<dyn BulbDriver>, OpenError> {
        match params.get("address") {
            Some(a) if a.is_empty() => {
                Err(OpenError::ParameterError("address".to_string()))
            }
            _ => Ok(Box::new(NullDriver)),
        }
    }

    fn register() {
        add_driver(DriverInfo {
            name: "null".to_string(),
            description: "Discards everything".to_string(),
            open: null_open,
        });
    }

    #[test]
    fn test_open_by_name_and_params() {
        register();
        assert!(driver_names().contains(&"null".to_string()));
        assert!(open("null").is_ok());
        assert!(open("null:address=c7:46:23:94:4a:14").is_ok());
        assert!(open("default").is_ok());
        assert!(matches!(open("missing"), Err(OpenError::NotFound)));
        assert!(matches!(
            open("null:address"),
            Err(OpenError::ParameterError(_))
        ));
    }

    #[test]
    fn test_payload_slices() {
        assert_eq!(GattPayload::Single([1]).as_slice(), &[1]);
        assert_eq!(GattPayload::Pair([1, 2]).as_slice(), &[1, 2]);
        assert_eq!(GattPayload::Quad([1, 2, 3, 4]).as_slice(), &[1, 2, 3, 4]);
    }
}
