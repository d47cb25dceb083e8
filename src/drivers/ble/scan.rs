use crate::error::DynResult;
use btleplug::api::{BDAddr, Central, Manager as _, Peripheral as _, ScanFilter};
use btleplug::platform::Manager;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DiscoveredBulb {
    pub address: BDAddr,
    pub name: Option<String>,
    pub rssi: Option<i16>,
}

/// Scan for `duration` and report everything the adapter saw. The bulb
/// advertises its characteristics only after connecting, so filtering by
/// name is left to the caller.
pub async fn scan(duration: Duration) -> DynResult<Vec<DiscoveredBulb>> {
    let manager = Manager::new().await?;
    let Some(central) = manager.adapters().await?.into_iter().next() else {
        return Err("no Bluetooth adapter found".into());
    };
    central.start_scan(ScanFilter::default()).await?;
    tokio::time::sleep(duration).await;

    let mut found = Vec::new();
    for p in central.peripherals().await? {
        let (name, rssi) = match p.properties().await? {
            Some(props) => (props.local_name, props.rssi),
            None => (None, None),
        };
        found.push(DiscoveredBulb {
            address: p.address(),
            name,
            rssi,
        });
    }
    central.stop_scan().await?;
    Ok(found)
}
