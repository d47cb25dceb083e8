use crate::color::convert::rgb_to_xy;
use crate::color::gamut::Gamut;
use crate::color::point::XyPoint;
use crate::color::temperature::cct_to_xy;
use crate::drivers::driver::{BulbDriver, GattPayload, WriteResult};
use crate::drivers::send_flags::{Flags, NO_FLAG};
use crate::protocol::characteristics::BulbChar;
use crate::protocol::commands;
use log::debug;
use std::error::Error;
use std::fmt;

/// Temperature range the bulb's dedicated characteristic accepts.
const CCT_DEVICE_RANGE: std::ops::RangeInclusive<u32> = 2000..=6500;
/// Validity range of the black body approximation used for the xy path.
const CCT_XY_RANGE: std::ops::RangeInclusive<u32> = 1667..=25000;

#[derive(Debug)]
pub enum BulbError {
    Write(WriteResult),
    BrightnessOutOfRange(f32),
    ColorTempOutOfRange(u32),
}

impl fmt::Display for BulbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BulbError::Write(res) => write!(f, "{}", res),
            BulbError::BrightnessOutOfRange(p) => {
                write!(f, "Brightness {}% outside 0-100%", p)
            }
            BulbError::ColorTempOutOfRange(k) => {
                write!(f, "Color temperature {} K not supported", k)
            }
        }
    }
}

impl Error for BulbError {}

/// One bulb behind one driver. All operations go through the driver
/// sequentially; the configured gamut decides which chromaticities are
/// sent on the wire.
pub struct Bulb {
    driver: Box<dyn BulbDriver>,
    gamut: Gamut,
    flags: Flags,
}

impl Bulb {
    pub fn new(driver: Box<dyn BulbDriver>, gamut: Gamut) -> Bulb {
        Bulb {
            driver,
            gamut,
            flags: NO_FLAG,
        }
    }

    /// Replace the write flags used for every subsequent operation.
    pub fn with_flags(mut self, flags: Flags) -> Bulb {
        self.flags = flags;
        self
    }

    pub fn gamut(&self) -> &Gamut {
        &self.gamut
    }

    async fn write(&mut self, char: BulbChar, value: GattPayload) -> Result<(), BulbError> {
        match self.driver.write_char(char, value, self.flags.clone()).await {
            WriteResult::Ok => Ok(()),
            res => Err(BulbError::Write(res)),
        }
    }

    pub async fn power_on(&mut self) -> Result<(), BulbError> {
        self.write(BulbChar::Power, GattPayload::Single(commands::power(true)))
            .await
    }

    pub async fn power_off(&mut self) -> Result<(), BulbError> {
        self.write(BulbChar::Power, GattPayload::Single(commands::power(false)))
            .await
    }

    /// Brightness in percent, 0-100. Out of range values are rejected,
    /// not clamped; a silently corrected level would hide caller bugs.
    pub async fn set_brightness(&mut self, percent: f32) -> Result<(), BulbError> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(BulbError::BrightnessOutOfRange(percent));
        }
        self.write(
            BulbChar::Brightness,
            GattPayload::Single(commands::brightness(percent)),
        )
        .await
    }

    /// White color temperature through the dedicated characteristic.
    pub async fn set_color_temp(&mut self, kelvin: u32) -> Result<(), BulbError> {
        if !CCT_DEVICE_RANGE.contains(&kelvin) {
            return Err(BulbError::ColorTempOutOfRange(kelvin));
        }
        self.write(
            BulbChar::ColorTemp,
            GattPayload::Pair(commands::color_temp(kelvin)),
        )
        .await
    }

    /// White color temperature rendered through the color characteristic
    /// instead. Useful on firmwares where the temperature slot
    /// misbehaves, and for temperatures outside the device range.
    pub async fn set_color_temp_xy(&mut self, kelvin: u32) -> Result<(), BulbError> {
        if !CCT_XY_RANGE.contains(&kelvin) {
            return Err(BulbError::ColorTempOutOfRange(kelvin));
        }
        let p = cct_to_xy(kelvin);
        self.set_color_xy(p.x, p.y).await
    }

    /// Send a chromaticity directly, clamped into the configured gamut.
    pub async fn set_color_xy(&mut self, x: f32, y: f32) -> Result<(), BulbError> {
        let p = self.gamut.clamp(XyPoint::new(x, y));
        debug!("xy ({}, {}) -> {:?}", x, y, p);
        self.write(BulbChar::Color, GattPayload::Quad(commands::color_xy(p)))
            .await
    }

    /// Full conversion pipeline: sRGB triplet to gamut clamped xy.
    pub async fn set_color_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<(), BulbError> {
        let c = rgb_to_xy(r, g, b, &self.gamut);
        debug!("rgb ({}, {}, {}) -> {:?}", r, g, b, c);
        self.write(
            BulbChar::Color,
            GattPayload::Quad(commands::color_xy(c.xy)),
        )
        .await
    }

    pub async fn disconnect(&mut self) -> Result<(), BulbError> {
        match self.driver.disconnect().await {
            WriteResult::Ok => Ok(()),
            res => Err(BulbError::Write(res)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::color::gamut::GAMUT_C;
    use crate::utils::dyn_future::DynFuture;
    use std::sync::{Arc, Mutex};

    struct RecordingDriver {
        writes: Arc<Mutex<Vec<(BulbChar, Vec<u8>)>>>,
    }

    impl BulbDriver for RecordingDriver {
        fn write_char(
            &mut self,
            char: BulbChar,
            value: GattPayload,
            _flags: Flags,
        ) -> DynFuture<'_, WriteResult> {
            self.writes
                .lock()
                .unwrap()
                .push((char, value.as_slice().to_vec()));
            Box::pin(futures::future::ready(WriteResult::Ok))
        }

        fn disconnect(&mut self) -> DynFuture<'_, WriteResult> {
            Box::pin(futures::future::ready(WriteResult::Ok))
        }
    }

    fn recording_bulb() -> (Bulb, Arc<Mutex<Vec<(BulbChar, Vec<u8>)>>>) {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let driver = RecordingDriver {
            writes: writes.clone(),
        };
        (Bulb::new(Box::new(driver), GAMUT_C), writes)
    }

    fn wire_xy(bytes: &[u8]) -> (f32, f32) {
        let x = u16::from_le_bytes([bytes[0], bytes[1]]) as f32 / 65535.0;
        let y = u16::from_le_bytes([bytes[2], bytes[3]]) as f32 / 65535.0;
        (x, y)
    }

    #[tokio::test]
    async fn test_power_sequence() {
        let (mut bulb, writes) = recording_bulb();
        bulb.power_on().await.unwrap();
        bulb.power_off().await.unwrap();
        let writes = writes.lock().unwrap();
        assert_eq!(
            *writes,
            vec![
                (BulbChar::Power, vec![0x01]),
                (BulbChar::Power, vec![0x00])
            ]
        );
    }

    #[tokio::test]
    async fn test_brightness_validation() {
        let (mut bulb, writes) = recording_bulb();
        bulb.set_brightness(100.0).await.unwrap();
        assert!(matches!(
            bulb.set_brightness(120.0).await,
            Err(BulbError::BrightnessOutOfRange(_))
        ));
        assert!(matches!(
            bulb.set_brightness(-1.0).await,
            Err(BulbError::BrightnessOutOfRange(_))
        ));
        // Only the valid write reached the driver
        assert_eq!(
            *writes.lock().unwrap(),
            vec![(BulbChar::Brightness, vec![0xfe])]
        );
    }

    #[tokio::test]
    async fn test_color_temp_validation() {
        let (mut bulb, writes) = recording_bulb();
        bulb.set_color_temp(2700).await.unwrap();
        assert!(matches!(
            bulb.set_color_temp(1000).await,
            Err(BulbError::ColorTempOutOfRange(1000))
        ));
        assert_eq!(
            *writes.lock().unwrap(),
            vec![(BulbChar::ColorTemp, vec![0x0e, 0x01])]
        );
    }

    #[tokio::test]
    async fn test_rgb_goes_through_pipeline() {
        let (mut bulb, writes) = recording_bulb();
        bulb.set_color_rgb(255, 0, 0).await.unwrap();
        let writes = writes.lock().unwrap();
        let (char, bytes) = &writes[0];
        assert_eq!(*char, BulbChar::Color);
        let (x, y) = wire_xy(bytes);
        // sRGB red, well inside the red corner of the gamut
        assert!(x > 0.6);
        assert!(y > 0.28 && y < 0.36);
    }

    #[tokio::test]
    async fn test_xy_is_gamut_clamped() {
        let (mut bulb, writes) = recording_bulb();
        // Far outside any bulb gamut
        bulb.set_color_xy(0.9, 0.9).await.unwrap();
        let writes = writes.lock().unwrap();
        let (x, y) = wire_xy(&writes[0].1);
        let clamped = XyPoint::new(x, y);
        assert!(
            GAMUT_C.contains(clamped)
                || clamped.distance(&GAMUT_C.closest_on_boundary(clamped)) < 1e-3
        );
    }

    #[tokio::test]
    async fn test_temp_via_color_path() {
        let (mut bulb, writes) = recording_bulb();
        bulb.set_color_temp_xy(2700).await.unwrap();
        let writes = writes.lock().unwrap();
        assert_eq!(writes[0].0, BulbChar::Color);
        let (x, y) = wire_xy(&writes[0].1);
        // Warm white, reddish side of the diagram
        assert!(x > 0.4 && x < 0.5);
        assert!(y > 0.35 && y < 0.45);
    }
}
