use crate::color::gamut::{Gamut, GAMUT_B, GAMUT_C};
use crate::error::DynResult;
use serde_derive::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

/// Which gamut class a firmware belongs to. It has not been confirmed
/// which one the probed lamp really uses, so this stays configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamutClass {
    GamutB,
    GamutC,
}

impl GamutClass {
    pub fn gamut(&self) -> Gamut {
        match self {
            GamutClass::GamutB => GAMUT_B,
            GamutClass::GamutC => GAMUT_C,
        }
    }
}

impl FromStr for GamutClass {
    type Err = String;
    fn from_str(s: &str) -> Result<GamutClass, String> {
        match s {
            "b" | "B" | "gamut_b" => Ok(GamutClass::GamutB),
            "c" | "C" | "gamut_c" => Ok(GamutClass::GamutC),
            other => Err(format!("unknown gamut class '{}'", other)),
        }
    }
}

/// Per-device configuration, loadable from JSON.
///
/// `device` is a driver specification as accepted by
/// [`crate::drivers::open`], e.g. `btleplug:address=c7:46:23:94:4a:14`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub device: String,
    pub gamut: GamutClass,
    #[serde(default)]
    pub name: Option<String>,
}

impl DeviceProfile {
    pub fn load(path: &Path) -> DynResult<DeviceProfile> {
        let file = File::open(path)?;
        let profile = serde_json::from_reader(BufReader::new(file))?;
        Ok(profile)
    }
}

#[cfg(test)]
mod test {
    use super::{DeviceProfile, GamutClass};
    use crate::color::gamut::GAMUT_C;

    #[test]
    fn test_profile_json() {
        let json = r#"{
            "device": "btleplug:address=c7:46:23:94:4a:14",
            "gamut": "gamut_c",
            "name": "Hue color lamp 2"
        }"#;
        let profile: DeviceProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.gamut, GamutClass::GamutC);
        assert_eq!(profile.gamut.gamut(), GAMUT_C);
        assert_eq!(profile.name.as_deref(), Some("Hue color lamp 2"));
    }

    #[test]
    fn test_name_is_optional() {
        let json = r#"{"device": "dummy", "gamut": "gamut_b"}"#;
        let profile: DeviceProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.gamut, GamutClass::GamutB);
        assert!(profile.name.is_none());
    }

    #[test]
    fn test_gamut_class_from_str() {
        assert_eq!("c".parse::<GamutClass>().unwrap(), GamutClass::GamutC);
        assert_eq!("B".parse::<GamutClass>().unwrap(), GamutClass::GamutB);
        assert!("d".parse::<GamutClass>().is_err());
    }
}
