use uuid::Uuid;

// Vendor service 932c32bd-xxxx-47a2-835a-a8d455b859dd, slots found by
// characteristic enumeration on the test lamp

pub const POWER: Uuid = Uuid::from_u128(0x932c32bd_0002_47a2_835a_a8d455b859dd);
pub const BRIGHTNESS: Uuid = Uuid::from_u128(0x932c32bd_0003_47a2_835a_a8d455b859dd);
pub const COLOR_TEMP: Uuid = Uuid::from_u128(0x932c32bd_0004_47a2_835a_a8d455b859dd);
pub const COLOR: Uuid = Uuid::from_u128(0x932c32bd_0005_47a2_835a_a8d455b859dd);

/// The writable characteristics a driver knows how to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulbChar {
    Power,
    Brightness,
    ColorTemp,
    Color,
}

impl BulbChar {
    pub const ALL: [BulbChar; 4] = [
        BulbChar::Power,
        BulbChar::Brightness,
        BulbChar::ColorTemp,
        BulbChar::Color,
    ];

    pub fn uuid(&self) -> Uuid {
        match self {
            BulbChar::Power => POWER,
            BulbChar::Brightness => BRIGHTNESS,
            BulbChar::ColorTemp => COLOR_TEMP,
            BulbChar::Color => COLOR,
        }
    }

    pub fn from_uuid(uuid: Uuid) -> Option<BulbChar> {
        BulbChar::ALL.into_iter().find(|c| c.uuid() == uuid)
    }
}

#[cfg(test)]
mod test {
    use super::BulbChar;

    #[test]
    fn test_uuid_round_trip() {
        for c in BulbChar::ALL {
            assert_eq!(BulbChar::from_uuid(c.uuid()), Some(c));
        }
    }

    #[test]
    fn test_uuid_text_form() {
        assert_eq!(
            BulbChar::Power.uuid().to_string(),
            "932c32bd-0002-47a2-835a-a8d455b859dd"
        );
    }
}
