pub mod error;

pub mod color {
    pub mod convert;
    pub mod gamut;
    pub mod point;
    pub mod temperature;
}

pub mod protocol;

pub mod drivers;

pub mod control {
    pub mod bulb;
    pub mod profile;
}

pub mod utils {
    pub mod dyn_future;
}
