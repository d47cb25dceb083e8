//! Payload formats for the bulb's vendor GATT service.
//!
//! Everything here was established by probing a single "Hue color lamp"
//! over BLE; none of it is documented by the vendor.
//!
//! # Raw color protocol, unresolved
//!
//! The color characteristic accepts a 4 byte packet whose interpretation
//! is still not settled. Observations from the probing sessions:
//!
//! * Byte 0 acts as a latch: the write is ignored unless it is nonzero.
//!   0x01, 0x0a, 0x64 and 0xfe all behave the same.
//! * With byte 3 zero, byte 1 sweeps from blue (0x00) through purple and
//!   magenta to red (0xfe), which looks like a hue angle.
//! * Byte 3 nonzero overrides byte 1 entirely and sweeps cyan (low
//!   values) to green (0xfe).
//! * Byte 2 had no visible effect in any combination tried.
//! * Yellow and orange could not be produced at all with this encoding.
//!
//! Three hypotheses remain open: a hue/saturation pair, a scaled xy
//! chromaticity pair, or a proprietary header format. Likewise it is not
//! confirmed whether the lamp's real gamut is Gamut B or Gamut C; both
//! stay selectable in [`crate::color::gamut`]. Until the format is
//! pinned down, [`commands::color_xy`] writes the little-endian scaled
//! xy pair used by the mains-powered Hue firmware, which is the encoding
//! the conversion pipeline targets.

pub mod characteristics;
pub mod commands;
