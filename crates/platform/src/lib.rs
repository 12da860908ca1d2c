//! Host-framework contracts for boot-time panel drivers
//!
//! This crate describes everything a display panel driver consumes from the
//! bootloader's device model without implementing any of it: resource lookup
//! on the hardware description, the MIPI-DSI transport, regulators,
//! backlights, GPIO descriptors and the panel-ops table handed to the video
//! stack.
//!
//! # Architecture Layers
//!
//! ```text
//! Video stack (display controller, splash/console)
//!         ↓ PanelOps
//! Panel driver (ili9881c crate)
//!         ↓ DeviceNode / DsiTransport / Regulator / Backlight / OutputPin / DelayNs
//! Platform contracts (this crate)
//!         ↓
//! Device model + DSI host + GPIO/PMIC drivers
//! ```
//!
//! GPIO lines and delays use the `embedded-hal` 1.0 blocking traits
//! directly; boot-time bring-up is synchronous.
//!
//! # Features
//!
//! - `std`: Build the journaling [`mocks`] outside of `cfg(test)`
//! - `defmt`: Enable defmt logging derives on all platform types

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::doc_markdown)] // register names and compatible strings in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors, callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod device;
pub mod display;
pub mod dsi;
pub mod gpio;
pub mod mocks;
pub mod power;

pub use device::{find_driver, DeviceId, DeviceNode, DriverRecord, GpioFlags, LookupError, Uclass};
pub use display::{
    Backlight, Brightness, BrightnessOutOfRange, DisplayFlags, DisplayTiming, PanelOps, TimingEntry,
};
pub use dsi::{DcsCommand, DsiPanelPlat, DsiTransport, LinkConfig, ModeFlags, PixelFormat};
pub use gpio::{GpioDesc, GpioError};
pub use power::Regulator;
