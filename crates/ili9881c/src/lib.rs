//! ILI9881C MIPI-DSI panel driver
//!
//! Boot-time driver for the PowerTip PH720128T003-ZBC02 720×1280 module
//! built around the Ilitek ILI9881C controller. It powers the panel, pulses
//! reset, programs the vendor register table over DSI and reports a single
//! fixed [`DisplayTiming`](platform::DisplayTiming) to the video stack.
//!
//! All calls are synchronous and block on the supplied
//! [`DelayNs`](embedded_hal::delay::DelayNs) for the panel's fixed waits
//! (about 1.5 s in total across probe and enable).
//!
//! # Example
//!
//! ```ignore
//! use ili9881c::{Ili9881cPanel, DRIVERS};
//! use platform::{find_driver, DsiPanelPlat, PanelOps};
//!
//! if find_driver(DRIVERS, node.compatible()).is_some() {
//!     let mut panel = Ili9881cPanel::ofdata_to_platdata(&mut node, DsiPanelPlat::new(dsi), delay)?;
//!     panel.probe()?;
//!     panel.enable_backlight()?;
//! }
//! ```
//!
//! # Features
//!
//! - `defmt` - Log through defmt (firmware builds)
//! - `tracing` - Log through tracing (host builds)

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

#[macro_use]
mod fmt;

pub mod config;
pub mod driver;
mod error;
pub mod init;
pub mod panel;

pub use driver::{DRIVERS, ILI9881C_IDS, ILI9881C_PANEL_DRIVER};
pub use error::PanelError;
pub use init::{Instr, Payload, PH720128T003_INIT};
pub use panel::{Ili9881cPanel, PanelState};
