//! Device-model contracts
//!
//! A panel driver never walks the hardware description itself. The host
//! hands it a [`DeviceNode`] that resolves named properties (`power-supply`,
//! `reset-gpios`, `backlight`, ...) into typed handles, and matches drivers
//! to nodes through static [`DriverRecord`] tables keyed by compatible
//! string.

use embedded_hal::digital::OutputPin;
use thiserror_no_std::Error;

use crate::display::Backlight;
use crate::power::Regulator;

/// Resource lookup failure.
///
/// `NotFound` is the only variant a driver may treat as "resource absent";
/// everything else means the resource exists but could not be acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LookupError {
    /// Property or target device does not exist
    #[error("not found")]
    NotFound,
    /// Resource is claimed by another device
    #[error("busy")]
    Busy,
    /// Property exists but is malformed
    #[error("invalid")]
    Invalid,
    /// Bus or controller error while binding the resource
    #[error("i/o error")]
    Io,
}

impl LookupError {
    /// `true` for the tolerated "absent" case.
    pub const fn is_not_found(self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// GPIO request flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioFlags(u32);

impl GpioFlags {
    /// Request as input
    pub const IS_IN: Self = Self(1 << 1);
    /// Request as output
    pub const IS_OUT: Self = Self(1 << 2);
    /// Logical value is inverted relative to the line level
    pub const ACTIVE_LOW: Self = Self(1 << 5);

    /// Raw bit pattern
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Combine two flag sets
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// `true` if every bit of `other` is set in `self`
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Hardware description of one device instance, as seen by its driver.
pub trait DeviceNode {
    /// Power-regulator handle type
    type Regulator: Regulator;
    /// GPIO line type handed out by `gpio_by_name`
    type ResetPin: OutputPin;
    /// Backlight device handle type
    type Backlight: Backlight;

    /// First compatible string of the node
    fn compatible(&self) -> &str;

    /// Resolve the regulator referenced by `prop` (e.g. `"power-supply"`).
    fn supply_regulator(&mut self, prop: &str) -> Result<Self::Regulator, LookupError>;

    /// Request GPIO `index` of the `prop` list with the given flags.
    fn gpio_by_name(
        &mut self,
        prop: &str,
        index: usize,
        flags: GpioFlags,
    ) -> Result<Self::ResetPin, LookupError>;

    /// Resolve the backlight device referenced by phandle property `prop`.
    fn backlight_by_phandle(&mut self, prop: &str) -> Result<Self::Backlight, LookupError>;
}

/// Device class a driver binds into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Uclass {
    /// Display panel
    Panel,
    /// Panel backlight
    PanelBacklight,
    /// Voltage regulator
    Regulator,
    /// GPIO controller
    Gpio,
}

/// One entry of a driver's match table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceId {
    /// Compatible string, `"vendor,model"`
    pub compatible: &'static str,
    /// Driver-private match data
    pub data: usize,
}

impl DeviceId {
    /// Match entry without private data
    pub const fn new(compatible: &'static str) -> Self {
        Self {
            compatible,
            data: 0,
        }
    }
}

/// Static registration record for a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverRecord {
    /// Driver name as shown in the boot log
    pub name: &'static str,
    /// Class the driver binds into
    pub id: Uclass,
    /// Compatible strings this driver accepts
    pub of_match: &'static [DeviceId],
}

impl DriverRecord {
    /// Match entry for `compatible`, if this driver accepts it.
    pub fn match_id(&self, compatible: &str) -> Option<&'static DeviceId> {
        self.of_match.iter().find(|id| id.compatible == compatible)
    }

    /// `true` if this driver accepts `compatible`.
    pub fn matches(&self, compatible: &str) -> bool {
        self.match_id(compatible).is_some()
    }
}

/// First record in `drivers` that accepts `compatible`.
pub fn find_driver<'a>(drivers: &'a [DriverRecord], compatible: &str) -> Option<&'a DriverRecord> {
    drivers.iter().find(|d| d.matches(compatible))
}
