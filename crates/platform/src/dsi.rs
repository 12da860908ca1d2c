//! MIPI-DSI transport abstraction
//!
//! The DSI host controller belongs to the host framework. Panel drivers see
//! it only through [`DsiTransport`]: attach with a [`LinkConfig`], push raw
//! DCS buffers, and issue the two standard power-state commands.

/// DSI pixel stream format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelFormat {
    /// 24 bpp, 8-8-8
    #[default]
    Rgb888,
    /// 18 bpp, loosely packed into 24-bit words
    Rgb666,
    /// 18 bpp, tightly packed
    Rgb666Packed,
    /// 16 bpp, 5-6-5
    Rgb565,
}

impl PixelFormat {
    /// Bits carried per pixel on the link
    pub const fn bits_per_pixel(self) -> u8 {
        match self {
            Self::Rgb888 => 24,
            Self::Rgb666 | Self::Rgb666Packed => 18,
            Self::Rgb565 => 16,
        }
    }
}

/// DSI peripheral mode flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeFlags(u32);

impl ModeFlags {
    /// Video mode
    pub const VIDEO: Self = Self(1 << 0);
    /// Video burst mode
    pub const VIDEO_BURST: Self = Self(1 << 1);
    /// Video mode with sync pulses
    pub const VIDEO_SYNC_PULSE: Self = Self(1 << 2);
    /// Automatic vertical-timing generation
    pub const VIDEO_AUTO_VERT: Self = Self(1 << 3);
    /// Hsync-end packets
    pub const VIDEO_HSE: Self = Self(1 << 4);
    /// Disable hfront-porch area
    pub const VIDEO_HFP: Self = Self(1 << 5);
    /// Disable hback-porch area
    pub const VIDEO_HBP: Self = Self(1 << 6);
    /// Disable hsync-active area
    pub const VIDEO_HSA: Self = Self(1 << 7);
    /// Flush display FIFO on vsync pulse
    pub const VSYNC_FLUSH: Self = Self(1 << 8);
    /// Disable EoT packets in HS mode
    pub const EOT_PACKET: Self = Self(1 << 9);
    /// Clock lane may stop between HS transfers
    pub const CLOCK_NON_CONTINUOUS: Self = Self(1 << 10);
    /// Transmit commands in low-power mode
    pub const LPM: Self = Self(1 << 11);

    /// No flags
    pub const fn empty() -> Self {
        Self(0)
    }

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

impl core::ops::BitOr for ModeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Link parameters the DSI host reads at attach time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// Number of data lanes (1..=4)
    pub lanes: u8,
    /// Pixel stream format
    pub format: PixelFormat,
    /// Mode flags
    pub mode_flags: ModeFlags,
}

/// Per-panel platform data shared between the panel driver and DSI host.
///
/// Allocated zeroed by the host; the panel fills in the link parameters
/// during probe.
pub struct DsiPanelPlat<DSI> {
    /// Transport handle for this panel's virtual channel
    pub device: DSI,
    /// Number of data lanes
    pub lanes: u8,
    /// Pixel stream format
    pub format: PixelFormat,
    /// Mode flags
    pub mode_flags: ModeFlags,
}

impl<DSI> DsiPanelPlat<DSI> {
    /// Zeroed platform data around a transport handle.
    pub fn new(device: DSI) -> Self {
        Self {
            device,
            lanes: 0,
            format: PixelFormat::default(),
            mode_flags: ModeFlags::empty(),
        }
    }

    /// Snapshot of the link parameters.
    pub fn link(&self) -> LinkConfig {
        LinkConfig {
            lanes: self.lanes,
            format: self.format,
            mode_flags: self.mode_flags,
        }
    }

    /// Overwrite the link parameters.
    pub fn set_link(&mut self, link: LinkConfig) {
        self.lanes = link.lanes;
        self.format = link.format;
        self.mode_flags = link.mode_flags;
    }
}

/// Standard DCS command codes used during panel bring-up.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DcsCommand {
    /// No operation
    Nop = 0x00,
    /// Software reset
    SoftReset = 0x01,
    /// Enter sleep mode
    EnterSleepMode = 0x10,
    /// Exit sleep mode; panel needs ~120 ms before the next command
    ExitSleepMode = 0x11,
    /// Blank the display
    SetDisplayOff = 0x28,
    /// Start showing frame memory
    SetDisplayOn = 0x29,
}

/// MIPI-DSI transport for one peripheral.
pub trait DsiTransport {
    /// Transport error type
    type Error: core::fmt::Debug;

    /// Attach the peripheral to the host with the given link parameters.
    fn attach(&mut self, link: &LinkConfig) -> Result<(), Self::Error>;

    /// Send a raw DCS buffer (command byte followed by parameters).
    fn dcs_write_buffer(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Issue `exit_sleep_mode`.
    fn dcs_exit_sleep_mode(&mut self) -> Result<(), Self::Error> {
        self.dcs_write_buffer(&[DcsCommand::ExitSleepMode as u8])
    }

    /// Issue `set_display_on`.
    fn dcs_set_display_on(&mut self) -> Result<(), Self::Error> {
        self.dcs_write_buffer(&[DcsCommand::SetDisplayOn as u8])
    }
}
