//! Display panel abstraction layer
//!
//! Panel drivers export [`PanelOps`] to the video stack. The video stack
//! asks for the panel's [`DisplayTiming`] to program the display controller,
//! then calls `enable_backlight` once the pixel pipeline is running.

use thiserror_no_std::Error;

/// One timing parameter as a min/typ/max triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingEntry {
    /// Minimum
    pub min: u32,
    /// Typical
    pub typ: u32,
    /// Maximum
    pub max: u32,
}

impl TimingEntry {
    /// Entry with a single fixed value
    pub const fn fixed(value: u32) -> Self {
        Self {
            min: value,
            typ: value,
            max: value,
        }
    }
}

/// Sync and data-enable polarity flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayFlags(u32);

impl DisplayFlags {
    /// Hsync active low
    pub const HSYNC_LOW: Self = Self(1 << 0);
    /// Hsync active high
    pub const HSYNC_HIGH: Self = Self(1 << 1);
    /// Vsync active low
    pub const VSYNC_LOW: Self = Self(1 << 2);
    /// Vsync active high
    pub const VSYNC_HIGH: Self = Self(1 << 3);

    /// No flags
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Raw bit pattern
    pub const fn bits(self) -> u32 {
        self.0
    }
}

/// Panel timing record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayTiming {
    /// Pixel clock in Hz
    pub pixelclock: TimingEntry,
    /// Horizontal active pixels
    pub hactive: TimingEntry,
    /// Horizontal front porch
    pub hfront_porch: TimingEntry,
    /// Horizontal back porch
    pub hback_porch: TimingEntry,
    /// Hsync pulse width
    pub hsync_len: TimingEntry,
    /// Vertical active lines
    pub vactive: TimingEntry,
    /// Vertical front porch
    pub vfront_porch: TimingEntry,
    /// Vertical back porch
    pub vback_porch: TimingEntry,
    /// Vsync pulse width
    pub vsync_len: TimingEntry,
    /// Polarity flags
    pub flags: DisplayFlags,
}

impl DisplayTiming {
    /// Typical total line length in pixel clocks.
    pub fn htotal(&self) -> u32 {
        self.hactive
            .typ
            .saturating_add(self.hfront_porch.typ)
            .saturating_add(self.hback_porch.typ)
            .saturating_add(self.hsync_len.typ)
    }

    /// Typical total frame height in lines.
    pub fn vtotal(&self) -> u32 {
        self.vactive
            .typ
            .saturating_add(self.vfront_porch.typ)
            .saturating_add(self.vback_porch.typ)
            .saturating_add(self.vsync_len.typ)
    }

    /// Typical refresh rate, rounded down; 0 for an empty record.
    pub fn frame_rate_hz(&self) -> u32 {
        let pixels_per_frame = u64::from(self.htotal()).saturating_mul(u64::from(self.vtotal()));
        u64::from(self.pixelclock.typ)
            .checked_div(pixels_per_frame)
            .and_then(|hz| u32::try_from(hz).ok())
            .unwrap_or(0)
    }
}

/// Backlight level in percent (0–100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness(u8);

/// Returned by [`Brightness::try_new`] for values above 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("brightness {0} out of range 0..=100")]
pub struct BrightnessOutOfRange(pub u8);

impl Brightness {
    /// Backlight off
    pub const OFF: Self = Self(0);
    /// Full brightness
    pub const MAX: Self = Self(100);

    /// Clamp `percent` to 100.
    pub const fn new(percent: u8) -> Self {
        if percent > 100 {
            Self(100)
        } else {
            Self(percent)
        }
    }

    /// Reject values above 100.
    pub const fn try_new(percent: u8) -> Result<Self, BrightnessOutOfRange> {
        if percent > 100 {
            Err(BrightnessOutOfRange(percent))
        } else {
            Ok(Self(percent))
        }
    }

    /// Percent value
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Backlight device (PWM or GPIO driven)
pub trait Backlight {
    /// Error type
    type Error: core::fmt::Debug;

    /// Set the backlight level.
    fn set_brightness(&mut self, level: Brightness) -> Result<(), Self::Error>;
}

/// Operations a panel driver exports to the video stack.
pub trait PanelOps {
    /// Error type
    type Error: core::fmt::Debug;

    /// Finish panel bring-up once the pixel pipeline is configured.
    fn enable_backlight(&mut self) -> Result<(), Self::Error>;

    /// Change the backlight level.
    fn set_backlight(&mut self, level: Brightness) -> Result<(), Self::Error>;

    /// Copy the panel timing into `timing`.
    fn get_display_timing(&self, timing: &mut DisplayTiming) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timing() -> DisplayTiming {
        DisplayTiming {
            pixelclock: TimingEntry::fixed(54_000_000),
            hactive: TimingEntry::fixed(720),
            hfront_porch: TimingEntry::fixed(20),
            hback_porch: TimingEntry::fixed(20),
            hsync_len: TimingEntry::fixed(2),
            vactive: TimingEntry::fixed(1280),
            vfront_porch: TimingEntry::fixed(15),
            vback_porch: TimingEntry::fixed(10),
            vsync_len: TimingEntry::fixed(2),
            flags: DisplayFlags::empty(),
        }
    }

    #[test]
    fn test_fixed_entry() {
        let e = TimingEntry::fixed(42);
        assert_eq!((e.min, e.typ, e.max), (42, 42, 42));
    }

    #[test]
    fn test_totals_and_rate() {
        let t = sample_timing();
        assert_eq!(t.htotal(), 762);
        assert_eq!(t.vtotal(), 1307);
        // 54 MHz / (762 × 1307) ≈ 54.2 Hz
        assert_eq!(t.frame_rate_hz(), 54);
    }

    #[test]
    fn test_empty_timing_has_zero_rate() {
        assert_eq!(DisplayTiming::default().frame_rate_hz(), 0);
    }

    #[test]
    fn test_brightness_clamps() {
        assert_eq!(Brightness::new(150), Brightness::MAX);
        assert_eq!(Brightness::new(0), Brightness::OFF);
        assert_eq!(Brightness::new(42).get(), 42);
    }

    #[test]
    fn test_brightness_try_new() {
        assert_eq!(Brightness::try_new(100).map(Brightness::get), Ok(100));
        assert_eq!(Brightness::try_new(101), Err(BrightnessOutOfRange(101)));
    }
}
