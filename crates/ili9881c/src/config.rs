//! PowerTip PH720128T003-ZBC02 panel configuration
//!
//! Everything here is fixed by the panel module; nothing is negotiated at
//! runtime.
//!
//! | Parameter      | Value                                 |
//! |----------------|---------------------------------------|
//! | Resolution     | 720 × 1280                            |
//! | Pixel clock    | 54 MHz                                |
//! | H porch / sync | front 20, back 20, sync 2             |
//! | V porch / sync | front 15, back 10, sync 2             |
//! | DSI link       | 2 lanes, RGB888, video + sync pulse, LPM |

use platform::{DisplayFlags, DisplayTiming, LinkConfig, ModeFlags, PixelFormat, TimingEntry};

/// Compatible string matched by the driver record
pub const COMPATIBLE: &str = "powertip,ph720128t003-zbc02";

/// Driver name as shown in the boot log
pub const DRIVER_NAME: &str = "ili9881c_panel";

/// Regulator property on the panel node
pub const SUPPLY_PROP: &str = "power-supply";

/// Reset GPIO property on the panel node
pub const RESET_PROP: &str = "reset-gpios";

/// Backlight phandle property on the panel node
pub const BACKLIGHT_PROP: &str = "backlight";

/// The single mode this panel supports.
pub const DEFAULT_TIMING: DisplayTiming = DisplayTiming {
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
};

/// DSI link parameters written into platform data at probe.
pub const LINK_CONFIG: LinkConfig = LinkConfig {
    lanes: 2,
    format: PixelFormat::Rgb888,
    mode_flags: ModeFlags::VIDEO
        .union(ModeFlags::VIDEO_SYNC_PULSE)
        .union(ModeFlags::LPM),
};

/// Reset pulse train applied at probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetTiming {
    /// Number of low/high pulses
    pub pulses: u8,
    /// Time the line is held low per pulse
    pub low_ms: u32,
    /// Time the line is held high per pulse
    pub high_ms: u32,
    /// Extra settle time after the last pulse
    pub settle_ms: u32,
}

/// Three pulses, then one long settle.
///
/// The module does not reliably leave reset after a single pulse; keep the
/// repeat count and hold times as they are.
pub const RESET_TIMING: ResetTiming = ResetTiming {
    pulses: 3,
    low_ms: 20,
    high_ms: 100,
    settle_ms: 1000,
};

/// Delay between the in-sequence exit-sleep and display-on writes.
pub const SEQUENCE_EXIT_SLEEP_MS: u32 = 120;

/// Delay after each dedicated DCS primitive in `enable_backlight`.
pub const DCS_SETTLE_MS: u32 = 125;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_is_a_single_fixed_mode() {
        let t = DEFAULT_TIMING;
        for e in [
            t.pixelclock,
            t.hactive,
            t.hfront_porch,
            t.hback_porch,
            t.hsync_len,
            t.vactive,
            t.vfront_porch,
            t.vback_porch,
            t.vsync_len,
        ] {
            assert_eq!(e.min, e.typ);
            assert_eq!(e.typ, e.max);
        }
        assert_eq!(t.hactive.typ, 720);
        assert_eq!(t.vactive.typ, 1280);
        assert_eq!(t.pixelclock.typ, 54_000_000);
        assert_eq!(t.flags.bits(), 0);
    }

    #[test]
    fn test_link_config() {
        assert_eq!(LINK_CONFIG.lanes, 2);
        assert_eq!(LINK_CONFIG.format, PixelFormat::Rgb888);
        assert!(LINK_CONFIG.mode_flags.contains(ModeFlags::VIDEO));
        assert!(LINK_CONFIG.mode_flags.contains(ModeFlags::VIDEO_SYNC_PULSE));
        assert!(LINK_CONFIG.mode_flags.contains(ModeFlags::LPM));
        assert!(!LINK_CONFIG.mode_flags.contains(ModeFlags::VIDEO_BURST));
    }
}
