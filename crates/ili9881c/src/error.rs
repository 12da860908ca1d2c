//! Panel driver errors

use platform::LookupError;
use thiserror_no_std::Error;

/// Errors reported by the ILI9881C panel driver.
///
/// Transport, regulator and backlight errors are erased at the boundary; the
/// variant records which step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// `power-supply` exists but could not be acquired
    #[error("cannot get power supply: {0}")]
    Supply(LookupError),
    /// `reset-gpios` exists but could not be requested
    #[error("cannot get reset GPIO: {0}")]
    ResetGpio(LookupError),
    /// The required `backlight` phandle did not resolve
    #[error("cannot get backlight: {0}")]
    BacklightLookup(LookupError),
    /// Regulator refused to switch on
    #[error("regulator enable failed")]
    Regulator,
    /// Backlight device rejected a request
    #[error("backlight control failed")]
    Backlight,
    /// DSI host refused the attach
    #[error("DSI attach failed")]
    Attach,
    /// A DCS buffer write failed; `cmd` is the first byte of the payload
    #[error("DCS write failed at cmd {cmd:#x}")]
    Write {
        /// Command byte of the failing write
        cmd: u8,
    },
    /// `exit_sleep_mode` primitive failed
    #[error("DCS exit sleep mode failed")]
    ExitSleep,
    /// `set_display_on` primitive failed
    #[error("DCS set display on failed")]
    DisplayOn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_failing_step() {
        assert_eq!(
            PanelError::BacklightLookup(LookupError::NotFound).to_string(),
            "cannot get backlight: not found"
        );
        assert_eq!(
            PanelError::Write { cmd: 0xB2 }.to_string(),
            "DCS write failed at cmd 0xb2"
        );
    }
}
