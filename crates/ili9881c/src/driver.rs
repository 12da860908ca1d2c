//! Driver registration
//!
//! The device model matches panel nodes against [`DRIVERS`] by compatible
//! string before handing the node to
//! [`Ili9881cPanel::ofdata_to_platdata`](crate::Ili9881cPanel::ofdata_to_platdata).

use platform::{DeviceId, DriverRecord, Uclass};

use crate::config::{COMPATIBLE, DRIVER_NAME};

/// Compatible strings handled by this driver
pub const ILI9881C_IDS: &[DeviceId] = &[DeviceId::new(COMPATIBLE)];

/// Registration record for the ILI9881C panel driver
pub const ILI9881C_PANEL_DRIVER: DriverRecord = DriverRecord {
    name: DRIVER_NAME,
    id: Uclass::Panel,
    of_match: ILI9881C_IDS,
};

/// Every driver record exported by this crate
pub static DRIVERS: &[DriverRecord] = &[ILI9881C_PANEL_DRIVER];

#[cfg(test)]
mod tests {
    use super::*;
    use platform::find_driver;

    #[test]
    fn test_matches_powertip_compatible() {
        let record = find_driver(DRIVERS, "powertip,ph720128t003-zbc02").unwrap();
        assert_eq!(record.name, "ili9881c_panel");
        assert_eq!(record.id, Uclass::Panel);
    }

    #[test]
    fn test_ignores_other_ili9881c_modules() {
        assert!(find_driver(DRIVERS, "bananapi,lhr050h41").is_none());
        assert!(find_driver(DRIVERS, "").is_none());
    }
}
