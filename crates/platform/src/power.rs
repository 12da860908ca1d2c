//! Power-supply abstraction
//!
//! Panels are usually fed from a switchable regulator owned by a PMIC or a
//! GPIO-controlled load switch. Drivers only need to turn it on and off.

/// Switchable voltage regulator
pub trait Regulator {
    /// Error type
    type Error: core::fmt::Debug;

    /// Enable (`true`) or disable (`false`) the output.
    fn set_enable(&mut self, enable: bool) -> Result<(), Self::Error>;
}
