//! leoni-hardware
//!
//! Hardware abstraction crate that contains the low-level serial driver and the
//! high-level switch controller logic. This crate is intended to be used by the
//! CLI crate and by applications that drive a Leoni fibre switch directly.
//!
//! Public API:
//! - `switch_controller::SwitchController` - high-level controller for channel selection
//! - `switch_controller::{LiveSwitch, SimulatedSwitch}` - backends behind the controller
//! - `serial_driver::SerialDriver` - low-level serial I/O driver
//! - `serial_driver::available_ports` - helper to list serial ports on the host
//!
//! ```no_run
//! use leoni_core::SwitchConfig;
//! use leoni_hardware::SwitchController;
//!
//! # async fn example() -> leoni_core::Result<()> {
//! let mut switch = SwitchController::open(&SwitchConfig::live("/dev/ttyUSB0")).await?;
//! switch.set_active_channel(3).await?;
//! assert_eq!(switch.active_channel().await?, 3);
//! switch.close()?;
//! # Ok(())
//! # }
//! ```

pub mod serial_driver;
pub mod switch_controller;

pub use serial_driver::{available_ports, LineTransport, SerialDriver};
pub use switch_controller::{LiveSwitch, SimulatedSwitch, SwitchBackend, SwitchController};

#[cfg(test)]
mod tests {
    // Basic smoke tests to ensure the crate compiles and the public items are exposed.
    use super::*;

    #[test]
    fn exports_present() {
        let _ = std::any::TypeId::of::<SwitchController>();
        let _ = std::any::TypeId::of::<SerialDriver>();
        let _ = std::any::TypeId::of::<SimulatedSwitch>();
    }
}
