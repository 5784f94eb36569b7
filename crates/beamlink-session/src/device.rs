/// An error reported by a device hook.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct DeviceError(pub String);

/// Capability hooks of a physical beam-spotter model.
///
/// One implementation per model. The session invokes `initialize` during
/// bring-up, `update` at the start of every tick, and `read` after a fix
/// report has been recorded.
pub trait SensorDevice {
    /// Model name for diagnostics.
    fn model(&self) -> &'static str;

    /// One-time bring-up, invoked before the configuration exchange.
    fn initialize(&mut self) -> Result<(), DeviceError>;

    /// Periodic maintenance, invoked at the start of each tick.
    fn update(&mut self) -> Result<(), DeviceError>;

    /// Post-fix readout hook, invoked after a fix report is recorded.
    fn read(&mut self) -> Result<(), DeviceError>;
}

/// The TriEye beam spotter.
///
/// Hardware bring-up happens off-board, so the hooks are no-ops at this
/// layer.
#[derive(Debug, Default)]
pub struct Trieye;

impl SensorDevice for Trieye {
    fn model(&self) -> &'static str {
        "trieye"
    }

    fn initialize(&mut self) -> Result<(), DeviceError> {
        Ok(())
    }

    fn update(&mut self) -> Result<(), DeviceError> {
        Ok(())
    }

    fn read(&mut self) -> Result<(), DeviceError> {
        Ok(())
    }
}
