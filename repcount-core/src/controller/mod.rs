//! Device controller
//!
//! Owns every piece of mutable state and the board capabilities, and runs
//! one control-loop iteration per [`DeviceController::step`].

mod counter;
mod device;
mod report;

pub use counter::Counter;
pub use device::DeviceController;
pub use report::StepReport;
