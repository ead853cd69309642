//! Where each tick's output goes.

use quad_proto::telemetry::TelemetryFrame;
use tracing::trace;

use crate::mixer::MotorCommand;

/// Actuator boundary. Called exactly once per tick with clamped values.
pub trait MotorSink: Send {
    fn write(&mut self, cmd: &MotorCommand);
}

/// Best-effort telemetry output. Implementations must not block and must
/// swallow their own errors.
pub trait TelemetrySink: Send {
    fn publish(&mut self, frame: &TelemetryFrame);
}

/// No hardware attached.
#[derive(Debug, Default)]
pub struct NullMotors;

impl MotorSink for NullMotors {
    fn write(&mut self, cmd: &MotorCommand) {
        trace!("motors: {:?}", cmd.0);
    }
}

#[derive(Debug, Default)]
pub struct NullTelemetry;

impl TelemetrySink for NullTelemetry {
    fn publish(&mut self, _frame: &TelemetryFrame) {}
}
