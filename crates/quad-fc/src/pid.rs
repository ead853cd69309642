use quad_params::PidGains;

/// Textbook PID, one per axis.
///
/// No output limit and no anti-windup: the integral keeps accumulating
/// for as long as the error persists.
#[derive(Debug, Clone, Default)]
pub struct Pid {
    gains: PidGains,
    integral: f64,
    prev_error: f64,
}

impl Pid {
    pub fn new(gains: PidGains) -> Self {
        Self { gains, integral: 0.0, prev_error: 0.0 }
    }

    pub fn compute(&mut self, setpoint: f64, process_value: f64, dt: f64) -> f64 {
        let error = setpoint - process_value;
        self.integral += error * dt;
        let derivative = if dt > 0.0 { (error - self.prev_error) / dt } else { 0.0 };
        self.prev_error = error;
        self.gains.kp * error + self.gains.ki * self.integral + self.gains.kd * derivative
    }

    /// Swap gains; integral and last error carry over.
    pub fn set_gains(&mut self, gains: PidGains) {
        self.gains = gains;
    }

    pub fn gains(&self) -> PidGains {
        self.gains
    }

    pub fn integral(&self) -> f64 {
        self.integral
    }

    pub fn prev_error(&self) -> f64 {
        self.prev_error
    }
}
