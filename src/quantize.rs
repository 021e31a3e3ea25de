use std::fmt;

// Guards against representation error when values sit exactly on a step
// boundary (e.g. 0.3 / 0.1 = 2.999...).
const UNIT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone)]
pub enum QuantizeError {
    InvalidStep { step: f64 },
}

impl fmt::Display for QuantizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantizeError::InvalidStep { step } => {
                write!(f, "quantization step {step} must be a positive finite number")
            }
        }
    }
}

impl std::error::Error for QuantizeError {}

/// Rounds hour values to a fixed step while preserving their total.
///
/// Every value is floored to the step, then the shortfall against the
/// step-rounded true total is handed out one step at a time to the
/// entries with the largest fractional remainder (largest-remainder
/// method), ties broken by original ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantizer {
    step: f64,
}

impl Quantizer {
    pub fn new(step: f64) -> Result<Self, QuantizeError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(QuantizeError::InvalidStep { step });
        }
        Ok(Self { step })
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Round a single value to the nearest step.
    pub fn round_to_step(&self, value: f64) -> f64 {
        (value / self.step).round() * self.step
    }

    /// Quantize a list of values so that the results sum to the
    /// step-rounded true total.
    pub fn quantize(&self, values: &[f64]) -> Vec<f64> {
        if values.is_empty() {
            return Vec::new();
        }

        let total: f64 = values.iter().sum();
        let target_units = (total / self.step).round() as i64;

        let mut floored_units: Vec<i64> = Vec::with_capacity(values.len());
        let mut remainders: Vec<(usize, f64)> = Vec::with_capacity(values.len());
        for (idx, value) in values.iter().enumerate() {
            let units = value / self.step;
            let floored = (units + UNIT_EPSILON).floor();
            floored_units.push(floored as i64);
            remainders.push((idx, units - floored));
        }

        let floored_sum: i64 = floored_units.iter().sum();
        let mut shortfall = (target_units - floored_sum).max(0);

        // Largest remainder first; equal remainders keep input order.
        remainders.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then(a.0.cmp(&b.0)));
        for (idx, _) in remainders {
            if shortfall == 0 {
                break;
            }
            floored_units[idx] += 1;
            shortfall -= 1;
        }

        floored_units
            .into_iter()
            .map(|units| units as f64 * self.step)
            .collect()
    }
}
