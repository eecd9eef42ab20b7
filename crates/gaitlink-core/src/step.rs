//! Steps: the ordered units a goal is made of.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::swing::SwingDescription;

/// One step of a goal: a set of swings executed together.
///
/// Limbs without a swing hold their stance for the whole step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Step {
    pub number: u32,
    pub swings: Vec<SwingDescription>,
}

impl Step {
    pub fn new(number: u32, swings: Vec<SwingDescription>) -> Self {
        Step { number, swings }
    }

    /// Duration of the step: the longest swing in it, `0.0` when empty.
    pub fn duration(&self) -> f64 {
        self.swings
            .iter()
            .map(SwingDescription::duration)
            .fold(0.0, f64::max)
    }

    /// The swing moving `name`, if any.
    pub fn swing_for(&self, name: &str) -> Option<&SwingDescription> {
        self.swings.iter().find(|swing| swing.name == name)
    }
}
