use serde::Serialize;

use crate::features::driver_builder::DriverProcedure;
use crate::shared::models::SynthesisWarning;

/// Result of one synthesis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesisOutcome {
    pub procedure: DriverProcedure,
    /// Declaring classes of every handler that made it into the driver
    pub required_classes: Vec<String>,
    pub warnings: Vec<SynthesisWarning>,
}

impl SynthesisOutcome {
    /// Every handler resolved and every value was built
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn warnings_with_code<'a>(
        &'a self,
        code: &'a str,
    ) -> impl Iterator<Item = &'a SynthesisWarning> + 'a {
        self.warnings.iter().filter(move |w| w.code() == code)
    }
}
