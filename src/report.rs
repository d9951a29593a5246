//! Plain-text rendering of an [`Evaluation`].

use std::fmt;

use crate::engine::Evaluation;

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Load Report ---")?;
        if self.lines.is_empty() {
            writeln!(f, "(no appliances selected)")?;
        }
        for line in &self.lines {
            writeln!(
                f,
                "{:>3} x {:<32} {:>7.0} W running {:>7.0} W surge",
                line.quantity, line.name, line.running_watts, line.surge_watts
            )?;
        }

        if !self.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "Warnings:")?;
            for warning in &self.warnings {
                writeln!(f, "  ! {warning}")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Total running load:    {:.0} W", self.totals.total_running_watts)?;
        writeln!(f, "Total surge load:      {:.0} W", self.totals.total_surge_watts)?;
        writeln!(f, "Required capacity:     {:.2} kVA", self.sizing.required_kva)?;
        match self.sizing.recommended_kva {
            Some(kva) => write!(f, "Recommended inverter:  {kva} kVA"),
            None => write!(f, "Recommended inverter:  exceeds largest available inverter"),
        }
    }
}
