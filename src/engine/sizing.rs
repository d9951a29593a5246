//! Inverter sizing policy: required capacity and threshold table lookup.

use serde::Serialize;

use super::load::LoadTotals;

/// Standard inverter ratings (kVA), ascending.
pub const DEFAULT_INVERTER_SIZES_KVA: [f64; 8] = [1.5, 2.5, 3.5, 5.0, 7.5, 10.0, 15.0, 20.0];

/// Converts load totals into a required apparent power and picks a rating.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingPolicy {
    sizes_kva: Vec<f64>,
    /// Real-to-apparent power ratio (0, 1].
    pub power_factor: f64,
    /// Headroom applied to continuous load (>= 1).
    pub safety_margin: f64,
    /// Short-term overload an inverter tolerates, as a multiple of its rating (>= 1).
    pub surge_tolerance: f64,
}

impl Default for SizingPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_INVERTER_SIZES_KVA.to_vec(), 0.8, 1.25, 2.0)
    }
}

/// Sizing outcome for one selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sizing {
    /// Minimum apparent power the inverter must deliver (kVA).
    pub required_kva: f64,
    /// Smallest table rating covering `required_kva`; `None` above the table.
    pub recommended_kva: Option<f64>,
}

impl SizingPolicy {
    /// Builds a policy; the threshold table is sorted ascending.
    pub fn new(
        mut sizes_kva: Vec<f64>,
        power_factor: f64,
        safety_margin: f64,
        surge_tolerance: f64,
    ) -> Self {
        sizes_kva.sort_by(f64::total_cmp);
        Self {
            sizes_kva,
            power_factor,
            safety_margin,
            surge_tolerance,
        }
    }

    /// Threshold table, ascending.
    pub fn sizes_kva(&self) -> &[f64] {
        &self.sizes_kva
    }

    /// Capacity needed to carry the running load with margin and absorb the
    /// simultaneous surge within the inverter's overload tolerance.
    pub fn required_kva(&self, totals: &LoadTotals) -> f64 {
        let continuous = totals.total_running_watts * self.safety_margin;
        let peak = totals.total_surge_watts / self.surge_tolerance;
        continuous.max(peak) / self.power_factor / 1000.0
    }

    pub fn recommend(&self, totals: &LoadTotals) -> Sizing {
        let required_kva = self.required_kva(totals);
        let recommended_kva = self
            .sizes_kva
            .iter()
            .copied()
            .find(|&size| size >= required_kva);
        Sizing {
            required_kva,
            recommended_kva,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn totals(running: f64, surge: f64) -> LoadTotals {
        LoadTotals {
            total_running_watts: running,
            total_surge_watts: surge,
        }
    }

    #[test]
    fn empty_load_gets_smallest_rating() {
        let sizing = SizingPolicy::default().recommend(&LoadTotals::default());
        assert_eq!(sizing.required_kva, 0.0);
        assert_eq!(sizing.recommended_kva, Some(1.5));
    }

    #[test]
    fn continuous_load_dominates_gentle_surge() {
        // 1200 W × 1.25 / 0.8 = 1.875 kVA
        let sizing = SizingPolicy::default().recommend(&totals(1200.0, 1200.0));
        assert_relative_eq!(sizing.required_kva, 1.875);
        assert_eq!(sizing.recommended_kva, Some(2.5));
    }

    #[test]
    fn surge_dominates_motor_loads() {
        // 918 W running, 2718 W surge: max(1147.5, 1359) / 0.8 = 1.69875 kVA
        let sizing = SizingPolicy::default().recommend(&totals(918.0, 2718.0));
        assert_relative_eq!(sizing.required_kva, 1.69875);
        assert_eq!(sizing.recommended_kva, Some(2.5));
    }

    #[test]
    fn beyond_table_has_no_recommendation() {
        let sizing = SizingPolicy::default().recommend(&totals(20_000.0, 20_000.0));
        assert!(sizing.required_kva > 20.0);
        assert_eq!(sizing.recommended_kva, None);
    }

    #[test]
    fn table_is_sorted_on_construction() {
        let policy = SizingPolicy::new(vec![5.0, 1.0, 3.0], 1.0, 1.0, 1.0);
        assert_eq!(policy.sizes_kva(), &[1.0, 3.0, 5.0]);
        assert_eq!(policy.recommend(&totals(2000.0, 2000.0)).recommended_kva, Some(3.0));
    }
}
