use super::domain::{Phase, PhaseKind};

/// Splits a total estimate into the four construction phases.
///
/// Each phase is rounded up on its own, so the phases may add up to more than
/// `months` (by at most three).
pub fn decompose(months: u8) -> [Phase; 4] {
    PhaseKind::ordered().map(|kind| Phase {
        kind,
        name: kind.label(),
        duration_months: share_of(months, kind.share_percent()),
    })
}

fn share_of(months: u8, percent: u32) -> u8 {
    let scaled = u32::from(months) * percent;
    let rounded_up = scaled.div_ceil(100);
    u8::try_from(rounded_up).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn durations(months: u8) -> [u8; 4] {
        decompose(months).map(|phase| phase.duration_months)
    }

    #[test]
    fn ten_months_split_exactly() {
        let phases = decompose(10);
        let names: Vec<_> = phases.iter().map(|phase| phase.name).collect();
        assert_eq!(
            names,
            [
                "Planning & Design",
                "Permits & Approvals",
                "Construction",
                "Finishing & Handover"
            ]
        );
        assert_eq!(durations(10), [3, 2, 4, 1]);
    }

    #[test]
    fn floor_estimate_rounds_every_phase_up() {
        assert_eq!(durations(6), [2, 2, 3, 1]);
    }

    #[test]
    fn rounded_phases_can_exceed_the_total() {
        // 7 months: 2.1, 1.4, 2.8, 0.7 all round up.
        assert_eq!(durations(7), [3, 2, 3, 1]);
        assert_eq!(durations(7).iter().map(|d| u32::from(*d)).sum::<u32>(), 9);

        for months in 6..=18u8 {
            let total: u32 = durations(months).iter().map(|d| u32::from(*d)).sum();
            assert!(total >= u32::from(months));
            assert!(total - u32::from(months) <= 3, "{months} months over by more than 3");
        }
    }

    #[test]
    fn zero_months_yields_empty_phases() {
        assert_eq!(durations(0), [0, 0, 0, 0]);
    }
}
