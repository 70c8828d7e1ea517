#![forbid(unsafe_code)]

use crate::domain::{ParticipantId, PointsLedger};
use tracing::debug;

/// Rolls driver points up into team standings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TeamAggregator;

impl TeamAggregator {
    /// Sum each driver's points into its team. Teams appear in the order their
    /// first driver appears in `drivers`; drivers without a team are skipped.
    pub fn aggregate<F>(drivers: &PointsLedger, driver_to_team: F) -> PointsLedger
    where
        F: Fn(ParticipantId) -> Option<ParticipantId>,
    {
        let mut teams = PointsLedger::new();
        for (driver, points) in drivers.iter() {
            match driver_to_team(driver) {
                Some(team) => teams.award(team, points),
                None => debug!(?driver, points, "driver has no team, points not carried"),
            }
        }
        teams
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use slotmap::SlotMap;
    use std::collections::HashMap;

    #[test]
    fn sums_drivers_and_skips_unmapped() {
        let mut arena: SlotMap<ParticipantId, ()> = SlotMap::with_key();
        let (a, b, c, d) = (arena.insert(()), arena.insert(()), arena.insert(()), arena.insert(()));
        let (red, blue) = (arena.insert(()), arena.insert(()));
        let teams = HashMap::from([(a, blue), (b, red), (c, blue)]);

        let drivers: PointsLedger = [(a, 25), (b, 18), (c, 15), (d, 40)].into_iter().collect();
        let ledger = TeamAggregator::aggregate(&drivers, |driver| teams.get(&driver).copied());

        assert_eq!(ledger.participants(), &[blue, red]);
        assert_eq!(ledger.get(blue), Some(40));
        assert_eq!(ledger.get(red), Some(18));
        assert_eq!(ledger.total(), 58);
    }
}
