//! Unit tests for cw-schedule.

use cw_core::{CarId, PedId, Side, SimTime};

use crate::{EventKind, EventQueue, ScheduleError};

// ── EventKind ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod event_kind {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(EventKind::CarSpawn.label(), "car_spawn");
        assert_eq!(EventKind::PedImpatience(PedId(3)).label(), "ped_impatience");
    }

    #[test]
    fn display_includes_payload() {
        assert_eq!(EventKind::PedSpawn { side: Side::B }.to_string(), "ped_spawn[B]");
        assert_eq!(EventKind::PedCrossEnd(PedId(4)).to_string(), "ped_cross_end[PedId(4)]");
        assert_eq!(EventKind::CarDepart(CarId(1)).to_string(), "car_depart[CarId(1)]");
        assert_eq!(EventKind::LightChange.to_string(), "light_change");
    }
}

// ── EventQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod event_queue {
    use super::*;

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new();
        q.push(SimTime(5.0), EventKind::CarSpawn).unwrap();
        q.push(SimTime(1.0), EventKind::LightChange).unwrap();
        q.push(SimTime(3.0), EventKind::PedSpawn { side: Side::A }).unwrap();

        assert_eq!(q.len(), 3);
        assert_eq!(q.peek_min_time(), Some(SimTime(1.0)));
        let times: Vec<f64> = std::iter::from_fn(|| q.pop_min()).map(|e| e.time.secs()).collect();
        assert_eq!(times, vec![1.0, 3.0, 5.0]);
        assert!(q.is_empty());
    }

    #[test]
    fn equal_times_are_fifo() {
        let mut q = EventQueue::new();
        for i in 0..10 {
            q.push(SimTime(2.0), EventKind::PedCrossStart(PedId(i))).unwrap();
        }
        q.push(SimTime(1.0), EventKind::CarSpawn).unwrap();
        assert_eq!(q.pop_min().unwrap().kind, EventKind::CarSpawn);
        for i in 0..10 {
            assert_eq!(q.pop_min().unwrap().kind, EventKind::PedCrossStart(PedId(i)));
        }
    }

    #[test]
    fn sequence_numbers_increase() {
        let mut q = EventQueue::new();
        assert_eq!(q.push(SimTime(9.0), EventKind::CarSpawn).unwrap(), 0);
        assert_eq!(q.push(SimTime(1.0), EventKind::CarSpawn).unwrap(), 1);
        assert_eq!(q.total_pushed(), 2);
        assert_eq!(q.pop_min().unwrap().seq, 1);
    }

    #[test]
    fn rejects_events_before_floor() {
        let mut q = EventQueue::with_capacity(4);
        q.push(SimTime(4.0), EventKind::LightChange).unwrap();
        q.pop_min().unwrap();
        assert_eq!(q.floor(), SimTime(4.0));

        let err = q.push(SimTime(3.5), EventKind::CarSpawn).unwrap_err();
        assert_eq!(err, ScheduleError::EventInPast { at: SimTime(3.5), floor: SimTime(4.0) });
        // Same instant as the floor is allowed.
        q.push(SimTime(4.0), EventKind::CarSpawn).unwrap();
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn rejects_non_finite_times() {
        let mut q = EventQueue::new();
        assert!(matches!(
            q.push(SimTime(f64::NAN), EventKind::CarSpawn),
            Err(ScheduleError::NonFinite(_))
        ));
        assert!(q.push(SimTime(f64::INFINITY), EventKind::CarSpawn).is_err());
        assert!(q.is_empty());
        assert_eq!(q.total_pushed(), 0);
    }

    #[test]
    fn empty_queue() {
        let mut q = EventQueue::new();
        assert!(q.is_empty());
        assert!(q.peek_min_time().is_none());
        assert!(q.pop_min().is_none());
    }
}

// ── Ordering properties ───────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// Every pop returns the minimum remaining (time, seq), and the size
        /// after n pushes and k pops is n - k.
        #[test]
        fn pop_min_returns_minimum(
            times in prop::collection::vec(0u32..50, 1..200),
            pops in 0usize..200,
        ) {
            let mut q = EventQueue::new();
            let mut pending: Vec<(SimTime, u64)> = Vec::new();
            for &t in &times {
                let time = SimTime(f64::from(t) * 0.5);
                let seq = q.push(time, EventKind::CarSpawn).unwrap();
                pending.push((time, seq));
            }

            let k = pops.min(times.len());
            for _ in 0..k {
                let expected = *pending.iter().min().unwrap();
                let event = q.pop_min().unwrap();
                prop_assert_eq!(event.key(), expected);
                pending.retain(|&key| key != expected);
            }
            prop_assert_eq!(q.len(), times.len() - k);
        }

        /// Interleaving pushes (never into the past) with pops keeps the
        /// output sequence non-decreasing in time.
        #[test]
        fn interleaved_output_is_monotone(deltas in prop::collection::vec(0u32..20, 1..300)) {
            let mut q = EventQueue::new();
            let mut last = SimTime::ZERO;
            for (i, &d) in deltas.iter().enumerate() {
                let at = q.floor() + f64::from(d);
                q.push(at, EventKind::LightChange).unwrap();
                if i % 3 == 2 {
                    let e = q.pop_min().unwrap();
                    prop_assert!(e.time >= last);
                    last = e.time;
                }
            }
            while let Some(e) = q.pop_min() {
                prop_assert!(e.time >= last);
                last = e.time;
            }
        }
    }
}
