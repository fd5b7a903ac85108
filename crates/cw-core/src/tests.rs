//! Unit tests for cw-core primitives.

/// A scripted uniform source that replays `values` in order.
struct Scripted {
    values: Vec<f64>,
    pos:    usize,
}

impl Scripted {
    fn new(values: &[f64]) -> Self {
        Self { values: values.to_vec(), pos: 0 }
    }
}

impl crate::UniformSource for Scripted {
    fn next_uniform(&mut self) -> crate::DrawResult<f64> {
        let v = self.values[self.pos];
        self.pos += 1;
        Ok(v)
    }
}

#[cfg(test)]
mod ids {
    use crate::{CarId, PedId};

    #[test]
    fn next_increments() {
        assert_eq!(PedId(0).next(), PedId(1));
        assert_eq!(CarId(41).next(), CarId(42));
    }

    #[test]
    fn display() {
        assert_eq!(PedId(7).to_string(), "PedId(7)");
        assert_eq!(CarId(3).to_string(), "CarId(3)");
    }
}

#[cfg(test)]
mod time {
    use crate::{CoreError, SimClock, SimTime};

    #[test]
    fn time_arithmetic() {
        let t = SimTime(10.0);
        assert_eq!(t + 5.5, SimTime(15.5));
        assert_eq!(SimTime(15.0) - SimTime(10.0), 5.0);
        assert_eq!(SimTime(15.0).since(SimTime(4.0)), 11.0);
    }

    #[test]
    fn total_order() {
        assert!(SimTime(1.0) < SimTime(2.0));
        assert!(SimTime(-0.0) < SimTime(0.0));
        assert_eq!(SimTime(3.25).max(SimTime(1.0)), SimTime(3.25));
    }

    #[test]
    fn clock_advances_and_allows_equal_times() {
        let mut clock = SimClock::new();
        clock.advance_to(SimTime(2.0)).unwrap();
        clock.advance_to(SimTime(2.0)).unwrap();
        assert_eq!(clock.now(), SimTime(2.0));
    }

    #[test]
    fn clock_rejects_regression() {
        let mut clock = SimClock::new();
        clock.advance_to(SimTime(5.0)).unwrap();
        let err = clock.advance_to(SimTime(4.0)).unwrap_err();
        assert!(matches!(err, CoreError::ClockRegression { .. }));
        assert_eq!(clock.now(), SimTime(5.0));
    }

    #[test]
    fn clock_display() {
        let mut clock = SimClock::new();
        clock.advance_to(SimTime(3_725.0)).unwrap();
        assert_eq!(clock.to_string(), "t=3725.000s (01h02m)");
    }
}

#[cfg(test)]
mod rng {
    use super::Scripted;
    use crate::rng::{bernoulli, exponential, open_unit, uniform};
    use crate::{RngStreams, VariateRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = VariateRng::new(12345);
        let mut r2 = VariateRng::new(12345);
        for _ in 0..100 {
            let (a, b) = (r1.exponential(0.5).unwrap(), r2.exponential(0.5).unwrap());
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn streams_are_independent() {
        let mut s = RngStreams::new(1);
        let a = s.pedestrians.exponential(1.0).unwrap();
        let b = s.automobiles.exponential(1.0).unwrap();
        let c = s.button.exponential(1.0).unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn open_unit_rejects_endpoints() {
        let mut src = Scripted::new(&[0.0, 1.0, 0.0, 0.25]);
        assert_eq!(open_unit(&mut src).unwrap(), 0.25);
    }

    #[test]
    fn exponential_inverse_cdf() {
        let mut src = Scripted::new(&[0.0, 0.5]);
        let x = exponential(&mut src, 2.0).unwrap();
        assert!((x - std::f64::consts::LN_2 / 2.0).abs() < 1e-12, "got {x}");
    }

    #[test]
    #[should_panic(expected = "positive finite rate")]
    fn exponential_rejects_zero_rate() {
        let mut rng = VariateRng::new(0);
        let _ = rng.exponential(0.0);
    }

    #[test]
    #[should_panic(expected = "positive finite rate")]
    fn exponential_rejects_negative_rate() {
        let mut rng = VariateRng::new(0);
        let _ = rng.exponential(-1.0);
    }

    #[test]
    fn exponential_positive_with_mean_near_inverse_rate() {
        let mut rng = VariateRng::new(7);
        let rate = 0.25;
        let n = 200_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let x = rng.exponential(rate).unwrap();
            assert!(x > 0.0);
            sum += x;
        }
        let mean = sum / n as f64;
        assert!((mean - 4.0).abs() < 0.05, "sample mean {mean}");
    }

    #[test]
    fn uniform_in_bounds() {
        let mut rng = VariateRng::new(3);
        for _ in 0..1000 {
            let v = rng.uniform(2.6, 4.1).unwrap();
            assert!(v > 2.6 && v < 4.1);
        }
        let mut src = Scripted::new(&[0.5]);
        assert_eq!(uniform(&mut src, 2.0, 4.0).unwrap(), 3.0);
    }

    #[test]
    fn bernoulli_extremes() {
        let mut rng = VariateRng::new(0);
        for _ in 0..100 {
            assert!(!rng.bernoulli(0.0).unwrap());
            assert!(rng.bernoulli(1.0).unwrap());
        }
        let mut src = Scripted::new(&[0.9, 0.1]);
        assert!(bernoulli(&mut src, 15.0 / 16.0).unwrap());
        assert!(!bernoulli(&mut src, 0.5).unwrap());
    }
}

#[cfg(test)]
mod stats {
    use crate::Welford;

    fn two_pass(xs: &[f64]) -> (f64, f64) {
        let n = xs.len() as f64;
        let mean = xs.iter().sum::<f64>() / n;
        let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        (mean, var)
    }

    #[test]
    fn empty_reports_nothing() {
        let s = Welford::new().finalize();
        assert_eq!(s.count, 0);
        assert_eq!(s.mean, None);
        assert_eq!(s.variance, None);
        assert_eq!(s.sample_variance, None);
    }

    #[test]
    fn single_observation_has_mean_only() {
        let mut w = Welford::new();
        w.update(3.5);
        let s = w.finalize();
        assert_eq!(s.count, 1);
        assert_eq!(s.mean, Some(3.5));
        assert_eq!(s.variance, None);
        assert_eq!(s.std_dev(), None);
    }

    #[test]
    fn matches_two_pass_computation() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0, 0.125, 31.5];
        let mut w = Welford::new();
        xs.iter().for_each(|&x| w.update(x));
        let s = w.finalize();
        let (mean, var) = two_pass(&xs);
        assert!((s.mean.unwrap() - mean).abs() < 1e-12);
        assert!((s.variance.unwrap() - var).abs() < 1e-9);
        let n = xs.len() as f64;
        assert!((s.sample_variance.unwrap() - var * n / (n - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn stable_with_large_offset() {
        // Naive Σx² loses every significant digit here.
        let xs: Vec<f64> = (0..1000).map(|i| 1e9 + (i % 10) as f64).collect();
        let mut w = Welford::new();
        xs.iter().for_each(|&x| w.update(x));
        let (_, var) = two_pass(&xs);
        assert!((w.finalize().variance.unwrap() - var).abs() < 1e-4);
    }

    #[test]
    fn merge_equals_single_stream() {
        let xs = [1.0, 8.0, 2.5, 9.75, 3.0, 4.0, 11.0];
        let mut all = Welford::new();
        let mut left = Welford::new();
        let mut right = Welford::new();
        for (i, &x) in xs.iter().enumerate() {
            all.update(x);
            if i < 3 { left.update(x) } else { right.update(x) }
        }
        left.merge(&right);
        let (a, b) = (all.finalize(), left.finalize());
        assert_eq!(a.count, b.count);
        assert!((a.mean.unwrap() - b.mean.unwrap()).abs() < 1e-12);
        assert!((a.variance.unwrap() - b.variance.unwrap()).abs() < 1e-9);
    }

    #[test]
    fn merge_into_empty() {
        let mut a = Welford::new();
        let mut b = Welford::new();
        b.update(2.0);
        b.update(4.0);
        a.merge(&b);
        assert_eq!(a, b);
        a.merge(&Welford::new());
        assert_eq!(a, b);
    }
}

#[cfg(test)]
mod config {
    use crate::{ConfigError, CrossingTime, CrosswalkConfig, StopCondition};

    #[test]
    fn default_is_valid() {
        let cfg = CrosswalkConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.capacity, 20);
    }

    #[test]
    fn rejects_non_positive_rates() {
        let cfg = CrosswalkConfig { ped_rate: 0.0, ..Default::default() };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositive { field: "ped_rate", .. })
        ));
        let cfg = CrosswalkConfig { car_rate: -1.0, ..Default::default() };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositive { field: "car_rate", .. })
        ));
        let cfg = CrosswalkConfig { walk_secs: f64::NAN, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_capacity() {
        let cfg = CrosswalkConfig { capacity: 0, ..Default::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroCapacity));
    }

    #[test]
    fn allows_zero_clearance_but_not_negative() {
        let cfg = CrosswalkConfig { clearance_secs: 0.0, min_red_secs: 0.0, ..Default::default() };
        assert!(cfg.validate().is_ok());
        let cfg = CrosswalkConfig { clearance_secs: -1.0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::Negative { .. })));
    }

    #[test]
    fn rejects_bad_crossing_models() {
        let cfg = CrosswalkConfig {
            crossing: CrossingTime::Fixed { secs: 0.0 },
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = CrosswalkConfig {
            crossing: CrossingTime::Walking { street_width_ft: 46.0, min_speed: 5.0, max_speed: 4.0 },
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptySpeedRange { .. })));
    }

    #[test]
    fn requires_a_stop_condition() {
        let cfg = CrosswalkConfig {
            stop: StopCondition { horizon: None, max_events: None, max_arrivals: None },
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NoStopCondition));
        let cfg = CrosswalkConfig {
            stop: StopCondition { horizon: None, max_events: None, max_arrivals: Some(10) },
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }
}

#[cfg(test)]
mod trace {
    use std::io::{Cursor, Write};

    use crate::{TraceError, TraceSource, UniformSource, VariateRng};

    fn source(text: &'static str) -> TraceSource<Cursor<&'static str>> {
        TraceSource::from_reader("test.trace", Cursor::new(text))
    }

    #[test]
    fn replays_values_in_order() {
        let mut src = source("0.25\n\n  0.5 \n1\n0\n");
        assert_eq!(src.next_uniform().unwrap(), 0.25);
        assert_eq!(src.next_uniform().unwrap(), 0.5);
        assert_eq!(src.next_uniform().unwrap(), 1.0);
        assert_eq!(src.next_uniform().unwrap(), 0.0);
        assert_eq!(src.drawn(), 4);
    }

    #[test]
    fn end_of_trace_is_an_error() {
        let mut src = source("0.5\n");
        src.next_uniform().unwrap();
        assert_eq!(
            src.next_uniform(),
            Err(TraceError::Exhausted { trace: "test.trace".into(), drawn: 1 })
        );
    }

    #[test]
    fn malformed_lines_report_their_line_number() {
        let mut src = source("0.1\n\nabc\n");
        src.next_uniform().unwrap();
        assert_eq!(
            src.next_uniform(),
            Err(TraceError::Malformed { trace: "test.trace".into(), line: 3, text: "abc".into() })
        );
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(matches!(source("1.5\n").next_uniform(), Err(TraceError::Malformed { .. })));
        assert!(matches!(source("-0.1\n").next_uniform(), Err(TraceError::Malformed { .. })));
        assert!(matches!(source("NaN\n").next_uniform(), Err(TraceError::Malformed { .. })));
    }

    #[test]
    fn variates_skip_endpoints_in_a_trace() {
        let mut rng = VariateRng::from_source(source("0\n0.5\n"));
        let x = rng.exponential(2.0).unwrap();
        assert!((x - std::f64::consts::LN_2 / 2.0).abs() < 1e-12, "got {x}");
        assert!(matches!(rng.exponential(2.0), Err(TraceError::Exhausted { drawn: 2, .. })));
    }

    #[test]
    fn opens_a_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(file, "0.75").unwrap();
        writeln!(file, "0.125").unwrap();
        let mut src = TraceSource::open(file.path()).unwrap();
        assert_eq!(src.next_uniform().unwrap(), 0.75);
        assert_eq!(src.next_uniform().unwrap(), 0.125);
        assert!(src.next_uniform().is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = TraceSource::open(&dir.path().join("absent.trace")).err().unwrap();
        assert!(matches!(err, TraceError::Io { .. }), "{err}");
    }
}
