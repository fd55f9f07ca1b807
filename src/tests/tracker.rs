use rstest::*;

use crate::{
    prelude::{
        Config, Error, FixQuality, GeoPosition, RangeObservation, TrackedFix, Tracker,
        Transponder, TransponderId,
    },
    tests::{init_logger, local, range_to, triangle, triangle_at_depth, MAX_FIX_ERROR_M},
};

/// Ready [Tracker] on the triangle test field, starting at `start`
fn tracker(start: GeoPosition) -> Tracker {
    Tracker::new(Config::default(), triangle(), start).unwrap()
}

/// Range from `vehicle` to transponder `id` of the triangle test field
fn range(id: u16, vehicle: &GeoPosition) -> f64 {
    range_to(&triangle()[id as usize], vehicle, 0.0)
}

#[test]
fn static_vehicle() {
    init_logger();

    // vehicle 30m east and 40m north of T0
    let vehicle = local(40.0, 30.0);
    let mut tracker = tracker(local(38.0, 28.0));

    assert!(tracker.is_ready());
    assert_eq!(tracker.last_known_position(), local(38.0, 28.0));
    assert_eq!(tracker.last_known_timestamp_ms(), None);

    // nothing to pair with
    let fix = tracker
        .update_range_accepted(TransponderId(0), 50.0, 1_000)
        .unwrap();
    assert!(fix.is_none());
    assert_eq!(tracker.last_known_timestamp_ms(), None);
    assert_eq!(tracker.range_sample(TransponderId(0)).unwrap().last(), Some(50.0));

    let h_b = (70.0_f64.powi(2) + 40.0_f64.powi(2)).sqrt();

    let fix = tracker
        .update_range_accepted(TransponderId(1), h_b, 2_000)
        .unwrap()
        .unwrap();

    assert_eq!(fix.timestamp_ms, 2_000);
    assert_eq!(fix.baseline, (TransponderId(0), TransponderId(1)));
    assert_eq!(fix.quality, FixQuality::Accepted);

    let err = fix.position.horizontal_distance_m(&vehicle);
    assert!(err < MAX_FIX_ERROR_M, "fix error: {:.6}m", err);

    assert_eq!(tracker.last_known_position(), fix.position);
    assert_eq!(tracker.last_known_timestamp_ms(), Some(2_000));
    assert_eq!(tracker.history().len(), 1);
}

#[rstest]
#[case(40.0, 30.0)]
#[case(20.0, 20.0)]
#[case(-50.0, 60.0)]
#[case(120.0, -40.0)]
fn every_baseline(#[case] north_m: f64, #[case] east_m: f64) {
    init_logger();

    let vehicle = local(north_m, east_m);
    let mut tracker = tracker(local(north_m + 2.0, east_m - 2.0));

    let mut t = 0;
    for cycle in 0..3 {
        for id in 0..3 {
            t += 100;
            let fix = tracker
                .update_range_accepted(TransponderId(id), range(id, &vehicle), t)
                .unwrap();

            if cycle == 0 && id == 0 {
                assert!(fix.is_none(), "no range to T2 yet");
                continue;
            }

            let fix = fix.unwrap_or_else(|| panic!("{}ms: no fix on T{}", t, id));
            let prev = (id + 2) % 3;
            assert_eq!(fix.baseline, (TransponderId(prev), TransponderId(id)));

            let err = fix.position.horizontal_distance_m(&vehicle);
            assert!(err < MAX_FIX_ERROR_M, "{}: error={:.6}m", fix, err);
        }
    }

    assert_eq!(tracker.history().len(), 8);
}

#[test]
fn index_wraparound() {
    init_logger();

    let vehicle = local(40.0, 30.0);
    let mut tracker = tracker(local(38.0, 28.0));

    let fix = tracker
        .update_range_accepted(TransponderId(2), range(2, &vehicle), 10)
        .unwrap();
    assert!(fix.is_none(), "no range to T1 yet");

    // last transponder pairs with the first one
    let fix = tracker
        .update_range_accepted(TransponderId(0), range(0, &vehicle), 20)
        .unwrap()
        .unwrap();

    assert_eq!(fix.baseline, (TransponderId(2), TransponderId(0)));
    assert!(fix.position.horizontal_distance_m(&vehicle) < MAX_FIX_ERROR_M);
}

#[test]
fn inconsistent_range() {
    init_logger();

    let vehicle = local(40.0, 30.0);
    let mut tracker = tracker(local(38.0, 28.0));

    tracker
        .update_range_accepted(TransponderId(0), range(0, &vehicle), 10)
        .unwrap();

    let fix = tracker
        .update_range_accepted(TransponderId(1), range(1, &vehicle), 20)
        .unwrap()
        .unwrap();

    // both circles do not intersect
    let none = tracker
        .update_range_accepted(TransponderId(2), 500.0, 30)
        .unwrap();
    assert!(none.is_none());

    // continuity state untouched, but the range is stored
    assert_eq!(tracker.last_known_position(), fix.position);
    assert_eq!(tracker.last_known_timestamp_ms(), Some(20));
    assert_eq!(tracker.range_sample(TransponderId(2)).unwrap().last(), Some(500.0));
    assert_eq!(tracker.history().len(), 1);
}

#[test]
fn rejected_range() {
    init_logger();

    let vehicle = local(40.0, 30.0);
    let (r0, r1) = (range(0, &vehicle), range(1, &vehicle));
    let mut tracker = tracker(local(38.0, 28.0));

    // nothing stored yet
    let fix = tracker
        .update_range_rejected(TransponderId(1), 999.0, 5, "too far")
        .unwrap();
    assert!(fix.is_none());

    tracker.update_range_accepted(TransponderId(0), r0, 10).unwrap();
    tracker.update_range_accepted(TransponderId(1), r1, 20).unwrap();

    // slightly biased range: becomes the last one
    let biased = tracker
        .update_range_accepted(TransponderId(1), r1 + 0.5, 30)
        .unwrap()
        .unwrap();
    assert!(biased.position.horizontal_distance_m(&vehicle) > 0.1);

    let sample = tracker.range_sample(TransponderId(1)).unwrap();
    assert_eq!(sample.last(), Some(r1 + 0.5));
    assert_eq!(sample.previous(), Some(r1));

    // rejected range is dropped: fix is formed with the range preceding the last one
    let fix = tracker
        .update_range_rejected(TransponderId(1), 999.0, 40, "outlier")
        .unwrap()
        .unwrap();

    assert_eq!(fix.quality, FixQuality::Rejected);
    assert_eq!(fix.timestamp_ms, 40);
    assert_eq!(fix.baseline, (TransponderId(0), TransponderId(1)));
    assert!(fix.position.horizontal_distance_m(&vehicle) < MAX_FIX_ERROR_M);
    assert_eq!(tracker.last_known_position(), fix.position);

    // last range is invalidated
    let sample = tracker.range_sample(TransponderId(1)).unwrap();
    assert_eq!(sample.last(), None);
    assert_eq!(sample.previous(), Some(r1));

    // next transponder has nothing to pair with
    let fix = tracker
        .update_range_accepted(TransponderId(2), range(2, &vehicle), 50)
        .unwrap();
    assert!(fix.is_none());
    assert_eq!(tracker.last_known_timestamp_ms(), Some(40));
}

#[test]
fn observation_dispatch() {
    init_logger();

    let vehicle = local(40.0, 30.0);
    let mut tracker = tracker(local(38.0, 28.0));

    let observations = [
        RangeObservation::accepted(TransponderId(0), range(0, &vehicle), 10),
        RangeObservation::accepted(TransponderId(1), range(1, &vehicle), 20),
        RangeObservation::accepted(TransponderId(1), range(1, &vehicle), 30),
        RangeObservation::rejected(TransponderId(1), 0.0, 40, "no reply"),
    ];

    let fixes = observations
        .iter()
        .filter_map(|obs| tracker.update(obs).unwrap())
        .collect::<Vec<_>>();

    assert_eq!(fixes.len(), 3);
    assert_eq!(fixes[0].quality, FixQuality::Accepted);
    assert_eq!(fixes[1].quality, FixQuality::Accepted);
    assert_eq!(fixes[2].quality, FixQuality::Rejected);

    // empty reason stands for an accepted range
    let fix = tracker
        .update_range(TransponderId(2), range(2, &vehicle), 50, Some(""))
        .unwrap();
    assert!(fix.is_none(), "T1 last range was invalidated");
    assert_eq!(tracker.range_sample(TransponderId(2)).unwrap().last(), Some(range(2, &vehicle)));
}

#[test]
fn reset_is_idempotent() {
    init_logger();

    let start = local(38.0, 28.0);
    let vehicle = local(40.0, 30.0);
    let mut tracker = tracker(start);

    for (t, id) in [0, 1, 2, 0].into_iter().enumerate() {
        tracker
            .update_range_accepted(TransponderId(id), range(id, &vehicle), t as u64)
            .unwrap();
    }

    assert_eq!(tracker.history().len(), 3);

    let expected = TrackedFix {
        position: start,
        timestamp_ms: None,
    };

    for _ in 0..2 {
        tracker.reset().unwrap();

        assert_eq!(tracker.tracked_fix(), expected);
        assert!(tracker.history().is_empty());
        assert_eq!(tracker.start(), Some(start));
        assert_eq!(tracker.transponders(), triangle().as_slice());
        assert_eq!(tracker.frames().len(), 3);

        for id in 0..3 {
            let sample = tracker.range_sample(TransponderId(id)).unwrap();
            assert!(sample.last().is_none());
            assert!(sample.previous().is_none());
        }
    }
}

#[test]
fn reset_with_new_ring() {
    init_logger();

    let mut tracker = tracker(local(38.0, 28.0));
    tracker
        .update_range_accepted(TransponderId(0), 50.0, 10)
        .unwrap();

    let ring = vec![
        Transponder::new(0, local(0.0, 0.0)),
        Transponder::new(1, local(0.0, 200.0)),
    ];

    tracker.reset_with(ring.clone(), local(50.0, 50.0)).unwrap();

    assert_eq!(tracker.transponders(), ring.as_slice());
    assert_eq!(tracker.frames().len(), 2);
    assert_eq!(tracker.last_known_position(), local(50.0, 50.0));
    assert!(tracker.range_sample(TransponderId(0)).unwrap().last().is_none());
    assert!(tracker.range_sample(TransponderId(2)).is_none());
}

#[test]
fn uninitialized() {
    init_logger();

    let mut tracker = Tracker::default();
    assert!(!tracker.is_ready());
    assert!(tracker.transponders().is_empty());
    assert!(tracker.frames().is_empty());
    assert_eq!(tracker.start(), None);

    assert_eq!(
        tracker.update_range_accepted(TransponderId(0), 50.0, 0),
        Err(Error::Uninitialized)
    );
    assert_eq!(
        tracker.update_range_rejected(TransponderId(0), 50.0, 0, "outlier"),
        Err(Error::Uninitialized)
    );
    assert_eq!(tracker.reset(), Err(Error::Uninitialized));

    tracker.reset_with(triangle(), local(10.0, 10.0)).unwrap();
    assert!(tracker.is_ready());
}

#[test]
fn unknown_transponder() {
    init_logger();

    let mut tracker = tracker(local(38.0, 28.0));

    assert_eq!(
        tracker.update_range_accepted(TransponderId(3), 50.0, 0),
        Err(Error::UnknownTransponder(TransponderId(3)))
    );
    assert_eq!(
        tracker.update_range(TransponderId(7), 50.0, 0, Some("outlier")),
        Err(Error::UnknownTransponder(TransponderId(7)))
    );
    assert!(tracker.range_sample(TransponderId(3)).is_none());
}

#[test]
fn invalid_ring_leaves_tracker_untouched() {
    init_logger();

    let vehicle = local(40.0, 30.0);
    let mut tracker = tracker(local(38.0, 28.0));

    tracker.update_range_accepted(TransponderId(0), range(0, &vehicle), 10).unwrap();
    let fix = tracker
        .update_range_accepted(TransponderId(1), range(1, &vehicle), 20)
        .unwrap()
        .unwrap();

    let single = vec![Transponder::new(0, local(0.0, 0.0))];
    assert_eq!(
        tracker.reset_with(single, local(0.0, 0.0)),
        Err(Error::NotEnoughTransponders(1))
    );

    let misordered = vec![
        Transponder::new(1, local(0.0, 0.0)),
        Transponder::new(0, local(0.0, 100.0)),
    ];
    assert_eq!(
        tracker.reset_with(misordered, local(0.0, 0.0)),
        Err(Error::MisorderedTransponder {
            index: 0,
            id: TransponderId(1),
        })
    );

    assert_eq!(
        tracker.reset_with(vec![], local(0.0, 0.0)),
        Err(Error::NotEnoughTransponders(0))
    );

    assert_eq!(tracker.transponders(), triangle().as_slice());
    assert_eq!(tracker.last_known_position(), fix.position);
    assert_eq!(tracker.last_known_timestamp_ms(), Some(20));
    assert_eq!(
        tracker.range_sample(TransponderId(1)).unwrap().last(),
        Some(range(1, &vehicle))
    );
}

#[rstest]
#[case(-1.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn invalid_config(#[case] depth_m: f64) {
    let cfg = Config::default().with_vehicle_depth(depth_m);
    assert!(matches!(
        Tracker::with_config(cfg.clone()),
        Err(Error::InvalidConfiguration(_))
    ));
    assert!(matches!(
        Tracker::new(cfg, triangle(), local(0.0, 0.0)),
        Err(Error::InvalidConfiguration(_))
    ));
}

#[rstest]
#[case(30.0, 0.0)]
#[case(30.0, 10.0)]
#[case(20.0, 5.0)]
#[case(0.0, 0.0)]
fn moored_transponders(#[case] transponder_depth_m: f64, #[case] vehicle_depth_m: f64) {
    init_logger();

    let ring = triangle_at_depth(transponder_depth_m);
    let cfg = Config::default().with_vehicle_depth(vehicle_depth_m);

    // vehicle 30m east and 40m north of T0
    let vehicle = GeoPosition {
        depth_m: vehicle_depth_m,
        ..local(40.0, 30.0)
    };

    let start = GeoPosition {
        depth_m: vehicle_depth_m,
        ..local(38.0, 28.0)
    };

    let mut tracker = Tracker::new(cfg, ring.clone(), start).unwrap();

    // exact slant ranges
    let slant = |id: usize| ring[id].position.distance_m(&vehicle);
    assert!(slant(0) > 50.0 || transponder_depth_m == vehicle_depth_m);

    tracker
        .update_range_accepted(TransponderId(0), slant(0), 10)
        .unwrap();
    let fix = tracker
        .update_range_accepted(TransponderId(1), slant(1), 20)
        .unwrap()
        .unwrap();

    let err = fix.position.horizontal_distance_m(&vehicle);
    assert!(err < MAX_FIX_ERROR_M, "{}: error={:.6}m", fix, err);

    // reported in the vehicle plane
    assert!(
        (fix.position.depth_m - vehicle_depth_m).abs() < 1.0E-9,
        "fix depth={}",
        fix.position.depth_m
    );

    // every other baseline agrees
    for (t, id) in [(30, 2_usize), (40, 0)] {
        let fix = tracker
            .update_range_accepted(TransponderId(id as u16), slant(id), t)
            .unwrap()
            .unwrap();
        assert!(fix.position.horizontal_distance_m(&vehicle) < MAX_FIX_ERROR_M);
        assert!((fix.position.depth_m - vehicle_depth_m).abs() < 1.0E-9);
    }
}
