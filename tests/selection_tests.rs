use infill::prelude::*;

fn int_bounds_2d() -> Bounds {
    Bounds::new(vec![Bound::int("a", 0, 10), Bound::int("b", 0, 10)]).unwrap()
}

fn counting_acquisition(points: &[Vec<f64>]) -> Vec<f64> {
    // Distinct, recognizable utilities so re-evaluation is observable.
    points.iter().map(|p| p.iter().fold(100.0, |acc, &x| acc + x)).collect()
}

#[test]
fn test_single_cluster_pool_backfills_to_requested_size() {
    // Five restarts all converged to (3, 3) with varying utility: one
    // cluster survives, and backfill must synthesize two unique integer
    // neighbors to honor the batch size.
    let bounds = int_bounds_2d();
    let pool: Vec<LocalOptimum> = (0..5)
        .map(|i| LocalOptimum::new(vec![3.0, 3.0], 1.0 + f64::from(i)).with_convergence(0.01))
        .collect();

    let selector = Selector::builder()
        .batch_size(3)
        .min_cluster_utility(0.5)
        .seed(42)
        .build()
        .unwrap();

    let batch = selector
        .select(&pool, &[], &bounds, &counting_acquisition)
        .unwrap();

    assert_eq!(batch.len(), 3);

    // The lone representative keeps its coordinates, top utility, and flag.
    assert_eq!(batch[0].coords, vec![3.0, 3.0]);
    assert_eq!(batch[0].utility, 5.0);
    assert!(batch[0].is_optimum);

    for synthesized in &batch[1..] {
        assert!(!synthesized.is_optimum);
        assert_ne!(synthesized.coords, vec![3.0, 3.0]);
        for (&v, dim) in synthesized.coords.iter().zip(bounds.dims()) {
            assert!((dim.low..=dim.high).contains(&v), "out of bounds: {v}");
            assert_eq!(v, v.round(), "integer dimension drifted off grid: {v}");
        }
        // Utility was freshly computed by the acquisition evaluator, which
        // sees the coordinates scaled into the unit cube.
        assert_eq!(
            synthesized.utility,
            100.0 + synthesized.coords[0] / 10.0 + synthesized.coords[1] / 10.0
        );
    }
    assert_ne!(batch[1].coords, batch[2].coords);
}

#[test]
fn test_best_point_already_scored_gets_perturbed() {
    // No threshold: only the single best of ten points is selected, but its
    // exact coordinates are already in the history, so phase A must move it.
    let bounds = Bounds::new(vec![Bound::float("x", 0.0, 1.0), Bound::float("y", 0.0, 1.0)])
        .unwrap();
    let pool: Vec<LocalOptimum> = (0..10)
        .map(|i| {
            let t = f64::from(i) / 10.0;
            LocalOptimum::new(vec![t, 1.0 - t], f64::from(i))
        })
        .collect();
    let best = pool[9].coords.clone();
    let history = vec![vec![0.5, 0.5], best.clone()];

    let selector = Selector::builder().seed(7).build().unwrap();
    let batch = selector
        .select(&pool, &history, &bounds, &counting_acquisition)
        .unwrap();

    assert_eq!(batch.len(), 1);
    assert_ne!(batch[0].coords, best);
    assert!(!batch[0].is_optimum);
    for (&v, dim) in batch[0].coords.iter().zip(bounds.dims()) {
        assert!((dim.low..=dim.high).contains(&v));
    }
}

#[test]
fn test_best_point_not_in_history_is_returned_verbatim() {
    let bounds = Bounds::new(vec![Bound::float("x", 0.0, 1.0)]).unwrap();
    let pool = vec![
        LocalOptimum::new(vec![0.2], 1.0),
        LocalOptimum::new(vec![0.6], 9.0),
        LocalOptimum::new(vec![0.8], 4.0),
    ];
    let history = vec![vec![0.4]];

    let selector = Selector::builder().seed(5).build().unwrap();
    let batch = selector
        .select(&pool, &history, &bounds, &counting_acquisition)
        .unwrap();

    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].coords, vec![0.6]);
    assert_eq!(batch[0].utility, 9.0);
    assert!(batch[0].is_optimum);
}

#[test]
fn test_discrete_space_exhaustion_reports_backfill_diagnostic() {
    // A single binary dimension has two points total; asking for three
    // unique candidates must end the round with a diagnostic, not a batch.
    let bounds = Bounds::new(vec![Bound::int("bit", 0, 1)]).unwrap();
    let pool = vec![LocalOptimum::new(vec![0.0], 1.0)];

    let selector = Selector::builder()
        .batch_size(3)
        .noise_add(2.0)
        .seed(13)
        .build()
        .unwrap();

    let err = selector
        .select(&pool, &[], &bounds, &counting_acquisition)
        .unwrap_err();
    match err {
        Error::BackfillExhausted { tries, missing } => {
            assert_eq!(tries, 1000);
            assert_eq!(missing, 1);
        }
        other => panic!("expected BackfillExhausted, got {other:?}"),
    }
}

#[test]
fn test_history_dimension_mismatch_is_rejected() {
    let bounds = Bounds::new(vec![Bound::float("x", 0.0, 1.0)]).unwrap();
    let pool = vec![LocalOptimum::new(vec![0.5], 1.0)];
    let history = vec![vec![0.5, 0.5]];

    let selector = Selector::builder().seed(1).build().unwrap();
    let err = selector
        .select(&pool, &history, &bounds, &counting_acquisition)
        .unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { index: 0, .. }));
}

#[test]
fn test_diagnostics_render_as_readable_messages() {
    let message = Error::BackfillExhausted {
        tries: 1000,
        missing: 2,
    }
    .to_string();
    assert!(message.contains("2 additional unique candidates"));
    assert!(message.contains("1000"));

    let message = Error::DuplicatesExhausted { tries: 1000 }.to_string();
    assert!(message.contains("unique parameter combinations"));
}
