//! Evaluation guarantees checked through the public API with instrumented matchers.

use matchbook_test::prelude::*;
use std::sync::Arc;
use std::thread;

#[test]
fn all_of_stops_at_first_failure() {
    let first = Probe::new(equal_to("a"));
    let second = Probe::new(equal_to("b"));
    let matcher = all_of(vec![first.clone().boxed(), second.clone().boxed()]).unwrap();

    let err = check_that("", &Value::from("z"), &matcher).unwrap_err();
    assert_eq!(err.message(), "\nExpected: (\"a\" and \"b\")\n     but: \"a\" was \"z\"");

    assert_eq!(second.evaluations(), 0);
    assert_eq!(second.mismatches(), 0);
    assert_eq!(first.mismatches(), 1);
}

#[test]
fn any_of_stops_at_first_success() {
    let first = Probe::new(anything());
    let second = Probe::new(anything());
    let matcher = any_of(vec![first.clone().boxed(), second.clone().boxed()]).unwrap();

    assert!(matcher.matches(&Value::Null));
    assert_eq!(first.evaluations(), 1);
    assert_eq!(second.evaluations(), 0);
}

#[test]
fn in_order_stops_at_first_failing_item() {
    let first = Probe::new(equal_to(1));
    let second = Probe::new(equal_to(2));
    let matcher = contains(vec![first.clone().boxed(), second.clone().boxed()]).unwrap();

    assert!(!matcher.matches(&Value::from([9, 2])));
    assert_eq!(first.evaluations(), 1);
    assert_eq!(second.evaluations(), 0);
}

#[test]
fn any_order_evaluates_each_pair_at_most_once_per_call() {
    let probes: Vec<Probe> = (0..3).map(|_| Probe::new(anything())).collect();
    let matcher =
        contains_in_any_order(probes.iter().map(|p| p.clone().boxed())).unwrap();

    assert!(matcher.matches(&Value::from([1, 2, 3])));
    for probe in &probes {
        assert!(probe.evaluations() <= 3, "{}", probe.evaluations());
    }
}

#[test]
fn any_order_only_evaluates_pairs_it_visits() {
    let n = 200;
    let probes: Vec<Probe> = (0..n).map(|i| Probe::new(equal_to(i))).collect();
    let matcher =
        contains_in_any_order(probes.iter().map(|p| p.clone().boxed())).unwrap();

    assert!(matcher.matches(&Value::from((0..n).collect::<Vec<i32>>())));
    let total: usize = probes.iter().map(Probe::evaluations).sum();
    assert_eq!(total, (n * (n + 1) / 2) as usize);
}

#[test]
fn repeated_evaluation_is_stable() {
    let matcher = contains_parallel_runs_of(
        2,
        vec![equal_to("open").boxed(), equal_to("close").boxed()],
    )
    .unwrap();
    let hit = Value::from(["open", "open", "close", "close"]);
    let miss = Value::from(["open", "close"]);
    for _ in 0..5 {
        assert!(matcher.matches(&hit));
        assert!(!matcher.matches(&miss));
    }
}

#[test]
fn matchers_are_shared_across_threads() {
    let matcher: Arc<dyn Matcher> = Arc::new(
        contains_in_any_order(vec![
            starts_with("a").boxed(),
            equal_to("ab").boxed(),
        ])
        .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let matcher = Arc::clone(&matcher);
            thread::spawn(move || {
                let items = if i % 2 == 0 { ["ab", "ac"] } else { ["ac", "ab"] };
                (0..100).all(|_| matcher.matches(&Value::from(items)))
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn custom_values_flow_through_collections() {
    let matcher = contains_in_relative_order(vec![
        equal_to(Point::new(0, 0)).boxed(),
        equal_to(Point::new(1, 1)).boxed(),
    ])
    .unwrap();
    let path = Value::from(vec![Point::new(0, 0), Point::new(5, 5), Point::new(1, 1)]);
    assert!(matcher.matches(&path));

    let reversed = Value::from(vec![Point::new(1, 1), Point::new(0, 0)]);
    let err = check_that("path", &reversed, &matcher).unwrap_err();
    assert_eq!(
        err.message(),
        "path\nExpected: iterable containing [<(0, 0)>, <(1, 1)>] in relative order\n     but: <(1, 1)> was not found after <(0, 0)>"
    );
}

#[test]
fn unprintable_values_still_render_a_failure() {
    let err = check_that("", &Value::custom(Unprintable), &equal_to(1)).unwrap_err();
    assert!(err.message().starts_with("\nExpected: <1>\n     but: was unprintable@"));
}

#[test]
fn feature_reads_custom_fields() {
    let x = feature(
        "x",
        "a point with x",
        |v: &Value| v.as_custom::<Point>().map(|p| Value::from(p.x)),
        equal_to(3),
    );
    assert!(x.matches(&Point::new(3, 9).into()));

    let err = check_that("", &Point::new(4, 9).into(), &x).unwrap_err();
    assert_eq!(err.message(), "\nExpected: a point with x <3>\n     but: x was <4>");
}
