use ndarray::{array, Array1};

use crate::basis::cart::Axis;
use crate::integrals::context::VrrContext;

fn two_lane_context() -> VrrContext {
    VrrContext::new(
        2,
        [array![1.0, 2.0], array![3.0, 4.0], array![5.0, 6.0]],
        [array![0.1, 0.2], array![0.3, 0.4], array![0.5, 0.6]],
        array![0.5, 0.25],
        array![0.0, 1.0],
        array![0.5, 0.5],
    )
    .expect("Unable to construct a two-lane `VrrContext`.")
}

#[test]
fn test_vrr_context_accessors() {
    let ctx = two_lane_context();
    assert!(ctx.verify());
    assert_eq!(ctx.veclen(), 2);
    assert_eq!(ctx.pa(Axis::X), &array![1.0, 2.0]);
    assert_eq!(ctx.pa(Axis::Y), &array![3.0, 4.0]);
    assert_eq!(ctx.pa(Axis::Z), &array![5.0, 6.0]);
    assert_eq!(ctx.wp(Axis::Z), &array![0.5, 0.6]);
    assert_eq!(ctx.oo2z(), &array![0.5, 0.25]);
    assert_eq!(ctx.roz(), &array![0.0, 1.0]);
    assert_eq!(ctx.oo2ze(), &array![0.5, 0.5]);
}

#[test]
fn test_vrr_context_rejects_mismatched_lanes() {
    let lane = |x: f64| Array1::from_elem(2, x);
    assert!(VrrContext::new(
        2,
        [lane(1.0), lane(1.0), Array1::from_elem(3, 1.0)],
        [lane(0.0), lane(0.0), lane(0.0)],
        lane(0.5),
        lane(0.0),
        lane(0.5),
    )
    .is_err());

    assert!(VrrContext::new(
        2,
        [lane(1.0), lane(1.0), lane(1.0)],
        [lane(0.0), lane(0.0), lane(0.0)],
        Array1::from_elem(1, 0.5),
        lane(0.0),
        lane(0.5),
    )
    .is_err());
}

#[test]
fn test_vrr_context_rejects_zero_width() {
    let empty = || Array1::<f64>::zeros(0);
    assert!(VrrContext::new(
        0,
        [empty(), empty(), empty()],
        [empty(), empty(), empty()],
        empty(),
        empty(),
        empty(),
    )
    .is_err());
}

#[test]
fn test_vrr_context_flop_counter() {
    let ctx = two_lane_context();
    assert_eq!(ctx.nflops(), None);
    // Counting requests on a disabled counter are ignored.
    ctx.count_flops(8);
    assert_eq!(ctx.nflops(), None);

    let ctx = ctx.with_flop_counting();
    assert_eq!(ctx.nflops(), Some(0));
    ctx.count_flops(8);
    ctx.count_flops(3);
    assert_eq!(ctx.nflops(), Some(11));
}
