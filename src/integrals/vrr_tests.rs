use approx::assert_relative_eq;
use ndarray::Array1;

use crate::basis::cart::ncart;
use crate::integrals::context::VrrContext;
use crate::integrals::vrr::vrr_xs_xs;

/// A single-lane context with `PA = 1`, `WP = 0`, `oo2z = 1/2`, `roz = 0` and
/// `oo2ze = 1/2` on every axis, so that target values can be checked against
/// hand-computed recurrence sums.
fn unit_context() -> VrrContext {
    let lane = |x: f64| Array1::from_elem(1, x);
    VrrContext::new(
        1,
        [lane(1.0), lane(1.0), lane(1.0)],
        [lane(0.0), lane(0.0), lane(0.0)],
        lane(0.5),
        lane(0.0),
        lane(0.5),
    )
    .expect("Unable to construct a single-lane `VrrContext`.")
}

/// Source blocks for an `(la, lc)` target filled with the constants 1 through
/// 5 in block order.
fn constant_sources(
    la: u32,
    lc: u32,
    veclen: usize,
) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
    (
        vec![1.0; ncart(la - 1) * ncart(lc) * veclen],
        vec![2.0; ncart(la - 1) * ncart(lc) * veclen],
        vec![3.0; ncart(la - 2) * ncart(lc) * veclen],
        vec![4.0; ncart(la - 2) * ncart(lc) * veclen],
        vec![5.0; ncart(la - 1) * ncart(lc - 1) * veclen],
    )
}

#[test]
fn test_vrr_ds_ps_block() {
    let ctx = unit_context();
    let (src0, src1, src2, src3, src4) = constant_sources(2, 1, 1);
    let mut target = vec![0.0; ncart(2) * ncart(1)];
    vrr_xs_xs(&ctx, 2, 1, &mut target, &src0, &src1, &src2, &src3, &src4);

    // For a = (2,0,0), c = (1,0,0) the three recurrence terms are
    //   PA·src0 + WP·src1          = 1·1 + 0·2       = 1.0,
    //   a_x·oo2z·(src2 - roz·src3) = 1·0.5·(3 - 0·4) = 1.5,
    //   c_x·oo2ze·src4             = 1·0.5·5         = 2.5.
    assert_relative_eq!(target[0], 5.0);

    // Rows follow the canonical d-shell order (xx, xy, xz, yy, yz, zz) with
    // p-shell columns (x, y, z).
    let expected = [
        [5.0, 2.5, 2.5],
        [3.5, 1.0, 1.0],
        [3.5, 1.0, 1.0],
        [2.5, 5.0, 2.5],
        [1.0, 3.5, 1.0],
        [2.5, 2.5, 5.0],
    ];
    for (ia, row) in expected.iter().enumerate() {
        for (ic, value) in row.iter().enumerate() {
            assert_relative_eq!(target[ia * 3 + ic], *value);
        }
    }
}

#[test]
fn test_vrr_second_order_term_omitted() {
    // For a = (1,1,0) the build axis is x, but (a-1)_x = 0: the second-order
    // term must be skipped entirely, leaving the plain two-term value 1.0 in
    // the columns the cross term does not touch.
    let ctx = unit_context();
    let (src0, src1, src2, src3, src4) = constant_sources(2, 1, 1);
    let mut target = vec![0.0; ncart(2) * ncart(1)];
    vrr_xs_xs(&ctx, 2, 1, &mut target, &src0, &src1, &src2, &src3, &src4);

    // a = (1,1,0) is row 1; columns y and z receive no cross contribution.
    assert_relative_eq!(target[3 + 1], 1.0);
    assert_relative_eq!(target[3 + 2], 1.0);
    // Column x receives the cross term on top of the two-term value.
    assert_relative_eq!(target[3], 3.5);
}

#[test]
fn test_vrr_fs_ps_block() {
    let ctx = unit_context();
    let (src0, src1, src2, src3, src4) = constant_sources(3, 1, 1);
    let mut target = vec![0.0; ncart(3) * ncart(1)];
    vrr_xs_xs(&ctx, 3, 1, &mut target, &src0, &src1, &src2, &src3, &src4);

    // Rows follow the canonical f-shell order; (a-1)_axis now reaches 2, so
    // the second-order term carries a factor of two for xxx, yyy and zzz.
    let expected = [
        [6.5, 4.0, 4.0], // xxx
        [5.0, 2.5, 2.5], // xxy
        [5.0, 2.5, 2.5], // xxz
        [3.5, 1.0, 1.0], // xyy
        [3.5, 1.0, 1.0], // xyz
        [3.5, 1.0, 1.0], // xzz
        [4.0, 6.5, 4.0], // yyy
        [2.5, 5.0, 2.5], // yyz
        [1.0, 3.5, 1.0], // yzz
        [4.0, 4.0, 6.5], // zzz
    ];
    for (ia, row) in expected.iter().enumerate() {
        for (ic, value) in row.iter().enumerate() {
            assert_relative_eq!(target[ia * 3 + ic], *value);
        }
    }
}

#[test]
fn test_vrr_ds_ds_cross_term_fan_out() {
    // With lc = 2 the cross term fans one (a-1, c-1) row out over three target
    // columns, weighted by the incremented build-axis component.
    let ctx = unit_context();
    let (src0, src1, src2, src3, src4) = constant_sources(2, 2, 1);
    let mut target = vec![0.0; ncart(2) * ncart(2)];
    vrr_xs_xs(&ctx, 2, 2, &mut target, &src0, &src1, &src2, &src3, &src4);

    // a = (2,0,0), build axis x: columns xx, xy and xz pick up cross
    // contributions weighted by c_x = 2, 1 and 1 on top of the three-term
    // value 2.5.
    let xx_row = &target[0..6];
    assert_relative_eq!(xx_row[0], 7.5);
    assert_relative_eq!(xx_row[1], 5.0);
    assert_relative_eq!(xx_row[2], 5.0);
    assert_relative_eq!(xx_row[3], 2.5);
    assert_relative_eq!(xx_row[4], 2.5);
    assert_relative_eq!(xx_row[5], 2.5);

    // a = (0,2,0), build axis y: columns xy, yy and yz pick up c_y = 1, 2 and
    // 1 cross contributions.
    let yy_row = &target[3 * 6..4 * 6];
    assert_relative_eq!(yy_row[0], 2.5);
    assert_relative_eq!(yy_row[1], 5.0);
    assert_relative_eq!(yy_row[2], 2.5);
    assert_relative_eq!(yy_row[3], 7.5);
    assert_relative_eq!(yy_row[4], 5.0);
    assert_relative_eq!(yy_row[5], 2.5);
}

#[test]
fn test_vrr_idempotent() {
    let ctx = unit_context();
    let (src0, src1, src2, src3, src4) = constant_sources(2, 1, 1);
    let mut target_a = vec![0.0; ncart(2) * ncart(1)];
    let mut target_b = vec![f64::NAN; ncart(2) * ncart(1)];
    vrr_xs_xs(&ctx, 2, 1, &mut target_a, &src0, &src1, &src2, &src3, &src4);
    vrr_xs_xs(&ctx, 2, 1, &mut target_b, &src0, &src1, &src2, &src3, &src4);
    for (a, b) in target_a.iter().zip(target_b.iter()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn test_vrr_flop_count() {
    let (src0, src1, src2, src3, src4) = constant_sources(2, 1, 1);

    let ctx = unit_context();
    let mut target = vec![0.0; ncart(2) * ncart(1)];
    vrr_xs_xs(&ctx, 2, 1, &mut target, &src0, &src1, &src2, &src3, &src4);
    assert_eq!(ctx.nflops(), None);

    // Three three-term rows at 8·Nc·veclen, three two-term rows at
    // 3·Nc·veclen, and one cross contribution of 3·veclen per target row.
    let ctx = unit_context().with_flop_counting();
    vrr_xs_xs(&ctx, 2, 1, &mut target, &src0, &src1, &src2, &src3, &src4);
    assert_eq!(ctx.nflops(), Some(3 * 24 + 3 * 9 + 6 * 3));
}

#[test]
#[should_panic(expected = "outside its angular-momentum domain")]
fn test_vrr_rejects_low_first_centre() {
    let ctx = unit_context();
    let (src0, src1, src2, src3, src4) = constant_sources(2, 1, 1);
    let mut target = vec![0.0; ncart(1) * ncart(1)];
    vrr_xs_xs(&ctx, 1, 1, &mut target, &src0, &src1, &src2, &src3, &src4);
}

#[test]
#[should_panic(expected = "outside its angular-momentum domain")]
fn test_vrr_rejects_low_second_centre() {
    let ctx = unit_context();
    let (src0, src1, src2, src3, src4) = constant_sources(2, 1, 1);
    let mut target = vec![0.0; ncart(2)];
    vrr_xs_xs(&ctx, 2, 0, &mut target, &src0, &src1, &src2, &src3, &src4);
}
