//! Vertical recurrence kernels building two-centre integral blocks.

use crate::basis::cart::{exists, ncart, Axis, CartFunction, CartShell, IncrementableBasisSet};
use crate::integrals::context::VrrContext;

#[cfg(test)]
#[path = "vrr_tests.rs"]
mod vrr_tests;

/// Chooses the axis along which a target function is decremented to reach its
/// source functions: x takes precedence over y, which takes precedence over z.
/// The rule is fixed so that every function is produced by exactly one
/// recursion path.
fn build_axis(a: &CartFunction) -> Axis {
    if a.qn(Axis::X) != 0 {
        Axis::X
    } else if a.qn(Axis::Y) != 0 {
        Axis::Y
    } else {
        Axis::Z
    }
}

/// Builds the block of two-centre integrals with angular momentum `la` on the
/// first centre and `lc` on the second centre from five source blocks at lower
/// angular momentum, for every Cartesian function pair and every lane of the
/// batch.
///
/// With `m` the auxiliary order of the target block, the source blocks are:
/// * `src0` - the $`(a-1, c)`$ block at order $`m`$;
/// * `src1` - the $`(a-1, c)`$ block at order $`m+1`$;
/// * `src2` - the $`(a-2, c)`$ block at order $`m`$;
/// * `src3` - the $`(a-2, c)`$ block at order $`m+1`$;
/// * `src4` - the $`(a-1, c-1)`$ block at order $`m+1`$.
///
/// Every block is a flat buffer in function-major, lane-minor order: the
/// element for function pair index `i` and lane `v` sits at `i * veclen + v`,
/// with the pair index running over the first-centre functions as the major
/// axis. The target must not alias any source.
///
/// Per lane, per target pair $`(a, c)`$ with build axis $`i`$:
///
/// ```text
/// target(a,c)  = PA_i·src0(a-1,c) + WP_i·src1(a-1,c)
///              + (a-1)_i·oo2z·(src2(a-2,c) - roz·src3(a-2,c))    [if (a-1)_i > 0]
/// target(a,c) += Σ_{c': c'+1_i = c} c_i·oo2ze·src4(a-1,c')
/// ```
///
/// # Panics
///
/// Panics if `la < 2` or `lc < 1`: this specialisation covers (d.|p.) and
/// higher, and invoking it outside that domain is a dispatch defect, never a
/// property of runtime data.
#[allow(clippy::too_many_arguments)]
pub fn vrr_xs_xs(
    ctx: &VrrContext,
    la: u32,
    lc: u32,
    target: &mut [f64],
    src0: &[f64],
    src1: &[f64],
    src2: &[f64],
    src3: &[f64],
    src4: &[f64],
) {
    assert!(
        la >= 2 && lc >= 1,
        "Vertical recurrence invoked outside its angular-momentum domain: la = {la}, lc = {lc}."
    );

    let veclen = ctx.veclen();
    let nc = ncart(lc);
    let ncv = nc * veclen;
    let ncm1 = ncart(lc - 1);

    debug_assert_eq!(target.len(), ncart(la) * ncv);
    debug_assert_eq!(src0.len(), ncart(la - 1) * ncv);
    debug_assert_eq!(src1.len(), ncart(la - 1) * ncv);
    debug_assert_eq!(src2.len(), ncart(la - 2) * ncv);
    debug_assert_eq!(src3.len(), ncart(la - 2) * ncv);
    debug_assert_eq!(src4.len(), ncart(la - 1) * ncm1 * veclen);

    let oo2z = ctx.oo2z();
    let roz = ctx.roz();
    let oo2ze = ctx.oo2ze();

    let mut tgt_base = 0;
    for a in CartShell::new(la, false).functions() {
        let axis = build_axis(&a);
        let pa = ctx.pa(axis);
        let wp = ctx.wp(axis);

        let mut am1 = a.clone();
        am1.dec(axis, 1);
        debug_assert!(am1.valid());
        let am1c_base = am1.index_in_shell() * ncv;

        // Speculative second decrement: the second-order term exists only if
        // the build-axis component survives it.
        let mut am2 = am1.clone();
        am2.dec(axis, 1);
        if exists(&am2) {
            let am2c_base = am2.index_in_shell() * ncv;
            let a_axis = f64::from(am1.qn(axis));
            let mut cv = 0;
            for _c in 0..nc {
                for v in 0..veclen {
                    target[tgt_base + cv] = pa[v] * src0[am1c_base + cv]
                        + wp[v] * src1[am1c_base + cv]
                        + a_axis * oo2z[v] * (src2[am2c_base + cv] - roz[v] * src3[am2c_base + cv]);
                    cv += 1;
                }
            }
            ctx.count_flops(8 * ncv as u64);
        } else {
            let mut cv = 0;
            for _c in 0..nc {
                for v in 0..veclen {
                    target[tgt_base + cv] =
                        pa[v] * src0[am1c_base + cv] + wp[v] * src1[am1c_base + cv];
                    cv += 1;
                }
            }
            ctx.count_flops(3 * ncv as u64);
        }

        // Cross term: every function of the lower second-centre shell
        // contributes to the target function reached by incrementing it along
        // the build axis.
        let src4_base = am1.index_in_shell() * ncm1 * veclen;
        for (icm1, cm1) in CartShell::new(lc - 1, false).functions().enumerate() {
            let mut c = cm1;
            c.inc(axis, 1);
            let c_axis = f64::from(c.qn(axis));
            let tgt_c = tgt_base + c.index_in_shell() * veclen;
            let s4 = src4_base + icm1 * veclen;
            for v in 0..veclen {
                target[tgt_c + v] += c_axis * oo2ze[v] * src4[s4 + v];
            }
            ctx.count_flops(3 * veclen as u64);
        }

        tgt_base += ncv;
    }
}
