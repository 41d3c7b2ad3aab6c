//! Evaluation contexts for vertical recurrence invocations.

use std::cell::Cell;

use anyhow::{self, ensure, format_err};
use derive_builder::Builder;
use ndarray::Array1;

use crate::basis::cart::Axis;

#[cfg(test)]
#[path = "context_tests.rs"]
mod context_tests;

/// A structure to hold the pre-computed per-lane prefactors consumed by one
/// vertical recurrence invocation.
///
/// The caller populates the factors for the correct angular-momentum pair
/// before invoking a kernel. A kernel only ever reads the context; the one
/// exception is the optional floating-point-operation counter, which is
/// interior-mutable so that kernels can hold the context by shared reference.
/// Concurrent invocations sharing one context must therefore partition or
/// serialise flop counting themselves.
#[derive(Clone, Builder, Debug)]
pub struct VrrContext {
    /// The batch width: the number of independent integral sets evaluated
    /// simultaneously by each kernel invocation.
    veclen: usize,

    /// Per-axis $`P - A`$ geometric prefactors, one lane array of length
    /// [`Self::veclen`] per Cartesian axis.
    pa: [Array1<f64>; 3],

    /// Per-axis $`W - P`$ geometric prefactors, one lane array of length
    /// [`Self::veclen`] per Cartesian axis.
    wp: [Array1<f64>; 3],

    /// Per-lane $`1/(2\zeta)`$ exponent factors.
    oo2z: Array1<f64>,

    /// Per-lane $`\rho/\zeta`$ exponent factors.
    roz: Array1<f64>,

    /// Per-lane $`1/(2(\zeta + \eta))`$ exponent factors.
    oo2ze: Array1<f64>,

    /// Optional floating-point-operation counter, monotonically incremented by
    /// kernels when present. Disabled by default; see
    /// [`Self::with_flop_counting`].
    #[builder(setter(skip), default)]
    nflops: Option<Cell<u64>>,
}

impl VrrContext {
    /// Returns a builder to construct a new [`VrrContext`].
    fn builder() -> VrrContextBuilder {
        VrrContextBuilder::default()
    }

    /// Constructs a new [`VrrContext`] from its constituting lane arrays.
    ///
    /// # Arguments
    ///
    /// * `veclen` - The batch width.
    /// * `pa` - The per-axis $`P - A`$ lane arrays.
    /// * `wp` - The per-axis $`W - P`$ lane arrays.
    /// * `oo2z` - The $`1/(2\zeta)`$ lane array.
    /// * `roz` - The $`\rho/\zeta`$ lane array.
    /// * `oo2ze` - The $`1/(2(\zeta + \eta))`$ lane array.
    ///
    /// # Errors
    ///
    /// Errors if `veclen` is zero or if any lane array's length differs from
    /// `veclen`.
    pub fn new(
        veclen: usize,
        pa: [Array1<f64>; 3],
        wp: [Array1<f64>; 3],
        oo2z: Array1<f64>,
        roz: Array1<f64>,
        oo2ze: Array1<f64>,
    ) -> Result<Self, anyhow::Error> {
        let ctx = VrrContext::builder()
            .veclen(veclen)
            .pa(pa)
            .wp(wp)
            .oo2z(oo2z)
            .roz(roz)
            .oo2ze(oo2ze)
            .build()
            .map_err(|err| format_err!(err))?;
        ensure!(ctx.verify(), "Invalid `VrrContext`.");
        log::debug!(
            "Vertical recurrence context constructed with {} lane{}.",
            ctx.veclen,
            if ctx.veclen == 1 { "" } else { "s" }
        );
        Ok(ctx)
    }

    /// Verifies if this [`VrrContext`] struct is valid: a non-zero batch width
    /// and every lane array of that length.
    #[must_use]
    pub fn verify(&self) -> bool {
        self.veclen >= 1
            && self.pa.iter().all(|arr| arr.len() == self.veclen)
            && self.wp.iter().all(|arr| arr.len() == self.veclen)
            && self.oo2z.len() == self.veclen
            && self.roz.len() == self.veclen
            && self.oo2ze.len() == self.veclen
    }

    /// Enables floating-point-operation counting on this context, starting
    /// from zero.
    #[must_use]
    pub fn with_flop_counting(mut self) -> Self {
        self.nflops = Some(Cell::new(0));
        self
    }

    /// The batch width of this context.
    #[must_use]
    pub fn veclen(&self) -> usize {
        self.veclen
    }

    /// The $`P - A`$ lane array for the chosen build axis.
    #[must_use]
    pub fn pa(&self, axis: Axis) -> &Array1<f64> {
        &self.pa[axis.index()]
    }

    /// The $`W - P`$ lane array for the chosen build axis.
    #[must_use]
    pub fn wp(&self, axis: Axis) -> &Array1<f64> {
        &self.wp[axis.index()]
    }

    /// The $`1/(2\zeta)`$ lane array.
    #[must_use]
    pub fn oo2z(&self) -> &Array1<f64> {
        &self.oo2z
    }

    /// The $`\rho/\zeta`$ lane array.
    #[must_use]
    pub fn roz(&self) -> &Array1<f64> {
        &self.roz
    }

    /// The $`1/(2(\zeta + \eta))`$ lane array.
    #[must_use]
    pub fn oo2ze(&self) -> &Array1<f64> {
        &self.oo2ze
    }

    /// Adds `count` to the floating-point-operation counter if counting is
    /// enabled.
    pub fn count_flops(&self, count: u64) {
        if let Some(nflops) = self.nflops.as_ref() {
            nflops.set(nflops.get() + count);
        }
    }

    /// The accumulated floating-point-operation count, or `None` if counting
    /// is disabled.
    #[must_use]
    pub fn nflops(&self) -> Option<u64> {
        self.nflops.as_ref().map(Cell::get)
    }
}
