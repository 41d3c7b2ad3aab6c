//! # osvrr: Two-Centre Gaussian Integral Blocks by Vertical Recurrence
//!
//! `osvrr` computes blocks of two-centre Gaussian-type molecular integrals via
//! closed-form vertical recurrence relations over angular-momentum quantum
//! numbers, with the following capabilities:
//! - a canonical, collision-free, dense indexing scheme for Cartesian
//!   Gaussian basis-function sets keyed by their quantum numbers, so that
//!   intermediate results can be addressed by direct array offsets rather
//!   than by hashing or searching,
//! - value types for Cartesian Gaussian shells and functions with
//!   increment/decrement operations and an invalidate-in-place underflow
//!   protocol suited to hot recursion paths, and
//! - a vectorised vertical recurrence kernel that builds the integral block
//!   for one angular-momentum pair from five previously computed blocks at
//!   lower angular momentum.
//!
//! The code-generation front end that emits kernel specialisations,
//! horizontal recurrences, electron-repulsion-specific recursions,
//! contraction and normalisation of primitives, molecular geometry setup,
//! shell-pair list construction, and all I/O live outside this crate: callers
//! populate a [`integrals::context::VrrContext`] with the geometric and
//! exponential prefactors for one recursion invocation and consume the
//! produced blocks.
//!
//! ## Usage
//!
//! ```
//! use ndarray::Array1;
//! use osvrr::basis::cart::{ncart, BasisFunctionSet, CartShell};
//! use osvrr::integrals::context::VrrContext;
//! use osvrr::integrals::vrr::vrr_xs_xs;
//!
//! let lane = |x: f64| Array1::from_elem(1, x);
//! let ctx = VrrContext::new(
//!     1,
//!     [lane(1.0), lane(1.0), lane(1.0)],
//!     [lane(0.0), lane(0.0), lane(0.0)],
//!     lane(0.5),
//!     lane(0.0),
//!     lane(0.5),
//! )?;
//!
//! // (d.|p.) block from its five source blocks (here filled with constants).
//! let src0 = vec![1.0; ncart(1) * ncart(1)];
//! let src1 = vec![2.0; ncart(1) * ncart(1)];
//! let src2 = vec![3.0; ncart(0) * ncart(1)];
//! let src3 = vec![4.0; ncart(0) * ncart(1)];
//! let src4 = vec![5.0; ncart(1) * ncart(0)];
//! let mut target = vec![0.0; CartShell::new(2, false).size() * ncart(1)];
//! vrr_xs_xs(&ctx, 2, 1, &mut target, &src0, &src1, &src2, &src3, &src4);
//! assert_eq!(target[0], 5.0);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Kernel invocations are single-threaded and synchronous; the batch ("vector
//! lane") dimension amortises call overhead across simultaneous evaluations
//! and is iterated in straight lines, not dispatched to tasks.

pub mod basis;
pub mod integrals;
