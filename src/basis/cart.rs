//! Cartesian Gaussian basis-function sets and their dense quantum-number keys.

use std::fmt;
use std::ops::{Add, Sub};

use itertools::Itertools;
use lazy_static::lazy_static;

#[cfg(test)]
#[path = "cart_tests.rs"]
mod cart_tests;

// ----
// Axis
// ----

/// Cartesian axes along which quantum numbers are incremented or decremented.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    /// All three axes in `x`, `y`, `z` order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the index of this axis into a `[T; 3]` quantum-number array.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

// ------------
// Capabilities
// ------------

/// Trait for sets of basis functions.
pub trait BasisFunctionSet {
    /// The number of basis functions in the set.
    fn size(&self) -> usize;

    /// A compact label for the set.
    fn label(&self) -> String;
}

/// Trait for sets of basis functions with incrementable/decrementable quantum
/// numbers.
///
/// A call to [`Self::dec`] may invalidate the set. An invalidated set keeps its
/// pre-call quantum numbers, but no further modification of its state is
/// possible, and invalidity persists through cloning.
pub trait IncrementableBasisSet: BasisFunctionSet {
    /// Adds `count` quanta along `axis`. Always succeeds on a valid set.
    fn inc(&mut self, axis: Axis, count: u32);

    /// Subtracts `count` quanta along `axis`. If impossible, the set is
    /// invalidated and its quantum numbers are left unchanged.
    fn dec(&mut self, axis: Axis, count: u32);

    /// Returns the sum of the quantum numbers of the set.
    fn norm(&self) -> u32;

    /// Returns `false` if a prior decrement underflowed.
    fn valid(&self) -> bool;

    /// Returns `true` iff this is the all-zero (s-type) set.
    fn zero(&self) -> bool {
        self.norm() == 0
    }
}

/// Constructs the set with one quantum along `axis`.
#[must_use]
pub fn unit<F: IncrementableBasisSet + Default>(axis: Axis) -> F {
    let mut set = F::default();
    set.inc(axis, 1);
    set
}

/// Returns `true` if `set` has not been invalidated by a decrement underflow.
#[must_use]
pub fn exists(set: &impl IncrementableBasisSet) -> bool {
    set.valid()
}

// -------------
// BasisDefaults
// -------------

/// Construction-time defaults for basis-function sets.
///
/// Created once at startup by the caller and threaded explicitly to
/// [`CartShell::with_defaults`] and [`CartFunction::with_defaults`] call sites;
/// there is no process-wide mutable default.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct BasisDefaults {
    /// Whether newly constructed sets describe contracted Gaussians.
    pub contracted: bool,
}

impl Default for BasisDefaults {
    fn default() -> Self {
        Self { contracted: false }
    }
}

// -----------
// Key offsets
// -----------

/// Spectroscopic letters of the angular momenta addressable by the key scheme,
/// `j` being skipped by convention.
static SHELL_LABELS: [&str; 20] = [
    "s", "p", "d", "f", "g", "h", "i", "k", "l", "m", "n", "o", "q", "r", "t", "u", "v", "w", "x",
    "y",
];

/// Number of Cartesian Gaussian functions with total angular momentum `l`.
#[must_use]
pub fn ncart(l: u32) -> usize {
    ((l + 1) * (l + 2) / 2) as usize
}

lazy_static! {
    /// `KEY_L_OFFSET[l]` is the number of Cartesian functions with angular
    /// momentum strictly less than `l`. Initialised once, immutable thereafter.
    static ref KEY_L_OFFSET: [u32; CartShell::MAX_KEY as usize + 2] = {
        let mut offsets = [0u32; CartShell::MAX_KEY as usize + 2];
        for l in 1..offsets.len() {
            offsets[l] = offsets[l - 1] + ncart((l - 1) as u32) as u32;
        }
        log::debug!(
            "Cartesian key offset table initialised up to l = {}.",
            CartShell::MAX_KEY
        );
        offsets
    };
}

// ---------
// CartShell
// ---------

/// The set of all Cartesian Gaussian functions sharing one total angular
/// momentum.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CartShell {
    /// The total angular momentum of the shell.
    l: u32,

    /// Whether this shell describes contracted Gaussians.
    contracted: bool,

    /// Cleared by a decrement underflow; see [`IncrementableBasisSet::dec`].
    valid: bool,
}

impl CartShell {
    /// The range of shell keys is `[0, MAX_KEY]`, bounding the address space of
    /// precomputed tables.
    pub const MAX_KEY: u32 = 19;

    /// Constructs a new shell of angular momentum `l`.
    ///
    /// Constructing a shell with `l > MAX_KEY` is a latent defect: the key
    /// scheme performs no per-call range checks.
    #[must_use]
    pub fn new(l: u32, contracted: bool) -> Self {
        debug_assert!(
            l <= Self::MAX_KEY,
            "Shell angular momentum {l} exceeds the key bound {}.",
            Self::MAX_KEY
        );
        Self {
            l,
            contracted,
            valid: true,
        }
    }

    /// Constructs a new shell of angular momentum `l` with the contraction flag
    /// taken from `defaults`.
    #[must_use]
    pub fn with_defaults(l: u32, defaults: &BasisDefaults) -> Self {
        Self::new(l, defaults.contracted)
    }

    /// Returns the total angular momentum of the shell.
    #[must_use]
    pub fn l(&self) -> u32 {
        self.l
    }

    /// Is this a shell of contracted Gaussians?
    #[must_use]
    pub fn contracted(&self) -> bool {
        self.contracted
    }

    /// Returns the canonical key of this shell: the angular momentum itself,
    /// in the range `[0, MAX_KEY]`.
    #[must_use]
    pub fn key(&self) -> u32 {
        self.l
    }

    /// Iterates over the constituent functions of this shell in canonical
    /// order: `lx` descending, then `ly` descending (equivalently `ly + lz`
    /// ascending, then `lz` ascending). [`CartFunction::index_in_shell`] is the
    /// position of a function in this iteration.
    pub fn functions(&self) -> impl Iterator<Item = CartFunction> {
        let l = self.l;
        let contracted = self.contracted;
        (0..=l).rev().flat_map(move |lx| {
            (0..=(l - lx))
                .rev()
                .map(move |ly| CartFunction::new([lx, ly, l - lx - ly], contracted))
        })
    }
}

impl Default for CartShell {
    /// The default shell is an s shell constructed with the default
    /// [`BasisDefaults`] policy.
    fn default() -> Self {
        Self::with_defaults(0, &BasisDefaults::default())
    }
}

impl BasisFunctionSet for CartShell {
    fn size(&self) -> usize {
        ncart(self.l)
    }

    fn label(&self) -> String {
        SHELL_LABELS
            .get(self.l as usize)
            .map(|l| (*l).to_string())
            .unwrap_or_else(|| self.l.to_string())
    }
}

impl IncrementableBasisSet for CartShell {
    fn inc(&mut self, _axis: Axis, count: u32) {
        if !self.valid {
            return;
        }
        self.l += count;
    }

    fn dec(&mut self, _axis: Axis, count: u32) {
        if !self.valid {
            return;
        }
        if count > self.l {
            self.valid = false;
        } else {
            self.l -= count;
        }
    }

    fn norm(&self) -> u32 {
        self.l
    }

    fn valid(&self) -> bool {
        self.valid
    }
}

impl Add for CartShell {
    type Output = CartShell;

    /// Returns the shell whose angular momentum is the sum of the operands'
    /// angular momenta, for shell-pair bookkeeping.
    fn add(self, rhs: CartShell) -> CartShell {
        CartShell {
            l: self.l + rhs.l,
            contracted: self.contracted || rhs.contracted,
            valid: self.valid && rhs.valid,
        }
    }
}

impl Sub for CartShell {
    type Output = CartShell;

    /// Returns the shell whose angular momentum is the difference of the
    /// operands' angular momenta. Underflow invalidates the result, leaving the
    /// left operand's angular momentum in place.
    fn sub(self, rhs: CartShell) -> CartShell {
        let mut res = CartShell {
            l: self.l,
            contracted: self.contracted || rhs.contracted,
            valid: self.valid && rhs.valid,
        };
        res.dec(Axis::Z, rhs.l);
        res
    }
}

impl fmt::Display for CartShell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Debug for CartShell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CartShell({}{}: {})",
            self.label(),
            if self.valid { "" } else { ", invalid" },
            self.functions().map(|g| g.label()).join(", ")
        )
    }
}

// ------------
// CartFunction
// ------------

/// One Cartesian Gaussian function: the trivial one-function set, carrying a
/// full quantum-number triple.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct CartFunction {
    /// The $`(l_x, l_y, l_z)`$ quantum numbers of the function.
    qns: [u32; 3],

    /// Whether this function describes a contracted Gaussian.
    contracted: bool,

    /// Cleared by a decrement underflow; see [`IncrementableBasisSet::dec`].
    valid: bool,
}

impl CartFunction {
    /// The range of function keys is `[0, MAX_KEY)`: the number of Cartesian
    /// functions with total angular momentum not exceeding
    /// [`CartShell::MAX_KEY`].
    pub const MAX_KEY: u32 = (CartShell::MAX_KEY + 1) * (CartShell::MAX_KEY + 2)
        * (CartShell::MAX_KEY + 3)
        / 6;

    /// Constructs a new function from its quantum-number triple.
    ///
    /// Constructing a function with total angular momentum above
    /// [`CartShell::MAX_KEY`] is a latent defect: the key scheme performs no
    /// per-call range checks.
    #[must_use]
    pub fn new(qns: [u32; 3], contracted: bool) -> Self {
        debug_assert!(
            qns.iter().sum::<u32>() <= CartShell::MAX_KEY,
            "Function angular momentum {} exceeds the key bound {}.",
            qns.iter().sum::<u32>(),
            CartShell::MAX_KEY
        );
        Self {
            qns,
            contracted,
            valid: true,
        }
    }

    /// Constructs a new function with the contraction flag taken from
    /// `defaults`.
    #[must_use]
    pub fn with_defaults(qns: [u32; 3], defaults: &BasisDefaults) -> Self {
        Self::new(qns, defaults.contracted)
    }

    /// Returns the quantum number along `axis`.
    #[must_use]
    pub fn qn(&self, axis: Axis) -> u32 {
        self.qns[axis.index()]
    }

    /// Returns the quantum-number triple.
    #[must_use]
    pub fn qns(&self) -> [u32; 3] {
        self.qns
    }

    /// Is this a contracted Gaussian?
    #[must_use]
    pub fn contracted(&self) -> bool {
        self.contracted
    }

    /// Returns the position of this function within its shell's canonical
    /// ordering: `nyz (nyz + 1) / 2 + lz` with `nyz = ly + lz`.
    #[must_use]
    pub fn index_in_shell(&self) -> usize {
        let nyz = self.qns[1] + self.qns[2];
        (nyz * (nyz + 1) / 2 + self.qns[2]) as usize
    }

    /// Returns the canonical key of this function: its within-shell index plus
    /// the number of all functions of strictly lower angular momentum. Keys
    /// form the dense range `[0, MAX_KEY)`, functions of a common angular
    /// momentum occupying a contiguous sub-range.
    #[must_use]
    pub fn key(&self) -> u32 {
        self.index_in_shell() as u32 + KEY_L_OFFSET[self.norm() as usize]
    }
}

impl Default for CartFunction {
    /// The default function is an s-type Gaussian constructed with the default
    /// [`BasisDefaults`] policy.
    fn default() -> Self {
        Self::with_defaults([0, 0, 0], &BasisDefaults::default())
    }
}

impl BasisFunctionSet for CartFunction {
    fn size(&self) -> usize {
        1
    }

    /// The flat exponent string of the function, *e.g.* `xxy`, or `1` for the
    /// s function.
    fn label(&self) -> String {
        if self.zero() {
            "1".to_string()
        } else {
            let carts = ["x", "y", "z"];
            Itertools::intersperse(
                self.qns
                    .iter()
                    .enumerate()
                    .map(|(i, &l)| carts[i].repeat(l as usize)),
                String::new(),
            )
            .collect::<String>()
        }
    }
}

impl IncrementableBasisSet for CartFunction {
    fn inc(&mut self, axis: Axis, count: u32) {
        if !self.valid {
            return;
        }
        self.qns[axis.index()] += count;
    }

    fn dec(&mut self, axis: Axis, count: u32) {
        if !self.valid {
            return;
        }
        let qn = &mut self.qns[axis.index()];
        if count > *qn {
            self.valid = false;
        } else {
            *qn -= count;
        }
    }

    fn norm(&self) -> u32 {
        self.qns.iter().sum()
    }

    fn valid(&self) -> bool {
        self.valid
    }
}

impl Add for CartFunction {
    type Output = CartFunction;

    /// Combines the operands' quantum-number triples component-wise.
    fn add(self, rhs: CartFunction) -> CartFunction {
        CartFunction {
            qns: [
                self.qns[0] + rhs.qns[0],
                self.qns[1] + rhs.qns[1],
                self.qns[2] + rhs.qns[2],
            ],
            contracted: self.contracted || rhs.contracted,
            valid: self.valid && rhs.valid,
        }
    }
}

impl Sub for CartFunction {
    type Output = CartFunction;

    /// Subtracts the operands' quantum-number triples component-wise via the
    /// invalidating decrement: underflow along any axis invalidates the result.
    fn sub(self, rhs: CartFunction) -> CartFunction {
        let mut res = CartFunction {
            qns: self.qns,
            contracted: self.contracted || rhs.contracted,
            valid: self.valid && rhs.valid,
        };
        for axis in Axis::ALL {
            res.dec(axis, rhs.qn(axis));
        }
        res
    }
}

impl fmt::Display for CartFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ------------
// CartBasisSet
// ------------

/// The closed set of basis-function-set kinds used by the vertical recurrence
/// family, dispatched by pattern matching.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum CartBasisSet {
    /// A full shell of one total angular momentum.
    Shell(CartShell),

    /// A single Cartesian function.
    Function(CartFunction),
}

impl From<CartShell> for CartBasisSet {
    fn from(shell: CartShell) -> Self {
        CartBasisSet::Shell(shell)
    }
}

impl From<CartFunction> for CartBasisSet {
    fn from(function: CartFunction) -> Self {
        CartBasisSet::Function(function)
    }
}

impl BasisFunctionSet for CartBasisSet {
    fn size(&self) -> usize {
        match self {
            CartBasisSet::Shell(shell) => shell.size(),
            CartBasisSet::Function(function) => function.size(),
        }
    }

    fn label(&self) -> String {
        match self {
            CartBasisSet::Shell(shell) => shell.label(),
            CartBasisSet::Function(function) => function.label(),
        }
    }
}

impl IncrementableBasisSet for CartBasisSet {
    fn inc(&mut self, axis: Axis, count: u32) {
        match self {
            CartBasisSet::Shell(shell) => shell.inc(axis, count),
            CartBasisSet::Function(function) => function.inc(axis, count),
        }
    }

    fn dec(&mut self, axis: Axis, count: u32) {
        match self {
            CartBasisSet::Shell(shell) => shell.dec(axis, count),
            CartBasisSet::Function(function) => function.dec(axis, count),
        }
    }

    fn norm(&self) -> u32 {
        match self {
            CartBasisSet::Shell(shell) => shell.norm(),
            CartBasisSet::Function(function) => function.norm(),
        }
    }

    fn valid(&self) -> bool {
        match self {
            CartBasisSet::Shell(shell) => shell.valid(),
            CartBasisSet::Function(function) => function.valid(),
        }
    }
}
