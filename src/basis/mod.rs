//! Basis-function sets keyed by angular-momentum quantum numbers.

pub mod cart;
