/// A single in-memory bank account: balance, overdraft, charges, interest
/// and lifecycle. Every operation is decided first and applied as an event
/// afterwards, so a rejected operation never leaves partial changes behind.
pub mod account;

/// Two-decimal rounding and rate helpers shared by all calculations.
pub mod money;

/// Stateless loan and investment formulas.
pub mod calculator;

/// Transaction format checks, limits and fraud heuristics.
pub mod validation;

/// Account commands parsed from raw operation rows, later executed by [`account`].
pub mod command;

/// Operation processor interface, plus an implementation over one account.
pub mod processor;

/// CSV input/output used by the binary. It lives in the library so the
/// integration tests can drive it too.
pub mod bin_utils;
