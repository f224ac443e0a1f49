//! Domain Layer - Market, portfolio and catalog types.
//!
//! Pure types and arithmetic with no I/O. Everything here is immutable once
//! constructed: bars and account snapshots are fetched, formatted and dropped.

/// Price bars, series statistics and normalization.
pub mod market;

/// Account snapshots, positions and P&L rollups.
pub mod portfolio;

/// Static stock categories and asset search.
pub mod catalog;
