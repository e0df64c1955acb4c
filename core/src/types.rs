//! Shared primitive types used across the entire engine.

/// A stable, unique identifier for any entity in the generated dataset.
/// IDs are derived from the seed, never from a platform RNG.
pub type EntityId = String;

/// A master seed for one generated dataset.
pub type Seed = u64;

/// Zero-based day index within the simulated window.
pub type DayIndex = u64;

/// Length of the simulated window: fourteen days ending today.
pub const SIMULATED_DAYS: DayIndex = 14;

/// Number of channels generated per dataset.
pub const CHANNEL_COUNT: usize = 5;
