//! funnelsim-core — deterministic synthetic marketing-data generation.
//!
//! Given a numeric seed, the engine reproducibly builds one consistent
//! dataset: an ideal customer profile, an experiment, five channels,
//! pass/fail gates per channel, and fourteen days of funnel results per
//! channel, obeying funnel-monotonicity and cost-conservation
//! invariants.
//!
//! RULES:
//!   - All simulation randomness flows through rng::DemoRng streams
//!     derived from the master seed. No platform RNG in the pipeline.
//!   - Generation is total: any seed yields a complete dataset.
//!   - Entities are never mutated after generation; a new seed produces
//!     a new graph. The manager is the only stateful component.

pub mod channel;
pub mod config;
pub mod costs;
pub mod dataset;
pub mod error;
pub mod experiment;
pub mod funnel;
pub mod gate;
pub mod icp;
pub mod manager;
pub mod performance;
pub mod result;
pub mod rng;
pub mod storage;
pub mod types;
pub mod validation;
