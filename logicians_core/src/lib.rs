//! Logicians Core - common-knowledge deduction on a line of slots
//!
//! A number of logicians stand on distinct positions of a line. Each can see
//! where the others stand but not their own slot. Every round, all of them
//! publicly announce whether they can now deduce their own position. This
//! crate computes the first round each logician says "yes".
//!
//! The solver is a brute-force fixed point over every possible world:
//! 1. **World Indexer**: dense Lehmer rank of a world ([`WorldIndexer`])
//! 2. **World Table**: every world with the round it was ruled out ([`WorldTable`])
//! 3. **Yes-Predicate**: would a logician say yes in a given world ([`says_yes`])
//! 4. **Round Driver**: real announcements, then common-knowledge elimination
//! 5. **Simulator**: rounds until nothing more is ruled out ([`simulate`])
//!
//! ```
//! use logicians_core::simulate;
//!
//! // A . B : both logicians can name their slot straight away
//! let first_yes = simulate(2, 3, &[0, 2]).unwrap();
//! assert_eq!(first_yes, vec![Some(0), Some(0)]);
//! ```

pub mod config;
pub mod deduction;
pub mod error;
pub mod simulation;
pub mod table;
pub mod world;

/// Round counter, starting at 0.
pub type Round = u32;

// Re-export key types for convenience
pub use config::SolverConfig;
pub use deduction::{says_yes, Gap};
pub use error::SolveError;
pub use simulation::{simulate, Outcome, RoundReport, Simulation};
pub use table::WorldTable;
pub use world::{validate_world, world_count, Position, World, WorldIndexer};
