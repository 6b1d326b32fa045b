//! Adaptive Large Neighborhood Search engine.
//!
//! Each iteration destroys part of the incumbent solution and repairs it,
//! with operator selection probabilities adapting to past performance and
//! a record-to-record travel acceptance criterion deciding whether the
//! candidate becomes the new incumbent.
//!
//! # References
//!
//! Ropke & Pisinger (2006), "An Adaptive Large Neighborhood Search
//! Heuristic for the Pickup and Delivery Problem with Time Windows"

mod accept;
mod config;
mod destroy;
mod driver;
mod repair;
mod selector;
mod stop;
mod types;

pub use accept::RecordToRecordTravel;
pub use config::SearchConfig;
pub use destroy::{DestroyOp, RandomRemoval, StringRemoval};
pub use driver::{SearchDriver, SearchResult};
pub use repair::{GreedyInsertion, RepairOp};
pub use selector::{AdaptiveSelector, Outcome};
pub use stop::StoppingPolicy;
pub use types::{DestroyOperator, RepairOperator};
