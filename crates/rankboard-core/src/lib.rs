//! Record types and declarative filter/sort registries for Rankboard.
//!
//! Two leaderboards share one registry shape: [`plot::PLOTS`] over housing
//! plot snapshots and [`score::SCORES`] over model evaluation results.

pub mod error;
pub mod plot;
pub mod registry;
pub mod score;

pub use error::RegistryError;
pub use registry::{
    Comparator, Direction, FilterDef, FilterOption, FilterRegistry, Leaderboard, Predicate, Query,
    SortDef, SortRegistry, Strategy, inverse, option_sequence,
};
