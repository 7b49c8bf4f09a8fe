// Root app shell and re-exports for workspace crates used by bins.
pub use collision_world as collision;
pub use controller_core as controller;
pub use data_tuning as data;

pub mod demo;
