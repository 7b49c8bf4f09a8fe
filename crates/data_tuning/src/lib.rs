//! data_tuning: tuning schemas and loaders for the walker controller.
//!
//! Speeds, gravity, jump impulse, and camera limits are configuration, not
//! contract: the shipped defaults match the demo feel, and a
//! `data/config/controller.toml` or env override retunes without a rebuild.

pub mod configs {
    pub mod controller;
}
