//! Per-tick systems: camera rig, pointer-capture toggle, frame orchestration.

pub mod camera;
pub mod capture;
pub mod controller;
