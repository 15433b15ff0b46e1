//! klupd - update status checker for a Klipper 3D-printer stack
//!
//! This library determines, for a fixed set of tracked components
//! (Klipper, Moonraker, KlipperScreen, the Mainsail and Fluidd web
//! clients, and the system package list), whether each one is up to
//! date with its upstream, and collects the update actions an
//! "update all" pass would run.

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod output;
pub mod probe;
pub mod progress;
