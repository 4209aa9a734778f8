// wayfinder_sim/src/simulation/plugins/mod.rs

pub mod building;
pub mod navigation;
pub mod supervision;
pub mod walker;
