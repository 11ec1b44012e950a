pub mod actions;
pub mod core;
pub mod pollers;
