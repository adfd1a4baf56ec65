pub mod controls;
pub mod tracking;
