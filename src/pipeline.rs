pub mod main;
pub mod render;
pub mod startup;
