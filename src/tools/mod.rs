// Modular tools
pub mod collect;
pub mod extract;
pub mod pages;
pub mod tables;
