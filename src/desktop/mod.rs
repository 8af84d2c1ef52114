pub mod helpers;
pub mod screen;
