pub mod keys;
pub mod locator;
pub mod protocol;
pub mod service;
pub mod session;
