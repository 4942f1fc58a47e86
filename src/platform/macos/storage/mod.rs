//! Platform preference storage.

pub mod preferences;

pub use preferences::UserDefaultsStore;
