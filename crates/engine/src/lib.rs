// collabwrite-engine: storage, document sessions, suggestions, and export.

pub mod config;
pub mod export;
pub mod history;
pub mod seed;
pub mod session;
pub mod store;
pub mod suggest;
