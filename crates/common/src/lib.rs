// collabwrite-common: shared types and pure editing logic for the CollabWrite workspace

pub mod branch;
pub mod format;
pub mod protocol;
pub mod types;
