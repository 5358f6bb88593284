// Wire types exchanged with external services.

pub mod suggestions;
