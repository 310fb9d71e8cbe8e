pub mod backup;
pub mod clean;
pub mod export;
pub mod heartbeat;
pub mod import;
pub mod session;
pub mod tasks;
pub mod toggle;
