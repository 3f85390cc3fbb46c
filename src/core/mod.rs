pub mod coordinator;
pub mod race;
