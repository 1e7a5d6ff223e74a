pub mod equipment;
pub mod mobile;
