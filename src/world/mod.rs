pub mod position;
pub mod tick;
pub mod time;
