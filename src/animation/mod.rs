pub mod capability;
pub mod groups;
pub mod idle;
pub mod playback;
pub mod remap;
pub mod resolver;
pub mod server;
