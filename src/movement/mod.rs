pub mod advancer;
pub mod fast_walk;
pub mod remote;
pub mod speed;
pub mod step_queue;
pub mod walker;
