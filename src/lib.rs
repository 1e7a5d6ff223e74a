pub mod animation;
pub mod config;
pub mod entities;
pub mod movement;
pub mod telemetry;
pub mod world;

pub use animation::capability::{AnimationCapability, AnimationFlags, AnimationTable, TableError};
pub use animation::resolver::{AnimationContext, AnimationGroupResolver, AnimationOutcome};
pub use config::{ConfigError, MotionConfig};
pub use entities::mobile::{Mobile, Serial};
pub use movement::advancer::{process_steps, MovementEvent};
pub use movement::remote::{enqueue_remote_move, RemoteMove};
pub use movement::walker::{
    Pathfinder, StepRecord, WalkEvent, WalkNetwork, WalkOutcome, WalkRequest, WalkerState,
};
pub use world::position::{Direction, Position};
pub use world::tick::{tick_mobile, FrameContext, MobileFrame, TickOutput};
pub use world::time::{GameClock, GameTick};
