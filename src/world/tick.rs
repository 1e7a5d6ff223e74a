use rand::Rng;

use crate::animation::capability::AnimationCapability;
use crate::animation::idle::pick_idle_animation;
use crate::animation::playback::PlaybackPhase;
use crate::animation::resolver::AnimationGroupResolver;
use crate::config::MotionConfig;
use crate::entities::mobile::Mobile;
use crate::movement::advancer::{process_steps, MovementEvent};
use crate::movement::walker::WalkerState;
use crate::world::time::GameTick;

/// What the renderer needs to draw one mobile this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MobileFrame {
    pub screen_x: f32,
    pub screen_y: f32,
    pub group: u8,
    pub frame: u16,
    pub direction: u8,
    pub mirror: bool,
}

/// Shared inputs of one frame.
pub struct FrameContext<'a, R: Rng + ?Sized> {
    pub now: GameTick,
    pub config: &'a MotionConfig,
    pub capability: &'a dyn AnimationCapability,
    pub rng: &'a mut R,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickOutput {
    pub frame: MobileFrame,
    pub events: Vec<MovementEvent>,
    pub phase: PlaybackPhase,
}

/// Runs one frame for `mobile`: steps, idle fidgets, frame advance, then
/// group resolution.
pub fn tick_mobile<R: Rng + ?Sized>(
    mobile: &mut Mobile,
    walker: Option<&mut WalkerState>,
    ctx: &mut FrameContext<'_, R>,
) -> TickOutput {
    let now = ctx.now;
    let config = ctx.config;
    let events = process_steps(mobile, walker, now, config);
    pick_idle_animation(mobile, ctx.capability, now, config, &mut *ctx.rng);

    let resolver = AnimationGroupResolver::new(ctx.capability);
    let context = mobile.animation_context(now, config);
    let current = resolver.resolve(&context, &mobile.playback);
    let available = if context.body >= ctx.capability.max_body_id() {
        0
    } else {
        ctx.capability
            .frame_count(resolver.drawn_body(context.body), current.group, current.direction)
    };
    let advanced = mobile
        .playback
        .advance(now, available, config.character_animation_delay_ms);
    let phase = match advanced {
        PlaybackPhase::Exhausted => PlaybackPhase::Exhausted,
        _ => mobile.playback.phase(context.walking),
    };

    let context = mobile.animation_context(now, config);
    let outcome = resolver.resolve(&context, &mobile.playback);
    TickOutput {
        frame: MobileFrame {
            screen_x: mobile.offset.x,
            screen_y: mobile.offset.y - mobile.offset.z,
            group: outcome.group,
            frame: outcome.frame,
            direction: outcome.direction,
            mirror: outcome.mirror,
        },
        events,
        phase,
    }
}
