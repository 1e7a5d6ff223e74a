//! Animation requests that arrive from the server.
//!
//! Two command shapes exist: the legacy one names a group and its playback
//! parameters directly, the typed one names an action kind that is
//! translated per body kind into a group.

use crate::animation::capability::{AnimationCapability, AnimationFlags};
use crate::animation::groups::{high, low, people, BodyKind};
use crate::animation::playback::{AnimationOrigin, DirectedAnimation, NO_GROUP};
use crate::animation::resolver::effective_kind;
use crate::entities::mobile::Mobile;
use crate::telemetry::logging;
use crate::world::time::GameTick;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyAnimationCommand {
    pub action: u16,
    pub frame_count: u16,
    pub repeat_count: u16,
    pub forward: bool,
    pub repeat: bool,
    pub delay: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedAnimationCommand {
    pub kind: u16,
    pub action: u16,
    pub mode: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerAnimationKind {
    Attack,
    Block,
    Die,
    GetHit,
    Pillage,
    Prepare,
    Emote,
    Alert,
    TakeOff,
    Land,
    Spell,
    Eat,
}

impl ServerAnimationKind {
    pub fn from_code(code: u16) -> Option<Self> {
        let kind = match code {
            0 => ServerAnimationKind::Attack,
            1 | 2 => ServerAnimationKind::Block,
            3 => ServerAnimationKind::Die,
            4 => ServerAnimationKind::GetHit,
            5 => ServerAnimationKind::Pillage,
            6 | 14 => ServerAnimationKind::Prepare,
            7 => ServerAnimationKind::Emote,
            8 => ServerAnimationKind::Alert,
            9 => ServerAnimationKind::TakeOff,
            10 => ServerAnimationKind::Land,
            11 => ServerAnimationKind::Spell,
            12 => ServerAnimationKind::Eat,
            _ => return None,
        };
        Some(kind)
    }
}

/// What the translation needs to know about the animated body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedTarget {
    pub kind: BodyKind,
    pub flags: AnimationFlags,
    pub mounted: bool,
    pub gargoyle_flying: bool,
}

/// Translates a typed command into a group. [`NO_GROUP`] means the body has
/// no animation for it.
pub fn typed_group(
    kind: ServerAnimationKind,
    action: u16,
    mode: u8,
    target: TypedTarget,
    has_group: impl Fn(u8) -> bool,
) -> u8 {
    let odd = mode % 2 == 1;
    let human = target.kind.is_people();
    match kind {
        ServerAnimationKind::Attack => match target.kind {
            BodyKind::Monster => match mode % 4 {
                1 => high::ATTACK_2,
                2 => high::ATTACK_3,
                3 if target.flags.contains(AnimationFlags::ALT_ATTACK_CAST) => high::CAST,
                _ => high::ATTACK_1,
            },
            BodyKind::SeaMonster | BodyKind::Animal => {
                if odd {
                    low::ATTACK_2
                } else {
                    low::ATTACK_1
                }
            }
            _ if target.mounted => match action {
                0 => people::ONMOUNT_SLAP_HORSE,
                1 => people::ONMOUNT_ATTACK_BOW,
                2 => people::ONMOUNT_ATTACK_CROSSBOW,
                _ => people::ONMOUNT_ATTACK,
            },
            _ => match action {
                1 => people::ATTACK_BOW,
                2 => people::ATTACK_CROSSBOW,
                3 => people::ATTACK_UNARMED_2,
                4 => people::ATTACK_ONE_HANDED,
                5 => people::ATTACK_UNARMED_1,
                6 => people::ATTACK_TWO_HANDED_DOWN,
                7 if target.gargoyle_flying
                    && has_group(people::GARGOYLE_FLY_ATTACK_TWO_HANDED) =>
                {
                    people::GARGOYLE_FLY_ATTACK_TWO_HANDED
                }
                7 => people::ATTACK_TWO_HANDED_WIDE,
                8 => people::ATTACK_TWO_HANDED_JAB,
                _ => people::ATTACK_UNARMED_AND_WALK,
            },
        },
        ServerAnimationKind::Block => match target.kind {
            BodyKind::Monster => {
                if odd {
                    high::GET_HIT_2
                } else {
                    high::GET_HIT_3
                }
            }
            BodyKind::Animal | BodyKind::SeaMonster => NO_GROUP,
            _ if target.mounted => NO_GROUP,
            _ => people::TURN,
        },
        ServerAnimationKind::Die => match target.kind {
            BodyKind::Monster => {
                if odd {
                    high::DIE_1
                } else {
                    high::DIE_2
                }
            }
            BodyKind::SeaMonster => low::DIE_1,
            BodyKind::Animal => {
                if odd {
                    low::DIE_2
                } else {
                    low::DIE_1
                }
            }
            _ => {
                if odd {
                    people::DIE_1
                } else {
                    people::DIE_2
                }
            }
        },
        ServerAnimationKind::GetHit => match target.kind {
            BodyKind::Monster => high::STUMBLE,
            BodyKind::Animal | BodyKind::SeaMonster => low::ATTACK_3,
            _ if target.gargoyle_flying => people::GARGOYLE_FLY_GET_HIT,
            _ if target.mounted => NO_GROUP,
            _ => people::GET_HIT,
        },
        ServerAnimationKind::Pillage => match target.kind {
            BodyKind::Monster | BodyKind::SeaMonster => {
                if odd {
                    high::FIDGET_2
                } else {
                    high::FIDGET_1
                }
            }
            BodyKind::Animal => match mode % 3 {
                1 => low::FIDGET_2,
                2 => low::EAT,
                _ => low::FIDGET_1,
            },
            _ => NO_GROUP,
        },
        ServerAnimationKind::Prepare => match target.kind {
            BodyKind::Monster => high::SLAP_GROUND,
            BodyKind::SeaMonster => high::ATTACK_2,
            BodyKind::Animal => low::EAT,
            _ if target.mounted => NO_GROUP,
            _ => people::FIDGET_3,
        },
        ServerAnimationKind::Emote => {
            if target.mounted || !human {
                NO_GROUP
            } else {
                match action {
                    0 => people::EMOTE_BOW,
                    1 => people::EMOTE_SALUTE,
                    _ => people::WALK_UNARMED,
                }
            }
        }
        ServerAnimationKind::Alert => match target.kind {
            BodyKind::Monster => high::SLAP_GROUND,
            BodyKind::SeaMonster => high::DIE_2,
            BodyKind::Animal => low::FIDGET_1,
            _ if target.mounted => NO_GROUP,
            _ => people::EMOTE_SALUTE,
        },
        ServerAnimationKind::TakeOff => match target.kind {
            BodyKind::Monster => high::FLY,
            _ => NO_GROUP,
        },
        ServerAnimationKind::Land => match target.kind {
            BodyKind::Monster => high::LAND,
            _ => NO_GROUP,
        },
        ServerAnimationKind::Spell => match target.kind {
            BodyKind::Monster => high::CAST,
            BodyKind::SeaMonster => high::ATTACK_2,
            BodyKind::Animal => low::EAT,
            _ if target.mounted => NO_GROUP,
            _ => match (action, target.gargoyle_flying) {
                (1 | 2, true) => people::GARGOYLE_FLY_CAST_AREA,
                (1 | 2, false) => people::CAST_AREA,
                (_, true) => people::GARGOYLE_FLY_CAST_DIRECTED,
                (_, false) => people::CAST_DIRECTED,
            },
        },
        ServerAnimationKind::Eat => match target.kind {
            BodyKind::Animal => low::EAT,
            _ => NO_GROUP,
        },
    }
}

fn body_kind(capability: &dyn AnimationCapability, body: u16) -> Option<(u16, BodyKind)> {
    if body >= capability.max_body_id() {
        return None;
    }
    let drawn = capability.convert_body(body);
    let kind = effective_kind(capability.classify(drawn), capability.flags(drawn));
    Some((drawn, kind))
}

/// Starts a legacy server animation. Returns `false` when the command names
/// no usable group or the body is outside the table.
pub fn play_legacy(
    mobile: &mut Mobile,
    command: &LegacyAnimationCommand,
    capability: &dyn AnimationCapability,
    now: GameTick,
) -> bool {
    let Ok(action) = u8::try_from(command.action) else {
        logging::log_animation(&format!(
            "mobile {:#x}: ignoring out-of-range action {}",
            mobile.serial.0, command.action
        ));
        return false;
    };
    if action == NO_GROUP || mobile.body >= capability.max_body_id() {
        return false;
    }
    // Stored as sent. Group replacement happens once, at resolution.
    mobile.playback.start(
        DirectedAnimation {
            group: action,
            origin: AnimationOrigin::Server,
            frame_count: command.frame_count,
            repeat_count: command.repeat_count,
            repeat: command.repeat,
            forward: command.forward,
            interval: command.delay,
        },
        now,
    );
    logging::log_animation(&format!(
        "mobile {:#x}: server group {}",
        mobile.serial.0, action
    ));
    true
}

/// Starts a typed server animation once. Returns `false` when the command
/// translates to nothing for this body.
pub fn play_typed(
    mobile: &mut Mobile,
    command: &TypedAnimationCommand,
    capability: &dyn AnimationCapability,
    now: GameTick,
) -> bool {
    let Some(kind) = ServerAnimationKind::from_code(command.kind) else {
        logging::log_animation(&format!(
            "mobile {:#x}: unknown animation kind {}",
            mobile.serial.0, command.kind
        ));
        return false;
    };
    let Some((drawn, body_kind)) = body_kind(capability, mobile.body) else {
        return false;
    };
    let target = TypedTarget {
        kind: body_kind,
        flags: capability.flags(drawn),
        mounted: mobile.is_mounted(),
        gargoyle_flying: mobile.status.gargoyle && mobile.status.flying,
    };
    let group = typed_group(kind, command.action, command.mode, target, |group| {
        capability.exists(drawn, group)
    });
    if group == NO_GROUP {
        return false;
    }
    mobile
        .playback
        .start(DirectedAnimation::once(group, AnimationOrigin::Server), now);
    logging::log_animation(&format!(
        "mobile {:#x}: {:?} -> group {}",
        mobile.serial.0, kind, group
    ));
    true
}
