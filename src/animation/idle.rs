use rand::Rng;

use crate::animation::capability::AnimationCapability;
use crate::animation::playback::{AnimationOrigin, DirectedAnimation};
use crate::animation::resolver::effective_kind;
use crate::config::MotionConfig;
use crate::entities::mobile::Mobile;
use crate::telemetry::logging;
use crate::world::time::GameTick;

/// Next time an idle mobile may fidget.
pub fn next_idle_time<R: Rng + ?Sized>(now: GameTick, config: &MotionConfig, rng: &mut R) -> GameTick {
    let jitter = if config.idle_jitter_ms == 0 {
        0
    } else {
        rng.gen_range(0..config.idle_jitter_ms)
    };
    now.saturating_add_millis(config.idle_base_ms.saturating_add(jitter))
}

/// Plays a random fidget on a mobile that has been standing long enough.
/// Returns the group started, if any. The timer is re-armed whenever it has
/// expired, whether or not a fidget was played.
pub fn pick_idle_animation<R: Rng + ?Sized>(
    mobile: &mut Mobile,
    capability: &dyn AnimationCapability,
    now: GameTick,
    config: &MotionConfig,
    rng: &mut R,
) -> Option<u8> {
    if now < mobile.idle_at {
        return None;
    }
    mobile.idle_at = next_idle_time(now, config, rng);

    if !mobile.steps.is_empty()
        || mobile.playback.directed().is_some()
        || mobile.is_mounted()
        || mobile.status.war_mode
        || mobile.status.dead
        || mobile.body >= capability.max_body_id()
    {
        return None;
    }

    let body = capability.convert_body(mobile.body);
    let kind = effective_kind(capability.classify(body), capability.flags(body));
    let [first, second] = kind.family().fidget_groups();
    let (pick, other) = if rng.gen_bool(0.5) {
        (first, second)
    } else {
        (second, first)
    };
    let group = if capability.exists(body, pick) {
        pick
    } else if capability.exists(body, other) {
        other
    } else {
        return None;
    };

    mobile
        .playback
        .start(DirectedAnimation::once(group, AnimationOrigin::Idle), now);
    logging::log_animation(&format!("mobile {:#x}: idle group {}", mobile.serial.0, group));
    Some(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::capability::{AnimationFlags, AnimationTable};
    use crate::animation::groups::BodyKind;
    use crate::entities::mobile::Serial;
    use crate::world::position::Position;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DRAGON: u16 = 0x000C;

    fn dragon(config: &MotionConfig) -> Mobile {
        Mobile::new(Serial(3), DRAGON, Position::new(1, 1, 0), config)
    }

    #[test]
    fn timer_stays_inside_base_plus_jitter() {
        let config = MotionConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let at = next_idle_time(GameTick(1_000), &config, &mut rng);
            assert!(at >= GameTick(31_000) && at < GameTick(61_000), "{at:?}");
        }
        let fixed = MotionConfig {
            idle_jitter_ms: 0,
            ..MotionConfig::default()
        };
        assert_eq!(next_idle_time(GameTick(0), &fixed, &mut rng), GameTick(30_000));
    }

    #[test]
    fn fidget_falls_back_to_the_other_slot() {
        let config = MotionConfig::default();
        let table = AnimationTable::new(0x0800).with_body(
            DRAGON,
            BodyKind::Monster,
            AnimationFlags::empty(),
            &[0, 1, 18],
            6,
        );
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let mut mobile = dragon(&config);
            let now = mobile.idle_at;
            assert_eq!(pick_idle_animation(&mut mobile, &table, now, &config, &mut rng), Some(18));
            assert!(!mobile.playback.is_from_server());
            assert!(mobile.idle_at > now);
        }
    }

    #[test]
    fn no_fidget_when_neither_slot_exists() {
        let config = MotionConfig::default();
        let table =
            AnimationTable::new(0x0800).with_body(DRAGON, BodyKind::Monster, AnimationFlags::empty(), &[1], 6);
        let mut rng = StdRng::seed_from_u64(1);
        let mut mobile = dragon(&config);
        let now = mobile.idle_at;
        assert_eq!(pick_idle_animation(&mut mobile, &table, now, &config, &mut rng), None);
        assert!(mobile.idle_at > now);
        assert!(mobile.playback.directed().is_none());
    }

    #[test]
    fn busy_mobiles_do_not_fidget_but_rearm() {
        let config = MotionConfig::default();
        let table = AnimationTable::new(0x0800).with_body(
            DRAGON,
            BodyKind::Monster,
            AnimationFlags::empty(),
            &[17, 18],
            6,
        );
        let mut rng = StdRng::seed_from_u64(2);
        let mut mobile = dragon(&config);
        mobile.status.war_mode = true;
        let now = mobile.idle_at;
        assert_eq!(pick_idle_animation(&mut mobile, &table, now, &config, &mut rng), None);
        assert!(mobile.idle_at > now);

        let mut early = dragon(&config);
        let before = early.idle_at;
        assert_eq!(
            pick_idle_animation(&mut early, &table, GameTick(before.0 - 1), &config, &mut rng),
            None
        );
        assert_eq!(early.idle_at, before);
    }

    #[test]
    fn both_fidget_slots_get_picked() {
        let config = MotionConfig::default();
        let table = AnimationTable::new(0x0800).with_body(
            0x0190,
            BodyKind::Human,
            AnimationFlags::empty(),
            &[4, 5, 6],
            6,
        );
        let mut rng = StdRng::seed_from_u64(99);
        let mut seen = [false; 2];
        for _ in 0..64 {
            let mut mobile = Mobile::new(Serial(4), 0x0190, Position::new(1, 1, 0), &config);
            let now = mobile.idle_at;
            match pick_idle_animation(&mut mobile, &table, now, &config, &mut rng) {
                Some(5) => seen[0] = true,
                Some(6) => seen[1] = true,
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(seen, [true, true]);
    }
}
