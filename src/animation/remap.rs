//! Data tables that redirect one animation group to another.

use crate::animation::capability::{
    AnimationCapability, AnimationFlags, GroupReplacement, REPLACE_WITH_WALK,
};
use crate::animation::groups::{high, low, people, BodyKind, GroupFamily};

/// Hand item animation ids that still count as "bare hands".
pub const HANDS_BASE_ANIMID: [u16; 19] = [
    0x0263, 0x0264, 0x0265, 0x0266, 0x0267, 0x0268, 0x0269, 0x026D, 0x0270, 0x0272, 0x0274,
    0x027A, 0x027C, 0x027F, 0x0281, 0x0286, 0x0288, 0x0289, 0x028B,
];

/// Torches, lanterns and candles; held in the two-handed slot without
/// making a war stance two-handed.
pub const LIGHT_SOURCE_ANIMID: [u16; 9] = [
    0x0240, 0x0241, 0x0242, 0x0243, 0x0244, 0x0245, 0x0246, 0x03E0, 0x03E1,
];

pub fn is_bare_hand(anim_id: u16) -> bool {
    HANDS_BASE_ANIMID.contains(&anim_id)
}

pub fn is_light_source(anim_id: u16) -> bool {
    LIGHT_SOURCE_ANIMID.contains(&anim_id)
}

/// Looks `group` up in a family replacement table and returns the redirect,
/// already folded into the family's group range.
pub fn replace_group(
    replacements: &[GroupReplacement],
    family: GroupFamily,
    group: u8,
) -> Option<u8> {
    let redirect = replacements.iter().find(|entry| entry.from == group)?;
    let target = if redirect.to == REPLACE_WITH_WALK {
        family.walk_group()
    } else {
        redirect.to
    };
    Some(target % family.group_count())
}

/// Maps a server-requested group onto what a non-human body actually has.
pub fn remap_server_group(
    capability: &dyn AnimationCapability,
    kind: BodyKind,
    body: u16,
    group: u8,
    war_mode: bool,
) -> u8 {
    match kind {
        BodyKind::Animal => match group {
            0..=low::DIE_2 => group,
            23 => low::WALK,
            24 => low::RUN,
            26 => {
                if capability.exists(body, 26)
                    && !(war_mode && capability.exists(body, low::FIDGET_1))
                {
                    26
                } else {
                    low::FIDGET_1
                }
            }
            28 => {
                if capability.exists(body, low::FIDGET_2) {
                    low::FIDGET_2
                } else {
                    low::ATTACK_1
                }
            }
            _ => low::STAND,
        },
        BodyKind::SeaMonster => {
            if group <= high::MISC_2 {
                group
            } else {
                high::SEA_STAND
            }
        }
        BodyKind::Monster => {
            if !capability.exists(body, group) {
                high::STAND
            } else if group > high::DIE_IN_FLIGHT
                && !capability
                    .flags(body)
                    .contains(AnimationFlags::USE_UOP_ANIMATION)
            {
                high::STAND
            } else {
                group
            }
        }
        BodyKind::Human | BodyKind::Equipment | BodyKind::Unknown => group,
    }
}

const LOW_CORRECTIONS: &[(u8, u8)] = &[
    (low::DIE_2, low::DIE_1),
    (low::FIDGET_2, low::FIDGET_1),
    (low::ATTACK_3, low::ATTACK_1),
    (low::ATTACK_2, low::ATTACK_1),
];

const HIGH_CORRECTIONS: &[(u8, u8)] = &[
    (high::DIE_2, high::DIE_1),
    (high::FIDGET_2, high::FIDGET_1),
    (high::GET_HIT_3, high::GET_HIT_2),
    (high::GET_HIT_2, high::GET_HIT_1),
    (high::ATTACK_3, high::ATTACK_1),
    (high::ATTACK_2, high::ATTACK_1),
];

const PEOPLE_CORRECTIONS: &[(u8, u8)] = &[
    (people::DIE_2, people::DIE_1),
    (people::FIDGET_2, people::FIDGET_1),
    (people::FIDGET_3, people::FIDGET_1),
    (people::RUN_ARMED, people::RUN_UNARMED),
    (people::WALK_ARMED, people::WALK_UNARMED),
];

/// Replaces a group the body has no frames for with its closest sibling,
/// and finally with the family's stand group.
pub fn correct_missing_group(
    capability: &dyn AnimationCapability,
    family: GroupFamily,
    body: u16,
    group: u8,
) -> u8 {
    if capability.exists(body, group) {
        return group;
    }
    let corrections = match family {
        GroupFamily::Low => LOW_CORRECTIONS,
        GroupFamily::High => HIGH_CORRECTIONS,
        GroupFamily::People => PEOPLE_CORRECTIONS,
    };
    let mut current = group;
    // Chains are at most two links long (get-hit 3 -> 2 -> 1).
    for _ in 0..corrections.len() {
        match corrections.iter().find(|(from, _)| *from == current) {
            Some((_, to)) => {
                if capability.exists(body, *to) {
                    return *to;
                }
                current = *to;
            }
            None => break,
        }
    }
    family.stand_group()
}

/// Gargoyles in flight have their own copy of most people groups.
pub fn gargoyle_flying_group(group: u8) -> u8 {
    match group {
        people::WALK_UNARMED | people::WALK_ARMED | people::WALK_WARMODE => {
            people::GARGOYLE_FLY_WALK
        }
        people::RUN_UNARMED | people::RUN_ARMED => people::GARGOYLE_FLY_RUN,
        people::STAND => people::GARGOYLE_FLY_STAND,
        people::FIDGET_1 | people::FIDGET_2 => people::GARGOYLE_FLY_FIDGET,
        people::STAND_ONE_HANDED_ATTACK | people::STAND_TWO_HANDED_ATTACK => {
            people::GARGOYLE_FLY_WAR_STAND
        }
        people::ATTACK_ONE_HANDED..=people::ATTACK_UNARMED_2
        | people::ATTACK_UNARMED_AND_WALK => people::GARGOYLE_FLY_ATTACK,
        people::ATTACK_TWO_HANDED_DOWN..=people::ATTACK_TWO_HANDED_JAB => {
            people::GARGOYLE_FLY_ATTACK_TWO_HANDED
        }
        people::CAST_DIRECTED => people::GARGOYLE_FLY_CAST_DIRECTED,
        people::CAST_AREA => people::GARGOYLE_FLY_CAST_AREA,
        people::GET_HIT => people::GARGOYLE_FLY_GET_HIT,
        people::FIDGET_3 => people::GARGOYLE_FLY_EMOTE,
        other => other,
    }
}
