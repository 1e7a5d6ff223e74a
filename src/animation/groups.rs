//! Numeric animation groups. The numbers index the external animation data
//! and must stay exactly as they are.

use serde::{Deserialize, Serialize};

/// Body classification as reported by the animation data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Monster,
    SeaMonster,
    Animal,
    Human,
    Equipment,
    Unknown,
}

/// Which group numbering a body uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupFamily {
    Low,
    High,
    People,
}

impl BodyKind {
    pub fn family(self) -> GroupFamily {
        match self {
            BodyKind::Animal => GroupFamily::Low,
            BodyKind::Monster | BodyKind::SeaMonster => GroupFamily::High,
            BodyKind::Human | BodyKind::Equipment | BodyKind::Unknown => GroupFamily::People,
        }
    }

    pub fn is_people(self) -> bool {
        matches!(self, BodyKind::Human | BodyKind::Equipment)
    }
}

impl GroupFamily {
    pub fn group_count(self) -> u8 {
        match self {
            GroupFamily::Low => low::COUNT,
            GroupFamily::High => high::COUNT,
            GroupFamily::People => people::COUNT,
        }
    }

    pub fn walk_group(self) -> u8 {
        match self {
            GroupFamily::Low => low::WALK,
            GroupFamily::High => high::WALK,
            GroupFamily::People => people::WALK_UNARMED,
        }
    }

    pub fn stand_group(self) -> u8 {
        match self {
            GroupFamily::Low => low::STAND,
            GroupFamily::High => high::STAND,
            GroupFamily::People => people::STAND,
        }
    }

    /// The two fidget groups the idle picker chooses between.
    pub fn fidget_groups(self) -> [u8; 2] {
        match self {
            GroupFamily::Low => [low::FIDGET_1, low::FIDGET_2],
            GroupFamily::High => [high::FIDGET_1, high::FIDGET_2],
            GroupFamily::People => [people::FIDGET_1, people::FIDGET_2],
        }
    }
}

/// Animals.
pub mod low {
    pub const WALK: u8 = 0;
    pub const RUN: u8 = 1;
    pub const STAND: u8 = 2;
    pub const EAT: u8 = 3;
    pub const UNKNOWN: u8 = 4;
    pub const ATTACK_1: u8 = 5;
    pub const ATTACK_2: u8 = 6;
    pub const ATTACK_3: u8 = 7;
    pub const DIE_1: u8 = 8;
    pub const FIDGET_1: u8 = 9;
    pub const FIDGET_2: u8 = 10;
    pub const LIE_DOWN: u8 = 11;
    pub const DIE_2: u8 = 12;
    pub const COUNT: u8 = 13;
    /// Standing loop of bodies shipped in the newer packed format.
    pub const UOP_STAND: u8 = 25;
}

/// Monsters and sea monsters.
pub mod high {
    pub const WALK: u8 = 0;
    pub const STAND: u8 = 1;
    pub const DIE_1: u8 = 2;
    pub const DIE_2: u8 = 3;
    pub const ATTACK_1: u8 = 4;
    pub const ATTACK_2: u8 = 5;
    pub const ATTACK_3: u8 = 6;
    pub const MISC_1: u8 = 7;
    pub const MISC_2: u8 = 8;
    pub const MISC_3: u8 = 9;
    pub const STUMBLE: u8 = 10;
    pub const SLAP_GROUND: u8 = 11;
    pub const CAST: u8 = 12;
    pub const GET_HIT_1: u8 = 13;
    pub const MISC_4: u8 = 14;
    pub const GET_HIT_2: u8 = 15;
    pub const GET_HIT_3: u8 = 16;
    pub const FIDGET_1: u8 = 17;
    pub const FIDGET_2: u8 = 18;
    pub const FLY: u8 = 19;
    pub const LAND: u8 = 20;
    pub const DIE_IN_FLIGHT: u8 = 21;
    pub const COUNT: u8 = 22;

    /// Sea monsters reuse the first slots with their own meaning.
    pub const SEA_WALK: u8 = 0;
    pub const SEA_RUN: u8 = 1;
    pub const SEA_STAND: u8 = 2;
}

/// Humans, equipment and anything unclassified.
pub mod people {
    pub const WALK_UNARMED: u8 = 0;
    pub const WALK_ARMED: u8 = 1;
    pub const RUN_UNARMED: u8 = 2;
    pub const RUN_ARMED: u8 = 3;
    pub const STAND: u8 = 4;
    pub const FIDGET_1: u8 = 5;
    pub const FIDGET_2: u8 = 6;
    pub const STAND_ONE_HANDED_ATTACK: u8 = 7;
    pub const STAND_TWO_HANDED_ATTACK: u8 = 8;
    pub const ATTACK_ONE_HANDED: u8 = 9;
    pub const ATTACK_UNARMED_1: u8 = 10;
    pub const ATTACK_UNARMED_2: u8 = 11;
    pub const ATTACK_TWO_HANDED_DOWN: u8 = 12;
    pub const ATTACK_TWO_HANDED_WIDE: u8 = 13;
    pub const ATTACK_TWO_HANDED_JAB: u8 = 14;
    pub const WALK_WARMODE: u8 = 15;
    pub const CAST_DIRECTED: u8 = 16;
    pub const CAST_AREA: u8 = 17;
    pub const ATTACK_BOW: u8 = 18;
    pub const ATTACK_CROSSBOW: u8 = 19;
    pub const GET_HIT: u8 = 20;
    pub const DIE_1: u8 = 21;
    pub const DIE_2: u8 = 22;
    pub const ONMOUNT_RIDE_SLOW: u8 = 23;
    pub const ONMOUNT_RIDE_FAST: u8 = 24;
    pub const ONMOUNT_STAND: u8 = 25;
    pub const ONMOUNT_ATTACK: u8 = 26;
    pub const ONMOUNT_ATTACK_BOW: u8 = 27;
    pub const ONMOUNT_ATTACK_CROSSBOW: u8 = 28;
    pub const ONMOUNT_SLAP_HORSE: u8 = 29;
    pub const TURN: u8 = 30;
    pub const ATTACK_UNARMED_AND_WALK: u8 = 31;
    pub const EMOTE_BOW: u8 = 32;
    pub const EMOTE_SALUTE: u8 = 33;
    pub const FIDGET_3: u8 = 34;
    pub const COUNT: u8 = 35;

    pub const GARGOYLE_FLY_WALK: u8 = 62;
    pub const GARGOYLE_FLY_RUN: u8 = 63;
    pub const GARGOYLE_FLY_STAND: u8 = 64;
    pub const GARGOYLE_FLY_WAR_STAND: u8 = 65;
    pub const GARGOYLE_FLY_FIDGET: u8 = 66;
    pub const GARGOYLE_FLY_ATTACK: u8 = 71;
    pub const GARGOYLE_FLY_ATTACK_TWO_HANDED: u8 = 72;
    pub const GARGOYLE_FLY_CAST_DIRECTED: u8 = 75;
    pub const GARGOYLE_FLY_CAST_AREA: u8 = 76;
    pub const GARGOYLE_FLY_GET_HIT: u8 = 77;
    pub const GARGOYLE_FLY_EMOTE: u8 = 78;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families_follow_body_kind() {
        assert_eq!(BodyKind::Animal.family(), GroupFamily::Low);
        assert_eq!(BodyKind::SeaMonster.family(), GroupFamily::High);
        assert_eq!(BodyKind::Equipment.family(), GroupFamily::People);
        assert_eq!(BodyKind::Unknown.family(), GroupFamily::People);
    }

    #[test]
    fn fidget_groups_fit_inside_family() {
        for family in [GroupFamily::Low, GroupFamily::High, GroupFamily::People] {
            for group in family.fidget_groups() {
                assert!(group < family.group_count(), "{family:?} {group}");
            }
            assert!(family.stand_group() < family.group_count());
        }
    }
}
