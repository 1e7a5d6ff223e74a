//! Picks the animation group, frame and stored direction for a mobile.
//!
//! Resolution is total: every context maps to some group, falling back to
//! group 0 for bodies outside the animation data and to the family stand
//! group when a directed group has no frames.

use crate::animation::capability::{AnimationCapability, AnimationFlags};
use crate::animation::groups::{high, low, people, BodyKind};
use crate::animation::playback::{Playback, NO_GROUP};
use crate::animation::remap;
use crate::entities::equipment::HandItems;
use crate::world::position::Direction;

/// Everything the resolver needs to know about one mobile this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationContext {
    pub body: u16,
    pub direction: Direction,
    pub walking: bool,
    pub running: bool,
    pub mounted: bool,
    pub war_mode: bool,
    pub dead: bool,
    pub flying: bool,
    pub gargoyle: bool,
    pub hands: HandItems,
    /// Directed group, or [`NO_GROUP`].
    pub directed_group: u8,
    pub from_server: bool,
}

impl AnimationContext {
    pub fn standing(body: u16, direction: Direction) -> Self {
        Self {
            body,
            direction,
            walking: false,
            running: false,
            mounted: false,
            war_mode: false,
            dead: false,
            flying: false,
            gargoyle: false,
            hands: HandItems::default(),
            directed_group: NO_GROUP,
            from_server: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationOutcome {
    pub group: u8,
    pub frame: u16,
    /// Stored art direction, 0..=4.
    pub direction: u8,
    pub mirror: bool,
}

/// Art is stored for five directions; the other three are mirrored.
pub fn direction_and_mirror(direction: Direction) -> (u8, bool) {
    match direction {
        Direction::East => (1, true),
        Direction::South => (1, false),
        Direction::Northeast => (2, true),
        Direction::Southwest => (2, false),
        Direction::North => (3, true),
        Direction::West => (3, false),
        Direction::Southeast => (0, false),
        Direction::Northwest => (4, false),
    }
}

/// Flags can force a body onto another family's group layout.
pub fn effective_kind(kind: BodyKind, flags: AnimationFlags) -> BodyKind {
    if flags.intersects(
        AnimationFlags::CALCULATE_OFFSET_BY_LOW_GROUP
            | AnimationFlags::CALCULATE_OFFSET_LOW_GROUP_EXTENDED,
    ) {
        BodyKind::Animal
    } else if flags.contains(AnimationFlags::CALCULATE_OFFSET_BY_PEOPLE_GROUP) {
        BodyKind::Human
    } else {
        kind
    }
}

pub struct AnimationGroupResolver<'a> {
    capability: &'a dyn AnimationCapability,
}

impl<'a> AnimationGroupResolver<'a> {
    pub fn new(capability: &'a dyn AnimationCapability) -> Self {
        Self { capability }
    }

    pub fn capability(&self) -> &'a dyn AnimationCapability {
        self.capability
    }

    /// Body whose frames are drawn for `body`.
    pub fn drawn_body(&self, body: u16) -> u16 {
        if body >= self.capability.max_body_id() {
            body
        } else {
            self.capability.convert_body(body)
        }
    }

    pub fn resolve_group(&self, context: &AnimationContext) -> u8 {
        let cap = self.capability;
        if context.body >= cap.max_body_id() {
            return 0;
        }
        let body = cap.convert_body(context.body);
        let flags = cap.flags(body);
        let kind = effective_kind(cap.classify(body), flags);

        let group = if context.directed_group == NO_GROUP {
            self.locomotion_group(context, body, kind, flags)
        } else if context.from_server {
            self.server_group(context, body, kind, flags)
        } else if context.walking {
            self.locomotion_group(context, body, kind, flags)
        } else {
            self.idle_directed_group(context, body, kind)
        };

        if kind == BodyKind::Human && context.gargoyle && context.flying {
            remap::gargoyle_flying_group(group)
        } else {
            group
        }
    }

    /// Resolves the group and reads the frame to draw from `playback`.
    pub fn resolve(&self, context: &AnimationContext, playback: &Playback) -> AnimationOutcome {
        let group = self.resolve_group(context);
        let (direction, mirror) = direction_and_mirror(context.direction);
        let available = if context.body >= self.capability.max_body_id() {
            0
        } else {
            self.capability
                .frame_count(self.drawn_body(context.body), group, direction)
        };
        AnimationOutcome {
            group,
            frame: playback.current_frame(available),
            direction,
            mirror,
        }
    }

    fn server_group(
        &self,
        context: &AnimationContext,
        body: u16,
        kind: BodyKind,
        flags: AnimationFlags,
    ) -> u8 {
        let mut group = context.directed_group;
        if group == high::CAST && !kind.is_people() && !flags.contains(AnimationFlags::HUMAN_CAST_GROUP)
        {
            group = if kind == BodyKind::Monster {
                high::ATTACK_1
            } else {
                high::ATTACK_2
            };
        }
        let replacements = self.capability.group_replacements(kind);
        if let Some(redirect) = remap::replace_group(replacements, kind.family(), group) {
            return redirect;
        }
        remap::remap_server_group(self.capability, kind, body, group, context.war_mode)
    }

    fn idle_directed_group(&self, context: &AnimationContext, body: u16, kind: BodyKind) -> u8 {
        let family = kind.family();
        let group = remap::replace_group(
            self.capability.group_replacements(kind),
            family,
            context.directed_group,
        )
        .unwrap_or(context.directed_group);
        remap::correct_missing_group(self.capability, family, body, group)
    }

    fn locomotion_group(
        &self,
        context: &AnimationContext,
        body: u16,
        kind: BodyKind,
        flags: AnimationFlags,
    ) -> u8 {
        let cap = self.capability;
        match kind {
            BodyKind::Animal => {
                if context.walking {
                    if context.running {
                        low::RUN
                    } else {
                        low::WALK
                    }
                } else if flags.contains(AnimationFlags::IDLE_AT_8_FRAME)
                    && cap.exists(body, low::DIE_1)
                {
                    low::DIE_1
                } else if flags.contains(AnimationFlags::USE_UOP_ANIMATION) && !context.war_mode {
                    low::UOP_STAND
                } else {
                    low::STAND
                }
            }
            BodyKind::SeaMonster => match (context.walking, context.running) {
                (true, true) => high::SEA_RUN,
                (true, false) => high::SEA_WALK,
                (false, _) => high::SEA_STAND,
            },
            BodyKind::Monster => {
                if !context.walking {
                    high::STAND
                } else if context.flying && cap.exists(body, high::FLY) {
                    high::FLY
                } else {
                    high::WALK
                }
            }
            BodyKind::Human | BodyKind::Equipment | BodyKind::Unknown => {
                self.people_locomotion_group(context, body)
            }
        }
    }

    fn people_locomotion_group(&self, context: &AnimationContext, body: u16) -> u8 {
        let cap = self.capability;
        if context.mounted {
            return match (context.walking, context.running) {
                (true, true) => people::ONMOUNT_RIDE_FAST,
                (true, false) => people::ONMOUNT_RIDE_SLOW,
                (false, _) if cap.exists(body, people::ONMOUNT_STAND) => people::ONMOUNT_STAND,
                (false, _) => people::STAND,
            };
        }

        if !context.walking {
            if context.war_mode && !context.dead {
                let two_handed = context
                    .hands
                    .two_handed
                    .is_some_and(|id| !remap::is_light_source(id));
                return if two_handed {
                    people::STAND_TWO_HANDED_ATTACK
                } else {
                    people::STAND_ONE_HANDED_ATTACK
                };
            }
            return people::STAND;
        }

        if context.war_mode && !context.running && !context.dead {
            return people::WALK_WARMODE;
        }

        let armed = context
            .hands
            .ids()
            .into_iter()
            .flatten()
            .any(|id| !remap::is_bare_hand(id));
        let walk = if armed {
            people::WALK_ARMED
        } else {
            people::WALK_UNARMED
        };
        if !context.running {
            return walk;
        }
        let run = if armed {
            people::RUN_ARMED
        } else {
            people::RUN_UNARMED
        };
        if cap.exists(body, run) {
            run
        } else {
            walk
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::capability::AnimationTable;
    use crate::animation::groups::GroupFamily;

    const HUMAN: u16 = 0x0190;
    const WOLF: u16 = 0x00E1;
    const DRAGON: u16 = 0x000C;
    const SERPENT: u16 = 0x0096;

    fn table() -> AnimationTable {
        let people_groups: Vec<u8> = (0..35).collect();
        AnimationTable::new(0x0800)
            .with_body(HUMAN, BodyKind::Human, AnimationFlags::empty(), &people_groups, 10)
            .with_body(
                WOLF,
                BodyKind::Animal,
                AnimationFlags::USE_UOP_ANIMATION,
                &[0, 1, 2, 3, 5, 6, 8, 9, 10, 25],
                8,
            )
            .with_body(DRAGON, BodyKind::Monster, AnimationFlags::CAN_FLY, &[0, 1, 2, 4, 5, 12, 19], 6)
            .with_body(SERPENT, BodyKind::SeaMonster, AnimationFlags::empty(), &[0, 1, 2], 6)
    }

    fn resolve(table: &AnimationTable, context: AnimationContext) -> u8 {
        AnimationGroupResolver::new(table).resolve_group(&context)
    }

    #[test]
    fn uop_animal_idles_on_its_stand_loop() {
        let table = table();
        let context = AnimationContext::standing(WOLF, Direction::South);
        assert_eq!(resolve(&table, context), 25);
        let war = AnimationContext {
            war_mode: true,
            ..context
        };
        assert_eq!(resolve(&table, war), 2);
    }

    #[test]
    fn idle_at_8_frame_wins_over_uop() {
        let table = table().with_body(
            0x00E2,
            BodyKind::Animal,
            AnimationFlags::IDLE_AT_8_FRAME | AnimationFlags::USE_UOP_ANIMATION,
            &[0, 8, 25],
            8,
        );
        let context = AnimationContext::standing(0x00E2, Direction::South);
        assert_eq!(resolve(&table, context), 8);
    }

    #[test]
    fn animal_and_sea_monster_locomotion() {
        let table = table();
        let walking = AnimationContext {
            walking: true,
            ..AnimationContext::standing(WOLF, Direction::North)
        };
        assert_eq!(resolve(&table, walking), 0);
        assert_eq!(resolve(&table, AnimationContext { running: true, ..walking }), 1);
        let sea = AnimationContext {
            body: SERPENT,
            ..walking
        };
        assert_eq!(resolve(&table, sea), 0);
        assert_eq!(resolve(&table, AnimationContext { running: true, ..sea }), 1);
        assert_eq!(resolve(&table, AnimationContext::standing(SERPENT, Direction::North)), 2);
    }

    #[test]
    fn monster_flies_when_it_can() {
        let table = table();
        let walking = AnimationContext {
            walking: true,
            ..AnimationContext::standing(DRAGON, Direction::East)
        };
        assert_eq!(resolve(&table, walking), 0);
        assert_eq!(resolve(&table, AnimationContext { flying: true, ..walking }), 19);
        assert_eq!(resolve(&table, AnimationContext::standing(DRAGON, Direction::East)), 1);
    }

    #[test]
    fn human_peace_and_war_stances() {
        let table = table();
        let standing = AnimationContext::standing(HUMAN, Direction::South);
        assert_eq!(resolve(&table, standing), 4);
        let war = AnimationContext {
            war_mode: true,
            ..standing
        };
        assert_eq!(resolve(&table, war), 7);
        let halberd = AnimationContext {
            hands: HandItems {
                one_handed: None,
                two_handed: Some(0x0260),
            },
            ..war
        };
        assert_eq!(resolve(&table, halberd), 8);
        let torch = AnimationContext {
            hands: HandItems {
                one_handed: None,
                two_handed: Some(0x0241),
            },
            ..war
        };
        assert_eq!(resolve(&table, torch), 7);
        assert_eq!(resolve(&table, AnimationContext { dead: true, ..war }), 4);
    }

    #[test]
    fn human_walk_and_run_depend_on_armament() {
        let table = table();
        let walking = AnimationContext {
            walking: true,
            ..AnimationContext::standing(HUMAN, Direction::West)
        };
        assert_eq!(resolve(&table, walking), 0);
        let bare = AnimationContext {
            hands: HandItems {
                one_handed: Some(0x0263),
                two_handed: None,
            },
            ..walking
        };
        assert_eq!(resolve(&table, bare), 0);
        let sword = AnimationContext {
            hands: HandItems {
                one_handed: Some(0x0201),
                two_handed: None,
            },
            ..walking
        };
        assert_eq!(resolve(&table, sword), 1);
        assert_eq!(resolve(&table, AnimationContext { running: true, ..sword }), 3);
        assert_eq!(resolve(&table, AnimationContext { running: true, ..walking }), 2);
        let war_walk = AnimationContext {
            war_mode: true,
            ..sword
        };
        assert_eq!(resolve(&table, war_walk), 15);
        assert_eq!(resolve(&table, AnimationContext { running: true, ..war_walk }), 3);
    }

    #[test]
    fn missing_run_falls_back_to_walk() {
        let table = AnimationTable::new(0x0800).with_body(
            HUMAN,
            BodyKind::Human,
            AnimationFlags::empty(),
            &[0, 1, 4],
            10,
        );
        let running = AnimationContext {
            walking: true,
            running: true,
            ..AnimationContext::standing(HUMAN, Direction::West)
        };
        assert_eq!(resolve(&table, running), 0);
    }

    #[test]
    fn mounted_stand_falls_back_when_missing() {
        let table = table();
        let mounted = AnimationContext {
            mounted: true,
            ..AnimationContext::standing(HUMAN, Direction::North)
        };
        assert_eq!(resolve(&table, mounted), 25);
        assert_eq!(resolve(&table, AnimationContext { walking: true, ..mounted }), 23);
        assert_eq!(
            resolve(&table, AnimationContext { walking: true, running: true, ..mounted }),
            24
        );
        let sparse = AnimationTable::new(0x0800).with_body(
            HUMAN,
            BodyKind::Human,
            AnimationFlags::empty(),
            &[4],
            10,
        );
        assert_eq!(resolve(&sparse, mounted), 4);
    }

    #[test]
    fn gargoyle_flight_is_applied_last() {
        let table = table();
        let flying = AnimationContext {
            gargoyle: true,
            flying: true,
            ..AnimationContext::standing(HUMAN, Direction::North)
        };
        assert_eq!(resolve(&table, flying), 64);
        assert_eq!(resolve(&table, AnimationContext { walking: true, ..flying }), 62);
        let hit = AnimationContext {
            directed_group: people::GET_HIT,
            from_server: true,
            ..flying
        };
        assert_eq!(resolve(&table, hit), 77);
    }

    #[test]
    fn server_cast_on_monster_becomes_attack() {
        let table = table().with_body(
            0x0010,
            BodyKind::Monster,
            AnimationFlags::empty(),
            &[1, 4],
            5,
        );
        let cast = AnimationContext {
            directed_group: 12,
            from_server: true,
            ..AnimationContext::standing(0x0010, Direction::South)
        };
        assert_eq!(resolve(&table, cast), 4);
        let human_cast = table.with_body(
            0x0011,
            BodyKind::Monster,
            AnimationFlags::HUMAN_CAST_GROUP,
            &[1, 12],
            5,
        );
        assert_eq!(
            resolve(&human_cast, AnimationContext { body: 0x0011, ..cast }),
            12
        );
    }

    #[test]
    fn server_group_replacement_uses_family_table() {
        let table = table().with_replacement(GroupFamily::People, 30, 0xFF);
        let turn = AnimationContext {
            directed_group: 30,
            from_server: true,
            ..AnimationContext::standing(HUMAN, Direction::North)
        };
        assert_eq!(resolve(&table, turn), 0);
        let animal = AnimationContext {
            body: WOLF,
            directed_group: 24,
            ..turn
        };
        assert_eq!(resolve(&table, animal), 1);
    }

    #[test]
    fn idle_directed_group_is_corrected_and_dropped_while_walking() {
        let table = table();
        let fidget = AnimationContext {
            directed_group: 18,
            from_server: false,
            ..AnimationContext::standing(DRAGON, Direction::North)
        };
        assert_eq!(resolve(&table, fidget), 1);
        assert_eq!(resolve(&table, AnimationContext { walking: true, ..fidget }), 0);
    }

    #[test]
    fn flags_coerce_body_kind() {
        let table = AnimationTable::new(0x0800)
            .with_body(
                0x0020,
                BodyKind::Monster,
                AnimationFlags::CALCULATE_OFFSET_BY_LOW_GROUP | AnimationFlags::USE_UOP_ANIMATION,
                &[0, 2, 25],
                4,
            )
            .with_body(
                0x0021,
                BodyKind::Monster,
                AnimationFlags::CALCULATE_OFFSET_BY_PEOPLE_GROUP,
                &[4],
                4,
            );
        assert_eq!(resolve(&table, AnimationContext::standing(0x0020, Direction::North)), 25);
        assert_eq!(resolve(&table, AnimationContext::standing(0x0021, Direction::North)), 4);
    }

    #[test]
    fn conversion_reads_the_target_body() {
        let table = table()
            .with_body(0x0300, BodyKind::Human, AnimationFlags::empty(), &[], 0)
            .with_conversion(0x0300, WOLF);
        assert_eq!(resolve(&table, AnimationContext::standing(0x0300, Direction::North)), 25);
    }

    #[test]
    fn resolution_is_total() {
        let table = table();
        let resolver = AnimationGroupResolver::new(&table);
        let playback = Playback::new();
        let bodies = [0u16, HUMAN, WOLF, DRAGON, SERPENT, 0x07FF, 0x0800, u16::MAX];
        let mut seed = 0x2545_F491_u32;
        for body in bodies {
            for _ in 0..200 {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                let bits = seed >> 8;
                let context = AnimationContext {
                    body,
                    direction: Direction::from_byte(bits as u8),
                    walking: bits & 0x100 != 0,
                    running: bits & 0x200 != 0,
                    mounted: bits & 0x400 != 0,
                    war_mode: bits & 0x800 != 0,
                    dead: bits & 0x1000 != 0,
                    flying: bits & 0x2000 != 0,
                    gargoyle: bits & 0x4000 != 0,
                    hands: HandItems {
                        one_handed: (bits & 0x8000 != 0).then_some(0x0201),
                        two_handed: (bits & 0x1_0000 != 0).then_some(0x0241),
                    },
                    directed_group: (bits >> 17) as u8,
                    from_server: bits & 0x2_0000 != 0,
                };
                let outcome = resolver.resolve(&context, &playback);
                assert!(outcome.direction <= 4);
                if body >= 0x0800 {
                    assert_eq!(outcome.group, 0);
                }
            }
        }
    }

    #[test]
    fn mirrored_directions() {
        assert_eq!(direction_and_mirror(Direction::East), (1, true));
        assert_eq!(direction_and_mirror(Direction::South), (1, false));
        assert_eq!(direction_and_mirror(Direction::Northeast), (2, true));
        assert_eq!(direction_and_mirror(Direction::Southwest), (2, false));
        assert_eq!(direction_and_mirror(Direction::North), (3, true));
        assert_eq!(direction_and_mirror(Direction::West), (3, false));
        assert_eq!(direction_and_mirror(Direction::Southeast), (0, false));
        assert_eq!(direction_and_mirror(Direction::Northwest), (4, false));
    }
}
