use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::animation::groups::{BodyKind, GroupFamily};

bitflags! {
    /// Per-body behaviour bits from the animation data.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct AnimationFlags: u32 {
        /// Third attack variant plays the cast group.
        const ALT_ATTACK_CAST = 0x0000_0001;
        const CAN_FLY = 0x0000_0010;
        const CALCULATE_OFFSET_BY_PEOPLE_GROUP = 0x0000_0020;
        const CALCULATE_OFFSET_LOW_GROUP_EXTENDED = 0x0000_0400;
        const CALCULATE_OFFSET_BY_LOW_GROUP = 0x0000_0800;
        /// Group 12 is a real cast animation even on non-human bodies.
        const HUMAN_CAST_GROUP = 0x0000_1000;
        const IDLE_AT_8_FRAME = 0x0000_2000;
        const USE_UOP_ANIMATION = 0x0001_0000;
        const FOUND = 0x8000_0000;
    }
}

/// Redirect of one group index to another for a whole family. A `to` of
/// [`REPLACE_WITH_WALK`] means the family's walk group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupReplacement {
    pub from: u8,
    pub to: u8,
}

pub const REPLACE_WITH_WALK: u8 = 0xFF;

/// Read-only view of the loaded animation data, shared by every mobile.
pub trait AnimationCapability: Send + Sync {
    fn classify(&self, body: u16) -> BodyKind;
    fn flags(&self, body: u16) -> AnimationFlags;
    /// Whether frames exist for `group` on `body`.
    fn exists(&self, body: u16, group: u8) -> bool;
    /// Bodies at or above this id have no animation data.
    fn max_body_id(&self) -> u16;
    fn group_replacements(&self, kind: BodyKind) -> &[GroupReplacement];
    fn frame_count(&self, body: u16, group: u8, direction: u8) -> u16;

    /// Body actually drawn for `body` when the data remaps it.
    fn convert_body(&self, body: u16) -> u16 {
        body
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid animation table: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid animation table entry: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyEntry {
    pub body: u16,
    pub kind: BodyKind,
    #[serde(default)]
    pub flags: AnimationFlags,
    #[serde(default)]
    pub convert_to: Option<u16>,
    /// Frames per direction, keyed by group.
    #[serde(default)]
    pub groups: BTreeMap<u8, u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementTables {
    #[serde(default)]
    pub low: Vec<GroupReplacement>,
    #[serde(default)]
    pub people: Vec<GroupReplacement>,
}

#[derive(Debug, Clone, Deserialize)]
struct TableFile {
    max_body_id: u16,
    #[serde(default)]
    bodies: Vec<BodyEntry>,
    #[serde(default)]
    replacements: ReplacementTables,
}

/// In-memory animation data, built in code or loaded from YAML.
#[derive(Debug, Clone, Default)]
pub struct AnimationTable {
    max_body_id: u16,
    bodies: HashMap<u16, BodyEntry>,
    replacements: ReplacementTables,
}

impl AnimationTable {
    pub fn new(max_body_id: u16) -> Self {
        Self {
            max_body_id,
            bodies: HashMap::new(),
            replacements: ReplacementTables::default(),
        }
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, TableError> {
        let file: TableFile = serde_yaml::from_str(source)?;
        let mut table = Self::new(file.max_body_id);
        for entry in file.bodies {
            if entry.body >= table.max_body_id {
                return Err(TableError::Invalid(format!(
                    "body {} is not below max_body_id {}",
                    entry.body, table.max_body_id
                )));
            }
            if table.bodies.contains_key(&entry.body) {
                return Err(TableError::Invalid(format!("body {} listed twice", entry.body)));
            }
            table.bodies.insert(entry.body, entry);
        }
        table.replacements = file.replacements;
        Ok(table)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| TableError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&source)
    }

    pub fn insert_body(&mut self, entry: BodyEntry) {
        self.bodies.insert(entry.body, entry);
    }

    /// Adds a body with `frames` frames in each of `groups`.
    pub fn with_body(
        mut self,
        body: u16,
        kind: BodyKind,
        flags: AnimationFlags,
        groups: &[u8],
        frames: u16,
    ) -> Self {
        self.insert_body(BodyEntry {
            body,
            kind,
            flags,
            convert_to: None,
            groups: groups.iter().map(|group| (*group, frames)).collect(),
        });
        self
    }

    pub fn with_conversion(mut self, body: u16, convert_to: u16) -> Self {
        if let Some(entry) = self.bodies.get_mut(&body) {
            entry.convert_to = Some(convert_to);
        }
        self
    }

    pub fn with_replacement(mut self, family: GroupFamily, from: u8, to: u8) -> Self {
        let replacement = GroupReplacement { from, to };
        match family {
            GroupFamily::Low => self.replacements.low.push(replacement),
            GroupFamily::People => self.replacements.people.push(replacement),
            GroupFamily::High => {}
        }
        self
    }

    pub fn bodies(&self) -> impl Iterator<Item = &BodyEntry> + '_ {
        let mut entries: Vec<&BodyEntry> = self.bodies.values().collect();
        entries.sort_by_key(|entry| entry.body);
        entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl AnimationCapability for AnimationTable {
    fn classify(&self, body: u16) -> BodyKind {
        self.bodies
            .get(&body)
            .map(|entry| entry.kind)
            .unwrap_or(BodyKind::Unknown)
    }

    fn flags(&self, body: u16) -> AnimationFlags {
        self.bodies
            .get(&body)
            .map(|entry| entry.flags)
            .unwrap_or_default()
    }

    fn exists(&self, body: u16, group: u8) -> bool {
        self.frame_count(body, group, 0) != 0
    }

    fn max_body_id(&self) -> u16 {
        self.max_body_id
    }

    fn group_replacements(&self, kind: BodyKind) -> &[GroupReplacement] {
        match kind.family() {
            GroupFamily::Low => &self.replacements.low,
            GroupFamily::People => &self.replacements.people,
            GroupFamily::High => &[],
        }
    }

    fn frame_count(&self, body: u16, group: u8, _direction: u8) -> u16 {
        self.bodies
            .get(&body)
            .and_then(|entry| entry.groups.get(&group).copied())
            .unwrap_or(0)
    }

    fn convert_body(&self, body: u16) -> u16 {
        self.bodies
            .get(&body)
            .and_then(|entry| entry.convert_to)
            .filter(|converted| *converted < self.max_body_id)
            .unwrap_or(body)
    }
}
