use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Layer {
    OneHanded = 0x01,
    TwoHanded = 0x02,
    Shoes = 0x03,
    Pants = 0x04,
    Shirt = 0x05,
    Helmet = 0x06,
    Gloves = 0x07,
    Ring = 0x08,
    Talisman = 0x09,
    Necklace = 0x0A,
    Hair = 0x0B,
    Waist = 0x0C,
    Torso = 0x0D,
    Bracelet = 0x0E,
    Face = 0x0F,
    Beard = 0x10,
    Tunic = 0x11,
    Earrings = 0x12,
    Arms = 0x13,
    Cloak = 0x14,
    Backpack = 0x15,
    Robe = 0x16,
    Skirt = 0x17,
    Legs = 0x18,
    Mount = 0x19,
}

pub const LAYER_SLOTS: usize = Layer::Mount as usize + 1;

impl Layer {
    pub fn from_byte(value: u8) -> Option<Self> {
        let layer = match value {
            0x01 => Layer::OneHanded,
            0x02 => Layer::TwoHanded,
            0x03 => Layer::Shoes,
            0x04 => Layer::Pants,
            0x05 => Layer::Shirt,
            0x06 => Layer::Helmet,
            0x07 => Layer::Gloves,
            0x08 => Layer::Ring,
            0x09 => Layer::Talisman,
            0x0A => Layer::Necklace,
            0x0B => Layer::Hair,
            0x0C => Layer::Waist,
            0x0D => Layer::Torso,
            0x0E => Layer::Bracelet,
            0x0F => Layer::Face,
            0x10 => Layer::Beard,
            0x11 => Layer::Tunic,
            0x12 => Layer::Earrings,
            0x13 => Layer::Arms,
            0x14 => Layer::Cloak,
            0x15 => Layer::Backpack,
            0x16 => Layer::Robe,
            0x17 => Layer::Skirt,
            0x18 => Layer::Legs,
            0x19 => Layer::Mount,
            _ => return None,
        };
        Some(layer)
    }

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedItem {
    pub serial: u32,
    pub graphic: u16,
    /// Animation id from the tile data; 0 when the item has none.
    pub anim_id: u16,
}

/// Equipment worn by a mobile, one slot per layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Equipment {
    slots: [Option<EquippedItem>; LAYER_SLOTS],
}

/// The animation ids held in each hand, as the resolver consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandItems {
    pub one_handed: Option<u16>,
    pub two_handed: Option<u16>,
}

impl HandItems {
    pub fn ids(self) -> [Option<u16>; 2] {
        [self.one_handed, self.two_handed]
    }

    pub fn is_empty(self) -> bool {
        self.one_handed.is_none() && self.two_handed.is_none()
    }
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `item` on `layer`, returning whatever was there before.
    pub fn equip(&mut self, layer: Layer, item: EquippedItem) -> Option<EquippedItem> {
        self.slots[layer.slot()].replace(item)
    }

    pub fn unequip(&mut self, layer: Layer) -> Option<EquippedItem> {
        self.slots[layer.slot()].take()
    }

    pub fn get(&self, layer: Layer) -> Option<&EquippedItem> {
        self.slots[layer.slot()].as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.get(Layer::Mount).is_some()
    }

    pub fn hand_items(&self) -> HandItems {
        let anim = |layer: Layer| {
            self.get(layer).map(|item| {
                if item.anim_id != 0 {
                    item.anim_id
                } else {
                    item.graphic
                }
            })
        };
        HandItems {
            one_handed: anim(Layer::OneHanded),
            two_handed: anim(Layer::TwoHanded),
        }
    }

    pub fn clear(&mut self) {
        self.slots = [None; LAYER_SLOTS];
    }

    pub fn iter(&self) -> impl Iterator<Item = (Layer, &EquippedItem)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let item = slot.as_ref()?;
            Layer::from_byte(index as u8).map(|layer| (layer, item))
        })
    }
}
