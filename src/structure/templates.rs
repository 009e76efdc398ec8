//! Authored house layout: floors, rooms and what sits in them
//!
//! Coordinates are relative to the house origin.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::types::SurfaceTag;
use crate::interact::ItemKind;

/// A door hinge point with a stable name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorAnchor {
    pub name: String,
    /// Floor-level point at the middle of the doorway
    pub position: Vec3,
    /// Key id the door starts locked behind
    pub locked_with: Option<String>,
}

impl DoorAnchor {
    fn open(name: &str, position: Vec3) -> Self {
        Self {
            name: name.to_string(),
            position,
            locked_with: None,
        }
    }

    fn locked(name: &str, position: Vec3, key_id: &str) -> Self {
        Self {
            name: name.to_string(),
            position,
            locked_with: Some(key_id.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub position: Vec3,
    pub size: Vec3,
    pub doors: Vec<DoorAnchor>,
    pub windows: Vec<Vec3>,
    pub item_spawns: Vec<Vec3>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub level: i32,
    /// Height of the floor surface above the origin
    pub height: f32,
    pub rooms: Vec<Room>,
}

impl Floor {
    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.name == name)
    }
}

/// Item placed on a room's spawn point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: ItemKind,
    pub description: &'static str,
    pub room: &'static str,
    pub spawn: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropTemplateKind {
    Switch { on: bool },
    Container { contents: &'static [&'static str] },
    Readable { text: &'static str },
    Generic { prompt: &'static str },
}

/// Prop placed at an explicit point
#[derive(Debug, Clone, PartialEq)]
pub struct PropTemplate {
    pub label: &'static str,
    pub position: Vec3,
    pub kind: PropTemplateKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColliderTemplate {
    pub min: Vec3,
    pub max: Vec3,
    pub tag: SurfaceTag,
}

pub const KITCHEN_EXTERIOR_KEY: &str = "key_rusty_01";

/// Items lifted this far above their spawn point so they rest on the surface
pub const ITEM_SPAWN_LIFT: f32 = 0.1;

pub fn house_floors() -> Vec<Floor> {
    let ground = Floor {
        level: 0,
        height: 0.0,
        rooms: vec![
            Room {
                name: "Master Bedroom".into(),
                position: Vec3::new(0.0, 0.0, 0.0),
                size: Vec3::new(5.0, 3.0, 5.0),
                doors: vec![DoorAnchor::open("bedroom_hallway", Vec3::new(2.5, 0.0, 2.5))],
                windows: vec![Vec3::new(2.5, 1.5, 0.0)],
                item_spawns: vec![
                    // Desk
                    Vec3::new(1.0, 0.8, 1.0),
                    // Bedside table
                    Vec3::new(4.0, 0.5, 1.0),
                    // Closet
                    Vec3::new(3.5, 0.0, 4.0),
                ],
            },
            Room {
                name: "Hallway".into(),
                position: Vec3::new(0.0, 0.0, 5.0),
                size: Vec3::new(10.0, 3.0, 2.0),
                doors: vec![
                    DoorAnchor::open("hallway_bedroom", Vec3::new(2.5, 0.0, 0.0)),
                    DoorAnchor::open("hallway_bathroom", Vec3::new(7.5, 0.0, 0.0)),
                    DoorAnchor::open("hallway_stairs", Vec3::new(5.0, 0.0, 2.0)),
                    DoorAnchor::open("hallway_living_room", Vec3::new(0.0, 0.0, 1.0)),
                ],
                windows: Vec::new(),
                item_spawns: Vec::new(),
            },
            Room {
                name: "Bathroom".into(),
                position: Vec3::new(5.0, 0.0, 5.0),
                size: Vec3::new(3.0, 3.0, 3.0),
                doors: vec![DoorAnchor::open("bathroom_hallway", Vec3::new(0.0, 0.0, 1.5))],
                windows: vec![Vec3::new(6.5, 1.8, 8.0)],
                item_spawns: Vec::new(),
            },
            Room {
                name: "Living Room".into(),
                position: Vec3::new(-5.0, 0.0, 5.0),
                size: Vec3::new(5.0, 3.0, 6.0),
                doors: vec![
                    DoorAnchor::open("living_room_hallway", Vec3::new(5.0, 0.0, 2.0)),
                    DoorAnchor::open("living_room_kitchen", Vec3::new(-2.5, 0.0, 6.0)),
                ],
                windows: vec![Vec3::new(-10.0, 1.5, 8.0)],
                item_spawns: vec![
                    // Coffee table
                    Vec3::new(-6.0, 0.4, 7.0),
                    // Fireplace
                    Vec3::new(-8.0, 0.0, 8.0),
                ],
            },
            Room {
                name: "Kitchen".into(),
                position: Vec3::new(-5.0, 0.0, 10.0),
                size: Vec3::new(5.0, 3.0, 4.0),
                doors: vec![
                    DoorAnchor::open("kitchen_living_room", Vec3::new(-2.5, 0.0, 0.0)),
                    DoorAnchor::locked(
                        "kitchen_exterior",
                        Vec3::new(-5.0, 0.0, 5.0),
                        KITCHEN_EXTERIOR_KEY,
                    ),
                ],
                windows: vec![Vec3::new(-7.5, 1.5, 14.0)],
                item_spawns: vec![
                    // Counter
                    Vec3::new(-7.0, 0.9, 11.0),
                ],
            },
        ],
    };

    let attic = Floor {
        level: 1,
        height: 3.5,
        rooms: vec![Room {
            name: "Attic".into(),
            position: Vec3::new(0.0, 3.5, 0.0),
            size: Vec3::new(10.0, 2.5, 8.0),
            doors: vec![DoorAnchor::open("attic_stairs", Vec3::new(5.0, 3.5, 4.0))],
            windows: Vec::new(),
            item_spawns: vec![
                // Old boxes
                Vec3::new(2.0, 4.0, 3.0),
                // Corner by the chimney
                Vec3::new(-3.0, 4.0, 2.0),
            ],
        }],
    };

    vec![ground, attic]
}

pub const HOUSE_ITEMS: &[ItemTemplate] = &[
    ItemTemplate {
        id: "flashlight_01",
        name: "Flashlight",
        kind: ItemKind::Misc,
        description: "A battery-powered flashlight. Essential for exploring dark areas.",
        room: "Master Bedroom",
        spawn: 0,
    },
    ItemTemplate {
        id: "battery_01",
        name: "Battery",
        kind: ItemKind::Battery,
        description: "A fresh AA battery. Can be used to recharge the flashlight.",
        room: "Master Bedroom",
        spawn: 1,
    },
    ItemTemplate {
        id: KITCHEN_EXTERIOR_KEY,
        name: "Rusty Key",
        kind: ItemKind::Key,
        description: "An old rusty key. Might open something important.",
        room: "Living Room",
        spawn: 0,
    },
    ItemTemplate {
        id: "doc_research_01",
        name: "Research Notes",
        kind: ItemKind::Document,
        description: "A crumpled piece of paper with illegible handwriting...",
        room: "Attic",
        spawn: 0,
    },
    ItemTemplate {
        id: "battery_02",
        name: "Battery",
        kind: ItemKind::Battery,
        description: "A fresh AA battery. Can be used to recharge the flashlight.",
        room: "Kitchen",
        spawn: 0,
    },
];

pub fn house_props() -> Vec<PropTemplate> {
    vec![
        PropTemplate {
            label: "hallway light switch",
            position: Vec3::new(0.2, 1.4, 6.0),
            kind: PropTemplateKind::Switch { on: false },
        },
        PropTemplate {
            label: "bedroom closet",
            position: Vec3::new(3.5, 1.0, 4.0),
            kind: PropTemplateKind::Container {
                contents: &["moth-eaten coat", "shoebox of letters"],
            },
        },
        PropTemplate {
            label: "scorched letter",
            position: Vec3::new(-8.0, 0.3, 8.0),
            kind: PropTemplateKind::Readable {
                text: "If you are reading this, do not open the attic.",
            },
        },
        PropTemplate {
            label: "porcelain doll",
            position: Vec3::new(-3.0, 4.2, 2.0),
            kind: PropTemplateKind::Generic {
                prompt: "Press [E] to examine the doll",
            },
        },
    ]
}

pub fn house_colliders() -> Vec<ColliderTemplate> {
    let wall = |min: Vec3, max: Vec3| ColliderTemplate {
        min,
        max,
        tag: SurfaceTag::Wall,
    };

    vec![
        ColliderTemplate {
            min: Vec3::new(-15.0, -0.1, -5.0),
            max: Vec3::new(10.0, 0.0, 20.0),
            tag: SurfaceTag::Floor,
        },
        ColliderTemplate {
            min: Vec3::new(0.0, 3.4, 0.0),
            max: Vec3::new(10.0, 3.5, 8.0),
            tag: SurfaceTag::Floor,
        },
        // Bedroom west
        wall(Vec3::new(-0.1, 0.0, 0.0), Vec3::new(0.0, 3.0, 5.0)),
        // Bedroom north
        wall(Vec3::new(0.0, 0.0, -0.1), Vec3::new(5.0, 3.0, 0.0)),
        // Bedroom east
        wall(Vec3::new(5.0, 0.0, 0.0), Vec3::new(5.1, 3.0, 5.0)),
        // Kitchen back
        wall(Vec3::new(-5.0, 0.0, 14.0), Vec3::new(0.0, 3.0, 14.1)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_templates_resolve() {
        let floors = house_floors();
        for template in HOUSE_ITEMS {
            let room = floors
                .iter()
                .find_map(|floor| floor.room(template.room))
                .unwrap_or_else(|| panic!("unknown room {}", template.room));
            assert!(template.spawn < room.item_spawns.len(), "{}", template.id);
        }
    }

    #[test]
    fn test_door_names_unique() {
        let mut names: Vec<String> = house_floors()
            .into_iter()
            .flat_map(|floor| floor.rooms)
            .flat_map(|room| room.doors)
            .map(|door| door.name)
            .collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(total, 11);
    }

    #[test]
    fn test_only_exterior_door_locked() {
        let locked: Vec<DoorAnchor> = house_floors()
            .into_iter()
            .flat_map(|floor| floor.rooms)
            .flat_map(|room| room.doors)
            .filter(|door| door.locked_with.is_some())
            .collect();
        assert_eq!(locked.len(), 1);
        assert_eq!(locked[0].name, "kitchen_exterior");
    }

    #[test]
    fn test_colliders_are_well_formed() {
        for collider in house_colliders() {
            assert!(collider.min.cmple(collider.max).all());
        }
    }

    #[test]
    fn test_collider_template_carries_custom_tag() {
        let stairs = ColliderTemplate {
            min: Vec3::new(4.0, 0.0, 6.0),
            max: Vec3::new(5.0, 3.5, 7.0),
            tag: SurfaceTag::Custom("stairs".into()),
        };
        let copy = stairs.clone();
        assert_eq!(copy, stairs);
        assert_eq!(copy.tag.as_str(), "stairs");
    }
}
