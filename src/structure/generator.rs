//! Instantiates the authored house into a world

use glam::Vec3;
use tracing::{debug, info, warn};

use crate::core::config::InteractionConfig;
use crate::core::types::Collider;
use crate::interact::door::DOOR_HEIGHT;
use crate::interact::{Door, Item, Prop};
use crate::structure::templates::{
    house_colliders, house_floors, house_props, Floor, PropTemplateKind, HOUSE_ITEMS,
    ITEM_SPAWN_LIFT,
};
use crate::world::World;

/// Summary of one `generate` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructureStats {
    pub doors: usize,
    pub items: usize,
    pub props: usize,
    pub colliders: usize,
}

#[derive(Debug, Clone)]
pub struct StructureGenerator {
    interaction: InteractionConfig,
    origin: Vec3,
    floors: Vec<Floor>,
}

impl StructureGenerator {
    pub fn new(interaction: InteractionConfig) -> Self {
        Self {
            interaction,
            origin: Vec3::ZERO,
            floors: Vec::new(),
        }
    }

    /// Place the house at `origin`: doors, items, props and static colliders
    pub fn generate(&mut self, world: &mut World, origin: Vec3) -> StructureStats {
        info!(x = origin.x, y = origin.y, z = origin.z, "Generating house");
        self.origin = origin;
        self.floors = house_floors()
            .into_iter()
            .map(|floor| offset_floor(floor, origin))
            .collect();

        let stats = StructureStats {
            doors: self.generate_doors(world),
            items: self.generate_items(world),
            props: self.generate_props(world),
            colliders: self.generate_colliders(world),
        };
        info!(
            doors = stats.doors,
            items = stats.items,
            props = stats.props,
            colliders = stats.colliders,
            "House generated"
        );
        stats
    }

    fn generate_doors(&self, world: &mut World) -> usize {
        let mut count = 0;
        for room in self.floors.iter().flat_map(|floor| &floor.rooms) {
            for anchor in &room.doors {
                let center = anchor.position + Vec3::new(0.0, DOOR_HEIGHT * 0.5, 0.0);
                let mut door = Door::new(anchor.name.clone(), center)
                    .with_open_angle(self.interaction.door_open_angle)
                    .with_open_speed(self.interaction.door_open_speed)
                    .with_interact_distance(self.interaction.door_interact_distance);
                if let Some(key) = &anchor.locked_with {
                    door = door.locked_with(key.clone());
                }
                world.add_door(door);
                count += 1;
            }
        }
        debug!(count, "Doors placed");
        count
    }

    fn generate_items(&self, world: &mut World) -> usize {
        let mut count = 0;
        for template in HOUSE_ITEMS {
            let spawn = self
                .floors
                .iter()
                .find_map(|floor| floor.room(template.room))
                .and_then(|room| room.item_spawns.get(template.spawn));
            let Some(&spawn) = spawn else {
                warn!(item = template.id, room = template.room, "Item spawn point missing");
                continue;
            };

            let item = Item::new(template.kind, template.name, template.id)
                .with_description(template.description)
                .with_interact_distance(self.interaction.item_interact_distance)
                .at(spawn + Vec3::new(0.0, ITEM_SPAWN_LIFT, 0.0));
            world.add_item(item);
            count += 1;
        }
        debug!(count, "Items placed");
        count
    }

    fn generate_props(&self, world: &mut World) -> usize {
        let props = house_props();
        let count = props.len();
        for template in props {
            let position = self.origin + template.position;
            let prop = match template.kind {
                PropTemplateKind::Switch { on } => Prop::switch(template.label, position, on),
                PropTemplateKind::Container { contents } => Prop::container(
                    template.label,
                    position,
                    contents.iter().map(|c| c.to_string()).collect(),
                ),
                PropTemplateKind::Readable { text } => {
                    Prop::readable(template.label, position, text)
                }
                PropTemplateKind::Generic { prompt } => {
                    Prop::generic(template.label, position, prompt)
                }
            };
            world.add_prop(prop.with_interact_distance(self.interaction.prop_interact_distance));
        }
        debug!(count, "Props placed");
        count
    }

    fn generate_colliders(&self, world: &mut World) -> usize {
        let colliders = house_colliders();
        let count = colliders.len();
        for template in colliders {
            world.add_collider(Collider::new(
                self.origin + template.min,
                self.origin + template.max,
                template.tag,
            ));
        }
        debug!(count, "House colliders placed");
        count
    }

    /// Floors of the last generated house, in world coordinates
    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }
}

fn offset_floor(mut floor: Floor, origin: Vec3) -> Floor {
    floor.height += origin.y;
    for room in &mut floor.rooms {
        room.position += origin;
        for door in &mut room.doors {
            door.position += origin;
        }
        for window in &mut room.windows {
            *window += origin;
        }
        for spawn in &mut room.item_spawns {
            *spawn += origin;
        }
    }
    floor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interact::{DoorState, Interact};

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a} != {b}");
    }

    fn generated(origin: Vec3) -> (World, StructureGenerator, StructureStats) {
        let mut world = World::new();
        let mut generator = StructureGenerator::new(InteractionConfig::default());
        let stats = generator.generate(&mut world, origin);
        (world, generator, stats)
    }

    #[test]
    fn test_house_populates_world() {
        let (world, generator, stats) = generated(Vec3::ZERO);
        assert_eq!(stats.doors, 11);
        assert_eq!(stats.items, 5);
        assert_eq!(stats.props, 4);
        assert_eq!(world.door_ids().len(), 11);
        assert_eq!(world.item_ids().len(), 5);
        assert_eq!(world.interactable_count(), 20);
        assert_eq!(world.colliders().len(), stats.colliders);
        assert_eq!(generator.floors().len(), 2);
    }

    #[test]
    fn test_flashlight_rests_on_desk() {
        let (world, _, _) = generated(Vec3::ZERO);
        let id = world.find_item("flashlight_01").unwrap();
        let flashlight = world.item(id).unwrap();
        assert_close(flashlight.position(), Vec3::new(1.0, 0.9, 1.0));
        assert_eq!(flashlight.name(), "Flashlight");
    }

    #[test]
    fn test_exterior_door_starts_locked() {
        let (world, _, _) = generated(Vec3::ZERO);
        let id = world.find_door("kitchen_exterior").unwrap();
        let door = world.door(id).unwrap();
        assert_eq!(door.state(), DoorState::Locked);
        assert_eq!(door.required_key(), Some("key_rusty_01"));

        let bedroom = world.find_door("bedroom_hallway").unwrap();
        assert_eq!(world.door(bedroom).unwrap().state(), DoorState::Closed);
    }

    #[test]
    fn test_origin_offsets_everything() {
        let origin = Vec3::new(100.0, 0.0, -40.0);
        let (world, generator, _) = generated(origin);

        let id = world.find_item("battery_01").unwrap();
        assert_close(world.item(id).unwrap().position(), origin + Vec3::new(4.0, 0.6, 1.0));

        let door = world.find_door("bedroom_hallway").unwrap();
        assert_close(
            world.door(door).unwrap().position(),
            origin + Vec3::new(2.5, DOOR_HEIGHT * 0.5, 2.5),
        );
        assert_close(world.colliders()[0].min(), origin + Vec3::new(-15.0, -0.1, -5.0));
        assert_eq!(generator.floors()[0].rooms[0].position, origin);
    }

    #[test]
    fn test_doors_use_configured_speed() {
        let mut world = World::new();
        let mut generator = StructureGenerator::new(InteractionConfig {
            door_open_speed: 900.0,
            ..InteractionConfig::default()
        });
        generator.generate(&mut world, Vec3::ZERO);

        let id = world.find_door("bedroom_hallway").unwrap();
        world.interact(id);
        world.update(0.1);
        assert_eq!(world.door(id).unwrap().state(), DoorState::Open);
    }
}
