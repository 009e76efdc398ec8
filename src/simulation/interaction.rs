//! Per-frame focus, prompt and interact handling

use glam::Vec3;
use tracing::trace;

use crate::core::config::InteractionConfig;
use crate::core::types::InteractableId;
use crate::interact::{Interact, InteractionEvent};
use crate::world::World;

/// Outcome of one interaction frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionFrame {
    pub focus: Option<InteractableId>,
    /// Prompt for the focused entity, empty when nothing is focused
    pub prompt: String,
    pub event: Option<InteractionEvent>,
}

/// Find what the player looks at, highlight it and use it on request
///
/// The prompt is read before interacting, so it describes the state the
/// player saw when pressing the key.
pub fn process_interaction(
    world: &mut World,
    position: Vec3,
    forward: Vec3,
    interact_pressed: bool,
    config: &InteractionConfig,
) -> InteractionFrame {
    let focus = world.nearest_interactable_in_cone(
        position,
        forward,
        config.max_distance,
        config.view_cone_dot,
    );
    world.set_focus(focus);

    let Some(id) = focus else {
        return InteractionFrame::default();
    };

    let prompt = world
        .get(id)
        .map(|entity| entity.interaction_text())
        .unwrap_or_default();
    trace!(?id, %prompt, "Focused");

    let event = if interact_pressed {
        world.interact(id)
    } else {
        None
    };

    InteractionFrame {
        focus,
        prompt,
        event,
    }
}
