//! Props: switches, containers, readables and generic triggers

use glam::Vec3;

use crate::interact::base::{Interact, InteractableBase, InteractableType, InteractionEvent};

pub const PROP_INTERACT_DISTANCE: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub enum PropKind {
    Switch { on: bool },
    /// Contents are handed out the first time the container is opened
    Container { open: bool, contents: Vec<String> },
    Readable { text: String },
    Generic { prompt: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prop {
    base: InteractableBase,
    label: String,
    kind: PropKind,
}

impl Prop {
    pub fn new(label: impl Into<String>, kind: PropKind, position: Vec3) -> Self {
        Self {
            base: InteractableBase::new(position, PROP_INTERACT_DISTANCE),
            label: label.into(),
            kind,
        }
    }

    pub fn switch(label: impl Into<String>, position: Vec3, on: bool) -> Self {
        Self::new(label, PropKind::Switch { on }, position)
    }

    pub fn container(label: impl Into<String>, position: Vec3, contents: Vec<String>) -> Self {
        Self::new(
            label,
            PropKind::Container {
                open: false,
                contents,
            },
            position,
        )
    }

    pub fn readable(label: impl Into<String>, position: Vec3, text: impl Into<String>) -> Self {
        Self::new(label, PropKind::Readable { text: text.into() }, position)
    }

    pub fn generic(label: impl Into<String>, position: Vec3, prompt: impl Into<String>) -> Self {
        Self::new(
            label,
            PropKind::Generic {
                prompt: prompt.into(),
            },
            position,
        )
    }

    pub fn with_interact_distance(mut self, distance: f32) -> Self {
        self.base.interact_distance = distance;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &PropKind {
        &self.kind
    }

    /// For switches: whether it is on
    pub fn is_on(&self) -> Option<bool> {
        match self.kind {
            PropKind::Switch { on } => Some(on),
            _ => None,
        }
    }
}

impl Interact for Prop {
    fn base(&self) -> &InteractableBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InteractableBase {
        &mut self.base
    }

    fn interactable_type(&self) -> InteractableType {
        match self.kind {
            PropKind::Switch { .. } => InteractableType::Switch,
            PropKind::Container { .. } => InteractableType::Container,
            PropKind::Readable { .. } => InteractableType::Readable,
            PropKind::Generic { .. } => InteractableType::Generic,
        }
    }

    fn can_interact(&self) -> bool {
        self.base.active
    }

    fn interact(&mut self) -> Option<InteractionEvent> {
        if !self.can_interact() {
            return None;
        }

        let label = self.label.clone();
        let event = match &mut self.kind {
            PropKind::Switch { on } => {
                *on = !*on;
                InteractionEvent::SwitchToggled { label, on: *on }
            }
            PropKind::Container { open, contents } => {
                *open = !*open;
                if *open {
                    InteractionEvent::ContainerOpened {
                        label,
                        contents: std::mem::take(contents),
                    }
                } else {
                    InteractionEvent::ContainerClosed { label }
                }
            }
            PropKind::Readable { text } => InteractionEvent::Read {
                title: label,
                text: text.clone(),
            },
            PropKind::Generic { .. } => InteractionEvent::Used { label },
        };
        Some(event)
    }

    fn interaction_text(&self) -> String {
        match &self.kind {
            PropKind::Switch { on: true } => format!("Press [E] to turn off {}", self.label),
            PropKind::Switch { on: false } => format!("Press [E] to turn on {}", self.label),
            PropKind::Container { open: false, .. } => format!("Press [E] to open {}", self.label),
            PropKind::Container { open: true, .. } => format!("Press [E] to close {}", self.label),
            PropKind::Readable { .. } => format!("Press [E] to read {}", self.label),
            PropKind::Generic { prompt } => prompt.clone(),
        }
    }
}
