use std::ops::{Deref, DerefMut};

use bevy_ecs::prelude::Component;

use crate::pets::DesktopPet;

/// An entity that is a pet of some species.
#[derive(Component)]
pub struct Pet(pub Box<dyn DesktopPet>);

impl Pet {
    pub fn new(pet: impl DesktopPet + 'static) -> Self {
        Pet(Box::new(pet))
    }
}

impl Deref for Pet {
    type Target = dyn DesktopPet;
    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl DerefMut for Pet {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}
