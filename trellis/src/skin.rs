use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};

/// Named style registry. Each style type has its own namespace, so a
/// `ButtonStyle` and a `LabelStyle` can both be called `"default"`.
#[derive(Default)]
pub struct Skin {
    styles: HashMap<(TypeId, String), Box<dyn Any>>,
}

impl fmt::Debug for Skin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Skin")
            .field("styles", &self.styles.len())
            .finish()
    }
}

impl Skin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<T: Any>(&mut self, name: impl Into<String>, style: T) {
        self.styles
            .insert((TypeId::of::<T>(), name.into()), Box::new(style));
    }

    pub fn with<T: Any>(mut self, name: impl Into<String>, style: T) -> Self {
        self.add(name, style);
        self
    }

    pub fn get<T: Any>(&self, name: &str) -> Result<&T> {
        self.styles
            .get(&(TypeId::of::<T>(), name.to_string()))
            .and_then(|style| style.downcast_ref::<T>())
            .ok_or_else(|| Error::StyleNotFound {
                name: name.to_string(),
                kind: type_name::<T>(),
            })
    }

    pub fn has<T: Any>(&self, name: &str) -> bool {
        self.styles
            .contains_key(&(TypeId::of::<T>(), name.to_string()))
    }
}
