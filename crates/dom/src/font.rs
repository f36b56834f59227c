//! Font faces and per-document font registries

use crate::{DomError, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Load status of a font face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFaceStatus {
    Unloaded,
    Loading,
    Loaded,
    Error,
}

/// A single font face entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFace {
    family: String,
    source: String,
    weight: String,
    style: String,
    status: FontFaceStatus,
    /// Set for faces that originate from an `@font-face` rule
    #[serde(default)]
    css_connected: bool,
}

impl FontFace {
    /// Create a script-constructed face
    pub fn new(family: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            source: source.into(),
            weight: "normal".to_string(),
            style: "normal".to_string(),
            status: FontFaceStatus::Unloaded,
            css_connected: false,
        }
    }

    /// Create a face that belongs to an `@font-face` rule of its document
    pub fn from_css_rule(family: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            css_connected: true,
            status: FontFaceStatus::Loaded,
            ..Self::new(family, source)
        }
    }

    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = weight.into();
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn with_status(mut self, status: FontFaceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn weight(&self) -> &str {
        &self.weight
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn status(&self) -> FontFaceStatus {
        self.status
    }

    pub fn is_css_connected(&self) -> bool {
        self.css_connected
    }
}

/// Font registry of one document. Clones share the same set.
#[derive(Clone, Default)]
pub struct FontFaceSet {
    faces: Rc<RefCell<Vec<FontFace>>>,
}

impl FontFaceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a script-constructed face.
    ///
    /// CSS-connected faces belong to their rule's document and are rejected
    /// with [`DomError::InvalidModification`]. Adding an equal face twice is
    /// a no-op.
    pub fn add(&self, face: FontFace) -> Result<()> {
        if face.css_connected {
            return Err(DomError::InvalidModification(format!(
                "font face '{}' is connected to a CSS rule",
                face.family
            )));
        }
        let mut faces = self.faces.borrow_mut();
        if !faces.contains(&face) {
            faces.push(face);
        }
        Ok(())
    }

    /// Record a face contributed by an `@font-face` rule of this document
    pub fn register_from_css(&self, face: FontFace) {
        let face = FontFace {
            css_connected: true,
            ..face
        };
        self.faces.borrow_mut().push(face);
    }

    pub fn delete(&self, face: &FontFace) -> bool {
        let mut faces = self.faces.borrow_mut();
        let before = faces.len();
        faces.retain(|existing| existing != face || existing.css_connected);
        faces.len() != before
    }

    /// Remove every face that was added from script
    pub fn clear(&self) {
        self.faces.borrow_mut().retain(|face| face.css_connected);
    }

    pub fn values(&self) -> Vec<FontFace> {
        self.faces.borrow().clone()
    }

    pub fn has_family(&self, family: &str) -> bool {
        self.faces
            .borrow()
            .iter()
            .any(|face| face.family == family)
    }

    pub fn len(&self) -> usize {
        self.faces.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.borrow().is_empty()
    }
}

impl fmt::Debug for FontFaceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.faces.borrow().iter()).finish()
    }
}
