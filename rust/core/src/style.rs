// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Resolved surface styles
//!
//! A style is the visual-appearance record the provider resolved for a
//! piece of geometry: a name plus optional colour/shininess/opacity
//! attributes. Styles are provider-owned and read-only to the pipeline.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGB colour with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Colour {
    /// Create a new colour
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// A named visual-appearance descriptor, independent of any specific mesh.
///
/// Every attribute except the name is optional; absent attributes are left
/// to the host's material defaults rather than substituted here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Style {
    /// Display name, e.g. the surface-style label from the source model
    pub name: String,
    /// Diffuse colour
    pub diffuse: Option<Colour>,
    /// Specular colour
    pub specular: Option<Colour>,
    /// Shininess factor in `[0, 1]`
    pub specularity: Option<f32>,
    /// Transparency in `[0, 1]`; opacity is `1 - transparency`
    pub transparency: Option<f32>,
}

impl Style {
    /// Create a style carrying only a name, with no appearance attributes
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            diffuse: None,
            specular: None,
            specularity: None,
            transparency: None,
        }
    }

    /// Set the diffuse colour
    pub fn with_diffuse(mut self, r: f32, g: f32, b: f32) -> Self {
        self.diffuse = Some(Colour::new(r, g, b));
        self
    }

    /// Set the specular colour
    pub fn with_specular(mut self, r: f32, g: f32, b: f32) -> Self {
        self.specular = Some(Colour::new(r, g, b));
        self
    }

    /// Set the shininess factor
    pub fn with_specularity(mut self, specularity: f32) -> Self {
        self.specularity = Some(specularity);
        self
    }

    /// Set the transparency
    pub fn with_transparency(mut self, transparency: f32) -> Self {
        self.transparency = Some(transparency);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_style_has_no_attributes() {
        let style = Style::named("Concrete");
        assert_eq!(style.name, "Concrete");
        assert!(style.diffuse.is_none());
        assert!(style.specular.is_none());
        assert!(style.specularity.is_none());
        assert!(style.transparency.is_none());
    }

    #[test]
    fn test_builder_attributes() {
        let style = Style::named("Glass")
            .with_diffuse(0.6, 0.7, 0.8)
            .with_transparency(0.9);
        assert_eq!(style.diffuse, Some(Colour::new(0.6, 0.7, 0.8)));
        assert_eq!(style.transparency, Some(0.9));
        assert!(style.specularity.is_none());
    }
}
