//! Materials and the library that hands them out
//!
//! A [`Material`] is a named bag of uniforms. Backends decide what the
//! uniforms mean; the software backend only reads [`COLOR_UNIFORM`].

use crate::error::RenderError;
use glam::Vec4;
use prism_core::Color;
use std::collections::HashMap;

/// Unlit material that fills geometry with its `"Color"` uniform.
pub const FLAT_MATERIAL: &str = "Flat";

/// Uniform holding a material's fill color.
pub const COLOR_UNIFORM: &str = "Color";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Uniform {
    Float(f32),
    Vec4(Vec4),
    Color(Color),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    name: String,
    uniforms: HashMap<String, Uniform>,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uniforms: HashMap::new(),
        }
    }

    /// Flat material filled with `color`.
    pub fn flat(color: Color) -> Self {
        let mut material = Self::new(FLAT_MATERIAL);
        material.set_color(COLOR_UNIFORM, color);
        material
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_uniform(&mut self, name: &str, value: Uniform) {
        match self.uniforms.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.uniforms.insert(name.to_string(), value);
            }
        }
    }

    pub fn uniform(&self, name: &str) -> Option<&Uniform> {
        self.uniforms.get(name)
    }

    pub fn set_color(&mut self, name: &str, color: Color) {
        self.set_uniform(name, Uniform::Color(color));
    }

    /// Read a color uniform; `Vec4` uniforms are interpreted as RGBA.
    pub fn color(&self, name: &str) -> Option<Color> {
        match self.uniforms.get(name)? {
            Uniform::Color(color) => Some(*color),
            Uniform::Vec4(v) => Some(Color::new(v.x, v.y, v.z, v.w)),
            Uniform::Float(_) => None,
        }
    }
}

/// Named material templates. Callers receive their own instance so uniform
/// edits never leak into other users of the same template.
#[derive(Debug, Clone)]
pub struct MaterialLibrary {
    templates: HashMap<String, Material>,
}

impl MaterialLibrary {
    /// Library with no materials at all.
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Library preloaded with the built-in [`FLAT_MATERIAL`].
    pub fn with_builtins() -> Self {
        let mut library = Self::empty();
        library.register(Material::flat(Color::WHITE));
        library
    }

    /// Register a template under its own name, replacing any previous one.
    pub fn register(&mut self, material: Material) {
        self.templates.insert(material.name().to_string(), material);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn instantiate(&self, name: &str) -> Result<Material, RenderError> {
        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| RenderError::UnknownMaterial {
                name: name.to_string(),
            })
    }
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self::with_builtins()
    }
}
