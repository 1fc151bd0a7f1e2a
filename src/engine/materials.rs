//! Material lookup.
//!
//! Materials are created and owned by a separate manager. Nodes only refer to
//! them by name; [`resolve_material`] turns a name into the material handed to
//! the scene node.

use std::collections::HashMap;

use tracing::debug;

use crate::error::BindingError;

/// Identifier of the render context a node lives in.
pub type RenderContextId = u64;

/// Diffuse texture bound to a material.
#[derive(Debug, Clone, PartialEq)]
pub enum Texture {
    Image { uri: String },
    /// Video textures are tied to the render context that decodes them.
    Video { uri: String, context: RenderContextId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub diffuse_texture: Option<Texture>,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            diffuse_texture: None,
        }
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.diffuse_texture = Some(texture);
        self
    }

    fn has_video_texture(&self) -> bool {
        matches!(self.diffuse_texture, Some(Texture::Video { .. }))
    }
}

/// Source of named materials.
pub trait MaterialSource {
    fn material(&self, name: &str) -> Option<Material>;

    /// True when `name` was declared with a video texture.
    fn is_video_material(&self, name: &str) -> bool;

    /// Rebuild a video material so its texture decodes in `context`.
    fn recreate_video_material(&mut self, name: &str, context: RenderContextId) -> Option<Material>;
}

/// Resolve a material name for a node.
///
/// Video materials declared before any render context existed carry no video
/// texture yet; they are rebuilt against the node's context when it has one.
pub fn resolve_material(
    source: &mut dyn MaterialSource,
    name: &str,
    context: Option<RenderContextId>,
) -> Result<Material, BindingError> {
    let mut material = source.material(name);

    if source.is_video_material(name) && !material.as_ref().is_some_and(Material::has_video_texture) {
        if let Some(context) = context {
            debug!("recreating video material {} for context {}", name, context);
            material = source.recreate_video_material(name, context).or(material);
        }
    }

    material.ok_or_else(|| BindingError::MaterialNotFound(name.to_string()))
}

// =============================================================================
// MaterialRegistry
// =============================================================================

struct MaterialEntry {
    material: Material,
    video_uri: Option<String>,
}

/// In-memory material store.
#[derive(Default)]
pub struct MaterialRegistry {
    materials: HashMap<String, MaterialEntry>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a material.
    pub fn insert(&mut self, material: Material) {
        self.materials.insert(
            material.name.clone(),
            MaterialEntry {
                material,
                video_uri: None,
            },
        );
    }

    /// Register a material whose diffuse texture is the video at `uri`.
    ///
    /// The texture is created lazily on first use by a node with a render
    /// context.
    pub fn insert_video(&mut self, name: impl Into<String>, uri: impl Into<String>) {
        let name = name.into();
        self.materials.insert(
            name.clone(),
            MaterialEntry {
                material: Material::new(name),
                video_uri: Some(uri.into()),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl MaterialSource for MaterialRegistry {
    fn material(&self, name: &str) -> Option<Material> {
        self.materials.get(name).map(|entry| entry.material.clone())
    }

    fn is_video_material(&self, name: &str) -> bool {
        self.materials.get(name).is_some_and(|entry| entry.video_uri.is_some())
    }

    fn recreate_video_material(&mut self, name: &str, context: RenderContextId) -> Option<Material> {
        let entry = self.materials.get_mut(name)?;
        let uri = entry.video_uri.clone()?;
        entry.material.diffuse_texture = Some(Texture::Video { uri, context });
        Some(entry.material.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_plain_material() {
        let mut registry = MaterialRegistry::new();
        registry.insert(Material::new("wood").with_texture(Texture::Image { uri: "wood.png".into() }));

        let material = resolve_material(&mut registry, "wood", None).unwrap();
        assert_eq!(material.name, "wood");
        assert_eq!(material.diffuse_texture, Some(Texture::Image { uri: "wood.png".into() }));
    }

    #[test]
    fn test_missing_material() {
        let mut registry = MaterialRegistry::new();
        let err = resolve_material(&mut registry, "ghost", Some(1)).unwrap_err();
        assert!(matches!(err, BindingError::MaterialNotFound(name) if name == "ghost"));
    }

    #[test]
    fn test_video_material_recreated_with_context() {
        let mut registry = MaterialRegistry::new();
        registry.insert_video("screen", "clip.mp4");

        let without_context = resolve_material(&mut registry, "screen", None).unwrap();
        assert_eq!(without_context.diffuse_texture, None);

        let with_context = resolve_material(&mut registry, "screen", Some(7)).unwrap();
        assert_eq!(
            with_context.diffuse_texture,
            Some(Texture::Video { uri: "clip.mp4".into(), context: 7 })
        );

        // Already bound: a second lookup returns the stored texture unchanged
        let again = resolve_material(&mut registry, "screen", Some(9)).unwrap();
        assert_eq!(again, with_context);
    }
}
