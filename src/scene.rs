//! An ordered collection of models plus the two analytic lights.

use crate::light::{AmbientLight, DirectionalLight};
use crate::model::Model;

pub struct Scene {
    models: Vec<Model>,
    ambient_light: AmbientLight,
    directional_light: DirectionalLight,
}

impl Scene {
    pub fn new(ambient_light: AmbientLight, directional_light: DirectionalLight) -> Self {
        Self { models: Vec::new(), ambient_light, directional_light }
    }

    /// Transfers ownership of `model` into the scene, returning its index.
    pub fn add(&mut self, model: Model) -> usize {
        self.models.push(model);
        self.models.len() - 1
    }

    /// Removes the model at `index` in O(1) by swapping it with the tail
    /// element and popping. Indices are stable only between mutations.
    pub fn remove_model(&mut self, index: usize) -> Model {
        self.models.swap_remove(index)
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn models_mut(&mut self) -> &mut [Model] {
        &mut self.models
    }

    pub fn ambient_light(&self) -> AmbientLight {
        self.ambient_light
    }

    pub fn set_ambient_light(&mut self, light: AmbientLight) {
        self.ambient_light = light;
    }

    pub fn directional_light(&self) -> DirectionalLight {
        self.directional_light
    }

    pub fn set_directional_light(&mut self, light: DirectionalLight) {
        self.directional_light = light;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::material::Material;
    use crate::math::{Point, Vector};
    use crate::mesh::{Fragment, Mesh, MeshBuilder, TriangleIndices, Vertex};
    use crate::sampler::TextureCoordinate;
    use std::sync::Arc;

    fn trivial_model() -> Model {
        let vertices = vec![
            Vertex::new(Point::new(-1.0, -1.0, 0.0), TextureCoordinate::new(0.0, 0.0), Vector::Z_AXIS),
            Vertex::new(Point::new(1.0, -1.0, 0.0), TextureCoordinate::new(0.0, 0.0), Vector::Z_AXIS),
            Vertex::new(Point::new(0.0, 1.0, 0.0), TextureCoordinate::new(0.0, 0.0), Vector::Z_AXIS),
        ];
        let mut builder = MeshBuilder::new(vertices);
        let leaf = builder.push_fragment(Fragment::new(
            vec![TriangleIndices::new(0, 1, 2)],
            Material::solid(Color::WHITE),
        ));
        let mesh: Mesh = builder.build(leaf);
        Model::new(Arc::new(mesh))
    }

    fn empty_scene() -> Scene {
        Scene::new(
            AmbientLight::new(Color::WHITE, 1.0),
            DirectionalLight::new(Vector::new(0.0, 0.0, -1.0), Color::WHITE, 0.0),
        )
    }

    #[test]
    fn test_add_returns_stable_index_until_next_mutation() {
        let mut scene = empty_scene();
        let index = scene.add(trivial_model());
        assert_eq!(index, 0);
        assert_eq!(scene.models().len(), 1);
    }

    #[test]
    fn test_remove_model_swaps_with_tail() {
        let mut scene = empty_scene();
        scene.add(trivial_model());
        scene.add(trivial_model());
        scene.add(trivial_model());
        scene.remove_model(0);
        assert_eq!(scene.models().len(), 2);
    }

    #[test]
    fn test_remove_last_model_is_well_defined() {
        let mut scene = empty_scene();
        scene.add(trivial_model());
        scene.remove_model(0);
        assert_eq!(scene.models().len(), 0);
    }
}
