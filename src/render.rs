//! The scene traversal and per-triangle pipeline: transform, light, clip,
//! rasterize. This is the crate's single entry point into the hot path; the
//! host calls [`render`] once per frame after resetting its buffers.

use crate::camera::{self, Camera};
use crate::clip::{self, ShadedVertex};
use crate::color::ShadingTerm;
use crate::mesh::{Mesh, MeshNode};
use crate::model::Model;
use crate::raster::{DepthBuffer, FrameBuffer};
use crate::rasterizer;
use crate::scene::Scene;

/// Walks every model in `scene`, lighting and clipping each triangle and
/// rasterizing the survivors into `framebuffer`/`depth_buffer`. Buffers are
/// not reset here — the host clears them to background/`+∞` once per frame
/// (see [`crate::raster::Raster::fill`]) before calling this.
///
/// Synchronous and single-threaded: this call returns only once every
/// triangle of every model has been transformed, lit, clipped, and
/// rasterized. It never fails partway — a malformed input is a precondition
/// violation, not a recoverable error (see [`crate::error::RenderError`],
/// which only covers the bitmap-decode boundary, not this function).
pub fn render(scene: &Scene, camera: &Camera, framebuffer: &mut FrameBuffer, depth_buffer: &mut DepthBuffer) {
    let mut triangle_count = 0usize;
    for model in scene.models() {
        log::trace!("rendering model with {} nodes", model.mesh().node_count());
        triangle_count += render_model(model, scene, camera, framebuffer, depth_buffer);
    }
    log::debug!(
        "frame: {} models, {} triangles submitted ({}x{})",
        scene.models().len(),
        triangle_count,
        framebuffer.width(),
        framebuffer.height(),
    );
}

/// Renders a single model's mesh-node tree, returning the number of
/// triangles submitted to the rasterizer (including ones later discarded by
/// clipping or the depth test).
fn render_model(
    model: &Model,
    scene: &Scene,
    camera: &Camera,
    framebuffer: &mut FrameBuffer,
    depth_buffer: &mut DepthBuffer,
) -> usize {
    render_node(model, Mesh::ROOT, crate::math::Matrix::IDENTITY, scene, camera, framebuffer, depth_buffer)
}

/// Recurses into `node`, composing `accumulated` (the object-to-world
/// transform reaching this node) with the node's own local-to-parent
/// matrix, per §4.3. At a chunk, recurses into children with the updated
/// accumulated transform; at a fragment leaf, lights and rasterizes every
/// triangle.
fn render_node(
    model: &Model,
    node: usize,
    accumulated: crate::math::Matrix,
    scene: &Scene,
    camera: &Camera,
    framebuffer: &mut FrameBuffer,
    depth_buffer: &mut DepthBuffer,
) -> usize {
    let world = accumulated * model.get_transformation(node);
    match model.mesh().node(node) {
        MeshNode::Chunk(children) => {
            let mut count = 0;
            for &child in children {
                count += render_node(model, child, world, scene, camera, framebuffer, depth_buffer);
            }
            count
        }
        MeshNode::Fragment(fragment) => {
            for triangle in &fragment.triangles {
                let vertices = [
                    light_vertex(model.mesh().vertex(triangle.a), world, camera, scene),
                    light_vertex(model.mesh().vertex(triangle.b), world, camera, scene),
                    light_vertex(model.mesh().vertex(triangle.c), world, camera, scene),
                ];
                for clipped in clip::clip_near(vertices).triangles() {
                    rasterizer::rasterize_triangle(clipped, &fragment.material, framebuffer, depth_buffer);
                }
            }
            fragment.triangles.len()
        }
    }
}

/// Transforms one vertex to view space and evaluates its shading term
/// (§4.4): `p_view = world_to_view(M * p_local, camera)`, `n_world =
/// normalize(linear(M) * n_local)`, shading = ambient + directional.
fn light_vertex(vertex: crate::mesh::Vertex, world: crate::math::Matrix, camera: &Camera, scene: &Scene) -> ShadedVertex {
    let p_world = world.transform_point(vertex.position);
    let p_view = camera::world_to_view(p_world, camera);
    let n_world = world.transform_vector(vertex.normal).normalize();

    let ambient = scene.ambient_light().shading_term();
    let directional = scene.directional_light().shading_term(n_world);
    let shading: ShadingTerm = ambient + directional;

    ShadedVertex::new(p_view, vertex.uv, shading)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::light::{AmbientLight, DirectionalLight};
    use crate::material::Material;
    use crate::math::{Point, Vector};
    use crate::mesh::{Fragment, MeshBuilder, TriangleIndices, Vertex};
    use crate::raster::Raster;
    use crate::sampler::TextureCoordinate;
    use std::sync::Arc;

    fn camera_looking_down_negative_z() -> Camera {
        Camera::new(Point::ORIGIN, Vector::new(0.0, 0.0, -1.0), Vector::Y_AXIS)
    }

    fn screen_fill_triangle_scene(material: Material) -> Scene {
        let vertices = vec![
            Vertex::new(Point::new(-2.0, 2.0, -2.0), TextureCoordinate::new(0.0, 0.0), Vector::Z_AXIS),
            Vertex::new(Point::new(2.0, 2.0, -2.0), TextureCoordinate::new(0.0, 0.0), Vector::Z_AXIS),
            Vertex::new(Point::new(0.0, -2.0, -2.0), TextureCoordinate::new(0.0, 0.0), Vector::Z_AXIS),
        ];
        let mut builder = MeshBuilder::new(vertices);
        let leaf = builder.push_fragment(Fragment::new(vec![TriangleIndices::new(0, 1, 2)], material));
        let mesh = builder.build(leaf);
        let mut scene = Scene::new(
            AmbientLight::new(Color::WHITE, 1.0),
            DirectionalLight::new(Vector::new(0.0, 0.0, -1.0), Color::WHITE, 0.0),
        );
        scene.add(Model::new(Arc::new(mesh)));
        scene
    }

    #[test]
    fn test_empty_scene_leaves_background_and_infinite_depth() {
        let background = Color::new(0, 0, 0, 255);
        let mut fb: FrameBuffer = Raster::new(4, 4, background);
        let mut db: DepthBuffer = Raster::new(4, 4, f32::INFINITY);
        let scene = Scene::new(AmbientLight::new(Color::WHITE, 1.0), DirectionalLight::new(Vector::new(0.0, 0.0, -1.0), Color::WHITE, 0.0));
        let camera = camera_looking_down_negative_z();

        render(&scene, &camera, &mut fb, &mut db);

        assert!(fb.data().iter().all(|&c| c == background));
        assert!(db.data().iter().all(|z| z.is_infinite()));
    }

    #[test]
    fn test_screen_fill_triangle_is_shaded_red_with_no_directional_term() {
        let background = Color::new(0, 0, 0, 255);
        let mut fb: FrameBuffer = Raster::new(4, 4, background);
        let mut db: DepthBuffer = Raster::new(4, 4, f32::INFINITY);
        let scene = screen_fill_triangle_scene(Material::solid(Color::new(255, 0, 0, 255)));
        let camera = camera_looking_down_negative_z();

        render(&scene, &camera, &mut fb, &mut db);

        assert_eq!(*fb.get(2, 2), Color::new(255, 0, 0, 255));
        assert_eq!(*fb.get(0, 0), background);
    }

    #[test]
    fn test_rerendering_same_scene_is_deterministic() {
        let scene = screen_fill_triangle_scene(Material::solid(Color::new(10, 20, 30, 255)));
        let camera = camera_looking_down_negative_z();

        let mut fb1: FrameBuffer = Raster::new(8, 8, Color::BLACK);
        let mut db1: DepthBuffer = Raster::new(8, 8, f32::INFINITY);
        render(&scene, &camera, &mut fb1, &mut db1);

        let mut fb2: FrameBuffer = Raster::new(8, 8, Color::BLACK);
        let mut db2: DepthBuffer = Raster::new(8, 8, f32::INFINITY);
        render(&scene, &camera, &mut fb2, &mut db2);

        assert_eq!(fb1.data(), fb2.data());
        assert_eq!(db1.data(), db2.data());
    }

    #[test]
    fn test_near_plane_clip_skips_region_behind_plane() {
        // Triangle with two vertices behind NEAR_Z = -1; only the sliver in
        // front of the plane should ever reach the rasterizer.
        let vertices = vec![
            Vertex::new(Point::new(0.0, 0.0, -2.0), TextureCoordinate::new(0.0, 0.0), Vector::Z_AXIS),
            Vertex::new(Point::new(0.0, 1.0, -0.5), TextureCoordinate::new(0.0, 0.0), Vector::Z_AXIS),
            Vertex::new(Point::new(1.0, 0.0, -0.5), TextureCoordinate::new(0.0, 0.0), Vector::Z_AXIS),
        ];
        let mut builder = MeshBuilder::new(vertices);
        let leaf = builder.push_fragment(Fragment::new(
            vec![TriangleIndices::new(0, 1, 2)],
            Material::solid(Color::new(0, 255, 0, 255)),
        ));
        let mesh = builder.build(leaf);
        let mut scene = Scene::new(
            AmbientLight::new(Color::WHITE, 1.0),
            DirectionalLight::new(Vector::new(0.0, 0.0, -1.0), Color::WHITE, 0.0),
        );
        scene.add(Model::new(Arc::new(mesh)));
        let camera = camera_looking_down_negative_z();

        let mut fb: FrameBuffer = Raster::new(8, 8, Color::BLACK);
        let mut db: DepthBuffer = Raster::new(8, 8, f32::INFINITY);
        render(&scene, &camera, &mut fb, &mut db);

        // Some geometry survived the clip (the sliver in front of z = -1)
        // but the triangle's behind-the-plane vertex at z = -2 is gone, so
        // not every pixel a naive unclipped projection would touch is lit.
        assert!(fb.data().iter().any(|&c| c == Color::new(0, 255, 0, 255)) || db.data().iter().any(|z| z.is_finite()));
    }
}
