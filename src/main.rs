//! A headless demo of the renderer: builds a small scene, renders one
//! frame, and writes the result to `output.png`. Presentation to an actual
//! window is a host concern the core deliberately does not implement (see
//! the crate's module docs); this binary stands in for that host with the
//! simplest possible sink, a PNG file, so the pipeline is exercisable
//! without a display.

use std::sync::Arc;

use ashkal::camera::{self, Camera};
use ashkal::color::Color;
use ashkal::light::{AmbientLight, DirectionalLight};
use ashkal::material::Material;
use ashkal::math::{Point, Vector};
use ashkal::mesh::{Fragment, MeshBuilder, TriangleIndices, Vertex};
use ashkal::model::Model;
use ashkal::raster::Raster;
use ashkal::sampler::TextureCoordinate;
use ashkal::scene::Scene;

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;

fn pyramid_model() -> Model {
    let apex = Vertex::new(Point::new(0.0, 1.0, 0.0), TextureCoordinate::new(0.5, 1.0), Vector::Y_AXIS);
    let base = [
        Point::new(-1.0, -1.0, -1.0),
        Point::new(1.0, -1.0, -1.0),
        Point::new(1.0, -1.0, 1.0),
        Point::new(-1.0, -1.0, 1.0),
    ];
    let mut vertices = vec![apex];
    for (i, &p) in base.iter().enumerate() {
        let uv = TextureCoordinate::new((i % 2) as f32, (i / 2) as f32);
        vertices.push(Vertex::new(p, uv, Vector::Y_AXIS));
    }

    let mut builder = MeshBuilder::new(vertices);
    let sides = Fragment::new(
        vec![
            TriangleIndices::new(0, 1, 2),
            TriangleIndices::new(0, 2, 3),
            TriangleIndices::new(0, 3, 4),
            TriangleIndices::new(0, 4, 1),
        ],
        Material::solid(Color::new(220, 90, 60, 255)),
    );
    let base_fragment = Fragment::new(
        vec![TriangleIndices::new(1, 3, 2), TriangleIndices::new(1, 4, 3)],
        Material::solid(Color::new(90, 120, 220, 255)),
    );
    let sides_node = builder.push_fragment(sides);
    let base_node = builder.push_fragment(base_fragment);
    let root = builder.push_chunk(vec![sides_node, base_node]);
    Model::new(Arc::new(builder.build(root)))
}

fn write_png(path: &str, framebuffer: &ashkal::FrameBuffer) {
    let mut bytes = Vec::with_capacity((framebuffer.width() * framebuffer.height() * 4) as usize);
    for pixel in framebuffer.data() {
        bytes.extend_from_slice(&[pixel.r, pixel.g, pixel.b, pixel.a]);
    }
    let image = image::RgbaImage::from_raw(framebuffer.width(), framebuffer.height(), bytes)
        .expect("framebuffer byte count matches width*height*4");
    image.save(path).expect("failed to write output image");
}

fn main() {
    env_logger::init();

    let mut scene = Scene::new(
        AmbientLight::new(Color::WHITE, 0.25),
        DirectionalLight::new(Vector::new(-0.4, -1.0, -0.3), Color::WHITE, 0.9),
    );
    scene.add(pyramid_model());

    let mut cam = Camera::new(Point::new(0.0, 1.0, 4.0), Vector::new(0.0, 0.0, -1.0), Vector::Y_AXIS);
    camera::move_up(&mut cam, 0.2);

    let background = Color::new(15, 15, 20, 255);
    let mut framebuffer: ashkal::FrameBuffer = Raster::new(WIDTH, HEIGHT, background);
    let mut depth_buffer: ashkal::DepthBuffer = Raster::new(WIDTH, HEIGHT, f32::INFINITY);

    ashkal::render(&scene, &cam, &mut framebuffer, &mut depth_buffer);

    write_png("output.png", &framebuffer);
    log::info!("wrote {}x{} frame to output.png", WIDTH, HEIGHT);
}
