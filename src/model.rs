//! A mesh paired with a per-node transformation tree and per-node bounding
//! boxes, addressed by arena index rather than by node identity.

use std::sync::Arc;

use crate::bounding_box::BoundingBox;
use crate::math::{Matrix, Point};
use crate::mesh::{Mesh, MeshNode};

/// Owns a [`Mesh`] and its transformation tree. The mesh is immutable after
/// construction; transformations (and the bounding boxes they imply) mutate
/// under user control.
///
/// On construction the transformation tree mirrors the mesh-node tree with
/// every slot set to identity, and bounding boxes are seeded from the mesh's
/// untransformed triangle geometry. Both are stored as arrays parallel to
/// the mesh's node arena — `transforms[i]` and `bounding_boxes[i]` describe
/// `mesh.node(i)` — so looking either up is an index, never a hash lookup.
pub struct Model {
    mesh: Arc<Mesh>,
    transforms: Vec<Matrix>,
    bounding_boxes: Vec<BoundingBox>,
    parents: Vec<Option<usize>>,
}

impl Model {
    pub fn new(mesh: Arc<Mesh>) -> Self {
        let node_count = mesh.node_count();
        let mut parents = vec![None; node_count];
        link_parents(&mesh, Mesh::ROOT, None, &mut parents);

        let mut bounding_boxes = vec![BoundingBox::unit(); node_count];
        seed_bounding_boxes(&mesh, Mesh::ROOT, &mut bounding_boxes);

        Self { mesh, transforms: vec![Matrix::IDENTITY; node_count], bounding_boxes, parents }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Returns the local-to-parent matrix stored at `node`.
    pub fn get_transformation(&self, node: usize) -> Matrix {
        self.transforms[node]
    }

    /// Pre-multiplies `m` onto `node`'s slot (`slot = m * slot`), recomputes
    /// that node's bounding box under `m`, then climbs the parent chain
    /// re-merging each ancestor's box from its direct children's current
    /// boxes.
    pub fn apply(&mut self, node: usize, m: Matrix) {
        self.transforms[node] = m * self.transforms[node];
        self.bounding_boxes[node] = self.bounding_boxes[node].apply(&m);

        let mut current = self.parents[node];
        while let Some(parent) = current {
            let children = self
                .mesh
                .node(parent)
                .as_chunk()
                .expect("a node with children must be a chunk");
            let merged = children
                .iter()
                .map(|&child| self.bounding_boxes[child])
                .reduce(|a, b| BoundingBox::merge(&a, &b))
                .expect("a chunk always has at least one child");
            self.bounding_boxes[parent] = merged;
            current = self.parents[parent];
        }
    }

    /// The root node's current bounding box, for coarse host-side culling.
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_boxes[Mesh::ROOT]
    }

    pub fn node_bounding_box(&self, node: usize) -> BoundingBox {
        self.bounding_boxes[node]
    }
}

fn link_parents(mesh: &Mesh, node: usize, parent: Option<usize>, parents: &mut [Option<usize>]) {
    parents[node] = parent;
    if let Some(children) = mesh.node(node).as_chunk() {
        for &child in children {
            link_parents(mesh, child, Some(node), parents);
        }
    }
}

fn seed_bounding_boxes(mesh: &Mesh, node: usize, boxes: &mut [BoundingBox]) -> BoundingBox {
    let computed = match mesh.node(node) {
        MeshNode::Fragment(fragment) => {
            let mut points = fragment.triangles.iter().flat_map(|t| [t.a, t.b, t.c]).map(|i| mesh.vertex(i).position);
            let first = points.next().expect("a fragment has at least one triangle");
            points.fold((first, first), |(min, max), p| (componentwise_min(min, p), componentwise_max(max, p)))
        }
        MeshNode::Chunk(children) => {
            let mut merged: Option<(Point, Point)> = None;
            for &child in children {
                let child_box = seed_bounding_boxes(mesh, child, boxes);
                merged = Some(match merged {
                    None => (child_box.min, child_box.max),
                    Some((min, max)) => (componentwise_min(min, child_box.min), componentwise_max(max, child_box.max)),
                });
            }
            merged.expect("a chunk always has at least one child")
        }
    };
    let bbox = BoundingBox::new(computed.0, computed.1);
    boxes[node] = bbox;
    bbox
}

fn componentwise_min(a: Point, b: Point) -> Point {
    Point::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z))
}

fn componentwise_max(a: Point, b: Point) -> Point {
    Point::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
}
