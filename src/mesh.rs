//! Vertex data and the hierarchical node tree that groups triangles by
//! material.

use crate::material::Material;
use crate::math::{Point, Vector};
use crate::sampler::TextureCoordinate;

/// `(position, uv, normal)`. Normals are unit length in the mesh's local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Point,
    pub uv: TextureCoordinate,
    pub normal: Vector,
}

impl Vertex {
    pub fn new(position: Point, uv: TextureCoordinate, normal: Vector) -> Self {
        Self { position, uv, normal }
    }
}

/// Three indices into a mesh's vertex array. Winding is counter-clockwise as
/// seen by a camera looking at the triangle's front face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriangleIndices {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl TriangleIndices {
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }
}

/// An ordered set of triangles sharing one material. A leaf of the mesh-node
/// tree (not a per-pixel fragment).
#[derive(Clone)]
pub struct Fragment {
    pub triangles: Vec<TriangleIndices>,
    pub material: Material,
}

impl Fragment {
    pub fn new(triangles: Vec<TriangleIndices>, material: Material) -> Self {
        Self { triangles, material }
    }
}

/// A node in the mesh tree: either a fragment leaf, or a chunk referencing
/// its children by arena index into the owning [`Mesh`]'s node array.
///
/// Storing children as indices rather than as owned sub-trees (or as a
/// pointer-keyed lookup into a parallel structure) gives every node a stable
/// identity — its position in the arena — that a transformation tree can key
/// off directly, with no risk of cycles and no need for identity hashing.
pub enum MeshNode {
    Fragment(Fragment),
    Chunk(Vec<usize>),
}

impl MeshNode {
    pub fn as_fragment(&self) -> Option<&Fragment> {
        match self {
            MeshNode::Fragment(fragment) => Some(fragment),
            MeshNode::Chunk(_) => None,
        }
    }

    pub fn as_chunk(&self) -> Option<&[usize]> {
        match self {
            MeshNode::Fragment(_) => None,
            MeshNode::Chunk(children) => Some(children),
        }
    }
}

/// A vertex array plus a tree of [`MeshNode`]s, flattened into an arena
/// (`nodes`) with the root always at index 0.
pub struct Mesh {
    vertices: Vec<Vertex>,
    nodes: Vec<MeshNode>,
}

impl Mesh {
    pub const ROOT: usize = 0;

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex(&self, index: u32) -> Vertex {
        self.vertices[index as usize]
    }

    pub fn node(&self, index: usize) -> &MeshNode {
        &self.nodes[index]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Builds a [`Mesh`] by allocating nodes into the arena in the order they are
/// created, guaranteeing every child index is already valid when a chunk
/// references it — which is what makes the tree structurally acyclic rather
/// than merely conventionally so.
pub struct MeshBuilder {
    vertices: Vec<Vertex>,
    nodes: Vec<MeshNode>,
}

impl MeshBuilder {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices, nodes: Vec::new() }
    }

    /// Allocates a fragment leaf and returns its arena index.
    pub fn push_fragment(&mut self, fragment: Fragment) -> usize {
        self.nodes.push(MeshNode::Fragment(fragment));
        self.nodes.len() - 1
    }

    /// Allocates a chunk referencing already-allocated children and returns
    /// its arena index.
    pub fn push_chunk(&mut self, children: Vec<usize>) -> usize {
        debug_assert!(children.iter().all(|&child| child < self.nodes.len()));
        self.nodes.push(MeshNode::Chunk(children));
        self.nodes.len() - 1
    }

    /// Finishes the mesh. `root` must be the arena index of the tree's root
    /// node; it is swapped into index 0 so [`Mesh::ROOT`] always resolves it.
    /// Every chunk's children list is remapped along with the swap, since a
    /// child reference to either swapped slot would otherwise now point at
    /// the wrong node (or, for a reference to the old index 0, at itself).
    pub fn build(mut self, root: usize) -> Mesh {
        if root != 0 {
            self.nodes.swap(0, root);
            for node in &mut self.nodes {
                if let MeshNode::Chunk(children) = node {
                    for child in children.iter_mut() {
                        if *child == 0 {
                            *child = root;
                        } else if *child == root {
                            *child = 0;
                        }
                    }
                }
            }
        }
        Mesh { vertices: self.vertices, nodes: self.nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn triangle_vertex(x: f32) -> Vertex {
        Vertex::new(Point::new(x, 0.0, 0.0), TextureCoordinate::new(0.0, 0.0), Vector::Z_AXIS)
    }

    #[test]
    fn test_single_fragment_mesh() {
        let vertices = vec![triangle_vertex(0.0), triangle_vertex(1.0), triangle_vertex(2.0)];
        let mut builder = MeshBuilder::new(vertices);
        let fragment =
            Fragment::new(vec![TriangleIndices::new(0, 1, 2)], Material::solid(Color::WHITE));
        let leaf = builder.push_fragment(fragment);
        let mesh = builder.build(leaf);
        assert_eq!(mesh.node_count(), 1);
        assert!(mesh.node(Mesh::ROOT).as_fragment().is_some());
    }

    #[test]
    fn test_chunk_references_valid_children() {
        let vertices = vec![triangle_vertex(0.0), triangle_vertex(1.0), triangle_vertex(2.0)];
        let mut builder = MeshBuilder::new(vertices);
        let leaf_a = builder.push_fragment(Fragment::new(
            vec![TriangleIndices::new(0, 1, 2)],
            Material::solid(Color::WHITE),
        ));
        let leaf_b = builder.push_fragment(Fragment::new(
            vec![TriangleIndices::new(0, 1, 2)],
            Material::solid(Color::BLACK),
        ));
        let root = builder.push_chunk(vec![leaf_a, leaf_b]);
        let mesh = builder.build(root);
        let children = mesh.node(Mesh::ROOT).as_chunk().unwrap();
        assert_eq!(children.len(), 2);
    }
}
