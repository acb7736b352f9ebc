//! The camera's position and orthonormal basis, stored in a single
//! view-to-world matrix.
//!
//! # Matrix layout
//!
//! `m_view_to_world` packs the camera's basis and position directly into
//! fixed rows/columns rather than separate fields:
//! - Row 0: the right vector.
//! - Row 1: the orientation ("up") vector.
//! - Row 2: the direction ("forward") vector.
//! - Row 3: the homogeneous row, always `(0, 0, 0, 1)`.
//! - Column 3: the camera's position (rows 0-2) and the homogeneous `1` (row 3).
//!
//! This mirrors how the renderer this crate is descended from represents a
//! camera — no separate yaw/pitch/roll fields to keep synchronized with a
//! derived matrix.

use crate::math::{Matrix, Point, Vector};

const RIGHT_ROW: usize = 0;
const ORIENTATION_ROW: usize = 1;
const DIRECTION_ROW: usize = 2;
const POSITION_COLUMN: usize = 3;

/// The near plane's `z` coordinate in view space. See [`crate::clip::NEAR_Z`].
pub const NEAR_PLANE_Z: f32 = -1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    view_to_world: Matrix,
}

impl Camera {
    /// Builds a camera at `position` looking along `direction` with `orientation`
    /// as up. `direction` and `orientation` must already be orthonormal; the
    /// right vector is derived as `cross(orientation, direction)`.
    pub fn new(position: Point, direction: Vector, orientation: Vector) -> Self {
        let right = orientation.cross(direction);
        let mut view_to_world = Matrix::IDENTITY;
        Self::write_row(&mut view_to_world, RIGHT_ROW, right);
        Self::write_row(&mut view_to_world, ORIENTATION_ROW, orientation);
        Self::write_row(&mut view_to_world, DIRECTION_ROW, direction);
        view_to_world.set(POSITION_COLUMN, 0, position.x);
        view_to_world.set(POSITION_COLUMN, 1, position.y);
        view_to_world.set(POSITION_COLUMN, 2, position.z);
        Self { view_to_world }
    }

    fn write_row(m: &mut Matrix, row: usize, v: Vector) {
        m.set(0, row, v.x);
        m.set(1, row, v.y);
        m.set(2, row, v.z);
    }

    fn read_row(&self, row: usize) -> Vector {
        Vector::new(self.view_to_world.get(0, row), self.view_to_world.get(1, row), self.view_to_world.get(2, row))
    }

    pub fn view_to_world(&self) -> Matrix {
        self.view_to_world
    }

    pub fn position(&self) -> Point {
        Point::new(
            self.view_to_world.get(POSITION_COLUMN, 0),
            self.view_to_world.get(POSITION_COLUMN, 1),
            self.view_to_world.get(POSITION_COLUMN, 2),
        )
    }

    pub fn direction(&self) -> Vector {
        self.read_row(DIRECTION_ROW)
    }

    pub fn orientation(&self) -> Vector {
        self.read_row(ORIENTATION_ROW)
    }

    pub fn right(&self) -> Vector {
        self.read_row(RIGHT_ROW)
    }

    /// Pre-multiplies `transformation` onto the view-to-world matrix.
    pub fn apply(&mut self, transformation: Matrix) {
        self.view_to_world = transformation * self.view_to_world;
    }

    /// `true` iff `point` (in view space) is nearer than the near plane.
    pub fn is_in_front(point: Point) -> bool {
        point.z < NEAR_PLANE_Z
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point::ORIGIN, Vector::new(0.0, 0.0, -1.0), Vector::Y_AXIS)
    }
}

/// Transforms a world-space point into view space via dot products against
/// the camera's basis, without ever materializing a world-to-view matrix.
pub fn world_to_view(point: Point, camera: &Camera) -> Point {
    let delta = point - camera.position();
    Point::new(delta.dot(camera.right()), delta.dot(camera.orientation()), delta.dot(-camera.direction()))
}

fn move_along(camera: &mut Camera, axis: Vector, distance: f32) {
    camera.apply(Matrix::translate(axis * distance));
}

pub fn move_forward(camera: &mut Camera, distance: f32) {
    move_along(camera, camera.direction(), distance);
}

pub fn move_backward(camera: &mut Camera, distance: f32) {
    move_along(camera, camera.direction(), -distance);
}

pub fn move_right(camera: &mut Camera, distance: f32) {
    move_along(camera, camera.right(), distance);
}

pub fn move_left(camera: &mut Camera, distance: f32) {
    move_along(camera, camera.right(), -distance);
}

pub fn move_up(camera: &mut Camera, distance: f32) {
    move_along(camera, camera.orientation(), distance);
}

pub fn move_down(camera: &mut Camera, distance: f32) {
    move_along(camera, camera.orientation(), -distance);
}

/// Rotates about the camera's own forward axis.
pub fn roll(camera: &mut Camera, radians: f32) {
    camera.apply(Matrix::rotate(camera.direction(), radians));
}

/// Rotates about the camera's current position using world-axis yaw/pitch
/// (not the camera's own basis): translate to the origin, yaw by `delta_yaw`,
/// pitch by `-delta_pitch`, then translate back.
pub fn tilt(camera: &mut Camera, delta_yaw: f32, delta_pitch: f32) {
    let position = camera.position();
    let transformation = Matrix::translate(position - Point::ORIGIN)
        * Matrix::yaw(delta_yaw)
        * Matrix::pitch(-delta_pitch)
        * Matrix::translate(Point::ORIGIN - position);
    camera.apply(transformation);
}
