use lumen_chunk::Direction;
use lumen_geom::{Axis, Vec3};

/// The six face buckets of a chunk mesh. Names follow the neighbor
/// directions: Left is -X, Right +X, Front -Z, Back +Z.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    Left = 0,
    Right = 1,
    Front = 2,
    Back = 3,
    Top = 4,
    Bottom = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::Left, Face::Right, Face::Front, Face::Back, Face::Top, Face::Bottom];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Neighbor across this face.
    #[inline]
    pub fn direction(self) -> Direction {
        match self {
            Face::Left => Direction::Left,
            Face::Right => Direction::Right,
            Face::Front => Direction::Front,
            Face::Back => Direction::Back,
            Face::Top => Direction::Up,
            Face::Bottom => Direction::Down,
        }
    }

    #[inline]
    pub fn normal(self) -> Vec3 {
        let (dx, dy, dz) = self.direction().delta();
        Vec3::new(dx as f32, dy as f32, dz as f32)
    }

    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Face::Left | Face::Right => Axis::X,
            Face::Top | Face::Bottom => Axis::Y,
            Face::Front | Face::Back => Axis::Z,
        }
    }

    /// The two axes spanning the face plane, in X, Y, Z order.
    #[inline]
    pub fn tangents(self) -> [Axis; 2] {
        match self.axis() {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::X, Axis::Z],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }

    /// Unit-cube corners of the quad, counter-clockwise seen from outside.
    #[inline]
    pub fn corners(self) -> [[u8; 3]; 4] {
        match self {
            Face::Left => [[0, 0, 0], [0, 0, 1], [0, 1, 1], [0, 1, 0]],
            Face::Right => [[1, 0, 1], [1, 0, 0], [1, 1, 0], [1, 1, 1]],
            Face::Front => [[1, 0, 0], [0, 0, 0], [0, 1, 0], [1, 1, 0]],
            Face::Back => [[0, 0, 1], [1, 0, 1], [1, 1, 1], [0, 1, 1]],
            Face::Top => [[0, 1, 0], [0, 1, 1], [1, 1, 1], [1, 1, 0]],
            Face::Bottom => [[0, 0, 0], [1, 0, 0], [1, 0, 1], [0, 0, 1]],
        }
    }

    /// Brightest lighting a vertex of this face may carry.
    #[inline]
    pub fn light_ceiling(self) -> f32 {
        match self {
            Face::Top => 1.0,
            Face::Bottom => 0.70,
            _ => 0.85,
        }
    }
}
