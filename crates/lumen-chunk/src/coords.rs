use std::error::Error;
use std::fmt;

use lumen_geom::Vec3;

/// Axis-aligned step between neighboring voxels.
/// Left/Right run along X, Front/Back along Z (front faces -Z), Up/Down along Y.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    Left,
    Right,
    Front,
    Back,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Left,
        Direction::Right,
        Direction::Front,
        Direction::Back,
        Direction::Up,
        Direction::Down,
    ];

    pub const LATERAL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Front,
        Direction::Back,
    ];

    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Direction::Left => (-1, 0, 0),
            Direction::Right => (1, 0, 0),
            Direction::Front => (0, 0, -1),
            Direction::Back => (0, 0, 1),
            Direction::Up => (0, 1, 0),
            Direction::Down => (0, -1, 0),
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Front => Direction::Back,
            Direction::Back => Direction::Front,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPosition {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// `None` when any component would leave the `i32` range.
    #[inline]
    pub fn checked_offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
            self.z.checked_add(dz)?,
        ))
    }

    #[inline]
    pub fn neighbor(self, dir: Direction) -> Self {
        let (dx, dy, dz) = dir.delta();
        self.offset(dx, dy, dz)
    }

    #[inline]
    pub fn left(self) -> Self {
        self.neighbor(Direction::Left)
    }

    #[inline]
    pub fn right(self) -> Self {
        self.neighbor(Direction::Right)
    }

    #[inline]
    pub fn front(self) -> Self {
        self.neighbor(Direction::Front)
    }

    #[inline]
    pub fn back(self) -> Self {
        self.neighbor(Direction::Back)
    }

    #[inline]
    pub fn up(self) -> Self {
        self.neighbor(Direction::Up)
    }

    #[inline]
    pub fn down(self) -> Self {
        self.neighbor(Direction::Down)
    }

    /// The voxel containing a world-space point. Floors every component, so
    /// points at negative coordinates land in the voxel that actually holds
    /// them.
    #[inline]
    pub fn containing(p: Vec3) -> Self {
        let f = p.floor();
        Self::new(f.x as i32, f.y as i32, f.z as i32)
    }

    /// Minimum corner of the voxel in world space.
    #[inline]
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    /// Owning chunk column, regardless of whether `y` is inside the world.
    #[inline]
    pub fn chunk_position(self, dims: ChunkDims) -> ChunkPosition {
        ChunkPosition::new(self.x >> dims.x_shift, self.z >> dims.z_shift)
    }

    /// Splits into owning chunk and local coordinate. `None` when `y` lies
    /// outside the chunk height.
    #[inline]
    pub fn split(self, dims: ChunkDims) -> Option<(ChunkPosition, RelativeBlockPosition)> {
        if self.y < 0 || self.y >= dims.sy as i32 {
            return None;
        }
        let rel = RelativeBlockPosition::new(
            (self.x & dims.x_mask()) as usize,
            self.y as usize,
            (self.z & dims.z_mask()) as usize,
        );
        Some((self.chunk_position(dims), rel))
    }
}

impl fmt::Display for BlockPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Column of the world; chunks span the full height so there is no `y`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPosition {
    pub x: i32,
    pub z: i32,
}

impl ChunkPosition {
    #[inline]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    /// Left, right, front, back.
    #[inline]
    pub fn neighbors(self) -> [ChunkPosition; 4] {
        [
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }

    /// All positions within `radius` on both axes, this one included.
    pub fn square(self, radius: i32) -> impl Iterator<Item = ChunkPosition> {
        (-radius..=radius)
            .flat_map(move |dz| (-radius..=radius).map(move |dx| self.offset(dx, dz)))
    }

    #[inline]
    pub fn chebyshev_distance(self, other: ChunkPosition) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    /// World position of local (0, 0, 0).
    #[inline]
    pub fn origin(self, dims: ChunkDims) -> BlockPosition {
        BlockPosition::new(self.x << dims.x_shift, 0, self.z << dims.z_shift)
    }
}

impl From<(i32, i32)> for ChunkPosition {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl fmt::Display for ChunkPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RelativeBlockPosition {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl RelativeBlockPosition {
    #[inline]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn to_absolute(self, chunk: ChunkPosition, dims: ChunkDims) -> BlockPosition {
        chunk
            .origin(dims)
            .offset(self.x as i32, self.y as i32, self.z as i32)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DimsError {
    NotPowerOfTwo { axis: char, value: usize },
    FootprintTooLarge { axis: char, value: usize },
    EmptyHeight,
    HeightTooLarge(usize),
    VolumeTooLarge,
}

impl fmt::Display for DimsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimsError::NotPowerOfTwo { axis, value } => {
                write!(f, "chunk {axis} dimension {value} is not a power of two")
            }
            DimsError::EmptyHeight => write!(f, "chunk height must be at least 1"),
            DimsError::FootprintTooLarge { axis, value } => {
                write!(f, "chunk {axis} dimension {value} exceeds {MAX_FOOTPRINT}")
            }
            DimsError::HeightTooLarge(v) => write!(f, "chunk height {v} exceeds i32 range"),
            DimsError::VolumeTooLarge => write!(f, "chunk volume overflows usize"),
        }
    }
}

impl Error for DimsError {}

/// Largest chunk width or depth; masks and origins stay within `i32`.
pub const MAX_FOOTPRINT: usize = 1 << 30;

/// Chunk footprint. X and Z are powers of two so world <-> local conversion
/// is a shift and a mask; the height is arbitrary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkDims {
    x_shift: u32,
    z_shift: u32,
    pub sy: usize,
}

impl ChunkDims {
    pub fn new(sx: usize, sy: usize, sz: usize) -> Result<Self, DimsError> {
        if !sx.is_power_of_two() {
            return Err(DimsError::NotPowerOfTwo { axis: 'x', value: sx });
        }
        if !sz.is_power_of_two() {
            return Err(DimsError::NotPowerOfTwo { axis: 'z', value: sz });
        }
        if sx > MAX_FOOTPRINT {
            return Err(DimsError::FootprintTooLarge { axis: 'x', value: sx });
        }
        if sz > MAX_FOOTPRINT {
            return Err(DimsError::FootprintTooLarge { axis: 'z', value: sz });
        }
        if sy == 0 {
            return Err(DimsError::EmptyHeight);
        }
        if sy > i32::MAX as usize {
            return Err(DimsError::HeightTooLarge(sy));
        }
        if sx.checked_mul(sy).and_then(|v| v.checked_mul(sz)).is_none() {
            return Err(DimsError::VolumeTooLarge);
        }
        Ok(Self {
            x_shift: sx.trailing_zeros(),
            z_shift: sz.trailing_zeros(),
            sy,
        })
    }

    #[inline]
    pub fn sx(self) -> usize {
        1 << self.x_shift
    }

    #[inline]
    pub fn sz(self) -> usize {
        1 << self.z_shift
    }

    #[inline]
    fn x_mask(self) -> i32 {
        (1 << self.x_shift) - 1
    }

    #[inline]
    fn z_mask(self) -> i32 {
        (1 << self.z_shift) - 1
    }

    #[inline]
    pub fn volume(self) -> usize {
        self.sx() * self.sy * self.sz()
    }

    /// Linear storage index, Y-major then Z then X.
    #[inline]
    pub fn index(self, rel: RelativeBlockPosition) -> usize {
        (rel.y * self.sz() + rel.z) * self.sx() + rel.x
    }

    #[inline]
    pub fn contains(self, rel: RelativeBlockPosition) -> bool {
        rel.x < self.sx() && rel.y < self.sy && rel.z < self.sz()
    }

    /// Columns on the outer ring of the chunk footprint.
    #[inline]
    pub fn is_edge_column(self, x: usize, z: usize) -> bool {
        x == 0 || z == 0 || x + 1 == self.sx() || z + 1 == self.sz()
    }

    /// How many chunks away a single source of full light can still reach.
    #[inline]
    pub fn light_reach_chunks(self, maximum_light: u8) -> i32 {
        let steps = maximum_light.saturating_sub(1) as usize;
        let narrow = self.sx().min(self.sz());
        steps.div_ceil(narrow).max(1) as i32
    }
}

impl Default for ChunkDims {
    fn default() -> Self {
        Self {
            x_shift: 4,
            z_shift: 4,
            sy: 128,
        }
    }
}
