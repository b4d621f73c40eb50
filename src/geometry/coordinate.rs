/// Integer pixel coordinate. Signed, since projected geometry may land off-screen.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    #[inline]
    pub fn new(x: i32, y: i32) -> Coordinate {
        Coordinate { x, y }
    }
}
