pub mod line;
pub mod triangle;

pub use self::triangle::fragment_input;
pub use self::line::draw_line_bresenham;

pub(crate) use self::triangle::rasterize_tile;
