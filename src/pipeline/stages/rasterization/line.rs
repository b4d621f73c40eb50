/// Uses Bresenham's algorithm to draw a line, including both endpoints.
///
/// The error terms are kept in `i64` so any pair of `i32` endpoints can be stepped without overflow.
/// Callers are expected to clip long lines first.
///
/// [https://en.wikipedia.org/wiki/Bresenham%27s_line_algorithm](https://en.wikipedia.org/wiki/Bresenham%27s_line_algorithm)
pub fn draw_line_bresenham<F>(x0: i32, y0: i32, x1: i32, y1: i32, mut plot: F) where F: FnMut(i32, i32) {
    let (mut x, mut y) = (x0 as i64, y0 as i64);
    let (x1, y1) = (x1 as i64, y1 as i64);

    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();

    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };

    let mut err = dx + dy;

    loop {
        plot(x as i32, y as i32);

        if x == x1 && y == y1 { break; }

        let e2 = 2 * err;

        if e2 >= dy {
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod test {
    use super::draw_line_bresenham;

    fn collect(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
        let mut points = Vec::new();
        draw_line_bresenham(x0, y0, x1, y1, |x, y| points.push((x, y)));
        points
    }

    #[test]
    fn test_single_point() {
        assert_eq!(collect(3, 4, 3, 4), vec![(3, 4)]);
    }

    #[test]
    fn test_axis_aligned() {
        assert_eq!(collect(0, 0, 3, 0), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(collect(2, 2, 2, -1), vec![(2, 2), (2, 1), (2, 0), (2, -1)]);
    }

    #[test]
    fn test_full_range_does_not_overflow() {
        let mut count = 0;
        let mut last = (0, 0);

        draw_line_bresenham(::std::i32::MAX - 2, ::std::i32::MIN, ::std::i32::MAX, ::std::i32::MIN + 1, |x, y| {
            count += 1;
            last = (x, y);
        });

        assert_eq!(count, 3);
        assert_eq!(last, (::std::i32::MAX, ::std::i32::MIN + 1));
    }

    #[test]
    fn test_all_octants_connected() {
        for &(x1, y1) in &[(7, 2), (2, 7), (-2, 7), (-7, 2), (-7, -2), (-2, -7), (2, -7), (7, -2)] {
            let points = collect(0, 0, x1, y1);

            assert_eq!(points[0], (0, 0));
            assert_eq!(*points.last().unwrap(), (x1, y1));
            assert_eq!(points.len() as i32, x1.abs().max(y1.abs()) + 1);

            for pair in points.windows(2) {
                assert!((pair[0].0 - pair[1].0).abs() <= 1 && (pair[0].1 - pair[1].1).abs() <= 1);
            }
        }
    }
}
