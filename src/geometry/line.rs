use num_traits::Float;

/// Clips a line segment against an axis-aligned box using the Liang-Barsky algorithm.
///
/// The box includes its edges. Returns `None` when no part of the segment lies inside the box,
/// or when either endpoint is not finite.
pub fn clip_segment<T: Float>(start: (T, T), end: (T, T), min: (T, T), max: (T, T)) -> Option<((T, T), (T, T))> {
    let (x1, y1) = start;
    let (x2, y2) = end;

    if !(x1.is_finite() && y1.is_finite() && x2.is_finite() && y2.is_finite()) {
        return None;
    }

    let dx = x2 - x1;
    let dy = y2 - y1;

    let mut t0 = T::zero();
    let mut t1 = T::one();

    for &(p, q) in &[(-dx, x1 - min.0), (dx, max.0 - x1), (-dy, y1 - min.1), (dy, max.1 - y1)] {
        if p.is_zero() {
            // parallel to this edge, and entirely outside of it
            if q < T::zero() {
                return None;
            }

            continue;
        }

        let r = q / p;

        if p < T::zero() {
            if r > t1 {
                return None;
            } else if r > t0 {
                t0 = r;
            }
        } else if r < t0 {
            return None;
        } else if r < t1 {
            t1 = r;
        }
    }

    Some(((x1 + t0 * dx, y1 + t0 * dy), (x1 + t1 * dx, y1 + t1 * dy)))
}

#[cfg(test)]
mod test {
    use super::clip_segment;

    const MIN: (f64, f64) = (0.0, 0.0);
    const MAX: (f64, f64) = (15.0, 15.0);

    fn assert_segment(clipped: Option<((f64, f64), (f64, f64))>, expected: ((f64, f64), (f64, f64))) {
        let ((x1, y1), (x2, y2)) = clipped.unwrap();
        let ((ex1, ey1), (ex2, ey2)) = expected;

        for &(a, b) in &[(x1, ex1), (y1, ey1), (x2, ex2), (y2, ey2)] {
            assert!((a - b).abs() < 1e-3, "{:?} != {:?}", clipped, expected);
        }
    }

    #[test]
    fn test_inside_unchanged() {
        assert_eq!(clip_segment((1.0, 2.0), (14.0, 9.0), MIN, MAX), Some(((1.0, 2.0), (14.0, 9.0))));
        assert_eq!(clip_segment((3.0, 3.0), (3.0, 3.0), MIN, MAX), Some(((3.0, 3.0), (3.0, 3.0))));
    }

    #[test]
    fn test_crossing_is_shortened() {
        assert_segment(clip_segment((-5.0, 4.0), (20.0, 4.0), MIN, MAX), ((0.0, 4.0), (15.0, 4.0)));
        assert_segment(clip_segment((2.0, 2.0), (2.0, 40.0), MIN, MAX), ((2.0, 2.0), (2.0, 15.0)));
        assert_segment(clip_segment((-4.0, -4.0), (20.0, 20.0), MIN, MAX), ((0.0, 0.0), (15.0, 15.0)));
    }

    #[test]
    fn test_outside_rejected() {
        assert_eq!(clip_segment((-5.0, -1.0), (20.0, -1.0), MIN, MAX), None);
        assert_eq!(clip_segment((16.0, 0.0), (30.0, 15.0), MIN, MAX), None);
        assert_eq!(clip_segment((-10.0, 5.0), (5.0, 30.0), MIN, MAX), None);
    }

    #[test]
    fn test_extreme_and_non_finite() {
        let extreme = clip_segment((::std::i32::MIN as f64, 0.0), (::std::i32::MAX as f64, 0.0), MIN, MAX);

        assert_segment(extreme, ((0.0, 0.0), (15.0, 0.0)));

        assert_eq!(clip_segment((0.0, 0.0), (::std::f64::INFINITY, 0.0), MIN, MAX), None);
        assert_eq!(clip_segment((::std::f64::NAN, 0.0), (4.0, 4.0), MIN, MAX), None);
    }
}
