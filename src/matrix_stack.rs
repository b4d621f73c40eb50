//! Fixed-depth transform matrix stack

use nalgebra::{Matrix4, Perspective3, Rotation3, Unit, Vector3};

/// Maximum number of matrices a stack can hold
pub const MAX_MATRIX_STACK_DEPTH: usize = 128;

/// Fixed-capacity stack of 4x4 transforms. The top of the stack is the current matrix.
///
/// Pushing past the maximum depth or popping the last matrix are silent no-ops,
/// so callers are responsible for balancing their pushes and pops.
#[derive(Clone)]
pub struct MatrixStack {
    stack: Box<[Matrix4<f32>]>,
    pointer: usize,
}

impl Default for MatrixStack {
    fn default() -> MatrixStack {
        MatrixStack::new()
    }
}

impl MatrixStack {
    /// Creates a new stack holding a single identity matrix
    pub fn new() -> MatrixStack {
        MatrixStack {
            stack: vec![Matrix4::identity(); MAX_MATRIX_STACK_DEPTH].into_boxed_slice(),
            pointer: 0,
        }
    }

    /// Returns the current (top) matrix
    #[inline]
    pub fn matrix(&self) -> Matrix4<f32> {
        self.stack[self.pointer]
    }

    /// Number of matrices pushed above the base matrix
    #[inline]
    pub fn depth(&self) -> usize {
        self.pointer
    }

    #[inline]
    fn top(&mut self) -> &mut Matrix4<f32> {
        &mut self.stack[self.pointer]
    }

    pub fn load_identity(&mut self) {
        *self.top() = Matrix4::identity();
    }

    pub fn load_matrix(&mut self, m: &Matrix4<f32>) {
        *self.top() = *m;
    }

    /// Right-multiplies the current matrix by `m`
    pub fn mult_matrix(&mut self, m: &Matrix4<f32>) {
        let top = self.top();
        *top = *top * m;
    }

    /// Duplicates the current matrix onto the top of the stack
    pub fn push(&mut self) {
        if self.pointer < MAX_MATRIX_STACK_DEPTH - 1 {
            self.pointer += 1;
            self.stack[self.pointer] = self.stack[self.pointer - 1];
        }
    }

    pub fn pop(&mut self) {
        if self.pointer > 0 {
            self.pointer -= 1;
        }
    }

    pub fn translate(&mut self, t: &Vector3<f32>) {
        self.mult_matrix(&Matrix4::new_translation(t));
    }

    /// Rotates by `angle` radians around `axis`. A zero-length axis leaves the matrix untouched.
    pub fn rotate(&mut self, angle: f32, axis: &Vector3<f32>) {
        match Unit::try_new(*axis, 0.0) {
            Some(axis) => self.mult_matrix(&Rotation3::from_axis_angle(&axis, angle).to_homogeneous()),
            None => warn!("ignoring rotation around a zero-length axis"),
        }
    }

    pub fn scale(&mut self, s: &Vector3<f32>) {
        self.mult_matrix(&Matrix4::new_nonuniform_scaling(s));
    }

    /// Right-multiplies an OpenGL-style perspective projection, with `fov` as the vertical field of view in radians.
    ///
    /// Degenerate parameters (zero aspect ratio, or equal near and far planes) leave the matrix untouched.
    pub fn perspective(&mut self, fov: f32, aspect: f32, znear: f32, zfar: f32) {
        if aspect.abs() <= ::std::f32::EPSILON || (zfar - znear).abs() <= ::std::f32::EPSILON {
            warn!("ignoring degenerate perspective projection (aspect: {}, near: {}, far: {})", aspect, znear, zfar);
            return;
        }

        self.mult_matrix(&Perspective3::new(aspect, fov, znear, zfar).to_homogeneous());
    }
}

#[cfg(test)]
mod test {
    use nalgebra::{Matrix4, Vector3, Vector4};

    use super::{MatrixStack, MAX_MATRIX_STACK_DEPTH};

    #[test]
    fn test_push_pop() {
        let mut stack = MatrixStack::new();

        stack.translate(&Vector3::new(1.0, 2.0, 3.0));
        let base = stack.matrix();

        stack.push();
        assert_eq!(stack.matrix(), base);

        stack.scale(&Vector3::new(2.0, 2.0, 2.0));
        assert!(stack.matrix() != base);

        stack.pop();
        assert_eq!(stack.matrix(), base);
    }

    #[test]
    fn test_saturating_bounds() {
        let mut stack = MatrixStack::new();

        stack.pop();
        stack.pop();
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.matrix(), Matrix4::identity());

        for _ in 0..MAX_MATRIX_STACK_DEPTH * 2 {
            stack.push();
        }

        assert_eq!(stack.depth(), MAX_MATRIX_STACK_DEPTH - 1);
    }

    #[test]
    fn test_right_multiplication_order() {
        let mut stack = MatrixStack::new();

        stack.translate(&Vector3::new(0.0, 0.0, -5.0));
        stack.scale(&Vector3::new(2.0, 2.0, 2.0));

        // scale is applied first, then the translation
        let p = stack.matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);

        assert_eq!(p, Vector4::new(2.0, 0.0, -5.0, 1.0));
    }

    #[test]
    fn test_rotate_zero_axis_is_noop() {
        let mut stack = MatrixStack::new();

        stack.rotate(1.0, &Vector3::zeros());

        assert_eq!(stack.matrix(), Matrix4::identity());
    }

    #[test]
    fn test_perspective_maps_near_and_far() {
        let mut stack = MatrixStack::new();

        stack.perspective(60.0f32.to_radians(), 4.0 / 3.0, 1.0, 100.0);

        let near = stack.matrix() * Vector4::new(0.0, 0.0, -1.0, 1.0);
        let far = stack.matrix() * Vector4::new(0.0, 0.0, -100.0, 1.0);

        assert!((near.z / near.w + 1.0).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }
}
