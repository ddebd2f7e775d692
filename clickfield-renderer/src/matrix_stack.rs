use std::ops::{Deref, DerefMut};

use glam::{Mat4, Vec3};

use crate::Error;

/// LIFO stack of saved model-view transforms.
///
/// Holds the current shared transform plus every copy saved by [`push`].
/// Prefer [`MatrixStack::scope`], which restores the transform when the
/// returned guard goes out of scope, including on early returns.
///
/// [`push`]: MatrixStack::push
#[derive(Debug, Clone, Default)]
pub struct MatrixStack {
    current: Mat4,
    saved: Vec<Mat4>,
}

impl MatrixStack {
    pub fn new() -> Self {
        Self { current: Mat4::IDENTITY, saved: Vec::new() }
    }

    /// Replaces the current transform, leaving saved transforms untouched.
    pub fn load(&mut self, transform: Mat4) {
        self.current = transform;
    }

    /// Returns the current transform.
    pub fn current(&self) -> &Mat4 {
        &self.current
    }

    /// Number of saved transforms.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Saves a copy of the current transform.
    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restores the most recently saved transform.
    ///
    /// # Errors
    /// Returns [`Error::Invariant`] when nothing has been pushed.
    pub fn pop(&mut self) -> Result<(), Error> {
        self.current = self.saved.pop().ok_or(Error::matrix_stack_underflow())?;
        Ok(())
    }

    /// Post-multiplies the current transform by a translation.
    pub fn translate(&mut self, offset: Vec3) {
        self.current *= Mat4::from_translation(offset);
    }

    /// Pushes the current transform and returns a guard that pops it on drop.
    pub fn scope(&mut self) -> MatrixScope<'_> {
        self.push();
        MatrixScope { stack: self }
    }
}

/// Nested transform scope created by [`MatrixStack::scope`].
#[derive(Debug)]
pub struct MatrixScope<'a> {
    stack: &'a mut MatrixStack,
}

impl Deref for MatrixScope<'_> {
    type Target = MatrixStack;

    fn deref(&self) -> &Self::Target {
        self.stack
    }
}

impl DerefMut for MatrixScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.stack
    }
}

impl Drop for MatrixScope<'_> {
    fn drop(&mut self) {
        // the matching push happened in `scope`; only an unbalanced manual
        // pop inside the scope can leave the stack empty here
        if self.stack.pop().is_err() {
            log::error!("matrix scope closed on an empty stack");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_restores_transform() {
        let mut stack = MatrixStack::new();
        let base = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        stack.load(base);

        for i in 0..5 {
            stack.push();
            stack.translate(Vec3::new(i as f32, 0.5, -1.0));
        }
        assert_eq!(stack.depth(), 5);

        for _ in 0..5 {
            stack.pop().unwrap();
        }

        assert_eq!(*stack.current(), base);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_pop_on_empty_stack_fails() {
        let mut stack = MatrixStack::new();
        stack.push();
        stack.pop().unwrap();

        assert!(matches!(stack.pop(), Err(Error::Invariant(_))));
    }

    #[test]
    fn test_translate_composes_with_current() {
        let mut stack = MatrixStack::new();
        stack.load(Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)));

        stack.translate(Vec3::new(1.0, 2.0, 0.0));

        let origin = stack.current().transform_point3(Vec3::ZERO);
        assert_eq!(origin, Vec3::new(1.0, 2.0, -5.0));
    }

    #[test]
    fn test_scope_pops_on_drop() {
        let mut stack = MatrixStack::new();

        {
            let mut scope = stack.scope();
            scope.translate(Vec3::new(4.0, 5.0, 6.0));
            assert_eq!(scope.depth(), 1);
            assert_ne!(*scope.current(), Mat4::IDENTITY);
        }

        assert_eq!(stack.depth(), 0);
        assert_eq!(*stack.current(), Mat4::IDENTITY);
    }

    #[test]
    fn test_scope_pops_on_early_return() {
        fn failing_draw(stack: &mut MatrixStack) -> Result<(), Error> {
            let mut scope = stack.scope();
            scope.translate(Vec3::X);
            Err(Error::Resource("draw failed".into()))
        }

        let mut stack = MatrixStack::new();
        assert!(failing_draw(&mut stack).is_err());

        assert_eq!(stack.depth(), 0);
        assert_eq!(*stack.current(), Mat4::IDENTITY);
    }
}
