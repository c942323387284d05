/// A black-box function that can be evaluated one value or many values at a time.
///
/// Solvers only ever see a function through this trait. The two wrappers,
/// [`Scalar`] and [`Batched`], decide which of the two operations is native:
///
/// - [`Scalar`] wraps `Fn(T) -> T` and evaluates slices by looping.
/// - [`Batched`] wraps `Fn(&[T], &mut [T])` and evaluates a single value
///   through a length-one call.
///
/// Implementations must be pure: solvers re-evaluate the same points on
/// every iteration and assume the answer does not change.
pub trait Evaluate<T: Copy> {
    /// Evaluates the function at `x`.
    fn eval(&self, x: T) -> T;

    /// Evaluates the function at every point in `xs`, writing into `out`.
    ///
    /// Callers must pass slices of equal length.
    fn eval_many(&self, xs: &[T], out: &mut [T]) {
        debug_assert_eq!(xs.len(), out.len());
        for (y, &x) in out.iter_mut().zip(xs) {
            *y = self.eval(x);
        }
    }

    /// Returns true if [`eval_many`](Evaluate::eval_many) is a single native call.
    fn is_batched(&self) -> bool {
        false
    }
}

impl<T, E> Evaluate<T> for &E
where
    T: Copy,
    E: Evaluate<T> + ?Sized,
{
    fn eval(&self, x: T) -> T {
        (**self).eval(x)
    }

    fn eval_many(&self, xs: &[T], out: &mut [T]) {
        (**self).eval_many(xs, out);
    }

    fn is_batched(&self) -> bool {
        (**self).is_batched()
    }
}

/// A function that evaluates one value per call.
#[derive(Debug, Clone, Copy)]
pub struct Scalar<F>(pub F);

impl<T, F> Evaluate<T> for Scalar<F>
where
    T: Copy,
    F: Fn(T) -> T,
{
    fn eval(&self, x: T) -> T {
        (self.0)(x)
    }
}

/// A function that fills an output slice from an input slice in one call.
///
/// The closure receives `(inputs, outputs)` of equal length.
#[derive(Debug, Clone, Copy)]
pub struct Batched<F>(pub F);

impl<T, F> Evaluate<T> for Batched<F>
where
    T: Copy,
    F: Fn(&[T], &mut [T]),
{
    fn eval(&self, x: T) -> T {
        let mut out = [x];
        (self.0)(&[x], &mut out);
        out[0]
    }

    fn eval_many(&self, xs: &[T], out: &mut [T]) {
        debug_assert_eq!(xs.len(), out.len());
        (self.0)(xs, out);
    }

    fn is_batched(&self) -> bool {
        true
    }
}
