use rayon::prelude::*;

/// One evaluated point of a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint<T> {
    pub value: f64,
    pub result: T,
}

/// Results of evaluating a function over a series of sweep values.
///
/// Points keep the order of the values they were evaluated at.
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep<T> {
    points: Vec<SweepPoint<T>>,
}

impl<T> Sweep<T> {
    /// Evaluates `f` at each value in turn, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn evaluate<I, F, E>(values: I, mut f: F) -> Result<Self, E>
    where
        I: IntoIterator<Item = f64>,
        F: FnMut(f64) -> Result<T, E>,
    {
        let points = values
            .into_iter()
            .map(|value| f(value).map(|result| SweepPoint { value, result }))
            .collect::<Result<_, _>>()?;
        Ok(Self { points })
    }

    /// Evaluates `f` at every value on the rayon thread pool.
    ///
    /// Results are in the same order as `values`.
    ///
    /// # Errors
    ///
    /// Returns an error produced by `f`. Which one is unspecified when
    /// several values fail.
    pub fn evaluate_parallel<F, E>(values: &[f64], f: F) -> Result<Self, E>
    where
        T: Send,
        E: Send,
        F: Fn(f64) -> Result<T, E> + Sync,
    {
        let points = values
            .par_iter()
            .map(|&value| f(value).map(|result| SweepPoint { value, result }))
            .collect::<Result<_, _>>()?;
        Ok(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[SweepPoint<T>] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SweepPoint<T>> {
        self.points.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    pub fn results(&self) -> impl Iterator<Item = &T> {
        self.points.iter().map(|p| &p.result)
    }

    /// Returns the result at `value`, if it was swept.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn get(&self, value: f64) -> Option<&T> {
        self.points
            .iter()
            .find(|p| p.value == value)
            .map(|p| &p.result)
    }
}

impl Sweep<f64> {
    /// Returns the point with the smallest result, ignoring NaN results.
    #[must_use]
    pub fn min(&self) -> Option<SweepPoint<f64>> {
        self.finite_points().min_by(|a, b| a.result.total_cmp(&b.result))
    }

    /// Returns the point with the largest result, ignoring NaN results.
    #[must_use]
    pub fn max(&self) -> Option<SweepPoint<f64>> {
        self.finite_points().max_by(|a, b| a.result.total_cmp(&b.result))
    }

    fn finite_points(&self) -> impl Iterator<Item = SweepPoint<f64>> + '_ {
        self.points.iter().copied().filter(|p| !p.result.is_nan())
    }
}

impl<T> IntoIterator for Sweep<T> {
    type Item = SweepPoint<T>;
    type IntoIter = std::vec::IntoIter<SweepPoint<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    #[test]
    fn sequential_and_parallel_agree() {
        let values: Vec<f64> = (0..50).map(f64::from).collect();
        let square = |x: f64| Ok::<_, Infallible>(x * x);

        let sequential = Sweep::evaluate(values.iter().copied(), square).unwrap();
        let parallel = Sweep::evaluate_parallel(&values, square).unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(parallel.len(), 50);
        assert_eq!(parallel.values().collect::<Vec<_>>(), values);
        assert_eq!(parallel.get(7.0), Some(&49.0));
    }

    #[test]
    fn first_error_stops_sequential_sweep() {
        let mut calls = 0;
        let result = Sweep::evaluate([1.0, 2.0, 3.0], |x| {
            calls += 1;
            if x > 1.5 { Err("too big") } else { Ok(x) }
        });

        assert_eq!(result, Err("too big"));
        assert_eq!(calls, 2);
    }

    #[test]
    fn parallel_errors_surface() {
        let result = Sweep::evaluate_parallel(&[1.0, -1.0, 2.0], |x: f64| {
            if x < 0.0 { Err(x) } else { Ok(x.sqrt()) }
        });
        assert_eq!(result, Err(-1.0));
    }

    #[test]
    fn extremes_skip_nan() {
        let sweep =
            Sweep::evaluate([0.0, 1.0, 2.0, 3.0], |x: f64| {
                Ok::<_, Infallible>(if x == 1.0 { f64::NAN } else { (x - 2.0).abs() })
            })
            .unwrap();

        assert_eq!(sweep.min().map(|p| p.value), Some(2.0));
        assert_eq!(sweep.max().map(|p| p.value), Some(0.0));
    }

    #[test]
    fn empty_sweep() {
        let sweep = Sweep::<f64>::evaluate_parallel(&[], |x| Ok::<_, Infallible>(x)).unwrap();
        assert!(sweep.is_empty());
        assert!(sweep.min().is_none());
    }
}
