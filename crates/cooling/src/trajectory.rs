use quench_solvers::transient::recurrence;

/// Relative tolerance used when looking up a time on the grid.
const TIME_MATCH_TOL: f64 = 1e-9;

/// A temperature recorded at a grid time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub time: f64,
    pub temperature: f64,
}

/// The recorded temperatures of one run, in time order.
///
/// A trajectory always holds at least the initial point.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    points: Vec<Point>,
}

impl Trajectory {
    /// Builds a trajectory from solver history.
    pub(crate) fn from_history(history: &[recurrence::Point<f64>]) -> Self {
        let points = history
            .iter()
            .map(|point| Point {
                time: point.time,
                temperature: point.state,
            })
            .collect();
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the number of recorded points, including the initial one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.time)
    }

    pub fn temperatures(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.temperature)
    }

    #[must_use]
    pub fn initial(&self) -> Point {
        self.points[0]
    }

    #[must_use]
    pub fn terminal(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    #[must_use]
    pub fn terminal_temperature(&self) -> f64 {
        self.terminal().temperature
    }

    /// Returns the temperature recorded at `time`, if `time` is a grid time.
    ///
    /// No interpolation is done between grid points.
    #[must_use]
    pub fn temperature_at(&self, time: f64) -> Option<f64> {
        let index = self.points.partition_point(|p| p.time < time);
        [index.checked_sub(1), Some(index)]
            .into_iter()
            .flatten()
            .filter_map(|i| self.points.get(i))
            .find(|p| (p.time - time).abs() <= TIME_MATCH_TOL * time.abs().max(1.0))
            .map(|p| p.temperature)
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
