/// A closed range of ray parameters or coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    ///
    /// NaN is never contained.
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Linear position of x inside the interval, 0 at min and 1 at max.
    pub fn fraction(&self, x: f32) -> f32 {
        (x - self.min) / self.size()
    }

    /// Point at fraction t of the way from min to max.
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + t * self.size()
    }

    /// Grows the interval by `padding` on each side.
    pub fn pad(&self, padding: f32) -> Interval {
        Interval::new(self.min - padding, self.max + padding)
    }

    /// Expands the interval by delta/2 on each side.
    pub fn expand(&self, delta: f32) -> Interval {
        self.pad(delta / 2.0)
    }

    /// Creates an interval that surrounds two other intervals.
    pub fn surrounding(a: &Interval, b: &Interval) -> Interval {
        Interval::new(a.min.min(b.min), a.max.max(b.max))
    }

    /// An empty interval (min > max, contains nothing).
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// A universe interval (contains everything).
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_contains() {
        let interval = Interval::new(0.0, 10.0);

        // Inclusive bounds
        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(interval.contains(5.0));

        assert!(!interval.contains(-0.1));
        assert!(!interval.contains(10.1));
        assert!(!interval.contains(f32::NAN));
    }

    #[test]
    fn test_interval_fraction_and_lerp() {
        let interval = Interval::new(2.0, 6.0);

        assert_eq!(interval.fraction(2.0), 0.0);
        assert_eq!(interval.fraction(4.0), 0.5);
        assert_eq!(interval.fraction(6.0), 1.0);
        assert_eq!(interval.lerp(0.25), 3.0);
        assert_eq!(interval.fraction(interval.lerp(0.75)), 0.75);
    }

    #[test]
    fn test_interval_pad_and_expand() {
        let interval = Interval::new(0.0, 10.0);

        let padded = interval.pad(2.0);
        assert_eq!(padded.min, -2.0);
        assert_eq!(padded.max, 12.0);

        assert_eq!(interval.expand(4.0), padded);
    }

    #[test]
    fn test_interval_empty_and_universe() {
        assert!(!Interval::EMPTY.contains(0.0));
        assert!(Interval::UNIVERSE.contains(1e10));
        assert!(Interval::UNIVERSE.contains(-1e10));
        assert_eq!(Interval::UNIVERSE.size(), f32::INFINITY);
    }

    #[test]
    fn test_interval_surrounding() {
        let a = Interval::new(1.0, 5.0);
        let b = Interval::new(-2.0, 3.0);
        let s = Interval::surrounding(&a, &b);

        assert_eq!(s, Interval::new(-2.0, 5.0));
    }
}
