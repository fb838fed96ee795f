use std::ops::{Add, Sub};

/// A 2d integer coordinate, also used as a displacement vector.
/// Origin is the upper left of a grid, y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Checks that the point lies within `[0, width) x [0, height)`.
    pub fn in_bounds(&self, width: usize, height: usize) -> bool {
        self.x >= 0 && (self.x as usize) < width && self.y >= 0 && (self.y as usize) < height
    }

    /// Returns the 4 neighbours in the order north, east, south, west.
    pub fn cardinal_neighbours(&self) -> [Point; 4] {
        [
            Self::new(self.x, self.y - 1),
            Self::new(self.x + 1, self.y),
            Self::new(self.x, self.y + 1),
            Self::new(self.x - 1, self.y),
        ]
    }

    /// The vector pointing from `other` to `self`, divided by the gcd of its components.
    /// i.e. the smallest integer step that still lands on the line through both points.
    /// Returns the zero vector if the points are equal.
    pub fn reduced_direction_to(&self, other: Point) -> Point {
        let delta = *self - other;
        let divisor = gcd(delta.x.unsigned_abs(), delta.y.unsigned_abs());
        if divisor == 0 {
            return delta;
        }
        let divisor = divisor as i32;

        Self::new(delta.x / divisor, delta.y / divisor)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, vector: Point) -> Point {
        Point::new(self.x + vector.x, self.y + vector.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, vector: Point) -> Point {
        Point::new(self.x - vector.x, self.y - vector.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

fn gcd(a: u32, b: u32) -> u32 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_subtract() {
        let a = Point::new(3, -2);
        let b = Point::new(1, 5);

        assert_eq!(a + b, Point::new(4, 3));
        assert_eq!(a - b, Point::new(2, -7));
        assert_eq!(a + b - b, a);
    }

    #[test]
    fn test_in_bounds() {
        assert!(Point::new(0, 0).in_bounds(4, 4));
        assert!(Point::new(3, 3).in_bounds(4, 4));
        // OOB East
        assert!(!Point::new(4, 0).in_bounds(4, 4));
        // OOB South
        assert!(!Point::new(0, 4).in_bounds(4, 4));
        // OOB North and West
        assert!(!Point::new(0, -1).in_bounds(4, 4));
        assert!(!Point::new(-1, 0).in_bounds(4, 4));
        // Nothing fits in an empty grid
        assert!(!Point::new(0, 0).in_bounds(0, 0));
    }

    #[test]
    fn test_cardinal_neighbours() {
        let expected = [
            Point::new(2, 1),
            Point::new(3, 2),
            Point::new(2, 3),
            Point::new(1, 2),
        ];

        assert_eq!(Point::new(2, 2).cardinal_neighbours(), expected);
    }

    #[test]
    fn test_reduced_direction_to() {
        let a = Point::new(8, 1);
        let b = Point::new(2, 5);

        assert_eq!(a.reduced_direction_to(b), Point::new(3, -2));
        assert_eq!(b.reduced_direction_to(a), Point::new(-3, 2));

        // Axis aligned vectors reduce to a unit step
        assert_eq!(Point::new(0, 6).reduced_direction_to(Point::new(0, 2)), Point::new(0, 1));
        assert_eq!(Point::new(1, 0).reduced_direction_to(Point::new(7, 0)), Point::new(-1, 0));

        // Already reduced
        assert_eq!(Point::new(2, 1).reduced_direction_to(Point::new(1, 2)), Point::new(1, -1));
    }

    #[test]
    fn test_reduced_direction_to_self() {
        let a = Point::new(4, 4);

        assert_eq!(a.reduced_direction_to(a), Point::new(0, 0));
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(0, 0), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::new(-1, 12).to_string(), "(-1,12)");
    }
}
