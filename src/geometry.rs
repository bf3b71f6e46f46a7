// Copyright (C) 2025 Hove and/or its affiliates.
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, version 3.

// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more
// details.

// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>

//! Point-in-polygon test used to select the stops of a service area.

use geo::Coord;

/// Even-odd crossing test of `point` against the closed ring `polygon`.
///
/// An edge is crossed when `min(y) < point.y <= max(y)` and the point lies
/// left of the edge; vertical edges count as soon as `point.x` is not right of
/// both ends. Horizontal edges are never crossed. These boundary rules are
/// relied upon by consumers comparing stop lists, `geo::Contains` treats the
/// boundary differently and cannot be used instead.
pub fn is_point_in_polygon(point: Coord<f64>, polygon: &[Coord<f64>]) -> bool {
    let (x, y) = point.x_y();
    let mut inside = false;
    let mut p1 = match polygon.first() {
        Some(first) => *first,
        None => return false,
    };
    for p2 in polygon.iter().skip(1).chain(polygon.first()) {
        if y > p1.y.min(p2.y) && y <= p1.y.max(p2.y) && x <= p1.x.max(p2.x) {
            let mut x_intersection = 0.0;
            if p1.y != p2.y {
                x_intersection = (y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x;
            }
            if p1.x == p2.x || x <= x_intersection {
                inside = !inside;
            }
        }
        p1 = *p2;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn square() -> Vec<Coord<f64>> {
        vec![
            Coord { x: 0., y: 0. },
            Coord { x: 0., y: 10. },
            Coord { x: 10., y: 10. },
            Coord { x: 10., y: 0. },
        ]
    }

    #[test]
    fn inside_square() {
        assert!(is_point_in_polygon(Coord { x: 5., y: 5. }, &square()));
    }

    #[test]
    fn outside_square() {
        assert!(!is_point_in_polygon(Coord { x: 15., y: 5. }, &square()));
        assert!(!is_point_in_polygon(Coord { x: -1., y: 5. }, &square()));
        assert!(!is_point_in_polygon(Coord { x: 5., y: 11. }, &square()));
    }

    #[test]
    fn horizontal_edges_are_half_open() {
        // Upper edge: only the right vertical edge is crossed
        assert!(is_point_in_polygon(Coord { x: 5., y: 10. }, &square()));
        // Lower edge: no edge satisfies min(y) < y
        assert!(!is_point_in_polygon(Coord { x: 5., y: 0. }, &square()));
    }

    #[test]
    fn vertical_edges() {
        // On the left edge, both vertical edges are crossed
        assert!(!is_point_in_polygon(Coord { x: 0., y: 5. }, &square()));
        // On the right edge, only the right one
        assert!(is_point_in_polygon(Coord { x: 10., y: 5. }, &square()));
    }

    #[test]
    fn concave_polygon() {
        // A "U" opened upwards
        let polygon = vec![
            Coord { x: 0., y: 0. },
            Coord { x: 0., y: 10. },
            Coord { x: 3., y: 10. },
            Coord { x: 3., y: 3. },
            Coord { x: 7., y: 3. },
            Coord { x: 7., y: 10. },
            Coord { x: 10., y: 10. },
            Coord { x: 10., y: 0. },
        ];
        assert!(is_point_in_polygon(Coord { x: 1.5, y: 8. }, &polygon));
        assert!(!is_point_in_polygon(Coord { x: 5., y: 8. }, &polygon));
        assert!(is_point_in_polygon(Coord { x: 5., y: 1. }, &polygon));
    }

    #[test]
    fn slanted_edges() {
        let triangle = vec![
            Coord { x: 0., y: 0. },
            Coord { x: 5., y: 10. },
            Coord { x: 10., y: 0. },
        ];
        assert!(is_point_in_polygon(Coord { x: 5., y: 5. }, &triangle));
        assert!(!is_point_in_polygon(Coord { x: 1., y: 8. }, &triangle));
    }

    #[test]
    fn empty_polygon() {
        assert_eq!(false, is_point_in_polygon(Coord { x: 0., y: 0. }, &[]));
    }
}
