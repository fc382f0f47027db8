//! Scene data: triangles, their reflectance and the directional light.
//!
//! A [`Scene`] owns its polygons. Every transform in [`crate::pipeline`] builds a
//! new scene instead of editing one, so a scene can be kept around after the
//! frame that produced it.

use crate::colors::Color;
use crate::math::vec3::Vec3;

/// A triangle with a flat reflectance colour.
///
/// Vertex order defines the winding, and so which side of the face is the
/// front (see [`crate::render::shading::is_hidden`]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Polygon {
    pub vertices: [Vec3; 3],
    pub reflectance: Color,
}

impl Polygon {
    pub fn new(a: Vec3, b: Vec3, c: Vec3, reflectance: Color) -> Self {
        Self {
            vertices: [a, b, c],
            reflectance,
        }
    }

    /// Builds a polygon from `[ax, ay, az, bx, by, bz, cx, cy, cz]`.
    pub fn from_coords(points: [f32; 9], reflectance: Color) -> Self {
        let vertex = |i: usize| Vec3::new(points[i * 3], points[i * 3 + 1], points[i * 3 + 2]);
        Self::new(vertex(0), vertex(1), vertex(2), reflectance)
    }

    /// The same triangle wound the other way round.
    pub fn reversed(&self) -> Self {
        let [a, b, c] = self.vertices;
        Self::new(c, b, a, self.reflectance)
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    /// Bounds of nothing: every min is `+inf` and every max `-inf`.
    pub const EMPTY: Self = Self {
        min: Vec3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
        max: Vec3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
    };

    /// True when no point has been included yet.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grows the box to contain `p`.
    pub fn include(&mut self, p: Vec3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn depth(&self) -> f32 {
        self.max.z - self.min.z
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// An ordered list of polygons plus a light direction.
///
/// Polygon order is the order they were read in. It only matters when two
/// polygons land on exactly the same depth at a pixel: the earlier one wins.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    polygons: Vec<Polygon>,
    light: Vec3,
}

impl Scene {
    pub fn new(polygons: Vec<Polygon>, light: Vec3) -> Self {
        Self { polygons, light }
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// The light vector. Scene transforms move it along with the vertices.
    pub fn light(&self) -> Vec3 {
        self.light
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Bounding box of every vertex of every polygon.
    ///
    /// Returns [`Bounds::EMPTY`] for a scene without polygons.
    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::EMPTY;
        for polygon in &self.polygons {
            for vertex in polygon.vertices {
                bounds.include(vertex);
            }
        }
        bounds
    }
}
