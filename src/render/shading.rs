//! Backface culling and flat (Lambertian) shading.
//!
//! The viewer looks along +z, so a face whose normal has a positive z
//! component points away from the camera.

use crate::colors::Color;
use crate::math::vec3::Vec3;
use crate::scene::{Polygon, Scene};

/// Face normal `(v1 - v0) x (v2 - v1)`. Not normalized.
pub fn normal(polygon: &Polygon) -> Vec3 {
    let [v0, v1, v2] = polygon.vertices;
    (v1 - v0).cross(v2 - v1)
}

/// True if the polygon faces away from the viewer and should not be drawn.
pub fn is_hidden(polygon: &Polygon) -> bool {
    normal(polygon).z > 0.0
}

/// Flat colour of `polygon` lit by a directional light plus ambient light.
///
/// With `cos` the cosine between the face normal and `light_direction`, each
/// channel is `reflectance / 255 * (ambient + light * cos)` when `cos > 0`
/// and `reflectance / 255 * ambient` otherwise, truncated and capped at 255.
pub fn shade(polygon: &Polygon, light_direction: Vec3, light_color: Color, ambient: Color) -> Color {
    let cos = normal(polygon).cos_theta(light_direction);
    let direct = cos.max(0.0);

    let channel = |reflectance: u8, ambient: u8, light: u8| -> u8 {
        let intensity = if cos > 0.0 {
            ambient as f32 + light as f32 * direct
        } else {
            ambient as f32
        };
        // f32 -> u32 truncates toward zero and saturates at 0.
        let value = (reflectance as f32 / 255.0 * intensity) as u32;
        value.min(255) as u8
    };

    let r = polygon.reflectance;
    Color::new(
        channel(r.r, ambient.r, light_color.r),
        channel(r.g, ambient.g, light_color.g),
        channel(r.b, ambient.b, light_color.b),
    )
}

/// What one frame decided about one polygon.
///
/// Kept apart from [`Polygon`] so scenes stay immutable; a fresh list is
/// built every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FacePlan {
    /// Index into [`Scene::polygons`].
    pub index: usize,
    pub visible: bool,
    /// Shaded colour; `None` for culled faces.
    pub color: Option<Color>,
}

/// Culls and shades every polygon of `scene`, in scene order.
pub fn plan_faces(scene: &Scene, light_color: Color, ambient: Color) -> Vec<FacePlan> {
    let light = scene.light();
    scene
        .polygons()
        .iter()
        .enumerate()
        .map(|(index, polygon)| {
            if is_hidden(polygon) {
                FacePlan {
                    index,
                    visible: false,
                    color: None,
                }
            } else {
                FacePlan {
                    index,
                    visible: true,
                    color: Some(shade(polygon, light, light_color, ambient)),
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::WHITE;

    /// Counter-clockwise in screen space (y down): normal points to -z.
    fn facing_viewer(reflectance: Color) -> Polygon {
        Polygon::from_coords([0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0], reflectance)
    }

    #[test]
    fn test_normal_direction() {
        let n = normal(&facing_viewer(WHITE));
        assert_eq!(n, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_reversing_winding_flips_visibility() {
        let visible = facing_viewer(WHITE);
        assert!(!is_hidden(&visible));
        assert!(is_hidden(&visible.reversed()));
        assert!(!is_hidden(&visible.reversed().reversed()));
    }

    #[test]
    fn test_edge_on_polygon_is_visible() {
        let edge_on = Polygon::from_coords([0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 1.0], WHITE);
        assert_eq!(normal(&edge_on).z, 0.0);
        assert!(!is_hidden(&edge_on));
    }

    #[test]
    fn test_shade_facing_light() {
        let poly = facing_viewer(Color::new(255, 128, 0));
        let color = shade(&poly, Vec3::new(0.0, 0.0, -1.0), Color::gray(100), Color::gray(50));
        // cos = 1: reflectance/255 * (50 + 100)
        assert_eq!(color, Color::new(150, 75, 0));
    }

    #[test]
    fn test_shade_partial_angle() {
        let poly = facing_viewer(WHITE);
        // 60 degrees off the normal: cos = 0.5
        let light = Vec3::new(0.0, 3f32.sqrt(), -1.0);
        let color = shade(&poly, light, Color::gray(200), Color::gray(10));
        // 10 + 200 * 0.5 = 110, allow one step of float truncation
        assert!(color.r == 110 || color.r == 109, "got {color}");
        assert_eq!(color.r, color.g);
        assert_eq!(color.g, color.b);
    }

    #[test]
    fn test_shade_facing_away_is_ambient_only() {
        let poly = facing_viewer(Color::new(255, 51, 0));
        let color = shade(&poly, Vec3::new(0.0, 0.0, 1.0), WHITE, Color::gray(100));
        assert_eq!(color, Color::new(100, 20, 0));
        let sideways = shade(&poly, Vec3::new(1.0, 0.0, 0.0), WHITE, Color::gray(100));
        assert_eq!(sideways, color);
    }

    #[test]
    fn test_shade_clamps_to_255() {
        let poly = facing_viewer(WHITE);
        let color = shade(&poly, Vec3::new(0.0, 0.0, -1.0), WHITE, WHITE);
        assert_eq!(color, WHITE);
    }

    #[test]
    fn test_shade_zero_light_vector_is_ambient_only() {
        let poly = facing_viewer(WHITE);
        let color = shade(&poly, Vec3::ZERO, WHITE, Color::gray(40));
        assert_eq!(color, Color::gray(40));
    }

    #[test]
    fn test_plan_faces_keeps_scene_order() {
        let front = facing_viewer(WHITE);
        let back = front.reversed();
        let scene = Scene::new(vec![back, front], Vec3::new(0.0, 0.0, -1.0));
        let plan = plan_faces(&scene, Color::gray(100), Color::gray(100));
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0], FacePlan { index: 0, visible: false, color: None });
        assert_eq!(plan[1].index, 1);
        assert!(plan[1].visible);
        assert_eq!(plan[1].color, Some(Color::gray(200)));
    }
}
