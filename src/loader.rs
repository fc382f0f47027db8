//! Text model loader.
//!
//! # Format
//!
//! ```text
//! 0 0 -1                                  <- light direction x y z
//! 0 0 0  10 0 0  0 10 0  255 0 0          <- vertex A, B, C, then reflectance R G B
//! ...
//! ```
//!
//! Tokens are separated by any whitespace. Blank lines after the light are
//! ignored. Any malformed line fails the whole load, so a caller never sees
//! half a scene.

use std::path::Path;

use crate::colors::Color;
use crate::math::vec3::Vec3;
use crate::scene::{Polygon, Scene};

const LIGHT_TOKENS: usize = 3;
const POLYGON_TOKENS: usize = 12;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),
    #[error("model file is empty, no scene loaded")]
    Empty,
    #[error("line {line}: expected {expected} values, found {found}")]
    TokenCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: {token:?} is not a finite number")]
    InvalidFloat { line: usize, token: String },
    #[error("line {line}: {token:?} is not an integer")]
    InvalidInt { line: usize, token: String },
    #[error("line {line}: colour value {value} is outside 0..=255")]
    ColorOutOfRange { line: usize, value: i64 },
}

/// Reads and parses a model file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, LoadError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let scene = parse_scene(&text)?;
    log::info!(
        "loaded {} polygons from {}",
        scene.len(),
        path.as_ref().display()
    );
    Ok(scene)
}

/// Parses a model from its text form.
pub fn parse_scene(text: &str) -> Result<Scene, LoadError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .skip_while(|(_, l)| l.trim().is_empty());

    let (light_line, light_text) = lines.next().ok_or(LoadError::Empty)?;
    let light = parse_floats::<LIGHT_TOKENS>(light_line, light_text)?;
    let light = Vec3::new(light[0], light[1], light[2]);

    let mut polygons = Vec::new();
    for (line, text) in lines {
        if text.trim().is_empty() {
            continue;
        }
        polygons.push(parse_polygon(line, text)?);
    }

    log::debug!("parsed {} polygons, light {:?}", polygons.len(), light);
    Ok(Scene::new(polygons, light))
}

fn tokens<const N: usize>(line: usize, text: &str) -> Result<[&str; N], LoadError> {
    let found: Vec<&str> = text.split_whitespace().collect();
    found.as_slice().try_into().map_err(|_| LoadError::TokenCount {
        line,
        expected: N,
        found: found.len(),
    })
}

fn parse_float(line: usize, token: &str) -> Result<f32, LoadError> {
    match token.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LoadError::InvalidFloat {
            line,
            token: token.to_string(),
        }),
    }
}

fn parse_channel(line: usize, token: &str) -> Result<u8, LoadError> {
    let value = token.parse::<i64>().map_err(|_| LoadError::InvalidInt {
        line,
        token: token.to_string(),
    })?;
    u8::try_from(value).map_err(|_| LoadError::ColorOutOfRange { line, value })
}

fn parse_floats<const N: usize>(line: usize, text: &str) -> Result<[f32; N], LoadError> {
    let tokens = tokens::<N>(line, text)?;
    let mut values = [0.0; N];
    for (value, token) in values.iter_mut().zip(tokens) {
        *value = parse_float(line, token)?;
    }
    Ok(values)
}

fn parse_polygon(line: usize, text: &str) -> Result<Polygon, LoadError> {
    let tokens = tokens::<POLYGON_TOKENS>(line, text)?;
    let mut points = [0.0; 9];
    for (value, token) in points.iter_mut().zip(&tokens[..9]) {
        *value = parse_float(line, token)?;
    }
    let color = Color::new(
        parse_channel(line, tokens[9])?,
        parse_channel(line, tokens[10])?,
        parse_channel(line, tokens[11])?,
    );
    Ok(Polygon::from_coords(points, color))
}
