//! Wavefront OBJ geometry loader.
//!
//! Reads `v`, `vt`, `vn` and `f` records; every other directive is ignored.
//! Faces are fan-triangulated, identical (position, uv, normal) corners are
//! welded into one vertex, and the data is converted to the engine's
//! left-handed convention: Z of positions and normals is negated, V is
//! flipped and the triangle winding is reversed. Corners that reference no
//! normal get smooth normals generated from the triangles.

use std::path::Path;
use glam::Vec3;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::engine_debug;
use crate::resource::mesh::Vertex;

/// Indexed triangle data ready for `Mesh::new`
#[derive(Debug, Clone, Default)]
pub struct ObjData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl ObjData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// One face corner as resolved 0-based indices into the attribute lists
type Corner = (usize, Option<usize>, Option<usize>);

fn model_error(line: usize, message: impl Into<String>) -> Error {
    Error::ModelLoad { line, message: message.into() }
}

/// Read and parse an OBJ file
pub fn load_obj(path: impl AsRef<Path>) -> Result<ObjData> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::Io(format!("{}: {}", path.display(), e)))?;
    let data = parse_obj(&text)?;
    engine_debug!("ember3d::Obj", "Loaded '{}': {} vertices, {} triangles",
        path.display(), data.vertices.len(), data.triangle_count());
    Ok(data)
}

/// Parse OBJ text
pub fn parse_obj(text: &str) -> Result<ObjData> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();

    let mut data = ObjData::default();
    let mut welded: FxHashMap<Corner, u32> = FxHashMap::default();
    let mut missing_normal: Vec<bool> = Vec::new();

    for (line_index, raw_line) in text.lines().enumerate() {
        let line_number = line_index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let keyword = match parts.next() {
            Some(keyword) => keyword,
            None => continue,
        };
        let args: Vec<&str> = parts.collect();

        match keyword {
            "v" => {
                let v = parse_floats(&args, 3, line_number, "position")?;
                positions.push(Vec3::new(v[0], v[1], -v[2]));
            }
            "vn" => {
                let n = parse_floats(&args, 3, line_number, "normal")?;
                normals.push(Vec3::new(n[0], n[1], -n[2]));
            }
            "vt" => {
                let t = parse_floats(&args, 1, line_number, "texture coordinate")?;
                let v = t.get(1).copied().unwrap_or(0.0);
                uvs.push([t[0], 1.0 - v]);
            }
            "f" => {
                if args.len() < 3 {
                    return Err(model_error(line_number,
                        format!("face needs at least 3 corners, got {}", args.len())));
                }
                let corners = args
                    .iter()
                    .map(|token| parse_corner(token, line_number, &positions, &uvs, &normals))
                    .collect::<Result<Vec<Corner>>>()?;

                let mut corner_index = |corner: Corner| -> u32 {
                    *welded.entry(corner).or_insert_with(|| {
                        let (p, t, n) = corner;
                        missing_normal.push(n.is_none());
                        data.vertices.push(Vertex {
                            position: positions[p].to_array(),
                            normal: n.map(|n| normals[n].to_array()).unwrap_or([0.0; 3]),
                            uv: t.map(|t| uvs[t]).unwrap_or([0.0; 2]),
                        });
                        (data.vertices.len() - 1) as u32
                    })
                };

                // Fan around the first corner, reversed for left-handed winding
                let first = corner_index(corners[0]);
                let mut triangles = Vec::with_capacity((corners.len() - 2) * 3);
                for pair in corners[1..].windows(2) {
                    let b = corner_index(pair[0]);
                    let c = corner_index(pair[1]);
                    triangles.extend_from_slice(&[first, c, b]);
                }
                data.indices.extend_from_slice(&triangles);
            }
            _ => {}
        }
    }

    if data.indices.is_empty() {
        return Err(model_error(0, "file contains no faces"));
    }

    if missing_normal.iter().any(|&missing| missing) {
        generate_normals(&mut data, &missing_normal);
    }

    Ok(data)
}

fn parse_floats(args: &[&str], required: usize, line: usize, what: &str) -> Result<Vec<f32>> {
    if args.len() < required {
        return Err(model_error(line,
            format!("{} needs {} components, got {}", what, required, args.len())));
    }
    args.iter()
        .map(|token| {
            token.parse::<f32>()
                .map_err(|_| model_error(line, format!("invalid number '{}'", token)))
        })
        .collect()
}

/// Resolve a 1-based (or negative, relative) OBJ index against `count` items
fn resolve_index(token: &str, count: usize, line: usize, what: &str) -> Result<usize> {
    let raw: i64 = token
        .parse()
        .map_err(|_| model_error(line, format!("invalid {} index '{}'", what, token)))?;

    let resolved = if raw > 0 {
        raw - 1
    } else if raw < 0 {
        count as i64 + raw
    } else {
        return Err(model_error(line, format!("{} index 0 is not valid", what)));
    };

    if resolved < 0 || resolved >= count as i64 {
        return Err(model_error(line,
            format!("{} index {} out of range ({} defined)", what, raw, count)));
    }
    Ok(resolved as usize)
}

fn parse_corner(
    token: &str,
    line: usize,
    positions: &[Vec3],
    uvs: &[[f32; 2]],
    normals: &[Vec3],
) -> Result<Corner> {
    let fields: Vec<&str> = token.split('/').collect();
    if fields.len() > 3 {
        return Err(model_error(line, format!("malformed face corner '{}'", token)));
    }

    let position = resolve_index(fields[0], positions.len(), line, "position")?;
    let uv = match fields.get(1) {
        Some(field) if !field.is_empty() => {
            Some(resolve_index(field, uvs.len(), line, "texture coordinate")?)
        }
        _ => None,
    };
    let normal = match fields.get(2) {
        Some(field) if !field.is_empty() => Some(resolve_index(field, normals.len(), line, "normal")?),
        _ => None,
    };

    Ok((position, uv, normal))
}

/// Area-weighted smooth normals for the vertices flagged in `missing`
fn generate_normals(data: &mut ObjData, missing: &[bool]) {
    let mut accumulated = vec![Vec3::ZERO; data.vertices.len()];

    for triangle in data.indices.chunks_exact(3) {
        let [a, b, c] = [triangle[0] as usize, triangle[1] as usize, triangle[2] as usize];
        let p0 = Vec3::from(data.vertices[a].position);
        let p1 = Vec3::from(data.vertices[b].position);
        let p2 = Vec3::from(data.vertices[c].position);
        let face_normal = (p1 - p0).cross(p2 - p0);
        accumulated[a] += face_normal;
        accumulated[b] += face_normal;
        accumulated[c] += face_normal;
    }

    for ((vertex, normal), &missing) in data.vertices.iter_mut().zip(accumulated).zip(missing) {
        if missing {
            vertex.normal = normal.try_normalize().unwrap_or(Vec3::Y).to_array();
        }
    }
}

#[cfg(test)]
#[path = "obj_tests.rs"]
mod tests;
