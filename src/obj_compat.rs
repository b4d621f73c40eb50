//! Wavefront OBJ import through the `tobj` crate

use std::path::Path;

use nalgebra::{Vector2, Vector3, Vector4};

use tobj;

use ::error::{RenderError, RenderResult};
use ::mesh::{Mesh, Vertex};

impl From<tobj::LoadError> for RenderError {
    fn from(err: tobj::LoadError) -> RenderError {
        RenderError::MeshImport(err.to_string())
    }
}

/// Reads the `n` floats of element `i`, or `None` if the channel is absent or too short
fn element<'a>(data: &'a [f32], i: usize, n: usize) -> Option<&'a [f32]> {
    data.get(i * n..(i + 1) * n)
}

fn convert(mesh: &tobj::Mesh, out: &mut Mesh) {
    let offset = out.vertices.len();
    let count = mesh.positions.len() / 3;

    out.vertices.extend((0..count).map(|i| {
        let position = element(&mesh.positions, i, 3)
            .map_or(Vector4::new(0.0, 0.0, 0.0, 1.0), |p| Vector4::new(p[0], p[1], p[2], 1.0));

        let normal = element(&mesh.normals, i, 3)
            .map_or(Vector3::zeros(), |n| Vector3::new(n[0], n[1], n[2]));

        let uv = element(&mesh.texcoords, i, 2)
            .map_or(Vector2::zeros(), |t| Vector2::new(t[0], t[1]));

        let color = element(&mesh.vertex_color, i, 3)
            .map_or(Vector4::new(1.0, 1.0, 1.0, 1.0), |c| Vector4::new(c[0], c[1], c[2], 1.0));

        Vertex::new(position, uv, normal, color)
    }));

    out.indices.extend(mesh.indices.iter().map(|&index| index as usize + offset));
}

impl Mesh {
    /// Loads every model of an OBJ file into one triangulated mesh.
    ///
    /// Missing positions, normals and texture coordinates default to zero, and missing colors to opaque white.
    pub fn load_obj<P: AsRef<Path>>(path: P) -> RenderResult<Mesh> {
        let path = path.as_ref();

        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..tobj::LoadOptions::default()
        };

        let (models, _) = tobj::load_obj(path, &options)?;

        let mut mesh = Mesh::default();

        for model in &models {
            convert(&model.mesh, &mut mesh);
        }

        debug!("loaded {} models from {}: {:?}", models.len(), path.display(), mesh);

        mesh.validate()?;

        Ok(mesh)
    }
}

#[cfg(test)]
mod test {
    use nalgebra::{Vector2, Vector3, Vector4};

    use tobj;

    use ::mesh::Mesh;

    use super::convert;

    #[test]
    fn test_convert_defaults_and_offsets() {
        let mut source = tobj::Mesh::default();

        source.positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        source.texcoords = vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
        source.indices = vec![0, 1, 2];

        let mut mesh = Mesh::default();

        convert(&source, &mut mesh);
        convert(&source, &mut mesh);

        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);

        let v = mesh.vertices[4];

        assert_eq!(v.position, Vector4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(v.uv, Vector2::new(1.0, 0.0));
        assert_eq!(v.normal, Vector3::zeros());
        assert_eq!(v.color, Vector4::new(1.0, 1.0, 1.0, 1.0));
    }
}
