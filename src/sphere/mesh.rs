//! UV sphere mesh with template-based radial deformation.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::f32::consts::PI;

use crate::params::{ShapeParams, MAX_SEGMENTS};

/// Vertex data for the sphere mesh (position + normal)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Sphere mesh whose positions are rebuilt every frame from a fixed template
pub struct SphereMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    /// Unit directions of the undeformed sphere (never modified)
    directions: Vec<Vec3>,
    /// Undeformed positions (`direction * radius`)
    template: Vec<Vec3>,
    radius: f32,
}

impl SphereMesh {
    /// Create a UV sphere with the given radius and segment counts
    ///
    /// Segment counts are clamped to `[3, MAX_SEGMENTS]` and `[2, MAX_SEGMENTS]`.
    pub fn new(params: &ShapeParams) -> Self {
        let width = params.segments_width.clamp(3, MAX_SEGMENTS);
        let height = params.segments_height.clamp(2, MAX_SEGMENTS);
        let radius = params.radius;

        let mut directions = Vec::with_capacity((width + 1) * (height + 1));

        // Rings from the north pole (+Y) to the south pole
        for iy in 0..=height {
            let v = iy as f32 / height as f32;
            let theta = v * PI;
            for ix in 0..=width {
                let u = ix as f32 / width as f32;
                let phi = u * 2.0 * PI;
                directions.push(Vec3::new(
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                ));
            }
        }

        // Generate triangle indices (counter-clockwise winding seen from outside)
        let row = width + 1;
        let mut indices = Vec::with_capacity(width * height * 6);
        for iy in 0..height {
            for ix in 0..width {
                let a = (iy * row + ix + 1) as u32;
                let b = (iy * row + ix) as u32;
                let c = ((iy + 1) * row + ix) as u32;
                let d = ((iy + 1) * row + ix + 1) as u32;

                // Pole rows collapse one triangle of each quad
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        let template: Vec<Vec3> = directions.iter().map(|&n| n * radius).collect();
        let vertices = template
            .iter()
            .zip(&directions)
            .map(|(p, n)| Vertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect();

        let mut mesh = Self {
            vertices,
            indices,
            directions,
            template,
            radius,
        };
        mesh.recompute_normals();
        mesh
    }

    /// Base radius of the undeformed sphere
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Undeformed vertex positions
    pub fn template(&self) -> &[Vec3] {
        &self.template
    }

    /// Rebuild every vertex as `direction * (radius + noise)`
    ///
    /// `noise` receives the undeformed position of each vertex. Positions
    /// never depend on the previous frame, so repeated calls cannot drift.
    pub fn deform<F>(&mut self, mut noise: F)
    where
        F: FnMut(Vec3) -> f32,
    {
        for ((vertex, &dir), &base) in self
            .vertices
            .iter_mut()
            .zip(&self.directions)
            .zip(&self.template)
        {
            let r = self.radius + noise(base);
            vertex.position = (dir * r).to_array();
        }
        self.recompute_normals();
    }

    /// Put every vertex back on the perfect sphere
    pub fn reset(&mut self) {
        for (vertex, base) in self.vertices.iter_mut().zip(&self.template) {
            vertex.position = base.to_array();
        }
        self.recompute_normals();
    }

    /// Smooth per-vertex normals from area-weighted face normals
    pub fn recompute_normals(&mut self) {
        let mut accum = vec![Vec3::ZERO; self.vertices.len()];

        for tri in self.indices.chunks_exact(3) {
            let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let a = Vec3::from_array(self.vertices[ia].position);
            let b = Vec3::from_array(self.vertices[ib].position);
            let c = Vec3::from_array(self.vertices[ic].position);

            let face = (c - b).cross(a - b);
            accum[ia] += face;
            accum[ib] += face;
            accum[ic] += face;
        }

        for ((vertex, sum), &dir) in self.vertices.iter_mut().zip(accum).zip(&self.directions) {
            // Fall back to the template direction for fully degenerate fans
            let normal = sum.try_normalize().unwrap_or(dir);
            vertex.normal = normal.to_array();
        }
    }
}
