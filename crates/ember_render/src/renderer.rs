//! Software forward renderer
//!
//! One forward pass: transform, rasterize with a depth test, shade
//! with Lambert diffuse + Blinn-Phong specular from directional and
//! point lights. Small viewports (previews, thumbnails) are the
//! intended workload; the pass is deliberately simple rather than
//! fast.

use glam::{Mat3, Mat4, Vec2, Vec3};

use crate::camera::OrbitCamera;
use crate::light::{DirectionalLight, PointLight};
use crate::material::Material;
use crate::mesh::MeshSource;
use crate::target::RenderTarget;

/// One mesh drawn with one material and transform
#[derive(Clone, Copy)]
pub struct MeshInstance<'a> {
    pub mesh: &'a MeshSource,
    pub material: &'a Material,
    pub transform: Mat4,
}

/// Everything one render call consumes
#[derive(Clone, Copy)]
pub struct RenderScene<'a> {
    pub camera: &'a OrbitCamera,
    pub directional: &'a [DirectionalLight],
    pub point: &'a [PointLight],
    /// Ambient term applied to every surface
    pub ambient: f32,
    pub instances: &'a [MeshInstance<'a>],
}

/// Off-screen scene renderer with host readback
pub struct SceneRenderer {
    target: RenderTarget,
    /// Background color of the composite
    pub clear_color: [f32; 4],
}

impl SceneRenderer {
    /// Create a renderer with the given viewport size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            target: RenderTarget::new(width, height),
            clear_color: [0.0, 0.0, 0.0, 0.0],
        }
    }

    /// Resize the composite target; no-op if unchanged
    pub fn set_viewport_size(&mut self, width: u32, height: u32) {
        self.target.resize(width, height);
    }

    /// Current viewport size (width, height)
    pub fn viewport_size(&self) -> (u32, u32) {
        self.target.size()
    }

    /// Render one frame into the composite target
    pub fn render(&mut self, scene: &RenderScene<'_>) {
        let (width, height) = self.target.size();
        if width == 0 || height == 0 {
            return;
        }
        self.target.clear(self.clear_color);

        let aspect = width as f32 / height as f32;
        let view_proj = scene.camera.view_projection(aspect);
        let eye = scene.camera.eye();

        for instance in scene.instances {
            self.draw_instance(instance, scene, view_proj, eye, width, height);
        }
    }

    /// Copy the composite into a host RGBA8 buffer
    pub fn copy_composite(&self, out: &mut Vec<u8>) {
        self.target.copy_to_rgba8(out);
    }

    /// Direct access to the composite target (tests, debug overlays)
    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    fn draw_instance(
        &mut self,
        instance: &MeshInstance<'_>,
        scene: &RenderScene<'_>,
        view_proj: Mat4,
        eye: Vec3,
        width: u32,
        height: u32,
    ) {
        let mesh = instance.mesh;
        if mesh.is_empty() {
            return;
        }

        let model = instance.transform;
        let normal_mat = Mat3::from_mat4(model).inverse().transpose();

        for tri in mesh.indices.chunks_exact(3) {
            let mut world = [Vec3::ZERO; 3];
            let mut normals = [Vec3::ZERO; 3];
            let mut screen = [Vec3::ZERO; 3];
            let mut behind = false;

            for (i, &idx) in tri.iter().enumerate() {
                let v = match mesh.vertices.get(idx as usize) {
                    Some(v) => v,
                    None => return,
                };
                let wp = model.transform_point3(Vec3::from(v.position));
                let clip = view_proj * wp.extend(1.0);
                if clip.w <= 1e-4 {
                    behind = true;
                    break;
                }
                let ndc = clip.truncate() / clip.w;
                world[i] = wp;
                normals[i] = (normal_mat * Vec3::from(v.normal)).normalize_or_zero();
                screen[i] = Vec3::new(
                    (ndc.x + 1.0) * 0.5 * width as f32,
                    (1.0 - ndc.y) * 0.5 * height as f32,
                    ndc.z,
                );
            }
            if behind {
                continue;
            }

            self.rasterize_triangle(
                screen, world, normals, instance.material, scene, eye, width, height,
            );
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn rasterize_triangle(
        &mut self,
        screen: [Vec3; 3],
        world: [Vec3; 3],
        normals: [Vec3; 3],
        material: &Material,
        scene: &RenderScene<'_>,
        eye: Vec3,
        width: u32,
        height: u32,
    ) {
        let a = Vec2::new(screen[0].x, screen[0].y);
        let b = Vec2::new(screen[1].x, screen[1].y);
        let c = Vec2::new(screen[2].x, screen[2].y);

        let area = edge(a, b, c);
        if area.abs() < 1e-6 {
            return;
        }

        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as u32;
        let max_x = (a.x.max(b.x).max(c.x).ceil() as i64).clamp(0, width as i64 - 1) as u32;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as u32;
        let max_y = (a.y.max(b.y).max(c.y).ceil() as i64).clamp(0, height as i64 - 1) as u32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(b, c, p) / area;
                let w1 = edge(c, a, p) / area;
                let w2 = edge(a, b, p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let z = w0 * screen[0].z + w1 * screen[1].z + w2 * screen[2].z;
                if !(0.0..=1.0).contains(&z) {
                    continue;
                }

                let wp = world[0] * w0 + world[1] * w1 + world[2] * w2;
                let n = (normals[0] * w0 + normals[1] * w1 + normals[2] * w2).normalize_or_zero();
                let color = shade_pixel(material, n, wp, eye, scene);
                self.target.set_pixel_with_depth(x, y, z, color);
            }
        }
    }
}

fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Shade one fragment from all lights in the scene
fn shade_pixel(
    material: &Material,
    normal: Vec3,
    world_pos: Vec3,
    eye: Vec3,
    scene: &RenderScene<'_>,
) -> [f32; 4] {
    let albedo = Vec3::new(
        material.base_color[0],
        material.base_color[1],
        material.base_color[2],
    );
    let view_dir = (eye - world_pos).normalize_or_zero();
    let spec_color = Vec3::splat(0.04).lerp(albedo, material.metallic);
    let shininess = 2f32.powf(2.0 + 8.0 * (1.0 - material.roughness));

    let mut total = albedo * scene.ambient * material.ao;

    for light in scene.directional {
        let to_light = -Vec3::from(light.direction).normalize_or_zero();
        total += light_contribution(
            albedo,
            spec_color,
            shininess,
            material.metallic,
            normal,
            to_light,
            view_dir,
            Vec3::from(light.color) * light.intensity,
        );
    }

    for light in scene.point {
        let offset = Vec3::from(light.position) - world_pos;
        let dist = offset.length();
        if dist > light.range || dist < 1e-3 {
            continue;
        }
        // Squared falloff inside the range
        let attenuation = {
            let a = 1.0 - dist / light.range;
            a * a
        };
        total += light_contribution(
            albedo,
            spec_color,
            shininess,
            material.metallic,
            normal,
            offset / dist,
            view_dir,
            Vec3::from(light.color) * light.intensity * attenuation,
        );
    }

    total += Vec3::from(material.emissive);

    [
        total.x.min(1.0),
        total.y.min(1.0),
        total.z.min(1.0),
        material.base_color[3].clamp(0.0, 1.0),
    ]
}

#[allow(clippy::too_many_arguments)]
fn light_contribution(
    albedo: Vec3,
    spec_color: Vec3,
    shininess: f32,
    metallic: f32,
    normal: Vec3,
    to_light: Vec3,
    view_dir: Vec3,
    radiance: Vec3,
) -> Vec3 {
    let n_dot_l = normal.dot(to_light).max(0.0);
    if n_dot_l <= 0.0 {
        return Vec3::ZERO;
    }
    let half = (to_light + view_dir).normalize_or_zero();
    let n_dot_h = normal.dot(half).max(0.0);
    let specular = spec_color * n_dot_h.powf(shininess);
    let diffuse = albedo * (1.0 - metallic);
    (diffuse + specular) * radiance * n_dot_l
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview_scene_render(material: &Material) -> SceneRenderer {
        let mut renderer = SceneRenderer::new(64, 64);
        let camera = OrbitCamera {
            distance: 2.5,
            ..Default::default()
        };
        let sphere = MeshSource::uv_sphere(1.0, 24, 12);
        let directional = [DirectionalLight::default()];
        let point = [PointLight::new([2.0, 2.0, 2.0], 10.0, [1.0; 3], 0.5)];
        let instances = [MeshInstance {
            mesh: &sphere,
            material,
            transform: Mat4::IDENTITY,
        }];
        renderer.render(&RenderScene {
            camera: &camera,
            directional: &directional,
            point: &point,
            ambient: 0.1,
            instances: &instances,
        });
        renderer
    }

    #[test]
    fn test_sphere_covers_center_not_corner() {
        let renderer = preview_scene_render(&Material::default());
        let center = renderer.target().pixel(32, 32).unwrap();
        let corner = renderer.target().pixel(0, 0).unwrap();
        // Sphere fragment is opaque; background keeps the clear color
        assert_eq!(center[3], 1.0);
        assert_eq!(corner, [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_lit_sphere_is_not_black() {
        let renderer = preview_scene_render(&Material::default());
        let center = renderer.target().pixel(32, 32).unwrap();
        assert!(center[0] > 0.05 || center[1] > 0.05 || center[2] > 0.05);
    }

    #[test]
    fn test_emissive_dominates_unlit() {
        let mat = Material {
            base_color: [0.0, 0.0, 0.0, 1.0],
            emissive: [0.0, 1.0, 0.0],
            ..Default::default()
        };
        let renderer = preview_scene_render(&mat);
        let center = renderer.target().pixel(32, 32).unwrap();
        assert_eq!(center[1], 1.0);
    }

    #[test]
    fn test_empty_scene_renders_clear_color() {
        let mut renderer = SceneRenderer::new(8, 8);
        renderer.clear_color = [0.2, 0.2, 0.2, 1.0];
        let camera = OrbitCamera::default();
        renderer.render(&RenderScene {
            camera: &camera,
            directional: &[],
            point: &[],
            ambient: 0.0,
            instances: &[],
        });
        let px = renderer.target().pixel(4, 4).unwrap();
        assert_eq!(px, [0.2, 0.2, 0.2, 1.0]);
    }

    #[test]
    fn test_viewport_resize() {
        let mut renderer = SceneRenderer::new(8, 8);
        renderer.set_viewport_size(16, 4);
        assert_eq!(renderer.viewport_size(), (16, 4));

        let mut out = Vec::new();
        renderer.copy_composite(&mut out);
        assert_eq!(out.len(), 16 * 4 * 4);
    }
}
