//! Per-type thumbnail rendering
//!
//! Textures are resized directly; materials are rendered onto a
//! preview sphere in a small lit scene; meshes are rendered framed by
//! their bounds; scenes get a flat placeholder tile. One renderer is
//! kept alive across tasks so the preview target and sphere geometry
//! are built once.

use ember_asset::{Asset, AssetPayload};
use ember_render::{
    DirectionalLight, Material, MeshInstance, MeshSource, OrbitCamera, PointLight, RenderScene,
    SceneRenderer, Texture,
};
use glam::{Mat4, Vec3};

use super::{Thumbnail, THUMBNAIL_SIZE};

/// Renders thumbnails for every asset type
pub struct ThumbnailRenderer {
    renderer: SceneRenderer,
    preview_sphere: MeshSource,
}

impl Default for ThumbnailRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ThumbnailRenderer {
    pub fn new() -> Self {
        let mut renderer = SceneRenderer::new(THUMBNAIL_SIZE, THUMBNAIL_SIZE);
        renderer.clear_color = [0.13, 0.13, 0.15, 1.0];
        Self {
            renderer,
            preview_sphere: MeshSource::uv_sphere(1.0, 32, 16),
        }
    }

    /// Render a thumbnail for an asset; `None` for empty payloads
    pub fn render(&mut self, asset: &Asset) -> Option<Thumbnail> {
        match asset.payload() {
            AssetPayload::Texture(texture) => Some(texture_thumbnail(texture)),
            AssetPayload::Material(material) => Some(self.material_thumbnail(material)),
            AssetPayload::MeshSource(mesh) => self.mesh_thumbnail(mesh),
            AssetPayload::Scene(_) => Some(scene_placeholder()),
        }
    }

    /// Render the material preview sphere
    fn material_thumbnail(&mut self, material: &Material) -> Thumbnail {
        let camera = OrbitCamera {
            distance: 2.6,
            pitch: 0.35,
            yaw: 0.6,
            ..Default::default()
        };
        render_preview(&mut self.renderer, &camera, &self.preview_sphere, material)
    }

    /// Render a mesh with a neutral material, framed by its bounds
    fn mesh_thumbnail(&mut self, mesh: &MeshSource) -> Option<Thumbnail> {
        if mesh.is_empty() {
            return None;
        }

        let center = Vec3::new(
            (mesh.bounds.min[0] + mesh.bounds.max[0]) * 0.5,
            (mesh.bounds.min[1] + mesh.bounds.max[1]) * 0.5,
            (mesh.bounds.min[2] + mesh.bounds.max[2]) * 0.5,
        );
        let radius = (0..3)
            .map(|i| (mesh.bounds.max[i] - mesh.bounds.min[i]) * 0.5)
            .fold(0.0f32, |acc, half| acc.max(half.abs()))
            .max(1e-3)
            * 3f32.sqrt();

        let camera = OrbitCamera {
            target: center,
            distance: radius * 2.4,
            pitch: 0.4,
            yaw: 0.8,
            ..Default::default()
        };
        Some(render_preview(
            &mut self.renderer,
            &camera,
            mesh,
            &Material::default(),
        ))
    }
}

fn render_preview(
    renderer: &mut SceneRenderer,
    camera: &OrbitCamera,
    mesh: &MeshSource,
    material: &Material,
) -> Thumbnail {
    let directional = [DirectionalLight::new([-0.4, -1.0, -0.6], [1.0; 3], 1.0)];
    let point = [PointLight::new([2.5, 1.5, 2.5], 20.0, [1.0, 0.95, 0.9], 0.6)];
    let instances = [MeshInstance {
        mesh,
        material,
        transform: Mat4::IDENTITY,
    }];

    renderer.set_viewport_size(THUMBNAIL_SIZE, THUMBNAIL_SIZE);
    renderer.render(&RenderScene {
        camera,
        directional: &directional,
        point: &point,
        ambient: 0.15,
        instances: &instances,
    });

    let mut data = Vec::new();
    renderer.copy_composite(&mut data);
    Thumbnail {
        width: THUMBNAIL_SIZE,
        height: THUMBNAIL_SIZE,
        data,
    }
}

/// Resize a texture to fit the thumbnail box, preserving aspect
///
/// HDR sources are tone mapped with gamma 2.2 during readback.
fn texture_thumbnail(texture: &Texture) -> Thumbnail {
    let mut rgba = Vec::new();
    texture.copy_to_rgba8(2.2, &mut rgba);

    let (src_w, src_h) = (texture.width().max(1), texture.height().max(1));
    let scale = (THUMBNAIL_SIZE as f32 / src_w as f32)
        .min(THUMBNAIL_SIZE as f32 / src_h as f32)
        .min(1.0);
    let dst_w = ((src_w as f32 * scale) as u32).max(1);
    let dst_h = ((src_h as f32 * scale) as u32).max(1);

    let img = match image::RgbaImage::from_raw(src_w, src_h, rgba) {
        Some(img) => img,
        None => return scene_placeholder(),
    };
    let resized = image::imageops::resize(&img, dst_w, dst_h, image::imageops::FilterType::Triangle);
    Thumbnail {
        width: dst_w,
        height: dst_h,
        data: resized.into_raw(),
    }
}

/// Flat tile used where no meaningful preview exists
fn scene_placeholder() -> Thumbnail {
    let mut data = Vec::with_capacity((THUMBNAIL_SIZE * THUMBNAIL_SIZE * 4) as usize);
    for _ in 0..THUMBNAIL_SIZE * THUMBNAIL_SIZE {
        data.extend_from_slice(&[200, 150, 100, 255]);
    }
    Thumbnail {
        width: THUMBNAIL_SIZE,
        height: THUMBNAIL_SIZE,
        data,
    }
}
