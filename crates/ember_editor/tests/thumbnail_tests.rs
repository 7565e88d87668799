//! End-to-end thumbnail pipeline behavior

use std::path::Path;

use ember_asset::{AssetHandle, AssetPayload};
use ember_editor::{EditorContext, THUMBNAIL_SIZE};
use ember_render::{Material, Texture};

fn write_png(path: &Path, size: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    Texture::checkerboard(size, size / 2, [255, 0, 0, 255], [0, 0, 255, 255])
        .save_png(path)
        .unwrap();
}

fn pump_until_idle(context: &mut EditorContext) {
    for _ in 0..1000 {
        if context.thumbnails.is_idle() {
            return;
        }
        context.update();
    }
    panic!("thumbnail pool never drained");
}

#[test]
fn test_texture_thumbnail_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("big.png"), 512);
    let mut context = EditorContext::new(dir.path());

    let handle = context.import_with_thumbnail("big.png");
    assert!(handle.is_valid());
    // Nothing available until the pool has run
    assert!(context.thumbnails.get_thumbnail(handle).is_none());

    pump_until_idle(&mut context);

    let thumb = context.thumbnails.get_thumbnail(handle).unwrap();
    assert!(thumb.is_well_formed());
    assert_eq!(thumb.width.max(thumb.height), THUMBNAIL_SIZE);

    // Exported to the disk cache as <handle>.png
    let cached = context
        .thumbnails
        .cache_dir()
        .join(format!("{handle}.png"));
    assert!(cached.exists());
}

#[test]
fn test_get_thumbnail_never_schedules_work() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("t.png"), 32);
    let mut context = EditorContext::new(dir.path());

    let handle = context.assets.import_asset("t.png");
    assert!(context.thumbnails.get_thumbnail(handle).is_none());
    assert!(context.thumbnails.is_idle());
    assert_eq!(context.thumbnails.pending(), 0);
}

#[test]
fn test_request_is_deduplicated() {
    let dir = tempfile::tempdir().unwrap();
    let mut context = EditorContext::new(dir.path());

    let handle = context
        .assets
        .add_memory_asset(AssetPayload::Material(Material::default()));
    assert!(context.thumbnails.request_thumbnail(handle));
    assert!(!context.thumbnails.request_thumbnail(handle));
    assert_eq!(context.thumbnails.pending(), 1);

    pump_until_idle(&mut context);
    // Cached now, a new request is also a no-op
    assert!(!context.thumbnails.request_thumbnail(handle));
}

#[test]
fn test_invalid_handle_request_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut context = EditorContext::new(dir.path());
    assert!(!context.thumbnails.request_thumbnail(AssetHandle::INVALID));
}

#[test]
fn test_material_thumbnail_for_memory_asset() {
    let dir = tempfile::tempdir().unwrap();
    let mut context = EditorContext::new(dir.path());

    let handle = context
        .assets
        .add_memory_asset(AssetPayload::Material(Material::named("chrome")));
    context.thumbnails.request_thumbnail(handle);
    pump_until_idle(&mut context);

    let thumb = context.thumbnails.get_thumbnail(handle).unwrap();
    assert_eq!((thumb.width, thumb.height), (THUMBNAIL_SIZE, THUMBNAIL_SIZE));
}

#[test]
fn test_hydrate_from_disk_cache() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("t.png"), 64);

    let handle = {
        let mut context = EditorContext::new(dir.path());
        let handle = context.import_with_thumbnail("t.png");
        pump_until_idle(&mut context);
        context.assets.save_assets();
        handle
    };

    // Fresh session: the thumbnail comes back from disk without any
    // generation work
    let mut reopened = EditorContext::new(dir.path());
    let thumb = reopened.thumbnails.get_thumbnail(handle).unwrap();
    assert!(thumb.is_well_formed());
    assert_eq!((thumb.width, thumb.height), (64, 64));
    assert!(reopened.thumbnails.is_idle());
}

#[test]
fn test_evict_stale_thumbnails() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("keep.png"), 16);
    write_png(&dir.path().join("drop.png"), 16);
    let mut context = EditorContext::new(dir.path());

    let keep = context.import_with_thumbnail("keep.png");
    let drop = context.import_with_thumbnail("drop.png");
    pump_until_idle(&mut context);

    context.assets.remove_asset(drop);
    let evicted = context.evict_stale_thumbnails();
    assert!(evicted >= 1);

    assert!(context.thumbnails.has_thumbnail(keep));
    assert!(!context.thumbnails.has_thumbnail(drop));
    assert!(!context
        .thumbnails
        .cache_dir()
        .join(format!("{drop}.png"))
        .exists());
    assert!(context
        .thumbnails
        .cache_dir()
        .join(format!("{keep}.png"))
        .exists());
}

#[test]
fn test_unreadable_asset_produces_no_thumbnail() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("gone.png"), 16);
    let mut context = EditorContext::new(dir.path());

    let handle = context.import_with_thumbnail("gone.png");
    std::fs::remove_file(dir.path().join("gone.png")).unwrap();

    pump_until_idle(&mut context);
    assert!(context.thumbnails.get_thumbnail(handle).is_none());
    assert!(context.assets.metadata(handle).is_file_missing);
}
