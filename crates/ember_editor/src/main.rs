//! Headless asset tool
//!
//! Imports every recognized file under an asset directory, generates
//! thumbnails for all of them and saves the registry. Useful for
//! warming a project's caches from the command line.

use std::path::PathBuf;

use ember_editor::EditorContext;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets"));
    if !root.is_dir() {
        log::error!("asset root {} is not a directory", root.display());
        std::process::exit(1);
    }

    let mut context = EditorContext::new(&root);

    let mut imported = 0usize;
    for entry in walk_files(&root) {
        let Ok(relative) = entry.strip_prefix(&root) else {
            continue;
        };
        if context.import_with_thumbnail(relative).is_valid() {
            imported += 1;
        }
    }
    log::info!("imported {imported} assets from {}", root.display());

    // One stage per tick, same cadence as the editor loop
    while !context.thumbnails.is_idle() {
        context.update();
    }

    context.evict_stale_thumbnails();
    context.assets.save_assets();
    log::info!("done; registry has {} assets", context.assets.registry().len());
}

/// Recursively collect files, skipping the cache directory
fn walk_files(root: &std::path::Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                if path.file_name().and_then(|n| n.to_str()) != Some("cache") {
                    stack.push(path);
                }
            } else {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}
