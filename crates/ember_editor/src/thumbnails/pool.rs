//! Thumbnail task pool
//!
//! Strict FIFO over queued tasks. Each `update` call advances exactly
//! one stage of the front task, so thumbnail work is spread across
//! frames and never stalls the editor loop. At most one task is ever
//! in flight; a new task is only dispatched once the previous one has
//! been handed back finished. The pool pauses itself when the queue
//! drains and must be started explicitly after new submissions.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

use ember_asset::{Asset, AssetHandle, AssetManager};
use ember_render::Texture;

use super::renderer::ThumbnailRenderer;
use super::task::{TaskFlags, TaskStage, TaskStatus, ThumbnailTask};

/// FIFO queue of thumbnail tasks, advanced one stage per update
pub struct ThumbnailTaskPool {
    queue: VecDeque<ThumbnailTask>,
    running: bool,
    next_id: u64,
}

impl Default for ThumbnailTaskPool {
    fn default() -> Self {
        Self::new()
    }
}

impl ThumbnailTaskPool {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            running: false,
            next_id: 1,
        }
    }

    /// Begin (or resume) processing queued tasks
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop processing; queued tasks are kept
    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the front task has begun but not finished
    pub fn is_busy(&self) -> bool {
        self.queue
            .front()
            .is_some_and(|task| task.stage != TaskStage::Import)
    }

    /// Queue a task for a handle; rejects duplicates
    ///
    /// Returns the task id, or `None` when a task for the handle is
    /// already queued.
    pub fn submit(&mut self, handle: AssetHandle, flags: TaskFlags) -> Option<u64> {
        self.enqueue(ThumbnailTask::new(0, handle, flags))
    }

    /// Queue a task with its payload already resolved
    pub fn submit_with_source(
        &mut self,
        handle: AssetHandle,
        flags: TaskFlags,
        source: Arc<Asset>,
    ) -> Option<u64> {
        self.enqueue(ThumbnailTask::new(0, handle, flags).with_source(source))
    }

    fn enqueue(&mut self, mut task: ThumbnailTask) -> Option<u64> {
        if self.contains(task.handle) {
            log::debug!("thumbnail task for {} already queued", task.handle);
            return None;
        }
        task.id = self.next_id;
        self.next_id += 1;
        let id = task.id;
        self.queue.push_back(task);
        Some(id)
    }

    /// Whether any queued task targets the handle
    pub fn contains(&self, handle: AssetHandle) -> bool {
        self.queue.iter().any(|task| task.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop every queued task and stop
    pub fn clear(&mut self) {
        self.queue.clear();
        self.running = false;
    }

    /// Advance the front task by one stage
    ///
    /// Returns the task once it finishes. Pauses the pool when the
    /// last task completes.
    pub fn update(
        &mut self,
        assets: &mut AssetManager,
        renderer: &mut ThumbnailRenderer,
        cache_dir: &Path,
    ) -> Option<ThumbnailTask> {
        if !self.running {
            return None;
        }
        // The renderer's preview scene tolerates exactly one task in
        // flight; verify the front-only discipline before stage work
        // instead of trusting call order
        if self.queue.iter().skip(1).any(|t| t.stage != TaskStage::Import) {
            log::error!("thumbnail pool: non-front task mid-flight, refusing to advance");
            return None;
        }
        let task = self.queue.front_mut()?;

        match task.stage {
            TaskStage::Import => {
                if task.flags.contains(TaskFlags::IMPORT) && task.source.is_none() {
                    task.source = assets.get_asset(task.handle);
                    if task.source.is_none() {
                        log::warn!("thumbnail task {}: asset {} unavailable", task.id, task.handle);
                        task.stage = TaskStage::Done;
                    }
                }
            }
            TaskStage::Process => {
                if task.flags.contains(TaskFlags::PROCESS) {
                    task.output = match &task.source {
                        Some(asset) => renderer.render(asset),
                        None => None,
                    };
                }
            }
            TaskStage::Export => {
                if task.flags.contains(TaskFlags::EXPORT) {
                    if let Some(thumbnail) = &task.output {
                        export_thumbnail(task.handle, thumbnail, cache_dir);
                    }
                }
            }
            TaskStage::Done => {}
        }

        if task.stage == TaskStage::Done || task.stage.next() == TaskStage::Done {
            let mut finished = self.queue.pop_front()?;
            finished.stage = TaskStage::Done;
            finished.status = TaskStatus::Finished;
            if self.queue.is_empty() {
                // Auto-pause; the next submission must start() again
                self.running = false;
            }
            return Some(finished);
        }

        task.stage = task.stage.next();
        None
    }
}

/// Write a thumbnail to `<cache_dir>/<handle>.png`
fn export_thumbnail(handle: AssetHandle, thumbnail: &super::Thumbnail, cache_dir: &Path) {
    if let Err(err) = std::fs::create_dir_all(cache_dir) {
        log::error!("could not create thumbnail cache dir: {err}");
        return;
    }
    let path = cache_dir.join(format!("{handle}.png"));
    let texture = Texture::from_rgba8(thumbnail.width, thumbnail.height, thumbnail.data.clone());
    if let Err(err) = texture.save_png(&path) {
        log::error!("could not export thumbnail for {handle}: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_asset::{AssetManagerConfig, AssetPayload};
    use ember_render::Material;

    fn fixture() -> (tempfile::TempDir, AssetManager, ThumbnailRenderer) {
        let dir = tempfile::tempdir().unwrap();
        let assets = AssetManager::new(AssetManagerConfig::rooted_at(dir.path()));
        (dir, assets, ThumbnailRenderer::new())
    }

    fn material_handle(assets: &mut AssetManager) -> AssetHandle {
        assets.add_memory_asset(AssetPayload::Material(Material::default()))
    }

    #[test]
    fn test_paused_pool_does_nothing() {
        let (dir, mut assets, mut renderer) = fixture();
        let mut pool = ThumbnailTaskPool::new();
        let handle = material_handle(&mut assets);
        pool.submit(handle, TaskFlags::ALL).unwrap();

        assert!(pool.update(&mut assets, &mut renderer, dir.path()).is_none());
        assert_eq!(pool.len(), 1);
        assert!(!pool.is_busy());
    }

    #[test]
    fn test_one_stage_per_update() {
        let (dir, mut assets, mut renderer) = fixture();
        let mut pool = ThumbnailTaskPool::new();
        let handle = material_handle(&mut assets);
        pool.submit(handle, TaskFlags::ALL).unwrap();
        pool.start();

        // Import, process: task still queued and mid-flight
        assert!(pool.update(&mut assets, &mut renderer, dir.path()).is_none());
        assert!(pool.is_busy());
        assert!(pool.update(&mut assets, &mut renderer, dir.path()).is_none());

        // Export is the last stage; the task comes back finished
        let finished = pool.update(&mut assets, &mut renderer, dir.path()).unwrap();
        assert!(finished.is_finished());
        assert!(finished.into_output().is_some());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_fifo_order() {
        let (dir, mut assets, mut renderer) = fixture();
        let mut pool = ThumbnailTaskPool::new();
        let first = material_handle(&mut assets);
        let second = material_handle(&mut assets);
        pool.submit(first, TaskFlags::ALL).unwrap();
        pool.submit(second, TaskFlags::ALL).unwrap();
        pool.start();

        let mut finished = Vec::new();
        for _ in 0..8 {
            if let Some(task) = pool.update(&mut assets, &mut renderer, dir.path()) {
                finished.push(task.handle);
            }
        }
        assert_eq!(finished, vec![first, second]);
    }

    #[test]
    fn test_refuses_to_advance_past_mid_flight_task() {
        let (dir, mut assets, mut renderer) = fixture();
        let mut pool = ThumbnailTaskPool::new();
        let first = material_handle(&mut assets);
        let second = material_handle(&mut assets);
        pool.submit(first, TaskFlags::ALL).unwrap();
        pool.submit(second, TaskFlags::ALL).unwrap();
        pool.start();

        // Force the invariant violation the precondition guards
        pool.queue[1].stage = TaskStage::Process;

        assert!(pool.update(&mut assets, &mut renderer, dir.path()).is_none());
        // The front task was not advanced
        assert_eq!(pool.queue[0].stage, TaskStage::Import);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_duplicate_handle_rejected() {
        let (_dir, mut assets, _renderer) = fixture();
        let mut pool = ThumbnailTaskPool::new();
        let handle = material_handle(&mut assets);

        assert!(pool.submit(handle, TaskFlags::ALL).is_some());
        assert!(pool.submit(handle, TaskFlags::ALL).is_none());
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_auto_pause_on_drain() {
        let (dir, mut assets, mut renderer) = fixture();
        let mut pool = ThumbnailTaskPool::new();
        let handle = material_handle(&mut assets);
        pool.submit(handle, TaskFlags::ALL).unwrap();
        pool.start();

        while pool.update(&mut assets, &mut renderer, dir.path()).is_none() {}
        assert!(!pool.is_running());

        // New work needs an explicit start
        let next = material_handle(&mut assets);
        pool.submit(next, TaskFlags::ALL).unwrap();
        assert!(pool.update(&mut assets, &mut renderer, dir.path()).is_none());
        assert_eq!(pool.len(), 1);
        pool.start();
        while pool.update(&mut assets, &mut renderer, dir.path()).is_none() {}
        assert!(pool.is_empty());
    }

    #[test]
    fn test_unavailable_asset_finishes_without_output() {
        let (dir, mut assets, mut renderer) = fixture();
        let mut pool = ThumbnailTaskPool::new();
        pool.submit(AssetHandle::new(404), TaskFlags::ALL).unwrap();
        pool.start();

        let finished = pool.update(&mut assets, &mut renderer, dir.path()).unwrap();
        assert!(finished.is_finished());
        assert!(finished.into_output().is_none());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_preseeded_source_skips_import() {
        let (dir, mut assets, mut renderer) = fixture();
        let mut pool = ThumbnailTaskPool::new();
        let handle = AssetHandle::new(7);
        let asset = Arc::new(Asset::new(
            handle,
            AssetPayload::Material(Material::default()),
        ));
        pool.submit_with_source(handle, TaskFlags::PROCESS | TaskFlags::EXPORT, asset)
            .unwrap();
        pool.start();

        // No import stage work needed; the asset manager knows nothing
        // about this handle and must not be consulted
        let mut finished = None;
        for _ in 0..4 {
            if let Some(task) = pool.update(&mut assets, &mut renderer, dir.path()) {
                finished = Some(task);
                break;
            }
        }
        assert!(finished.unwrap().into_output().is_some());
        assert!(dir.path().join(format!("{handle}.png")).exists());
    }

    #[test]
    fn test_export_writes_png() {
        let (dir, mut assets, mut renderer) = fixture();
        let mut pool = ThumbnailTaskPool::new();
        let handle = material_handle(&mut assets);
        pool.submit(handle, TaskFlags::ALL).unwrap();
        pool.start();

        while pool.update(&mut assets, &mut renderer, dir.path()).is_none() {}
        assert!(dir.path().join(format!("{handle}.png")).exists());
    }

    #[test]
    fn test_flags_skip_export() {
        let (dir, mut assets, mut renderer) = fixture();
        let mut pool = ThumbnailTaskPool::new();
        let handle = material_handle(&mut assets);
        pool.submit(handle, TaskFlags::IMPORT | TaskFlags::PROCESS)
            .unwrap();
        pool.start();

        while pool.update(&mut assets, &mut renderer, dir.path()).is_none() {}
        assert!(!dir.path().join(format!("{handle}.png")).exists());
    }
}
