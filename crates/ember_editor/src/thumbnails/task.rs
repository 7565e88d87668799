//! Thumbnail generation tasks
//!
//! A task carries one asset through up to three stages: import (fetch
//! the payload), process (render pixels) and export (write the disk
//! cache). Which stages run is controlled by a flag set so callers can
//! re-render without re-importing, or refresh the disk cache alone.

use std::ops::{BitOr, BitOrAssign};
use std::sync::Arc;

use ember_asset::{Asset, AssetHandle};

use super::Thumbnail;

/// Which stages a task runs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskFlags(u8);

impl TaskFlags {
    pub const NONE: TaskFlags = TaskFlags(0);
    /// Fetch the asset payload through the asset manager
    pub const IMPORT: TaskFlags = TaskFlags(1 << 0);
    /// Render the thumbnail pixels
    pub const PROCESS: TaskFlags = TaskFlags(1 << 1);
    /// Write the rendered thumbnail to the disk cache
    pub const EXPORT: TaskFlags = TaskFlags(1 << 2);
    pub const ALL: TaskFlags = TaskFlags(0b111);

    pub const fn contains(&self, other: TaskFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for TaskFlags {
    type Output = TaskFlags;
    fn bitor(self, rhs: TaskFlags) -> TaskFlags {
        TaskFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for TaskFlags {
    fn bitor_assign(&mut self, rhs: TaskFlags) {
        self.0 |= rhs.0;
    }
}

/// Lifecycle state visible to the pool's owner
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TaskStatus {
    #[default]
    Unfinished,
    Finished,
}

/// Internal stage cursor; stages without their flag are skipped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum TaskStage {
    Import,
    Process,
    Export,
    Done,
}

impl TaskStage {
    pub(super) fn next(self) -> TaskStage {
        match self {
            TaskStage::Import => TaskStage::Process,
            TaskStage::Process => TaskStage::Export,
            TaskStage::Export | TaskStage::Done => TaskStage::Done,
        }
    }
}

/// One queued thumbnail generation job
#[derive(Debug)]
pub struct ThumbnailTask {
    pub(super) id: u64,
    pub handle: AssetHandle,
    pub flags: TaskFlags,
    pub status: TaskStatus,
    pub(super) stage: TaskStage,
    /// Payload resolved by the import stage (or provided up front)
    pub(super) source: Option<Arc<Asset>>,
    /// Pixels produced by the process stage
    pub(super) output: Option<Thumbnail>,
}

impl ThumbnailTask {
    pub(super) fn new(id: u64, handle: AssetHandle, flags: TaskFlags) -> Self {
        Self {
            id,
            handle,
            flags,
            status: TaskStatus::default(),
            stage: TaskStage::Import,
            source: None,
            output: None,
        }
    }

    /// Pre-seed the payload, letting the import stage pass through
    pub(super) fn with_source(mut self, source: Arc<Asset>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_finished(&self) -> bool {
        self.status == TaskStatus::Finished
    }

    /// Take the rendered thumbnail out of a finished task
    pub fn into_output(self) -> Option<Thumbnail> {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_set_operations() {
        let flags = TaskFlags::IMPORT | TaskFlags::PROCESS;
        assert!(flags.contains(TaskFlags::IMPORT));
        assert!(flags.contains(TaskFlags::PROCESS));
        assert!(!flags.contains(TaskFlags::EXPORT));
        assert!(TaskFlags::ALL.contains(flags));
        assert!(flags.contains(TaskFlags::NONE));
    }

    #[test]
    fn test_stage_order() {
        let mut stage = TaskStage::Import;
        stage = stage.next();
        assert_eq!(stage, TaskStage::Process);
        stage = stage.next();
        assert_eq!(stage, TaskStage::Export);
        stage = stage.next();
        assert_eq!(stage, TaskStage::Done);
        assert_eq!(stage.next(), TaskStage::Done);
    }
}
