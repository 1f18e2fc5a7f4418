//! In-memory [`DrawBackend`] that records every call.
//!
//! Used by the headless binary, tests and benches in place of a GPU or GL
//! context. Compiled lists are kept until deleted so leaks across molecule
//! reloads are observable through [`RecordingBackend::live_lists`].

use glam::DMat4;
use rustc_hash::FxHashMap;

use super::backend::{BlendMode, ClearFlags, ColorMask, DrawBackend, DrawCommand};
use crate::camera::{Perspective, Viewport};

/// Handle to a list stored in a [`RecordingBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(pub u32);

/// One frame-level call received by the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    /// A list was compiled.
    Compile {
        /// Assigned handle.
        list: ListId,
        /// Number of commands compiled.
        commands: usize,
    },
    /// A list was replayed.
    CallList(ListId),
    /// A list was freed.
    DeleteList(ListId),
    /// Buffers were cleared.
    Clear(ClearFlags),
    /// The color mask changed.
    ColorMask(ColorMask),
    /// The blend mode changed.
    Blend(BlendMode),
    /// A projection was loaded.
    Projection(Perspective),
    /// The viewport changed.
    Viewport(Viewport),
    /// A view matrix was loaded.
    View(DMat4),
    /// A framebuffer capture was taken.
    Capture,
}

/// Recording implementation of [`DrawBackend`].
#[derive(Debug, Default)]
pub struct RecordingBackend {
    lists: FxHashMap<u32, Vec<DrawCommand>>,
    next_list: u32,
    calls: Vec<BackendCall>,
}

impl RecordingBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received since creation or the last [`Self::take_calls`].
    #[must_use]
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Drain the call log.
    pub fn take_calls(&mut self) -> Vec<BackendCall> {
        std::mem::take(&mut self.calls)
    }

    /// Commands of a live list.
    #[must_use]
    pub fn list(&self, list: ListId) -> Option<&[DrawCommand]> {
        self.lists.get(&list.0).map(Vec::as_slice)
    }

    /// Number of compiled lists not yet deleted.
    #[must_use]
    pub fn live_lists(&self) -> usize {
        self.lists.len()
    }
}

impl DrawBackend for RecordingBackend {
    type ListHandle = ListId;
    type Snapshot = Vec<BackendCall>;

    fn compile(&mut self, commands: &[DrawCommand]) -> ListId {
        self.next_list += 1;
        let list = ListId(self.next_list);
        let _ = self.lists.insert(list.0, commands.to_vec());
        self.calls.push(BackendCall::Compile {
            list,
            commands: commands.len(),
        });
        list
    }

    fn call_list(&mut self, list: ListId) {
        if !self.lists.contains_key(&list.0) {
            log::warn!("call of deleted list {list:?}");
        }
        self.calls.push(BackendCall::CallList(list));
    }

    fn delete_list(&mut self, list: ListId) {
        let _ = self.lists.remove(&list.0);
        self.calls.push(BackendCall::DeleteList(list));
    }

    fn clear(&mut self, flags: ClearFlags) {
        self.calls.push(BackendCall::Clear(flags));
    }

    fn set_color_mask(&mut self, mask: ColorMask) {
        self.calls.push(BackendCall::ColorMask(mask));
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.calls.push(BackendCall::Blend(mode));
    }

    fn set_projection(&mut self, projection: &Perspective) {
        self.calls.push(BackendCall::Projection(*projection));
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.calls.push(BackendCall::Viewport(viewport));
    }

    fn load_view(&mut self, view: &DMat4) {
        self.calls.push(BackendCall::View(*view));
    }

    fn capture_frame(&mut self) -> Option<Vec<BackendCall>> {
        self.calls.push(BackendCall::Capture);
        Some(self.calls.clone())
    }
}
