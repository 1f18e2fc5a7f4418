//! Ownership of the compiled scene's backend list.

use super::SceneKey;
use crate::renderer::{DrawBackend, DrawCommand};

/// Lifecycle of a [`SceneCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// No compiled list.
    Empty,
    /// A list matching the stored key is live.
    Compiled,
    /// A list is live but must be rebuilt before use.
    Dirty,
}

/// At most one compiled command list, tagged with the inputs it was built
/// from.
#[derive(Debug)]
pub struct SceneCache<H> {
    entry: Option<(SceneKey, H)>,
    dirty: bool,
    builds: u64,
}

impl<H> Default for SceneCache<H> {
    fn default() -> Self {
        Self {
            entry: None,
            dirty: false,
            builds: 0,
        }
    }
}

impl<H: Copy + std::fmt::Debug> SceneCache<H> {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> CacheState {
        match (&self.entry, self.dirty) {
            (None, _) => CacheState::Empty,
            (Some(_), false) => CacheState::Compiled,
            (Some(_), true) => CacheState::Dirty,
        }
    }

    /// Key of the live list, if any.
    #[must_use]
    pub fn key(&self) -> Option<SceneKey> {
        self.entry.as_ref().map(|(key, _)| *key)
    }

    /// Handle of the live list, if any and not dirty.
    #[must_use]
    pub fn handle(&self) -> Option<H> {
        match (&self.entry, self.dirty) {
            (Some((_, handle)), false) => Some(*handle),
            _ => None,
        }
    }

    /// Number of lists compiled over the cache's lifetime.
    #[must_use]
    pub fn builds(&self) -> u64 {
        self.builds
    }

    /// Mark the live list stale; the next [`Self::ensure`] rebuilds.
    pub fn invalidate(&mut self) {
        if self.entry.is_some() {
            self.dirty = true;
        }
    }

    /// Return a handle for `key`, compiling `build()` when the cache is
    /// empty, dirty or holds a different key. The previous list is freed
    /// before the new one is compiled. The second value reports whether a
    /// rebuild happened.
    pub fn ensure<B, F>(
        &mut self,
        backend: &mut B,
        key: SceneKey,
        build: F,
    ) -> (H, bool)
    where
        B: DrawBackend<ListHandle = H>,
        F: FnOnce() -> Vec<DrawCommand>,
    {
        if let Some((cached, handle)) = &self.entry {
            if !self.dirty && *cached == key {
                return (*handle, false);
            }
        }
        self.release(backend);
        let commands = build();
        let handle = backend.compile(&commands);
        self.entry = Some((key, handle));
        self.builds += 1;
        log::debug!("compiled scene {key:?} as {handle:?}");
        (handle, true)
    }

    /// Free the live list, if any, and return to [`CacheState::Empty`].
    pub fn release<B>(&mut self, backend: &mut B)
    where
        B: DrawBackend<ListHandle = H>,
    {
        if let Some((_, handle)) = self.entry.take() {
            backend.delete_list(handle);
        }
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::{BackendCall, ListId, RecordingBackend};
    use crate::scene::SceneParams;

    fn key(generation: u64) -> SceneKey {
        SceneKey::new(generation, SceneParams::default())
    }

    fn one_command() -> Vec<DrawCommand> {
        vec![DrawCommand::PushMatrix, DrawCommand::PopMatrix]
    }

    #[test]
    fn same_key_reuses_list() {
        let mut backend = RecordingBackend::new();
        let mut cache = SceneCache::new();
        assert_eq!(cache.state(), CacheState::Empty);

        let (first, rebuilt) = cache.ensure(&mut backend, key(1), one_command);
        assert!(rebuilt);
        assert_eq!(cache.state(), CacheState::Compiled);

        let (second, rebuilt) = cache.ensure(&mut backend, key(1), || {
            panic!("must not rebuild")
        });
        assert!(!rebuilt);
        assert_eq!(first, second);
        assert_eq!(cache.builds(), 1);
        assert_eq!(backend.live_lists(), 1);
    }

    #[test]
    fn dirty_or_new_key_rebuilds_and_frees_old_list() {
        let mut backend = RecordingBackend::new();
        let mut cache: SceneCache<ListId> = SceneCache::new();
        let (first, _) = cache.ensure(&mut backend, key(1), one_command);

        cache.invalidate();
        assert_eq!(cache.state(), CacheState::Dirty);
        assert_eq!(cache.handle(), None);
        let (second, rebuilt) = cache.ensure(&mut backend, key(1), one_command);
        assert!(rebuilt);
        assert_ne!(first, second);

        let (third, rebuilt) = cache.ensure(&mut backend, key(2), one_command);
        assert!(rebuilt);
        assert_eq!(cache.key(), Some(key(2)));
        assert_eq!(backend.live_lists(), 1);

        let calls = backend.take_calls();
        let delete_first = calls
            .iter()
            .position(|c| *c == BackendCall::DeleteList(first))
            .unwrap();
        let compile_second = calls
            .iter()
            .position(|c| matches!(c, BackendCall::Compile { list, .. } if *list == second))
            .unwrap();
        assert!(delete_first < compile_second);
        assert!(calls.contains(&BackendCall::DeleteList(second)));
        assert!(!calls.contains(&BackendCall::DeleteList(third)));
    }

    #[test]
    fn release_empties_cache() {
        let mut backend = RecordingBackend::new();
        let mut cache = SceneCache::new();
        let _ = cache.ensure(&mut backend, key(1), one_command);
        cache.release(&mut backend);
        assert_eq!(cache.state(), CacheState::Empty);
        assert_eq!(backend.live_lists(), 0);
        cache.invalidate();
        assert_eq!(cache.state(), CacheState::Empty);
    }
}
