//! Bookkeeping for asynchronous terrain loads.
//!
//! Every load is tagged with the selection generation that requested it. A
//! newer request supersedes the older one, and completions carrying a stale
//! generation are dropped instead of being applied to the scene.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Pending,
    Ready,
    /// The asset could not be loaded; the scene shows its fallback ground.
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
}

#[derive(Clone, Debug)]
pub struct LoadTracker {
    generation: Option<u64>,
    phase: LoadPhase,
}

impl Default for LoadTracker {
    fn default() -> Self {
        Self {
            generation: None,
            phase: LoadPhase::Idle,
        }
    }
}

impl LoadTracker {
    /// Start tracking a load for `generation`, superseding any in-flight one.
    /// Returns the generation that was abandoned, if it was still pending.
    pub fn begin(&mut self, generation: u64) -> Option<u64> {
        let abandoned = match (self.phase, self.generation) {
            (LoadPhase::Pending, Some(previous)) if previous != generation => Some(previous),
            _ => None,
        };
        self.generation = Some(generation);
        self.phase = LoadPhase::Pending;
        abandoned
    }

    /// Apply a completion. Returns `false` when it belongs to a superseded
    /// load or the current load already resolved.
    pub fn resolve(&mut self, generation: u64, outcome: LoadOutcome) -> bool {
        if self.generation != Some(generation) || self.phase != LoadPhase::Pending {
            return false;
        }
        self.phase = match outcome {
            LoadOutcome::Loaded => LoadPhase::Ready,
            LoadOutcome::Failed => LoadPhase::Failed,
        };
        true
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.phase == LoadPhase::Pending
    }

    /// Whether `generation` still needs a load started.
    pub fn needs_load(&self, generation: u64) -> bool {
        self.generation != Some(generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_lifecycle() {
        let mut tracker = LoadTracker::default();
        assert_eq!(tracker.phase(), LoadPhase::Idle);
        assert!(tracker.needs_load(0));

        assert_eq!(tracker.begin(0), None);
        assert!(tracker.is_pending());
        assert!(!tracker.needs_load(0));

        assert!(tracker.resolve(0, LoadOutcome::Loaded));
        assert_eq!(tracker.phase(), LoadPhase::Ready);
        assert!(!tracker.resolve(0, LoadOutcome::Failed));
        assert_eq!(tracker.phase(), LoadPhase::Ready);
    }

    #[test]
    fn newer_request_supersedes_pending_load() {
        let mut tracker = LoadTracker::default();
        tracker.begin(1);
        assert_eq!(tracker.begin(2), Some(1));

        assert!(!tracker.resolve(1, LoadOutcome::Loaded));
        assert!(tracker.is_pending());
        assert!(tracker.resolve(2, LoadOutcome::Failed));
        assert_eq!(tracker.phase(), LoadPhase::Failed);
    }

    #[test]
    fn resolved_load_is_not_reported_as_abandoned() {
        let mut tracker = LoadTracker::default();
        tracker.begin(1);
        tracker.resolve(1, LoadOutcome::Loaded);
        assert_eq!(tracker.begin(2), None);
    }
}
