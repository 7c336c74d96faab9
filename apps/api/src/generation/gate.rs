//! Generation gate — at most one generation in flight.
//!
//! The layout engine has no reentrant state protection, so the controller
//! holds an explicit phase token instead of an ambient boolean. The mutex is
//! locked only for transitions and never across an await point; the write to
//! the sink happens between `try_begin` and `complete`/`fail`.

use std::sync::Mutex;

/// Where the controller is in the generation lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationPhase {
    Idle,
    Generating,
    /// Last run failed at the sink; retry is allowed from here.
    Failed(String),
}

#[derive(Debug)]
pub struct GenerationGate {
    phase: Mutex<GenerationPhase>,
}

impl GenerationGate {
    pub fn new() -> Self {
        GenerationGate {
            phase: Mutex::new(GenerationPhase::Idle),
        }
    }

    /// Attempts to claim the gate. Returns false while another generation is
    /// in flight; `Idle` and `Failed` both admit a new run.
    pub fn try_begin(&self) -> bool {
        let mut phase = self.lock();
        if *phase == GenerationPhase::Generating {
            return false;
        }
        *phase = GenerationPhase::Generating;
        true
    }

    /// Marks the in-flight generation as finished successfully.
    pub fn complete(&self) {
        *self.lock() = GenerationPhase::Idle;
    }

    /// Marks the in-flight generation as failed, keeping the reason for
    /// inspection. The gate is open again — the user may retry unchanged.
    pub fn fail(&self, reason: impl Into<String>) {
        *self.lock() = GenerationPhase::Failed(reason.into());
    }

    pub fn phase(&self) -> GenerationPhase {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GenerationPhase> {
        // A poisoned gate would otherwise deadlock every later request;
        // the phase value itself is always valid.
        self.phase.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for GenerationGate {
    fn default() -> Self {
        Self::new()
    }
}
