use std::sync::Arc;

use course_core::countdown::{AutoAdvance, DEFAULT_COUNTDOWN_SECONDS, TickOutcome};
use course_core::model::{CompletionSet, Lesson, LessonId, ViewerId};
use course_core::series::SeriesProgress;
use course_core::Clock;
use storage::repository::{CompletionRepository, LessonRepository};

use super::queries::SeriesQueries;
use crate::error::PlayerError;
use crate::notify::{Notifier, NoopNotifier};

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

/// Capability flags for a player instance.
///
/// The upstream UI shipped several near-duplicate player variants (with and
/// without auto-advance); this consolidates them behind configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerConfig {
    pub auto_advance: bool,
    pub countdown_seconds: u8,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            auto_advance: true,
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
        }
    }
}

//
// ─── PLAYER ────────────────────────────────────────────────────────────────────
//

/// Per-player navigation session.
///
/// Owns the single auto-advance countdown for this player and the viewer's
/// session completion set. Collaborators (catalog, notifier, clock,
/// completion store) are injected so the service can be exercised with fakes.
///
/// Single-threaded and event-driven: the host calls `lesson_ended` when
/// playback finishes, `tick` once per second, and `open` for manual
/// navigation.
pub struct PlayerService {
    config: PlayerConfig,
    lessons: Arc<dyn LessonRepository>,
    notifier: Arc<dyn Notifier>,
    clock: Clock,
    countdown: AutoAdvance,
    completed: CompletionSet,
    current: Option<Lesson>,
    completion_store: Option<(Arc<dyn CompletionRepository>, ViewerId)>,
}

impl PlayerService {
    #[must_use]
    pub fn new(lessons: Arc<dyn LessonRepository>) -> Self {
        Self {
            config: PlayerConfig::default(),
            lessons,
            notifier: Arc::new(NoopNotifier),
            clock: Clock::default(),
            countdown: AutoAdvance::new(),
            completed: CompletionSet::new(),
            current: None,
            completion_store: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: PlayerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Persist completions for the given viewer in addition to the session
    /// set.
    #[must_use]
    pub fn with_completion_store(
        mut self,
        store: Arc<dyn CompletionRepository>,
        viewer: ViewerId,
    ) -> Self {
        self.completion_store = Some((store, viewer));
        self
    }

    /// Load previously persisted completions into the session set.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Storage` when the completion store fails.
    pub async fn restore_completed(&mut self) -> Result<(), PlayerError> {
        let Some((store, viewer)) = &self.completion_store else {
            return Ok(());
        };
        let persisted = store.completed_lessons(*viewer).await?;
        for id in persisted.ids() {
            self.completed.mark(id);
        }
        Ok(())
    }

    /// Manual navigation to a lesson.
    ///
    /// Cancelling the countdown is the first, synchronous step: a manual
    /// request issued while a countdown is active must suppress the pending
    /// auto-advance before anything else happens.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::LessonNotFound` for an unknown id and
    /// `PlayerError::Storage` when the catalog fetch fails.
    pub async fn open(&mut self, id: LessonId) -> Result<Lesson, PlayerError> {
        self.countdown.cancel();

        let lesson = self
            .lessons
            .get_lesson(id)
            .await?
            .ok_or(PlayerError::LessonNotFound(id))?;
        self.current = Some(lesson.clone());
        Ok(lesson)
    }

    /// Playback-completion entry point, called by the media player.
    ///
    /// Marks the current lesson complete and, when auto-advance is enabled
    /// and a next lesson exists, arms the countdown toward it (replacing any
    /// active one). Returns the armed countdown length, or `None` when no
    /// countdown was armed.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::NoCurrentLesson` if no lesson is open, and
    /// propagates catalog or completion-store failures.
    pub async fn lesson_ended(&mut self) -> Result<Option<u8>, PlayerError> {
        let current = self
            .current
            .clone()
            .ok_or(PlayerError::NoCurrentLesson)?;

        self.completed.mark(current.id());
        if let Some((store, viewer)) = &self.completion_store {
            store
                .mark_completed(*viewer, current.id(), self.clock.now())
                .await?;
        }

        if !self.config.auto_advance {
            return Ok(None);
        }

        let next =
            SeriesQueries::next_lesson(self.lessons.as_ref(), current.id(), current.category())
                .await
                .map_err(PlayerError::Navigator)?;

        let Some(next) = next else {
            return Ok(None);
        };

        self.countdown.arm(next.clone(), self.config.countdown_seconds);
        self.notifier.notify(&format!(
            "Up next: {} (starting in {}s)",
            next.title(),
            self.config.countdown_seconds
        ));
        Ok(Some(self.config.countdown_seconds))
    }

    /// Once-per-second countdown driver.
    ///
    /// When the countdown elapses, navigation to the armed target happens
    /// here, exactly once, and the new current lesson is returned. The target
    /// was resolved when the countdown was armed, so no catalog access is
    /// needed.
    pub fn tick(&mut self) -> Option<Lesson> {
        match self.countdown.tick() {
            TickOutcome::Inactive | TickOutcome::Ticking { .. } => None,
            TickOutcome::Elapsed(target) => {
                tracing::debug!(id = target.id().value(), "auto-advancing");
                self.current = Some(target.clone());
                Some(target)
            }
        }
    }

    /// Explicit user cancel. Returns true if a countdown was discarded.
    pub fn cancel_auto_advance(&mut self) -> bool {
        self.countdown.cancel()
    }

    /// Teardown: discard any active countdown so nothing can fire afterwards.
    pub fn close(&mut self) {
        self.countdown.cancel();
        self.current = None;
    }

    /// Completion report for the current lesson's series, using this
    /// session's completion set. `None` when no lesson is open.
    ///
    /// # Errors
    ///
    /// Returns `PlayerError::Navigator` when the catalog fetch fails.
    pub async fn series_progress(&self) -> Result<Option<SeriesProgress>, PlayerError> {
        let Some(current) = &self.current else {
            return Ok(None);
        };
        let report = SeriesQueries::series_progress(
            self.lessons.as_ref(),
            current.category(),
            &self.completed,
        )
        .await
        .map_err(PlayerError::Navigator)?;
        Ok(Some(report))
    }

    #[must_use]
    pub fn current(&self) -> Option<&Lesson> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn completed(&self) -> &CompletionSet {
        &self.completed
    }

    #[must_use]
    pub fn is_counting_down(&self) -> bool {
        self.countdown.is_active()
    }

    #[must_use]
    pub fn countdown_remaining(&self) -> Option<u8> {
        self.countdown.seconds_remaining()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
