//! Non-blocking transitions.
//!
//! A [`TransitionEngine`] animates any number of independent slots toward
//! their targets. Nothing is awaited: the caller ticks the engine with the
//! current instant and receives the interpolated values for that instant.

use embassy_time::{Duration, Instant};

use crate::color::{Rgb, blend_colors, lerp};

/// Blends two values of type `T` using an eased progress value (0.0-1.0).
pub type ValueBlender<T> = fn(T, T, f32) -> T;

/// Reshapes linear progress (0.0-1.0).
pub type Easing = fn(f32) -> f32;

/// No reshaping.
pub fn linear(progress: f32) -> f32 {
    progress
}

/// Quadratic ease-in: slow start, accelerating toward the end.
pub fn ease_in_quad(progress: f32) -> f32 {
    progress * progress
}

/// Error returned when starting a transition on a slot the engine does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    SlotOutOfRange { slot: usize, capacity: usize },
}

impl core::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransitionError::SlotOutOfRange { slot, capacity } => {
                write!(f, "slot {slot} out of range (capacity {capacity})")
            }
        }
    }
}

/// A single animated quantity.
///
/// The emitted value depends only on the stored parameters and the instant
/// it is sampled at.
#[derive(Debug, Clone, Copy)]
pub struct Transition<T: Copy> {
    /// Value at the start of transition.
    source: T,
    /// Value reached when the transition completes.
    target: T,
    /// Time at which the transition started.
    start_time: Instant,
    /// Total transition duration.
    duration: Duration,
    easing: Easing,
}

impl<T: Copy> Transition<T> {
    /// Create a transition.
    ///
    /// # Arguments
    /// * `source` - Value emitted at `start_time`
    /// * `target` - Value emitted once `duration` has elapsed
    /// * `easing` - Reshapes the linear progress before blending
    pub const fn new(
        source: T,
        target: T,
        start_time: Instant,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        Self {
            source,
            target,
            start_time,
            duration,
            easing,
        }
    }

    pub const fn target(&self) -> T {
        self.target
    }

    /// Linear progress clamped to 0.0-1.0.
    ///
    /// A zero duration is complete immediately.
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self, now: Instant) -> f32 {
        let duration = self.duration.as_ticks();
        let elapsed = now.saturating_duration_since(self.start_time).as_ticks();
        if elapsed >= duration {
            return 1.0;
        }
        elapsed as f32 / duration as f32
    }

    /// Value at `now` and whether the transition has completed.
    ///
    /// A completed transition yields `target` exactly.
    pub fn sample(&self, now: Instant, blend: ValueBlender<T>) -> (T, bool) {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return (self.target, true);
        }
        let eased = (self.easing)(progress);
        (blend(self.source, self.target, eased), false)
    }
}

/// Set of concurrently running transitions keyed by slot.
#[derive(Debug, Clone)]
pub struct TransitionEngine<T: Copy, const SLOTS: usize> {
    /// Blender function.
    blend: ValueBlender<T>,
    slots: [Option<Transition<T>>; SLOTS],
}

impl<T: Copy, const SLOTS: usize> TransitionEngine<T, SLOTS> {
    /// Create an idle engine.
    ///
    /// # Arguments
    /// * `blend` - Interpolates between source and target for a given progress
    pub const fn new(blend: ValueBlender<T>) -> Self {
        Self {
            blend,
            slots: [None; SLOTS],
        }
    }

    pub const fn capacity(&self) -> usize {
        SLOTS
    }

    /// Start a transition on `slot`.
    ///
    /// Whatever was running on that slot is dropped and never emits again.
    ///
    /// # Arguments
    /// * `slot` - Pixel index, or the backlight slot
    /// * `source` - Value the transition starts from, usually the rendered one
    /// * `target` - Value reached at completion
    /// * `duration` - Zero completes on the next tick
    /// * `now` - Start time
    ///
    /// # Returns
    /// `TransitionError::SlotOutOfRange` if `slot` is not below the capacity.
    pub fn start(
        &mut self,
        slot: usize,
        source: T,
        target: T,
        duration: Duration,
        easing: Easing,
        now: Instant,
    ) -> Result<(), TransitionError> {
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(TransitionError::SlotOutOfRange {
                slot,
                capacity: SLOTS,
            })?;
        *entry = Some(Transition::new(source, target, now, duration, easing));
        Ok(())
    }

    /// Check if a transition is running on `slot`.
    pub fn is_active(&self, slot: usize) -> bool {
        matches!(self.slots.get(slot), Some(Some(_)))
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_idle(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Advance every running transition.
    ///
    /// `emit` receives the slot and its value at `now`. Completed transitions
    /// emit their exact target once, then are removed.
    pub fn tick<F>(&mut self, now: Instant, mut emit: F)
    where
        F: FnMut(usize, T),
    {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(transition) = slot else {
                continue;
            };
            let (value, done) = transition.sample(now, self.blend);
            emit(index, value);
            if done {
                *slot = None;
            }
        }
    }
}

impl<const SLOTS: usize> TransitionEngine<f32, SLOTS> {
    /// Create an engine for scalar values.
    pub const fn new_scalar() -> Self {
        Self::new(lerp)
    }
}

impl<const SLOTS: usize> TransitionEngine<Rgb, SLOTS> {
    /// Create an engine for rgb colors.
    pub const fn new_rgb() -> Self {
        Self::new(blend_colors)
    }
}
