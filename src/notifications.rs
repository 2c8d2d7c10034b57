//! Toast notifications.
//!
//! Short-lived success/error messages reported back from user actions. The
//! manager only keeps the queue; drawing the toasts is up to the UI.

use crate::constants::{ERROR_TOAST_DURATION, SUCCESS_TOAST_DURATION, TOAST_FADE_DURATION};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

static NEXT_TOAST_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Error,
}

impl ToastVariant {
    pub fn default_duration(&self) -> Duration {
        match self {
            ToastVariant::Success => SUCCESS_TOAST_DURATION,
            ToastVariant::Error => ERROR_TOAST_DURATION,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToastVariant::Success => "✓",
            ToastVariant::Error => "✗",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ToastVariant::Success => "Success",
            ToastVariant::Error => "Error",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub id: u64,
    pub variant: ToastVariant,
    pub message: String,
    pub created: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(variant: ToastVariant, message: impl Into<String>) -> Self {
        Self {
            id: NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed),
            variant,
            message: message.into(),
            created: Instant::now(),
            duration: variant.default_duration(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastVariant::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastVariant::Error, message)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created.elapsed() >= self.duration
    }

    /// Fraction of the lifetime left, from 1.0 (fresh) to 0.0 (expired)
    pub fn remaining_percent(&self) -> f32 {
        if self.duration.is_zero() {
            return 0.0;
        }
        let elapsed = self.created.elapsed().as_secs_f32();
        (1.0 - elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Opacity for drawing; fades out over the last moments unless motion is reduced
    pub fn opacity(&self, reduce_motion: bool) -> f32 {
        if reduce_motion {
            return 1.0;
        }
        let remaining = self.duration.saturating_sub(self.created.elapsed());
        if remaining >= TOAST_FADE_DURATION {
            1.0
        } else {
            remaining.as_secs_f32() / TOAST_FADE_DURATION.as_secs_f32()
        }
    }
}

#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    pub fn remove(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    /// Drop toasts whose display time is over
    pub fn prune_expired(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    pub fn count(&self) -> usize {
        self.toasts.len()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }
}
