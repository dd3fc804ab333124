//! Slider action handler: the torch state machine behind the slider switch.
//!
//! [`TorchHandler`] resolves a rear-facing light source once at
//! construction, then maps incoming action codes to torch state: off, on,
//! or a periodic blink. At most one blink task exists at any time; every
//! new action or reset cancels it before touching the torch, so a stale
//! tick can never re-enable the light after a newer command.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::blink::Blinker;
use crate::camera::CameraService;
use crate::config::Config;
use crate::slider::SliderAction;

/// State shared between the handler and its blink worker.
struct TorchShared<C> {
    camera: C,
    /// Resolved once at construction; `None` degrades every operation to a
    /// no-op for the handler's lifetime.
    source: Option<String>,
    /// Last successfully applied torch state.
    enabled: Mutex<bool>,
}

impl<C: CameraService> TorchShared<C> {
    /// Issue the hardware call; only a successful call moves the state.
    /// Torch control is best-effort and non-critical, so failures are
    /// logged and dropped rather than propagated, with no retry.
    fn drive(&self, id: &str, enabled: &mut bool, target: bool) {
        match self.camera.set_torch_mode(id, target) {
            Ok(()) => *enabled = target,
            Err(e) => log::debug!("set_torch_mode({target}) ignored: {e}"),
        }
    }

    fn apply(&self, target: bool) {
        let Some(id) = self.source.as_deref() else {
            return;
        };
        let Ok(mut enabled) = self.enabled.lock() else {
            return;
        };
        self.drive(id, &mut enabled, target);
    }

    /// One blink tick: flip to the logical negation of the current state.
    fn toggle(&self) {
        let Some(id) = self.source.as_deref() else {
            return;
        };
        let Ok(mut enabled) = self.enabled.lock() else {
            return;
        };
        let target = !*enabled;
        self.drive(id, &mut enabled, target);
    }
}

/// Handler for the torch positions of the slider switch.
pub struct TorchHandler<C: CameraService + Send + Sync + 'static> {
    shared: Arc<TorchShared<C>>,
    /// The active blink task, if any. Owned exclusively here.
    blink: Option<Blinker>,
    blink_interval: Duration,
}

impl<C: CameraService + Send + Sync + 'static> TorchHandler<C> {
    /// Resolve a light source and start in the off state.
    ///
    /// Selection order: the configured explicit id if set, otherwise the
    /// first enumerated source with the preferred facing. Enumeration
    /// failure and "nothing matches" both degrade to a handler whose
    /// control operations are permanent no-ops.
    pub fn new(camera: C, config: &Config) -> Self {
        let source = resolve_source(&camera, config);
        match &source {
            Some(id) => log::debug!("torch light source: {id}"),
            None => log::debug!("no torch light source resolved"),
        }
        TorchHandler {
            shared: Arc::new(TorchShared {
                camera,
                source,
                enabled: Mutex::new(false),
            }),
            blink: None,
            blink_interval: config.blink_interval(),
        }
    }

    pub fn with_defaults(camera: C) -> Self {
        Self::new(camera, &Config::default())
    }

    /// Process one slider action code.
    ///
    /// Returns whether the code belongs to this handler; unknown codes are
    /// rejected with no side effect.
    pub fn handle(&mut self, action: i32) -> bool {
        log::debug!("slider action: {action}");
        let Ok(action) = SliderAction::try_from(action) else {
            return false;
        };
        // A recognized action always supersedes a pending blink task.
        // Cancellation joins the worker, so no stale tick runs past here.
        self.cancel_blink();
        match action {
            SliderAction::Off => self.shared.apply(false),
            SliderAction::On => self.shared.apply(true),
            SliderAction::Blink => {
                let shared = Arc::clone(&self.shared);
                self.blink = Some(Blinker::spawn(self.blink_interval, move || shared.toggle()));
            }
        }
        true
    }

    /// Cancel any blink task and force the torch off.
    ///
    /// Called by the host when the handler is torn down or superseded.
    /// Idempotent, and safe without a resolved light source.
    pub fn reset(&mut self) {
        self.cancel_blink();
        self.shared.apply(false);
    }

    fn cancel_blink(&mut self) {
        if let Some(blink) = self.blink.take() {
            blink.cancel();
        }
    }

    /// Last successfully applied torch state.
    pub fn torch_enabled(&self) -> bool {
        self.shared.enabled.lock().map(|e| *e).unwrap_or(false)
    }

    /// Whether a blink task is currently scheduled.
    pub fn blinking(&self) -> bool {
        self.blink.is_some()
    }

    /// The resolved light source id, if any.
    pub fn source_id(&self) -> Option<&str> {
        self.shared.source.as_deref()
    }
}

fn resolve_source<C: CameraService>(camera: &C, config: &Config) -> Option<String> {
    let sources = match camera.light_sources() {
        Ok(sources) => sources,
        Err(e) => {
            log::debug!("light source enumeration failed: {e}");
            return None;
        }
    };
    let override_id = config.light_source.trim();
    if !override_id.is_empty() {
        if sources.iter().any(|s| s.id == override_id) {
            return Some(override_id.to_string());
        }
        // Degrade rather than fall back: a stale override must not end up
        // driving a different LED.
        log::warn!("configured light source not found: {override_id}");
        return None;
    }
    let facing = config.preferred_facing();
    sources
        .into_iter()
        .find(|s| s.facing == facing)
        .map(|s| s.id)
}
