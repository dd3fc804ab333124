//! Camera/light-source access: trait, Linux sysfs backend, test mock.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

// ── Error type ──

/// Camera subsystem errors.
///
/// String payloads follow the convention **"context: details"** where
/// *context* identifies the operation or attribute (e.g. `"brightness"`,
/// `"read_dir"`) and *details* describes what went wrong.
#[derive(Debug)]
pub enum CameraError {
    /// The platform refused access to the light source.
    AccessDenied(String),
    /// The light source (or the whole subsystem) is not present.
    NotAvailable(String),
    /// Other I/O failure while talking to the subsystem.
    Io(String),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::AccessDenied(e) => write!(f, "Camera access denied: {e}"),
            CameraError::NotAvailable(e) => write!(f, "Light source not available: {e}"),
            CameraError::Io(e) => write!(f, "Camera I/O error: {e}"),
        }
    }
}

impl std::error::Error for CameraError {}

pub type Result<T> = std::result::Result<T, CameraError>;

// ── Light sources ──

/// Which way a light source points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Back,
    Front,
    External,
}

impl Facing {
    /// Parse a facing name as used in the config file.
    ///
    /// Accepts `"back"`/`"rear"`, `"front"` and `"external"` (any case).
    pub fn parse(s: &str) -> Option<Facing> {
        match s.trim().to_ascii_lowercase().as_str() {
            "back" | "rear" => Some(Facing::Back),
            "front" => Some(Facing::Front),
            "external" => Some(Facing::External),
            _ => None,
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facing::Back => write!(f, "back"),
            Facing::Front => write!(f, "front"),
            Facing::External => write!(f, "external"),
        }
    }
}

/// A discovered torch-capable light source.
#[derive(Debug, Clone, Serialize)]
pub struct LightSource {
    /// Opaque identifier, passed back to [`CameraService::set_torch_mode`].
    pub id: String,
    pub facing: Facing,
}

// ── Trait ──

/// Host-injected camera capability: enumerate light sources, drive one.
///
/// The handler takes this as a type parameter so tests can substitute
/// [`mock::MockCamera`].
pub trait CameraService {
    /// Enumerate torch-capable light sources, in a stable order.
    fn light_sources(&self) -> Result<Vec<LightSource>>;

    /// Switch a light source on or off.
    fn set_torch_mode(&self, id: &str, enabled: bool) -> Result<()>;
}

/// Shared handles forward, so a caller can hand the handler an
/// `Arc<MockCamera>` and keep a reference for inspection.
impl<C: CameraService + ?Sized> CameraService for std::sync::Arc<C> {
    fn light_sources(&self) -> Result<Vec<LightSource>> {
        (**self).light_sources()
    }

    fn set_torch_mode(&self, id: &str, enabled: bool) -> Result<()> {
        (**self).set_torch_mode(id, enabled)
    }
}

// ── Label classification ──

/// Whether a sysfs LED label names a flash/torch function.
///
/// Labels follow the `device:color:function` convention; the function lives
/// in the last colon-separated segment, but vendor trees are sloppy enough
/// that any segment counts.
pub fn is_torch_label(label: &str) -> bool {
    label
        .split(':')
        .any(|seg| seg.contains("flash") || seg.contains("torch"))
}

/// Infer facing from a sysfs LED label.
///
/// Unmarked flash modules are treated as rear-facing; phone main flashes
/// usually carry no facing marker.
pub fn facing_from_label(label: &str) -> Facing {
    if label.contains("front") {
        Facing::Front
    } else if label.contains("ext") {
        Facing::External
    } else {
        Facing::Back
    }
}

// ── Linux sysfs backend ──

/// Torch control through the kernel LED class (`/sys/class/leds`).
///
/// Each flash/torch LED is a directory with `brightness` and
/// `max_brightness` attributes; enabling writes `max_brightness`, disabling
/// writes `0`. An alternate root can be supplied for tests.
pub struct SysfsCamera {
    root: PathBuf,
}

const SYSFS_LEDS: &str = "/sys/class/leds";

impl SysfsCamera {
    pub fn new() -> Self {
        Self::with_root(SYSFS_LEDS)
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        SysfsCamera { root: root.into() }
    }

    fn map_io(context: &str, e: std::io::Error) -> CameraError {
        match e.kind() {
            std::io::ErrorKind::PermissionDenied => {
                CameraError::AccessDenied(format!("{context}: {e}"))
            }
            std::io::ErrorKind::NotFound => CameraError::NotAvailable(format!("{context}: {e}")),
            _ => CameraError::Io(format!("{context}: {e}")),
        }
    }

    /// Read `max_brightness` for a LED; sloppy attributes fall back to 1
    /// (still a valid "on" value for the brightness file).
    fn max_brightness(&self, dir: &Path) -> u32 {
        std::fs::read_to_string(dir.join("max_brightness"))
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(1)
    }
}

impl Default for SysfsCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraService for SysfsCamera {
    fn light_sources(&self) -> Result<Vec<LightSource>> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            // No LED class at all: not an error, just no torch hardware.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Self::map_io("read_dir", e)),
        };

        let mut sources = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Self::map_io("read_dir", e))?;
            let label = entry.file_name().to_string_lossy().into_owned();
            if is_torch_label(&label) {
                let facing = facing_from_label(&label);
                sources.push(LightSource { id: label, facing });
            }
        }
        // Directory order is arbitrary; "first rear-facing unit" must be
        // deterministic across runs.
        sources.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(sources)
    }

    fn set_torch_mode(&self, id: &str, enabled: bool) -> Result<()> {
        let dir = self.root.join(id);
        if !dir.is_dir() {
            return Err(CameraError::NotAvailable(format!("no such LED: {id}")));
        }
        let value = if enabled { self.max_brightness(&dir) } else { 0 };
        std::fs::write(dir.join("brightness"), format!("{value}\n"))
            .map_err(|e| Self::map_io("brightness", e))
    }
}

// ── Stub backend for platforms without a LED class ──

/// Placeholder camera that never finds a light source.
/// Enables compilation and `cargo test` on non-Linux hosts.
#[cfg(not(target_os = "linux"))]
pub struct StubCamera;

#[cfg(not(target_os = "linux"))]
impl CameraService for StubCamera {
    fn light_sources(&self) -> Result<Vec<LightSource>> {
        Ok(Vec::new())
    }

    fn set_torch_mode(&self, _id: &str, _enabled: bool) -> Result<()> {
        Err(CameraError::NotAvailable(
            "torch control is not supported on this platform".into(),
        ))
    }
}

/// Concrete camera type for the current platform.
#[cfg(target_os = "linux")]
pub type PlatformCamera = SysfsCamera;
#[cfg(not(target_os = "linux"))]
pub type PlatformCamera = StubCamera;

/// Construct the platform-appropriate camera service.
pub fn platform_camera() -> PlatformCamera {
    #[cfg(target_os = "linux")]
    {
        SysfsCamera::new()
    }
    #[cfg(not(target_os = "linux"))]
    {
        StubCamera
    }
}

// ── Mock camera for testing ──

/// In-memory camera service for unit and integration tests.
///
/// Always compiled (zero runtime cost), hidden from public docs.
#[doc(hidden)]
pub mod mock {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    /// Records every successful set-mode call; failure injection flips the
    /// `fail_*` switches. Thread-safe so blink worker threads can drive it.
    pub struct MockCamera {
        sources: Vec<LightSource>,
        /// Successful set-mode calls in order: (source id, enabled).
        pub calls: Mutex<Vec<(String, bool)>>,
        /// If true, `set_torch_mode` returns `AccessDenied`.
        pub fail_set: AtomicBool,
        /// If true, `light_sources` returns `NotAvailable`.
        pub fail_enumerate: AtomicBool,
    }

    impl Default for MockCamera {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockCamera {
        /// Mock with a single rear-facing source, `"white:flash"`.
        pub fn new() -> Self {
            Self::with_sources(vec![LightSource {
                id: "white:flash".into(),
                facing: Facing::Back,
            }])
        }

        pub fn with_sources(sources: Vec<LightSource>) -> Self {
            MockCamera {
                sources,
                calls: Mutex::new(Vec::new()),
                fail_set: AtomicBool::new(false),
                fail_enumerate: AtomicBool::new(false),
            }
        }

        pub fn set_fail_set(&self, fail: bool) {
            self.fail_set.store(fail, Ordering::SeqCst);
        }

        pub fn set_fail_enumerate(&self, fail: bool) {
            self.fail_enumerate.store(fail, Ordering::SeqCst);
        }

        /// Snapshot of the recorded calls.
        pub fn calls_snapshot(&self) -> Vec<(String, bool)> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().map(|c| c.len()).unwrap_or(0)
        }
    }

    impl CameraService for MockCamera {
        fn light_sources(&self) -> Result<Vec<LightSource>> {
            if self.fail_enumerate.load(Ordering::SeqCst) {
                return Err(CameraError::NotAvailable(
                    "mock: enumeration failure injected".into(),
                ));
            }
            Ok(self.sources.clone())
        }

        fn set_torch_mode(&self, id: &str, enabled: bool) -> Result<()> {
            if self.fail_set.load(Ordering::SeqCst) {
                return Err(CameraError::AccessDenied(
                    "mock: set-mode failure injected".into(),
                ));
            }
            if !self.sources.iter().any(|s| s.id == id) {
                return Err(CameraError::NotAvailable(format!("no such LED: {id}")));
            }
            if let Ok(mut calls) = self.calls.lock() {
                calls.push((id.to_string(), enabled));
            }
            Ok(())
        }
    }
}
