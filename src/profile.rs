//! Capture and estimator presets picked from the host's capabilities.

use std::{num::NonZeroUsize, thread};
use tracing::info;

/// Core count assumed when the platform cannot report one.
const FALLBACK_CPU_CORES: usize = 4;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Hardware {
    /// Free VRAM of a dedicated GPU, if there is one.
    pub gpu_vram_mb: Option<u32>,
    pub cpu_cores: usize,
}

impl Hardware {
    /// Probe the CPU; GPU memory is not probed and must come from the caller.
    pub fn detect(gpu_vram_mb: Option<u32>) -> Self {
        let cpu_cores = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(FALLBACK_CPU_CORES);
        let hardware = Self {
            gpu_vram_mb,
            cpu_cores,
        };
        info!(message = "detected hardware", cpu_cores, gpu_vram_mb = ?gpu_vram_mb);
        hardware
    }

    fn has_gpu_with(&self, vram_mb: u32) -> bool {
        self.gpu_vram_mb.map_or(false, |available| available >= vram_mb)
    }
}

/// Settings handed to the camera and the pose estimator.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CaptureProfile {
    /// Estimator model size: 0 is fastest, 2 most accurate.
    pub model_complexity: u8,
    pub smooth_landmarks: bool,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
    pub width: u16,
    pub height: u16,
    pub fps: u8,
    /// Only every n-th captured frame reaches the detectors.
    pub process_every_n_frames: usize,
    pub description: &'static str,
}

impl CaptureProfile {
    pub fn for_hardware(hardware: &Hardware) -> Self {
        let profile = if hardware.has_gpu_with(2048) {
            Self {
                model_complexity: 2,
                smooth_landmarks: true,
                min_detection_confidence: 0.5,
                min_tracking_confidence: 0.5,
                width: 640,
                height: 480,
                fps: 30,
                process_every_n_frames: 1,
                description: "GPU accelerated (high quality)",
            }
        } else if hardware.has_gpu_with(1024) {
            Self {
                model_complexity: 1,
                smooth_landmarks: true,
                min_detection_confidence: 0.5,
                min_tracking_confidence: 0.5,
                width: 640,
                height: 480,
                fps: 30,
                process_every_n_frames: 2,
                description: "GPU accelerated (balanced)",
            }
        } else if hardware.cpu_cores >= 8 {
            Self {
                model_complexity: 1,
                smooth_landmarks: true,
                min_detection_confidence: 0.5,
                min_tracking_confidence: 0.5,
                width: 640,
                height: 480,
                fps: 30,
                process_every_n_frames: 2,
                description: "CPU optimized (multi-core)",
            }
        } else if hardware.cpu_cores >= 4 {
            Self {
                model_complexity: 1,
                smooth_landmarks: false,
                min_detection_confidence: 0.4,
                min_tracking_confidence: 0.4,
                width: 480,
                height: 360,
                fps: 25,
                process_every_n_frames: 3,
                description: "CPU optimized (balanced)",
            }
        } else {
            Self {
                model_complexity: 0,
                smooth_landmarks: false,
                min_detection_confidence: 0.3,
                min_tracking_confidence: 0.3,
                width: 320,
                height: 240,
                fps: 20,
                process_every_n_frames: 4,
                description: "CPU optimized (low-end)",
            }
        };
        info!(message = "selected capture profile", profile = profile.description);
        profile
    }
}
