//! Sensor liveness monitoring
//!
//! A liveness check, not a parser check: it only looks at how many bytes
//! the decoder has seen and when. The status is recomputed on every call,
//! so a fault clears by itself once bytes arrive.

use crate::config::LivenessConfig;

/// Why the feed is considered dead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    /// Grace period over and the sensor has barely said anything
    NoSensorData,
    /// Bytes used to flow but have stopped
    SensorSilent,
}

/// Liveness check result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LivenessStatus {
    /// Feed healthy, or still inside the startup grace period
    Ok,
    /// Feed fault, show the error view
    Fault(FaultKind),
}

impl LivenessStatus {
    pub fn fault(self) -> Option<FaultKind> {
        match self {
            LivenessStatus::Ok => None,
            LivenessStatus::Fault(kind) => Some(kind),
        }
    }
}

/// Sensor feed liveness monitor
#[derive(Debug, Clone)]
pub struct LivenessMonitor {
    config: LivenessConfig,
    /// Timestamp the monitor was created (ms)
    started_ms: u32,
    /// Byte count at the last check
    last_bytes: u32,
    /// Timestamp the byte count last moved (ms)
    last_progress_ms: u32,
    /// Grace period has ended; stays set across clock wraparound
    grace_over: bool,
    /// Result of the last check, for edge logging
    last_status: LivenessStatus,
}

impl LivenessMonitor {
    /// Create a monitor; `now_ms` marks the start of the grace period
    pub fn new(config: LivenessConfig, now_ms: u32) -> Self {
        Self {
            config,
            started_ms: now_ms,
            last_bytes: 0,
            last_progress_ms: now_ms,
            grace_over: false,
            last_status: LivenessStatus::Ok,
        }
    }

    /// Re-evaluate liveness against the decoder's running byte count
    pub fn check(&mut self, now_ms: u32, bytes_processed: u32) -> LivenessStatus {
        if bytes_processed != self.last_bytes {
            self.last_bytes = bytes_processed;
            self.last_progress_ms = now_ms;
        }

        if !self.grace_over && now_ms.wrapping_sub(self.started_ms) > self.config.grace_ms {
            self.grace_over = true;
        }

        let status = self.evaluate(now_ms, bytes_processed);

        if status != self.last_status {
            match status {
                LivenessStatus::Fault(kind) => {
                    warn!("sensor feed fault: {} ({} bytes)", kind, bytes_processed)
                }
                LivenessStatus::Ok => info!("sensor feed recovered"),
            }
            self.last_status = status;
        }

        status
    }

    fn evaluate(&self, now_ms: u32, bytes_processed: u32) -> LivenessStatus {
        if !self.grace_over {
            return LivenessStatus::Ok;
        }

        if bytes_processed < self.config.min_bytes {
            return LivenessStatus::Fault(FaultKind::NoSensorData);
        }

        if let Some(timeout) = self.config.silence_timeout_ms {
            if now_ms.wrapping_sub(self.last_progress_ms) >= timeout {
                return LivenessStatus::Fault(FaultKind::SensorSilent);
            }
        }

        LivenessStatus::Ok
    }

    /// Result of the most recent check
    pub fn status(&self) -> LivenessStatus {
        self.last_status
    }
}
