//! Memory headroom probes gating screenshot capture.

use std::sync::{Mutex, PoisonError};

use sysinfo::System;

/// Memory in bytes: the ceiling and how much of it is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryUsage {
    pub max: u64,
    pub used: u64,
}

impl MemoryUsage {
    /// Fraction of `max` still free, in `0.0..=1.0`.
    pub fn headroom(&self) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        self.max.saturating_sub(self.used) as f64 / self.max as f64
    }
}

/// Reports current memory usage, or `None` when it cannot be measured.
pub trait MemoryProbe: Send + Sync {
    fn usage(&self) -> Option<MemoryUsage>;
}

/// Reads system memory through `sysinfo`.
pub struct SystemMemory {
    system: Mutex<System>,
}

impl SystemMemory {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }
}

impl Default for SystemMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProbe for SystemMemory {
    fn usage(&self) -> Option<MemoryUsage> {
        let mut system = self.system.lock().unwrap_or_else(PoisonError::into_inner);
        system.refresh_memory();
        let max = system.total_memory();
        if max == 0 {
            return None;
        }
        let used = max.saturating_sub(system.available_memory());
        Some(MemoryUsage { max, used })
    }
}

/// A probe with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedMemory(Option<MemoryUsage>);

impl FixedMemory {
    pub fn new(max: u64, used: u64) -> Self {
        Self(Some(MemoryUsage { max, used }))
    }

    /// A probe whose `headroom` is `fraction` of a 1 GiB ceiling.
    pub fn with_headroom(fraction: f64) -> Self {
        const MAX: u64 = 1 << 30;
        let free = (MAX as f64 * fraction.clamp(0.0, 1.0)) as u64;
        Self::new(MAX, MAX - free)
    }

    pub fn unavailable() -> Self {
        Self(None)
    }
}

impl MemoryProbe for FixedMemory {
    fn usage(&self) -> Option<MemoryUsage> {
        self.0
    }
}
