//! Thread pinning for stable timings.
//!
//! On Linux the current thread is pinned with `sched_setaffinity` and the
//! previous mask is restored on drop. Elsewhere pinning is a no-op and the
//! guard simply reports that it is not pinned.

#[cfg(target_os = "linux")]
mod platform {
    /// Affinity mask saved before pinning.
    pub struct Saved(libc::cpu_set_t);

    pub fn current_cpu() -> Option<usize> {
        // SAFETY: no arguments, returns -1 on failure.
        let cpu = unsafe { libc::sched_getcpu() };
        usize::try_from(cpu).ok()
    }

    pub fn first_cpu() -> Option<usize> {
        // SAFETY: sysconf has no memory-safety preconditions.
        let online = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
        (online > 0).then_some(0)
    }

    pub fn pin(core_id: usize) -> Option<Saved> {
        // SAFETY: cpu_set_t is plain data; the size passed matches the struct.
        unsafe {
            let mut saved: libc::cpu_set_t = std::mem::zeroed();
            if libc::sched_getaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &mut saved) != 0 {
                return None;
            }

            let mut set: libc::cpu_set_t = std::mem::zeroed();
            libc::CPU_ZERO(&mut set);
            libc::CPU_SET(core_id, &mut set);
            if libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) != 0 {
                return None;
            }
            Some(Saved(saved))
        }
    }

    pub fn restore(saved: &Saved) -> bool {
        // SAFETY: `saved` was filled by sched_getaffinity.
        unsafe {
            libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &saved.0) == 0
        }
    }
}

#[cfg(not(target_os = "linux"))]
mod platform {
    pub struct Saved;

    pub fn current_cpu() -> Option<usize> {
        None
    }

    pub fn first_cpu() -> Option<usize> {
        None
    }

    pub fn pin(_core_id: usize) -> Option<Saved> {
        None
    }

    pub fn restore(_saved: &Saved) -> bool {
        true
    }
}

/// RAII guard for CPU pinning - pins on creation, unpins on drop.
///
/// # Example
/// ```ignore
/// {
///     let _pin = CpuPinGuard::new(); // Thread pinned
///     // ... timed run ...
/// } // Thread automatically unpinned here
/// ```
pub struct CpuPinGuard {
    pinned: Option<(usize, platform::Saved)>,
}

impl CpuPinGuard {
    /// Pin to the core the thread is currently running on, falling back to
    /// the first online core.
    pub fn new() -> Self {
        let pinned = platform::current_cpu()
            .or_else(platform::first_cpu)
            .and_then(|core| platform::pin(core).map(|saved| (core, saved)));
        Self { pinned }
    }

    /// Get the core ID this thread is pinned to, if any.
    pub fn core_id(&self) -> Option<usize> {
        self.pinned.as_ref().map(|(core, _)| *core)
    }

    /// Check if the thread was successfully pinned.
    pub fn is_pinned(&self) -> bool {
        self.pinned.is_some()
    }
}

impl Drop for CpuPinGuard {
    fn drop(&mut self) {
        if let Some((_, saved)) = &self.pinned {
            platform::restore(saved);
        }
    }
}

impl Default for CpuPinGuard {
    fn default() -> Self {
        Self::new()
    }
}
