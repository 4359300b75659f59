use std::time::Duration;

use parking_lot::Mutex;
use sysinfo::{Components, Networks, System};

use crate::error::{MonitorError, Result};

/// Source of raw metric readings.
///
/// Every read is independent: an implementation must not let one metric's
/// failure leak into another, and reads may run concurrently.
pub trait MetricReader: Send + Sync {
    /// Global CPU load in percent, observed over a short sampling window
    fn read_cpu_percent(&self) -> Result<f64>;

    fn read_memory_percent(&self) -> Result<f64>;

    /// Usage in percent of the filesystem holding `path`, as seen by an unprivileged user
    fn read_disk_percent(&self, path: &str) -> Result<f64>;

    /// Cumulative `(bytes_received, bytes_sent)` across all interfaces
    fn read_network_io_counters(&self) -> Result<(u64, u64)>;

    /// Current reading of the first sensor that reports one, in °C
    fn read_temperature(&self) -> Result<f64>;
}

/// Collects system metrics through `sysinfo`.
///
/// Each sysinfo-backed metric owns its own handle so concurrent reads never
/// contend. Disk usage is queried from the filesystem holding the path itself.
pub struct SysinfoReader {
    cpu: Mutex<System>,
    memory: Mutex<System>,
    networks: Mutex<Networks>,
    components: Mutex<Components>,
    cpu_window: Duration,
}

impl SysinfoReader {
    pub fn new() -> Self {
        Self::with_cpu_window(Duration::from_secs(1))
    }

    /// Create a reader that observes CPU load over `cpu_window`
    pub fn with_cpu_window(cpu_window: Duration) -> Self {
        Self {
            cpu: Mutex::new(System::new()),
            memory: Mutex::new(System::new()),
            networks: Mutex::new(Networks::new_with_refreshed_list()),
            components: Mutex::new(Components::new_with_refreshed_list()),
            // sysinfo needs at least this long between refreshes to compute usage
            cpu_window: cpu_window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }
}

impl Default for SysinfoReader {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricReader for SysinfoReader {
    fn read_cpu_percent(&self) -> Result<f64> {
        let mut system = self.cpu.lock();
        system.refresh_cpu_usage();
        std::thread::sleep(self.cpu_window);
        system.refresh_cpu_usage();

        if system.cpus().is_empty() {
            return Err(MonitorError::unavailable("no CPUs reported"));
        }
        Ok(f64::from(system.global_cpu_usage()))
    }

    fn read_memory_percent(&self) -> Result<f64> {
        let mut system = self.memory.lock();
        system.refresh_memory();

        let total = system.total_memory();
        if total == 0 {
            return Err(MonitorError::metric_read("total memory reported as zero"));
        }
        Ok(system.used_memory() as f64 / total as f64 * 100.0)
    }

    fn read_disk_percent(&self, path: &str) -> Result<f64> {
        filesystem_usage_percent(path)
    }

    fn read_network_io_counters(&self) -> Result<(u64, u64)> {
        let mut networks = self.networks.lock();
        networks.refresh(true);

        if networks.is_empty() {
            return Err(MonitorError::unavailable("no network interfaces"));
        }

        Ok(networks.values().fold((0u64, 0u64), |(rx, tx), data| {
            (
                rx.saturating_add(data.total_received()),
                tx.saturating_add(data.total_transmitted()),
            )
        }))
    }

    fn read_temperature(&self) -> Result<f64> {
        let mut components = self.components.lock();
        components.refresh(true);

        components
            .iter()
            .filter_map(|comp| comp.temperature())
            .find(|t| t.is_finite())
            .map(f64::from)
            .ok_or_else(|| MonitorError::unavailable("no temperature sensor reports a reading"))
    }
}

/// `used / (used + available)`, rounded to one decimal.
///
/// `available` excludes blocks reserved for root, so a full disk reads 100%
/// even while root can still write to it.
fn usage_percent(used: u64, available: u64) -> f64 {
    let total = used.saturating_add(available);
    if total == 0 {
        return 0.0;
    }
    (used as f64 / total as f64 * 1000.0).round() / 10.0
}

#[cfg(unix)]
fn filesystem_usage_percent(path: &str) -> Result<f64> {
    use std::ffi::CString;

    let c_path = CString::new(path)
        .map_err(|_| MonitorError::metric_read(format!("Disk path '{}' is not valid", path)))?;

    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let ret = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if ret != 0 {
        return Err(MonitorError::metric_read(format!(
            "Disk path '{}' not readable: {}",
            path,
            std::io::Error::last_os_error()
        )));
    }

    let block_size = stat.f_frsize as u64;
    let used = (stat.f_blocks as u64).saturating_sub(stat.f_bfree as u64) * block_size;
    let available = stat.f_bavail as u64 * block_size;
    Ok(usage_percent(used, available))
}

#[cfg(windows)]
fn filesystem_usage_percent(path: &str) -> Result<f64> {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Storage::FileSystem::GetDiskFreeSpaceExW;

    let wide: Vec<u16> = OsStr::new(path)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    let mut total: u64 = 0;
    let mut total_free: u64 = 0;
    let ok = unsafe {
        GetDiskFreeSpaceExW(
            wide.as_ptr(),
            std::ptr::null_mut(),
            &mut total,
            &mut total_free,
        )
    };
    if ok == 0 {
        return Err(MonitorError::metric_read(format!(
            "Disk path '{}' not readable: {}",
            path,
            std::io::Error::last_os_error()
        )));
    }

    let used = total.saturating_sub(total_free);
    Ok(usage_percent(used, total_free))
}

#[cfg(not(any(unix, windows)))]
fn filesystem_usage_percent(_path: &str) -> Result<f64> {
    Err(MonitorError::unavailable("disk usage not supported on this platform"))
}
