//! OS version reporting. Diagnostic only.

/// Human-readable platform description, e.g. "Linux 6.1.0".
pub fn platform_version_string() -> String {
    let name = sysinfo::System::name().unwrap_or_else(|| std::env::consts::OS.to_string());
    match sysinfo::System::os_version() {
        Some(version) => format!("{} {}", name, version),
        None => name,
    }
}
