#[cfg(target_os = "linux")]
pub mod linux;
#[cfg(target_os = "macos")]
pub mod macos;
#[cfg(target_os = "windows")]
pub mod windows;

// macOS exports
#[cfg(target_os = "macos")]
pub use macos::MacOSClipboardReader as SystemClipboardReader;

// Windows exports
#[cfg(target_os = "windows")]
pub use windows::WindowsClipboardReader as SystemClipboardReader;

// Unix exports
#[cfg(target_os = "linux")]
pub use linux::LinuxClipboardReader as SystemClipboardReader;
