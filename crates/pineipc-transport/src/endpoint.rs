use std::fmt;
use std::path::PathBuf;

/// File name of the emulator's Unix socket, appended to the runtime
/// directory.
pub const SOCKET_FILE_NAME: &str = "pcsx2.sock";

/// Host platform family, as far as endpoint selection cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Loopback TCP on the configured slot.
    Windows,
    /// Unix socket under `$XDG_RUNTIME_DIR`, falling back to `/tmp`.
    Linux,
    /// Unix socket under `$TMPDIR`, falling back to `/tmp`.
    MacOs,
    /// Unix socket under `/tmp`.
    Other,
}

impl Platform {
    /// Platform the binary was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        #[cfg(target_os = "windows")]
        {
            Self::Windows
        }
        #[cfg(target_os = "linux")]
        {
            Self::Linux
        }
        #[cfg(target_os = "macos")]
        {
            Self::MacOs
        }
        #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
        {
            Self::Other
        }
    }

    /// Environment variable naming the socket's runtime directory,
    /// `None` where the platform has no such convention.
    #[must_use]
    const fn runtime_dir_var(self) -> Option<&'static str> {
        match self {
            Self::Linux => Some("XDG_RUNTIME_DIR"),
            Self::MacOs => Some("TMPDIR"),
            Self::Windows | Self::Other => None,
        }
    }
}

/// Where the emulator is listening.
///
/// Resolution is a pure function of platform and slot; the slot only
/// matters for the loopback form. Nothing is opened here — see
/// [`crate::PineStream::connect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// TCP on 127.0.0.1 at the slot number.
    Loopback { port: u32 },
    /// Filesystem-addressed Unix socket.
    Socket { path: PathBuf },
}

impl Endpoint {
    /// Resolve the endpoint for the current platform.
    #[must_use]
    pub fn resolve(slot: u32) -> Self {
        Self::resolve_for(Platform::current(), slot)
    }

    /// Resolve the endpoint for an explicit platform, consulting the
    /// platform's runtime-directory environment variable.
    #[must_use]
    pub fn resolve_for(platform: Platform, slot: u32) -> Self {
        let runtime_dir = platform
            .runtime_dir_var()
            .and_then(|var| std::env::var_os(var))
            .map(PathBuf::from);
        Self::resolve_in(platform, slot, runtime_dir)
    }

    /// Resolution core with the runtime directory passed in, so tests
    /// can inject both platform identity and environment.
    #[must_use]
    pub fn resolve_in(platform: Platform, slot: u32, runtime_dir: Option<PathBuf>) -> Self {
        match platform {
            Platform::Windows => Self::Loopback { port: slot },
            Platform::Linux | Platform::MacOs | Platform::Other => {
                let dir = runtime_dir.unwrap_or_else(|| PathBuf::from("/tmp"));
                Self::Socket {
                    path: dir.join(SOCKET_FILE_NAME),
                }
            }
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loopback { port } => write!(f, "127.0.0.1:{port}"),
            Self::Socket { path } => write!(f, "{}", path.display()),
        }
    }
}
