//! Synchronous host I/O bindings exposed to scripts.
//!
//! Ordinary wrappers over the host filesystem with no protocol state; the
//! debug bridge does not depend on them for its own correctness.

use std::collections::HashMap;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Engine-visible numeric file descriptor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Fd(u32);

impl fmt::Display for Fd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum FsError {
    #[error("open failed on file '{}': {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("fstat failed on fd {fd}: {source}")]
    Stat { fd: Fd, source: io::Error },
    #[error("unknown file descriptor {0}")]
    UnknownFd(Fd),
}

/// Numeric stat fields surfaced to scripts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub dev: u64,
    pub mode: u64,
    pub nlink: u64,
    pub uid: u64,
    pub gid: u64,
    pub rdev: u64,
    pub blksize: u64,
    pub ino: u64,
    pub size: u64,
    pub blocks: u64,
}

impl FileStat {
    #[cfg(unix)]
    fn from_metadata(meta: &std::fs::Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;
        Self {
            dev: meta.dev(),
            mode: meta.mode() as u64,
            nlink: meta.nlink(),
            uid: meta.uid() as u64,
            gid: meta.gid() as u64,
            rdev: meta.rdev(),
            blksize: meta.blksize(),
            ino: meta.ino(),
            size: meta.len(),
            blocks: meta.blocks(),
        }
    }

    #[cfg(not(unix))]
    fn from_metadata(meta: &std::fs::Metadata) -> Self {
        Self {
            size: meta.len(),
            ..Default::default()
        }
    }
}

/// Capability interface over the file-descriptor operations exposed to
/// scripts.
pub trait FsBinding: Send {
    /// Open `target` resolved against the requesting script's directory and
    /// return a descriptor for it.
    fn open(&mut self, dirname: &Path, target: &str, opts: &OpenOptions) -> Result<Fd, FsError>;

    /// Close a descriptor previously returned by [`open`](FsBinding::open).
    fn close(&mut self, fd: Fd) -> Result<(), FsError>;

    /// Information about an open descriptor.
    fn fstat(&self, fd: Fd) -> Result<FileStat, FsError>;
}

/// Adapter over the host filesystem backing the `fs` binding.
#[derive(Debug, Default)]
pub struct HostFs {
    open_files: HashMap<Fd, File>,
    next_fd: u32,
}

impl HostFs {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_fd(&mut self) -> Fd {
        let fd = Fd(self.next_fd);
        self.next_fd += 1;
        fd
    }
}

impl FsBinding for HostFs {
    fn open(&mut self, dirname: &Path, target: &str, opts: &OpenOptions) -> Result<Fd, FsError> {
        let path = resolve_target(dirname, target);
        let file = opts.open(&path).map_err(|source| FsError::Open {
            path: path.clone(),
            source,
        })?;
        let fd = self.alloc_fd();
        self.open_files.insert(fd, file);
        Ok(fd)
    }

    fn close(&mut self, fd: Fd) -> Result<(), FsError> {
        self.open_files
            .remove(&fd)
            .map(drop)
            .ok_or(FsError::UnknownFd(fd))
    }

    fn fstat(&self, fd: Fd) -> Result<FileStat, FsError> {
        let file = self.open_files.get(&fd).ok_or(FsError::UnknownFd(fd))?;
        let meta = file
            .metadata()
            .map_err(|source| FsError::Stat { fd, source })?;
        Ok(FileStat::from_metadata(&meta))
    }
}

/// Resolve `target` against the directory of the requesting script.
///
/// Absolute targets replace the base entirely. `.` and `..` segments are
/// removed lexically, without consulting the filesystem.
pub fn resolve_target(dirname: &Path, target: &str) -> PathBuf {
    let target = Path::new(target);
    let joined = if target.is_absolute() {
        target.to_path_buf()
    } else {
        dirname.join(target)
    };

    let mut out = PathBuf::new();
    for comp in joined.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            comp => out.push(comp.as_os_str()),
        }
    }
    out
}
