//! File metadata structures the shim surface fills in
//!
//! The target has no file system, so these exist only to keep a hosted
//! C library's buffered I/O happy. Layouts match the minimal porting
//! contract that library was built against.

use bitflags::bitflags;

bitflags! {
    /// File type bits for `FileStat::st_mode`.
    #[repr(transparent)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FileMode: u32 {
        const FIFO = 0o010000;
        const CHAR_DEVICE = 0o020000;
        const DIRECTORY = 0o040000;
        const BLOCK_DEVICE = 0o060000;
        const REGULAR = 0o100000;
    }
}

/// Placeholder mode reported for open descriptors. Deliberately not a
/// meaningful `FileMode` combination; the descriptor does not exist.
pub const FSTAT_PLACEHOLDER_MODE: u32 = 1;

/// Result structure for the stat family of shim calls.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStat {
    pub st_dev: u64,
    pub st_ino: u64,
    pub st_mode: u32,
    pub st_nlink: u32,
    pub st_uid: u32,
    pub st_gid: u32,
    pub st_rdev: u64,
    pub st_size: i64,
    pub st_atime: i64,
    pub st_mtime: i64,
    pub st_ctime: i64,
}

/// Result structure for the process-times shim call. Never populated;
/// the target keeps no per-process accounting.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessTimes {
    pub utime: i64,
    pub stime: i64,
    pub cutime: i64,
    pub cstime: i64,
}
