//! ioctl transport
//!
//! [`DeviceControl`] is the boundary between a session and the kernel. The
//! real device goes through `ioctl(2)` on an open [`File`].

use nix::errno::Errno;
use std::fs::File;
use std::io;
use std::os::fd::AsRawFd;
use streamf_shared::{RawFilter, RequestCode};

/// Something that can carry one filter-stack request to the driver
pub trait DeviceControl {
    /// Issue `code` with a pointer to `descriptor`. The driver may write
    /// into the descriptor (pop).
    fn control(&mut self, code: RequestCode, descriptor: &mut RawFilter) -> io::Result<()>;
}

impl DeviceControl for File {
    fn control(&mut self, code: RequestCode, descriptor: &mut RawFilter) -> io::Result<()> {
        // SAFETY: the fd is open for the lifetime of `self`, and the pointer
        // refers to a live `#[repr(C)]` descriptor of the size the driver
        // copies in or out.
        let ret = unsafe {
            libc::ioctl(
                self.as_raw_fd(),
                code.raw(),
                descriptor as *mut RawFilter,
            )
        };
        Errno::result(ret).map(drop).map_err(io::Error::from)
    }
}

impl<D: DeviceControl + ?Sized> DeviceControl for &mut D {
    fn control(&mut self, code: RequestCode, descriptor: &mut RawFilter) -> io::Result<()> {
        (**self).control(code, descriptor)
    }
}
