//! Readiness probing
//!
//! One `poll(2)` call for `POLLIN | POLLOUT` with a bounded timeout. There is
//! no loop and no retry: the probe ends as timed out, ready, or failed.

use crate::error::ProbeError;
use nix::poll::{poll, PollFd, PollFlags};
use std::fmt;
use std::fs::OpenOptions;
use std::os::fd::AsFd;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Upper bound on a single wait, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTimeout(libc::c_int);

impl ProbeTimeout {
    pub fn from_millis(millis: libc::c_int) -> Result<Self, ProbeError> {
        if millis < 0 {
            return Err(ProbeError::InvalidTimeout(millis.to_string()));
        }
        Ok(Self(millis))
    }

    pub fn as_millis(self) -> libc::c_int {
        self.0
    }
}

impl FromStr for ProbeTimeout {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let millis = s
            .trim()
            .parse::<libc::c_int>()
            .map_err(|_| ProbeError::InvalidTimeout(s.to_string()))?;
        Self::from_millis(millis)
    }
}

impl fmt::Display for ProbeTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Event classes reported by a wait. More than one may be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Events {
    pub readable: bool,
    pub writable: bool,
    /// Anything outside POLLIN/POLLOUT (POLLERR, POLLHUP, POLLNVAL, ...)
    pub other: bool,
}

impl Events {
    pub fn from_flags(revents: PollFlags) -> Self {
        let known = PollFlags::POLLIN | PollFlags::POLLOUT;
        Self {
            readable: revents.contains(PollFlags::POLLIN),
            writable: revents.contains(PollFlags::POLLOUT),
            other: !revents.difference(known).is_empty(),
        }
    }
}

/// Outcome of one probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    TimedOut,
    Ready(Events),
}

/// Wait once for read or write readiness on `fd`.
pub fn probe<Fd: AsFd>(fd: &Fd, timeout: ProbeTimeout) -> Result<Readiness, ProbeError> {
    let mut fds = [PollFd::new(fd, PollFlags::POLLIN | PollFlags::POLLOUT)];

    debug!("Waiting up to {} for readiness", timeout);
    let result = poll(&mut fds, timeout.as_millis());
    readiness_of(result, fds[0].revents())
}

/// Map the result of one `poll(2)` call onto a probe outcome.
fn readiness_of(
    result: nix::Result<libc::c_int>,
    revents: Option<PollFlags>,
) -> Result<Readiness, ProbeError> {
    let ready = result.map_err(|errno| ProbeError::WaitFailed(errno.into()))?;
    if ready == 0 {
        debug!("No readiness before the timeout");
        return Ok(Readiness::TimedOut);
    }

    let revents = revents.unwrap_or_else(PollFlags::empty);
    debug!("poll returned {:?}", revents);
    Ok(Readiness::Ready(Events::from_flags(revents)))
}

/// Open the device read/write and probe it once.
pub fn probe_device(path: impl AsRef<Path>, timeout: ProbeTimeout) -> Result<Readiness, ProbeError> {
    let path = path.as_ref();
    let device = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|source| ProbeError::DeviceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

    probe(&device, timeout)
}
