//! Scoped redirection of the process stdout and stderr into a pipe.
//!
//! Commands that style their own terminal output write straight to the
//! process streams. While a [`StreamRedirect`] is alive both descriptors point
//! at a pipe drained by a reader thread; restoring them closes the last write
//! end, which ends the reader.

pub(super) use imp::StreamRedirect;

#[cfg(unix)]
mod imp {
    use anyhow::{anyhow, Context, Result};
    use std::fs::File;
    use std::io::{self, Read, Write};
    use std::os::fd::{AsRawFd, FromRawFd, OwnedFd, RawFd};
    use std::sync::{Mutex, MutexGuard};
    use std::thread::{self, JoinHandle};

    /// The standard streams are process-wide; one redirection at a time.
    static REDIRECT_LOCK: Mutex<()> = Mutex::new(());

    const TARGETS: [RawFd; 2] = [libc::STDOUT_FILENO, libc::STDERR_FILENO];

    pub(in crate::interactive) struct StreamRedirect {
        saved: [OwnedFd; 2],
        reader: Option<JoinHandle<io::Result<Vec<u8>>>>,
        active: bool,
        _lock: MutexGuard<'static, ()>,
    }

    impl StreamRedirect {
        pub(in crate::interactive) fn acquire() -> Result<Self> {
            let lock = REDIRECT_LOCK
                .lock()
                .map_err(|_| anyhow!("stream redirect lock poisoned"))?;
            flush_std();

            let (read_end, write_end) = pipe()?;
            let saved = [dup(TARGETS[0])?, dup(TARGETS[1])?];
            let mut redirect = Self {
                saved,
                reader: None,
                active: true,
                _lock: lock,
            };
            for target in TARGETS {
                // Both descriptors are open for the lifetime of this call.
                let res = unsafe { libc::dup2(write_end.as_raw_fd(), target) };
                check(res).with_context(|| format!("redirect fd {target} into pipe"))?;
            }
            drop(write_end);

            redirect.reader = Some(thread::spawn(move || {
                let mut file = File::from(read_end);
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes)?;
                Ok(bytes)
            }));
            Ok(redirect)
        }

        /// Restore both descriptors and return everything written meanwhile.
        pub(in crate::interactive) fn finish(mut self) -> Result<Vec<u8>> {
            flush_std();
            self.restore()?;
            let reader = self
                .reader
                .take()
                .ok_or_else(|| anyhow!("preview reader missing"))?;
            reader
                .join()
                .map_err(|_| anyhow!("preview reader panicked"))?
                .context("read preview pipe")
        }

        fn restore(&mut self) -> Result<()> {
            if !self.active {
                return Ok(());
            }
            self.active = false;
            for (saved, target) in self.saved.iter().zip(TARGETS) {
                let res = unsafe { libc::dup2(saved.as_raw_fd(), target) };
                check(res).with_context(|| format!("restore fd {target}"))?;
            }
            Ok(())
        }
    }

    impl Drop for StreamRedirect {
        fn drop(&mut self) {
            flush_std();
            let _ = self.restore();
        }
    }

    fn flush_std() {
        io::stdout().flush().ok();
        io::stderr().flush().ok();
    }

    fn pipe() -> Result<(OwnedFd, OwnedFd)> {
        let mut fds: [RawFd; 2] = [-1; 2];
        check(unsafe { libc::pipe(fds.as_mut_ptr()) }).context("create preview pipe")?;
        // pipe(2) succeeded, so both descriptors are open and owned by us.
        let ends = unsafe { (OwnedFd::from_raw_fd(fds[0]), OwnedFd::from_raw_fd(fds[1])) };
        Ok(ends)
    }

    fn dup(fd: RawFd) -> Result<OwnedFd> {
        let copy = check(unsafe { libc::dup(fd) }).with_context(|| format!("duplicate fd {fd}"))?;
        Ok(unsafe { OwnedFd::from_raw_fd(copy) })
    }

    fn check(res: libc::c_int) -> io::Result<libc::c_int> {
        if res < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(res)
        }
    }
}

#[cfg(not(unix))]
mod imp {
    use anyhow::{anyhow, Result};

    pub(in crate::interactive) struct StreamRedirect;

    impl StreamRedirect {
        pub(in crate::interactive) fn acquire() -> Result<Self> {
            Err(anyhow!("terminal output capture needs a unix platform"))
        }

        pub(in crate::interactive) fn finish(self) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }
    }
}
