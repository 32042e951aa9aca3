//! TTY handling for reading events when stdin is piped
//!
//! When the document arrives on stdin (`curl ... | headnav`), keyboard
//! events have to come from /dev/tty instead.

use crossterm::event::{Event, poll, read};
use std::io;
use std::time::Duration;

#[cfg(unix)]
use std::fs::File;
#[cfg(unix)]
use std::mem::MaybeUninit;
#[cfg(unix)]
use std::os::unix::io::{AsRawFd, IntoRawFd};

#[cfg(unix)]
fn stdin_is_tty() -> bool {
    let stdin_fd = io::stdin().as_raw_fd();
    // SAFETY: isatty is safe to call with any fd
    unsafe { libc::isatty(stdin_fd) == 1 }
}

#[cfg(unix)]
fn open_tty() -> io::Result<File> {
    File::options()
        .read(true)
        .write(true)
        .open("/dev/tty")
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!(
                    "Cannot open /dev/tty: {}. Interactive mode requires a terminal.",
                    e
                ),
            )
        })
}

/// Run `f` with stdin temporarily pointed at /dev/tty.
///
/// Crossterm reads events from fd 0, so the piped stdin is swapped out for
/// the duration of the call and always restored afterwards.
#[cfg(unix)]
fn with_tty_stdin<T>(f: impl FnOnce() -> io::Result<T>) -> io::Result<T> {
    if stdin_is_tty() {
        return f();
    }

    // SAFETY: every fd opened here is closed on all paths, and fd 0 is
    // restored from the saved copy before returning
    unsafe {
        let saved_stdin = libc::dup(0);
        if saved_stdin < 0 {
            return Err(io::Error::last_os_error());
        }

        let tty_fd = match open_tty() {
            Ok(tty) => tty.into_raw_fd(),
            Err(e) => {
                libc::close(saved_stdin);
                return Err(e);
            }
        };

        if libc::dup2(tty_fd, 0) < 0 {
            let err = io::Error::last_os_error();
            libc::close(tty_fd);
            libc::close(saved_stdin);
            return Err(err);
        }
        libc::close(tty_fd);

        let result = f();

        libc::dup2(saved_stdin, 0);
        libc::close(saved_stdin);

        result
    }
}

#[cfg(not(unix))]
fn with_tty_stdin<T>(f: impl FnOnce() -> io::Result<T>) -> io::Result<T> {
    f()
}

/// Enable raw mode on the terminal, using /dev/tty if stdin is piped
#[cfg(unix)]
pub fn enable_raw_mode() -> io::Result<()> {
    if stdin_is_tty() {
        return crossterm::terminal::enable_raw_mode();
    }

    let tty = open_tty()?;
    let tty_fd = tty.as_raw_fd();
    let mut termios = MaybeUninit::<libc::termios>::uninit();

    // SAFETY: tcgetattr initializes termios before it is read
    unsafe {
        if libc::tcgetattr(tty_fd, termios.as_mut_ptr()) != 0 {
            return Err(io::Error::last_os_error());
        }
        let mut termios = termios.assume_init();
        libc::cfmakeraw(&mut termios);
        if libc::tcsetattr(tty_fd, libc::TCSANOW, &termios) != 0 {
            return Err(io::Error::last_os_error());
        }
    }

    // Raw mode outlives the file handle
    Ok(())
}

#[cfg(not(unix))]
pub fn enable_raw_mode() -> io::Result<()> {
    crossterm::terminal::enable_raw_mode()
}

/// Restore cooked mode on the terminal
#[cfg(unix)]
pub fn disable_raw_mode() -> io::Result<()> {
    if stdin_is_tty() {
        return crossterm::terminal::disable_raw_mode();
    }

    // Best effort on the way out
    let Ok(tty) = open_tty() else {
        return Ok(());
    };
    let tty_fd = tty.as_raw_fd();
    let mut termios = MaybeUninit::<libc::termios>::uninit();

    // SAFETY: termios is only read after tcgetattr succeeded
    unsafe {
        if libc::tcgetattr(tty_fd, termios.as_mut_ptr()) == 0 {
            let mut termios = termios.assume_init();
            termios.c_lflag |= libc::ICANON | libc::ECHO | libc::ISIG;
            termios.c_oflag |= libc::OPOST;
            libc::tcsetattr(tty_fd, libc::TCSANOW, &termios);
        }
    }
    Ok(())
}

#[cfg(not(unix))]
pub fn disable_raw_mode() -> io::Result<()> {
    crossterm::terminal::disable_raw_mode()
}

/// Read an event from the terminal, handling piped stdin
pub fn read_event() -> io::Result<Event> {
    with_tty_stdin(read)
}

/// Poll for an event with timeout, handling piped stdin
///
/// Returns true if an event is available, false if timeout occurred.
pub fn poll_event(timeout: Duration) -> io::Result<bool> {
    with_tty_stdin(|| poll(timeout))
}
