//! Errno classes and the errno registry
//!
//! Every errno name known to the runtime is a subclass of `SystemCallError`
//! (`Errno::ENOENT`, ...). The registry maps the platform's numeric codes back
//! to those classes. It is built once on first use and only read afterwards,
//! so it is shared between threads without locking.

use crate::exception::Exception;
use crate::taxonomy::Kind;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

macro_rules! errno_classes {
    ($($name:ident),+ $(,)?) => {
        /// An errno class, named after its C constant
        #[allow(non_camel_case_types, clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum Errno {
            $($name),+
        }

        impl Errno {
            /// All errno classes, in registry priority order
            pub const ALL: &'static [Errno] = &[$(Errno::$name),+];

            /// Numeric code on the current platform
            pub fn code(self) -> i32 {
                match self {
                    $(Errno::$name => libc::$name),+
                }
            }

            /// C constant name, e.g. `ENOENT`
            pub fn name(self) -> &'static str {
                match self {
                    $(Errno::$name => stringify!($name)),+
                }
            }

            /// Class name, e.g. `Errno::ENOENT`
            pub fn class_name(self) -> &'static str {
                match self {
                    $(Errno::$name => concat!("Errno::", stringify!($name))),+
                }
            }
        }
    };
}

// Aliases sharing a code with an earlier entry (EWOULDBLOCK/EAGAIN) come last
// so the canonical name owns the code.
errno_classes! {
    EPERM, ENOENT, ESRCH, EINTR, EIO, ENXIO, E2BIG, ENOEXEC, EBADF, ECHILD,
    EAGAIN, ENOMEM, EACCES, EFAULT, EBUSY, EEXIST, EXDEV, ENODEV, ENOTDIR,
    EISDIR, EINVAL, ENFILE, EMFILE, ENOTTY, ETXTBSY, EFBIG, ENOSPC, ESPIPE,
    EROFS, EMLINK, EPIPE, EDOM, ERANGE, EDEADLK, ENAMETOOLONG, ENOSYS,
    ENOTEMPTY, ELOOP, ENOTSOCK, EADDRINUSE, EADDRNOTAVAIL, ENETUNREACH,
    ECONNABORTED, ECONNRESET, ENOTCONN, ETIMEDOUT, ECONNREFUSED, EHOSTUNREACH,
    EALREADY, EINPROGRESS,
    EWOULDBLOCK,
}

/// Base text of every system call error message
const UNKNOWN_ERROR: &str = "unknown error";

/// `"unknown error"`, then `" @ <location>"` and `" - <message>"` when given
pub fn compose_message(message: Option<&str>, location: Option<&str>) -> String {
    let mut text = UNKNOWN_ERROR.to_string();
    if let Some(location) = location {
        text.push_str(" @ ");
        text.push_str(location);
    }
    if let Some(message) = message {
        text.push_str(" - ");
        text.push_str(message);
    }
    text
}

static GLOBAL: Lazy<ErrnoRegistry> = Lazy::new(ErrnoRegistry::build);

/// Numeric errno code to errno class
#[derive(Debug)]
pub struct ErrnoRegistry {
    by_code: HashMap<i32, Errno>,
}

impl ErrnoRegistry {
    fn build() -> Self {
        let mut by_code = HashMap::with_capacity(Errno::ALL.len());
        for errno in Errno::ALL {
            by_code.entry(errno.code()).or_insert(*errno);
        }
        log::debug!(
            "errno registry initialized with {} codes ({} classes)",
            by_code.len(),
            Errno::ALL.len()
        );
        Self { by_code }
    }

    /// The process-wide registry
    pub fn global() -> &'static ErrnoRegistry {
        &GLOBAL
    }

    pub fn lookup(&self, code: i32) -> Option<Errno> {
        self.by_code.get(&code).copied()
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Build an instance of the class registered for `errno`, or `None` when
    /// the code is unmapped
    pub fn resolve(
        &self,
        message: Option<&str>,
        errno: i32,
        location: Option<&str>,
    ) -> Option<Exception> {
        let Some(class) = self.lookup(errno) else {
            log::debug!("errno {} has no registered class", errno);
            return None;
        };

        Some(Exception::new(
            Kind::Errno {
                class,
                errno: Some(errno),
            },
            Some(compose_message(message, location)),
        ))
    }
}
