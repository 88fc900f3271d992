//! POSIX signal table
//!
//! Maps signal names (without the `SIG` prefix) to the numbers of the
//! platform the runtime was built for. `EXIT` is the pseudo-signal 0.

use rescue_core::SignalTable;

static SIGNALS: &[(&str, i32)] = &[
    ("EXIT", 0),
    ("HUP", libc::SIGHUP),
    ("INT", libc::SIGINT),
    ("QUIT", libc::SIGQUIT),
    ("ILL", libc::SIGILL),
    ("TRAP", libc::SIGTRAP),
    ("ABRT", libc::SIGABRT),
    ("BUS", libc::SIGBUS),
    ("FPE", libc::SIGFPE),
    ("KILL", libc::SIGKILL),
    ("USR1", libc::SIGUSR1),
    ("SEGV", libc::SIGSEGV),
    ("USR2", libc::SIGUSR2),
    ("PIPE", libc::SIGPIPE),
    ("ALRM", libc::SIGALRM),
    ("TERM", libc::SIGTERM),
    ("CHLD", libc::SIGCHLD),
    ("CONT", libc::SIGCONT),
    ("STOP", libc::SIGSTOP),
    ("TSTP", libc::SIGTSTP),
    ("TTIN", libc::SIGTTIN),
    ("TTOU", libc::SIGTTOU),
    ("URG", libc::SIGURG),
    ("XCPU", libc::SIGXCPU),
    ("XFSZ", libc::SIGXFSZ),
    ("VTALRM", libc::SIGVTALRM),
    ("PROF", libc::SIGPROF),
    ("WINCH", libc::SIGWINCH),
    ("IO", libc::SIGIO),
    ("SYS", libc::SIGSYS),
];

/// Signal table backed by the platform's `libc` constants
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixSignals;

impl PosixSignals {
    /// Every known `(name, number)` pair
    pub fn list(&self) -> &'static [(&'static str, i32)] {
        SIGNALS
    }
}

impl SignalTable for PosixSignals {
    fn number_for_name(&self, name: &str) -> Option<i32> {
        SIGNALS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, number)| *number)
    }

    fn name_for_number(&self, number: i32) -> Option<String> {
        SIGNALS
            .iter()
            .find(|(_, known)| *known == number)
            .map(|(name, _)| name.to_string())
    }
}
