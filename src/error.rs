use std::cell::Cell;
use std::fmt;

use gl::types::GLenum;
use log::error;

/// Runs a GL call and immediately checks the ambient error state,
/// tagging any pending error with the call site and the literal call
/// text. Yields whatever the call returned.
///
/// Error state is global to the context, so every mutating GL call must
/// be checked before the next one is issued or the attribution is wrong.
///
/// ```no_run
/// use glid::check_gl;
///
/// let mut id = 0;
/// unsafe { check_gl!(gl::GenBuffers(1, &mut id)) };
/// ```
#[macro_export]
macro_rules! check_gl {
    ($call:expr) => {{
        let ret = $call;
        $crate::error::check(file!(), line!(), stringify!($call));
        ret
    }};
}

/// One error code out of the GL error queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlError {
    InvalidEnum,
    InvalidValue,
    InvalidOperation,
    InvalidFramebufferOperation,
    OutOfMemory,
    StackUnderflow,
    StackOverflow,
    ContextLost,
    Unknown(GLenum),
}

impl GlError {
    /// `GL_NO_ERROR` maps to `None`, anything the crate does not know
    /// about to `Unknown`.
    pub fn from_raw(code: GLenum) -> Option<GlError> {
        match code {
            gl::NO_ERROR => None,
            gl::INVALID_ENUM => Some(GlError::InvalidEnum),
            gl::INVALID_VALUE => Some(GlError::InvalidValue),
            gl::INVALID_OPERATION => Some(GlError::InvalidOperation),
            gl::INVALID_FRAMEBUFFER_OPERATION => Some(GlError::InvalidFramebufferOperation),
            gl::OUT_OF_MEMORY => Some(GlError::OutOfMemory),
            gl::STACK_UNDERFLOW => Some(GlError::StackUnderflow),
            gl::STACK_OVERFLOW => Some(GlError::StackOverflow),
            gl::CONTEXT_LOST => Some(GlError::ContextLost),
            other => Some(GlError::Unknown(other)),
        }
    }

    pub fn to_raw(self) -> GLenum {
        match self {
            GlError::InvalidEnum => gl::INVALID_ENUM,
            GlError::InvalidValue => gl::INVALID_VALUE,
            GlError::InvalidOperation => gl::INVALID_OPERATION,
            GlError::InvalidFramebufferOperation => gl::INVALID_FRAMEBUFFER_OPERATION,
            GlError::OutOfMemory => gl::OUT_OF_MEMORY,
            GlError::StackUnderflow => gl::STACK_UNDERFLOW,
            GlError::StackOverflow => gl::STACK_OVERFLOW,
            GlError::ContextLost => gl::CONTEXT_LOST,
            GlError::Unknown(code) => code,
        }
    }

    /// The canonical `GL_*` name of the code.
    pub fn name(self) -> &'static str {
        match self {
            GlError::InvalidEnum => "GL_INVALID_ENUM",
            GlError::InvalidValue => "GL_INVALID_VALUE",
            GlError::InvalidOperation => "GL_INVALID_OPERATION",
            GlError::InvalidFramebufferOperation => "GL_INVALID_FRAMEBUFFER_OPERATION",
            GlError::OutOfMemory => "GL_OUT_OF_MEMORY",
            GlError::StackUnderflow => "GL_STACK_UNDERFLOW",
            GlError::StackOverflow => "GL_STACK_OVERFLOW",
            GlError::ContextLost => "GL_CONTEXT_LOST",
            GlError::Unknown(_) => "unknown error",
        }
    }
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            GlError::Unknown(code) => write!(f, "unknown error (0x{:04x})", code),
            other => f.write_str(other.name()),
        }
    }
}

impl std::error::Error for GlError {}

/// A failing GL call with enough context to locate it in source.
#[derive(Debug, Clone, Copy)]
pub struct GlFailure {
    pub error: GlError,
    pub file: &'static str,
    pub line: u32,
    /// Literal text of the call that tripped the error.
    pub call: &'static str,
}

impl fmt::Display for GlFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: `{}` failed with {}",
            self.file, self.line, self.call, self.error
        )
    }
}

/// Where failures end up. The sink is invoked exactly once per pending
/// error code; installing one never suppresses reporting, only redirects
/// it.
pub type ErrorSink = fn(&GlFailure);

// The sink is thread-local, matching the thread affinity of the context
// whose errors it reports.
thread_local! {
    static SINK: Cell<ErrorSink> = Cell::new(log_sink);
}

/// Default sink: logs the failure and carries on.
pub fn log_sink(failure: &GlFailure) {
    error!("{}", failure);
}

/// Sink for callers that want a failing call to take down the calling
/// path. A failure detected while a binding guard tears down during an
/// unwind will abort the process.
pub fn panic_sink(failure: &GlFailure) {
    panic!("{}", failure);
}

/// Installs a sink for the current thread and returns the previous one.
pub fn set_error_sink(sink: ErrorSink) -> ErrorSink {
    SINK.with(|cell| cell.replace(sink))
}

/// Drains the GL error queue, reporting every pending code. Draining is
/// what clears the error state, so a later check never sees stale codes.
///
/// Normally reached through [`check_gl!`] rather than called directly.
pub fn check(file: &'static str, line: u32, call: &'static str) {
    loop {
        let code = unsafe { gl::GetError() };
        match GlError::from_raw(code) {
            None => break,
            Some(error) => {
                report(&GlFailure {
                    error,
                    file,
                    line,
                    call,
                });
                // a lost context reports CONTEXT_LOST forever
                if error == GlError::ContextLost {
                    break;
                }
            }
        }
    }
}

fn report(failure: &GlFailure) {
    SINK.with(|cell| cell.get()(failure));
}
