//! What `fatal` does after the record is written.

/// Ends the process with the given status. Tests swap in a recording closure so
/// `fatal` can be exercised without killing the test runner.
pub trait Terminator: Send + Sync {
    fn terminate(&self, code: i32);
}

/// Calls [`std::process::exit`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self, code: i32) {
        std::process::exit(code);
    }
}

impl<F> Terminator for F
where
    F: Fn(i32) + Send + Sync,
{
    fn terminate(&self, code: i32) {
        self(code);
    }
}
