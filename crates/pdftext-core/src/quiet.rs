use std::io::{self, Write};

use gag::Gag;

/// Redirects the process's stdout and stderr to the null device while held.
///
/// PDF libraries print diagnostics straight to the standard streams (Rust
/// `println!` in pdf-extract and lopdf, C error callbacks in MuPDF). Stdout
/// must carry nothing but the extracted text, so every backend runs under
/// this guard.
///
/// Only one gag per stream can exist in a process. If a stream is already
/// redirected the guard leaves it alone.
pub struct Quiet {
    _stdout: Option<Gag>,
    _stderr: Option<Gag>,
}

impl Quiet {
    pub fn new() -> Self {
        flush_std_streams();
        Self {
            _stdout: Gag::stdout().ok(),
            _stderr: Gag::stderr().ok(),
        }
    }
}

impl Default for Quiet {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Quiet {
    // Runs before the gags drop, so anything still buffered goes to the null device.
    fn drop(&mut self) {
        flush_std_streams();
    }
}

fn flush_std_streams() {
    io::stdout().flush().ok();
    io::stderr().flush().ok();
}
