use std::io::{self, Write};

/// Receives progress events during the generation phase.
///
/// Every function that reports progress takes a sink explicitly; nothing in
/// the crate writes through a swapped-out global stream.
pub trait ProgressSink {
    /// A part of the plan is being entered, `index` counted from 1
    fn part(&mut self, index: usize, total: usize, path: &str);
    /// A file within the current part is being entered, `index` counted from 1
    fn file(&mut self, index: usize, total: usize, name: &str);
    /// The full generator command line, echoed before spawning
    fn command(&mut self, cmd: &str);
    /// One line of generator stdout, forwarded verbatim
    fn output_line(&mut self, line: &str);
}

/// Console rendition of the progress display
pub struct ConsoleProgress<W: Write> {
    out: W,
}

impl ConsoleProgress<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ProgressSink for ConsoleProgress<W> {
    fn part(&mut self, index: usize, total: usize, path: &str) {
        let _ = writeln!(self.out, "[*] Part {index}/{total}: {path}");
    }

    fn file(&mut self, index: usize, total: usize, name: &str) {
        let _ = writeln!(self.out, "  [+] File {index}/{total}: {name}");
    }

    fn command(&mut self, cmd: &str) {
        let _ = writeln!(self.out, "\n{cmd}");
    }

    fn output_line(&mut self, line: &str) {
        let _ = writeln!(self.out, "{line}");
    }
}
