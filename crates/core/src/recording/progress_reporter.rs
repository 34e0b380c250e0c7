use std::io::{self, Write};

/// Observer for frame-generation progress.
///
/// Keeps the writer independent of where progress ends up (a terminal,
/// a log, nowhere).
pub trait ProgressReporter {
    /// Called after each frame is persisted; `current` is 1-based.
    fn progress(&mut self, current: usize, total: usize);

    /// Called once, right before the encoder runs.
    fn encoding(&mut self);
}

/// Single-line, self-overwriting progress indicator.
///
/// Each update starts with a carriage return so the terminal keeps
/// rewriting the same line until encoding starts.
pub struct ConsoleProgressReporter {
    out: Box<dyn Write>,
    line_open: bool,
}

impl ConsoleProgressReporter {
    pub fn new(out: Box<dyn Write>) -> Self {
        Self {
            out,
            line_open: false,
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    fn emit(&mut self, text: &str) {
        // Progress output is best effort; a closed pipe must not abort a recording.
        if let Err(e) = self
            .out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush())
        {
            log::debug!("progress output failed: {e}");
        }
    }
}

impl Default for ConsoleProgressReporter {
    fn default() -> Self {
        Self::stdout()
    }
}

impl ProgressReporter for ConsoleProgressReporter {
    fn progress(&mut self, current: usize, total: usize) {
        self.line_open = true;
        self.emit(&format!("\rGenerating frames... ({current}/{total})"));
    }

    fn encoding(&mut self) {
        let prefix = if self.line_open { "\n" } else { "" };
        self.line_open = false;
        self.emit(&format!("{prefix}Encoding video...\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    #[test]
    fn test_console_reporter_overwrites_line() {
        let buffer = SharedBuffer::default();
        let mut reporter = ConsoleProgressReporter::new(Box::new(buffer.clone()));
        reporter.progress(1, 3);
        reporter.progress(2, 3);
        assert_eq!(
            buffer.contents(),
            "\rGenerating frames... (1/3)\rGenerating frames... (2/3)"
        );
    }

    #[test]
    fn test_console_reporter_breaks_line_before_encoding() {
        let buffer = SharedBuffer::default();
        let mut reporter = ConsoleProgressReporter::new(Box::new(buffer.clone()));
        reporter.progress(3, 3);
        reporter.encoding();
        assert!(buffer.contents().ends_with("(3/3)\nEncoding video...\n"));
    }

    #[test]
    fn test_console_reporter_encoding_without_frames() {
        let buffer = SharedBuffer::default();
        let mut reporter = ConsoleProgressReporter::new(Box::new(buffer.clone()));
        reporter.encoding();
        assert_eq!(buffer.contents(), "Encoding video...\n");
    }
}
