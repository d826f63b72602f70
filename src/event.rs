use std::io;
use std::io::Write;

/// A sink for membership narration events.
///
/// The tree reports structural changes ("`X` welcomed `Y`", "`X` left the
/// family, replaced by `Y`") one line at a time. A failing sink aborts the
/// operation that triggered it, but any structural mutation already applied
/// stays applied; narration and mutation are not transactional.
pub trait EventSink {
    fn emit(&mut self, line: &str) -> io::Result<()>;
}

/// An event sink that appends lines to an underlying writer.
///
/// # Examples
/// ```
/// use family_tree::{EventSink, WriterSink};
///
/// let mut sink = WriterSink::new(Vec::new());
/// sink.emit("Don welcomed Son").unwrap();
/// assert_eq!(sink.get_ref(), b"Don welcomed Son\n");
/// ```
pub struct WriterSink<W> {
    writer: W,
}

impl<W> WriterSink<W>
where
    W: Write,
{
    pub fn new(writer: W) -> Self {
        WriterSink { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W> EventSink for WriterSink<W>
where
    W: Write,
{
    fn emit(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", line)
    }
}

/// An event sink that collects lines in memory, useful for inspecting
/// narration in tests.
#[derive(Default)]
pub struct VecSink {
    pub lines: Vec<String>,
}

impl VecSink {
    pub fn new() -> Self {
        VecSink { lines: Vec::new() }
    }
}

impl EventSink for VecSink {
    fn emit(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_owned());
        Ok(())
    }
}
