pub mod archive;
pub mod disk;

use std::io;
use std::io::Read;

/// A file-like source of one report: something that can be opened for
/// reading and described without reading it.
pub trait ReportFile {
    /// Opens a readable stream positioned at the start of the content.
    fn open(&self) -> io::Result<Box<dyn Read + '_>>;
    /// Base name of the file, including its extension.
    fn name(&self) -> &str;
    /// Whether the entry denotes a directory rather than file content.
    fn is_dir(&self) -> bool;
}

impl<F: ReportFile + ?Sized> ReportFile for Box<F> {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        (**self).open()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_dir(&self) -> bool {
        (**self).is_dir()
    }
}
