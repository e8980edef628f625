use crate::source::ReportFile;
use std::fs::File;
use std::io;
use std::io::Cursor;
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, Mutex};
use zip::ZipArchive;

/// One entry of a zip archive. Entries share the archive handle; content is
/// buffered while the handle is locked, so the lock never outlives a read.
pub struct ArchiveEntry {
    archive: Arc<Mutex<ZipArchive<File>>>,
    index: usize,
    name: String,
    directory: bool,
}

impl ArchiveEntry {
    /// Lists every entry of the zip archive at `path`, in archive order.
    pub fn list(path: &Path) -> io::Result<Vec<ArchiveEntry>> {
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file).map_err(into_io_error)?;
        let mut descriptors = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let entry = archive.by_index(index).map_err(into_io_error)?;
            descriptors.push((index, entry.name().to_owned(), entry.is_dir()));
        }
        let archive = Arc::new(Mutex::new(archive));
        Ok(descriptors
            .into_iter()
            .map(|(index, name, directory)| ArchiveEntry {
                archive: Arc::clone(&archive),
                index,
                name,
                directory,
            })
            .collect())
    }
}

impl ReportFile for ArchiveEntry {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        let mut archive = self
            .archive
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "archive handle poisoned"))?;
        let mut entry = archive.by_index(self.index).map_err(into_io_error)?;
        let mut content = Vec::new();
        entry.read_to_end(&mut content)?;
        Ok(Box::new(Cursor::new(content)))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_dir(&self) -> bool {
        self.directory
    }
}

fn into_io_error(err: zip::result::ZipError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}
