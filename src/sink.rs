//! Destinations of the generated documents.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::{Error, Result};

/// Where a generated document ends up.
pub trait DocumentSink {
    fn write_document(&mut self, zid: &str, contents: &str) -> Result<()>;
}

/// Writes the documents as-is to a writer, such as the standard output.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DocumentSink for WriterSink<W> {
    fn write_document(&mut self, _zid: &str, contents: &str) -> Result<()> {
        self.writer.write_all(contents.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes each document to `<root>/<ZID>.yaml`.
///
/// The file is first written next to its target and then renamed into place,
/// so an interrupted run never leaves a truncated document behind.
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, zid: &str) -> PathBuf {
        self.root.join(format!("{}.yaml", zid))
    }
}

fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Write {
        path: path.to_path_buf(),
        source,
    }
}

impl DocumentSink for DirectorySink {
    fn write_document(&mut self, zid: &str, contents: &str) -> Result<()> {
        let path = self.path_for(zid);

        fs::create_dir_all(&self.root).map_err(write_error(&self.root))?;
        let mut file = NamedTempFile::new_in(&self.root).map_err(write_error(&path))?;
        file.write_all(contents.as_bytes())
            .map_err(write_error(&path))?;
        file.persist(&path)
            .map_err(|err| write_error(&path)(err.error))?;

        tracing::info!(path = %path.display(), "Schema written");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn writer_sink_writes_contents() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write_document("Z1", "# Z1\n$id: t/Z1\n").unwrap();
        assert_eq!(sink.into_inner(), b"# Z1\n$id: t/Z1\n".to_vec());
    }

    #[test]
    fn directory_sink_creates_missing_directories() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("nested").join("out");
        let mut sink = DirectorySink::new(&root);

        sink.write_document("Z6", "content\n").unwrap();

        assert_eq!(
            fs::read_to_string(root.join("Z6.yaml")).unwrap(),
            "content\n"
        );
        let entries: Vec<_> = fs::read_dir(&root).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn directory_sink_overwrites_existing_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("Z6.yaml");
        fs::write(&path, "a much longer previous content\n").unwrap();

        DirectorySink::new(temp.path())
            .write_document("Z6", "new\n")
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn directory_sink_reports_unwritable_root() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("file");
        fs::write(&blocker, "").unwrap();

        let error = DirectorySink::new(blocker.join("out"))
            .write_document("Z6", "new\n")
            .unwrap_err();

        assert!(matches!(error, Error::Write { .. }));
        assert_eq!(error.exit_code(), 2);
    }
}
