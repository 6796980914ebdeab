//! Local file transport for `file://` URIs.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rescope_core::{
    ReadableContent, ResourceAccessError, ResourceAccessor, ResourceLister, ResourceLocation,
    ResourceMetaData, ResourceUploader,
};

/// Reads, writes and lists files addressed by `file://` URIs.
///
/// A missing file is an absent resource, not an error. `revalidate` has no
/// effect since nothing is cached.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileResourceAccessor;

impl FileResourceAccessor {
    /// Create a new file transport.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ResourceAccessor for FileResourceAccessor {
    fn with_content<T, F>(
        &self,
        location: &ResourceLocation,
        _revalidate: bool,
        action: F,
    ) -> Result<Option<T>, ResourceAccessError>
    where
        F: FnOnce(&mut dyn Read, &ResourceMetaData) -> Result<T, ResourceAccessError>,
    {
        let path = local_path(location)?;
        let Some(stat) = stat_if_present(&path)? else {
            return Ok(None);
        };
        if stat.is_dir() {
            return Err(ResourceAccessError::io(
                "IsADirectory",
                format!("{} is a directory", path.display()),
            ));
        }
        let meta = metadata_of(location, &path, &stat);
        let mut file = File::open(&path)?;
        tracing::trace!(path = %path.display(), "Opened file");
        action(&mut file, &meta).map(Some)
    }

    fn meta_data(
        &self,
        location: &ResourceLocation,
        _revalidate: bool,
    ) -> Result<Option<ResourceMetaData>, ResourceAccessError> {
        let path = local_path(location)?;
        Ok(stat_if_present(&path)?.map(|stat| metadata_of(location, &path, &stat)))
    }
}

impl ResourceUploader for FileResourceAccessor {
    fn upload(
        &self,
        content: &dyn ReadableContent,
        destination: &ResourceLocation,
    ) -> Result<(), ResourceAccessError> {
        let path = local_path(destination)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(&path)?;
        let written = io::copy(&mut content.open()?, &mut file)?;
        file.sync_all()?;
        tracing::trace!(path = %path.display(), written, "Wrote file");
        Ok(())
    }
}

impl ResourceLister for FileResourceAccessor {
    fn list(&self, parent: &ResourceLocation) -> Result<Option<Vec<String>>, ResourceAccessError> {
        let path = local_path(parent)?;
        let entries = match fs::read_dir(&path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) if path.is_file() => {
                tracing::debug!(path = %path.display(), error = %e, "Not a directory");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let mut names = entries
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<Result<Vec<_>, _>>()?;
        names.sort();
        Ok(Some(names))
    }
}

/// A local file used as upload content.
#[derive(Debug, Clone)]
pub struct FileContent {
    path: PathBuf,
    length: Option<u64>,
}

impl FileContent {
    /// Use the file at `path`, recording its current size.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ResourceAccessError> {
        let path = path.into();
        let length = fs::metadata(&path)?.len();
        Ok(Self {
            path,
            length: Some(length),
        })
    }

    /// Path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReadableContent for FileContent {
    fn open(&self) -> Result<Box<dyn Read + '_>, ResourceAccessError> {
        Ok(Box::new(File::open(&self.path)?))
    }

    fn content_length(&self) -> Option<u64> {
        self.length
    }
}

fn local_path(location: &ResourceLocation) -> Result<PathBuf, ResourceAccessError> {
    let uri = location.uri();
    if uri.scheme() != "file" {
        return Err(ResourceAccessError::invalid_location(
            uri.as_str(),
            format!("unsupported scheme '{}', expected 'file'", uri.scheme()),
        ));
    }
    uri.to_file_path()
        .map_err(|()| ResourceAccessError::invalid_location(uri.as_str(), "not a local file path"))
}

fn stat_if_present(path: &Path) -> Result<Option<fs::Metadata>, ResourceAccessError> {
    match fs::metadata(path) {
        Ok(stat) => Ok(Some(stat)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn metadata_of(location: &ResourceLocation, path: &Path, stat: &fs::Metadata) -> ResourceMetaData {
    let mut meta = ResourceMetaData::new(location.uri().clone());
    if stat.is_file() {
        meta = meta.with_content_length(stat.len());
    }
    if let Ok(modified) = stat.modified() {
        meta = meta.with_last_modified(DateTime::<Utc>::from(modified));
    }
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        meta = meta.with_filename(name);
    }
    meta
}

#[cfg(test)]
mod tests {
    use super::*;
    use rescope_core::BytesContent;
    use tempfile::TempDir;
    use url::Url;

    fn location_of(path: &Path) -> ResourceLocation {
        ResourceLocation::new(Url::from_file_path(path).unwrap())
    }

    #[test]
    fn test_with_content_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.jar");
        fs::write(&path, b"jar bytes").unwrap();

        let (text, meta) = FileResourceAccessor::new()
            .with_content(&location_of(&path), false, |stream, meta| {
                let mut text = String::new();
                stream.read_to_string(&mut text)?;
                Ok((text, meta.clone()))
            })
            .unwrap()
            .unwrap();

        assert_eq!(text, "jar bytes");
        assert_eq!(meta.content_length, Some(9));
        assert_eq!(meta.filename.as_deref(), Some("a.jar"));
        assert!(meta.last_modified.is_some());
    }

    #[test]
    fn test_missing_file_is_absent() {
        let dir = TempDir::new().unwrap();
        let location = location_of(&dir.path().join("missing.jar"));
        let accessor = FileResourceAccessor::new();

        let content = accessor
            .with_content(&location, false, |_, _| Ok(()))
            .unwrap();
        assert!(content.is_none());
        assert!(accessor.meta_data(&location, false).unwrap().is_none());
        assert!(accessor.list(&location).unwrap().is_none());
    }

    #[test]
    fn test_directory_content_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = FileResourceAccessor::new()
            .with_content(&location_of(dir.path()), false, |_, _| Ok(()))
            .unwrap_err();
        assert!(matches!(err, ResourceAccessError::Io { .. }));
    }

    #[test]
    fn test_list_returns_sorted_names() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.pom"), b"").unwrap();
        fs::write(dir.path().join("a.jar"), b"").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let names = FileResourceAccessor::new()
            .list(&location_of(dir.path()))
            .unwrap()
            .unwrap();

        assert_eq!(names, vec!["a.jar", "b.pom", "sub"]);
    }

    #[test]
    fn test_upload_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dir/c.jar");

        FileResourceAccessor::new()
            .upload(&BytesContent::new(b"uploaded".to_vec()), &location_of(&path))
            .unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"uploaded");
    }

    #[test]
    fn test_file_content_reopens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("src.bin");
        fs::write(&path, vec![7u8; 32]).unwrap();

        let content = FileContent::new(&path).unwrap();
        assert_eq!(content.content_length(), Some(32));
        for _ in 0..2 {
            let mut bytes = Vec::new();
            content.open().unwrap().read_to_end(&mut bytes).unwrap();
            assert_eq!(bytes.len(), 32);
        }
    }

    #[test]
    fn test_non_file_scheme_is_rejected() {
        let location = ResourceLocation::parse("http://example/a.jar").unwrap();
        let err = FileResourceAccessor::new()
            .meta_data(&location, false)
            .unwrap_err();
        assert!(matches!(err, ResourceAccessError::InvalidLocation { .. }));
    }
}
