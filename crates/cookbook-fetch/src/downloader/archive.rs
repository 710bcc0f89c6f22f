//! Tarball extraction (tar, tar.gz).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Component, Path};

use flate2::read::GzDecoder;

use crate::{FetchError, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const TAR_MAGIC_OFFSET: usize = 257;
const TAR_MAGIC: &[u8; 5] = b"ustar";

/// Supported archive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveType {
    Tar,
    TarGz,
}

impl ArchiveType {
    /// Detect archive type from the file's leading bytes
    pub fn detect(path: &Path) -> Result<Option<Self>> {
        let mut header = Vec::with_capacity(TAR_MAGIC_OFFSET + TAR_MAGIC.len());
        File::open(path)?
            .take((TAR_MAGIC_OFFSET + TAR_MAGIC.len()) as u64)
            .read_to_end(&mut header)?;

        Ok(Self::from_magic(&header))
    }

    fn from_magic(header: &[u8]) -> Option<Self> {
        if header.starts_with(&GZIP_MAGIC) {
            Some(ArchiveType::TarGz)
        } else if header.get(TAR_MAGIC_OFFSET..TAR_MAGIC_OFFSET + TAR_MAGIC.len()) == Some(&TAR_MAGIC[..]) {
            Some(ArchiveType::Tar)
        } else {
            None
        }
    }
}

/// Archive extractor
pub struct ArchiveExtractor;

impl ArchiveExtractor {
    /// Extract an archive, sniffing its format from content rather than name
    pub fn extract(archive_path: &Path, dest_dir: &Path) -> Result<()> {
        let archive_type = ArchiveType::detect(archive_path)
            .map_err(|e| extract_error(archive_path, format!("Failed to read archive: {}", e)))?
            .ok_or_else(|| FetchError::UnknownArchiveFormat {
                archive: archive_path.to_path_buf(),
            })?;

        Self::extract_with_type(archive_path, dest_dir, archive_type)
    }

    /// Extract an archive with explicit type, keeping its top-level directory
    fn extract_with_type(
        archive_path: &Path,
        dest_dir: &Path,
        archive_type: ArchiveType,
    ) -> Result<()> {
        std::fs::create_dir_all(dest_dir).map_err(|e| {
            extract_error(
                archive_path,
                format!("Failed to create {}: {}", dest_dir.display(), e),
            )
        })?;

        let file = File::open(archive_path)
            .map_err(|e| extract_error(archive_path, format!("Failed to open archive: {}", e)))?;
        let reader = BufReader::new(file);
        match archive_type {
            ArchiveType::Tar => Self::extract_tar(reader, archive_path, dest_dir),
            ArchiveType::TarGz => Self::extract_tar(GzDecoder::new(reader), archive_path, dest_dir),
        }
    }

    fn extract_tar<R: Read>(reader: R, archive_path: &Path, dest_dir: &Path) -> Result<()> {
        let fail = |reason: String| extract_error(archive_path, reason);

        let mut archive = tar::Archive::new(reader);

        // Canonicalize dest_dir for path traversal check
        let dest_dir_canonical = dest_dir
            .canonicalize()
            .map_err(|e| fail(format!("Failed to canonicalize destination: {}", e)))?;

        let mut extracted = 0usize;
        for entry in archive
            .entries()
            .map_err(|e| fail(format!("Failed to read tar: {}", e)))?
        {
            let mut entry = entry.map_err(|e| fail(format!("Failed to read tar entry: {}", e)))?;

            let path = entry
                .path()
                .map_err(|e| fail(format!("Invalid path in tar: {}", e)))?
                .into_owned();

            // pax headers and similar metadata entries carry no files
            let entry_type = entry.header().entry_type();
            if entry_type.is_pax_global_extensions() || entry_type.is_pax_local_extensions() {
                continue;
            }

            if path.as_os_str().is_empty() {
                continue;
            }

            if path
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
            {
                return Err(fail(format!(
                    "Path traversal detected in archive: {}",
                    path.display()
                )));
            }

            let outpath = dest_dir.join(&path);

            if entry_type.is_dir() {
                std::fs::create_dir_all(&outpath)
                    .map_err(|e| fail(format!("Failed to create {}: {}", path.display(), e)))?;
            } else if let Some(parent) = outpath.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| fail(format!("Failed to create {}: {}", parent.display(), e)))?;
            }

            // Verify the path stays within destination directory
            let outpath_canonical = outpath.canonicalize().unwrap_or_else(|_| {
                if let Some(parent) = outpath.parent() {
                    if let Ok(parent_canonical) = parent.canonicalize() {
                        if let Some(filename) = outpath.file_name() {
                            return parent_canonical.join(filename);
                        }
                    }
                }
                outpath.clone()
            });

            if !outpath_canonical.starts_with(&dest_dir_canonical) {
                return Err(fail(format!(
                    "Path traversal detected: {} escapes destination directory",
                    path.display()
                )));
            }

            if !entry_type.is_dir() {
                entry
                    .unpack(&outpath)
                    .map_err(|e| fail(format!("Failed to extract {}: {}", path.display(), e)))?;
            }
            extracted += 1;
        }

        log::trace!("Extracted {} entries from {}", extracted, archive_path.display());

        Ok(())
    }
}

fn extract_error(archive_path: &Path, reason: String) -> FetchError {
    FetchError::Extract {
        archive: archive_path.to_path_buf(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempfile::TempDir;

    fn tar_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (path, content) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, path, content.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap()
    }

    fn gzip(bytes: &[u8]) -> Vec<u8> {
        use std::io::Write;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_detect_from_content() {
        let temp_dir = TempDir::new().unwrap();
        let tar = tar_bytes(&[("nginx/metadata.rb", "name 'nginx'")]);

        let plain = temp_dir.path().join("download");
        std::fs::write(&plain, &tar).unwrap();
        assert_eq!(ArchiveType::detect(&plain).unwrap(), Some(ArchiveType::Tar));

        let gz = temp_dir.path().join("download-gz");
        std::fs::write(&gz, gzip(&tar)).unwrap();
        assert_eq!(ArchiveType::detect(&gz).unwrap(), Some(ArchiveType::TarGz));

        let text = temp_dir.path().join("readme");
        std::fs::write(&text, "not an archive").unwrap();
        assert_eq!(ArchiveType::detect(&text).unwrap(), None);
    }

    #[test]
    fn test_extract_tar_gz_keeps_top_level_directory() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("nginx.tar.gz");
        std::fs::write(
            &archive,
            gzip(&tar_bytes(&[
                ("nginx/metadata.rb", "name 'nginx'"),
                ("nginx/recipes/default.rb", "package 'nginx'"),
            ])),
        )
        .unwrap();

        let dest = temp_dir.path().join("out");
        ArchiveExtractor::extract(&archive, &dest).unwrap();

        assert_eq!(
            std::fs::read_to_string(dest.join("nginx/recipes/default.rb")).unwrap(),
            "package 'nginx'"
        );
    }

    #[test]
    fn test_unknown_format_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("nginx.tar.gz");
        std::fs::write(&archive, "<html>rate limited</html>").unwrap();

        let err = ArchiveExtractor::extract(&archive, &temp_dir.path().join("out")).unwrap_err();
        assert!(matches!(err, FetchError::UnknownArchiveFormat { .. }));
    }

    #[test]
    fn test_corrupt_gzip_is_extract_error() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("broken.tar.gz");
        let mut bytes = GZIP_MAGIC.to_vec();
        bytes.extend_from_slice(b"definitely not deflate data");
        std::fs::write(&archive, bytes).unwrap();

        let err = ArchiveExtractor::extract_with_type(
            &archive,
            &temp_dir.path().join("out"),
            ArchiveType::TarGz,
        )
        .unwrap_err();
        assert!(matches!(err, FetchError::Extract { .. }));
    }

    #[test]
    fn test_missing_archive_is_extract_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = ArchiveExtractor::extract(
            &temp_dir.path().join("missing.tar.gz"),
            &temp_dir.path().join("out"),
        )
        .unwrap_err();
        assert!(matches!(err, FetchError::Extract { .. }));
    }

    #[test]
    fn test_unwritable_destination_is_extract_error() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("nginx.tar");
        std::fs::write(&archive, tar_bytes(&[("nginx/metadata.rb", "name 'nginx'")])).unwrap();

        // A regular file where the destination directory should be
        let dest = temp_dir.path().join("out");
        std::fs::write(&dest, "occupied").unwrap();

        let err = ArchiveExtractor::extract(&archive, &dest).unwrap_err();
        assert!(matches!(err, FetchError::Extract { .. }));
    }

    #[test]
    fn test_parent_dir_entry_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut builder = tar::Builder::new(Vec::new());
        let content = b"escaped";
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        // append_data refuses `..`, so write the raw name into the header
        header.as_old_mut().name[..13].copy_from_slice(b"../escape.txt");
        header.set_cksum();
        builder.append(&header, &content[..]).unwrap();

        let archive = temp_dir.path().join("evil.tar");
        std::fs::write(&archive, builder.into_inner().unwrap()).unwrap();

        let dest = temp_dir.path().join("out");
        let err = ArchiveExtractor::extract(&archive, &dest).unwrap_err();

        assert!(matches!(err, FetchError::Extract { .. }));
        assert!(!temp_dir.path().join("escape.txt").exists());
    }
}
