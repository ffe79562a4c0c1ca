// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 create-grandstack-app contributors

//! Archive extraction
//!
//! Unpacks the downloaded release tarball. GitHub source archives wrap
//! everything in a `<repo>-<ref>/` directory, so extraction strips a fixed
//! number of leading path components.

use flate2::read::GzDecoder;
use std::fs::File;
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::debug;

use crate::errors::{ScaffoldError, ScaffoldResult};

/// Extract a gzipped tarball into `dest`, dropping the first
/// `strip_components` path segments of every entry.
pub fn extract_archive(
    archive_path: &Path,
    dest: &Path,
    strip_components: usize,
) -> ScaffoldResult<()> {
    let wrap = |e: std::io::Error| ScaffoldError::ExtractFailed {
        path: archive_path.to_path_buf(),
        error: e.to_string(),
    };

    let file = File::open(archive_path).map_err(wrap)?;
    let mut archive = Archive::new(GzDecoder::new(file));

    let mut unpacked = 0usize;
    for entry in archive.entries().map_err(wrap)? {
        let mut entry = entry.map_err(wrap)?;
        let path = entry.path().map_err(wrap)?;

        let stripped: PathBuf = path.components().skip(strip_components).collect();
        if stripped.as_os_str().is_empty() {
            continue;
        }

        let target = dest.join(stripped);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(wrap)?;
        }
        entry.unpack(&target).map_err(wrap)?;
        unpacked += 1;
    }

    debug!(
        "Unpacked {} entries from {} into {}",
        unpacked,
        archive_path.display(),
        dest.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;

    fn append_file(builder: &mut tar::Builder<GzEncoder<File>>, path: &str, data: &[u8]) {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, path, data).unwrap();
    }

    fn build_starter_archive(dir: &Path) -> PathBuf {
        let archive_path = dir.join("starter.tar.gz");
        let encoder = GzEncoder::new(File::create(&archive_path).unwrap(), Compression::default());
        let mut builder = tar::Builder::new(encoder);

        append_file(
            &mut builder,
            "grand-stack-starter-1.0.0/package.json",
            b"{\"name\":\"starter\"}",
        );
        append_file(
            &mut builder,
            "grand-stack-starter-1.0.0/api/package.json",
            b"{\"name\":\"api\"}",
        );
        append_file(
            &mut builder,
            "grand-stack-starter-1.0.0/web-react/package.json",
            b"{\"name\":\"web-react\"}",
        );

        builder.into_inner().unwrap().finish().unwrap();
        archive_path
    }

    #[test]
    fn test_extract_strips_leading_component() {
        let dir = tempfile::tempdir().unwrap();
        let archive = build_starter_archive(dir.path());
        let dest = dir.path().join("myapp");
        std::fs::create_dir_all(&dest).unwrap();

        extract_archive(&archive, &dest, 1).unwrap();

        assert!(dest.join("package.json").exists());
        assert!(dest.join("api/package.json").exists());
        assert!(dest.join("web-react/package.json").exists());
        assert!(!dest.join("grand-stack-starter-1.0.0").exists());

        let api = std::fs::read_to_string(dest.join("api/package.json")).unwrap();
        assert_eq!(api, "{\"name\":\"api\"}");
    }

    #[test]
    fn test_extract_missing_archive_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_archive(&dir.path().join("nope.tar.gz"), dir.path(), 1).unwrap_err();
        assert!(matches!(err, ScaffoldError::ExtractFailed { .. }));
    }
}
