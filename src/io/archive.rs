//! Extraction of `.tar.gz` tile archives.
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;
use tracing::info;

/// Unpack a gzipped tile tarball and return the extraction directory.
///
/// When no destination is given the archive is unpacked next to itself, into
/// a directory named after the archive with `.tar.gz` stripped.
pub fn extract(archive_path: &Path, output_directory: Option<&Path>) -> std::io::Result<PathBuf> {
    let directory = match output_directory {
        Some(dir) => dir.to_path_buf(),
        None => default_directory(archive_path),
    };
    fs::create_dir_all(&directory)?;

    info!("extracting {} to {}", archive_path.display(), directory.display());
    let file = File::open(archive_path)?;
    let mut archive = Archive::new(GzDecoder::new(file));
    archive.unpack(&directory)?;

    Ok(directory)
}

fn default_directory(archive_path: &Path) -> PathBuf {
    let name = archive_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(".tar.gz").unwrap_or(&name);
    archive_path.with_file_name(stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    fn write_archive(path: &Path, files: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (name, content) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, name, *content).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn extracts_into_named_sibling_directory() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("N00E072_21_MOS_F02DAR.tar.gz");
        write_archive(
            &archive,
            &[
                ("N00E072_21_sl_HH_F02DAR.tif", b"hh".as_slice()),
                ("N00E072_21_mask_F02DAR.tif", b"mask".as_slice()),
            ],
        );

        let extracted = extract(&archive, None).unwrap();
        assert_eq!(extracted, dir.path().join("N00E072_21_MOS_F02DAR"));
        assert!(extracted.join("N00E072_21_sl_HH_F02DAR.tif").is_file());
        assert!(extracted.join("N00E072_21_mask_F02DAR.tif").is_file());
    }

    #[test]
    fn extracts_into_explicit_directory() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("S16W150_15_FNF_F02DAR.tar.gz");
        write_archive(&archive, &[("S16W150_15_C_F02DAR", b"c".as_slice())]);

        let dest = dir.path().join("work");
        let extracted = extract(&archive, Some(&dest)).unwrap();
        assert_eq!(extracted, dest);
        assert!(dest.join("S16W150_15_C_F02DAR").is_file());
    }
}
