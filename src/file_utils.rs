use anyhow::{Result, Context};
use chrono::{DateTime, Local};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

// @module: File and directory utilities

// @const: Extension of caption files picked up in folder mode
pub const CAPTION_EXTENSION: &str = "vtt";

// @const: Extension of generated documents
pub const MARKDOWN_EXTENSION: &str = "md";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }

    // @checks: Caption file by extension, case-insensitive
    pub fn is_caption_file<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(CAPTION_EXTENSION))
    }

    fn stem_of(input_file: &Path) -> String {
        input_file
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    // @generates: `<output_dir>/<stem>.md`
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(input_file: P1, output_dir: P2) -> PathBuf {
        let stem = Self::stem_of(input_file.as_ref());
        output_dir.as_ref().join(format!("{}.{}", stem, MARKDOWN_EXTENSION))
    }

    // @generates: Folder holding the parts of a split transcript, `<output_dir>/<stem>`
    pub fn generate_parts_dir<P1: AsRef<Path>, P2: AsRef<Path>>(input_file: P1, output_dir: P2) -> PathBuf {
        output_dir.as_ref().join(Self::stem_of(input_file.as_ref()))
    }

    // @generates: `<parts_dir>/<stem>_part<N>.md`, numbered from 1
    pub fn generate_part_paths<P: AsRef<Path>>(parts_dir: P, count: usize) -> Vec<PathBuf> {
        let parts_dir = parts_dir.as_ref();
        let base = parts_dir
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        (1..=count)
            .map(|i| parts_dir.join(format!("{}_part{}.{}", base, i, MARKDOWN_EXTENSION)))
            .collect()
    }

    // @generates: Directory under `output_dir` mirroring where `input_file` sits below `input_root`
    pub fn mirror_dir<P1: AsRef<Path>, P2: AsRef<Path>, P3: AsRef<Path>>(input_file: P1, input_root: P2, output_dir: P3) -> PathBuf {
        let relative = input_file
            .as_ref()
            .parent()
            .and_then(|parent| parent.strip_prefix(input_root.as_ref()).ok())
            .unwrap_or(Path::new(""));
        output_dir.as_ref().join(relative)
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let normalized_ext = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(normalized_ext) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file through a temporary file in the same directory
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::ensure_dir(&parent)?;

        let mut temp = NamedTempFile::new_in(&parent)
            .with_context(|| format!("Failed to create temporary file in: {:?}", parent))?;
        temp.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write to file: {:?}", path))?;
        temp.persist(path)
            .with_context(|| format!("Failed to write to file: {:?}", path))?;

        Ok(())
    }

    /// Last modification time in local time
    pub fn modified_time<P: AsRef<Path>>(path: P) -> Result<DateTime<Local>> {
        let path = path.as_ref();
        let modified = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .with_context(|| format!("Failed to read modification time: {:?}", path))?;

        Ok(DateTime::<Local>::from(modified))
    }
}
