use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct FileScanner;

impl FileScanner {
    /// ディレクトリ直下のエントリ（ファイルとサブディレクトリ）をパス順に返す
    pub fn scan_entries(directory: &Path) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();

        for entry in WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            paths.push(entry.into_path());
        }

        Ok(paths)
    }
}
