use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

impl FileSpec {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        FileSpec {
            path: path.into(),
            content: content.into(),
        }
    }
}

pub fn write_file(spec: FileSpec) {
    if let Some(parent) = spec.path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directories");
    }
    std::fs::write(&spec.path, spec.content.as_bytes()).expect("Failed to write file");
}

pub fn read_file(path: &Path) -> String {
    String::from_utf8(std::fs::read(path).expect("Failed to read file"))
        .expect("File is not valid UTF-8")
}
