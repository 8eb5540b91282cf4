use std::io;
use std::process::Command;
use std::time::SystemTime;
use std::{fs, path as std_path};

use crate::path::Path;

pub struct RunCommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub returncode: i64,
}

/// Platform seam for the build core: filesystem metadata, filesystem
/// mutation, and blocking child processes. The engine only ever talks to
/// the outside world through this trait.
pub trait Os: 'static {
    // metadata
    fn exists(&self, path: &Path) -> io::Result<bool>;
    fn is_file(&self, path: &Path) -> io::Result<bool>;
    fn is_dir(&self, path: &Path) -> io::Result<bool>;
    /// Modification time, or `None` when the path does not exist.
    fn mtime(&self, path: &Path) -> io::Result<Option<SystemTime>>;
    /// Entry names of a directory, in no particular order.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    // mutation
    fn write_file(&self, path: &Path, data: &[u8]) -> io::Result<()>;
    fn copy_file(&self, src: &Path, dest: &Path) -> io::Result<()>;
    fn copy_dir(&self, src: &Path, dest: &Path) -> io::Result<()>;
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    fn remove_file(&self, path: &Path) -> io::Result<()>;
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    // process
    fn run_command(&self, program: &Path, args: &[&str]) -> io::Result<RunCommandOutput>;
}

/// The real filesystem and process table.
pub struct HostOs;

fn native(path: &Path) -> &std_path::Path {
    if path.is_empty() {
        std_path::Path::new(".")
    } else {
        std_path::Path::new(path.as_ref())
    }
}

impl Os for HostOs {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        Ok(native(path).exists())
    }

    fn is_file(&self, path: &Path) -> io::Result<bool> {
        Ok(native(path).is_file())
    }

    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        Ok(native(path).is_dir())
    }

    fn mtime(&self, path: &Path) -> io::Result<Option<SystemTime>> {
        match fs::metadata(native(path)) {
            Ok(meta) => Ok(Some(meta.modified()?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(native(path))? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        fs::write(native(path), data)
    }

    fn copy_file(&self, src: &Path, dest: &Path) -> io::Result<()> {
        fs::copy(native(src), native(dest))?;
        Ok(())
    }

    fn copy_dir(&self, src: &Path, dest: &Path) -> io::Result<()> {
        let root = native(src);
        for entry in walkdir::WalkDir::new(root) {
            let entry = entry.map_err(io::Error::other)?;
            let rel = entry.path().strip_prefix(root).map_err(io::Error::other)?;
            let target = native(dest).join(rel);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)?;
            } else {
                fs::copy(entry.path(), &target)?;
            }
        }
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(native(path))
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(native(path))
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(native(path))
    }

    fn run_command(&self, program: &Path, args: &[&str]) -> io::Result<RunCommandOutput> {
        let output = Command::new(program.as_ref()).args(args).output()?;

        Ok(RunCommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            returncode: output.status.code().unwrap_or(-1) as i64,
        })
    }
}
