use crate::error::{Error, Result};
use crate::path::Path;

/// Static library build: compiler, archiver, sources, outputs.
#[derive(Clone)]
pub struct LibConfig {
    pub cc: Path,
    pub cflags: Vec<String>,
    pub ar: Path,
    pub ar_flags: Vec<String>,
    /// Glob patterns for the library sources.
    pub sources: Vec<String>,
    pub lib: Path,
    pub pc: Path,
    /// Written to `pc` verbatim.
    pub pc_content: String,
}

/// Executable link step against the static library.
#[derive(Clone)]
pub struct BinConfig {
    pub cc: Path,
    pub cflags: Vec<String>,
    /// Glob patterns for the executable sources.
    pub sources: Vec<String>,
    pub bin: Path,
    /// Extra linker inputs, e.g. `-lm`.
    pub libs: Vec<String>,
}

/// Tool paths, flags and artifact names for one build definition.
/// Read-only once constructed; validated eagerly by [`crate::Build::new`].
#[derive(Clone)]
pub struct BuildConfig {
    pub lib: LibConfig,
    pub bin: BinConfig,
}

/// Source and destination roots for `install`. Destinations are opaque
/// strings; they are created on demand.
#[derive(Clone)]
pub struct InstallConfig {
    pub bin_src: Path,
    pub bin_dest: Path,
    /// Header files or directories; directories are copied recursively.
    pub includes: Vec<Path>,
    pub inc_dest: Path,
    pub lib_src: Path,
    pub lib_dest: Path,
    pub pc_src: Path,
    pub pc_dest: Path,
}

/// Artifact names and the directories they were installed to. Unlike
/// `install`, missing parent directories are never created here.
#[derive(Clone)]
pub struct UninstallConfig {
    pub bin: String,
    pub bin_dir: Path,
    pub includes: Vec<String>,
    pub inc_dir: Path,
    pub lib: String,
    pub lib_dir: Path,
    pub pc: String,
    pub pc_dir: Path,
}

fn require(value: &str, what: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::Config(format!("{what} must not be empty")));
    }
    Ok(())
}

fn require_file_name(path: &Path, what: &str) -> Result<()> {
    require(path.as_ref(), what)?;
    if path.file_name().is_empty() {
        return Err(Error::Config(format!("{what} must name a file: '{path}'")));
    }
    Ok(())
}

impl BuildConfig {
    pub fn validate(&self) -> Result<()> {
        require(self.lib.cc.as_ref(), "compiler")?;
        require(self.lib.ar.as_ref(), "archiver")?;
        require_file_name(&self.lib.lib, "library path")?;
        require_file_name(&self.lib.pc, "pkg-config path")?;
        require(self.bin.cc.as_ref(), "linker")?;
        require_file_name(&self.bin.bin, "binary path")?;
        Ok(())
    }
}

impl InstallConfig {
    pub fn validate(&self) -> Result<()> {
        require_file_name(&self.bin_src, "binary source")?;
        require(self.bin_dest.as_ref(), "binary destination")?;
        require(self.inc_dest.as_ref(), "include destination")?;
        for inc in &self.includes {
            require_file_name(inc, "include source")?;
        }
        require_file_name(&self.lib_src, "library source")?;
        require(self.lib_dest.as_ref(), "library destination")?;
        require_file_name(&self.pc_src, "pkg-config source")?;
        require(self.pc_dest.as_ref(), "pkg-config destination")?;
        Ok(())
    }
}

impl UninstallConfig {
    pub fn validate(&self) -> Result<()> {
        require(&self.bin, "binary name")?;
        require(self.bin_dir.as_ref(), "binary directory")?;
        require(self.inc_dir.as_ref(), "include directory")?;
        for inc in &self.includes {
            require(inc, "include name")?;
        }
        require(&self.lib, "library name")?;
        require(self.lib_dir.as_ref(), "library directory")?;
        require(&self.pc, "pkg-config name")?;
        require(self.pc_dir.as_ref(), "pkg-config directory")?;
        Ok(())
    }
}
