use std::io;

use log::{debug, info};

use crate::config::{InstallConfig, UninstallConfig};
use crate::error::{Error, Result};
use crate::os::Os;
use crate::path::Path;

/// Copies the built artifacts to their destination roots. Destinations are
/// created recursively and existing files overwritten; nothing here is
/// gated on staleness.
pub fn install(os: &dyn Os, cfg: &InstallConfig) -> Result<()> {
    install_file(os, &cfg.bin_src, &cfg.bin_dest)?;

    os.create_dir_all(&cfg.inc_dest)
        .map_err(|e| Error::fs(&cfg.inc_dest, e))?;
    for inc in &cfg.includes {
        let dest = cfg.inc_dest.join(inc.file_name());
        if os.is_dir(inc).map_err(|e| Error::fs(inc, e))? {
            info!("cp -r {inc} {dest}");
            os.copy_dir(inc, &dest).map_err(|e| Error::fs(inc, e))?;
        } else {
            info!("cp {inc} {dest}");
            os.copy_file(inc, &dest).map_err(|e| Error::fs(inc, e))?;
        }
    }

    install_file(os, &cfg.lib_src, &cfg.lib_dest)?;
    install_file(os, &cfg.pc_src, &cfg.pc_dest)?;
    Ok(())
}

fn install_file(os: &dyn Os, src: &Path, dest_dir: &Path) -> Result<()> {
    os.create_dir_all(dest_dir)
        .map_err(|e| Error::fs(dest_dir, e))?;
    let dest = dest_dir.join(src.file_name());
    info!("install {src} {dest}");
    os.copy_file(src, &dest).map_err(|e| Error::fs(src, e))
}

/// Removes the installed artifacts. The binary is removed forcefully, and
/// include entries only in the form they exist in: directories recursively,
/// files individually, absent entries skipped. The library and the
/// pkg-config file are strict and fail when missing.
pub fn uninstall(os: &dyn Os, cfg: &UninstallConfig) -> Result<()> {
    let bin = cfg.bin_dir.join(&cfg.bin);
    info!("rm -f {bin}");
    match os.remove_file(&bin) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(Error::fs(&bin, e)),
    }

    for inc in &cfg.includes {
        let path = cfg.inc_dir.join(inc);
        if os.is_dir(&path).map_err(|e| Error::fs(&path, e))? {
            info!("rm -rf {path}");
            match os.remove_dir_all(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(Error::fs(&path, e)),
            }
        } else if os.is_file(&path).map_err(|e| Error::fs(&path, e))? {
            info!("rm {path}");
            os.remove_file(&path).map_err(|e| Error::fs(&path, e))?;
        } else {
            debug!("{path}: not installed, skipping");
        }
    }

    let lib = cfg.lib_dir.join(&cfg.lib);
    info!("rm {lib}");
    os.remove_file(&lib).map_err(|e| Error::fs(&lib, e))?;

    let pc = cfg.pc_dir.join(&cfg.pc);
    info!("rm {pc}");
    os.remove_file(&pc).map_err(|e| Error::fs(&pc, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::os::fake::FakeOs;

    fn sample_install() -> InstallConfig {
        InstallConfig {
            bin_src: Path::from("build/state"),
            bin_dest: Path::from("/usr/local/bin"),
            includes: vec![Path::from("include/state.h"), Path::from("include/state")],
            inc_dest: Path::from("/usr/local/include"),
            lib_src: Path::from("libstate.a"),
            lib_dest: Path::from("/usr/local/lib"),
            pc_src: Path::from("libstate.pc"),
            pc_dest: Path::from("/usr/local/lib/pkgconfig"),
        }
    }

    fn sample_uninstall() -> UninstallConfig {
        UninstallConfig {
            bin: "state".into(),
            bin_dir: Path::from("/usr/local/bin"),
            includes: vec!["state.h".into(), "state".into()],
            inc_dir: Path::from("/usr/local/include"),
            lib: "libstate.a".into(),
            lib_dir: Path::from("/usr/local/lib"),
            pc: "libstate.pc".into(),
            pc_dir: Path::from("/usr/local/lib/pkgconfig"),
        }
    }

    fn populated() -> FakeOs {
        let os = FakeOs::new();
        let binary = Path::from("build/state");
        os.write_file(&binary, b"\x7fELF payload").unwrap();
        os.touch("include/state.h", 1);
        os.add_dir("include/state");
        os.touch("include/state/detail.h", 1);
        os.touch("libstate.a", 1);
        os.touch("libstate.pc", 1);
        os
    }

    #[test]
    fn install_creates_destinations_and_copies_content() {
        let os = populated();
        install(&os, &sample_install()).unwrap();

        assert_eq!(
            os.contents("/usr/local/bin/state").unwrap(),
            b"\x7fELF payload"
        );
        assert!(os.contents("/usr/local/include/state.h").is_some());
        assert!(os.contents("/usr/local/include/state/detail.h").is_some());
        assert!(os.contents("/usr/local/lib/libstate.a").is_some());
        assert!(os.contents("/usr/local/lib/pkgconfig/libstate.pc").is_some());
    }

    #[test]
    fn install_overwrites_existing_files() {
        let os = populated();
        os.touch("/usr/local/bin/state", 99);
        install(&os, &sample_install()).unwrap();
        assert_eq!(
            os.contents("/usr/local/bin/state").unwrap(),
            b"\x7fELF payload"
        );
    }

    #[test]
    fn install_with_missing_source_fails() {
        let os = FakeOs::new();
        let err = install(&os, &sample_install()).unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }));
    }

    #[test]
    fn uninstall_removes_installed_artifacts() {
        let os = populated();
        install(&os, &sample_install()).unwrap();

        uninstall(&os, &sample_uninstall()).unwrap();
        assert!(os.contents("/usr/local/bin/state").is_none());
        assert!(os.contents("/usr/local/include/state.h").is_none());
        assert!(os.contents("/usr/local/include/state/detail.h").is_none());
        assert!(os.contents("/usr/local/lib/libstate.a").is_none());
        assert!(os.contents("/usr/local/lib/pkgconfig/libstate.pc").is_none());
    }

    #[test]
    fn install_copies_on_the_real_filesystem() {
        use crate::os::HostOs;
        use std::fs;

        let tmp = tempfile::tempdir().unwrap();
        let root = Path::from(tmp.path().to_string_lossy());
        fs::create_dir_all(tmp.path().join("build")).unwrap();
        fs::write(tmp.path().join("build/state"), b"\x7fELF payload").unwrap();
        fs::write(tmp.path().join("libstate.a"), b"!<arch>").unwrap();
        fs::write(tmp.path().join("libstate.pc"), b"Name: libstate").unwrap();

        let cfg = InstallConfig {
            bin_src: root.join("build/state"),
            bin_dest: root.join("prefix/bin"),
            includes: vec![],
            inc_dest: root.join("prefix/include"),
            lib_src: root.join("libstate.a"),
            lib_dest: root.join("prefix/lib"),
            pc_src: root.join("libstate.pc"),
            pc_dest: root.join("prefix/lib/pkgconfig"),
        };
        install(&HostOs, &cfg).unwrap();

        let installed = fs::read(tmp.path().join("prefix/bin/state")).unwrap();
        assert_eq!(installed, b"\x7fELF payload");
        assert!(tmp.path().join("prefix/lib/pkgconfig/libstate.pc").is_file());
    }

    #[test]
    fn uninstall_skips_includes_that_were_never_installed() {
        let os = populated();
        install(&os, &sample_install()).unwrap();

        // a header file that disappeared since installation is a no-op
        let header = Path::from("/usr/local/include/state.h");
        os.remove_file(&header).unwrap();

        uninstall(&os, &sample_uninstall()).unwrap();
        assert!(os.contents("/usr/local/lib/libstate.a").is_none());
        assert!(os.contents("/usr/local/lib/pkgconfig/libstate.pc").is_none());
    }

    #[test]
    fn uninstall_tolerates_missing_binary_but_not_missing_library() {
        let os = populated();
        install(&os, &sample_install()).unwrap();

        let bin = Path::from("/usr/local/bin/state");
        os.remove_file(&bin).unwrap();
        let lib = Path::from("/usr/local/lib/libstate.a");
        os.remove_file(&lib).unwrap();

        let err = uninstall(&os, &sample_uninstall()).unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }));
    }
}
