use std::rc::Rc;

pub mod action;
pub mod config;
pub mod error;
pub mod fileset;
pub mod graph;
pub mod install;
pub mod os;
pub mod path;
pub mod stale;

pub use error::{Error, Result};

use crate::action::{Action, Runner};
use crate::config::{BuildConfig, InstallConfig, UninstallConfig};
use crate::fileset::FileSet;
use crate::graph::BuildGraph;

/// Task invoked when the caller names none.
pub const DEFAULT_TASK: &str = "all";

/// One build definition: a validated configuration plus the platform it
/// runs against. `plan` wires the task graph, `invoke` executes a task.
pub struct Build {
    os: Rc<dyn os::Os>,
    config: BuildConfig,
    install: InstallConfig,
    uninstall: UninstallConfig,
}

impl Build {
    pub fn new(
        os: impl os::Os,
        config: BuildConfig,
        install: InstallConfig,
        uninstall: UninstallConfig,
    ) -> Result<Self> {
        Self::with_os(Rc::new(os), config, install, uninstall)
    }

    pub fn with_os(
        os: Rc<dyn os::Os>,
        config: BuildConfig,
        install: InstallConfig,
        uninstall: UninstallConfig,
    ) -> Result<Self> {
        config.validate()?;
        install.validate()?;
        uninstall.validate()?;
        Ok(Self {
            os,
            config,
            install,
            uninstall,
        })
    }

    /// Constructs the task graph for this configuration:
    ///
    /// - one `.c` -> `.o` compile target per library source;
    /// - the static library, rebuilt when any object is newer;
    /// - `bin_build`, linking the executable against the library;
    /// - `all`, which additionally writes the pkg-config file;
    /// - `install` / `uninstall`, plain artifact copies outside the
    ///   staleness machinery.
    pub fn plan(&self) -> Result<BuildGraph> {
        let mut graph = BuildGraph::new();
        let lib_cfg = &self.config.lib;

        let sources = FileSet::glob(self.os.as_ref(), &lib_cfg.sources)?;
        let objects = sources.with_extension(".o");
        graph.rule(".c", ".o", sources.paths(), |src, obj| {
            let cc = lib_cfg.cc.clone();
            let mut args = lib_cfg.cflags.clone();
            args.push("-c".into());
            args.push(src.as_ref().into());
            args.push("-o".into());
            args.push(obj.as_ref().into());
            Box::new(move |runner: &Runner| runner.sh(&cc, &args))
        })?;
        let object_names: Vec<String> = objects.iter().map(|p| p.as_ref().into()).collect();

        let lib_path = lib_cfg.lib.clone();
        let archive: Action = {
            let ar = lib_cfg.ar.clone();
            let mut args = lib_cfg.ar_flags.clone();
            args.push(lib_path.as_ref().into());
            args.extend(object_names.iter().cloned());
            Box::new(move |runner: &Runner| runner.sh(&ar, &args))
        };
        graph.file(&lib_path, object_names, archive)?;

        let bin_cfg = &self.config.bin;
        let bin_sources = FileSet::glob(self.os.as_ref(), &bin_cfg.sources)?;
        let link: Action = {
            let cc = bin_cfg.cc.clone();
            let mut args = bin_cfg.cflags.clone();
            args.extend(bin_sources.paths().iter().map(|p| p.as_ref().to_string()));
            args.push("-o".into());
            args.push(bin_cfg.bin.as_ref().into());
            args.push(lib_path.as_ref().into());
            args.extend(bin_cfg.libs.iter().cloned());
            Box::new(move |runner: &Runner| runner.sh(&cc, &args))
        };
        graph.task("bin_build", vec![lib_path.as_ref().into()], Some(link))?;

        let write_pc: Action = {
            let pc = lib_cfg.pc.clone();
            let pc_content = lib_cfg.pc_content.clone();
            Box::new(move |runner: &Runner| runner.write_file(&pc, &pc_content))
        };
        graph.task(
            "all",
            vec![lib_path.as_ref().into(), "bin_build".into()],
            Some(write_pc),
        )?;

        let icfg = self.install.clone();
        graph.task(
            "install",
            vec![],
            Some(Box::new(move |runner: &Runner| {
                install::install(runner.os(), &icfg)
            })),
        )?;
        let ucfg = self.uninstall.clone();
        graph.task(
            "uninstall",
            vec![],
            Some(Box::new(move |runner: &Runner| {
                install::uninstall(runner.os(), &ucfg)
            })),
        )?;

        Ok(graph)
    }

    pub fn invoke(&self, task: &str) -> Result<()> {
        let graph = self.plan()?;
        graph.invoke(self.os.clone(), task)
    }
}
