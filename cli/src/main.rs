use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use picomake::Build;
use picomake::config::{BinConfig, BuildConfig, InstallConfig, LibConfig, UninstallConfig};
use picomake::os::HostOs;
use picomake::path::Path;

mod cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let args = cli::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            let code = err
                .downcast_ref::<picomake::Error>()
                .map(picomake::Error::exit_code)
                .unwrap_or(2);
            ExitCode::from(code)
        }
    }
}

fn run(args: &cli::Args) -> anyhow::Result<()> {
    let cc = resolve_tool(&args.cc)?;
    let ar = resolve_tool(&args.ar)?;

    let pc_content = match &args.pc_template {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading pkg-config template {}", path.display()))?,
        None => String::new(),
    };

    let lib = Path::from(&args.lib);
    let bin = Path::from(&args.bin);
    let pc = Path::from(&args.pc);
    let includes: Vec<Path> = args.includes.iter().map(Path::from).collect();

    let config = BuildConfig {
        lib: LibConfig {
            cc: cc.clone(),
            cflags: args.cflags.clone(),
            ar,
            ar_flags: args.ar_flags.clone(),
            sources: args.sources.clone(),
            lib: lib.clone(),
            pc: pc.clone(),
            pc_content,
        },
        bin: BinConfig {
            cc,
            cflags: args.cflags.clone(),
            sources: args.bin_sources.clone(),
            bin: bin.clone(),
            libs: args.libs.clone(),
        },
    };

    let prefix = Path::from(args.prefix.to_string_lossy());
    let bin_dir = prefix.join("bin");
    let inc_dir = prefix.join("include");
    let lib_dir = prefix.join("lib");
    let pc_dir = prefix.join("lib/pkgconfig");

    let install = InstallConfig {
        bin_src: bin.clone(),
        bin_dest: bin_dir.clone(),
        includes: includes.clone(),
        inc_dest: inc_dir.clone(),
        lib_src: lib.clone(),
        lib_dest: lib_dir.clone(),
        pc_src: pc.clone(),
        pc_dest: pc_dir.clone(),
    };
    let uninstall = UninstallConfig {
        bin: bin.file_name().into(),
        bin_dir,
        includes: includes.iter().map(|p| p.file_name().into()).collect(),
        inc_dir,
        lib: lib.file_name().into(),
        lib_dir,
        pc: pc.file_name().into(),
        pc_dir,
    };

    let build = Build::new(HostOs, config, install, uninstall)?;
    build.invoke(&args.task.to_string())?;
    Ok(())
}

/// Bare tool names are looked up on PATH; anything with a separator is
/// taken as given.
fn resolve_tool(name: &str) -> anyhow::Result<Path> {
    if name.contains('/') {
        return Ok(Path::from(name));
    }
    let found = which::which(name).with_context(|| format!("'{name}' not found in PATH"))?;
    Ok(Path::from(found.to_string_lossy()))
}
