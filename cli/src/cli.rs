use std::fmt::Display;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Clone, Debug)]
pub enum Task {
    /// Build the library, link the executable, write the pkg-config file
    All,

    /// Link the executable against the library
    #[value(name = "bin_build")]
    BinBuild,

    /// Copy built artifacts into the install prefix
    Install,

    /// Remove installed artifacts from the install prefix
    Uninstall,
}

impl Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Task::All => "all",
            Task::BinBuild => "bin_build",
            Task::Install => "install",
            Task::Uninstall => "uninstall",
        };
        write!(f, "{s}")
    }
}

#[derive(Parser, Debug)]
#[command(name = "picomake")]
#[command(about = "A small dependency-driven build runner for C static libraries")]
#[command(version)]
pub struct Args {
    /// Task to invoke
    #[arg(value_enum, default_value = "all")]
    pub task: Task,

    /// C compiler
    #[arg(long, value_name = "tool", default_value = "cc")]
    pub cc: String,

    /// Compiler flag (can be used multiple times)
    #[arg(long = "cflag", value_name = "flag")]
    pub cflags: Vec<String>,

    /// Archiver
    #[arg(long, value_name = "tool", default_value = "ar")]
    pub ar: String,

    /// Archiver flag (can be used multiple times)
    #[arg(long = "ar-flag", value_name = "flag", default_value = "rcs")]
    pub ar_flags: Vec<String>,

    /// Library source pattern (can be used multiple times)
    #[arg(long = "src", value_name = "pattern", default_value = "src/*.c")]
    pub sources: Vec<String>,

    /// Executable source pattern (can be used multiple times)
    #[arg(long = "bin-src", value_name = "pattern", default_value = "bin/*.c")]
    pub bin_sources: Vec<String>,

    /// Static library output path
    #[arg(long, value_name = "path", default_value = "libstate.a")]
    pub lib: String,

    /// Executable output path
    #[arg(long, value_name = "path", default_value = "state")]
    pub bin: String,

    /// Extra linker input (can be used multiple times)
    #[arg(
        long = "link",
        value_name = "lib",
        default_value = "-lm",
        allow_hyphen_values = true
    )]
    pub libs: Vec<String>,

    /// pkg-config output path
    #[arg(long, value_name = "path", default_value = "libstate.pc")]
    pub pc: String,

    /// File whose contents are written verbatim to the pkg-config output
    #[arg(long = "pc-template", value_name = "path")]
    pub pc_template: Option<PathBuf>,

    /// Header file or directory to install (can be used multiple times)
    #[arg(long = "include", value_name = "path", default_value = "include")]
    pub includes: Vec<String>,

    /// Installation prefix directory
    #[arg(long, value_name = "dir", default_value = "/usr/local")]
    pub prefix: PathBuf,
}

pub fn parse() -> Args {
    Args::parse()
}
