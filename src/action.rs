use std::rc::Rc;

use log::info;

use crate::error::{Error, Result};
use crate::os::Os;
use crate::path::Path;

/// The procedure attached to a target, run only when the target must be
/// (re)built. Actions hold their own parameters; the runner supplies the
/// process and filesystem plumbing.
pub type Action = Box<dyn Fn(&Runner) -> Result<()>>;

/// Executes actions for the task graph. Every external process failure is
/// fatal to the whole build: no retry, no continuation to sibling targets.
pub struct Runner {
    os: Rc<dyn Os>,
}

impl Runner {
    pub(crate) fn new(os: Rc<dyn Os>) -> Self {
        Self { os }
    }

    pub fn os(&self) -> &dyn Os {
        self.os.as_ref()
    }

    /// Runs an external command, echoing it first the way the original
    /// tool does. A non-zero exit status aborts the build with the child's
    /// status and captured stderr.
    pub fn sh<S: AsRef<str>>(&self, program: &Path, args: &[S]) -> Result<()> {
        let args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();

        let mut command = program.as_ref().to_string();
        for arg in &args {
            command.push(' ');
            command.push_str(arg);
        }
        info!("{command}");

        let output = self
            .os
            .run_command(program, &args)
            .map_err(|e| Error::fs(program, e))?;

        if output.returncode != 0 {
            return Err(Error::ActionFailed {
                command,
                code: output.returncode,
                stderr: output.stderr,
            });
        }
        Ok(())
    }

    /// Writes `content` verbatim; no templating is performed.
    pub fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        info!("write {path}");
        self.os
            .write_file(path, content.as_bytes())
            .map_err(|e| Error::fs(path, e))
    }
}
