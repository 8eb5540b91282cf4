use log::debug;

use crate::error::{Error, Result};
use crate::os::Os;
use crate::path::Path;

/// Pure staleness query against filesystem metadata.
///
/// Stale means the output is missing, a prerequisite is missing, or a
/// prerequisite is strictly newer than the output. Equal modification
/// times count as up to date, the conventional build-tool tie-break.
pub fn is_stale(os: &dyn Os, output: &Path, prereqs: &[Path]) -> Result<bool> {
    let Some(out_time) = os.mtime(output).map_err(|e| Error::fs(output, e))? else {
        debug!("{output}: stale (missing)");
        return Ok(true);
    };

    for prereq in prereqs {
        match os.mtime(prereq).map_err(|e| Error::fs(prereq, e))? {
            // let the action surface the real error for the missing input
            None => {
                debug!("{output}: stale (missing prerequisite {prereq})");
                return Ok(true);
            }
            Some(time) if out_time < time => {
                debug!("{output}: stale (older than {prereq})");
                return Ok(true);
            }
            Some(_) => {}
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::os::fake::FakeOs;

    fn paths(names: &[&str]) -> Vec<Path> {
        names.iter().map(Path::from).collect()
    }

    #[test]
    fn missing_output_is_stale() {
        let os = FakeOs::new();
        os.touch("src/a.c", 10);
        assert!(is_stale(&os, &Path::from("src/a.o"), &paths(&["src/a.c"])).unwrap());
    }

    #[test]
    fn newer_output_is_current() {
        let os = FakeOs::new();
        os.touch("src/a.c", 10);
        os.touch("src/a.o", 20);
        assert!(!is_stale(&os, &Path::from("src/a.o"), &paths(&["src/a.c"])).unwrap());
    }

    #[test]
    fn equal_mtimes_are_current() {
        let os = FakeOs::new();
        os.touch("src/a.c", 10);
        os.touch("src/a.o", 10);
        assert!(!is_stale(&os, &Path::from("src/a.o"), &paths(&["src/a.c"])).unwrap());
    }

    #[test]
    fn older_output_is_stale() {
        let os = FakeOs::new();
        os.touch("src/a.c", 30);
        os.touch("src/a.o", 20);
        assert!(is_stale(&os, &Path::from("src/a.o"), &paths(&["src/a.c"])).unwrap());
    }

    #[test]
    fn missing_prerequisite_is_stale() {
        let os = FakeOs::new();
        os.touch("src/a.o", 20);
        assert!(is_stale(&os, &Path::from("src/a.o"), &paths(&["src/a.c"])).unwrap());
    }

    #[test]
    fn any_newer_prerequisite_wins() {
        let os = FakeOs::new();
        os.touch("src/a.o", 20);
        os.touch("libstate.a", 25);
        os.touch("src/b.o", 30);
        let prereqs = paths(&["src/a.o", "src/b.o"]);
        assert!(is_stale(&os, &Path::from("libstate.a"), &prereqs).unwrap());
    }
}
