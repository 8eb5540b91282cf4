use std::rc::Rc;

use hashbrown::HashMap;
use log::debug;

use crate::action::{Action, Runner};
use crate::error::{Error, Result};
use crate::os::Os;
use crate::path::Path;
use crate::stale::is_stale;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetKind {
    /// Groups other targets under a name; its action is never gated on a
    /// timestamp and runs every time the target is invoked.
    Task,
    /// Produces the file named by the target; its action runs only when
    /// the file is stale relative to its prerequisites.
    File,
}

pub struct Target {
    name: String,
    kind: TargetKind,
    prereqs: Vec<String>,
    action: Option<Action>,
}

impl Target {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn prereqs(&self) -> &[String] {
        &self.prereqs
    }
}

/// An explicit task graph owned by the caller. Prerequisite names that
/// match no registered target are treated as plain file dependencies:
/// they contribute their modification time to staleness checks but are
/// never visited as targets.
#[derive(Default)]
pub struct BuildGraph {
    targets: HashMap<String, Target>,
}

enum Mark {
    Visiting,
    Done,
}

impl BuildGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an aggregate task.
    pub fn task(
        &mut self,
        name: impl Into<String>,
        prereqs: Vec<String>,
        action: Option<Action>,
    ) -> Result<()> {
        self.register(Target {
            name: name.into(),
            kind: TargetKind::Task,
            prereqs,
            action,
        })
    }

    /// Registers a file-producing target named by its output path.
    pub fn file(&mut self, output: &Path, prereqs: Vec<String>, action: Action) -> Result<()> {
        self.register(Target {
            name: output.as_ref().into(),
            kind: TargetKind::File,
            prereqs,
            action: Some(action),
        })
    }

    /// Instantiates a pattern rule: one file target per source carrying
    /// the input extension, with the source as sole prerequisite and an
    /// action built from the matched input/output pair. Sources with a
    /// different extension are skipped.
    pub fn rule(
        &mut self,
        in_ext: &str,
        out_ext: &str,
        sources: &[Path],
        factory: impl Fn(&Path, &Path) -> Action,
    ) -> Result<()> {
        for src in sources {
            if !src.as_ref().ends_with(in_ext) {
                continue;
            }
            let out = src.set_extension(out_ext);
            let action = factory(src, &out);
            self.file(&out, vec![src.as_ref().into()], action)?;
        }
        Ok(())
    }

    fn register(&mut self, target: Target) -> Result<()> {
        if self.targets.contains_key(&target.name) {
            return Err(Error::Config(format!(
                "target '{}' registered twice",
                target.name
            )));
        }
        self.targets.insert(target.name.clone(), target);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Target> {
        self.targets.get(name)
    }

    /// Dependency-first execution order for `name`: post-order traversal,
    /// each target visited once even across diamonds, cycles rejected
    /// before any action runs.
    pub fn resolve(&self, name: &str) -> Result<Vec<&Target>> {
        let Some(root) = self.targets.get(name) else {
            return Err(Error::UnknownTarget(name.into()));
        };
        let mut marks = HashMap::new();
        let mut order = Vec::new();
        self.visit(root.name.as_str(), &mut marks, &mut order)?;
        Ok(order)
    }

    fn visit<'a>(
        &'a self,
        name: &'a str,
        marks: &mut HashMap<&'a str, Mark>,
        order: &mut Vec<&'a Target>,
    ) -> Result<()> {
        match marks.get(name) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => return Err(Error::Cycle(name.into())),
            None => {}
        }
        let Some(target) = self.targets.get(name) else {
            // plain file dependency
            return Ok(());
        };
        marks.insert(name, Mark::Visiting);
        for prereq in &target.prereqs {
            self.visit(prereq, marks, order)?;
        }
        marks.insert(name, Mark::Done);
        order.push(target);
        Ok(())
    }

    /// Resolves `name` and runs the stale targets' actions in dependency
    /// order. The first failing action aborts the rest of the list.
    pub fn invoke(&self, os: Rc<dyn Os>, name: &str) -> Result<()> {
        let order = self.resolve(name)?;
        let runner = Runner::new(os.clone());

        for target in order {
            let Some(action) = &target.action else {
                continue;
            };
            if target.kind == TargetKind::File {
                let output = Path::from(&target.name);
                let prereqs: Vec<Path> = target.prereqs.iter().map(Path::from).collect();
                if !is_stale(os.as_ref(), &output, &prereqs)? {
                    debug!("{}: up to date", target.name);
                    continue;
                }
            }
            action(&runner)?;
        }
        Ok(())
    }
}
