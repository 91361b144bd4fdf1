//! A minimal host that executes nothing and records what it would run.

use cellcheck_core::hooks::{EventHooks, HookId, HostShell, InputTransformer, LineMagic, PreRunHook};
use tracing::debug;

/// Replays cells through registered hooks, like a notebook kernel would.
///
/// For each cell the pre-run event fires first, then `%name args` lines are
/// dispatched to line magics, then the input transformers run. The result
/// is recorded as the executed source.
#[derive(Default)]
pub struct ReplayShell {
    hooks: EventHooks,
    executed: Vec<String>,
}

impl ReplayShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one cell and return the source that would be executed.
    pub fn run_cell(&mut self, raw_cell: &str) -> String {
        self.hooks.fire_pre_run(raw_cell);

        let mut lines = Vec::new();
        for line in raw_cell.split('\n') {
            match parse_magic(line) {
                Some((indent, name, args)) if self.hooks.has_line_magic(name) => {
                    debug!(target: "cellcheck::session", "Line magic %{} {}", name, args);
                    self.hooks.run_line_magic(name, args);
                    lines.push(format!(
                        "{}get_ipython().run_line_magic({:?}, {:?})",
                        indent, name, args
                    ));
                }
                _ => lines.push(line.to_string()),
            }
        }

        let executed = self.hooks.transform(&lines.join("\n"));
        self.executed.push(executed.clone());
        executed
    }

    /// Sources recorded by [`run_cell`](Self::run_cell), in order.
    pub fn executed(&self) -> &[String] {
        &self.executed
    }
}

/// Split `  %name args` into indentation, name and arguments.
fn parse_magic(line: &str) -> Option<(&str, &str, &str)> {
    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];
    let rest = body.strip_prefix('%')?;
    if rest.starts_with('%') {
        return None;
    }
    let (name, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    if name.is_empty() {
        return None;
    }
    Some((indent, name, args.trim()))
}

impl HostShell for ReplayShell {
    fn register_pre_run(&mut self, hook: PreRunHook) -> HookId {
        self.hooks.register_pre_run(hook)
    }

    fn unregister_pre_run(&mut self, id: HookId) -> bool {
        self.hooks.unregister_pre_run(id)
    }

    fn register_transformer(&mut self, transformer: InputTransformer) -> HookId {
        self.hooks.register_transformer(transformer)
    }

    fn unregister_transformer(&mut self, id: HookId) -> bool {
        self.hooks.unregister_transformer(id)
    }

    fn register_line_magic(&mut self, name: &str, magic: LineMagic) {
        self.hooks.register_line_magic(name, magic)
    }

    fn unregister_line_magic(&mut self, name: &str) -> bool {
        self.hooks.unregister_line_magic(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_parse_magic() {
        assert_eq!(parse_magic("%cellcheck Off"), Some(("", "cellcheck", "Off")));
        assert_eq!(parse_magic("  %time"), Some(("  ", "time", "")));
        assert_eq!(parse_magic("%%time"), None);
        assert_eq!(parse_magic("x = 1 % 2"), None);
        assert_eq!(parse_magic("% "), None);
    }

    #[test]
    fn test_pre_run_sees_raw_cell_before_magics() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut shell = ReplayShell::new();

        let pre_run_log = Rc::clone(&log);
        shell.register_pre_run(Box::new(move |info| {
            pre_run_log.borrow_mut().push(format!("pre:{}", info.raw_cell))
        }));
        let magic_log = Rc::clone(&log);
        shell.register_line_magic("demo", Box::new(move |args| magic_log.borrow_mut().push(format!("magic:{}", args))));

        let executed = shell.run_cell("%demo On\nx = 1");
        assert_eq!(*log.borrow(), vec!["pre:%demo On\nx = 1", "magic:On"]);
        assert_eq!(executed, "get_ipython().run_line_magic(\"demo\", \"On\")\nx = 1");
    }

    #[test]
    fn test_unknown_magic_left_in_place() {
        let mut shell = ReplayShell::new();
        assert_eq!(shell.run_cell("%matplotlib inline"), "%matplotlib inline");
        assert_eq!(shell.executed(), ["%matplotlib inline"]);
    }
}
