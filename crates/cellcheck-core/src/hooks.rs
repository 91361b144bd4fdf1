//! Host-side hook plumbing.
//!
//! A host (notebook kernel, REPL, replay driver) exposes a pre-run event,
//! an input transformer chain and named line magics through [`HostShell`].
//! [`EventHooks`] is a ready-made registry hosts can embed.

use std::collections::HashMap;
use tracing::debug;

/// Handle returned when a hook is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(pub u64);

/// What the host knows about a fragment before it runs.
#[derive(Debug, Clone, Copy)]
pub struct CellInfo<'a> {
    /// Fragment text exactly as submitted
    pub raw_cell: &'a str,
}

pub type PreRunHook = Box<dyn FnMut(&CellInfo<'_>)>;
pub type InputTransformer = Box<dyn FnMut(&str) -> String>;
pub type LineMagic = Box<dyn FnMut(&str)>;

/// Subscription surface a host offers to extensions.
pub trait HostShell {
    fn register_pre_run(&mut self, hook: PreRunHook) -> HookId;

    /// Returns false if `id` was not registered.
    fn unregister_pre_run(&mut self, id: HookId) -> bool;

    fn register_transformer(&mut self, transformer: InputTransformer) -> HookId;

    fn unregister_transformer(&mut self, id: HookId) -> bool;

    /// Register `magic` under `name`, replacing any previous one.
    fn register_line_magic(&mut self, name: &str, magic: LineMagic);

    fn unregister_line_magic(&mut self, name: &str) -> bool;
}

/// Ordered pre-run hooks, transformers and line magics.
#[derive(Default)]
pub struct EventHooks {
    next_id: u64,
    pre_run: Vec<(HookId, PreRunHook)>,
    transformers: Vec<(HookId, InputTransformer)>,
    magics: HashMap<String, LineMagic>,
}

impl EventHooks {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> HookId {
        self.next_id += 1;
        HookId(self.next_id)
    }

    /// Call every pre-run hook in registration order.
    pub fn fire_pre_run(&mut self, raw_cell: &str) {
        let info = CellInfo { raw_cell };
        for (_, hook) in self.pre_run.iter_mut() {
            hook(&info);
        }
    }

    /// Pass `source` through every transformer in registration order.
    pub fn transform(&mut self, source: &str) -> String {
        self.transformers
            .iter_mut()
            .fold(source.to_string(), |text, (_, transformer)| transformer(&text))
    }

    /// Invoke the magic called `name`. Returns false if none is registered.
    pub fn run_line_magic(&mut self, name: &str, line: &str) -> bool {
        match self.magics.get_mut(name) {
            Some(magic) => {
                magic(line);
                true
            }
            None => {
                debug!(target: "cellcheck::session", "No line magic named {}", name);
                false
            }
        }
    }

    pub fn pre_run_count(&self) -> usize {
        self.pre_run.len()
    }

    pub fn transformer_count(&self) -> usize {
        self.transformers.len()
    }

    pub fn has_line_magic(&self, name: &str) -> bool {
        self.magics.contains_key(name)
    }
}

impl HostShell for EventHooks {
    fn register_pre_run(&mut self, hook: PreRunHook) -> HookId {
        let id = self.allocate_id();
        self.pre_run.push((id, hook));
        id
    }

    fn unregister_pre_run(&mut self, id: HookId) -> bool {
        let before = self.pre_run.len();
        self.pre_run.retain(|(hook_id, _)| *hook_id != id);
        self.pre_run.len() != before
    }

    fn register_transformer(&mut self, transformer: InputTransformer) -> HookId {
        let id = self.allocate_id();
        self.transformers.push((id, transformer));
        id
    }

    fn unregister_transformer(&mut self, id: HookId) -> bool {
        let before = self.transformers.len();
        self.transformers.retain(|(hook_id, _)| *hook_id != id);
        self.transformers.len() != before
    }

    fn register_line_magic(&mut self, name: &str, magic: LineMagic) {
        self.magics.insert(name.to_string(), magic);
    }

    fn unregister_line_magic(&mut self, name: &str) -> bool {
        self.magics.remove(name).is_some()
    }
}
