use std::sync::{Arc, Weak};

use im::{HashMap as ImHashMap, Vector as ImVector};

use crate::values::{FunctionGroup, GroupMember, Value};

#[derive(Clone)]
enum Binding {
    Value(Value),
    /// A `letF` member as seen from its group's own member environment. Held
    /// weakly so the group can cache that environment; some `anchors` entry
    /// of every env that can reach this binding keeps the group alive.
    Member(Weak<FunctionGroup>, usize),
}

/// Persistent name to value bindings. Cloning is cheap and `extend` never
/// changes what an existing clone sees.
#[derive(Clone, Default)]
pub struct Env {
    bindings: ImHashMap<String, Binding>,
    anchors: ImVector<Arc<FunctionGroup>>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        match self.bindings.get(name)? {
            Binding::Value(value) => Some(value.clone()),
            Binding::Member(group, index) => group.upgrade().map(|group| {
                Value::FunctionGroup(GroupMember {
                    group,
                    index: *index,
                })
            }),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn extend(&self, name: impl Into<String>, value: Value) -> Env {
        Env {
            bindings: self.bindings.update(name.into(), Binding::Value(value)),
            anchors: self.anchors.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// This env with every definition of `group` bound weakly back to it.
    /// The result must only escape through [`Env::anchored`].
    pub(crate) fn with_members(&self, group: &Arc<FunctionGroup>) -> Env {
        let weak = Arc::downgrade(group);
        let bindings = group
            .defs
            .iter()
            .enumerate()
            .fold(self.bindings.clone(), |bindings, (index, def)| {
                bindings.update(def.name.clone(), Binding::Member(weak.clone(), index))
            });
        Env {
            bindings,
            anchors: self.anchors.clone(),
        }
    }

    pub(crate) fn anchored(&self, group: Arc<FunctionGroup>) -> Env {
        let mut anchors = self.anchors.clone();
        anchors.push_back(group);
        Env {
            bindings: self.bindings.clone(),
            anchors,
        }
    }

    /// Consumes the env, handing back the values and groups it held.
    pub(crate) fn into_parts(self) -> (Vec<Value>, Vec<Arc<FunctionGroup>>) {
        let values = self
            .bindings
            .into_iter()
            .filter_map(|(_, binding)| match binding {
                Binding::Value(value) => Some(value),
                Binding::Member(..) => None,
            })
            .collect();
        (values, self.anchors.into_iter().collect())
    }
}
