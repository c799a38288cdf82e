use std::mem;
use std::sync::{Arc, OnceLock};

use num_bigint::BigInt;

use crate::environment::Env;
use crate::term::{FunctionDef, Term};

pub const TRUE_TAG: &str = "true";
pub const FALSE_TAG: &str = "false";

/// A runtime value. Composite values share their children through `Arc` and
/// are never mutated after construction.
#[derive(Clone)]
pub enum Value {
    Int(Arc<BigInt>),
    Str(String),
    Record(Arc<Vec<Field>>),
    Variant(Arc<VariantValue>),
    Vector(Arc<Vec<Value>>),
    Continuation(Arc<ContinuationClosure>),
    /// The top-level continuation. Applying it ends evaluation.
    Halt,
    Function(Arc<FunctionClosure>),
    FunctionGroup(GroupMember),
    Error(String),
}

#[derive(Clone)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

impl Field {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

pub struct VariantValue {
    pub tag: String,
    pub payload: Value,
}

pub struct ContinuationClosure {
    pub env: Env,
    pub param: String,
    pub body: Arc<Term>,
}

pub struct FunctionClosure {
    pub env: Env,
    pub cont_param: String,
    pub param: String,
    pub body: Arc<Term>,
}

/// The definitions bound by one `letF`, together with the environment the
/// `letF` was evaluated in. Siblings are not part of `env`: they are added
/// when a member is resolved, see [`FunctionGroup::member_env`].
pub struct FunctionGroup {
    pub defs: Arc<[FunctionDef]>,
    pub env: Env,
    member_env: OnceLock<Env>,
}

impl FunctionGroup {
    pub fn new(defs: Arc<[FunctionDef]>, env: Env) -> Arc<Self> {
        Arc::new(Self {
            defs,
            env,
            member_env: OnceLock::new(),
        })
    }

    /// The environment every member body runs in: the enclosing environment
    /// with each definition name bound back to this group.
    ///
    /// The bindings are computed on first use and cached with weak
    /// back-references; the returned env holds the group strongly.
    pub fn member_env(self: &Arc<Self>) -> Env {
        self.member_env
            .get_or_init(|| self.env.with_members(self))
            .anchored(self.clone())
    }
}

/// One named member of a [`FunctionGroup`].
#[derive(Clone)]
pub struct GroupMember {
    pub group: Arc<FunctionGroup>,
    pub index: usize,
}

impl GroupMember {
    pub fn name(&self) -> &str {
        &self.group.defs[self.index].name
    }

    pub fn resolve(&self) -> FunctionClosure {
        let def = &self.group.defs[self.index];
        FunctionClosure {
            env: self.group.member_env(),
            cont_param: def.cont_param.clone(),
            param: def.param.clone(),
            body: def.body.clone(),
        }
    }
}

impl Value {
    pub fn int(value: impl Into<BigInt>) -> Self {
        Value::Int(Arc::new(value.into()))
    }

    pub fn str(value: impl Into<String>) -> Self {
        Value::Str(value.into())
    }

    pub fn record(fields: Vec<Field>) -> Self {
        Value::Record(Arc::new(fields))
    }

    /// The empty record, used as the unit value.
    pub fn unit() -> Self {
        Value::Record(Arc::new(Vec::new()))
    }

    pub fn variant(tag: impl Into<String>, payload: Value) -> Self {
        Value::Variant(Arc::new(VariantValue {
            tag: tag.into(),
            payload,
        }))
    }

    pub fn vector(items: Vec<Value>) -> Self {
        Value::Vector(Arc::new(items))
    }

    pub fn bool(value: bool) -> Self {
        let tag = if value { TRUE_TAG } else { FALSE_TAG };
        Value::variant(tag, Value::unit())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Value::Error(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn is_closure(&self) -> bool {
        matches!(
            self,
            Value::Continuation(_) | Value::Halt | Value::Function(_) | Value::FunctionGroup(_)
        )
    }

    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Value::Int(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Looks up the first field called `name`.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Record(fields) => fields
                .iter()
                .find(|field| field.name == name)
                .map(|field| &field.value),
            _ => None,
        }
    }
}

impl Drop for ContinuationClosure {
    fn drop(&mut self) {
        release(mem::take(&mut self.env));
    }
}

impl Drop for FunctionClosure {
    fn drop(&mut self) {
        release(mem::take(&mut self.env));
    }
}

impl Drop for FunctionGroup {
    fn drop(&mut self) {
        release(mem::take(&mut self.env));
        if let Some(env) = self.member_env.take() {
            release(env);
        }
    }
}

/// Drops `env` without recursing through the closures it reaches.
///
/// A chain of pending continuations nests one captured env per link, so the
/// default drop glue would use native stack proportional to its length.
/// Instead, every closure, group or composite whose last reference is held
/// here is unpacked onto a work list before it is dropped.
fn release(env: Env) {
    let mut envs = vec![env];
    let mut values: Vec<Value> = Vec::new();
    loop {
        if let Some(env) = envs.pop() {
            let (held, anchors) = env.into_parts();
            values.extend(held);
            for group in anchors {
                if let Some(mut group) = Arc::into_inner(group) {
                    envs.push(mem::take(&mut group.env));
                    envs.extend(group.member_env.take());
                }
            }
            continue;
        }
        let Some(value) = values.pop() else {
            break;
        };
        match value {
            Value::Continuation(closure) => {
                if let Some(mut closure) = Arc::into_inner(closure) {
                    envs.push(mem::take(&mut closure.env));
                }
            }
            Value::Function(closure) => {
                if let Some(mut closure) = Arc::into_inner(closure) {
                    envs.push(mem::take(&mut closure.env));
                }
            }
            Value::FunctionGroup(member) => {
                if let Some(mut group) = Arc::into_inner(member.group) {
                    envs.push(mem::take(&mut group.env));
                    envs.extend(group.member_env.take());
                }
            }
            Value::Record(fields) => {
                if let Some(fields) = Arc::into_inner(fields) {
                    values.extend(fields.into_iter().map(|field| field.value));
                }
            }
            Value::Variant(variant) => {
                if let Some(variant) = Arc::into_inner(variant) {
                    values.push(variant.payload);
                }
            }
            Value::Vector(items) => {
                if let Some(items) = Arc::into_inner(items) {
                    values.extend(items);
                }
            }
            Value::Int(_) | Value::Str(_) | Value::Halt | Value::Error(_) => {}
        }
    }
}
