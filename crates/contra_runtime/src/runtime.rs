use std::sync::Arc;

use crate::builtins::{self, Call};
use crate::config::RuntimeConfig;
use crate::console::Console;
use crate::environment::Env;
use crate::errors::RuntimeError;
use crate::term::{ContRef, Term, ValueExpr};
use crate::trace::{self, TraceEvent};
use crate::values::{
    format_value, ContinuationClosure, Field, FunctionClosure, FunctionGroup, Value,
};
use crate::R;

/// One isolated evaluator: its own configuration, console and root
/// environment.
pub struct Runtime {
    config: RuntimeConfig,
    pub(crate) console: Console,
    root: Env,
    steps: u64,
}

/// Where a continuation position leads.
enum Target {
    Halt,
    Closure(Arc<ContinuationClosure>),
}

impl Runtime {
    pub fn new(config: RuntimeConfig) -> Self {
        Self::with_console(config, Console::stdio())
    }

    pub fn with_console(config: RuntimeConfig, console: Console) -> Self {
        Self {
            config,
            console,
            root: builtins::root_env(),
            steps: 0,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The predefined bindings every program starts from.
    pub fn root_env(&self) -> Env {
        self.root.clone()
    }

    /// Number of evaluation steps taken so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn run(&mut self, term: Arc<Term>) -> R {
        let env = self.root_env();
        self.eval(term, env)
    }

    /// Evaluates `term` in `env` until the halt continuation is applied.
    ///
    /// Applications replace the current term and environment instead of
    /// recursing, so native stack depth stays constant however many
    /// continuations or functions the program applies.
    pub fn eval(&mut self, term: Arc<Term>, env: Env) -> R {
        log::debug!("evaluating {}", term.describe());
        let mut term = term;
        let mut env = env;
        loop {
            self.steps += 1;
            if self.config.trace {
                trace::emit(&TraceEvent::Step {
                    step: self.steps,
                    term: term.describe(),
                });
            }
            let next = match term.as_ref() {
                Term::Halt { arg } => {
                    let value = lookup(&env, &term, arg)?;
                    return Ok(self.finish(value));
                }
                Term::LetV { name, value, body } => {
                    let value = self.eval_value(value, &env, &term)?;
                    env = env.extend(name.clone(), value);
                    body.clone()
                }
                Term::LetC {
                    name,
                    param,
                    cont_body,
                    body,
                } => {
                    let closure = ContinuationClosure {
                        env: env.clone(),
                        param: param.clone(),
                        body: cont_body.clone(),
                    };
                    env = env.extend(name.clone(), Value::Continuation(Arc::new(closure)));
                    body.clone()
                }
                Term::LetF { defs, body } => {
                    let group = FunctionGroup::new(defs.clone(), env.clone());
                    env = group.member_env();
                    body.clone()
                }
                Term::AppC { cont, arg } => {
                    let value = lookup(&env, &term, arg)?;
                    match self.target(&env, &term, cont)? {
                        Target::Halt => return Ok(self.finish(value)),
                        Target::Closure(closure) => {
                            env = closure.env.extend(closure.param.clone(), value);
                            closure.body.clone()
                        }
                    }
                }
                Term::AppF { func, cont, arg } => {
                    let callee = lookup(&env, &term, func)?;
                    let resolved;
                    let closure: &FunctionClosure = match &callee {
                        Value::Function(closure) => closure.as_ref(),
                        Value::FunctionGroup(member) => {
                            resolved = member.resolve();
                            &resolved
                        }
                        other => {
                            return Err(RuntimeError::NotAClosure {
                                term: term.describe(),
                                name: func.clone(),
                                found: format_value(other),
                            })
                        }
                    };
                    let cont_value = match self.target(&env, &term, cont)? {
                        Target::Halt => Value::Halt,
                        Target::Closure(closure) => Value::Continuation(closure),
                    };
                    let value = lookup(&env, &term, arg)?;
                    env = closure
                        .env
                        .extend(closure.cont_param.clone(), cont_value)
                        .extend(closure.param.clone(), value);
                    closure.body.clone()
                }
                Term::CaseV { scrutinee, cases } => {
                    let variant = match lookup(&env, &term, scrutinee)? {
                        Value::Variant(variant) => variant,
                        other => {
                            return Err(RuntimeError::NotAVariant {
                                term: term.describe(),
                                name: scrutinee.clone(),
                                found: format_value(&other),
                            })
                        }
                    };
                    let case = cases
                        .iter()
                        .find(|case| case.tag == variant.tag)
                        .ok_or_else(|| RuntimeError::NoMatchingCase {
                            term: term.describe(),
                            tag: variant.tag.clone(),
                        })?;
                    let cont = ContRef::Named(case.cont.clone());
                    match self.target(&env, &term, &cont)? {
                        Target::Halt => return Ok(self.finish(variant.payload.clone())),
                        Target::Closure(closure) => {
                            env = closure
                                .env
                                .extend(closure.param.clone(), variant.payload.clone());
                            closure.body.clone()
                        }
                    }
                }
            };
            term = next;
        }
    }

    fn target(&self, env: &Env, term: &Term, cont: &ContRef) -> Result<Target, RuntimeError> {
        let name = match cont {
            ContRef::Halt => return Ok(Target::Halt),
            ContRef::Named(name) if *name == self.config.halt => return Ok(Target::Halt),
            ContRef::Named(name) => name,
        };
        match lookup(env, term, name)? {
            Value::Halt => Ok(Target::Halt),
            Value::Continuation(closure) => Ok(Target::Closure(closure)),
            other => Err(RuntimeError::NotAClosure {
                term: term.describe(),
                name: name.clone(),
                found: format_value(&other),
            }),
        }
    }

    fn eval_value(&mut self, expr: &ValueExpr, env: &Env, term: &Term) -> R {
        match expr {
            ValueExpr::Int(value) => Ok(Value::int(value.clone())),
            ValueExpr::Str(value) => Ok(Value::str(value.clone())),
            ValueExpr::Record(fields) => {
                let mut values = Vec::with_capacity(fields.len());
                for field in fields {
                    let value = lookup(env, term, &field.arg)?;
                    if value.is_error() {
                        return Ok(value);
                    }
                    values.push(Field::new(field.name.clone(), value));
                }
                Ok(Value::record(values))
            }
            ValueExpr::Variant { tag, arg } => {
                let payload = lookup(env, term, arg)?;
                if payload.is_error() {
                    return Ok(payload);
                }
                Ok(Value::variant(tag.clone(), payload))
            }
            ValueExpr::Vector(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    let value = lookup(env, term, item)?;
                    if value.is_error() {
                        return Ok(value);
                    }
                    values.push(value);
                }
                Ok(Value::vector(values))
            }
            ValueExpr::Function {
                cont_param,
                param,
                body,
            } => Ok(Value::Function(Arc::new(FunctionClosure {
                env: env.clone(),
                cont_param: cont_param.clone(),
                param: param.clone(),
                body: body.clone(),
            }))),
            ValueExpr::Prim { prim, args } => {
                let call = Call {
                    term,
                    prim,
                    env,
                    args,
                };
                builtins::invoke(self, &call)
            }
        }
    }

    fn finish(&self, value: Value) -> Value {
        log::debug!("halted after {} steps", self.steps);
        if self.config.trace {
            trace::emit(&TraceEvent::Halt {
                steps: self.steps,
                value: format_value(&value),
            });
        }
        value
    }
}

pub(crate) fn lookup(env: &Env, term: &Term, name: &str) -> R {
    env.get(name).ok_or_else(|| RuntimeError::UnboundName {
        term: term.describe(),
        name: name.to_string(),
    })
}
