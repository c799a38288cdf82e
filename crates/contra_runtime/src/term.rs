//! The CPS intermediate representation consumed by the evaluator.
//!
//! Terms are immutable trees. Sub-terms that closures may capture are held in
//! `Arc` so a closure can keep its body alive independently of the tree.

use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;

pub enum Term {
    Halt {
        arg: String,
    },
    LetV {
        name: String,
        value: ValueExpr,
        body: Arc<Term>,
    },
    LetC {
        name: String,
        param: String,
        cont_body: Arc<Term>,
        body: Arc<Term>,
    },
    LetF {
        defs: Arc<[FunctionDef]>,
        body: Arc<Term>,
    },
    AppC {
        cont: ContRef,
        arg: String,
    },
    AppF {
        func: String,
        cont: ContRef,
        arg: String,
    },
    CaseV {
        scrutinee: String,
        cases: Vec<Case>,
    },
}

/// A continuation position: either the halt continuation itself or a name
/// bound to a continuation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContRef {
    Halt,
    Named(String),
}

pub struct FunctionDef {
    pub name: String,
    pub cont_param: String,
    pub param: String,
    pub body: Arc<Term>,
}

#[derive(Clone, Debug)]
pub struct Case {
    pub tag: String,
    pub cont: String,
}

pub enum ValueExpr {
    Int(BigInt),
    Str(String),
    Record(Vec<FieldExpr>),
    Variant {
        tag: String,
        arg: String,
    },
    Vector(Vec<String>),
    Function {
        cont_param: String,
        param: String,
        body: Arc<Term>,
    },
    Prim {
        prim: Primitive,
        args: Vec<String>,
    },
}

#[derive(Clone, Debug)]
pub struct FieldExpr {
    pub name: String,
    pub arg: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Primitive {
    /// `args[0]` names the record, `args[1]` is the field name itself.
    RecSelect,
    RecConcat,
    Capability(CapabilityKind),
    ReaderRead { resource: String },
    WriterWrite { resource: String },
    Argument { index: usize },
    Int(IntOp),
    Equal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapabilityKind {
    Reader,
    Writer,
    ReaderWriter,
}

impl CapabilityKind {
    pub fn name(self) -> &'static str {
        match self {
            CapabilityKind::Reader => "Reader",
            CapabilityKind::Writer => "Writer",
            CapabilityKind::ReaderWriter => "ReaderWriter",
        }
    }

    pub fn reads(self) -> bool {
        matches!(self, CapabilityKind::Reader | CapabilityKind::ReaderWriter)
    }

    pub fn writes(self) -> bool {
        matches!(self, CapabilityKind::Writer | CapabilityKind::ReaderWriter)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl IntOp {
    pub const ALL: [IntOp; 10] = [
        IntOp::Add,
        IntOp::Sub,
        IntOp::Mul,
        IntOp::Div,
        IntOp::Mod,
        IntOp::Pow,
        IntOp::Lt,
        IntOp::Lte,
        IntOp::Gt,
        IntOp::Gte,
    ];

    pub fn name(self) -> &'static str {
        match self {
            IntOp::Add => "add",
            IntOp::Sub => "sub",
            IntOp::Mul => "mul",
            IntOp::Div => "div",
            IntOp::Mod => "mod",
            IntOp::Pow => "pow",
            IntOp::Lt => "lt",
            IntOp::Lte => "lte",
            IntOp::Gt => "gt",
            IntOp::Gte => "gte",
        }
    }
}

impl Primitive {
    pub fn arity(&self) -> usize {
        match self {
            Primitive::Argument { .. } => 0,
            Primitive::Capability(_)
            | Primitive::ReaderRead { .. }
            | Primitive::WriterWrite { .. } => 1,
            Primitive::RecSelect | Primitive::RecConcat | Primitive::Int(_) | Primitive::Equal => 2,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::RecSelect => write!(f, "select"),
            Primitive::RecConcat => write!(f, "concat"),
            Primitive::Capability(kind) => write!(f, "cap {}", kind.name()),
            Primitive::ReaderRead { resource } => write!(f, "readerRead {resource}"),
            Primitive::WriterWrite { resource } => write!(f, "writerWrite {resource}"),
            Primitive::Argument { index } => write!(f, "arg {index}"),
            Primitive::Int(op) => write!(f, "Ints.{}", op.name()),
            Primitive::Equal => write!(f, "equal"),
        }
    }
}

impl fmt::Display for ContRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContRef::Halt => write!(f, "halt"),
            ContRef::Named(name) => write!(f, "{name}"),
        }
    }
}

impl Term {
    /// Short identity of this node, used in diagnostics and traces.
    pub fn describe(&self) -> String {
        match self {
            Term::Halt { arg } => format!("halt {arg}"),
            Term::LetV { name, value, .. } => format!("letV {name} = {}", value.describe()),
            Term::LetC { name, param, .. } => format!("letC {name} {param}"),
            Term::LetF { defs, .. } => {
                let names = defs
                    .iter()
                    .map(|def| def.name.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("letF {names}")
            }
            Term::AppC { cont, arg } => format!("appC {cont} {arg}"),
            Term::AppF { func, cont, arg } => format!("appF {func} {cont} {arg}"),
            Term::CaseV { scrutinee, .. } => format!("casV {scrutinee}"),
        }
    }

    pub fn halt(arg: impl Into<String>) -> Arc<Term> {
        Arc::new(Term::Halt { arg: arg.into() })
    }

    pub fn let_v(name: impl Into<String>, value: ValueExpr, body: Arc<Term>) -> Arc<Term> {
        Arc::new(Term::LetV {
            name: name.into(),
            value,
            body,
        })
    }

    pub fn let_c(
        name: impl Into<String>,
        param: impl Into<String>,
        cont_body: Arc<Term>,
        body: Arc<Term>,
    ) -> Arc<Term> {
        Arc::new(Term::LetC {
            name: name.into(),
            param: param.into(),
            cont_body,
            body,
        })
    }

    pub fn let_f(defs: Vec<FunctionDef>, body: Arc<Term>) -> Arc<Term> {
        Arc::new(Term::LetF {
            defs: defs.into(),
            body,
        })
    }

    pub fn app_c(cont: impl Into<String>, arg: impl Into<String>) -> Arc<Term> {
        Arc::new(Term::AppC {
            cont: ContRef::Named(cont.into()),
            arg: arg.into(),
        })
    }

    pub fn app_halt(arg: impl Into<String>) -> Arc<Term> {
        Arc::new(Term::AppC {
            cont: ContRef::Halt,
            arg: arg.into(),
        })
    }

    pub fn app_f(
        func: impl Into<String>,
        cont: ContRef,
        arg: impl Into<String>,
    ) -> Arc<Term> {
        Arc::new(Term::AppF {
            func: func.into(),
            cont,
            arg: arg.into(),
        })
    }

    pub fn case_v(scrutinee: impl Into<String>, cases: Vec<Case>) -> Arc<Term> {
        Arc::new(Term::CaseV {
            scrutinee: scrutinee.into(),
            cases,
        })
    }
}

impl ContRef {
    pub fn named(name: impl Into<String>) -> Self {
        ContRef::Named(name.into())
    }
}

impl FunctionDef {
    pub fn new(
        name: impl Into<String>,
        cont_param: impl Into<String>,
        param: impl Into<String>,
        body: Arc<Term>,
    ) -> Self {
        Self {
            name: name.into(),
            cont_param: cont_param.into(),
            param: param.into(),
            body,
        }
    }
}

impl Case {
    pub fn new(tag: impl Into<String>, cont: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            cont: cont.into(),
        }
    }
}

impl ValueExpr {
    pub fn int(value: impl Into<BigInt>) -> Self {
        ValueExpr::Int(value.into())
    }

    pub fn str(value: impl Into<String>) -> Self {
        ValueExpr::Str(value.into())
    }

    pub fn record(fields: &[(&str, &str)]) -> Self {
        ValueExpr::Record(
            fields
                .iter()
                .map(|(name, arg)| FieldExpr {
                    name: name.to_string(),
                    arg: arg.to_string(),
                })
                .collect(),
        )
    }

    pub fn variant(tag: impl Into<String>, arg: impl Into<String>) -> Self {
        ValueExpr::Variant {
            tag: tag.into(),
            arg: arg.into(),
        }
    }

    pub fn vector(items: &[&str]) -> Self {
        ValueExpr::Vector(items.iter().map(|item| item.to_string()).collect())
    }

    pub fn function(
        cont_param: impl Into<String>,
        param: impl Into<String>,
        body: Arc<Term>,
    ) -> Self {
        ValueExpr::Function {
            cont_param: cont_param.into(),
            param: param.into(),
            body,
        }
    }

    pub fn prim(prim: Primitive, args: &[&str]) -> Self {
        ValueExpr::Prim {
            prim,
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ValueExpr::Int(value) => value.to_string(),
            ValueExpr::Str(_) => "string".to_string(),
            ValueExpr::Record(_) => "record".to_string(),
            ValueExpr::Variant { tag, .. } => format!("<<{tag}>>"),
            ValueExpr::Vector(_) => "vector".to_string(),
            ValueExpr::Function { .. } => "fun".to_string(),
            ValueExpr::Prim { prim, args } => {
                if args.is_empty() {
                    format!("prim {prim}")
                } else {
                    format!("prim {prim} {}", args.join(" "))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_names_the_node_and_its_operands() {
        assert_eq!(Term::app_c("k", "x").describe(), "appC k x");
        assert_eq!(Term::app_halt("x").describe(), "appC halt x");
        assert_eq!(
            Term::app_f("f", ContRef::named("k"), "x").describe(),
            "appF f k x"
        );
        let select = Term::let_v(
            "y",
            ValueExpr::prim(Primitive::RecSelect, &["r", "a"]),
            Term::halt("y"),
        );
        assert_eq!(select.describe(), "letV y = prim select r a");
    }

    #[test]
    fn arity_matches_operand_shape() {
        assert_eq!(Primitive::Argument { index: 0 }.arity(), 0);
        assert_eq!(Primitive::Capability(CapabilityKind::Reader).arity(), 1);
        assert_eq!(Primitive::Int(IntOp::Add).arity(), 2);
    }
}
