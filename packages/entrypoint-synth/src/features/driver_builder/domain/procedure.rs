//! Driver procedure IR
//!
//! A small three-address form close to Jimple: a flat list of units, each
//! optionally carrying a jump label, plus the locals they use. Branch
//! metadata records which handler sits behind which ordinal guard.

use serde::Serialize;
use std::fmt;

use crate::shared::models::{JavaType, MethodDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LocalId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Label(pub u32);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "label{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Local {
    pub name: String,
    pub ty: JavaType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Constant {
    /// Null/absent placeholder
    Null,
    /// int, short, byte, char and boolean
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Null => write!(f, "null"),
            Constant::Int(v) => write!(f, "{}", v),
            Constant::Long(v) => write!(f, "{}L", v),
            Constant::Float(v) => write!(f, "{:?}F", v),
            Constant::Double(v) => write!(f, "{:?}", v),
            Constant::Str(s) => write!(f, "{:?}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Local(LocalId),
    Constant(Constant),
}

impl Value {
    pub fn null() -> Self {
        Value::Constant(Constant::Null)
    }

    pub fn as_local(&self) -> Option<LocalId> {
        match self {
            Value::Local(id) => Some(*id),
            Value::Constant(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Constant(Constant::Null))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InvokeKind {
    Static,
    Virtual,
    Interface,
    /// Constructor call on a freshly allocated object
    Special,
}

impl InvokeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvokeKind::Static => "staticinvoke",
            InvokeKind::Virtual => "virtualinvoke",
            InvokeKind::Interface => "interfaceinvoke",
            InvokeKind::Special => "specialinvoke",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvokeExpr {
    pub kind: InvokeKind,
    pub method: MethodDescriptor,
    /// Receiver; `None` for static calls
    pub base: Option<LocalId>,
    pub args: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Rvalue {
    Use(Value),
    New(String),
    NewArray { element: JavaType, size: i32 },
    Invoke(InvokeExpr),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    Assign { target: LocalId, value: Rvalue },
    ArrayStore { array: LocalId, index: i32, value: Value },
    Invoke(InvokeExpr),
    /// Falls through into the guarded call site when `counter == ordinal`,
    /// otherwise jumps to `skip_to`
    Guard { counter: LocalId, ordinal: u32, skip_to: Label },
    Goto(Label),
    Nop,
    ReturnVoid,
}

impl Stmt {
    pub fn invoke_expr(&self) -> Option<&InvokeExpr> {
        match self {
            Stmt::Invoke(expr) => Some(expr),
            Stmt::Assign {
                value: Rvalue::Invoke(expr),
                ..
            } => Some(expr),
            _ => None,
        }
    }

    pub fn jump_target(&self) -> Option<Label> {
        match self {
            Stmt::Guard { skip_to, .. } => Some(*skip_to),
            Stmt::Goto(target) => Some(*target),
            _ => None,
        }
    }

    pub(crate) fn retarget(&mut self, from: Label, to: Label) {
        match self {
            Stmt::Guard { skip_to, .. } if *skip_to == from => *skip_to = to,
            Stmt::Goto(target) if *target == from => *target = to,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit {
    pub label: Option<Label>,
    pub stmt: Stmt,
}

/// One dispatch branch of the driver loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchInfo {
    pub ordinal: u32,
    pub method: MethodDescriptor,
    /// The handler's return value is passed to the sink
    pub sink_routed: bool,
}

/// The synthesized entry procedure handed to the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverProcedure {
    pub class_name: String,
    pub method_name: String,
    pub(crate) locals: Vec<Local>,
    pub(crate) units: Vec<Unit>,
    pub(crate) branches: Vec<BranchInfo>,
    pub(crate) taint_local: Option<LocalId>,
    pub(crate) counter_local: Option<LocalId>,
}

impl DriverProcedure {
    pub fn locals(&self) -> &[Local] {
        &self.locals
    }

    pub fn local(&self, id: LocalId) -> &Local {
        &self.locals[id.0 as usize]
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn branches(&self) -> &[BranchInfo] {
        &self.branches
    }

    /// Local holding the shared taint value
    pub fn taint_local(&self) -> Option<LocalId> {
        self.taint_local
    }

    /// Local the ordinal guards compare against
    pub fn counter_local(&self) -> Option<LocalId> {
        self.counter_local
    }

    pub fn invocations(&self) -> impl Iterator<Item = (usize, &InvokeExpr)> {
        self.units
            .iter()
            .enumerate()
            .filter_map(|(i, u)| u.stmt.invoke_expr().map(|e| (i, e)))
    }

    pub fn invoked_methods(&self) -> Vec<&MethodDescriptor> {
        self.invocations().map(|(_, e)| &e.method).collect()
    }

    pub fn label_index(&self, label: Label) -> Option<usize> {
        self.units.iter().position(|u| u.label == Some(label))
    }

    /// Units control may reach directly after unit `index`
    pub fn successors(&self, index: usize) -> Vec<usize> {
        let Some(unit) = self.units.get(index) else {
            return Vec::new();
        };
        let next = (index + 1 < self.units.len()).then_some(index + 1);
        match &unit.stmt {
            Stmt::ReturnVoid => Vec::new(),
            Stmt::Goto(target) => self.label_index(*target).into_iter().collect(),
            Stmt::Guard { skip_to, .. } => {
                let mut out: Vec<usize> = next.into_iter().collect();
                if let Some(target) = self.label_index(*skip_to) {
                    if !out.contains(&target) {
                        out.push(target);
                    }
                }
                out
            }
            _ => next.into_iter().collect(),
        }
    }

    fn fmt_value(&self, f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
        match value {
            Value::Local(id) => write!(f, "{}", self.local(*id).name),
            Value::Constant(c) => write!(f, "{}", c),
        }
    }

    fn fmt_invoke(&self, f: &mut fmt::Formatter<'_>, expr: &InvokeExpr) -> fmt::Result {
        write!(f, "{} ", expr.kind.as_str())?;
        if let Some(base) = expr.base {
            write!(f, "{}.", self.local(base).name)?;
        }
        write!(f, "{}(", expr.method)?;
        for (i, arg) in expr.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            self.fmt_value(f, arg)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for DriverProcedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "public static void {}()", self.method_name)?;
        writeln!(f, "{{")?;
        for local in &self.locals {
            writeln!(f, "    {} {};", local.ty, local.name)?;
        }
        if !self.locals.is_empty() {
            writeln!(f)?;
        }

        for unit in &self.units {
            if let Some(label) = unit.label {
                writeln!(f, "  {}:", label)?;
            }
            write!(f, "    ")?;
            match &unit.stmt {
                Stmt::Assign { target, value } => {
                    write!(f, "{} = ", self.local(*target).name)?;
                    match value {
                        Rvalue::Use(v) => self.fmt_value(f, v)?,
                        Rvalue::New(class) => write!(f, "new {}", class)?,
                        Rvalue::NewArray { element, size } => {
                            write!(f, "newarray ({})[{}]", element, size)?
                        }
                        Rvalue::Invoke(expr) => self.fmt_invoke(f, expr)?,
                    }
                }
                Stmt::ArrayStore { array, index, value } => {
                    write!(f, "{}[{}] = ", self.local(*array).name, index)?;
                    self.fmt_value(f, value)?;
                }
                Stmt::Invoke(expr) => self.fmt_invoke(f, expr)?,
                Stmt::Guard {
                    counter,
                    ordinal,
                    skip_to,
                } => write!(
                    f,
                    "if {} != {} goto {}",
                    self.local(*counter).name,
                    ordinal,
                    skip_to
                )?,
                Stmt::Goto(target) => write!(f, "goto {}", target)?,
                Stmt::Nop => write!(f, "nop")?,
                Stmt::ReturnVoid => write!(f, "return")?,
            }
            writeln!(f, ";")?;
        }
        writeln!(f, "}}")
    }
}
