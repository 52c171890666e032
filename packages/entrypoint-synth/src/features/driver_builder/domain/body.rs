//! Incremental construction of a [`DriverProcedure`]

use super::local_generator::LocalGenerator;
use super::procedure::{
    BranchInfo, DriverProcedure, InvokeExpr, Label, Local, LocalId, Rvalue, Stmt, Unit, Value,
};
use crate::shared::models::JavaType;

#[derive(Debug)]
pub struct BodyBuilder {
    class_name: String,
    method_name: String,
    locals: Vec<Local>,
    units: Vec<Unit>,
    branches: Vec<BranchInfo>,
    names: LocalGenerator,
    next_label: u32,
    taint_local: Option<LocalId>,
    counter_local: Option<LocalId>,
}

impl BodyBuilder {
    pub fn new(class_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            locals: Vec::new(),
            units: Vec::new(),
            branches: Vec::new(),
            names: LocalGenerator::new(),
            next_label: 1,
            taint_local: None,
            counter_local: None,
        }
    }

    pub fn new_local(&mut self, ty: JavaType) -> LocalId {
        let id = LocalId(self.locals.len() as u32);
        let name = self.names.next_name(&ty);
        self.locals.push(Local { name, ty });
        id
    }

    pub fn new_label(&mut self) -> Label {
        let label = Label(self.next_label);
        self.next_label += 1;
        label
    }

    /// Emit a `nop` carrying `label`, so jumps have a target before the
    /// real successor exists
    pub fn place_label(&mut self, label: Label) {
        self.push(Stmt::Nop);
        if let Some(last) = self.units.last_mut() {
            last.label = Some(label);
        }
    }

    pub fn push(&mut self, stmt: Stmt) -> usize {
        self.units.push(Unit { label: None, stmt });
        self.units.len() - 1
    }

    pub fn assign(&mut self, target: LocalId, value: Rvalue) {
        self.push(Stmt::Assign { target, value });
    }

    /// `local = null` for a fresh local of `ty`
    pub fn null_local(&mut self, ty: JavaType) -> LocalId {
        let local = self.new_local(ty);
        self.assign(local, Rvalue::Use(Value::null()));
        local
    }

    /// Emit `expr`, capturing a non-void result in a fresh local
    pub fn invoke(&mut self, expr: InvokeExpr) -> Option<LocalId> {
        let ret = expr.method.return_type().clone();
        if ret.is_void() {
            self.push(Stmt::Invoke(expr));
            None
        } else {
            let target = self.new_local(ret);
            self.assign(target, Rvalue::Invoke(expr));
            Some(target)
        }
    }

    pub fn record_branch(&mut self, branch: BranchInfo) {
        self.branches.push(branch);
    }

    pub fn set_taint_local(&mut self, local: LocalId) {
        self.taint_local = Some(local);
    }

    pub fn set_counter_local(&mut self, local: LocalId) {
        self.counter_local = Some(local);
    }

    pub fn finish(self) -> DriverProcedure {
        DriverProcedure {
            class_name: self.class_name,
            method_name: self.method_name,
            locals: self.locals,
            units: self.units,
            branches: self.branches,
            taint_local: self.taint_local,
            counter_local: self.counter_local,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::driver_builder::domain::InvokeKind;
    use crate::shared::models::{MethodDescriptor, MethodSubSignature};

    #[test]
    fn test_invoke_captures_non_void_result() {
        let mut body = BodyBuilder::new("dummyMainClass", "dummyMainMethod");
        let to_string = MethodDescriptor::new(
            "java.lang.Object",
            MethodSubSignature::new("toString", vec![], JavaType::string()),
        );
        let receiver = body.null_local(JavaType::reference("java.lang.Object"));
        let result = body.invoke(InvokeExpr {
            kind: InvokeKind::Virtual,
            method: to_string,
            base: Some(receiver),
            args: vec![],
        });

        let proc = body.finish();
        assert_eq!(proc.units().len(), 2);
        let result = result.unwrap();
        assert_eq!(proc.local(result).name, "$r1");
        assert!(proc.local(result).ty.is_string());
    }

    #[test]
    fn test_place_label_marks_nop() {
        let mut body = BodyBuilder::new("C", "m");
        let label = body.new_label();
        body.place_label(label);
        body.push(Stmt::Goto(label));
        let proc = body.finish();
        assert_eq!(proc.label_index(label), Some(0));
        assert_eq!(proc.successors(1), vec![0]);
    }
}
