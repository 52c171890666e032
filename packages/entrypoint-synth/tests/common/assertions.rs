//! Driver-shape assertions

use entrypoint_synth::features::driver_builder::{
    DriverProcedure, InvokeExpr, InvokeKind, LocalId, Rvalue, Stmt, Value,
};

/// Unit index of the guard carrying `ordinal`
pub fn guard_index(procedure: &DriverProcedure, ordinal: u32) -> Option<usize> {
    procedure.units().iter().position(|u| {
        matches!(u.stmt, Stmt::Guard { ordinal: k, .. } if k == ordinal)
    })
}

/// Unit index of the call a branch guards: the first call to the branch
/// method after its guard
pub fn branch_call_index(procedure: &DriverProcedure, ordinal: u32) -> Option<usize> {
    let branch = procedure.branches().iter().find(|b| b.ordinal == ordinal)?;
    let guard = guard_index(procedure, ordinal)?;
    procedure
        .invocations()
        .find(|(i, e)| *i > guard && e.method == branch.method)
        .map(|(i, _)| i)
}

pub fn branch_call<'a>(procedure: &'a DriverProcedure, ordinal: u32) -> &'a InvokeExpr {
    let index = branch_call_index(procedure, ordinal)
        .unwrap_or_else(|| panic!("no call site for branch {ordinal}"));
    procedure.units()[index]
        .stmt
        .invoke_expr()
        .expect("call site is an invocation")
}

/// Ordinals are unique and run 0..n in branch order
pub fn assert_contiguous_ordinals(procedure: &DriverProcedure) {
    let ordinals: Vec<u32> = procedure.branches().iter().map(|b| b.ordinal).collect();
    let expected: Vec<u32> = (0..ordinals.len() as u32).collect();
    assert_eq!(ordinals, expected, "branch ordinals not contiguous");

    let mut guards: Vec<u32> = procedure
        .units()
        .iter()
        .filter_map(|u| match u.stmt {
            Stmt::Guard { ordinal, .. } => Some(ordinal),
            _ => None,
        })
        .collect();
    guards.sort_unstable();
    assert_eq!(guards, expected, "guard values not unique and contiguous");
}

/// Each branch call is dominated by its own guard, with no other guard
/// between the two
pub fn assert_guards_dominate_calls(procedure: &DriverProcedure) {
    let cfg = procedure.control_flow_graph();
    for branch in procedure.branches() {
        let guard = guard_index(procedure, branch.ordinal).expect("guard present");
        let call = branch_call_index(procedure, branch.ordinal).expect("call present");
        assert!(
            cfg.dominates(guard, call),
            "guard {} does not dominate its call",
            branch.ordinal
        );
        let foreign = procedure.units()[guard + 1..call]
            .iter()
            .any(|u| matches!(u.stmt, Stmt::Guard { .. }));
        assert!(!foreign, "branch {} call sits behind another guard", branch.ordinal);
    }
}

/// Every string parameter of every branch call receives the taint local
pub fn assert_string_args_tainted(procedure: &DriverProcedure) {
    let taint = procedure.taint_local().expect("driver has a taint local");
    for branch in procedure.branches() {
        let call = branch_call(procedure, branch.ordinal);
        for (ty, arg) in call.method.parameter_types().iter().zip(&call.args) {
            if ty.is_string() {
                assert_eq!(
                    arg,
                    &Value::Local(taint),
                    "string argument of {} is not the taint local",
                    call.method
                );
            }
        }
    }
}

/// A string-returning branch call is immediately followed by a sink call
/// on its result
pub fn assert_string_returns_reach_sink(procedure: &DriverProcedure, sink_name: &str) {
    for branch in procedure.branches() {
        let index = branch_call_index(procedure, branch.ordinal).expect("call present");
        let result = match &procedure.units()[index].stmt {
            Stmt::Assign {
                target,
                value: Rvalue::Invoke(_),
            } => Some(*target),
            _ => None,
        };
        let routed = branch.method.return_type().is_string();
        assert_eq!(branch.sink_routed, routed, "sink flag for {}", branch.method);
        if !routed {
            continue;
        }

        let result = result.expect("string return captured in a local");
        let next = procedure.units()[index + 1]
            .stmt
            .invoke_expr()
            .expect("sink call follows");
        assert_eq!(next.method.name(), sink_name);
        assert!(next.args.contains(&Value::Local(result)));
    }
}

pub fn count_news(procedure: &DriverProcedure, class_name: &str) -> usize {
    procedure
        .units()
        .iter()
        .filter(|u| matches!(&u.stmt, Stmt::Assign { value: Rvalue::New(c), .. } if c == class_name))
        .count()
}

/// No class is allocated again while one of its instances is still under
/// construction. A `new C` opens a construction and the matching
/// `specialinvoke <init>` on the same local closes it.
pub fn assert_no_reentrant_construction(procedure: &DriverProcedure) {
    let mut open: Vec<(LocalId, &str)> = Vec::new();
    for unit in procedure.units() {
        match &unit.stmt {
            Stmt::Assign {
                target,
                value: Rvalue::New(class_name),
            } => {
                assert!(
                    open.iter().all(|(_, c)| *c != class_name.as_str()),
                    "{class_name} allocated inside its own construction: {open:?}"
                );
                open.push((*target, class_name.as_str()));
            }
            Stmt::Invoke(expr) if expr.kind == InvokeKind::Special && expr.method.name() == "<init>" => {
                let (local, _) = open.pop().expect("constructor call without allocation");
                assert_eq!(expr.base, Some(local), "constructor closes innermost allocation");
            }
            _ => {}
        }
    }
    assert!(open.is_empty(), "unfinished constructions: {open:?}");
}
