//! Integration tests for `MessagePack` chart files.

use chartflat_ast::{
    BinaryOp, Declaration, Expression, FunctionDecl, NameRef, State, Statechart, Statement,
    Transition, TypeDecl,
};
use chartflat_flatten::{Flattener, translate};
use chartflat_foundation::{DeclId, ErrorKind};
use chartflat_runtime::{ChartSummary, flatten_file, from_bytes, load_from_file, to_bytes};

fn thermostat() -> Statechart {
    let temp = NameRef::new("temp", DeclId::new(0));
    let target = NameRef::new("target", DeclId::new(1));
    Statechart::new("thermostat")
        .with_type(TypeDecl::new("celsius", "int"))
        .with_event("tick")
        .with_function(FunctionDecl::new("heater", vec![("on".into(), "bool".into())], "void"))
        .with_declaration(Declaration::input(DeclId::new(0), "temp", "celsius"))
        .with_state(
            State::new("Active")
                .with_declaration(Declaration::new(DeclId::new(1), "target", "celsius"))
                .with_entry(Statement::assign(target.clone(), Expression::Int(21)))
                .with_state(
                    State::new("Heating")
                        .with_entry(Statement::call("heater", vec![Expression::Bool(true)]))
                        .with_exit(Statement::call("heater", vec![Expression::Bool(false)])),
                )
                .with_state(State::new("Idle")),
        )
        .with_state(State::new("Off"))
        .with_transition(
            Transition::new("warm", "Heating", "Idle").on("tick").when(Expression::binary(
                BinaryOp::Ge,
                Expression::Name(temp),
                Expression::Name(target),
            )),
        )
        .with_transition(Transition::new("stop", "Active", "Off").on("tick"))
}

#[test]
fn flat_chart_roundtrips() {
    let flat = translate(&thermostat()).unwrap();
    let restored = from_bytes(&to_bytes(&flat).unwrap()).unwrap();
    assert_eq!(restored, flat);
}

#[test]
fn hierarchical_chart_roundtrips() {
    let chart = thermostat();
    assert_eq!(from_bytes(&to_bytes(&chart).unwrap()).unwrap(), chart);
}

#[test]
fn truncated_bytes_fail() {
    let bytes = to_bytes(&thermostat()).unwrap();
    let err = from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SerializationError(_)));
}

#[test]
fn flatten_file_writes_requested_output() {
    let dir = std::env::temp_dir();
    let input = dir.join("chartflat_it_thermostat.msgpack");
    let output = dir.join("chartflat_it_thermostat.out.msgpack");
    chartflat_runtime::save_to_file(&thermostat(), &input).unwrap();

    let report = flatten_file(&Flattener::new(), &input, Some(&output)).unwrap();
    assert_eq!(report.output, output);
    assert_eq!(report.before, ChartSummary::of(&thermostat()));

    let flat = load_from_file(&output).unwrap();
    let names: Vec<_> = flat.states.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Active_Heating", "Active_Idle", "Off"]);
    assert_eq!(flat.transitions.len(), 3);
    assert_eq!(report.after, ChartSummary::of(&flat));

    let _ = std::fs::remove_file(&input);
    let _ = std::fs::remove_file(&output);
}
