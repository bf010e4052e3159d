//! Runs the evaluator against a real child process, with `sh` standing in for
//! the Julia interpreter.
#![cfg(unix)]

use std::fs;
use ndarray::array;
use pulse_fidelity::{
    fidelity::DEFAULT_CONFIG,
    EvalOptions,
    FidelityEvaluator,
    Gate,
    JuliaScript,
};

const FAKE_CHECK: &str = r#"
while [ $# -gt 0 ]; do
    case "$1" in
        --pulse_data_path) pulses="$2" ;;
        --output_objf_path) objf="$2" ;;
    esac
    shift 2
done
: > "$objf"
while IFS= read -r line; do
    echo "-0.1" >> "$objf"
done < "$pulses"
"#;

fn setup(gate: Gate) -> (tempfile::TempDir, EvalOptions) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(gate.script()), FAKE_CHECK).unwrap();
    fs::write(dir.path().join(DEFAULT_CONFIG), "{}").unwrap();
    let opts
        = EvalOptions::for_gate(gate)
        .pulse_data_path(dir.path().join("pulse.csv"))
        .output_path(dir.path().join("objf.csv"));
    (dir, opts)
}

#[test]
fn evaluate_with_child_process() {
    let (dir, opts) = setup(Gate::RY);
    let script
        = JuliaScript::new(Gate::RY.script(), dir.path())
        .interpreter("sh");
    let evaluator = FidelityEvaluator::new(script, dir.path());
    let y = array![[0.0, 1.0], [1.0, 0.0], [0.5, 0.5]];
    let x = array![[0.1, 0.9], [0.9, 0.1], [0.5, 0.4]];

    let fid = evaluator.evaluate(&x, &y, &opts).unwrap().unwrap();
    assert!((fid - 0.9).abs() < 1e-12);
    assert!(!opts.pulse_data_path.exists());
    assert!(!opts.output_path.exists());

    let opts = opts.limit(Some(2)).cleanup(false);
    let fid = evaluator.evaluate(&x, &y, &opts).unwrap().unwrap();
    assert!((fid - 0.9).abs() < 1e-12);
    assert_eq!(fs::read_to_string(&opts.output_path).unwrap().lines().count(), 2);
}

#[test]
fn relative_paths_resolve_from_caller() {
    let (dir, _) = setup(Gate::U);
    let script
        = JuliaScript::new(Gate::U.script(), dir.path())
        .interpreter("sh");
    let evaluator = FidelityEvaluator::new(script, dir.path());
    let name = format!("pulse_fidelity_test_{}", std::process::id());
    let opts
        = EvalOptions::for_gate(Gate::U)
        .pulse_data_path(format!("{}.csv", name))
        .output_path(format!("{}_objf.csv", name));
    let x = array![[0.0]];
    let fid = evaluator.evaluate(&x, &x, &opts).unwrap().unwrap();
    assert!((fid - 0.9).abs() < 1e-12);
    assert!(!std::path::Path::new(&format!("{}.csv", name)).exists());
}

#[test]
fn solver_output_missing() {
    let (dir, opts) = setup(Gate::RX);
    fs::write(dir.path().join(Gate::RX.script()), "exit 3\n").unwrap();
    let script
        = JuliaScript::new(Gate::RX.script(), dir.path())
        .interpreter("sh");
    let evaluator = FidelityEvaluator::new(script, dir.path());
    let x = array![[0.0, 1.0]];
    assert!(evaluator.evaluate(&x, &x, &opts).is_err());
}
