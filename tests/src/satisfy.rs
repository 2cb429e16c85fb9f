use abiprobe_core::{
    Abi, ScanStrategy,
    decoder::input_to_hex,
    satisfy::{bytecode_satisfies, bytecode_satisfies_json, bytecode_satisfies_with, check_functions},
};
use abiprobe_tests::{SAMPLE_RUNTIME, combined_abi, invalid_abis, sample_stream, valid_abis};
use abiprobe_utils::errors::{MissingInput, SatisfyError};
use serde_json::{Value, json};
use std::io::Write;

#[test]
fn test_sample_satisfies_each_function() {
    let stream = sample_stream();
    for abi in valid_abis() {
        assert!(bytecode_satisfies_json(&stream, &abi).unwrap(), "{abi}");
    }
}

#[test]
fn test_sample_satisfies_all_functions_together() {
    let abi = combined_abi();
    assert_eq!(abi.len(), 6);
    assert!(bytecode_satisfies(&sample_stream(), &abi).unwrap());
}

#[test]
fn test_sample_rejects_near_misses() {
    let stream = sample_stream();
    for abi in invalid_abis() {
        assert!(!bytecode_satisfies_json(&stream, &abi).unwrap(), "{abi}");
    }
}

#[test]
fn test_one_miss_fails_the_whole_abi() {
    let mut abi = combined_abi();
    abi.extend(Abi::from_json(&invalid_abis()[1]).unwrap());

    let stream = sample_stream();
    assert!(!bytecode_satisfies(&stream, &abi).unwrap());

    let report = check_functions(&stream, &abi, ScanStrategy::default()).unwrap();
    assert_eq!(report.len(), 7);
    assert_eq!(report.iter().filter(|f| !f.matched).count(), 1);
    assert_eq!(report[6].signature, "functionWithOneParams(address)");
}

#[test]
fn test_strategies_agree_on_compiled_code() {
    let stream = sample_stream();
    let abi = combined_abi();
    for strategy in [ScanStrategy::FirstOccurrence, ScanStrategy::AllOccurrences] {
        assert!(bytecode_satisfies_with(&stream, &abi, strategy).unwrap());
    }
}

#[test]
fn test_bytecode_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{}", SAMPLE_RUNTIME.to_uppercase().replacen("0X", "0x", 1)).unwrap();

    let stream = input_to_hex(file.path().to_str().unwrap(), true).unwrap();
    assert_eq!(stream, sample_stream());
    assert!(bytecode_satisfies(&stream, &combined_abi()).unwrap());
}

#[test]
fn test_missing_inputs() {
    assert_eq!(
        bytecode_satisfies("", &combined_abi()),
        Err(SatisfyError::MissingInput(MissingInput::Bytecode))
    );
    assert_eq!(
        bytecode_satisfies_json(&sample_stream(), &Value::Null),
        Err(SatisfyError::MissingInput(MissingInput::Abi))
    );
}

#[test]
fn test_empty_abi_is_vacuously_satisfied() {
    assert!(bytecode_satisfies_json(&sample_stream(), &json!([])).unwrap());
    assert!(bytecode_satisfies("fe", &Abi::default()).unwrap());
}

#[test]
fn test_bytecode_without_dispatcher() {
    // fallback-only contract
    let stream = "6080604052600080fdfea164736f6c6343000813000a";
    for abi in valid_abis() {
        assert!(!bytecode_satisfies_json(stream, &abi).unwrap());
    }
}
