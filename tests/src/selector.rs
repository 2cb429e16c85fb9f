use abiprobe_core::{Abi, FunctionSpec, Param, Selector, selector, signature};
use abiprobe_tests::{invalid_abis, valid_abis};
use abiprobe_utils::errors::SatisfyError;
use serde_json::json;

#[test]
fn test_sample_signatures_and_selectors() {
    let expected = [
        ("functionWithoutParams()", "21b478b2"),
        ("functionWithOneParams(uint256)", "e81d6b5b"),
        ("functionWithTwoParams(uint256,address)", "1c7e9ae5"),
        ("functionWithArrayParams(uint256,address[3])", "9ce42ca9"),
        ("functionWithArbitraryLengthParams(uint256,address[])", "a6d52255"),
        (
            "functionWithMultipleParams(uint8,bytes,uint256,bytes32[],bytes2,address[3])",
            "98eb744d",
        ),
    ];

    for (abi, (sig, sel)) in valid_abis().iter().zip(expected) {
        let abi = Abi::from_json(abi).unwrap();
        let spec = abi.iter().next().unwrap();
        assert_eq!(signature(spec), sig);
        assert_eq!(selector(spec).to_string(), sel);
    }
}

#[test]
fn test_near_misses_change_the_selector() {
    for (valid, invalid) in valid_abis().iter().zip(invalid_abis()) {
        let valid = Abi::from_json(valid).unwrap();
        let invalid = Abi::from_json(&invalid).unwrap();
        let (a, b) = (valid.iter().next().unwrap(), invalid.iter().next().unwrap());
        assert_ne!(a.signature(), b.signature());
        assert_ne!(a.selector(), b.selector());
    }
}

#[test]
fn test_erc20_selectors() {
    let cases = [
        ("transfer", vec!["address", "uint256"], 0xa905_9cbb_u32),
        ("approve", vec!["address", "uint256"], 0x095e_a7b3),
        ("transferFrom", vec!["address", "address", "uint256"], 0x23b8_72dd),
        ("allowance", vec!["address", "address"], 0xdd62_ed3e),
        ("balanceOf", vec!["address"], 0x70a0_8231),
        ("totalSupply", vec![], 0x1816_0ddd),
    ];
    for (name, inputs, expected) in cases {
        let spec = FunctionSpec::new(name, inputs).unwrap();
        assert_eq!(spec.selector(), Selector::from(expected), "{}", spec.signature());
    }
}

#[test]
fn test_parameter_names_do_not_matter() {
    let named = FunctionSpec::with_params(
        "transfer",
        vec![Param::named("to", "address"), Param::named("value", "uint256")],
    )
    .unwrap();
    let unnamed = FunctionSpec::new("transfer", ["address", "uint256"]).unwrap();
    assert_eq!(named.signature(), unnamed.signature());
    assert_eq!(named.selector(), unnamed.selector());
}

#[test]
fn test_selector_text_round_trip() {
    let parsed: Selector = "0xa9059cbb".parse().unwrap();
    assert_eq!(parsed.to_string(), "a9059cbb");
    assert_eq!(parsed.to_u32(), 0xa905_9cbb);
    assert!("a9059c".parse::<Selector>().is_err());
}

#[test]
fn test_malformed_specs_are_rejected() {
    for bad in [
        json!({ "inputs": [] }),
        json!({ "name": "", "inputs": [] }),
        json!({ "name": "transfer" }),
        json!({ "name": "transfer", "inputs": {} }),
        json!({ "name": "transfer", "inputs": [{ "name": "to" }] }),
        json!("transfer(address,uint256)"),
    ] {
        let err = Abi::from_json(&bad).unwrap_err();
        assert!(
            matches!(err, SatisfyError::InvalidSpecification { .. }),
            "{bad} gave {err:?}"
        );
        assert!(err.to_string().contains("Please provide an ABI"));
    }
}

#[test]
fn test_compiler_artifact_abi() {
    let artifact = json!([
        { "type": "constructor", "inputs": [{ "name": "supply", "type": "uint256" }], "stateMutability": "nonpayable" },
        { "type": "event", "name": "Transfer", "anonymous": false, "inputs": [] },
        { "type": "function", "name": "balanceOf", "inputs": [{ "name": "owner", "type": "address" }], "outputs": [{ "name": "", "type": "uint256" }] },
        { "type": "fallback" }
    ]);
    let abi = Abi::from_json(&artifact).unwrap();
    assert_eq!(abi.len(), 1);
    assert_eq!(abi.iter().next().unwrap().signature(), "balanceOf(address)");
}
