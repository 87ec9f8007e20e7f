//! Integration tests for once

use std::cell::Cell;

use underbar_foundation::{Error, ErrorKind, Value};
use underbar_functions::once;

#[test]
fn five_calls_invoke_once() {
    let calls = Cell::new(0);
    let mut init = once(|_: &[Value]| {
        calls.set(calls.get() + 1);
        Ok(Value::from("initialized"))
    });

    let results: Vec<Value> = (0..5).map(|_| init.call(&[]).unwrap()).collect();

    assert_eq!(calls.get(), 1);
    assert!(results.iter().all(|r| *r == Value::from("initialized")));
}

#[test]
fn later_arguments_are_ignored() {
    let mut first_seen = once(|args: &[Value]| Ok(args[0].clone()));
    assert_eq!(first_seen.call(&[Value::Int(1)]).unwrap(), Value::Int(1));
    assert_eq!(first_seen.call(&[Value::Int(2)]).unwrap(), Value::Int(1));
}

#[test]
fn errors_propagate_unchanged_until_success() {
    let attempts = Cell::new(0);
    let mut connect = once(|_: &[Value]| {
        attempts.set(attempts.get() + 1);
        if attempts.get() < 3 {
            Err(Error::callback(format!("attempt {}", attempts.get())))
        } else {
            Ok(Value::Bool(true))
        }
    });

    let err = connect.call(&[]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Callback(ref msg) if msg == "attempt 1"));
    assert!(connect.call(&[]).is_err());
    assert_eq!(connect.call(&[]).unwrap(), Value::Bool(true));
    assert_eq!(connect.call(&[]).unwrap(), Value::Bool(true));
    assert_eq!(attempts.get(), 3);
}
