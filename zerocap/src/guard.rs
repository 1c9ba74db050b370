use serde_json::{Map, Value};
use zerocap_jwt::Token;

use crate::{CapError, CapResult};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Returns `true` if `payload` has the shape of a capability payload.
pub fn is_capability_payload(payload: &Value) -> bool {
    assert_capability_payload(payload).is_ok()
}

/// Checks that `payload` has the shape of a capability payload.
///
/// `iss`, `sub` and `aud` must be strings. `act` and `res` must each be a string or a non-empty
/// array of strings. `exp` and `iat` must be non-negative integers and `jti` a string when present;
/// `null` counts as absent.
pub fn assert_capability_payload(payload: &Value) -> CapResult<()> {
    let claims = payload
        .as_object()
        .ok_or_else(|| malformed("payload is not an object"))?;

    for claim in ["iss", "sub", "aud"] {
        if !claims.get(claim).is_some_and(Value::is_string) {
            return Err(malformed(format!("`{claim}` must be a string")));
        }
    }

    for claim in ["act", "res"] {
        let valid = match claims.get(claim) {
            Some(Value::String(_)) => true,
            Some(Value::Array(paths)) => !paths.is_empty() && paths.iter().all(Value::is_string),
            _ => false,
        };

        if !valid {
            return Err(malformed(format!(
                "`{claim}` must be a string or a non-empty array of strings"
            )));
        }
    }

    for claim in ["exp", "iat"] {
        if !is_absent_or(claims, claim, |v| v.is_u64()) {
            return Err(malformed(format!(
                "`{claim}` must be a non-negative integer"
            )));
        }
    }

    if !is_absent_or(claims, "jti", Value::is_string) {
        return Err(malformed("`jti` must be a string"));
    }

    Ok(())
}

/// Returns `true` if the payload of `token` has the shape of a capability payload.
pub fn is_capability_token(token: &Token<Value>) -> bool {
    assert_capability_token(token).is_ok()
}

/// Checks that the payload of `token` has the shape of a capability payload.
pub fn assert_capability_token(token: &Token<Value>) -> CapResult<()> {
    assert_capability_payload(&token.payload)
}

/// Returns `true` if `payload` has the shape of a request payload.
pub fn is_request_payload(payload: &Value) -> bool {
    assert_request_payload(payload).is_ok()
}

/// Checks that `payload` has the shape of a request payload: a capability payload whose `cap`, when
/// present, is an array of strings.
pub fn assert_request_payload(payload: &Value) -> CapResult<()> {
    assert_capability_payload(payload)?;

    let valid = match payload.get("cap") {
        None | Some(Value::Null) => true,
        Some(Value::Array(capabilities)) => capabilities.iter().all(Value::is_string),
        _ => false,
    };

    if !valid {
        return Err(malformed("`cap` must be an array of strings"));
    }

    Ok(())
}

fn is_absent_or(claims: &Map<String, Value>, claim: &str, f: impl Fn(&Value) -> bool) -> bool {
    match claims.get(claim) {
        None | Some(Value::Null) => true,
        Some(value) => f(value),
    }
}

fn malformed(reason: impl Into<String>) -> CapError {
    CapError::MalformedToken(reason.into())
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid() -> Value {
        json!({
            "iss": "alice",
            "sub": "alice",
            "aud": "bob",
            "act": "test/read",
            "res": ["foo/bar", "foo/baz"],
        })
    }

    fn with(claim: &str, value: Value) -> Value {
        let mut payload = valid();
        payload[claim] = value;
        payload
    }

    #[test]
    fn test_capability_payload_shapes() {
        assert!(is_capability_payload(&valid()));
        assert!(is_capability_payload(&with("act", json!(["a", "b"]))));
        assert!(is_capability_payload(&with("exp", json!(1_700_000_000))));
        assert!(is_capability_payload(&with("exp", Value::Null)));
        assert!(is_capability_payload(&with("jti", json!("id"))));

        assert!(!is_capability_payload(&with("aud", json!(1))));
        assert!(!is_capability_payload(&with("sub", json!(null))));
        assert!(!is_capability_payload(&with("iss", json!(["alice"]))));
        assert!(!is_capability_payload(&with("act", json!(1))));
        assert!(!is_capability_payload(&with("act", json!({}))));
        assert!(!is_capability_payload(&with("res", json!(["foo", 1]))));
        assert!(!is_capability_payload(&with("res", json!([]))));
        assert!(!is_capability_payload(&with("exp", json!("soon"))));
        assert!(!is_capability_payload(&with("exp", json!(-1))));
        assert!(!is_capability_payload(&with("iat", json!(1.5))));
        assert!(!is_capability_payload(&with("jti", json!(7))));
        assert!(!is_capability_payload(&json!("alice")));

        let mut missing = valid();
        if let Some(claims) = missing.as_object_mut() {
            claims.remove("res");
        }
        assert!(!is_capability_payload(&missing));
    }

    #[test]
    fn test_assert_capability_payload_reason() {
        let err = assert_capability_payload(&with("aud", json!(1))).unwrap_err();
        assert!(matches!(err, CapError::MalformedToken(_)));
        assert!(err.to_string().contains("`aud`"));
    }

    #[test]
    fn test_request_payload_shapes() {
        assert!(is_request_payload(&valid()));
        assert!(is_request_payload(&with("cap", json!([]))));
        assert!(is_request_payload(&with("cap", json!(["a.b.c"]))));

        assert!(!is_request_payload(&with("cap", json!("a.b.c"))));
        assert!(!is_request_payload(&with("cap", json!(["a.b.c", 1]))));
        assert!(!is_request_payload(&with("aud", json!(1))));
    }
}
