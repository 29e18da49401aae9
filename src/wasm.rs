use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::parser::parse_farm;

/// Parse and solve a farm description, returning the move log one line per element.
///
/// Parse and solve failures are thrown as their message string.
#[wasm_bindgen]
pub fn solve(input: &str) -> Result<Array, JsValue> {
    let farm = parse_farm(input).map_err(|err| JsValue::from_str(&err.to_string()))?;
    let solution = farm.solve().map_err(|err| JsValue::from_str(&err.to_string()))?;

    Ok(solution.lines().into_iter().map(JsValue::from).collect())
}
