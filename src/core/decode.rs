//! # Result Decoder / 结果解码器
//!
//! Turns a worker's raw stdout into a [`RunResult`]. The framework sometimes prints
//! diagnostic text around its JSON document (pending migrations, deprecation notes),
//! so when the bytes do not decode directly, the span from the first `{` to the last `}`
//! is decoded instead. There is no retry and no partial salvage.
//!
//! 将工作者的原始 stdout 转换为 [`RunResult`]。框架有时会在 JSON 文档周围打印诊断文本，
//! 因此当字节无法直接解码时，会改为解码从第一个 `{` 到最后一个 `}` 的片段。

use serde::de::Error as _;
use serde_json::Value;

use crate::core::error::SplitError;
use crate::core::models::RunResult;

/// Returns the inclusive span between the first `{` and the last `}` of `raw`.
/// 返回 `raw` 中第一个 `{` 与最后一个 `}` 之间（含两端）的片段。
pub fn extract_json_object(raw: &[u8]) -> Option<&[u8]> {
    let start = raw.iter().position(|&b| b == b'{')?;
    let end = raw.iter().rposition(|&b| b == b'}')?;
    (start < end).then(|| &raw[start..=end])
}

/// Decodes a document that must be a JSON object. Derived visitors would also accept a
/// sequence, so the shape is checked on the untyped value first.
fn decode_object(bytes: &[u8]) -> Result<RunResult, serde_json::Error> {
    match serde_json::from_slice::<Value>(bytes)? {
        value @ Value::Object(_) => serde_json::from_value(value),
        _ => Err(serde_json::Error::custom("expected a JSON object")),
    }
}

/// Decodes one worker's output, attributing failures to `slot`.
/// 解码单个工作者的输出，并将失败归因于 `slot`。
pub fn decode_run_result(raw: &[u8], slot: usize) -> Result<RunResult, SplitError> {
    if let Ok(result) = decode_object(raw) {
        return Ok(result);
    }

    let payload = extract_json_object(raw).ok_or_else(|| SplitError::MissingPayload {
        slot,
        raw: String::from_utf8_lossy(raw).into_owned(),
    })?;
    tracing::debug!(
        slot,
        skipped = raw.len() - payload.len(),
        "stripped non-JSON text around runner output"
    );

    decode_object(payload).map_err(|source| SplitError::Decode {
        slot,
        raw: String::from_utf8_lossy(raw).into_owned(),
        source,
    })
}
