//! Envelope decoding for debugging buffers captured at the boundary.

use riko_runtime::envelope::open;
use riko_runtime::{ErrorPayload, Handle, Marshal};
use serde_json::{Value, json};

use super::{Error, PayloadType, Result};

/// `viska inspect <hex> --type <ty>`.
pub fn run(payload: &str, ty: PayloadType) -> Result<()> {
    let value = decode(payload, ty)?;
    let text = serde_json::to_string_pretty(&value)
        .map_err(|e| Error::InvalidArgument(format!("render json: {e}")))?;
    println!("{text}");
    Ok(())
}

/// Decode a hex envelope into `{"ok": ...}` or `{"error": {...}}`.
pub fn decode(payload: &str, ty: PayloadType) -> Result<Value> {
    let hex_str = payload.trim();
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    let buf =
        hex::decode(hex_str).map_err(|e| Error::InvalidArgument(format!("invalid hex: {e}")))?;

    match ty {
        PayloadType::Unit => envelope(&buf, |()| Value::Null),
        PayloadType::Bool => envelope(&buf, |b: bool| json!(b)),
        PayloadType::U64 => envelope(&buf, |n: u64| json!(n)),
        PayloadType::String => envelope(&buf, |s: String| json!(s)),
        PayloadType::Bytes => envelope(&buf, |v: Vec<u8>| json!(hex::encode(v))),
        PayloadType::Handle => envelope(&buf, |h: Handle| json!(h.raw())),
        PayloadType::OptString => envelope(&buf, |s: Option<String>| json!(s)),
    }
}

fn envelope<T: Marshal>(buf: &[u8], render: impl FnOnce(T) -> Value) -> Result<Value> {
    let decoded = open::<T>(buf).map_err(viska::Error::from)?;
    Ok(match decoded {
        Ok(value) => json!({ "ok": render(value) }),
        Err(ErrorPayload { kind, message }) => {
            json!({ "error": { "kind": kind, "message": message } })
        }
    })
}

#[cfg(test)]
mod tests {
    use riko_runtime::Envelope;
    use riko_runtime::envelope::seal;

    use super::*;

    fn hex_of<T: Marshal>(envelope: &Envelope<T>) -> String {
        hex::encode(seal(envelope))
    }

    #[test]
    fn decodes_success_values() {
        let text = hex_of(&Envelope::Ok("alice".to_owned()));
        assert_eq!(
            decode(&text, PayloadType::String).unwrap(),
            json!({ "ok": "alice" })
        );

        let text = hex_of(&Envelope::Ok(None::<String>));
        assert_eq!(
            decode(&text, PayloadType::OptString).unwrap(),
            json!({ "ok": null })
        );

        let text = hex_of(&Envelope::Ok(vec![0xde_u8, 0xad]));
        assert_eq!(
            decode(&format!("0x{text}"), PayloadType::Bytes).unwrap(),
            json!({ "ok": "dead" })
        );
    }

    #[test]
    fn decodes_error_envelopes_for_any_type() {
        let text = hex_of(&Envelope::<Handle>::err("NotFound", "no live instance for handle #3"));
        assert_eq!(
            decode(&text, PayloadType::Handle).unwrap(),
            json!({ "error": { "kind": "NotFound", "message": "no live instance for handle #3" } })
        );
    }

    #[test]
    fn unit_envelope_is_a_single_byte() {
        assert_eq!(decode("00", PayloadType::Unit).unwrap(), json!({ "ok": null }));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            decode("zz", PayloadType::Unit),
            Err(Error::InvalidArgument(_))
        ));
        // Tag for u64 with only four payload bytes.
        assert!(matches!(
            decode("0001000000", PayloadType::U64),
            Err(Error::Viska(viska::Error::MalformedPayload(_)))
        ));
        // Ok tag followed by handle zero.
        assert!(matches!(
            decode("000000000000000000", PayloadType::Handle),
            Err(Error::Viska(viska::Error::MalformedPayload(
                riko_runtime::MalformedPayload::NullHandle
            )))
        ));
        // Trailing byte after a unit payload.
        assert!(decode("0000", PayloadType::Unit).is_err());
    }
}
