//! Token URI construction.
//!
//! A token's metadata blob (typically an SVG document) is exposed through
//! `uri` as a JSON document embedding the blob as a base64 image data URI,
//! with the JSON itself base64-encoded under the
//! `data:application/json;base64,` prefix. Everything here is pure
//! formatting over `Bytes`; no storage access.

use soroban_sdk::{Bytes, Env, String};

/// Prefix every `uri` result starts with.
pub const JSON_URI_PREFIX: &[u8] = b"data:application/json;base64,";

const SVG_URI_PREFIX: &[u8] = b"data:image/svg+xml;base64,";

/// Upper bound on a rendered URI. Mint-time metadata limits keep encoded
/// output under this, so the stack buffer in `to_string` always fits.
pub const MAX_URI_LEN: usize = 8_192;

const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

// ── URI rendering ───────────────────────────────────────────────────────────

/// Render the full data URI for `token_id` with the given metadata blob.
pub fn render(env: &Env, token_id: u64, metadata: &Bytes) -> String {
    // {"name":"Stake Reward #<id>","image":"data:image/svg+xml;base64,<b64>"}
    let mut json = Bytes::from_slice(env, b"{\"name\":\"Stake Reward #");
    append_decimal(&mut json, token_id);
    json.append(&Bytes::from_slice(env, b"\",\"image\":\""));
    json.append(&Bytes::from_slice(env, SVG_URI_PREFIX));
    json.append(&encode_base64(env, metadata));
    json.append(&Bytes::from_slice(env, b"\"}"));

    let mut uri = Bytes::from_slice(env, JSON_URI_PREFIX);
    uri.append(&encode_base64(env, &json));

    to_string(env, &uri)
}

/// Standard base64 (RFC 4648, `=` padding) over env-backed bytes.
pub fn encode_base64(env: &Env, input: &Bytes) -> Bytes {
    let mut out = Bytes::new(env);
    let len = input.len();

    let mut i = 0u32;
    while i < len {
        let b0 = input.get_unchecked(i);
        let b1 = if i + 1 < len { Some(input.get_unchecked(i + 1)) } else { None };
        let b2 = if i + 2 < len { Some(input.get_unchecked(i + 2)) } else { None };

        out.push_back(BASE64_ALPHABET[(b0 >> 2) as usize]);

        match (b1, b2) {
            (Some(b1), Some(b2)) => {
                out.push_back(BASE64_ALPHABET[(((b0 & 0x03) << 4) | (b1 >> 4)) as usize]);
                out.push_back(BASE64_ALPHABET[(((b1 & 0x0f) << 2) | (b2 >> 6)) as usize]);
                out.push_back(BASE64_ALPHABET[(b2 & 0x3f) as usize]);
            }
            (Some(b1), None) => {
                out.push_back(BASE64_ALPHABET[(((b0 & 0x03) << 4) | (b1 >> 4)) as usize]);
                out.push_back(BASE64_ALPHABET[((b1 & 0x0f) << 2) as usize]);
                out.push_back(b'=');
            }
            (None, _) => {
                out.push_back(BASE64_ALPHABET[((b0 & 0x03) << 4) as usize]);
                out.push_back(b'=');
                out.push_back(b'=');
            }
        }

        i += 3;
    }

    out
}

/// Append `value` to `out` as decimal ASCII digits.
fn append_decimal(out: &mut Bytes, value: u64) {
    // u64::MAX has 20 digits.
    let mut digits = [0u8; 20];
    let mut n = value;
    let mut count = 0usize;
    loop {
        digits[count] = b'0' + (n % 10) as u8;
        n /= 10;
        count += 1;
        if n == 0 {
            break;
        }
    }
    while count > 0 {
        count -= 1;
        out.push_back(digits[count]);
    }
}

/// Copy env-backed bytes into a host `String`. Panics if the input exceeds
/// `MAX_URI_LEN`; mint-time limits make that unreachable.
fn to_string(env: &Env, bytes: &Bytes) -> String {
    let mut buf = [0u8; MAX_URI_LEN];
    let len = bytes.len() as usize;
    bytes.copy_into_slice(&mut buf[..len]);
    String::from_bytes(env, &buf[..len])
}

// ── Unit tests ──────────────────────────────────────────────────────────────
