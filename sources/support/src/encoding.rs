use anyhow::{anyhow, Context, Result};

/// Decode a float stored as the hexadecimal text of its big-endian IEEE-754
/// bits, e.g. `"3fc00000"` for `1.5`. An optional `0x` prefix is accepted.
pub fn decode_hex_f32(text: &str) -> Result<f32> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);

    if digits.len() != 8 {
        return Err(anyhow!(
            "expected 8 hex digits for a float, got {:?}",
            text
        ));
    }

    let bits = u32::from_str_radix(digits, 16)
        .with_context(|| format!("{:?} is not a hex encoded float", text))?;

    Ok(f32::from_be_bytes(bits.to_be_bytes()))
}
