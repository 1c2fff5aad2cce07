use std::fmt;

/// Lazy hex formatter for log lines.
///
/// - `Display` (`{}`) prints lowercase hex without `0x` prefix.
/// - `LowerHex` with alternate form (`{:#x}`) prints lowercase hex with `0x` prefix.
#[derive(Clone, Copy)]
pub struct HexBytes<'a>(pub &'a [u8]);

pub fn hx(bytes: &[u8]) -> HexBytes<'_> {
    HexBytes(bytes)
}

fn fmt_lower_hex_bytes(bytes: &[u8], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if f.alternate() {
        f.write_str("0x")?;
    }
    for b in bytes {
        write!(f, "{:02x}", b)?;
    }
    Ok(())
}

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_lower_hex_bytes(self.0, f)
    }
}

impl fmt::LowerHex for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_lower_hex_bytes(self.0, f)
    }
}
