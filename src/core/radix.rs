// Base conversion: render a non-negative integer in an arbitrary
// radix, digits most-significant first.
use crate::core::error::{Error, ErrorKind};

pub const MAX_RADIX: u64 = u32::MAX as u64;

pub fn convert_base(value: u64, radix: u64) -> Result<Vec<u64>, Error> {
    if radix < 2 {
        return Err(Error::new(ErrorKind::InvalidInput).with_message("radix must be at least 2"));
    }
    if radix > MAX_RADIX {
        return Err(Error::new(ErrorKind::InvalidInput)
            .with_message(format!("radix is out of range ({MAX_RADIX})")));
    }
    if value == 0 {
        return Ok(vec![0]);
    }
    let mut digits = Vec::new();
    let mut rest = value;
    while rest > 0 {
        digits.push(rest % radix);
        rest /= radix;
    }
    digits.reverse();
    Ok(digits)
}
