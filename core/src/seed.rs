// Turns arbitrary user text into the 32-bit seed that drives a generation run.
//
// Text that reads as a decimal i32 is used as-is. Anything else, overflowing
// numbers included, is hashed: for each UTF-16 code unit `c` at index `i`,
// even indices subtract `c * i^(i/2)` and odd indices add `c^i`.
// All arithmetic wraps at 32 bits.
pub fn derive_seed(text: &str) -> i32 {
    if let Ok(seed) = text.trim_matches(is_number_padding).parse::<i32>() {
        return seed;
    }

    let mut seed = 0i32;
    for (i, unit) in text.encode_utf16().enumerate() {
        let code = i32::from(unit);
        let idx = i as i32;
        if i % 2 == 0 {
            // 0^0 == 1, so the first unit subtracts its own code
            seed = seed.wrapping_sub(code.wrapping_mul(idx.wrapping_pow((i / 2) as u32)));
        } else {
            seed = seed.wrapping_add(code.wrapping_pow(i as u32));
        }
    }
    seed
}

// Only ASCII space and the \t..=\r controls may surround a decimal seed
fn is_number_padding(c: char) -> bool {
    c == ' ' || ('\t'..='\r').contains(&c)
}
