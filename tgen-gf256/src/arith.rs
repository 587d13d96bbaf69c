/// Shift-and-add multiplication in GF(2^8).
///
/// `a` is doubled every round; when that pushes a bit out of the byte, the low byte of
/// `reduction_polynomial` is folded back in. Stops as soon as either operand runs out of bits.
pub(crate) const fn carryless_mul(mut a: u8, mut b: u8, reduction_polynomial: u16) -> u8 {
    let reduction = (reduction_polynomial & 0xFF) as u8;
    let mut product = 0u8;

    while a != 0 && b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        a = if a & 0x80 != 0 { (a << 1) ^ reduction } else { a << 1 };
        b >>= 1;
    }

    product
}

#[test]
fn test_xtime() {
    assert_eq!(carryless_mul(0x57, 0x02, 0x11B), 0xae);
    assert_eq!(carryless_mul(0xae, 0x02, 0x11B), 0x47);
    assert_eq!(carryless_mul(0x47, 0x02, 0x11B), 0x8e);
    assert_eq!(carryless_mul(0x8e, 0x02, 0x11B), 0x07);
}
