use super::GF256;

/// Multiplies every element of `vector` by `scalar`.
pub fn scalar_product<const SIZE: usize, const REDUCTION_POLYNOMIAL: u16>(
    scalar: GF256<REDUCTION_POLYNOMIAL>,
    vector: &[GF256<REDUCTION_POLYNOMIAL>; SIZE],
) -> [GF256<REDUCTION_POLYNOMIAL>; SIZE] {
    vector.map(|x| scalar * x)
}

/// Sum of the element-wise products of `a` and `b`.
pub fn inner_product<const SIZE: usize, const REDUCTION_POLYNOMIAL: u16>(
    a: &[GF256<REDUCTION_POLYNOMIAL>; SIZE],
    b: &[GF256<REDUCTION_POLYNOMIAL>; SIZE],
) -> GF256<REDUCTION_POLYNOMIAL> {
    a.iter().zip(b.iter()).map(|(x, y)| (*x) * (*y)).sum()
}

#[test]
fn test_scalar_product() {
    const SCALAR: GF256 = GF256(7);
    let a: [GF256; 20] = std::array::from_fn(|i| GF256(i as u8));

    let b = scalar_product(SCALAR, &a);

    for (i, val) in a.iter().enumerate() {
        assert_eq!(*val * SCALAR, b[i]);
    }
}

#[test]
fn test_inner_product_mix_column() {
    // FIPS-197 MixColumns: db 13 53 45 -> 8e 4d a1 bc
    let column = [GF256(0xdb), GF256(0x13), GF256(0x53), GF256(0x45)];
    let rows: [[GF256; 4]; 4] = [
        [GF256(2), GF256(3), GF256(1), GF256(1)],
        [GF256(1), GF256(2), GF256(3), GF256(1)],
        [GF256(1), GF256(1), GF256(2), GF256(3)],
        [GF256(3), GF256(1), GF256(1), GF256(2)],
    ];
    let mixed = rows.map(|row| inner_product(&row, &column));
    assert_eq!(mixed, [GF256(0x8e), GF256(0x4d), GF256(0xa1), GF256(0xbc)]);
}
