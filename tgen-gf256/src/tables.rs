use super::vector::scalar_product;
use super::{GF256, SBox};

/// One row of the (Inv)MixColumns matrix.
pub type Multiplier = [GF256; 4];

pub type Table = [u32; 256];

/// Which S-box a table substitutes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Forward,
    Inverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    pub source: Source,
    pub multiplier: Multiplier,
}

impl TableSpec {
    const fn new(name: &'static str, source: Source, multiplier: [u8; 4]) -> Self {
        TableSpec {
            name,
            source,
            multiplier: [
                GF256(multiplier[0]),
                GF256(multiplier[1]),
                GF256(multiplier[2]),
                GF256(multiplier[3]),
            ],
        }
    }

    pub fn generate(&self, forward: &SBox, inverse: &SBox) -> Table {
        let sbox = match self.source {
            Source::Forward => forward,
            Source::Inverse => inverse,
        };
        generate_table(sbox, &self.multiplier)
    }
}

/// The encryption (Te) and decryption (Td) round tables, in emission order.
pub const STANDARD_TABLES: [TableSpec; 10] = [
    TableSpec::new("Te0", Source::Forward, [0x2, 0x1, 0x1, 0x3]),
    TableSpec::new("Te1", Source::Forward, [0x3, 0x2, 0x1, 0x1]),
    TableSpec::new("Te2", Source::Forward, [0x1, 0x3, 0x2, 0x1]),
    TableSpec::new("Te3", Source::Forward, [0x1, 0x1, 0x3, 0x2]),
    TableSpec::new("Te4", Source::Forward, [0x1, 0x1, 0x1, 0x1]),
    TableSpec::new("Td0", Source::Inverse, [0xe, 0x9, 0xd, 0xb]),
    TableSpec::new("Td1", Source::Inverse, [0xb, 0xe, 0x9, 0xd]),
    TableSpec::new("Td2", Source::Inverse, [0xd, 0xb, 0xe, 0x9]),
    TableSpec::new("Td3", Source::Inverse, [0x9, 0xd, 0xb, 0xe]),
    TableSpec::new("Td4", Source::Inverse, [0x1, 0x1, 0x1, 0x1]),
];

/// Entry `i` packs `sbox[i] * multiplier[j]` into byte `j`, most significant byte first.
pub fn generate_table(sbox: &SBox, multiplier: &Multiplier) -> Table {
    std::array::from_fn(|i| {
        let products = scalar_product(GF256(sbox.as_bytes()[i]), multiplier);
        u32::from_be_bytes(products.map(|product| product.0))
    })
}

#[cfg(test)]
fn standard_tables() -> Vec<(TableSpec, Table)> {
    let (forward, inverse) = super::derive_sbox().unwrap();
    STANDARD_TABLES
        .iter()
        .map(|spec| (*spec, spec.generate(&forward, &inverse)))
        .collect()
}

#[cfg(test)]
fn table(name: &str) -> Table {
    standard_tables()
        .into_iter()
        .find(|(spec, _)| spec.name == name)
        .map(|(_, table)| table)
        .unwrap()
}

#[test]
fn test_published_leading_entries() {
    let expected: [(&str, [u32; 4]); 10] = [
        ("Te0", [0xc66363a5, 0xf87c7c84, 0xee777799, 0xf67b7b8d]),
        ("Te1", [0xa5c66363, 0x84f87c7c, 0x99ee7777, 0x8df67b7b]),
        ("Te2", [0x63a5c663, 0x7c84f87c, 0x7799ee77, 0x7b8df67b]),
        ("Te3", [0x6363a5c6, 0x7c7c84f8, 0x777799ee, 0x7b7b8df6]),
        ("Te4", [0x63636363, 0x7c7c7c7c, 0x77777777, 0x7b7b7b7b]),
        ("Td0", [0x51f4a750, 0x7e416553, 0x1a17a4c3, 0x3a275e96]),
        ("Td1", [0x5051f4a7, 0x537e4165, 0xc31a17a4, 0x963a275e]),
        ("Td2", [0xa75051f4, 0x65537e41, 0xa4c31a17, 0x5e963a27]),
        ("Td3", [0xf4a75051, 0x4165537e, 0x17a4c31a, 0x275e963a]),
        ("Td4", [0x52525252, 0x09090909, 0x6a6a6a6a, 0xd5d5d5d5]),
    ];

    let tables = standard_tables();
    for ((spec, table), (name, leading)) in tables.iter().zip(expected) {
        assert_eq!(spec.name, name);
        assert_eq!(&table[..4], &leading, "{name}");
    }
    assert_eq!(table("Te0")[0xff], 0x2c16163a);
    assert_eq!(table("Td0")[0xff], 0xd0b85742);
}

#[test]
fn test_all_tables_generated() {
    let tables = standard_tables();
    assert_eq!(tables.len(), 10);
    for (spec, table) in &tables {
        assert_eq!(table.len(), 256);
        let expected_source = if spec.name.starts_with("Te") { Source::Forward } else { Source::Inverse };
        assert_eq!(spec.source, expected_source, "{}", spec.name);
    }
}

#[test]
fn test_identity_multiplier_replicates_sbox() {
    let (forward, inverse) = super::derive_sbox().unwrap();
    let identity = [GF256(1); 4];
    for sbox in [&forward, &inverse] {
        let generated = generate_table(sbox, &identity);
        for i in 0..=255u8 {
            assert_eq!(generated[i as usize], u32::from_be_bytes([sbox[i]; 4]));
        }
    }
    assert_eq!(table("Te4"), generate_table(&forward, &identity));
    assert_eq!(table("Td4"), generate_table(&inverse, &identity));
}

#[test]
fn test_rotated_tables() {
    // Te(n+1) is Te(n) rotated one byte to the right, likewise for Td
    for family in ["Te", "Td"] {
        let base = table(&format!("{family}0"));
        for n in 1..4u32 {
            let rotated = table(&format!("{family}{n}"));
            for i in 0..256 {
                assert_eq!(rotated[i], base[i].rotate_right(8 * n), "{family}{n}[{i}]");
            }
        }
    }
}

#[test]
fn test_encryption_round_column() {
    use super::vector::inner_product;

    // SubBytes followed by MixColumns on one column, done as four lookups
    let (forward, _) = super::derive_sbox().unwrap();
    let te: Vec<Table> = (0..4).map(|n| table(&format!("Te{n}"))).collect();
    let mix_rows: [Multiplier; 4] = [[2u8, 3, 1, 1], [1, 2, 3, 1], [1, 1, 2, 3], [3, 1, 1, 2]].map(|row| row.map(GF256));

    for column in [[0x00u8, 0x01, 0x02, 0x03], [0xdb, 0x13, 0x53, 0x45], [0xff, 0x80, 0x7f, 0x10]] {
        let fused = te[0][column[0] as usize]
            ^ te[1][column[1] as usize]
            ^ te[2][column[2] as usize]
            ^ te[3][column[3] as usize];

        let substituted = column.map(|byte| GF256(forward[byte]));
        let expected = mix_rows.map(|row| inner_product(&row, &substituted).0);
        assert_eq!(fused, u32::from_be_bytes(expected));
    }
}
