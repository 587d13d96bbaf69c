use anyhow::Context;
use std::io::Write;
use tgen_gf256::STANDARD_TABLES;

/// Derives both S-boxes, then generates and renders every selected table in order. Returns how
/// many tables were written.
pub fn emit_tables<W: Write>(config: &tgen_config::TgenConfig, sink: &mut W) -> anyhow::Result<usize> {
    let (forward, inverse) = tgen_gf256::derive_sbox().context("S-box derivation failed")?;
    tracing::event!(
        tracing::Level::DEBUG,
        forward_zero = forward[0],
        inverse_zero = inverse[0],
        "SBOX_DERIVED"
    );

    let mut emitted = 0;
    for spec in &STANDARD_TABLES {
        if !config.tables.is_selected(spec.name) {
            tracing::event!(tracing::Level::DEBUG, table = spec.name, "TABLE_SKIPPED");
            continue;
        }

        let table = spec.generate(&forward, &inverse);
        crate::render::render_table(sink, spec.name, &table, &config.output)
            .with_context(|| format!("Unable to write {}", spec.name))?;

        tracing::event!(
            tracing::Level::DEBUG,
            table = spec.name,
            source = ?spec.source,
            multiplier = ?spec.multiplier.map(|m| m.0),
            words = table.len(),
            "TABLE_RENDERED"
        );
        emitted += 1;
    }

    if emitted == 0 {
        tracing::warn!("No table matched the configured patterns");
    }

    Ok(emitted)
}

#[test]
fn test_default_emission() {
    let mut sink = Vec::new();
    let emitted = emit_tables(&tgen_config::TgenConfig::default(), &mut sink).unwrap();
    assert_eq!(emitted, 10);

    let output = String::from_utf8(sink).unwrap();
    assert!(output.starts_with(
        "static const u32 Te0[256] = {\n    0xc66363a5U, 0xf87c7c84U, 0xee777799U, 0xf67b7b8dU, \n    "
    ));
    assert!(output.contains("static const u32 Td0[256] = {\n    0x51f4a750U, 0x7e416553U,"));
    assert!(output.contains("static const u32 Td4[256] = {\n    0x52525252U, 0x09090909U,"));
    assert!(output.ends_with("\n};\n"));
    assert_eq!(output.matches("[256] = {").count(), 10);
    assert_eq!(output.matches("0x").count(), 10 * 256);

    let names: Vec<&str> = output
        .lines()
        .filter_map(|line| line.strip_prefix("static const u32 "))
        .map(|line| &line[..3])
        .collect();
    assert_eq!(names, ["Te0", "Te1", "Te2", "Te3", "Te4", "Td0", "Td1", "Td2", "Td3", "Td4"]);
}

#[test]
fn test_selected_emission() {
    let config: tgen_config::TgenConfig = toml::from_str(
        r#"
        [tables]
        inclusion_patterns = ["4$"]

        [output]
        syntax = { format = "rust" }
        "#,
    )
    .unwrap();

    let mut sink = Vec::new();
    assert_eq!(emit_tables(&config, &mut sink).unwrap(), 2);

    let output = String::from_utf8(sink).unwrap();
    assert!(output.starts_with("pub static TE4: [u32; 256] = [\n    0x63636363, 0x7c7c7c7c,"));
    assert!(output.contains("pub static TD4: [u32; 256] = [\n    0x52525252, 0x09090909,"));
    assert!(!output.contains("TE0"));
}

#[test]
fn test_nothing_selected() {
    let config: tgen_config::TgenConfig = toml::from_str("[tables]\ninclusion_patterns = []\n").unwrap();

    let mut sink = Vec::new();
    assert_eq!(emit_tables(&config, &mut sink).unwrap(), 0);
    assert!(sink.is_empty());
}
