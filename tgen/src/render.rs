use std::io::Write;
use tgen_config::{OutputConfig, Syntax};

/// Writes `words` as a constant array declaration named `name`.
pub fn render_table<W: Write>(sink: &mut W, name: &str, words: &[u32], output: &OutputConfig) -> std::io::Result<()> {
    let indent = " ".repeat(output.indent);
    let words_per_line = output.words_per_line.get();

    match &output.syntax {
        Syntax::C {
            qualifiers,
            word_type,
            literal_suffix,
        } => {
            let declaration = join_non_empty(&[qualifiers.as_str(), word_type.as_str()]);
            write!(sink, "{declaration} {name}[{}] = {{\n{indent}", words.len())?;
            for (i, word) in words.iter().enumerate() {
                write!(sink, "{word:#010x}{literal_suffix}")?;
                if i + 1 != words.len() {
                    write!(sink, ", ")?;
                    if (i + 1) % words_per_line == 0 {
                        write!(sink, "\n{indent}")?;
                    }
                }
            }
            write!(sink, "\n}};\n")
        }
        Syntax::Rust { visibility } => {
            let declaration = join_non_empty(&[visibility.as_str(), "static"]);
            writeln!(
                sink,
                "{declaration} {}: [u32; {}] = [",
                name.to_uppercase(),
                words.len()
            )?;
            for line in words.chunks(words_per_line) {
                let line: Vec<String> = line.iter().map(|word| format!("{word:#010x}")).collect();
                writeln!(sink, "{indent}{},", line.join(", "))?;
            }
            writeln!(sink, "];")
        }
    }
}

fn join_non_empty(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
fn render_to_string(words: &[u32], output: &OutputConfig) -> String {
    let mut sink = Vec::new();
    render_table(&mut sink, "Tx", words, output).unwrap();
    String::from_utf8(sink).unwrap()
}

#[test]
fn test_c_layout() {
    let output = OutputConfig::default();
    assert_eq!(
        render_to_string(&[1, 2, 3, 4, 5, 0xc66363a5], &output),
        "static const u32 Tx[6] = {\n    \
         0x00000001U, 0x00000002U, 0x00000003U, 0x00000004U, \n    \
         0x00000005U, 0xc66363a5U\n};\n"
    );
}

#[test]
fn test_c_layout_custom() {
    let output = OutputConfig {
        words_per_line: std::num::NonZeroUsize::new(2).unwrap(),
        indent: 2,
        syntax: Syntax::C {
            qualifiers: String::new(),
            word_type: "uint32_t".into(),
            literal_suffix: String::new(),
        },
    };
    assert_eq!(
        render_to_string(&[0xa, 0xb, 0xc, 0xd], &output),
        "uint32_t Tx[4] = {\n  0x0000000a, 0x0000000b, \n  0x0000000c, 0x0000000d\n};\n"
    );
}

#[test]
fn test_rust_layout() {
    let output = OutputConfig {
        syntax: Syntax::Rust {
            visibility: "pub(crate)".into(),
        },
        ..OutputConfig::default()
    };
    assert_eq!(
        render_to_string(&[1, 2, 3, 4, 5, 6], &output),
        "pub(crate) static TX: [u32; 6] = [\n    \
         0x00000001, 0x00000002, 0x00000003, 0x00000004,\n    \
         0x00000005, 0x00000006,\n];\n"
    );
}

#[test]
fn test_exact_multiple_of_line_length() {
    // No separator follows the final word, so no dangling line break either
    let output = OutputConfig::default();
    assert_eq!(
        render_to_string(&[1, 2, 3, 4], &output),
        "static const u32 Tx[4] = {\n    0x00000001U, 0x00000002U, 0x00000003U, 0x00000004U\n};\n"
    );
}
