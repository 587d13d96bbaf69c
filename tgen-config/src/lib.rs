use std::num::NonZeroUsize;

mod serdes;

const DEFAULT_WORDS_PER_LINE: NonZeroUsize = NonZeroUsize::new(4).unwrap();

/// Everything `tgen` reads from its TOML file. Every key is optional; an empty file renders the
/// tables in the layout of the `rijndael-alg-fst.c` constant arrays.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TgenConfig {
    pub output: OutputConfig,
    pub tables: TablesConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub words_per_line: NonZeroUsize,
    // Number of spaces in front of each line of words
    pub indent: usize,
    pub syntax: Syntax,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            words_per_line: DEFAULT_WORDS_PER_LINE,
            indent: 4,
            syntax: Syntax::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum Syntax {
    /// `static const u32 Te0[256] = { 0x...U, ... };`
    C {
        #[serde(default = "serdes::default_qualifiers")]
        qualifiers: String,
        #[serde(default = "serdes::default_word_type")]
        word_type: String,
        #[serde(default = "serdes::default_literal_suffix")]
        literal_suffix: String,
    },
    /// `pub static TE0: [u32; 256] = [ 0x..., ... ];`
    Rust {
        #[serde(default = "serdes::default_visibility")]
        visibility: String,
    },
}

impl Default for Syntax {
    fn default() -> Self {
        Syntax::C {
            qualifiers: serdes::default_qualifiers(),
            word_type: serdes::default_word_type(),
            literal_suffix: serdes::default_literal_suffix(),
        }
    }
}

// A table is emitted if and only if:
// - its name matches at least one inclusion pattern
// - its name matches no exclusion pattern
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TablesConfig {
    #[serde(
        serialize_with = "serdes::serialize_regex_set",
        deserialize_with = "serdes::deserialize_regex_set"
    )]
    pub inclusion_patterns: regex::RegexSet,
    #[serde(
        serialize_with = "serdes::serialize_regex_set",
        deserialize_with = "serdes::deserialize_regex_set"
    )]
    pub exclusion_patterns: regex::RegexSet,
}

impl TablesConfig {
    pub fn is_selected(&self, table_name: &str) -> bool {
        self.inclusion_patterns.is_match(table_name) && !self.exclusion_patterns.is_match(table_name)
    }
}

impl Default for TablesConfig {
    fn default() -> Self {
        TablesConfig {
            inclusion_patterns: regex::RegexSet::new([".*"]).expect("'.*' is a valid pattern"),
            exclusion_patterns: regex::RegexSet::empty(),
        }
    }
}

#[test]
fn test_empty_config_is_classic_layout() {
    let config: TgenConfig = toml::from_str("").unwrap();
    assert_eq!(config.output, OutputConfig::default());
    assert_eq!(config.output.words_per_line.get(), 4);
    assert_eq!(config.output.indent, 4);
    assert_eq!(
        config.output.syntax,
        Syntax::C {
            qualifiers: "static const".into(),
            word_type: "u32".into(),
            literal_suffix: "U".into(),
        }
    );
    for name in ["Te0", "Te4", "Td0", "Td4"] {
        assert!(config.tables.is_selected(name));
    }
}

#[test]
fn test_rust_syntax() {
    let config: TgenConfig = toml::from_str(
        r#"
        [output]
        words_per_line = 8
        syntax = { format = "rust" }
        "#,
    )
    .unwrap();
    assert_eq!(config.output.words_per_line.get(), 8);
    assert_eq!(config.output.indent, 4);
    assert_eq!(config.output.syntax, Syntax::Rust { visibility: "pub".into() });
}

#[test]
fn test_partial_c_syntax() {
    let config: TgenConfig = toml::from_str(
        r#"
        [output.syntax]
        format = "c"
        word_type = "uint32_t"
        "#,
    )
    .unwrap();
    assert_eq!(
        config.output.syntax,
        Syntax::C {
            qualifiers: "static const".into(),
            word_type: "uint32_t".into(),
            literal_suffix: "U".into(),
        }
    );
}

#[test]
fn test_table_selection() {
    let config: TgenConfig = toml::from_str(
        r#"
        [tables]
        inclusion_patterns = ["^Te"]
        exclusion_patterns = ["4$"]
        "#,
    )
    .unwrap();
    assert!(config.tables.is_selected("Te0"));
    assert!(config.tables.is_selected("Te3"));
    assert!(!config.tables.is_selected("Te4"));
    assert!(!config.tables.is_selected("Td0"));
}

#[test]
fn test_invalid_pattern() {
    let error = toml::from_str::<TgenConfig>(
        r#"
        [tables]
        inclusion_patterns = ["Te[0-"]
        "#,
    )
    .unwrap_err();
    assert!(error.to_string().contains("Invalid table pattern at index 0"), "{error}");
}

#[test]
fn test_zero_words_per_line_rejected() {
    assert!(toml::from_str::<TgenConfig>("[output]\nwords_per_line = 0\n").is_err());
}

#[test]
fn test_serialized_config_reloads() {
    let mut config = TgenConfig::default();
    config.output.syntax = Syntax::Rust { visibility: "pub(crate)".into() };
    config.tables.exclusion_patterns = regex::RegexSet::new(["^Td"]).unwrap();

    let reloaded: TgenConfig = toml::from_str(&toml::to_string(&config).unwrap()).unwrap();
    assert_eq!(reloaded.output, config.output);
    assert_eq!(reloaded.tables.exclusion_patterns.patterns(), &["^Td".to_owned()]);
    assert!(!reloaded.tables.is_selected("Td2"));
    assert!(reloaded.tables.is_selected("Te2"));
}
