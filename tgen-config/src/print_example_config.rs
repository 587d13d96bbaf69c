fn main() {
    let config = tgen_config::TgenConfig {
        output: tgen_config::OutputConfig {
            words_per_line: std::num::NonZeroUsize::new(4).unwrap(),
            indent: 4,
            syntax: tgen_config::Syntax::C {
                qualifiers: "static const".to_string(),
                word_type: "u32".to_string(),
                literal_suffix: "U".to_string(),
            },
        },
        tables: tgen_config::TablesConfig {
            inclusion_patterns: regex::RegexSet::new(vec!["^Te[0-4]$", "^Td[0-4]$"]).unwrap(),
            exclusion_patterns: regex::RegexSet::empty(),
        },
    };

    println!("{}", toml::to_string(&config).unwrap());
}
