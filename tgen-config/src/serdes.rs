pub(crate) fn serialize_regex_set<S>(regex_set: &regex::RegexSet, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::Serialize;
    let patterns: Vec<&str> = regex_set.patterns().iter().map(|s| s.as_str()).collect();
    patterns.serialize(serializer)
}

pub(crate) fn deserialize_regex_set<'de, D>(deserializer: D) -> Result<regex::RegexSet, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    let patterns: Vec<String> = Vec::deserialize(deserializer)?;

    for (i, pattern) in patterns.iter().enumerate() {
        if let Err(e) = regex::Regex::new(pattern) {
            return Err(serde::de::Error::custom(format!(
                "Invalid table pattern at index {i}: '{pattern}' - {e}"
            )));
        }
    }

    regex::RegexSet::new(&patterns).map_err(serde::de::Error::custom)
}

pub(crate) fn default_qualifiers() -> String {
    "static const".to_owned()
}

pub(crate) fn default_word_type() -> String {
    "u32".to_owned()
}

pub(crate) fn default_literal_suffix() -> String {
    "U".to_owned()
}

pub(crate) fn default_visibility() -> String {
    "pub".to_owned()
}
