//! `application/x-www-form-urlencoded` body decoding.

use percent_encoding::percent_decode_str;
use std::collections::HashMap;

/// Decoded form fields from a request body.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
}

impl FormData {
    pub fn parse(body: &str) -> Self {
        let mut fields = HashMap::new();
        for pair in body.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            fields.insert(decode(key), decode(value));
        }
        Self { fields }
    }

    /// Field value, or the empty string when absent.
    pub fn value(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }
}

fn decode(raw: &str) -> String {
    // Form encoding: '+' means space, then percent escapes.
    let unplussed = raw.replace('+', " ");
    percent_decode_str(&unplussed).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::FormData;

    #[test]
    fn parses_plus_and_percent_escapes() {
        let form = FormData::parse("list_name=weekend+chores&todo=caf%C3%A9%20run");
        assert_eq!(form.value("list_name"), "weekend chores");
        assert_eq!(form.value("todo"), "café run");
    }

    #[test]
    fn missing_fields_read_as_empty() {
        let form = FormData::parse("");
        assert_eq!(form.value("list_name"), "");
    }

    #[test]
    fn keys_without_values_are_kept() {
        let form = FormData::parse("completed");
        assert_eq!(form.value("completed"), "");
    }
}
