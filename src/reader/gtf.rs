use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::trace;

const ATTRIBUTE_SEPARATOR: char = ';';
const KEY_VALUE_SEPARATOR: char = ' ';
const QUOTE: char = '"';

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// The attribute column (column 9) of a GTF record, parsed into an ordered map.
///
/// Two views of the column are kept:
///
/// * `occurrences`: every `(key, value)` pair in the order it appeared,
///   duplicates included. This is what drives the output order.
/// * `map`: the current value of each key. A repeated key takes the value of
///   its last occurrence but keeps the position of its first one. Keys added
///   with [AttributeList::insert] go to the end.
///
/// Segments without a space separating key and value are dropped while
/// parsing; the number of dropped segments is available from
/// [AttributeList::n_skipped].
///
/// # Examples
///
/// ```rust
/// use refgtf::reader::AttributeList;
///
/// let mut attrs = AttributeList::parse(r#"gene_id "G1"; tag "basic"; tag "CCDS";"#);
/// assert_eq!(attrs.get("tag"), Some("CCDS"));
/// assert_eq!(attrs.occurrences().len(), 3);
///
/// attrs.remove("tag");
/// attrs.insert("gene_name", "Alpha");
/// assert_eq!(attrs.to_gtf_string(&[]), r#"gene_id "G1"; gene_name "Alpha";"#);
/// ```
pub struct AttributeList {
    occurrences: Vec<(String, String)>,
    map: IndexMap<String, String>,
    n_skipped: usize,
}

impl AttributeList {
    /// Parses a GTF attribute string. This never fails: malformed segments are skipped.
    ///
    /// The string is trimmed and split on `;`. Each non-empty segment is split
    /// at its first space into the key and the raw value; the raw value is
    /// trimmed and one surrounding layer of double quotes is removed.
    pub fn parse(s: &str) -> AttributeList {
        let mut attrs = AttributeList::default();

        for segment in s.trim().split(ATTRIBUTE_SEPARATOR) {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let Some((key, raw_value)) = segment.split_once(KEY_VALUE_SEPARATOR) else {
                attrs.n_skipped += 1;
                continue;
            };
            let value = unquote(raw_value);
            attrs
                .occurrences
                .push((key.to_string(), value.to_string()));
            attrs.map.insert(key.to_string(), value.to_string());
        }

        if attrs.n_skipped > 0 {
            trace!(
                "skipped {} attribute segment(s) without a key-value separator",
                attrs.n_skipped
            );
        }
        attrs
    }

    /// Returns the current value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|v| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Sets `key` to `value`, returning the previous value. An existing key
    /// keeps its position; a new key is placed after all current keys.
    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> Option<String> {
        self.map.insert(key.into(), value.into())
    }

    /// Removes `key` from the map, keeping the relative order of the remaining keys.
    /// The recorded occurrences are not affected.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.map.shift_remove(key)
    }

    /// Number of distinct keys currently in the map.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The parsed `(key, value)` pairs in input order, including repeated keys.
    pub fn occurrences(&self) -> &[(String, String)] {
        &self.occurrences
    }

    /// The number of segments dropped by [AttributeList::parse].
    pub fn n_skipped(&self) -> usize {
        self.n_skipped
    }

    /// Iterates over the current `(key, value)` pairs in map order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serializes the attributes as `key "value"` tokens joined by `"; "` with a trailing `;`.
    ///
    /// The order is derived from the input occurrences: keys listed in `skip`
    /// are passed over, every other key that is still present is written once,
    /// at its first occurrence, with its current value. Keys that never
    /// occurred in the input (i.e. were inserted afterwards) follow, in map order.
    pub fn to_gtf_string(&self, skip: &[&str]) -> String {
        let mut emitted: HashSet<&str> = HashSet::with_capacity(self.map.len());
        let mut tokens: Vec<String> = Vec::with_capacity(self.map.len());

        for (key, _) in self.occurrences.iter() {
            if skip.contains(&key.as_str()) {
                continue;
            }
            if let Some(value) = self.map.get(key) {
                if emitted.insert(key.as_str()) {
                    tokens.push(format_attribute(key, value));
                }
            }
        }

        for (key, value) in self.map.iter() {
            if !emitted.contains(key.as_str()) {
                tokens.push(format_attribute(key, value));
            }
        }

        let mut out = tokens.join("; ");
        out.push(ATTRIBUTE_SEPARATOR);
        out
    }
}

fn format_attribute(key: &str, value: &str) -> String {
    format!("{key}{KEY_VALUE_SEPARATOR}{QUOTE}{value}{QUOTE}")
}

// one quote is removed from each end, independently
fn unquote(v: &str) -> &str {
    let v = v.trim();
    let v = v.strip_prefix(QUOTE).unwrap_or(v);
    v.strip_suffix(QUOTE).unwrap_or(v)
}
