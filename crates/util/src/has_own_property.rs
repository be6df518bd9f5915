use indexmap::IndexMap;

/// Check if an ordered map has an own property with the given key.
///
/// This is the Rust equivalent of `key in obj` for plain objects, which have
/// no prototype chain in the expression runtime.
///
/// # Examples
///
/// ```
/// use indexmap::IndexMap;
/// use ng_expression_util::has_own_property::has_own_property;
///
/// let mut map = IndexMap::new();
/// map.insert("foo".to_string(), 1);
///
/// assert!(has_own_property(&map, "foo"));
/// assert!(!has_own_property(&map, "bar"));
/// ```
pub fn has_own_property<V>(obj: &IndexMap<String, V>, key: &str) -> bool {
    obj.contains_key(key)
}
