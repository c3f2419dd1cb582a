/// Builds a [`PropertyMap`](crate::PropertyMap) from `key => value` pairs.
///
/// Keys may be string literals, `String`s or any other [`PropertyKey`](crate::PropertyKey)
/// (typed field tokens included). Values go through `Value::from`.
///
/// # Panics
///
/// Panics if the same key is given twice.
///
/// ```
/// use propmap_value::{Value, propmap};
///
/// let map = propmap! { "a" => 1, "b" => propmap! { "c" => "x" } };
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get_value("a"), Some(&Value::Int(1)));
/// ```
#[macro_export]
macro_rules! propmap {
    () => {
        $crate::PropertyMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::PropertyMap::from_pairs([
            $((
                ::std::string::String::from($crate::PropertyKey::key_name(&$key)),
                $crate::Value::from($value),
            )),+
        ])
    };
}

/// Builds a [`Value::List`](crate::Value::List). Elements may be of mixed kinds.
///
/// ```
/// use propmap_value::{Value, list};
///
/// assert_eq!(list!["foo", 10].as_list().map(<[Value]>::len), Some(2));
/// ```
#[macro_export]
macro_rules! list {
    () => {
        $crate::Value::List(::std::vec::Vec::new())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Value::List(::std::vec![$($crate::Value::from($item)),+])
    };
}

/// Builds a [`Value::Set`](crate::Value::Set). Repeated elements collapse.
#[macro_export]
macro_rules! set {
    () => {
        $crate::Value::Set($crate::ValueSet::new())
    };
    ($($item:expr),+ $(,)?) => {{
        let mut set = $crate::ValueSet::new();
        $(set.insert($crate::Value::from($item));)+
        $crate::Value::Set(set)
    }};
}
