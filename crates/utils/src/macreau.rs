
/// Builds a `bevy::utils::HashMap<String, _>` from `key => value` pairs.
#[macro_export]
macro_rules! bmap(
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut m = ::bevy::utils::HashMap::default();
            $(
                m.insert($key.to_string(), $value);
            )+
            m
        }
     };
);
