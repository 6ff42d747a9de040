//! Human-readable names for types and callables.

/// Last path segment of a type path, with generic argument lists removed.
///
/// `core::num::error::ParseIntError` becomes `ParseIntError`,
/// `app::jobs::run::{{closure}}` becomes `run` and
/// `<i32 as core::str::traits::FromStr>::from_str` becomes `from_str`.
pub(crate) fn short_type_name(full: &str) -> String {
    let stripped = strip_generics(full);
    let mut path = stripped.as_str();
    while let Some(rest) = path.strip_suffix("::{{closure}}") {
        path = rest;
    }
    let name = path.rsplit("::").next().unwrap_or(path).trim();
    if name.is_empty() {
        full.to_string()
    } else {
        name.to_string()
    }
}

/// Remove every `<...>` group, including qualified-path prefixes
/// (`<T as Trait>`) and `<impl T>` blocks. A `>` that belongs to `->` does
/// not close a group.
fn strip_generics(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut depth = 0usize;
    let mut prev = None;
    for c in full.chars() {
        match c {
            '<' => depth += 1,
            '>' if depth > 0 && prev != Some('-') => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
        prev = Some(c);
    }
    out
}

/// Short name of `T`'s type.
pub(crate) fn type_label<T: ?Sized>() -> String {
    short_type_name(std::any::type_name::<T>())
}

/// Short name of an error type.
///
/// Boxed trait objects are named after their trait, so
/// `Box<dyn Error + Send + Sync>` becomes `Error`.
pub(crate) fn error_label<E: ?Sized>() -> String {
    let full = std::any::type_name::<E>();
    if let Some(inner) = full.strip_prefix("alloc::boxed::Box<dyn ") {
        let first = inner.split(" + ").next().unwrap_or(inner);
        return short_type_name(first.trim_end_matches('>'));
    }
    short_type_name(full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample() {}

    struct Wrapper<T>(T);

    impl<T: Copy> Wrapper<T> {
        fn get(&self) -> T {
            self.0
        }
    }

    fn label_of<F>(_: &F) -> String {
        type_label::<F>()
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("core::num::error::ParseIntError"), "ParseIntError");
        assert_eq!(short_type_name("std::io::error::Error"), "Error");
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn test_generics_are_dropped() {
        assert_eq!(
            short_type_name("app::errors::Wrapped<alloc::string::String>"),
            "Wrapped"
        );
        assert_eq!(
            short_type_name("app::Outer<app::Inner<u8>, alloc::vec::Vec<u8>>"),
            "Outer"
        );
    }

    #[test]
    fn test_trait_method_paths() {
        assert_eq!(
            short_type_name("<i32 as core::str::traits::FromStr>::from_str"),
            "from_str"
        );
        assert_eq!(short_type_name("core::num::<impl u8>::from_str_radix"), "from_str_radix");
        assert_eq!(short_type_name("app::Wrapper<i32>::get"), "get");
    }

    #[test]
    fn test_fn_pointer_arrows_do_not_close_groups() {
        assert_eq!(short_type_name("app::Task<fn(u8) -> u8>::run"), "run");
    }

    #[test]
    fn test_closures_take_enclosing_name() {
        assert_eq!(short_type_name("app::jobs::run::{{closure}}"), "run");
        assert_eq!(
            short_type_name("app::jobs::run::{{closure}}::{{closure}}"),
            "run"
        );
        assert_eq!(short_type_name("app::jobs::run<u8>::{{closure}}"), "run");
    }

    #[test]
    fn test_fn_item_labels() {
        assert_eq!(label_of(&sample), "sample");
        assert_eq!(label_of(&i32::from_str), "from_str");
        assert_eq!(label_of(&<u8>::from_str_radix), "from_str_radix");
        assert_eq!(label_of(&Wrapper::<i32>::get), "get");
    }

    #[test]
    fn test_error_labels() {
        assert_eq!(error_label::<std::num::ParseIntError>(), "ParseIntError");
        assert_eq!(error_label::<Box<dyn std::error::Error>>(), "Error");
        assert_eq!(
            error_label::<Box<dyn std::error::Error + Send + Sync>>(),
            "Error"
        );
        assert_eq!(error_label::<anyhow::Error>(), "Error");
    }
}
