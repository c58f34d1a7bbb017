use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

/// A single runtime argument to the log dispatcher.
///
/// The variants cover everything the printf-style template substitution can
/// match. An [`Arg::error`] value in the last position of an argument slice
/// is the trailing error: it is logged alongside the message but never
/// interpolated into it.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Char(char),
    Str(Cow<'static, str>),
    /// An error rendered together with its source chain.
    Error(String),
}

impl Arg {
    /// Captures `err` and its source chain for trailing-error dispatch.
    pub fn error<E: StdError + ?Sized>(err: &E) -> Arg {
        let mut rendered = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            rendered.push_str(": ");
            rendered.push_str(&cause.to_string());
            source = cause.source();
        }
        Arg::Error(rendered)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Arg::Error(_))
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Int(v) => write!(f, "{v}"),
            Arg::UInt(v) => write!(f, "{v}"),
            Arg::Float(v) => write!(f, "{v}"),
            Arg::Bool(v) => write!(f, "{v}"),
            Arg::Char(v) => write!(f, "{v}"),
            Arg::Str(v) => f.write_str(v),
            Arg::Error(v) => f.write_str(v),
        }
    }
}

macro_rules! arg_from {
    ($variant:ident: $($ty:ty),+) => {
        $(impl From<$ty> for Arg {
            fn from(value: $ty) -> Arg {
                Arg::$variant(value.into())
            }
        })+
    };
}

arg_from!(Int: i8, i16, i32, i64);
arg_from!(UInt: u8, u16, u32, u64);
arg_from!(Float: f32, f64);
arg_from!(Bool: bool);
arg_from!(Char: char);

impl From<isize> for Arg {
    fn from(value: isize) -> Arg {
        Arg::Int(value as i64)
    }
}

impl From<usize> for Arg {
    fn from(value: usize) -> Arg {
        Arg::UInt(value as u64)
    }
}

impl From<&'static str> for Arg {
    fn from(value: &'static str) -> Arg {
        Arg::Str(Cow::Borrowed(value))
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Arg {
        Arg::Str(Cow::Owned(value))
    }
}

impl From<Cow<'static, str>> for Arg {
    fn from(value: Cow<'static, str>) -> Arg {
        Arg::Str(value)
    }
}

/// Splits a trailing [`Arg::Error`] off the argument list.
///
/// Only the last element is inspected; error values anywhere else stay in the
/// list and format like any other argument.
pub(crate) fn split_trailing_error(args: &[Arg]) -> (&[Arg], Option<&str>) {
    match args.split_last() {
        Some((Arg::Error(err), rest)) => (rest, Some(err)),
        _ => (args, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Outer(Inner);

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("outer failed")
        }
    }

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("inner cause")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    impl StdError for Inner {}

    #[test]
    fn error_renders_source_chain() {
        let arg = Arg::error(&Outer(Inner));
        assert_eq!(arg, Arg::Error("outer failed: inner cause".to_string()));
    }

    #[test]
    fn split_takes_only_a_trailing_error() {
        let args = [Arg::from(1), Arg::error(&Inner)];
        let (rest, err) = split_trailing_error(&args);
        assert_eq!(rest, &[Arg::Int(1)]);
        assert_eq!(err, Some("inner cause"));

        let args = [Arg::error(&Inner), Arg::from(1)];
        let (rest, err) = split_trailing_error(&args);
        assert_eq!(rest.len(), 2);
        assert_eq!(err, None);
    }

    #[test]
    fn split_of_empty_list_is_empty() {
        let (rest, err) = split_trailing_error(&[]);
        assert!(rest.is_empty());
        assert_eq!(err, None);
    }

    #[test]
    fn display_matches_source_value() {
        assert_eq!(Arg::from(-7i32).to_string(), "-7");
        assert_eq!(Arg::from(7usize).to_string(), "7");
        assert_eq!(Arg::from(true).to_string(), "true");
        assert_eq!(Arg::from('x').to_string(), "x");
        assert_eq!(Arg::from("text").to_string(), "text");
    }
}
