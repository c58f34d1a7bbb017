//! Runtime printf-style template substitution.
//!
//! The dispatcher accepts arguments at runtime, so templates are interpreted
//! here instead of going through `format_args!`. Substitution failures are
//! recoverable by design: the dispatcher falls back to plain concatenation and
//! never surfaces them to the caller.

use std::fmt::Write;

use thiserror::Error;

use crate::args::Arg;

/// Why a template could not be applied to its arguments.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum FormatError {
    #[error("template ends with a lone `%`")]
    TruncatedSpec,
    #[error("unknown conversion `%{0}`")]
    UnknownConversion(char),
    #[error("placeholder {index} has no matching argument")]
    MissingArg { index: usize },
    #[error("argument {index} does not match `%{spec}`")]
    TypeMismatch { index: usize, spec: char },
    #[error("{extra} argument(s) left over after the last placeholder")]
    ExtraArgs { extra: usize },
}

/// Substitutes `%`-placeholders in `message` with `args`, in order.
///
/// Supported conversions: `%s` (any value), `%d`/`%i` (signed or unsigned
/// integers), `%u` (unsigned), `%f` (floats), `%c` (chars), `%b` (bools),
/// `%x`/`%X` (integers in hex) and `%%` (literal percent). Each placeholder
/// must consume exactly one argument and every argument must be consumed.
pub(crate) fn substitute(message: &str, args: &[Arg]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(message.len() + 8 * args.len());
    let mut next = 0;
    let mut chars = message.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let spec = chars.next().ok_or(FormatError::TruncatedSpec)?;
        if spec == '%' {
            out.push('%');
            continue;
        }
        let arg = args.get(next).ok_or(FormatError::MissingArg { index: next })?;
        apply(&mut out, spec, arg, next)?;
        next += 1;
    }

    if next < args.len() {
        return Err(FormatError::ExtraArgs {
            extra: args.len() - next,
        });
    }
    Ok(out)
}

/// Appends the display form of every argument after the message, in order.
///
/// This is the fallback when [`substitute`] fails, mirroring the forgiving
/// behavior call sites rely on: logging never fails on a bad template.
pub(crate) fn concat(message: &str, args: &[Arg]) -> String {
    let mut out = String::from(message);
    for arg in args {
        let _ = write!(out, "{arg}");
    }
    out
}

fn apply(out: &mut String, spec: char, arg: &Arg, index: usize) -> Result<(), FormatError> {
    let mismatch = FormatError::TypeMismatch { index, spec };
    match spec {
        's' => {
            let _ = write!(out, "{arg}");
        }
        'd' | 'i' => match arg {
            Arg::Int(v) => {
                let _ = write!(out, "{v}");
            }
            Arg::UInt(v) => {
                let _ = write!(out, "{v}");
            }
            _ => return Err(mismatch),
        },
        'u' => match arg {
            Arg::UInt(v) => {
                let _ = write!(out, "{v}");
            }
            Arg::Int(v) if *v >= 0 => {
                let _ = write!(out, "{v}");
            }
            _ => return Err(mismatch),
        },
        'f' => match arg {
            Arg::Float(v) => {
                let _ = write!(out, "{v}");
            }
            _ => return Err(mismatch),
        },
        'c' => match arg {
            Arg::Char(v) => {
                out.push(*v);
            }
            _ => return Err(mismatch),
        },
        'b' => match arg {
            Arg::Bool(v) => {
                let _ = write!(out, "{v}");
            }
            _ => return Err(mismatch),
        },
        'x' => match arg {
            Arg::Int(v) => {
                let _ = write!(out, "{v:x}");
            }
            Arg::UInt(v) => {
                let _ = write!(out, "{v:x}");
            }
            _ => return Err(mismatch),
        },
        'X' => match arg {
            Arg::Int(v) => {
                let _ = write!(out, "{v:X}");
            }
            Arg::UInt(v) => {
                let _ = write!(out, "{v:X}");
            }
            _ => return Err(mismatch),
        },
        other => return Err(FormatError::UnknownConversion(other)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_matching_placeholders() {
        let args = [Arg::from("disk"), Arg::from(93u32)];
        assert_eq!(
            substitute("%s usage at %d%%", &args).unwrap(),
            "disk usage at 93%"
        );
    }

    #[test]
    fn substitutes_every_conversion() {
        assert_eq!(substitute("%d", &[Arg::from(-5i32)]).unwrap(), "-5");
        assert_eq!(substitute("%i", &[Arg::from(5u8)]).unwrap(), "5");
        assert_eq!(substitute("%u", &[Arg::from(5usize)]).unwrap(), "5");
        assert_eq!(substitute("%f", &[Arg::from(0.5f64)]).unwrap(), "0.5");
        assert_eq!(substitute("%c", &[Arg::from('x')]).unwrap(), "x");
        assert_eq!(substitute("%b", &[Arg::from(false)]).unwrap(), "false");
        assert_eq!(substitute("%x", &[Arg::from(255u8)]).unwrap(), "ff");
        assert_eq!(substitute("%X", &[Arg::from(255u8)]).unwrap(), "FF");
        assert_eq!(substitute("%s", &[Arg::from(true)]).unwrap(), "true");
    }

    #[test]
    fn rejects_type_mismatch() {
        assert_eq!(
            substitute("x=%d", &[Arg::from("notanumber")]),
            Err(FormatError::TypeMismatch { index: 0, spec: 'd' })
        );
        assert_eq!(
            substitute("%u", &[Arg::from(-1i32)]),
            Err(FormatError::TypeMismatch { index: 0, spec: 'u' })
        );
        assert_eq!(
            substitute("%f", &[Arg::from(1i32)]),
            Err(FormatError::TypeMismatch { index: 0, spec: 'f' })
        );
    }

    #[test]
    fn rejects_count_mismatch() {
        assert_eq!(
            substitute("%s %s", &[Arg::from("one")]),
            Err(FormatError::MissingArg { index: 1 })
        );
        assert_eq!(
            substitute("%s", &[Arg::from("one"), Arg::from("two")]),
            Err(FormatError::ExtraArgs { extra: 1 })
        );
        // A template without placeholders cannot consume any argument.
        assert_eq!(
            substitute("plain", &[Arg::from(1)]),
            Err(FormatError::ExtraArgs { extra: 1 })
        );
    }

    #[test]
    fn rejects_malformed_templates() {
        assert_eq!(substitute("50%", &[]), Err(FormatError::TruncatedSpec));
        assert_eq!(
            substitute("%q", &[Arg::from(1)]),
            Err(FormatError::UnknownConversion('q'))
        );
    }

    #[test]
    fn literal_percent_consumes_no_argument() {
        assert_eq!(substitute("100%%", &[]).unwrap(), "100%");
    }

    #[test]
    fn concat_appends_in_order() {
        let args = [Arg::from("a"), Arg::from(1), Arg::from(true)];
        assert_eq!(concat("msg: ", &args), "msg: a1true");
        assert_eq!(concat("x=%d", &[Arg::from("notanumber")]), "x=%dnotanumber");
    }
}
