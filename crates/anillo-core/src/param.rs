//! Typed node parameters.
//!
//! Every node carries an ordered list of [`ParamValue`]s fixed at creation
//! time. The patch text renders each value as a single atom; `parse_token`
//! is the exact inverse of the `Display` form, which is what makes emitted
//! patches lossless under re-parsing.

use std::fmt;

/// A single node parameter.
///
/// Four atom classes cover everything the host format carries: integers,
/// reals, bare symbols, and quoted strings (the only form that survives
/// embedded whitespace).
///
/// Symbols must not themselves look like numbers — a symbol `"5"` would
/// re-parse as `Int(5)`. The builder never produces such symbols and the
/// parser cannot, so this stays a documentation-level invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Integer atom (widget sizes, selector match values, slot counts).
    Int(i64),
    /// Real atom, always rendered with a decimal point or exponent.
    Real(f64),
    /// Bare symbolic atom (addresses, style tags, `$n` slot references).
    Sym(String),
    /// Quoted string atom; may contain whitespace.
    Str(String),
}

impl ParamValue {
    /// Builds a symbol parameter from anything string-like.
    pub fn sym(s: impl Into<String>) -> Self {
        ParamValue::Sym(s.into())
    }

    /// Parses a single (already unquoted-aware) token back into a value.
    ///
    /// Quoted tokens become [`Str`](ParamValue::Str); tokens that parse as
    /// `i64` become [`Int`](ParamValue::Int); tokens that carry a decimal
    /// point or exponent and parse as `f64` become
    /// [`Real`](ParamValue::Real); everything else is a
    /// [`Sym`](ParamValue::Sym). This ordering means `inf`, `NaN`, and `$1`
    /// all stay symbolic.
    pub fn parse_token(token: &str) -> Self {
        if let Some(inner) = token.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
            return ParamValue::Str(unescape(inner));
        }
        if let Ok(i) = token.parse::<i64>() {
            return ParamValue::Int(i);
        }
        if token.contains(['.', 'e', 'E'])
            && let Ok(r) = token.parse::<f64>()
        {
            return ParamValue::Real(r);
        }
        ParamValue::Sym(token.to_string())
    }

    /// `true` for [`Int`](ParamValue::Int).
    pub fn is_int(&self) -> bool {
        matches!(self, ParamValue::Int(_))
    }

    /// `true` for [`Sym`](ParamValue::Sym).
    pub fn is_sym(&self) -> bool {
        matches!(self, ParamValue::Sym(_))
    }

    /// `true` for the symbolic atom classes, [`Sym`](ParamValue::Sym) and
    /// [`Str`](ParamValue::Str) — address-like parameters accept either,
    /// the quoted form being the escape hatch for whitespace.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, ParamValue::Sym(_) | ParamValue::Str(_))
    }

    /// The symbol text, if this is a symbol.
    pub fn as_sym(&self) -> Option<&str> {
        match self {
            ParamValue::Sym(s) => Some(s),
            _ => None,
        }
    }

    /// The integer value, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Real(r) => write!(f, "{}", format_real(*r)),
            ParamValue::Sym(s) => f.write_str(s),
            ParamValue::Str(s) => write!(f, "\"{}\"", escape(s)),
        }
    }
}

/// Formats a real so it always re-parses as a real.
///
/// Rust's `{:?}` prints most floats with a decimal point but drops it for
/// exponent forms like `1e-5`; those already re-parse as reals because of
/// the exponent marker, so the only correction needed is the bare-integer
/// rendering that never occurs with `{:?}`.
fn format_real(r: f64) -> String {
    let s = format!("{r:?}");
    if s.contains(['.', 'e', 'E']) {
        s
    } else {
        format!("{s}.0")
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_round_trip() {
        let p = ParamValue::Int(-42);
        assert_eq!(ParamValue::parse_token(&p.to_string()), p);
    }

    #[test]
    fn real_round_trip() {
        for r in [0.0, -1.5, 0.0001, 1e-5, 2.5e21] {
            let p = ParamValue::Real(r);
            assert_eq!(ParamValue::parse_token(&p.to_string()), p, "r = {r}");
        }
    }

    #[test]
    fn real_zero_keeps_decimal_point() {
        assert_eq!(ParamValue::Real(0.0).to_string(), "0.0");
    }

    #[test]
    fn sym_round_trip() {
        for s in ["rcv_tgl_0", "$1", "fwd", "rcv_tgl_3_$0"] {
            let p = ParamValue::sym(s);
            assert_eq!(ParamValue::parse_token(&p.to_string()), p, "s = {s}");
        }
    }

    #[test]
    fn numeric_lookalike_symbols_stay_symbolic() {
        // "inf" and "NaN" parse as f64 but carry no decimal point or
        // exponent marker, so they must come back as symbols.
        for s in ["inf", "NaN", "infinity"] {
            assert_eq!(ParamValue::parse_token(s), ParamValue::sym(s));
        }
    }

    #[test]
    fn str_round_trip_with_spaces_and_quotes() {
        for s in ["two words", "quo\"ted", "back\\slash", ""] {
            let p = ParamValue::Str(s.to_string());
            assert_eq!(ParamValue::parse_token(&p.to_string()), p, "s = {s}");
        }
    }

    #[test]
    fn dollar_token_is_not_a_number() {
        assert!(ParamValue::parse_token("$12").is_sym());
    }
}
