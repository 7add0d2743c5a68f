//! CSS-like layer transforms.
//!
//! A [`BaseTransform`] is the static depth-simulation part of a layer's transform (for example
//! `translateZ(-10px) scale(2)`). Every frame the engine appends a `translateY(..px)` to it; the
//! combined string is what lands in the element's `transform` style.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use crate::foundation::core::{Affine, Vec2};
use crate::foundation::error::{SoleilError, SoleilResult};

/// One function in a CSS transform list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformFn {
    /// `translateX(<px>)`
    TranslateX(f64),
    /// `translateY(<px>)`
    TranslateY(f64),
    /// `translateZ(<px>)`; only meaningful under a 3D perspective, ignored by [`BaseTransform::to_affine`].
    TranslateZ(f64),
    /// `scale(<x>)` or `scale(<x>, <y>)`
    Scale(f64, f64),
    /// `rotate(<deg>)`
    RotateDeg(f64),
}

impl TransformFn {
    fn values_finite(self) -> bool {
        match self {
            Self::TranslateX(v) | Self::TranslateY(v) | Self::TranslateZ(v) | Self::RotateDeg(v) => {
                v.is_finite()
            }
            Self::Scale(x, y) => x.is_finite() && y.is_finite(),
        }
    }

    fn to_affine(self) -> Affine {
        match self {
            Self::TranslateX(x) => Affine::translate(Vec2::new(x, 0.0)),
            Self::TranslateY(y) => Affine::translate(Vec2::new(0.0, y)),
            Self::TranslateZ(_) => Affine::IDENTITY,
            Self::Scale(x, y) => Affine::scale_non_uniform(x, y),
            Self::RotateDeg(deg) => Affine::rotate(deg.to_radians()),
        }
    }
}

impl fmt::Display for TransformFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::TranslateX(v) => write!(f, "translateX({}px)", CssNum(v)),
            Self::TranslateY(v) => write!(f, "translateY({}px)", CssNum(v)),
            Self::TranslateZ(v) => write!(f, "translateZ({}px)", CssNum(v)),
            Self::Scale(x, y) if x == y => write!(f, "scale({})", CssNum(x)),
            Self::Scale(x, y) => write!(f, "scale({}, {})", CssNum(x), CssNum(y)),
            Self::RotateDeg(v) => write!(f, "rotate({}deg)", CssNum(v)),
        }
    }
}

/// Static per-layer transform applied before the scroll translation.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BaseTransform {
    fns: Vec<TransformFn>,
}

impl BaseTransform {
    pub fn new(fns: Vec<TransformFn>) -> SoleilResult<Self> {
        if let Some(bad) = fns.iter().find(|f| !f.values_finite()) {
            return Err(SoleilError::config(format!(
                "transform function {bad:?} has a non-finite value"
            )));
        }
        Ok(Self { fns })
    }

    pub fn identity() -> Self {
        Self::default()
    }

    /// `translateZ(<z>px) scale(<scale>)`, the shape used for simulated depth planes.
    pub fn depth(translate_z_px: f64, scale: f64) -> SoleilResult<Self> {
        Self::new(Self::from_depth_unchecked(translate_z_px, scale).fns)
    }

    // Callers pass literal, finite values.
    pub(crate) fn from_depth_unchecked(translate_z_px: f64, scale: f64) -> Self {
        Self {
            fns: vec![
                TransformFn::TranslateZ(translate_z_px),
                TransformFn::Scale(scale, scale),
            ],
        }
    }

    pub fn parse(s: &str) -> SoleilResult<Self> {
        let mut fns = Vec::new();
        let mut rest = s.trim();
        while !rest.is_empty() {
            let open = rest.find('(').ok_or_else(|| {
                SoleilError::config(format!("transform '{s}': expected '(' after function name"))
            })?;
            let close = rest.find(')').ok_or_else(|| {
                SoleilError::config(format!("transform '{s}': unclosed '('"))
            })?;
            if close < open {
                return Err(SoleilError::config(format!(
                    "transform '{s}': unbalanced parentheses"
                )));
            }
            let name = rest[..open].trim();
            let args = &rest[open + 1..close];
            fns.push(parse_fn(s, name, args)?);
            rest = rest[close + 1..].trim_start();
        }
        Self::new(fns)
    }

    pub fn functions(&self) -> &[TransformFn] {
        &self.fns
    }

    pub fn is_identity(&self) -> bool {
        self.fns.is_empty()
    }

    /// Flattened 2D affine of the transform list (translateZ contributes nothing).
    pub fn to_affine(&self) -> Affine {
        self.fns
            .iter()
            .fold(Affine::IDENTITY, |acc, f| acc * f.to_affine())
    }

    /// Affine for `self translateY(offset_y)`.
    pub fn with_offset_affine(&self, offset_y: f64) -> Affine {
        self.to_affine() * Affine::translate(Vec2::new(0.0, offset_y))
    }
}

impl fmt::Display for BaseTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, func) in self.fns.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{func}")?;
        }
        Ok(())
    }
}

impl FromStr for BaseTransform {
    type Err = SoleilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BaseTransform {
    type Error = SoleilError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<BaseTransform> for String {
    fn from(t: BaseTransform) -> Self {
        t.to_string()
    }
}

fn parse_fn(src: &str, name: &str, args: &str) -> SoleilResult<TransformFn> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let one = || single_arg(src, name, &parts);

    let f = match name.to_ascii_lowercase().as_str() {
        "translatex" => TransformFn::TranslateX(parse_length(src, one()?)?),
        "translatey" => TransformFn::TranslateY(parse_length(src, one()?)?),
        "translatez" => TransformFn::TranslateZ(parse_length(src, one()?)?),
        "scale" => match parts.as_slice() {
            [x] if !x.is_empty() => {
                let x = parse_number(src, x)?;
                TransformFn::Scale(x, x)
            }
            [x, y] => TransformFn::Scale(parse_number(src, x)?, parse_number(src, y)?),
            _ => {
                return Err(SoleilError::config(format!(
                    "transform '{src}': scale() takes one or two arguments"
                )));
            }
        },
        "rotate" => TransformFn::RotateDeg(parse_angle(src, one()?)?),
        other => {
            return Err(SoleilError::config(format!(
                "transform '{src}': unsupported function '{other}'"
            )));
        }
    };
    Ok(f)
}

fn single_arg<'a>(src: &str, name: &str, parts: &[&'a str]) -> SoleilResult<&'a str> {
    match parts {
        [v] if !v.is_empty() => Ok(*v),
        _ => Err(SoleilError::config(format!(
            "transform '{src}': {name}() takes exactly one argument"
        ))),
    }
}

fn parse_number(src: &str, v: &str) -> SoleilResult<f64> {
    let n: f64 = v
        .parse()
        .map_err(|_| SoleilError::config(format!("transform '{src}': invalid number '{v}'")))?;
    if !n.is_finite() {
        return Err(SoleilError::config(format!(
            "transform '{src}': non-finite number '{v}'"
        )));
    }
    Ok(n)
}

fn parse_length(src: &str, v: &str) -> SoleilResult<f64> {
    match v.strip_suffix("px") {
        Some(n) => parse_number(src, n.trim_end()),
        None if v == "0" => Ok(0.0),
        None => Err(SoleilError::config(format!(
            "transform '{src}': length '{v}' must be in px"
        ))),
    }
}

fn parse_angle(src: &str, v: &str) -> SoleilResult<f64> {
    if let Some(n) = v.strip_suffix("deg") {
        return parse_number(src, n.trim_end());
    }
    if let Some(n) = v.strip_suffix("rad") {
        return Ok(parse_number(src, n.trim_end())?.to_degrees());
    }
    if v == "0" {
        return Ok(0.0);
    }
    Err(SoleilError::config(format!(
        "transform '{src}': angle '{v}' must be in deg or rad"
    )))
}

/// Formats a CSS number: three decimals at most, trailing zeros and negative zero dropped.
#[derive(Clone, Copy, Debug)]
pub struct CssNum(pub f64);

impl fmt::Display for CssNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.0 * 1000.0).round() / 1000.0;
        if rounded == 0.0 {
            return f.write_str("0");
        }
        write!(f, "{rounded}")
    }
}

/// Writes `<base_css> translateY(<offset_y>px)` into `buf`, reusing its allocation.
pub(crate) fn write_layer_css(buf: &mut String, base_css: &str, offset_y: f64) {
    buf.clear();
    if !base_css.is_empty() {
        buf.push_str(base_css);
        buf.push(' ');
    }
    // Writing into a String cannot fail.
    let _ = write!(buf, "{}", TransformFn::TranslateY(offset_y));
}

#[cfg(test)]
#[path = "../../tests/unit/parallax/transform.rs"]
mod tests;
