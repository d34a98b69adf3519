use std::convert::Infallible;
use std::fmt::Display;
use std::str::FromStr;

use log::debug;

use crate::error::{ExtractError, ExtractErrorKind};
use crate::extract::extract_mapping;
use crate::parser;
use crate::value::Value;

/// What to extract from the text. Parsed from the string surface with
/// [`FromStr`]; an unrecognized name is a configuration error, distinct
/// from any parse failure.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TargetKind {
    Auto,
    Mapping,
    Image,
    Tabular,
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnsupportedKind(pub String);

impl Display for UnsupportedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported target kind: {}", self.0)
    }
}

impl FromStr for TargetKind {
    type Err = UnsupportedKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "mapping" => Ok(Self::Mapping),
            "image" => Ok(Self::Image),
            "tabular" => Ok(Self::Tabular),
            _ => Err(UnsupportedKind(s.to_owned())),
        }
    }
}

/// External image decoding collaborator (data-uri, url or file path
/// representations). Consumed here, implemented elsewhere.
pub trait ImageDecoder {
    type Image;
    type Error: Display;

    fn decode_image(&self, repr: &str) -> Result<Self::Image, Self::Error>;
}

/// External tabular loading collaborator (csv/json/jsonl/xlsx paths).
/// Consumed here, implemented elsewhere.
pub trait TableLoader {
    type Table;
    type Error: Display;

    fn load_table(&self, path: &str) -> Result<Self::Table, Self::Error>;
}

/// Collaborator slot that always declines, so the core works stand-alone.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoExternal;

#[derive(Debug)]
pub struct Unavailable(&'static str);

impl Display for Unavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no {} registered", self.0)
    }
}

impl ImageDecoder for NoExternal {
    type Image = Infallible;
    type Error = Unavailable;

    fn decode_image(&self, _repr: &str) -> Result<Self::Image, Self::Error> {
        Err(Unavailable("image decoder"))
    }
}

impl TableLoader for NoExternal {
    type Table = Infallible;
    type Error = Unavailable;

    fn load_table(&self, _path: &str) -> Result<Self::Table, Self::Error> {
        Err(Unavailable("table loader"))
    }
}

/// A successfully extracted object: a literal value, or whatever the
/// image/tabular collaborators produced.
#[derive(Debug, PartialEq)]
pub enum Extracted<I, T> {
    Value(Value),
    Image(I),
    Table(T),
}

impl<I, T> Extracted<I, T> {
    pub fn unwrap_value(self) -> Value {
        match self {
            Self::Value(value) => value,
            Self::Image(_) => panic!("Try to get value, but extracted an image"),
            Self::Table(_) => panic!("Try to get value, but extracted a table"),
        }
    }
}

/// Routes text to the right extractor, in a fixed priority order.
pub struct Dispatcher<I = NoExternal, T = NoExternal> {
    image: I,
    tabular: T,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            image: NoExternal,
            tabular: NoExternal,
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ImageDecoder, T: TableLoader> Dispatcher<I, T> {
    pub fn with_collaborators(image: I, tabular: T) -> Self {
        Self { image, tabular }
    }

    pub fn dispatch(
        &self,
        text: &str,
        kind: TargetKind,
    ) -> Result<Extracted<I::Image, T::Table>, ExtractError> {
        match kind {
            TargetKind::Auto => self.auto(text),
            TargetKind::Mapping => {
                extract_mapping(text).map(|map| Extracted::Value(Value::Object(map)))
            }
            TargetKind::Image => self.image.decode_image(text).map(Extracted::Image).map_err(
                |err| {
                    ExtractError::new(
                        text,
                        ExtractErrorKind::External {
                            extractor: "image",
                            detail: err.to_string(),
                        },
                    )
                },
            ),
            TargetKind::Tabular => self.tabular.load_table(text).map(Extracted::Table).map_err(
                |err| {
                    ExtractError::new(
                        text,
                        ExtractErrorKind::External {
                            extractor: "tabular",
                            detail: err.to_string(),
                        },
                    )
                },
            ),
        }
    }

    // Auto mode: whole-input literal evaluation first, then each fallback
    // extractor in a fixed order. Either the first success or one
    // aggregated failure.
    fn auto(&self, text: &str) -> Result<Extracted<I::Image, T::Table>, ExtractError> {
        let mut failures = Vec::new();

        match parser::parse(text) {
            Ok(value) => return Ok(Extracted::Value(value)),
            Err(err) => failures.push(format!("literal: {}", err)),
        }

        debug!("whole-input literal evaluation failed, trying fallback chain");

        match extract_mapping(text) {
            Ok(map) => return Ok(Extracted::Value(Value::Object(map))),
            Err(err) => failures.push(format!("mapping: {}", err.kind)),
        }

        match self.image.decode_image(text) {
            Ok(image) => return Ok(Extracted::Image(image)),
            Err(err) => failures.push(format!("image: {}", err)),
        }

        match self.tabular.load_table(text) {
            Ok(table) => return Ok(Extracted::Table(table)),
            Err(err) => failures.push(format!("tabular: {}", err)),
        }

        Err(ExtractError::new(
            text,
            ExtractErrorKind::Aggregated(failures),
        ))
    }
}

/// Extracts a typed object from `text`. `target_kind` is one of `"auto"`,
/// `"mapping"`, `"image"` or `"tabular"`. Image and tabular always decline
/// here since no collaborator is registered; use a [`Dispatcher`] with
/// real collaborators for those.
pub fn extract_object(
    text: &str,
    target_kind: &str,
) -> Result<Extracted<Infallible, Infallible>, ExtractError> {
    let kind = target_kind.parse::<TargetKind>().map_err(|UnsupportedKind(k)| {
        ExtractError::new(text, ExtractErrorKind::UnsupportedKind(k))
    })?;

    Dispatcher::new().dispatch(text, kind)
}
