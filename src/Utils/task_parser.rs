//! parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" which has titles and
//! pairs key-vector of values, and turn it into the solver configuration.
//!
//! ```text
//! solver
//! loglevel: warn
//! precision: 3
//! plot
//! half_width: 5.0
//! step: 0.2
//! history
//! capacity: 10
//! ```
//! Missing keys keep their defaults, unknown titles or keys are rejected.
use crate::Utils::formatter::DEFAULT_PRECISION;
use crate::Utils::history::DEFAULT_CAPACITY;
use crate::numerical::sampling::{DEFAULT_HALF_WIDTH, DEFAULT_STEP, MAX_INTERVALS, interval_count};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0, space0},
    combinator::{map, map_res, recognize},
    multi::{many0, many1, separated_list0},
    sequence::{delimited, pair, separated_pair, terminated},
};
use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;

pub type DocumentMap = HashMap<String, SectionMap>;
pub type SectionMap = HashMap<String, Vec<Value>>;

/// enum to represent different value types:
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(i) = self { Some(*i) } else { None }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(b) = self { Some(*b) } else { None }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Float(val) => write!(f, "{}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
        }
    }
}

/// word characters without spaces, used for both titles and keys
fn parse_identifier(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    parser.parse(input)
}

fn parse_title(input: &str) -> IResult<&str, String> {
    let (input, result) = parse_identifier(input)?;
    Ok((input.trim(), result))
}

fn parse_value(input: &str) -> IResult<&str, Value> {
    // excluding commas, whitespace, newlines, and semicolons
    let value_parser = take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\n' | '\r' | ';'));
    let mut value_parser = map_res(value_parser, |s: &str| -> Result<Value, String> {
        let s = s.trim();
        if let Ok(val) = s.parse::<i64>() {
            Ok(Value::Integer(val))
        } else if let Ok(val) = s.parse::<f64>() {
            Ok(Value::Float(val))
        } else if let Ok(val) = s.parse::<bool>() {
            Ok(Value::Boolean(val))
        } else {
            Ok(Value::String(s.to_string()))
        }
    });
    value_parser.parse(input)
}

fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    let separator_coma = delimited(space0, tag(","), space0);
    separated_list0(separator_coma, parse_value).parse(input)
}

/// key: value1, value2
fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let colon_separator = delimited(space0, tag(":"), space0);
    let mut parser = separated_pair(parse_identifier, colon_separator, parse_value_list);
    let (input, result) = parser.parse(input)?;
    Ok((input.trim(), result))
}

/// a title followed by one or more key-value pairs
fn parse_section(input: &str) -> IResult<&str, (String, SectionMap)> {
    let (input, _) = space0(input)?;
    let (input, title) = parse_title(input)?;
    let (input, _) = multispace0(input)?;
    let (input, pairs) = many1(terminated(parse_key_value_pair, space0)).parse(input)?;
    Ok((input, (title, pairs.into_iter().collect())))
}

/// Filters out comment lines (starting with //, #, %, or ;)
fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//")
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('%')
                && !trimmed.starts_with(';')
                && !trimmed.is_empty()
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses the entire document into a HashMap; sections with a repeated title are merged
pub fn parse_document(input: &str) -> Result<DocumentMap, String> {
    let filtered = filter_comments(input);
    let mut parser = many1(delimited(space0, parse_section, multispace0));
    match parser.parse(filtered.as_str()) {
        Ok((remaining, sections)) => {
            if !remaining.trim().is_empty() {
                return Err(format!(
                    "Failed to parse entire document. Remaining: '{}'",
                    remaining
                ));
            }
            let mut result: DocumentMap = HashMap::new();
            for (title, section_map) in sections {
                result.entry(title).or_default().extend(section_map);
            }
            Ok(result)
        }
        Err(e) => Err(format!("Parsing error: {:?}", e)),
    }
}

/// settings of the solver session
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// decimals of every displayed number
    pub precision: usize,
    pub history_capacity: usize,
    pub plot_half_width: f64,
    pub plot_step: f64,
    /// debug, info, warn, error or off/none
    pub loglevel: String,
    pub log_to_file: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            precision: DEFAULT_PRECISION,
            history_capacity: DEFAULT_CAPACITY,
            plot_half_width: DEFAULT_HALF_WIDTH,
            plot_step: DEFAULT_STEP,
            loglevel: "info".to_string(),
            log_to_file: false,
        }
    }
}

const KNOWN_KEYS: [(&str, &[&str]); 3] = [
    ("solver", &["loglevel", "log_to_file", "precision"]),
    ("plot", &["half_width", "step"]),
    ("history", &["capacity"]),
];

fn lookup<'d>(
    document: &'d DocumentMap,
    title: &str,
    key: &str,
) -> Result<Option<&'d Value>, String> {
    match document.get(title).and_then(|s| s.get(key)) {
        None => Ok(None),
        Some(values) if values.len() == 1 => Ok(values.first()),
        Some(values) => Err(format!(
            "'{}' in section '{}' expects one value, got {}",
            key,
            title,
            values.len()
        )),
    }
}

pub const LOG_LEVELS: [&str; 6] = ["debug", "info", "warn", "error", "off", "none"];

impl SolverConfig {
    pub fn from_document(input: &str) -> Result<SolverConfig, String> {
        let mut config = SolverConfig::default();
        if filter_comments(input).trim().is_empty() {
            return Ok(config);
        }
        let document = parse_document(input)?;
        for (title, section) in &document {
            let known = KNOWN_KEYS
                .iter()
                .find(|(t, _)| *t == title.as_str())
                .map(|(_, keys)| *keys)
                .ok_or_else(|| format!("unknown section '{}'", title))?;
            if let Some(key) = section.keys().find(|k| !known.contains(&k.as_str())) {
                return Err(format!("unknown key '{}' in section '{}'", key, title));
            }
        }
        let invalid = |key: &str, value: &Value| format!("invalid value '{}' for '{}'", value, key);

        if let Some(v) = lookup(&document, "solver", "loglevel")? {
            config.loglevel = v.to_string().to_lowercase();
        }
        if let Some(v) = lookup(&document, "solver", "log_to_file")? {
            config.log_to_file = v.as_boolean().ok_or_else(|| invalid("log_to_file", v))?;
        }
        if let Some(v) = lookup(&document, "solver", "precision")? {
            let p = v.as_integer().filter(|p| *p >= 0).ok_or_else(|| invalid("precision", v))?;
            config.precision = p as usize;
        }
        if let Some(v) = lookup(&document, "plot", "half_width")? {
            config.plot_half_width = v.as_float().ok_or_else(|| invalid("half_width", v))?;
        }
        if let Some(v) = lookup(&document, "plot", "step")? {
            config.plot_step = v.as_float().ok_or_else(|| invalid("step", v))?;
        }
        if let Some(v) = lookup(&document, "history", "capacity")? {
            let c = v.as_integer().filter(|c| *c >= 0).ok_or_else(|| invalid("capacity", v))?;
            config.history_capacity = c as usize;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<SolverConfig, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        SolverConfig::from_document(&content)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.precision > 12 {
            return Err(format!("precision must be at most 12, got {}", self.precision));
        }
        if self.history_capacity < 1 {
            return Err("history capacity must be at least 1".to_string());
        }
        if !(self.plot_half_width > 0.0 && self.plot_half_width.is_finite()) {
            return Err(format!("plot half_width must be positive, got {}", self.plot_half_width));
        }
        if !(self.plot_step > 0.0 && self.plot_step <= self.plot_half_width) {
            return Err(format!(
                "plot step must be in (0, half_width], got {}",
                self.plot_step
            ));
        }
        if interval_count(self.plot_half_width, self.plot_step).is_none() {
            return Err(format!(
                "plot window of half_width {} with step {} needs more than {} intervals",
                self.plot_half_width, self.plot_step, MAX_INTERVALS
            ));
        }
        if !LOG_LEVELS.contains(&self.loglevel.as_str()) {
            return Err(format!(
                "loglevel must be one of {:?}, got '{}'",
                LOG_LEVELS, self.loglevel
            ));
        }
        Ok(())
    }
}

/////////////////////////////TESTS////////////////////////////////////////////////////
