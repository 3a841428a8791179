use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

pub type ScriptResult<T> = Result<T, ScriptError>;

#[derive(Debug, Error, Diagnostic)]
pub enum ScriptError {
    #[error("invalid input: {0}")]
    #[diagnostic(code("scriptcraft.invalid_input"))]
    InvalidInput(String),
    #[error("index {index} out of range for {len} items")]
    #[diagnostic(code("scriptcraft.index_out_of_range"))]
    IndexOutOfRange { index: usize, len: usize },
    #[error("input limit exceeded: {0}")]
    #[diagnostic(
        code("scriptcraft.resource_limit"),
        help("raise the matching value in the [limits] section of the config")
    )]
    ResourceLimit(String),
    #[error("serialization error: {message}")]
    #[diagnostic(code("scriptcraft.serialization"))]
    Serialization {
        message: String,
        #[source_code]
        src: String,
        #[label("here")]
        span: SourceSpan,
    },
    #[error("config error: {0}")]
    #[diagnostic(code("scriptcraft.config"))]
    Config(String),
    #[error("io error: {0}")]
    #[diagnostic(code("scriptcraft.io"))]
    Io(#[from] std::io::Error),
}

/// Maps a serde_json error onto a diagnostic pointing at the failing offset.
#[cold]
#[inline(never)]
pub(crate) fn json_deserialize_error(input: &str, err: &serde_json::Error) -> ScriptError {
    let offset = line_col_offset(input, err.line(), err.column());
    ScriptError::Serialization {
        message: err.to_string(),
        src: input.to_string(),
        span: (offset, 0).into(),
    }
}

#[cold]
#[inline(never)]
pub(crate) fn json_serialize_error(err: &serde_json::Error) -> ScriptError {
    ScriptError::Serialization {
        message: err.to_string(),
        src: String::new(),
        span: (0, 0).into(),
    }
}

fn line_col_offset(input: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let mut offset = 0usize;
    for (index, text) in input.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let col = column.saturating_sub(1).min(text.len());
            return (offset + col).min(input.len());
        }
        offset += text.len();
    }
    input.len()
}
