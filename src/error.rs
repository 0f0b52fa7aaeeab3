use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the simulator
#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("Invalid cache configuration: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Failed to read trace: {0}")]
    TraceError(#[from] TraceError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Errors raised while validating a cache configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{name} must be a power of two, got {value}")]
    NotPowerOfTwo { name: &'static str, value: u64 },

    #[error(
        "cache size {size} B is not a multiple of line size x associativity ({line_size} x {associativity})"
    )]
    UnevenSets { size: u64, line_size: u64, associativity: u64 },

    #[error("address width must be within 1..=64 bits, got {0}")]
    AddressWidth(u32),

    #[error(
        "{offset_bits} offset bits + {index_bits} index bits do not fit in a {address_width}-bit address"
    )]
    NoTagBits { offset_bits: u32, index_bits: u32, address_width: u32 },
}

/// Errors related to trace files
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Failed to open trace file '{}': {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("Invalid operation '{op}' at line {line}: expected 'r' or 'w'")]
    UnknownOperation { line: usize, op: String },

    #[error("Invalid hexadecimal address '{address}' at line {line}")]
    InvalidAddress { line: usize, address: String },

    #[error("IO error at line {line}: {source}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for Result with SimulatorError
pub type SimulatorResult<T> = Result<T, SimulatorError>;
