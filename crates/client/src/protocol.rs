//! Line protocol spoken with the judge process.
//!
//! Input is whitespace-separated integers and tags, except for grid rows,
//! which are taken verbatim one line each. Output is one action line per
//! turn, flushed immediately.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use kutulu_agent::Action;
use kutulu_core::{
    CoreError, EntityRecord, EntityTag, ErrorSeverity, GameConstants, GameError, Map, World,
};

/// Errors raised while reading or writing the judge protocol.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("input ended while expecting {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("invalid integer for {field}: {token:?}")]
    InvalidInteger { field: &'static str, token: String },

    #[error("grid row {row} has {found} cells, expected {expected}")]
    ShortRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),
}

impl GameError for ProtocolError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ProtocolError::InvalidInteger { .. } | ProtocolError::ShortRow { .. } => {
                ErrorSeverity::Validation
            }
            ProtocolError::Core(inner) => inner.severity(),
            ProtocolError::UnexpectedEof { .. } | ProtocolError::Io(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ProtocolError::UnexpectedEof { .. } => "PROTOCOL_UNEXPECTED_EOF",
            ProtocolError::InvalidInteger { .. } => "PROTOCOL_INVALID_INTEGER",
            ProtocolError::ShortRow { .. } => "PROTOCOL_SHORT_ROW",
            ProtocolError::Core(inner) => inner.error_code(),
            ProtocolError::Io(_) => "PROTOCOL_IO",
        }
    }
}

/// Pull-based reader over the judge's input stream.
pub struct ProtocolReader<R> {
    input: R,
    tokens: VecDeque<String>,
    line: String,
}

impl<R: BufRead> ProtocolReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            tokens: VecDeque::new(),
            line: String::new(),
        }
    }

    /// Reads the one-time startup block and the initial entity batch.
    ///
    /// Layout: `width height`, `height` grid rows, the four game constants,
    /// then an entity count followed by that many records.
    pub fn read_startup(&mut self) -> Result<World, ProtocolError> {
        let width = self.size("grid width")?;
        let height = self.size("grid height")?;

        let mut rows = Vec::with_capacity(height);
        for row in 0..height {
            let line = self.line("grid row")?;
            let found = line.chars().count();
            if found < width {
                return Err(ProtocolError::ShortRow {
                    row,
                    expected: width,
                    found,
                });
            }
            rows.push(line);
        }
        let map = Map::from_rows(width, height, &rows)?;

        let constants = GameConstants::new(
            self.int("sanity loss lonely")?,
            self.int("sanity loss group")?,
            self.int("wanderer spawn time")?,
            self.int("wanderer life time")?,
        );
        tracing::debug!(width, height, ?constants, "startup header read");

        let count = self.size("entity count")?;
        let records = self.records(count)?;
        Ok(World::from_startup(map, constants, &records)?)
    }

    /// Reads one turn's entity batch.
    ///
    /// Returns `Ok(None)` when the input ends cleanly before the batch
    /// starts; the judge closes the stream when the game is over.
    pub fn read_turn(&mut self) -> Result<Option<Vec<EntityRecord>>, ProtocolError> {
        let Some(token) = self.token()? else {
            return Ok(None);
        };
        let count = parse_size("entity count", token)?;
        self.records(count).map(Some)
    }

    fn records(&mut self, count: usize) -> Result<Vec<EntityRecord>, ProtocolError> {
        (0..count).map(|_| self.record()).collect()
    }

    fn record(&mut self) -> Result<EntityRecord, ProtocolError> {
        let tag = self.require_token("entity tag")?;
        let tag = EntityTag::parse(&tag);
        let id = self.int("entity id")?;
        let x = self.int("entity x")?;
        let y = self.int("entity y")?;
        let params = [
            self.int("entity param0")?,
            self.int("entity param1")?,
            self.int("entity param2")?,
        ];
        Ok(EntityRecord::new(tag, id, x, y, params))
    }

    /// Next whitespace-separated token, or `None` at end of input.
    fn token(&mut self) -> Result<Option<String>, ProtocolError> {
        while self.tokens.is_empty() {
            self.line.clear();
            if self.input.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.tokens
                .extend(self.line.split_whitespace().map(str::to_owned));
        }
        Ok(self.tokens.pop_front())
    }

    fn require_token(&mut self, expected: &'static str) -> Result<String, ProtocolError> {
        self.token()?
            .ok_or(ProtocolError::UnexpectedEof { expected })
    }

    fn int(&mut self, field: &'static str) -> Result<i32, ProtocolError> {
        let token = self.require_token(field)?;
        parse_int(field, token)
    }

    fn size(&mut self, field: &'static str) -> Result<usize, ProtocolError> {
        let token = self.require_token(field)?;
        parse_size(field, token)
    }

    /// Next raw line without its terminator.
    ///
    /// Tokens left over from a partially consumed line are dropped.
    fn line(&mut self, expected: &'static str) -> Result<String, ProtocolError> {
        if !self.tokens.is_empty() {
            tracing::warn!(dropped = self.tokens.len(), "discarding tokens before {expected}");
            self.tokens.clear();
        }
        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            return Err(ProtocolError::UnexpectedEof { expected });
        }
        Ok(self.line.trim_end_matches(['\r', '\n']).to_owned())
    }
}

fn parse_int(field: &'static str, token: String) -> Result<i32, ProtocolError> {
    token
        .parse()
        .map_err(|_| ProtocolError::InvalidInteger { field, token })
}

fn parse_size(field: &'static str, token: String) -> Result<usize, ProtocolError> {
    token
        .parse()
        .map_err(|_| ProtocolError::InvalidInteger { field, token })
}

/// Writes `action` as one protocol line and flushes.
pub fn write_action<W: Write>(output: &mut W, action: &Action) -> Result<(), ProtocolError> {
    writeln!(output, "{action}")?;
    output.flush()?;
    Ok(())
}
