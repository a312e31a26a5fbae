//! Error types.

use std::fmt::{self, Formatter, Display};


pub type Result<I> = std::result::Result<I, Error>;

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    error: Box<dyn std::error::Error + Send + Sync>,
    line: Option<usize>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ErrorKind {
    /// Underlying IO error.
    Io,

    /// The text being parsed is not a well-formed map file. This covers
    /// header keyword mismatches, truncated chunk blocks, non-numeric
    /// fields, and malformed tile records.
    MalformedData,

    /// The file declares a format version we do not know how to read.
    UnsupportedVersion,

    /// A material index does not resolve within the map's material table.
    ///
    /// When loading, this means the file is corrupt. When editing, this
    /// means the caller passed an index it did not get from the table.
    MaterialIndex,

    /// The material table cannot hold any more materials.
    MaterialTableFull,

    /// An edit would give a tile a height the file format cannot hold.
    HeightRange,

    /// Tried to save a map which has no backing file path.
    NoPath,
}

impl Error {
    pub fn new<E>(
        kind: ErrorKind,
        error: E,
        line: Option<usize>,
    ) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error {
            kind,
            error: error.into(),
            line,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 1-based line number of the source text the error was found at, if
    /// known.
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Attach a line number, unless one is already known.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line.get_or_insert(line);
        self
    }

    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.error
    }

    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self.error
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::new(ErrorKind::Io, error, None)
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match *self {
            ErrorKind::Io => "IO error",
            ErrorKind::MalformedData => "malformed map data",
            ErrorKind::UnsupportedVersion => "unsupported map version",
            ErrorKind::MaterialIndex => "material index out of range",
            ErrorKind::MaterialTableFull => "material table full",
            ErrorKind::HeightRange => "tile height out of range",
            ErrorKind::NoPath => "map has no file path",
        })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(&self.kind, f)?;
        f.write_str(", ")?;
        Display::fmt(&self.error, f)?;
        if let Some(line) = self.line {
            write!(f, " (line {})", line)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner())
    }
}


macro_rules! err {
    ($k:ident, $line:expr, $($e:tt)*)=>{
        $crate::error::Error::new(
            $crate::error::ErrorKind::$k,
            format!($($e)*),
            $line,
        )
    };
}

macro_rules! bail {
    ($($e:tt)*)=>{ return Err($crate::error::err!($($e)*)) };
}

macro_rules! ensure {
    ($c:expr, $($e:tt)*)=>{
        if !$c {
            $crate::error::bail!($($e)*);
        }
    };
}

pub(crate) use err;
pub(crate) use bail;
pub(crate) use ensure;
