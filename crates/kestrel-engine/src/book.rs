//! Polyglot opening book.
//!
//! A book file is a flat sequence of 16-byte big-endian records sorted by
//! position key:
//!
//! | bytes  | field  | meaning                                   |
//! |--------|--------|-------------------------------------------|
//! | 0..8   | key    | Polyglot Zobrist hash of the position     |
//! | 8..10  | move   | packed from/to squares and promotion      |
//! | 10..12 | weight | relative selection weight                 |
//! | 12..16 | learn  | unused                                    |
//!
//! Move bits: to-file 0-2, to-rank 3-5, from-file 6-8, from-rank 9-11,
//! promotion 12-14 (none, knight, bishop, rook, queen). Castling is stored
//! as the king moving onto its own rook.

use std::fs::File as FsFile;
use std::io::{BufReader, Read};
use std::path::Path;

use byteorder::{BigEndian, ByteOrder};
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use tracing::{debug, trace};

use kestrel_core::{File, Move, Position, Rank, Role, Square};

use crate::error::BookError;

/// Size in bytes of one book record.
pub const ENTRY_SIZE: usize = 16;

/// One book record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookEntry {
    pub key: u64,
    pub raw_move: u16,
    pub weight: u16,
    pub learn: u32,
}

impl BookEntry {
    /// Parse a record from exactly [`ENTRY_SIZE`] bytes.
    pub fn from_bytes(bytes: &[u8; ENTRY_SIZE]) -> BookEntry {
        BookEntry {
            key: BigEndian::read_u64(&bytes[0..8]),
            raw_move: BigEndian::read_u16(&bytes[8..10]),
            weight: BigEndian::read_u16(&bytes[10..12]),
            learn: BigEndian::read_u32(&bytes[12..16]),
        }
    }

    /// Serialize the record in book byte order.
    pub fn to_bytes(&self) -> [u8; ENTRY_SIZE] {
        let mut bytes = [0u8; ENTRY_SIZE];
        BigEndian::write_u64(&mut bytes[0..8], self.key);
        BigEndian::write_u16(&mut bytes[8..10], self.raw_move);
        BigEndian::write_u16(&mut bytes[10..12], self.weight);
        BigEndian::write_u32(&mut bytes[12..16], self.learn);
        bytes
    }

    /// Resolve the packed move against `position`.
    ///
    /// Returns `None` for an unknown promotion code or a move that is not
    /// legal in `position` (hash collisions, corrupt books).
    pub fn decode_move(&self, position: &Position) -> Option<Move> {
        let (from, to, promotion) = unpack_move(self.raw_move)?;
        position.legal_move(from, to, promotion)
    }
}

/// Pack from/to squares and an optional promotion into book move bits.
pub fn pack_move(from: Square, to: Square, promotion: Option<Role>) -> u16 {
    let promo = match promotion {
        None => 0,
        Some(Role::Knight) => 1,
        Some(Role::Bishop) => 2,
        Some(Role::Rook) => 3,
        Some(Role::Queen) => 4,
        // Not representable; stored as no promotion.
        Some(Role::Pawn | Role::King) => 0,
    };
    (to.file().to_u32() as u16)
        | (to.rank().to_u32() as u16) << 3
        | (from.file().to_u32() as u16) << 6
        | (from.rank().to_u32() as u16) << 9
        | promo << 12
}

fn unpack_move(raw: u16) -> Option<(Square, Square, Option<Role>)> {
    let square = |shift: u16| {
        let bits = u32::from(raw >> shift);
        Square::from_coords(File::new(bits & 7), Rank::new((bits >> 3) & 7))
    };
    let promotion = match (raw >> 12) & 7 {
        0 => None,
        1 => Some(Role::Knight),
        2 => Some(Role::Bishop),
        3 => Some(Role::Rook),
        4 => Some(Role::Queen),
        _ => return None,
    };
    Some((square(6), square(0), promotion))
}

/// In-memory Polyglot book, sorted by key.
#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    entries: Vec<BookEntry>,
}

impl OpeningBook {
    /// Load a book file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<OpeningBook, BookError> {
        let path = path.as_ref();
        let file = FsFile::open(path).map_err(|source| BookError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let book = OpeningBook::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), entries = book.len(), "opening book loaded");
        Ok(book)
    }

    /// Read a whole book from `reader`.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<OpeningBook, BookError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        if bytes.len() % ENTRY_SIZE != 0 {
            return Err(BookError::Truncated { len: bytes.len() });
        }

        let entries = bytes
            .chunks_exact(ENTRY_SIZE)
            .filter_map(|chunk| <&[u8; ENTRY_SIZE]>::try_from(chunk).ok())
            .map(BookEntry::from_bytes)
            .collect();
        Ok(OpeningBook::from_entries(entries))
    }

    /// Build a book from records in any order.
    pub fn from_entries(mut entries: Vec<BookEntry>) -> OpeningBook {
        entries.sort_by_key(|entry| entry.key);
        OpeningBook { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All records stored under `key`.
    pub fn entries_for(&self, key: u64) -> &[BookEntry] {
        let start = self.entries.partition_point(|entry| entry.key < key);
        let len = self.entries[start..].partition_point(|entry| entry.key == key);
        &self.entries[start..start + len]
    }

    /// Pick a book move for `position`, weighted by record weight.
    ///
    /// Records whose move is not legal in `position` are skipped. Returns
    /// `None` when nothing usable remains, including when every weight is
    /// zero.
    pub fn lookup<R: Rng + ?Sized>(&self, position: &Position, rng: &mut R) -> Option<Move> {
        let candidates: Vec<(Move, u16)> = self
            .entries_for(position.hash())
            .iter()
            .filter_map(|entry| entry.decode_move(position).map(|mv| (mv, entry.weight)))
            .collect();

        let weights = WeightedIndex::new(candidates.iter().map(|&(_, weight)| u32::from(weight)));
        let Ok(weights) = weights else {
            trace!(candidates = candidates.len(), "no usable book move");
            return None;
        };
        Some(candidates[weights.sample(rng)].0)
    }
}
