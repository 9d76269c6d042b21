//! Grid cell addressing

use std::fmt;

/// A parsed cell: an address plus its markdown body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// Address as written, e.g. `B3`
    pub id: String,
    /// Zero-based row (`number - 1`)
    pub row: usize,
    /// Zero-based column (`letter - 'A'`)
    pub column: usize,
    /// Trimmed markdown body
    pub content: String,
}

impl GridCell {
    /// Create a cell from an address, or `None` if the address is not
    /// `<A-Z><1..>`. The id is kept as written, so `A01` never matches slot
    /// `A1`.
    pub fn new(id: &str, content: impl Into<String>) -> Option<Self> {
        let address = CellAddress::parse(id)?;
        Some(GridCell {
            id: id.to_string(),
            row: address.row,
            column: address.column,
            content: content.into(),
        })
    }

    /// Whether the id is in the form slots use (`A1`, not `A01`)
    pub fn is_canonical(&self) -> bool {
        self.id == CellAddress::new(self.row, self.column).id()
    }

    /// Whether this cell falls inside a `rows × columns` grid
    pub fn in_bounds(&self, rows: usize, columns: usize) -> bool {
        self.row < rows && self.column < columns
    }
}

/// A zero-based (row, column) pair with its textual form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddress {
    pub row: usize,
    pub column: usize,
}

impl CellAddress {
    /// Largest column a single letter can address
    pub const MAX_COLUMNS: usize = 26;

    pub fn new(row: usize, column: usize) -> Self {
        CellAddress { row, column }
    }

    /// Parse `A1`-style ids. Row numbers start at 1.
    pub fn parse(id: &str) -> Option<Self> {
        let mut chars = id.chars();
        let letter = chars.next()?;
        if !letter.is_ascii_uppercase() {
            return None;
        }
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let number: usize = digits.parse().ok()?;
        Some(CellAddress {
            row: number.checked_sub(1)?,
            column: (letter as u8 - b'A') as usize,
        })
    }

    /// Column letter, or `None` past `Z`
    pub fn column_letter(&self) -> Option<char> {
        if self.column < Self::MAX_COLUMNS {
            Some((b'A' + self.column as u8) as char)
        } else {
            None
        }
    }

    /// Textual id (`A1`). Columns past `Z` have no letter and fall back to
    /// `#<column>` so slot ids stay unique.
    pub fn id(&self) -> String {
        match self.column_letter() {
            Some(letter) => format!("{}{}", letter, self.row + 1),
            None => format!("#{}-{}", self.column + 1, self.row + 1),
        }
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}
