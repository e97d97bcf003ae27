use crate::{Cell, FormatError};

/// Returns the width and a row-major vector of cells of the parsed plain-text pattern.
///
/// Blank lines at the end of `data` are ignored, and so is whitespace around each row.
pub fn parse_pattern(data: &str) -> Result<(usize, Vec<Cell>), FormatError> {
    let mut rows = data.lines().map(str::trim).collect::<Vec<_>>();
    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }
    parse_rows(rows)
}

/// Same as [`parse_pattern`], but for rows that are already split.
///
/// Rows are taken verbatim: the width is the length of the first one, and
/// every other row has to match it.
pub fn parse_rows<I>(rows: I) -> Result<(usize, Vec<Cell>), FormatError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut width = None;
    let mut cells = vec![];
    for (i, row) in rows.into_iter().enumerate() {
        let (line, row) = (i + 1, row.as_ref());
        let found = row.chars().count();
        match width {
            None if found == 0 => return Err(FormatError::EmptyRow),
            None => width = Some(found),
            Some(expected) if expected != found => {
                return Err(FormatError::InconsistentWidth {
                    line,
                    expected,
                    found,
                })
            }
            Some(_) => {}
        }
        for (j, symbol) in row.chars().enumerate() {
            let cell = Cell::from_symbol(symbol).ok_or(FormatError::UnknownSymbol {
                line,
                column: j + 1,
                symbol,
            })?;
            cells.push(cell);
        }
    }
    let width = width.ok_or(FormatError::Empty)?;
    Ok((width, cells))
}
