//! Fixed-column text tables.

const SEPARATOR: &str = "  ";

/// Text columns are not shrunk below this many characters.
const MIN_TEXT_WIDTH: usize = 8;

/// Colour of a cell, chosen by the column from the typed value it renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Done,
    Active,
    Attention,
}

impl Tone {
    const fn ansi(self) -> &'static str {
        match self {
            Self::Done => "32",
            Self::Active => "33",
            Self::Attention => "31",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// One column. Only text columns give up width on a narrow terminal; ids,
/// statuses and dates are always shown whole.
#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub header: &'static str,
    pub align: Align,
    pub shrink: bool,
}

impl Column {
    pub const fn fixed(header: &'static str) -> Self {
        Self {
            header,
            align: Align::Left,
            shrink: false,
        }
    }

    pub const fn text(header: &'static str) -> Self {
        Self {
            header,
            align: Align::Left,
            shrink: true,
        }
    }

    pub const fn count(header: &'static str) -> Self {
        Self {
            header,
            align: Align::Right,
            shrink: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub tone: Option<Tone>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: None,
        }
    }

    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone: Some(tone),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render `rows` under `columns`. Missing cells show as `-`.
#[must_use]
pub fn render(columns: &[Column], rows: &[Vec<Cell>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| width_of(&cell.text))
                .fold(width_of(column.header), usize::max)
        })
        .collect();
    if let Some(max_width) = options.max_width {
        shrink_to(&mut widths, columns, max_width);
    }

    let headers: Vec<Cell> = columns.iter().map(|column| Cell::plain(column.header)).collect();
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(columns, &widths, &headers, false));
    let table_width = widths.iter().sum::<usize>() + SEPARATOR.len() * widths.len().saturating_sub(1);
    lines.push("-".repeat(table_width));
    lines.extend(rows.iter().map(|row| line(columns, &widths, row, options.color)));
    lines.join("\n")
}

fn line(columns: &[Column], widths: &[usize], cells: &[Cell], color: bool) -> String {
    let missing = Cell::plain("-");
    columns
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (column, &width))| {
            let cell = cells.get(index).unwrap_or(&missing);
            let text = clip(&cell.text, width);
            let fill = " ".repeat(width.saturating_sub(width_of(&text)));
            let body = match cell.tone {
                Some(tone) if color => format!("\u{1b}[{}m{text}\u{1b}[0m", tone.ansi()),
                _ => text,
            };
            match column.align {
                Align::Left => format!("{body}{fill}"),
                Align::Right => format!("{fill}{body}"),
            }
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Take one character at a time from the widest text column until the
/// table fits or nothing is left to shrink.
fn shrink_to(widths: &mut [usize], columns: &[Column], max_width: usize) {
    let total = widths.iter().sum::<usize>() + SEPARATOR.len() * widths.len().saturating_sub(1);
    let mut excess = total.saturating_sub(max_width);
    while excess > 0 {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|&(index, &width)| columns[index].shrink && width > MIN_TEXT_WIDTH)
            .max_by_key(|&(_, &width)| width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
        excess -= 1;
    }
}

fn width_of(text: &str) -> usize {
    text.chars().count()
}

fn clip(text: &str, width: usize) -> String {
    if width_of(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Cell, Column, TableOptions, Tone, clip, render};

    const COLUMNS: [Column; 3] = [
        Column::fixed("id"),
        Column::text("title"),
        Column::count("emails"),
    ];

    fn options(max_width: Option<usize>, color: bool) -> TableOptions {
        TableOptions { max_width, color }
    }

    fn row(id: &str, title: &str, emails: usize) -> Vec<Cell> {
        vec![
            Cell::plain(id),
            Cell::plain(title),
            Cell::plain(emails.to_string()),
        ]
    }

    #[test]
    fn header_divider_and_rows_line_up() {
        let rows = vec![row("ISS-2024-001", "Leak", 2), row("ISS-2024-002", "Broken lift", 0)];
        let table = render(&COLUMNS, &rows, options(None, false));
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "id            title        emails");
        assert_eq!(lines[1].len(), lines[0].len());
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "ISS-2024-001  Leak              2");
    }

    #[test]
    fn only_toned_cells_are_colored() {
        let rows = vec![vec![
            Cell::plain("ISS-2024-005"),
            Cell::plain("Closed"),
            Cell::toned("1", Tone::Done),
        ]];
        let table = render(&COLUMNS, &rows, options(None, true));
        let body = table.lines().nth(2).unwrap();

        assert!(body.contains("Closed  "));
        assert!(!body.contains("\u{1b}[32mClosed"));
        assert!(body.ends_with("\u{1b}[32m1\u{1b}[0m"));
    }

    #[test]
    fn color_is_off_when_disabled() {
        let rows = vec![vec![Cell::toned("ISS-2024-001", Tone::Attention)]];
        let table = render(&COLUMNS, &rows, options(None, false));
        assert!(!table.contains('\u{1b}'));
        assert!(table.lines().nth(2).unwrap().ends_with('-'));
    }

    #[test]
    fn narrow_terminal_shrinks_text_columns_only() {
        let rows = vec![row(
            "ISS-2024-004",
            "Fire door closers need adjusting on all floors",
            3,
        )];
        let table = render(&COLUMNS, &rows, options(Some(40), false));

        assert!(table.lines().all(|line| line.chars().count() <= 40));
        let body = table.lines().nth(2).unwrap();
        assert!(body.starts_with("ISS-2024-004  Fire door"));
        assert!(body.contains('…'));
    }

    #[test]
    fn nothing_to_shrink_keeps_full_width() {
        let columns = [Column::fixed("id"), Column::fixed("status")];
        let rows = vec![vec![Cell::plain("ISS-2024-003"), Cell::plain("In review")]];
        let table = render(&columns, &rows, options(Some(10), false));
        assert!(table.contains("ISS-2024-003  In review"));
    }

    #[test]
    fn clip_marks_cut_text() {
        assert_eq!(clip("Water ingress in stairwell", 8), "Water i…");
        assert_eq!(clip("Lift", 8), "Lift");
        assert_eq!(clip("Lift", 0), "");
    }
}
