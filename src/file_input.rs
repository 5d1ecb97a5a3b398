//! List inputs read from files or stdin (`@path`, `@-`).
//!
//! Each line holds one or more comma-separated entries. Blank lines and
//! lines starting with `#` are ignored.

use std::fs::File;
use std::io::{self, BufRead, BufReader};

pub enum FileReader {
    Stdin(BufReader<io::Stdin>),
    File(BufReader<File>),
    #[cfg(test)]
    Test(BufReader<io::Cursor<Vec<u8>>>),
}

impl BufRead for FileReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            FileReader::Stdin(reader) => reader.fill_buf(),
            FileReader::File(reader) => reader.fill_buf(),
            #[cfg(test)]
            FileReader::Test(reader) => reader.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            FileReader::Stdin(reader) => reader.consume(amt),
            FileReader::File(reader) => reader.consume(amt),
            #[cfg(test)]
            FileReader::Test(reader) => reader.consume(amt),
        }
    }
}

impl io::Read for FileReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            FileReader::Stdin(reader) => reader.read(buf),
            FileReader::File(reader) => reader.read(buf),
            #[cfg(test)]
            FileReader::Test(reader) => reader.read(buf),
        }
    }
}

/// Opens `@path` as a file, or stdin for `@-`.
pub fn create_file_reader(file_arg: &str) -> Result<FileReader, io::Error> {
    let path = file_arg.strip_prefix('@').unwrap_or(file_arg);
    if path == "-" {
        Ok(FileReader::Stdin(BufReader::new(io::stdin())))
    } else {
        let file = File::open(path)?;
        Ok(FileReader::File(BufReader::new(file)))
    }
}

/// Iterates over the entries of a list file in order.
pub struct ListEntries<R: BufRead> {
    lines: io::Lines<R>,
    pending: std::vec::IntoIter<String>,
}

impl<R: BufRead> ListEntries<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            pending: Vec::new().into_iter(),
        }
    }
}

impl<R: BufRead> Iterator for ListEntries<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.pending.next() {
                return Some(Ok(entry));
            }

            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            self.pending = line
                .split(',')
                .map(|entry| entry.trim().to_string())
                .collect::<Vec<_>>()
                .into_iter();
        }
    }
}

/// Reads a whole list and joins it into the comma-separated form used on
/// the command line.
pub fn read_list<R: BufRead>(reader: R) -> io::Result<String> {
    let entries = ListEntries::new(reader).collect::<io::Result<Vec<_>>>()?;
    Ok(entries.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_reader(content: &str) -> FileReader {
        FileReader::Test(BufReader::new(io::Cursor::new(content.as_bytes().to_vec())))
    }

    #[test]
    fn test_list_entries_skip_comments_and_blanks() {
        let reader = test_reader("# wavelengths\n4000\n\n5000, 6000\n  # trailing comment\n7000\n");
        let entries: Vec<String> = ListEntries::new(reader).map(|e| e.unwrap()).collect();
        assert_eq!(entries, vec!["4000", "5000", "6000", "7000"]);
    }

    #[test]
    fn test_read_list_keeps_angle_glyphs() {
        let reader = test_reader("30°0'0\"\n45°30'15\", 60°0'0\"\n");
        let joined = read_list(reader).unwrap();
        assert_eq!(joined, "30°0'0\",45°30'15\",60°0'0\"");
    }

    #[test]
    fn test_read_list_empty_input() {
        let joined = read_list(test_reader("# nothing here\n\n")).unwrap();
        assert_eq!(joined, "");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(create_file_reader("@/nonexistent/skyrefrax/list.txt").is_err());
    }
}
