use super::entry::Entry;

pub const METADATA_MARKER: &str = "#EXTINF";
pub const TARGET_MARKER: &str = "http";

/// Splits playlist text into [`Entry`] blocks, lazily.
///
/// A block starts at a line beginning with `#EXTINF` and runs up to and including the
/// next line beginning with `http`. Lines outside of a block are ignored. A block left
/// open at the end of input is still yielded with whatever it collected.
#[must_use]
pub fn parse_blocks(text: &str) -> Blocks<impl Iterator<Item = &str>> {
    Blocks {
        lines: split_lines(text),
    }
}

/// Splits on `\n`, `\r\n` and a lone `\r` alike
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split_terminator('\n')
        .flat_map(|l| l.strip_suffix('\r').unwrap_or(l).split('\r'))
}

pub struct Blocks<I> {
    lines: I,
}

impl<'a, I: Iterator<Item = &'a str>> Iterator for Blocks<I> {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        let metadata = self
            .lines
            .by_ref()
            .find(|l| l.trim().starts_with(METADATA_MARKER))?;

        let mut block = vec![metadata.to_string()];
        for line in self.lines.by_ref() {
            block.push(line.to_string());
            if line.trim().starts_with(TARGET_MARKER) {
                break;
            }
        }

        Some(Entry::new(block))
    }
}
