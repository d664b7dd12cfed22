use crate::error::Result;
use std::io::prelude::*;
use std::iter::Peekable;
use std::path::Path;
use std::str::Lines;

/// A NAVTEX receiver log or a plain text dump of warnings.
#[derive(Debug)]
pub struct BulletinFile {
    buf: String,
}

impl BulletinFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<BulletinFile> {
        let mut file = std::fs::File::open(path)?;
        BulletinFile::from_reader(&mut file)
    }

    pub fn from_reader<B: Read>(reader: &mut B) -> Result<BulletinFile> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(BulletinFile {
            buf: String::from_utf8_lossy(&buf).into_owned(),
        })
    }

    /// Bulletins framed by `ZCZC` / `NNNN` lines, or blank-line separated
    /// blocks if the file has no frames at all.
    pub fn bulletins(&self) -> Bulletins<'_> {
        let framed = self
            .buf
            .lines()
            .any(|line| line.trim_start().starts_with("ZCZC"));
        Bulletins {
            lines: self.buf.lines().peekable(),
            framed,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Bulletin<'a> {
    /// Message identifier from the `ZCZC` line, e.g. `OA12`.
    pub id: Option<&'a str>,
    pub text: String,
}

pub struct Bulletins<'a> {
    lines: Peekable<Lines<'a>>,
    framed: bool,
}

impl<'a> Bulletins<'a> {
    fn next_framed(&mut self) -> Option<Bulletin<'a>> {
        loop {
            let line = self.lines.next()?;
            let id = match line.trim().strip_prefix("ZCZC") {
                Some(rest) => rest.split_whitespace().next(),
                None => continue,
            };

            let mut body = Vec::new();
            while let Some(&line) = self.lines.peek() {
                let trimmed = line.trim();
                // an unterminated bulletin ends where the next one opens
                if trimmed.starts_with("ZCZC") {
                    break;
                }
                self.lines.next();
                if trimmed == "NNNN" {
                    break;
                }
                body.push(line);
            }

            let text = body.join("\n").trim().to_string();
            if !text.is_empty() {
                break Some(Bulletin { id, text });
            }
        }
    }

    fn next_block(&mut self) -> Option<Bulletin<'a>> {
        let mut body = Vec::new();
        loop {
            match self.lines.next() {
                Some(line) if line.trim().is_empty() => {
                    if !body.is_empty() {
                        break;
                    }
                }
                Some(line) => body.push(line),
                None if body.is_empty() => return None,
                None => break,
            }
        }

        Some(Bulletin {
            id: None,
            text: body.join("\n").trim().to_string(),
        })
    }
}

impl<'a> Iterator for Bulletins<'a> {
    type Item = Bulletin<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.framed {
            self.next_framed()
        } else {
            self.next_block()
        }
    }
}
