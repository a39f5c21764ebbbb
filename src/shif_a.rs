//! Shred writer/reader (C4) — the *A* interchange format.
//!
//! A text header (shared in spirit with SCF-B, C7) is always used; the
//! per-file shred records that follow may be framed as text or as a
//! compact binary body. `shredtree` (the only producer in this crate)
//! always emits the binary body "for speed", per §4.4; the text body is a
//! fully supported library capability, reachable by calling [`write`] /
//! [`read`] with [`BodyFraming::Text`].
use std::io::{self, BufRead, BufReader, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::Error;
use crate::model::{FileShreds, HASH_WIDTH, Header, Shred};
use crate::normalize::NormalizationSet;

const MAGIC_PREFIX: &str = "#SHIF-A ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFraming {
    Text,
    Binary,
}

/// A full *A* document: header plus per-file shred lists.
#[derive(Debug, Clone)]
pub struct ShifADocument {
    pub header: Header,
    pub generator_program: String,
    pub comments: Vec<String>,
    pub files: Vec<FileShreds>,
}

pub fn write(w: &mut impl Write, doc: &ShifADocument, framing: BodyFraming) -> io::Result<()> {
    write_header(w, doc)?;
    match framing {
        BodyFraming::Text => write_text_body(w, &doc.files),
        BodyFraming::Binary => write_binary_body(w, &doc.files),
    }
}

fn write_header(w: &mut impl Write, doc: &ShifADocument) -> io::Result<()> {
    writeln!(w, "#SHIF-A 1.0")?;
    writeln!(w, "Normalization: {}", doc.header.normalization)?;
    writeln!(w, "Shred-Size: {}", doc.header.shred_size)?;
    writeln!(w, "Hash-Method: {}", doc.header.hash_method)?;
    writeln!(w, "Generator-Program: {}", doc.generator_program)?;
    for comment in &doc.comments {
        writeln!(w, "Comment: {comment}")?;
    }
    writeln!(w, "%%")
}

fn write_text_body(w: &mut impl Write, files: &[FileShreds]) -> io::Result<()> {
    for (index, file) in files.iter().enumerate() {
        if index > 0 {
            writeln!(w)?;
        }
        writeln!(w, "{}", file.file_id)?;
        for shred in &file.shreds {
            writeln!(
                w,
                "{} {} {}",
                shred.start,
                shred.end,
                hex_encode(&shred.hash)
            )?;
        }
    }
    Ok(())
}

fn write_binary_body(w: &mut impl Write, files: &[FileShreds]) -> io::Result<()> {
    w.write_u32::<BigEndian>(files.len() as u32)?;
    for file in files {
        writeln!(w, "{}", file.file_id)?;
        w.write_u16::<BigEndian>(file.shreds.len() as u16)?;
        for shred in &file.shreds {
            w.write_u16::<BigEndian>(shred.start as u16)?;
            w.write_u16::<BigEndian>(shred.end as u16)?;
            w.write_all(&shred.hash)?;
        }
    }
    Ok(())
}

pub fn read(r: &mut impl Read, framing: BodyFraming) -> Result<ShifADocument, Error> {
    let mut reader = BufReader::new(r);
    let (header, generator_program, comments) = read_header(&mut reader)?;
    let files = match framing {
        BodyFraming::Text => read_text_body(&mut reader)?,
        BodyFraming::Binary => read_binary_body(&mut reader)?,
    };
    Ok(ShifADocument {
        header,
        generator_program,
        comments,
        files,
    })
}

fn read_header(reader: &mut impl BufRead) -> Result<(Header, String, Vec<String>), Error> {
    let mut magic = String::new();
    reader.read_line(&mut magic)?;
    let magic = magic.trim_end_matches(['\n', '\r']);
    if !magic.starts_with(MAGIC_PREFIX) {
        return Err(Error::MalformedInput(format!(
            "expected {MAGIC_PREFIX:?} magic line, got {magic:?}"
        )));
    }
    let version = &magic[MAGIC_PREFIX.len()..];
    if !version.starts_with("1.") {
        return Err(Error::MalformedInput(format!(
            "unsupported SHIF-A version {version:?}"
        )));
    }

    let mut normalization = None;
    let mut shred_size = None;
    let mut hash_method = None;
    let mut generator_program = None;
    let mut comments = Vec::new();

    loop {
        let mut line = String::new();
        let n = reader.read_line(&mut line)?;
        if n == 0 {
            return Err(Error::MalformedInput(
                "unexpected EOF in SHIF-A header".to_string(),
            ));
        }
        let line = line.trim_end_matches(['\n', '\r']);
        if line == "%%" {
            break;
        }
        let Some((key, value)) = line.split_once(':') else {
            return Err(Error::MalformedInput(format!(
                "header line missing ':': {line:?}"
            )));
        };
        let value = value.trim();
        match key {
            "Normalization" => normalization = Some(NormalizationSet::parse(value)?),
            "Shred-Size" => {
                shred_size = Some(
                    value
                        .parse::<usize>()
                        .map_err(|_| Error::MalformedInput(format!("bad Shred-Size {value:?}")))?,
                )
            }
            "Hash-Method" => hash_method = Some(value.to_string()),
            "Generator-Program" => generator_program = Some(value.to_string()),
            "Comment" => comments.push(value.to_string()),
            other => {
                return Err(Error::MalformedInput(format!(
                    "unknown SHIF-A header key {other:?}"
                )));
            }
        }
    }

    let header = Header {
        hash_method: hash_method
            .ok_or_else(|| Error::MalformedInput("missing Hash-Method".to_string()))?,
        shred_size: shred_size
            .ok_or_else(|| Error::MalformedInput("missing Shred-Size".to_string()))?,
        normalization: normalization
            .ok_or_else(|| Error::MalformedInput("missing Normalization".to_string()))?,
    };
    let generator_program = generator_program
        .ok_or_else(|| Error::MalformedInput("missing Generator-Program".to_string()))?;

    Ok((header, generator_program, comments))
}

fn read_text_body(reader: &mut impl BufRead) -> Result<Vec<FileShreds>, Error> {
    let mut files = Vec::new();
    let mut current: Option<FileShreds> = None;

    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            if let Some(file) = current.take() {
                files.push(file);
            }
            continue;
        }
        let is_record = line
            .split_whitespace()
            .next()
            .is_some_and(|tok| tok.chars().all(|c| c.is_ascii_digit()))
            && line.split_whitespace().count() == 3;
        if is_record {
            let file = current
                .as_mut()
                .ok_or_else(|| Error::MalformedInput("shred record before any path line".into()))?;
            let mut parts = line.split_whitespace();
            let start = parts.next().unwrap().parse::<usize>().unwrap();
            let end = parts
                .next()
                .unwrap()
                .parse::<usize>()
                .map_err(|_| Error::MalformedInput(format!("bad shred record {line:?}")))?;
            let hash_hex = parts.next().unwrap();
            let hash = hex_decode(hash_hex)?;
            file.shreds.push(Shred { start, end, hash });
        } else {
            if let Some(file) = current.take() {
                files.push(file);
            }
            current = Some(FileShreds {
                file_id: line,
                shreds: Vec::new(),
            });
        }
    }
    if let Some(file) = current.take() {
        files.push(file);
    }
    Ok(files)
}

fn read_binary_body(reader: &mut impl BufRead) -> Result<Vec<FileShreds>, Error> {
    let file_count = reader.read_u32::<BigEndian>()?;
    let mut files = Vec::with_capacity(file_count as usize);
    for _ in 0..file_count {
        let mut file_id = String::new();
        let n = reader.read_line(&mut file_id)?;
        if n == 0 {
            return Err(Error::MalformedInput(
                "unexpected EOF reading SHIF-A binary file path".to_string(),
            ));
        }
        let file_id = file_id.trim_end_matches(['\n', '\r']).to_string();
        let record_count = reader.read_u16::<BigEndian>()?;
        let mut shreds = Vec::with_capacity(record_count as usize);
        for _ in 0..record_count {
            let start = reader.read_u16::<BigEndian>()? as usize;
            let end = reader.read_u16::<BigEndian>()? as usize;
            let mut hash = [0u8; HASH_WIDTH];
            reader.read_exact(&mut hash)?;
            shreds.push(Shred { start, end, hash });
        }
        files.push(FileShreds { file_id, shreds });
    }
    Ok(files)
}

fn hex_encode(hash: &[u8; HASH_WIDTH]) -> String {
    hash.iter().map(|b| format!("{b:02x}")).collect()
}

fn hex_decode(s: &str) -> Result<[u8; HASH_WIDTH], Error> {
    if s.len() != HASH_WIDTH * 2 {
        return Err(Error::MalformedInput(format!("bad hash length in {s:?}")));
    }
    let mut hash = [0u8; HASH_WIDTH];
    for (i, chunk) in s.as_bytes().chunks(2).enumerate() {
        let byte_str = std::str::from_utf8(chunk)
            .map_err(|_| Error::MalformedInput(format!("bad hash hex in {s:?}")))?;
        hash[i] = u8::from_str_radix(byte_str, 16)
            .map_err(|_| Error::MalformedInput(format!("bad hash hex in {s:?}")))?;
    }
    Ok(hash)
}

#[cfg(test)]
#[path = "shif_a_test.rs"]
mod tests;
