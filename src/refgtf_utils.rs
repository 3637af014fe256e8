use anyhow::Context;
use flate2::bufread::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Type alias for a line reader over either a compressed or an uncompressed
/// annotation file.
pub type GtfLineReader = Box<dyn BufRead>;

/// Number of tab-separated columns in a GTF data line.
pub const GTF_N_COLUMNS: usize = 9;
/// Index of the strand column.
pub const STRAND_COLUMN: usize = 6;
/// Index of the attribute column.
pub const ATTRIBUTE_COLUMN: usize = 8;

pub(crate) const COMMENT_PREFIX: char = '#';

/// Attribute carrying the transcript identifier of the reference annotation.
pub const REFERENCE_ID: &str = "reference_id";
/// Attribute carrying the gene identifier of the reference annotation.
pub const REF_GENE_ID: &str = "ref_gene_id";
pub const TRANSCRIPT_ID: &str = "transcript_id";
pub const GENE_ID: &str = "gene_id";

/// The reference-derived attributes that never survive a rename.
pub(crate) const REFERENCE_ATTRIBUTES: [&str; 2] = [REF_GENE_ID, REFERENCE_ID];

/// Returns `true` if `line` is a comment or is blank, i.e. a line that is
/// written out exactly as it was read.
pub fn is_passthrough_line(line: &str) -> bool {
    line.starts_with(COMMENT_PREFIX) || line.trim().is_empty()
}

/// Tests if the stream underlying the [BufReader] `reader` is gzipped or not by examining the
/// first 2 bytes for the magic header.  This function *requires*, but does not check, that
/// none of the stream has yet been consumed. It will fill the buffer to examine the first
/// two bytes, but will not consume them.
///
/// Notes: implementation taken from
/// <https://github.com/zaeleus/noodles/blob/ba1b34ce22e72c2df277b20ce4c5c7b75d75a199/noodles-util/src/variant/reader/builder.rs#L131>
pub fn is_gzipped<T: BufRead>(reader: &mut T) -> std::io::Result<bool> {
    const GZIP_MAGIC_NUMBER: [u8; 2] = [0x1f, 0x8b];

    let src = reader.fill_buf()?;
    Ok(src.get(..2) == Some(&GZIP_MAGIC_NUMBER))
}

/// Creates a [GtfLineReader] from the provided path. Gzip compressed input is
/// detected from its magic number and decompressed on the fly.
pub fn get_reader_from_path<T: AsRef<Path>>(p: T) -> anyhow::Result<GtfLineReader> {
    let p = p.as_ref();
    let file = File::open(p).with_context(|| format!("Could not open {}", p.display()))?;
    let mut inner_rdr = BufReader::new(file);
    if is_gzipped(&mut inner_rdr)
        .with_context(|| format!("Could not read from {}", p.display()))?
    {
        info!("auto-detected gzipped file - reading via decompression");
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(inner_rdr))))
    } else {
        Ok(Box::new(inner_rdr))
    }
}

/// Creates a buffered writer for the output path, truncating any existing file.
pub fn get_writer_from_path<T: AsRef<Path>>(p: T) -> anyhow::Result<BufWriter<Box<dyn Write>>> {
    let p = p.as_ref();
    let file = File::create(p).with_context(|| format!("Could not create {}", p.display()))?;
    Ok(BufWriter::new(Box::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Cursor;

    #[test]
    fn test_is_gzipped() {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"chr1\t.\texon\n").unwrap();
        let gz = enc.finish().unwrap();

        let mut rdr = BufReader::new(Cursor::new(gz));
        assert!(is_gzipped(&mut rdr).unwrap());

        let mut rdr = BufReader::new(Cursor::new(b"chr1\t.\texon\n".to_vec()));
        assert!(!is_gzipped(&mut rdr).unwrap());

        // nothing is consumed by the check
        let mut line = String::new();
        rdr.read_line(&mut line).unwrap();
        assert_eq!(line, "chr1\t.\texon\n");

        let mut rdr = BufReader::new(Cursor::new(Vec::<u8>::new()));
        assert!(!is_gzipped(&mut rdr).unwrap());
    }

    #[test]
    fn test_is_passthrough_line() {
        assert!(is_passthrough_line("#!genome-build GRCh38\n"));
        assert!(is_passthrough_line("##provider: GENCODE"));
        assert!(is_passthrough_line(""));
        assert!(is_passthrough_line("  \t \n"));
        assert!(!is_passthrough_line(" #indented\n"));
        assert!(!is_passthrough_line("chr1\tStringTie\texon\n"));
    }
}
