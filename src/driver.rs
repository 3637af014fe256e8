use crate::options::RewriteOptions;
use crate::refgtf_utils::{get_reader_from_path, get_writer_from_path};
use crate::rewriter::{LineOutcome, Rewriter};
use anyhow::Context;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{info, trace};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Tally of a rewrite run.
///
/// # Fields
///
/// * `n_lines`: all lines read, which is also the number of lines written.
/// * `n_passthrough`: comment and blank lines.
/// * `n_short`: lines with fewer than 9 columns.
/// * `n_records`: data lines that went through the rewrite.
/// * `n_strand_normalized`: records whose unknown strand was replaced.
/// * `n_renamed`: records whose reference identifiers were renamed.
/// * `n_skipped_attributes`: attribute segments dropped because they had no key-value separator.
pub struct RewriteSummary {
    pub n_lines: usize,
    pub n_passthrough: usize,
    pub n_short: usize,
    pub n_records: usize,
    pub n_strand_normalized: usize,
    pub n_renamed: usize,
    pub n_skipped_attributes: usize,
}

impl RewriteSummary {
    fn tally(&mut self, outcome: LineOutcome) {
        self.n_lines += 1;
        match outcome {
            LineOutcome::Passthrough => self.n_passthrough += 1,
            LineOutcome::Short => self.n_short += 1,
            LineOutcome::Record {
                strand_normalized,
                renamed,
                skipped_attributes,
            } => {
                self.n_records += 1;
                self.n_strand_normalized += strand_normalized as usize;
                self.n_renamed += renamed as usize;
                self.n_skipped_attributes += skipped_attributes;
            }
        }
    }
}

impl std::fmt::Display for RewriteSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} lines ({} comment/blank, {} with fewer than 9 columns, {} records); {} records renamed, {} strands set, {} attribute segments skipped",
            self.n_lines,
            self.n_passthrough,
            self.n_short,
            self.n_records,
            self.n_renamed,
            self.n_strand_normalized,
            self.n_skipped_attributes
        )
    }
}

/// Rewrites every line of `reader` into `writer`, in order.
///
/// Lines are read with their terminators, so comment, blank and short lines
/// are written back byte for byte. Any read or write failure, including
/// input that is not valid UTF-8, aborts the run with an error naming the
/// 1-based line number.
pub fn rewrite_stream<R: BufRead, W: Write>(
    rewriter: &Rewriter,
    mut reader: R,
    writer: &mut W,
) -> anyhow::Result<RewriteSummary> {
    let mut summary = RewriteSummary::default();
    let mut buf = String::with_capacity(1024);

    loop {
        buf.clear();
        let n = reader
            .read_line(&mut buf)
            .with_context(|| format!("Failed reading line {}", summary.n_lines + 1))?;
        if n == 0 {
            break;
        }

        let (out, outcome) = rewriter.rewrite_record(&buf);
        if let LineOutcome::Record {
            skipped_attributes, ..
        } = outcome
        {
            if skipped_attributes > 0 {
                trace!(
                    "line {}: skipped {} malformed attribute segment(s)",
                    summary.n_lines + 1,
                    skipped_attributes
                );
            }
        }
        writer
            .write_all(out.as_bytes())
            .with_context(|| format!("Failed writing line {}", summary.n_lines + 1))?;
        summary.tally(outcome);
    }

    Ok(summary)
}

/// Rewrites the GTF file at `input` into a new file at `output`.
///
/// A gzip compressed input is decompressed transparently; the output is always plain text.
pub fn rewrite_gtf_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: RewriteOptions,
) -> anyhow::Result<RewriteSummary> {
    let (input, output) = (input.as_ref(), output.as_ref());
    info!(
        "Rewriting reference identifiers from {} into {}",
        input.display(),
        output.display()
    );

    let reader = get_reader_from_path(input)?;
    let mut writer = get_writer_from_path(output)?;
    let rewriter = Rewriter::new(options);

    let summary = rewrite_stream(&rewriter, reader, &mut writer)
        .with_context(|| format!("Failed rewriting {}", input.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed writing {}", output.display()))?;

    info!("Finished rewriting: {}", summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const STRINGTIE_GTF: &str = "# stringtie --merge -G genes.gtf
# StringTie version 2.2.1
chr1\tStringTie\ttranscript\t11869\t14409\t1000\t.\t.\tgene_id \"MSTRG.1\"; transcript_id \"MSTRG.1.1\"; ref_gene_id \"gene:ENSG00000290825\"; reference_id \"transcript:ENST00000456328\"; gene_name \"DDX11L2\";
chr1\tStringTie\texon\t11869\t12227\t1000\t.\t.\tgene_id \"MSTRG.1\"; transcript_id \"MSTRG.1.1\"; exon_number \"1\"; ref_gene_id \"gene:ENSG00000290825\"; reference_id \"transcript:ENST00000456328\"; gene_name \"DDX11L2\";

chr1\tStringTie\ttranscript\t14404\t29570\t1000\t-\t.\tgene_id \"MSTRG.2\"; transcript_id \"MSTRG.2.1\"; unparsable;
chr1\tStringTie\texon
";

    #[test]
    fn test_rewrite_stream() {
        let mut out: Vec<u8> = Vec::new();
        let summary = rewrite_stream(
            &Rewriter::default(),
            Cursor::new(STRINGTIE_GTF.as_bytes()),
            &mut out,
        )
        .unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(out.lines().count(), STRINGTIE_GTF.lines().count());
        assert_eq!(
            out.lines().collect::<Vec<&str>>(),
            vec![
                "# stringtie --merge -G genes.gtf",
                "# StringTie version 2.2.1",
                "chr1\tStringTie\ttranscript\t11869\t14409\t1000\t+\t.\tgene_id \"ENSG00000290825\"; transcript_id \"ENST00000456328\"; gene_name \"DDX11L2\";",
                "chr1\tStringTie\texon\t11869\t12227\t1000\t+\t.\tgene_id \"ENSG00000290825\"; transcript_id \"ENST00000456328\"; exon_number \"1\"; gene_name \"DDX11L2\";",
                "",
                "chr1\tStringTie\ttranscript\t14404\t29570\t1000\t-\t.\tgene_id \"MSTRG.2\"; transcript_id \"MSTRG.2.1\"; unparsable;",
                "chr1\tStringTie\texon",
            ]
        );
        assert_eq!(
            summary,
            RewriteSummary {
                n_lines: 7,
                n_passthrough: 3,
                n_short: 1,
                n_records: 3,
                n_strand_normalized: 2,
                n_renamed: 2,
                n_skipped_attributes: 1,
            }
        );
    }

    #[test]
    fn test_rewrite_stream_last_line_without_newline() {
        let input = "#header\nchr1\tsrc\texon\t1\t10\t.\t.\t.\tgene_id \"G1\";";
        let mut out: Vec<u8> = Vec::new();
        let summary =
            rewrite_stream(&Rewriter::default(), Cursor::new(input.as_bytes()), &mut out).unwrap();
        // a rewritten data line always ends with a newline
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "#header\nchr1\tsrc\texon\t1\t10\t.\t+\t.\tgene_id \"G1\";\n"
        );
        assert_eq!(summary.n_lines, 2);

        // a trailing comment without a newline stays that way
        let mut out: Vec<u8> = Vec::new();
        rewrite_stream(&Rewriter::default(), Cursor::new("# end".as_bytes()), &mut out).unwrap();
        assert_eq!(out, b"# end");
    }

    #[test]
    fn test_rewrite_stream_invalid_utf8() {
        let input: &[u8] = b"#ok\nchr1\t\xff\xfe\n";
        let mut out: Vec<u8> = Vec::new();
        let res = rewrite_stream(&Rewriter::default(), Cursor::new(input), &mut out);
        let err = res.unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_summary_display() {
        let summary = RewriteSummary {
            n_lines: 4,
            n_passthrough: 1,
            n_short: 0,
            n_records: 3,
            n_strand_normalized: 1,
            n_renamed: 2,
            n_skipped_attributes: 0,
        };
        assert_eq!(
            summary.to_string(),
            "4 lines (1 comment/blank, 0 with fewer than 9 columns, 3 records); 2 records renamed, 1 strands set, 0 attribute segments skipped"
        );
    }
}
